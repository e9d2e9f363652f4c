use tg_boundary::{NewCategory, NewPlace, NewReview};

use crate::error::Error;

pub use fast_chemail::is_valid_email;

pub const MIN_PASSWORD_LEN: usize = 6;

#[must_use]
pub fn is_valid_password(password: &str) -> bool {
    password.len() >= MIN_PASSWORD_LEN
}

#[must_use]
pub fn is_valid_rating(rating: u8) -> bool {
    (1..=5).contains(&rating)
}

/// Rejects a review before any network call is attempted.
pub fn validate_review(review: &NewReview) -> Result<(), Error> {
    if !is_valid_rating(review.rating) {
        return Err(Error::RatingValue);
    }
    if review.comment.trim().is_empty() {
        return Err(Error::EmptyComment);
    }
    Ok(())
}

/// Rejects an incomplete place submission before any network call.
pub fn validate_new_place(place: &NewPlace) -> Result<(), Error> {
    if place.name.trim().is_empty() {
        return Err(Error::EmptyField("place name"));
    }
    if place.location.trim().is_empty() {
        return Err(Error::EmptyField("location"));
    }
    if place.description.trim().is_empty() {
        return Err(Error::EmptyField("description"));
    }
    if place.category.trim().is_empty() {
        return Err(Error::MissingCategory);
    }
    Ok(())
}

pub fn validate_new_category(category: &NewCategory) -> Result<(), Error> {
    if category.name.trim().is_empty() {
        return Err(Error::EmptyName);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_bounds() {
        let review = |rating, comment: &str| NewReview {
            rating,
            comment: comment.to_string(),
        };
        assert_eq!(validate_review(&review(0, "fine")), Err(Error::RatingValue));
        assert_eq!(validate_review(&review(6, "fine")), Err(Error::RatingValue));
        assert_eq!(validate_review(&review(3, "  ")), Err(Error::EmptyComment));
        assert!(validate_review(&review(1, "ok")).is_ok());
        assert!(validate_review(&review(5, "great")).is_ok());
    }

    #[test]
    fn place_requires_all_fields_and_a_category() {
        let place = NewPlace {
            name: "Dutch Garden".into(),
            location: "Nanpura".into(),
            city: "Surat".into(),
            description: "Historic garden".into(),
            category: "cat1".into(),
            link: None,
        };
        assert!(validate_new_place(&place).is_ok());

        let mut missing_name = place.clone();
        missing_name.name = " ".into();
        assert_eq!(
            validate_new_place(&missing_name),
            Err(Error::EmptyField("place name"))
        );

        let mut missing_category = place;
        missing_category.category = String::new();
        assert_eq!(
            validate_new_place(&missing_category),
            Err(Error::MissingCategory)
        );
    }

    #[test]
    fn password_length() {
        assert!(!is_valid_password("12345"));
        assert!(is_valid_password("123456"));
    }

    #[test]
    fn email_syntax() {
        assert!(is_valid_email("visitor@example.com"));
        assert!(!is_valid_email("visitor@"));
        assert!(!is_valid_email(""));
    }
}
