use tg_boundary::{PlacePermissions, Review};

/// Whether the edit affordance may be offered for a place.
///
/// `can_edit` alone is not trusted: a half-populated permissions object
/// must also mark the viewer as owner or admin before any affordance is
/// enabled.
#[must_use]
pub fn can_edit_place(permissions: Option<&PlacePermissions>) -> bool {
    permissions.is_some_and(|p| (p.is_owner || p.is_admin) && p.can_edit)
}

#[must_use]
pub fn can_delete_place(permissions: Option<&PlacePermissions>) -> bool {
    permissions.is_some_and(|p| (p.is_owner || p.is_admin) && p.can_delete)
}

/// Only the author of a review gets the edit/delete affordance. The
/// backend enforces this as well; hiding it here is cosmetic.
#[must_use]
pub fn can_modify_review(review: &Review, user_id: Option<&str>) -> bool {
    user_id.is_some_and(|id| review.user.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::sample_review;

    #[test]
    fn half_populated_permissions_grant_nothing() {
        let permissions = PlacePermissions {
            can_edit: true,
            can_delete: true,
            is_owner: false,
            is_admin: false,
        };
        assert!(!can_edit_place(Some(&permissions)));
        assert!(!can_delete_place(Some(&permissions)));
    }

    #[test]
    fn owner_needs_the_backend_flag_too() {
        let permissions = PlacePermissions {
            can_edit: false,
            can_delete: false,
            is_owner: true,
            is_admin: false,
        };
        assert!(!can_edit_place(Some(&permissions)));
        assert!(!can_delete_place(Some(&permissions)));
    }

    #[test]
    fn owner_and_admin_views() {
        let owner = PlacePermissions {
            can_edit: true,
            can_delete: true,
            is_owner: true,
            is_admin: false,
        };
        assert!(can_edit_place(Some(&owner)));
        assert!(can_delete_place(Some(&owner)));

        let admin = PlacePermissions {
            can_edit: true,
            can_delete: true,
            is_owner: false,
            is_admin: true,
        };
        assert!(can_edit_place(Some(&admin)));
        assert!(can_delete_place(Some(&admin)));

        assert!(!can_edit_place(None));
    }

    #[test]
    fn review_affordance_is_author_only() {
        let review = sample_review("r1", "p1", "author-1", 4, "Nice");
        assert!(can_modify_review(&review, Some("author-1")));
        assert!(!can_modify_review(&review, Some("someone-else")));
        assert!(!can_modify_review(&review, None));
    }
}
