use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use tg_boundary::{NewCategory, NewPlace, Place, UpdatePlace};
use tg_client_api::{PublicApi, UserApi};
use tg_core::{
    auth, authorization, categories,
    engagement::PlaceEngagement,
    feed::{PlaceFeed, RefreshOutcome, CITY},
    moderation::ModerationQueue,
    places,
    session::SessionStore,
};

use crate::{config::Config, session::FileSessionStore};

#[derive(Debug, Parser)]
#[command(
    name = "touristguide",
    version,
    about = "Command line client for the Tourist Guide directory"
)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new account and sign in.
    Register {
        name: String,
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Sign in and persist the session.
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the persisted session.
    Logout,
    /// Show who is currently signed in.
    Whoami,
    /// List the approved places of the city feed.
    Places {
        /// Filter by category id.
        #[arg(long)]
        category: Option<String>,
        /// Free-text search within the city.
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one place with its reviews.
    Place { id: String },
    /// Submit a new place for moderation.
    AddPlace {
        #[arg(long)]
        name: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        description: String,
        /// Category id, see `categories`.
        #[arg(long)]
        category: String,
        #[arg(long)]
        link: Option<String>,
        /// Image files to attach; may be given multiple times.
        #[arg(long = "image")]
        images: Vec<PathBuf>,
    },
    /// Update one of your places (owner or admin).
    UpdatePlace {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        link: Option<String>,
        #[arg(long = "image")]
        images: Vec<PathBuf>,
    },
    /// Delete one of your places (owner or admin).
    DeletePlace { id: String },
    /// List your own submissions, pending ones included.
    MyPlaces,
    /// List the places you liked.
    Liked,
    /// List the active categories.
    Categories,
    /// Create a category (admin).
    AddCategory {
        name: String,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Toggle your like on a place.
    Like { place_id: String },
    /// Manage reviews.
    #[command(subcommand)]
    Review(ReviewCommand),
    /// List the places awaiting approval (admin).
    Pending,
    /// Approve a pending place (admin).
    Approve { place_id: String },
    /// Reject and delete a pending place (admin).
    Reject { place_id: String },
}

#[derive(Debug, Subcommand)]
pub enum ReviewCommand {
    /// Add a review with a rating from 1 to 5.
    Add {
        place_id: String,
        rating: u8,
        comment: String,
    },
    /// Rewrite one of your reviews.
    Update {
        review_id: String,
        rating: u8,
        comment: String,
        /// The place the review belongs to (for reloading).
        #[arg(long)]
        place_id: String,
    },
    /// Delete one of your reviews.
    Delete {
        review_id: String,
        #[arg(long)]
        place_id: String,
    },
}

pub async fn run(args: Args) -> Result<()> {
    let config = Config::try_load_from_file_or_default(args.config.as_deref())?;
    let store = FileSessionStore::try_new(&config.session_dir)
        .context("Unable to open the session store")?;
    let public_api = PublicApi::new(config.api_url.clone());

    match args.command {
        Command::Register {
            name,
            email,
            password,
            confirm_password,
        } => {
            let session = auth::register(
                &public_api,
                &store,
                &name,
                &email,
                &password,
                &confirm_password,
            )
            .await?;
            println!("Registration successful. Welcome, {}!", session.user_name);
        }
        Command::Login { email, password } => {
            let session = auth::login(&public_api, &store, &email, &password).await?;
            println!("Welcome back, {}!", session.user_name);
        }
        Command::Logout => {
            auth::logout(&store);
            println!("Signed out.");
        }
        Command::Whoami => match store.current() {
            Some(session) => {
                println!(
                    "{} <{}> ({:?})",
                    session.user_name, session.user_email, session.user_role
                );
            }
            None => println!("Not signed in."),
        },
        Command::Places { category, search } => {
            let api = authorized(&public_api, &store)?;
            // `--category` accepts a category name or id; names are
            // resolved against the live category list
            let category = match category {
                Some(wanted) => {
                    let available = categories::load_categories(&api).await;
                    Some(
                        available
                            .iter()
                            .find(|c| c.id == wanted || c.name.eq_ignore_ascii_case(&wanted))
                            .map(|c| c.id.clone())
                            .unwrap_or(wanted),
                    )
                }
                None => None,
            };
            let feed = PlaceFeed::new(api);
            let outcome = match (category, search) {
                (category, None) => feed.set_category(category).await?,
                (None, Some(text)) => feed.search(&text).await?,
                (Some(category), Some(text)) => {
                    feed.set_category(Some(category)).await?;
                    feed.search(&text).await?
                }
            };
            if outcome == RefreshOutcome::Suppressed {
                println!("The backend is not reachable yet; the feed starts empty.");
            }
            print_places(&feed.places());
        }
        Command::Place { id } => {
            let api = authorized(&public_api, &store)?;
            let engagement = PlaceEngagement::new(api, id);
            let place = engagement.load().await?;
            let reviews = engagement.load_reviews().await?;
            let like = engagement.load_like_status().await?;

            println!("{} ({})", place.name, place.category.name);
            println!("{}, {}", place.location, place.city);
            println!("{}", place.description);
            if let Some(link) = &place.link {
                println!("Website: {link}");
            }
            if place.average_rating > 0.0 {
                println!(
                    "Rating {:.1} from {} review(s), {} like(s){}",
                    place.average_rating,
                    place.reviews_count,
                    place.likes_count,
                    if like.is_liked { " - you like this" } else { "" }
                );
            } else {
                println!("No ratings yet, {} like(s)", place.likes_count);
            }
            let permissions = place.permissions.as_ref();
            if authorization::can_edit_place(permissions) {
                println!("You may edit this place.");
            }
            if authorization::can_delete_place(permissions) {
                println!("You may delete this place.");
            }
            if reviews.is_empty() {
                println!("No reviews yet.");
            } else {
                println!("Reviews:");
                let user_id = store.user_id();
                for review in &reviews {
                    let yours = authorization::can_modify_review(review, user_id.as_deref());
                    println!(
                        "  [{}] {}/5 {} - {}{}",
                        review.id,
                        review.rating,
                        review.user.name,
                        review.comment,
                        if yours { " (yours)" } else { "" }
                    );
                }
            }
        }
        Command::AddPlace {
            name,
            location,
            description,
            category,
            link,
            images,
        } => {
            let api = authorized(&public_api, &store)?;
            let new_place = NewPlace {
                name,
                location,
                city: CITY.to_string(),
                description,
                category,
                link,
            };
            let created = places::submit_place(&api, &new_place, &images).await?;
            println!(
                "Submitted '{}' for approval (id {}).",
                created.name, created.id
            );
        }
        Command::UpdatePlace {
            id,
            name,
            location,
            description,
            category,
            link,
            images,
        } => {
            let api = authorized(&public_api, &store)?;
            let update = UpdatePlace {
                name,
                location,
                city: None,
                description,
                category,
                link,
            };
            let updated = places::update_place(&api, &id, &update, &images).await?;
            println!("Updated '{}'.", updated.name);
        }
        Command::DeletePlace { id } => {
            let api = authorized(&public_api, &store)?;
            places::delete_place(&api, &id).await?;
            println!("Place deleted.");
        }
        Command::MyPlaces => {
            let api = authorized(&public_api, &store)?;
            let mine = places::my_places(&api).await?;
            if mine.is_empty() {
                println!("You have not submitted any places yet.");
            }
            for place in &mine {
                let status = if place.is_approved {
                    "approved"
                } else {
                    "pending"
                };
                println!("[{}] {} ({status})", place.id, place.name);
            }
        }
        Command::Liked => {
            let api = authorized(&public_api, &store)?;
            let liked = places::liked_places(&api).await?;
            if liked.is_empty() {
                println!("You have not liked any places yet.");
            }
            for place in &liked {
                println!("[{}] {} - {}", place.id, place.name, place.location);
            }
        }
        Command::Categories => {
            let api = authorized(&public_api, &store)?;
            let list = categories::load_categories(&api).await;
            if list.is_empty() {
                println!("No categories available.");
            }
            for category in &list {
                println!("[{}] {}", category.id, category.name);
            }
        }
        Command::AddCategory {
            name,
            icon,
            description,
        } => {
            let api = authorized(&public_api, &store)?;
            require_admin(&store)?;
            let category = NewCategory {
                name,
                icon,
                description,
            };
            let created = categories::create_category(&api, &category).await?;
            println!("Created category '{}' (id {}).", created.name, created.id);
        }
        Command::Like { place_id } => {
            let api = authorized(&public_api, &store)?;
            let engagement = PlaceEngagement::new(api, place_id);
            let state = engagement.toggle_like().await?;
            if state.is_liked {
                println!("Liked ({} like(s) now).", state.likes_count);
            } else {
                println!("Like removed ({} like(s) now).", state.likes_count);
            }
        }
        Command::Review(review_command) => {
            let api = authorized(&public_api, &store)?;
            match review_command {
                ReviewCommand::Add {
                    place_id,
                    rating,
                    comment,
                } => {
                    let engagement = PlaceEngagement::new(api, place_id);
                    engagement.add_review(rating, &comment).await?;
                    print_review_aggregates(&engagement.state().place);
                }
                ReviewCommand::Update {
                    review_id,
                    rating,
                    comment,
                    place_id,
                } => {
                    let engagement = PlaceEngagement::new(api, place_id);
                    engagement.update_review(&review_id, rating, &comment).await?;
                    print_review_aggregates(&engagement.state().place);
                }
                ReviewCommand::Delete {
                    review_id,
                    place_id,
                } => {
                    let engagement = PlaceEngagement::new(api, place_id);
                    engagement.delete_review(&review_id).await?;
                    print_review_aggregates(&engagement.state().place);
                }
            }
        }
        Command::Pending => {
            let api = authorized(&public_api, &store)?;
            require_admin(&store)?;
            let queue = ModerationQueue::new(api);
            let pending = queue.load_pending().await?;
            println!("Pending approvals: {}", pending.len());
            for place in &pending {
                let by = place
                    .added_by
                    .as_ref()
                    .map(|user| user.name.as_str())
                    .unwrap_or("unknown");
                println!("[{}] {} - submitted by {by}", place.id, place.name);
            }
        }
        Command::Approve { place_id } => {
            let api = authorized(&public_api, &store)?;
            require_admin(&store)?;
            let queue = ModerationQueue::new(api);
            queue.approve(&place_id).await?;
            println!(
                "Place approved. {} place(s) still pending.",
                queue.pending().len()
            );
        }
        Command::Reject { place_id } => {
            let api = authorized(&public_api, &store)?;
            require_admin(&store)?;
            let queue = ModerationQueue::new(api);
            queue.reject(&place_id).await?;
            println!("Place rejected and deleted.");
        }
    }
    Ok(())
}

fn authorized(public_api: &PublicApi, store: &FileSessionStore) -> Result<UserApi> {
    match store.token() {
        Some(token) => Ok(public_api.authorize(token)),
        None => bail!("Not signed in. Run `touristguide login` first."),
    }
}

// Mirrors the hidden admin menu: the backend checks the role anyway,
// this just avoids a guaranteed 403.
fn require_admin(store: &FileSessionStore) -> Result<()> {
    if !store.is_admin() {
        bail!("This command requires the admin role.");
    }
    Ok(())
}

fn print_places(places: &[Place]) {
    if places.is_empty() {
        println!("No places found.");
        return;
    }
    for place in places {
        println!(
            "[{}] {} - {} ({}, rating {:.1}, {} like(s))",
            place.id,
            place.name,
            place.location,
            place.category.name,
            place.average_rating,
            place.likes_count
        );
    }
}

fn print_review_aggregates(place: &Option<Place>) {
    match place {
        Some(place) => println!(
            "Done. '{}' now has {} review(s), rating {:.1}.",
            place.name, place.reviews_count, place.average_rating
        ),
        None => println!("Done."),
    }
}
