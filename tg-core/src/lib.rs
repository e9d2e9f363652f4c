pub mod auth;
pub mod authorization;
pub mod categories;
pub mod engagement;
mod error;
pub mod feed;
pub mod gateways;
pub mod moderation;
pub mod outcome;
pub mod places;
pub mod session;
pub mod validate;


pub use self::{error::Error, outcome::Outcome};
