//! Data models for users and the movie catalog.

pub mod movie;
pub mod user;

pub use movie::*;
pub use user::*;
