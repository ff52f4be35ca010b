//! HTTP request handlers.

pub mod http;
pub mod movies;
pub mod users;

pub use http::*;
