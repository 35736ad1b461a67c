//! Negotiated authentication strength per URL.

mod cache;
mod mode;


pub use cache::{AccessCache, url_without_auth};
pub use mode::{Access, AccessMode};
