//! Model to entity mappers
//!
//! `From<Model> for Entity` conversions, plus the encoding helpers used when
//! binding entity values into queries.

mod resource;
mod user;
mod verification;
mod version;

pub use version::encode_image_urls;
