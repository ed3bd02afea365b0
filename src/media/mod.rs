//! Media URL resolution
//!
//! Turns the heterogeneous image references the backend serves (absolute
//! CDN URLs, protocol-relative URLs, relative backend paths, legacy field
//! names) into one absolute, displayable URL.

mod artwork;
pub mod cdn;
mod resolver;

pub use resolver::{ImageKind, MediaResolver};
