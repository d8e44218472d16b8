//! URL normalization and site comparison
//!
//! The crawler identifies pages by their normalized URL; this module holds
//! the normalization rules and the same-site check used when deciding
//! whether a discovered link should be followed.

mod normalize;

pub use normalize::{normalize_url, same_site};
