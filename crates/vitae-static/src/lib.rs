//! Static site emitter for vitae résumés.
//!
//! Renders loaded content into a single HTML page and copies resource
//! directories alongside it.

pub mod builder;
pub mod markdown;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, SiteBuilder, INDEX_FILE};
pub use markdown::Markdown;
pub use templates::{PageConfig, PageRenderer};
