//! Résumé content loading.
//!
//! Reads the general-data file and the fixed set of section files from a
//! content directory. Loading never fails: missing or malformed files yield
//! empty data and a log line.

pub mod loader;
pub mod record;
pub mod section;

pub use loader::{load_general_data, load_section, Content};
pub use record::{GeneralData, Record};
pub use section::{Section, SectionKind};
