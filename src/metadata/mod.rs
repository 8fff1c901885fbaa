//! Metadata tracking
//!
//! Keeps one attribute record per item created through ID1FS.

pub mod record;
pub mod store;

pub use record::{MetadataRecord, StatSnapshot, build_record};
pub use store::{LoadedMetadata, MetadataMap, MetadataStore, StoreUpdate};
