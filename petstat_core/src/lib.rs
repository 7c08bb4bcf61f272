#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Pet stat record model, merge rules and JSON persistence.

pub mod error;
pub mod merge;
pub mod record;
pub mod store;

pub use error::{Error, Result};
pub use merge::merge_into;
pub use record::{PetRecord, RecordSet, StatBlock, StatKind};
pub use store::{load_record_set, write_record_set};
