//! ledger-domain
//!
//! Pure domain models for the sales ledger (sale records, periods, month buckets, report scopes).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod bucket;
pub mod common;
pub mod identity;
pub mod period;
pub mod sale;
pub mod scope;

pub use bucket::*;
pub use common::*;
pub use identity::*;
pub use period::*;
pub use sale::*;
pub use scope::*;
