//! ledger-core
//!
//! Sales ledger aggregation and reporting.
//! Depends on ledger-domain. No CLI, no terminal I/O, no direct storage interactions.

pub mod bucketer;
pub mod error;
pub mod export;
pub mod pagination;
pub mod provider;
pub mod recording;
pub mod session;
pub mod time;
pub mod view;

pub use bucketer::*;
pub use error::{CoreError, CoreResult};
pub use export::*;
pub use pagination::*;
pub use provider::*;
pub use recording::*;
pub use session::*;
pub use time::*;
pub use view::*;
