//! Boundary traits for the external sales-data provider.

use ledger_domain::{Identity, SaleRecord};

use crate::error::CoreResult;

/// Source of the raw sale records for one identity.
///
/// Each call returns the complete record list; callers replace their snapshot wholesale.
pub trait SalesProvider: Send + Sync {
    fn fetch_sales(&self, identity: &Identity) -> CoreResult<Vec<SaleRecord>>;
}

/// Sink accepting newly recorded sales for one identity.
pub trait SalesRecorder: Send + Sync {
    fn record_sale(&self, identity: &Identity, record: SaleRecord) -> CoreResult<()>;
}
