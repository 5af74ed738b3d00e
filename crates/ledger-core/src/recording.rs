//! Validation and submission of newly recorded sales.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use ledger_domain::{Identity, SaleRecord};

use crate::{
    error::{CoreError, CoreResult},
    provider::SalesRecorder,
    time::Clock,
};

/// A sale entered by the user, not yet accepted by the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleDraft {
    pub product_id: Option<String>,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl SaleDraft {
    pub fn new(product_name: impl Into<String>, quantity: u32, unit_price: f64) -> Self {
        Self {
            product_id: None,
            product_name: product_name.into(),
            quantity,
            unit_price,
        }
    }

    pub fn with_product_id(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    /// Checks the draft against the available stock, when known.
    pub fn validate(&self, available_stock: Option<u32>) -> CoreResult<()> {
        if self.product_name.trim().is_empty() {
            return Err(CoreError::Validation("Please fill in all fields".into()));
        }
        if self.quantity == 0 || !self.unit_price.is_finite() || self.unit_price <= 0.0 {
            return Err(CoreError::Validation(
                "Quantity and price must be greater than zero".into(),
            ));
        }
        if let Some(stock) = available_stock {
            if self.quantity > stock {
                return Err(CoreError::Validation(
                    "Sale quantity exceeds available stock".into(),
                ));
            }
        }
        Ok(())
    }

    pub fn into_record(self, sold_at: DateTime<Utc>) -> SaleRecord {
        SaleRecord::new(
            self.product_id,
            self.product_name.trim(),
            self.quantity,
            self.unit_price,
            sold_at,
        )
    }
}

/// Validates `draft`, stamps it with the clock's time and hands it to `recorder`.
///
/// The caller is expected to refresh its ledger afterwards.
pub fn record_sale<R>(
    recorder: &R,
    identity: &Identity,
    draft: SaleDraft,
    available_stock: Option<u32>,
    clock: &dyn Clock,
) -> CoreResult<SaleRecord>
where
    R: SalesRecorder + ?Sized,
{
    draft.validate(available_stock)?;
    let record = draft.into_record(clock.now());
    recorder.record_sale(identity, record.clone())?;
    info!(%identity, sale_id = %record.id, "sale recorded");
    Ok(record)
}
