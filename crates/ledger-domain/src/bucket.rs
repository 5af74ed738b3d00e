//! Month buckets: the sales belonging to one calendar month.

use serde::Serialize;

use crate::{common::*, period::PeriodKey, sale::Sale};

/// The sales of one calendar month, kept in fetch order.
///
/// Revenue is derived on demand from the member sales and is never stored rounded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBucket {
    pub period: PeriodKey,
    pub sales: Vec<Sale>,
}

impl MonthBucket {
    pub fn new(period: PeriodKey) -> Self {
        Self {
            period,
            sales: Vec::new(),
        }
    }

    pub fn push(&mut self, sale: Sale) {
        self.sales.push(sale);
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    /// Sum of `quantity × unit_price` over the bucket's sales.
    pub fn revenue(&self) -> f64 {
        total_amount(&self.sales)
    }

    pub fn units_sold(&self) -> u64 {
        self.sales.iter().map(|sale| u64::from(sale.quantity)).sum()
    }
}

impl Displayable for MonthBucket {
    fn display_label(&self) -> String {
        self.period.display_label()
    }
}
