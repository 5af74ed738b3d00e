//! Reverse-chronological, completed view over the month buckets.

use chrono::FixedOffset;
use serde::Serialize;
use tracing::{debug, warn};

use ledger_domain::{total_amount, MonthBucket, PeriodKey, SaleRecord};

use crate::{
    bucketer::{bucket_sales, BucketMap},
    error::CoreResult,
};

/// The ordered month buckets shown to the user.
///
/// Buckets are strictly descending by period, never later than the current month, and the
/// current month is always the first entry even when it has no sales.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerView {
    current: PeriodKey,
    buckets: Vec<MonthBucket>,
}

impl LedgerView {
    /// Drops future periods, guarantees the current month and orders the rest most recent first.
    pub fn build(mut buckets: BucketMap, current: PeriodKey) -> Self {
        let before = buckets.len();
        buckets.retain(|period, _| !period.is_after(&current));
        let dropped = before - buckets.len();
        if dropped > 0 {
            warn!(%current, dropped, "discarding future-dated periods");
        }

        buckets
            .entry(current)
            .or_insert_with(|| MonthBucket::new(current));

        let buckets: Vec<MonthBucket> = buckets.into_values().rev().collect();
        debug!(%current, periods = buckets.len(), "ledger view built");
        Self { current, buckets }
    }

    /// Buckets `records` at `offset` and builds the view in one step.
    pub fn from_records<I>(records: I, current: PeriodKey, offset: FixedOffset) -> CoreResult<Self>
    where
        I: IntoIterator<Item = SaleRecord>,
    {
        Ok(Self::build(bucket_sales(records, offset)?, current))
    }

    /// A view holding only the (empty) current month.
    pub fn empty(current: PeriodKey) -> Self {
        Self::build(BucketMap::new(), current)
    }

    pub fn current_period(&self) -> PeriodKey {
        self.current
    }

    pub fn buckets(&self) -> &[MonthBucket] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Returns the bucket shown on the 1-based `page`.
    pub fn page(&self, page: usize) -> Option<&MonthBucket> {
        page.checked_sub(1).and_then(|index| self.buckets.get(index))
    }

    pub fn bucket(&self, period: &PeriodKey) -> Option<&MonthBucket> {
        self.buckets.iter().find(|bucket| bucket.period == *period)
    }

    pub fn periods(&self) -> impl Iterator<Item = PeriodKey> + '_ {
        self.buckets.iter().map(|bucket| bucket.period)
    }

    /// Distinct years present in the view, most recent first.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.periods().map(|period| period.year()).collect();
        years.dedup();
        years
    }

    /// Periods of `year` present in the view, most recent first.
    pub fn months_in(&self, year: i32) -> Vec<PeriodKey> {
        self.periods()
            .filter(|period| period.year() == year)
            .collect()
    }

    pub fn sale_count(&self) -> usize {
        self.buckets.iter().map(MonthBucket::len).sum()
    }

    pub fn total_revenue(&self) -> f64 {
        total_amount(self.buckets.iter().flat_map(|bucket| bucket.sales.iter()))
    }
}
