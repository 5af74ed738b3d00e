//! Groups raw sale records into calendar-month buckets.

use std::collections::BTreeMap;

use chrono::FixedOffset;
use tracing::error;

use ledger_domain::{MonthBucket, PeriodKey, Sale, SaleRecord};

use crate::error::{CoreError, CoreResult};

/// Month buckets keyed by their period. Iteration order is chronological.
pub type BucketMap = BTreeMap<PeriodKey, MonthBucket>;

/// Places every record in the bucket of its own `(year, month)`, observed at `offset`.
///
/// Records keep their relative input order inside a bucket. A record whose timestamp is
/// missing or unparsable aborts the whole pass with [`CoreError::MalformedRecord`].
pub fn bucket_sales<I>(records: I, offset: FixedOffset) -> CoreResult<BucketMap>
where
    I: IntoIterator<Item = SaleRecord>,
{
    let mut buckets = BucketMap::new();
    for record in records {
        let id = record.id.clone();
        let sale = Sale::from_record(record, offset).map_err(|err| {
            error!(sale_id = %id, reason = %err, "rejecting malformed sale record");
            CoreError::MalformedRecord {
                id,
                reason: err.to_string(),
            }
        })?;
        let period = PeriodKey::containing(&sale.sold_at);
        buckets
            .entry(period)
            .or_insert_with(|| MonthBucket::new(period))
            .push(sale);
    }
    Ok(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{reporting_offset, utc_offset};

    fn record(id: &str, sold_at: &str) -> SaleRecord {
        SaleRecord {
            id: id.into(),
            product_id: None,
            product_name: format!("Product {id}"),
            quantity: 1,
            unit_price: 10.0,
            sold_at: Some(sold_at.into()),
        }
    }

    fn key(year: i32, month: u32) -> PeriodKey {
        PeriodKey::new(year, month).unwrap()
    }

    #[test]
    fn empty_input_yields_no_buckets() {
        let buckets = bucket_sales(Vec::new(), utc_offset()).unwrap();
        assert!(buckets.is_empty());
    }

    #[test]
    fn every_record_lands_in_its_own_month_in_input_order() {
        let records = vec![
            record("a", "2024-03-02T10:00:00Z"),
            record("b", "2024-01-15T10:00:00Z"),
            record("c", "2024-03-01T09:00:00Z"),
            record("d", "2023-12-31T23:59:59Z"),
        ];
        let buckets = bucket_sales(records, utc_offset()).unwrap();

        assert_eq!(buckets.len(), 3);
        let march: Vec<&str> = buckets[&key(2024, 3)]
            .sales
            .iter()
            .map(|sale| sale.id.as_str())
            .collect();
        assert_eq!(march, ["a", "c"]);
        assert_eq!(buckets[&key(2024, 1)].len(), 1);
        assert_eq!(buckets[&key(2023, 12)].len(), 1);
        let total: usize = buckets.values().map(MonthBucket::len).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn month_boundary_follows_reporting_offset() {
        let records = vec![record("late", "2023-12-31T23:30:00Z")];
        let buckets = bucket_sales(records, reporting_offset(60)).unwrap();
        assert!(buckets.contains_key(&key(2024, 1)));
    }

    #[test]
    fn malformed_timestamp_rejects_the_batch() {
        let mut broken = record("broken", "not a date");
        let records = vec![record("ok", "2024-03-02T10:00:00Z"), broken.clone()];
        match bucket_sales(records, utc_offset()) {
            Err(CoreError::MalformedRecord { id, .. }) => assert_eq!(id, "broken"),
            other => panic!("expected malformed record error, got {other:?}"),
        }

        broken.sold_at = None;
        assert!(matches!(
            bucket_sales(vec![broken], utc_offset()),
            Err(CoreError::MalformedRecord { .. })
        ));
    }
}
