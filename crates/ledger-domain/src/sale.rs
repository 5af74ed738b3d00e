//! Sale records as delivered by the sales provider, and their validated form.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// A completed sale exactly as the provider returns it.
///
/// The timestamp is kept raw; it is only trusted after [`Sale::from_record`] has parsed it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    pub product_name: String,
    pub quantity: u32,
    #[serde(alias = "price")]
    pub unit_price: f64,
    #[serde(default, alias = "date", alias = "timestamp")]
    pub sold_at: Option<String>,
}

impl SaleRecord {
    /// Builds a freshly recorded sale with a new identifier and an RFC 3339 timestamp.
    pub fn new(
        product_id: Option<String>,
        product_name: impl Into<String>,
        quantity: u32,
        unit_price: f64,
        sold_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            product_id,
            product_name: product_name.into(),
            quantity,
            unit_price,
            sold_at: Some(sold_at.to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }
}

impl Identifiable for SaleRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A sale whose timestamp has been parsed into the reporting time zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sale {
    pub id: String,
    pub product_id: Option<String>,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub sold_at: DateTime<FixedOffset>,
}

impl Sale {
    /// Validates `record`, reading naive timestamps in `offset` and converting zoned ones into it.
    pub fn from_record(record: SaleRecord, offset: FixedOffset) -> Result<Self, SaleRecordError> {
        let raw = record
            .sold_at
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .ok_or(SaleRecordError::MissingTimestamp)?;
        let sold_at = parse_timestamp(raw, offset)
            .ok_or_else(|| SaleRecordError::UnparsableTimestamp(raw.to_string()))?;
        Ok(Self {
            id: record.id,
            product_id: record.product_id,
            product_name: record.product_name,
            quantity: record.quantity,
            unit_price: record.unit_price,
            sold_at,
        })
    }

    /// Unrounded `quantity × unit_price`.
    pub fn line_total(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }

    pub fn sold_on(&self) -> NaiveDate {
        self.sold_at.date_naive()
    }
}

impl Identifiable for Sale {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Amounted for Sale {
    fn amount(&self) -> f64 {
        self.line_total()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaleRecordError {
    MissingTimestamp,
    UnparsableTimestamp(String),
}

impl fmt::Display for SaleRecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaleRecordError::MissingTimestamp => f.write_str("timestamp is missing"),
            SaleRecordError::UnparsableTimestamp(raw) => {
                write!(f, "timestamp `{raw}` could not be parsed")
            }
        }
    }
}

impl std::error::Error for SaleRecordError {}

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses RFC 3339, naive date-time or date-only timestamps.
pub fn parse_timestamp(raw: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    if let Ok(zoned) = DateTime::parse_from_rfc3339(raw) {
        return Some(zoned.with_timezone(&offset));
    }
    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;
    offset.from_local_datetime(&naive).single()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn record(sold_at: Option<&str>) -> SaleRecord {
        SaleRecord {
            id: "sale-1".into(),
            product_id: Some("prod-1".into()),
            product_name: "Notebook".into(),
            quantity: 3,
            unit_price: 2.5,
            sold_at: sold_at.map(str::to_string),
        }
    }

    #[test]
    fn deserializes_provider_field_names() {
        let json = r#"{"_id":"abc","productId":"p1","productName":"Pen","quantity":2,"price":1.25,"date":"2024-03-05T10:00:00Z"}"#;
        let record: SaleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "abc");
        assert_eq!(record.product_id.as_deref(), Some("p1"));
        assert_eq!(record.unit_price, 1.25);
        assert_eq!(record.sold_at.as_deref(), Some("2024-03-05T10:00:00Z"));
    }

    #[test]
    fn zoned_timestamp_is_converted_into_reporting_offset() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let sale = Sale::from_record(record(Some("2024-03-31T23:30:00Z")), offset).unwrap();
        assert_eq!(sale.sold_at.month(), 4);
        assert_eq!(sale.sold_at.hour(), 1);
    }

    #[test]
    fn naive_and_date_only_timestamps_are_accepted() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let naive = Sale::from_record(record(Some("2024-02-10T08:15:00.250")), utc).unwrap();
        assert_eq!(naive.sold_on(), NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
        let date_only = Sale::from_record(record(Some("2024-02-11")), utc).unwrap();
        assert_eq!(date_only.sold_on(), NaiveDate::from_ymd_opt(2024, 2, 11).unwrap());
    }

    #[test]
    fn missing_or_garbage_timestamps_are_rejected() {
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(
            Sale::from_record(record(None), utc),
            Err(SaleRecordError::MissingTimestamp)
        );
        assert_eq!(
            Sale::from_record(record(Some("  ")), utc),
            Err(SaleRecordError::MissingTimestamp)
        );
        assert_eq!(
            Sale::from_record(record(Some("yesterday")), utc),
            Err(SaleRecordError::UnparsableTimestamp("yesterday".into()))
        );
    }

    #[test]
    fn line_total_multiplies_quantity_and_price() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let sale = Sale::from_record(record(Some("2024-01-01")), utc).unwrap();
        assert_eq!(sale.line_total(), 7.5);
        assert_eq!(sale.amount(), 7.5);
    }

    #[test]
    fn new_record_carries_rfc3339_timestamp() {
        let now = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        let created = SaleRecord::new(None, "Mug", 1, 4.0, now);
        assert_eq!(created.sold_at.as_deref(), Some("2024-05-06T07:08:09Z"));
        assert!(!created.id.is_empty());
    }
}
