//! Report export: selects the sales covered by a scope and renders them as report lines.

use chrono::NaiveDate;
use serde::Serialize;

use ledger_domain::{round_cents, Amounted, Displayable, ReportScope, Sale};

use crate::view::LedgerView;

pub const REPORT_COLUMNS: [&str; 5] = [
    "Serial No",
    "Product Name",
    "Quantity",
    "Selling Price",
    "Date",
];

const REPORT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Returns the sales covered by `scope` in ledger order.
///
/// `AllPeriods` flattens the view most recent month first; `SpecificPeriod` yields the single
/// matching bucket, or nothing when the period is absent.
pub fn select_sales(view: &LedgerView, scope: ReportScope) -> Vec<&Sale> {
    view.buckets()
        .iter()
        .filter(|bucket| scope.includes(&bucket.period))
        .flat_map(|bucket| bucket.sales.iter())
        .collect()
}

/// One row of an exported report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportLine {
    pub serial: usize,
    pub product_name: String,
    pub quantity: u32,
    /// `quantity × unit_price`, rounded to cents.
    pub line_total: f64,
    pub date: NaiveDate,
}

impl ReportLine {
    fn from_sale(serial: usize, sale: &Sale) -> Self {
        Self {
            serial,
            product_name: sale.product_name.clone(),
            quantity: sale.quantity,
            line_total: round_cents(sale.line_total()),
            date: sale.sold_on(),
        }
    }

    pub fn formatted_total(&self) -> String {
        format!("{:.2}", self.line_total)
    }

    pub fn formatted_date(&self) -> String {
        self.date.format(REPORT_DATE_FORMAT).to_string()
    }
}

impl Amounted for ReportLine {
    fn amount(&self) -> f64 {
        self.line_total
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesReport {
    pub scope: ReportScope,
    pub lines: Vec<ReportLine>,
}

impl SalesReport {
    pub fn title(&self) -> String {
        format!("Sales Report ({})", self.scope.display_label())
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of the rounded line totals.
    pub fn total_revenue(&self) -> f64 {
        round_cents(self.lines.iter().map(Amounted::amount).sum())
    }
}

/// Builds the report for `scope`. Serial numbers are 1-based in output order.
pub fn export_report(view: &LedgerView, scope: ReportScope) -> SalesReport {
    let lines = select_sales(view, scope)
        .into_iter()
        .enumerate()
        .map(|(index, sale)| ReportLine::from_sale(index + 1, sale))
        .collect();
    SalesReport { scope, lines }
}

#[derive(Clone, Copy)]
enum Align {
    Left,
    Center,
    Right,
}

const COLUMN_ALIGN: [Align; 5] = [
    Align::Center,
    Align::Left,
    Align::Center,
    Align::Right,
    Align::Center,
];

/// Renders the report as a plain-text grid. Identical reports render byte-identically.
pub fn render_table(report: &SalesReport) -> String {
    let rows: Vec<[String; 5]> = report
        .lines
        .iter()
        .map(|line| {
            [
                line.serial.to_string(),
                line.product_name.clone(),
                line.quantity.to_string(),
                line.formatted_total(),
                line.formatted_date(),
            ]
        })
        .collect();

    let mut widths = REPORT_COLUMNS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let border = {
        let mut line = String::from("+");
        for width in &widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line
    };

    let mut out = String::new();
    out.push_str(&report.title());
    out.push('\n');
    out.push_str(&border);
    out.push('\n');
    out.push_str(&render_row(&REPORT_COLUMNS, &widths, &[Align::Center; 5]));
    out.push_str(&border);
    out.push('\n');
    for row in &rows {
        out.push_str(&render_row(row, &widths, &COLUMN_ALIGN));
    }
    if !rows.is_empty() {
        out.push_str(&border);
        out.push('\n');
    }
    out.push_str(&format!(
        "Total quantity: {}\nTotal revenue: {:.2}\n",
        report.total_quantity(),
        report.total_revenue()
    ));
    out
}

fn render_row<S: AsRef<str>>(cells: &[S], widths: &[usize; 5], align: &[Align; 5]) -> String {
    let mut line = String::from("|");
    for ((cell, &width), align) in cells.iter().zip(widths.iter()).zip(align.iter()) {
        let cell = cell.as_ref();
        let padded = match align {
            Align::Left => format!("{cell:<width$}"),
            Align::Center => format!("{cell:^width$}"),
            Align::Right => format!("{cell:>width$}"),
        };
        line.push(' ');
        line.push_str(&padded);
        line.push_str(" |");
    }
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::utc_offset;
    use ledger_domain::{PeriodKey, SaleRecord};

    fn key(year: i32, month: u32) -> PeriodKey {
        PeriodKey::new(year, month).unwrap()
    }

    fn record(id: &str, name: &str, sold_at: &str, quantity: u32, unit_price: f64) -> SaleRecord {
        SaleRecord {
            id: id.into(),
            product_id: None,
            product_name: name.into(),
            quantity,
            unit_price,
            sold_at: Some(sold_at.into()),
        }
    }

    fn sample_view() -> LedgerView {
        let records = vec![
            record("1", "Pen", "2024-01-05T10:00:00Z", 3, 1.005),
            record("2", "Notebook", "2024-03-02T10:00:00Z", 2, 4.5),
            record("3", "Stapler", "2024-03-09T10:00:00Z", 1, 12.0),
        ];
        LedgerView::from_records(records, key(2024, 3), utc_offset()).unwrap()
    }

    #[test]
    fn all_periods_follow_ledger_order() {
        let view = sample_view();
        let ids: Vec<&str> = select_sales(&view, ReportScope::AllPeriods)
            .into_iter()
            .map(|sale| sale.id.as_str())
            .collect();
        assert_eq!(ids, ["2", "3", "1"]);
    }

    #[test]
    fn specific_period_selects_one_bucket() {
        let view = sample_view();
        let report = export_report(&view, ReportScope::SpecificPeriod(key(2024, 1)));
        assert_eq!(report.lines.len(), 1);
        assert_eq!(report.lines[0].serial, 1);
        assert_eq!(report.lines[0].product_name, "Pen");
        assert_eq!(report.title(), "Sales Report (January, 2024)");
    }

    #[test]
    fn missing_period_exports_empty_report() {
        let view = sample_view();
        let report = export_report(&view, ReportScope::SpecificPeriod(key(2023, 11)));
        assert!(report.is_empty());
        assert_eq!(report.total_revenue(), 0.0);
    }

    #[test]
    fn lines_carry_rounded_totals_and_british_dates() {
        let view = sample_view();
        let report = export_report(&view, ReportScope::AllPeriods);
        let serials: Vec<usize> = report.lines.iter().map(|line| line.serial).collect();
        assert_eq!(serials, [1, 2, 3]);
        assert_eq!(report.lines[0].formatted_total(), "9.00");
        assert_eq!(report.lines[0].formatted_date(), "02/03/2024");
        assert_eq!(report.lines[2].formatted_date(), "05/01/2024");
        assert_eq!(report.total_quantity(), 6);
        assert_eq!(report.title(), "Sales Report (All Months)");
    }

    #[test]
    fn rendered_table_aligns_columns() {
        let view = sample_view();
        let report = export_report(&view, ReportScope::SpecificPeriod(key(2024, 3)));
        let rendered = render_table(&report);
        let expected = "\
Sales Report (March, 2024)
+-----------+--------------+----------+---------------+------------+
| Serial No | Product Name | Quantity | Selling Price |    Date    |
+-----------+--------------+----------+---------------+------------+
|     1     | Notebook     |    2     |          9.00 | 02/03/2024 |
|     2     | Stapler      |    1     |         12.00 | 09/03/2024 |
+-----------+--------------+----------+---------------+------------+
Total quantity: 3
Total revenue: 21.00
";
        assert_eq!(rendered, expected);
        assert_eq!(render_table(&report), rendered);
    }

    #[test]
    fn empty_report_renders_header_and_zero_totals() {
        let view = LedgerView::empty(key(2024, 3));
        let rendered = render_table(&export_report(&view, ReportScope::AllPeriods));
        assert!(rendered.starts_with("Sales Report (All Months)\n"));
        assert!(rendered.ends_with("Total quantity: 0\nTotal revenue: 0.00\n"));
    }
}
