use ledger_core::PaginationState;
use ledger_domain::{Amounted, MonthBucket};

const DATE_TIME_FORMAT: &str = "%d/%m/%Y %H:%M";
const HEADERS: [&str; 5] = ["#", "Product", "Quantity", "Selling Price", "Sold At"];

/// Formats `amount` with two decimals behind the optional display symbol.
pub fn format_amount(symbol: &str, amount: f64) -> String {
    if symbol.is_empty() {
        format!("{amount:.2}")
    } else {
        format!("{symbol} {amount:.2}")
    }
}

/// Renders the sales of one month as an aligned text table.
pub fn bucket_table(bucket: &MonthBucket, symbol: &str) -> String {
    let rows: Vec<[String; 5]> = bucket
        .sales
        .iter()
        .enumerate()
        .map(|(index, sale)| {
            [
                (index + 1).to_string(),
                sale.product_name.clone(),
                sale.quantity.to_string(),
                format_amount(symbol, sale.amount()),
                sale.sold_at.format(DATE_TIME_FORMAT).to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header = HEADERS.map(String::from);
    push_row(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|&width| "-".repeat(width)).collect();
    out.push_str(&format!("  {}\n", rule.join("  ")));
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, row: &[String; 5], widths: &[usize; 5]) {
    let line = format!(
        "  {:>w0$}  {:<w1$}  {:>w2$}  {:>w3$}  {:<w4$}",
        row[0],
        row[1],
        row[2],
        row[3],
        row[4],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
        w3 = widths[3],
        w4 = widths[4],
    );
    out.push_str(line.trim_end());
    out.push('\n');
}

/// `Page 2 of 6: ... 2 [3] 4 5 ...`, with ellipses when pages exist beyond the window.
pub fn pagination_bar(state: &PaginationState) -> String {
    let window = state.visible_window();
    let mut parts = Vec::with_capacity(window.len() + 2);
    if window.first().is_some_and(|&first| first > 1) {
        parts.push("...".to_string());
    }
    for &page in window {
        if page == state.current_page() {
            parts.push(format!("[{page}]"));
        } else {
            parts.push(page.to_string());
        }
    }
    if window
        .last()
        .is_some_and(|&last| last < state.total_pages())
    {
        parts.push("...".to_string());
    }

    format!(
        "Page {} of {}: {}",
        state.current_page(),
        state.total_pages(),
        parts.join(" ")
    )
}
