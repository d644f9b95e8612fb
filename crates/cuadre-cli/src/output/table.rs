use cuadre_core::analysis::StatusFilter;
use cuadre_core::model::{RawRow, TransactionRecord};
use cuadre_core::pagination::{DepositsResponse, Page, SalesResponse, TransactionsResponse};
use cuadre_core::profile::schema::StatementProfile;

const RECORD_HEADERS: [&str; 10] = [
    "ID", "Date", "Paid", "Cur", "Supplier", "Discount", "Due", "Type", "Status", "Payment",
];

pub fn format_records(records: &[TransactionRecord]) -> String {
    if records.is_empty() {
        return "  (no transactions)".to_string();
    }
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            vec![
                r.id.clone(),
                r.date.clone(),
                r.amount_paid.to_string(),
                r.currency.clone(),
                r.supplier_id.clone(),
                r.discount.to_string(),
                r.amount_due.to_string(),
                r.transaction_type.clone(),
                r.transaction_status.clone(),
                r.payment_type.clone(),
            ]
        })
        .collect();
    format_grid(&RECORD_HEADERS, &rows)
}

/// Raw rows, numbered by column since rows carry no header.
pub fn format_rows(rows: &[RawRow]) -> String {
    if rows.is_empty() {
        return "  (no rows)".to_string();
    }
    let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    let headers: Vec<String> = (1..=width).map(|i| format!("#{i}")).collect();
    let headers: Vec<&str> = headers.iter().map(String::as_str).collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect();
    format_grid(&headers, &cells)
}

pub fn format_transactions(response: &TransactionsResponse, status: StatusFilter) -> String {
    let mut out = String::new();
    let count = response.total.unwrap_or(response.results.len());
    out.push_str(&format!("Transactions ({status}): {count}\n"));
    push_page_info(&mut out, response);
    out.push('\n');
    out.push_str(&format_records(&response.results));
    out
}

pub fn format_deposits(response: &DepositsResponse, status: StatusFilter) -> String {
    let mut out = String::new();
    out.push_str(&format!("Deposits ({status})\n\n"));
    out.push_str(&format!("  Total: {}\n", response.total_amount));
    push_page_info(&mut out, &response.page);
    out.push('\n');
    out.push_str(&format_records(&response.page.results));
    out
}

pub fn format_sales(
    response: &SalesResponse,
    status: StatusFilter,
    profile: &StatementProfile,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("Sales ({status}), {}\n\n", profile.name));
    let totals = [
        ("Saldo", response.total_saldo),
        ("Propia", response.total_propia),
        ("Movil", response.total_movil),
        ("Nauta", response.total_nauta),
        ("Nauta Hogar", response.total_nauta_hogar),
        ("Factura", response.total_factura),
    ];
    for (label, amount) in totals {
        out.push_str(&format!("  {:<12} {:>12}\n", label, amount.to_string()));
    }
    out.push_str(&format!("  {}\n", "-".repeat(25)));
    out.push_str(&format!(
        "  {:<12} {:>12}\n",
        "Total",
        response.total_amount.to_string()
    ));
    out.push_str(&format!(
        "  {:<12} {:>12}  (commission rate {})\n",
        "Profit",
        response.profits.to_string(),
        profile.commission_rate
    ));
    push_page_info(&mut out, &response.page);
    out.push('\n');
    out.push_str(&format_records(&response.page.results));
    out
}

fn push_page_info<T>(out: &mut String, page: &Page<T>) {
    if let (Some(total), Some(number), Some(limit)) = (page.total, page.page, page.limit) {
        let pages = total.div_ceil(limit).max(1);
        out.push_str(&format!(
            "  Page {number} of {pages} ({limit} per page, {total} total)\n"
        ));
    }
}

fn format_grid(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(len),
                None => widths.push(len),
            }
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render_line(headers.iter().copied(), &widths));
    let total_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    lines.push(format!("  {}", "-".repeat(total_width)));
    for row in rows {
        lines.push(render_line(row.iter().map(String::as_str), &widths));
    }
    lines.join("\n")
}

fn render_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    format!("  {}", padded.join("  ").trim_end())
}
