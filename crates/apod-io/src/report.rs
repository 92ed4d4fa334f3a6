//! Printable HTML report of a batch.

use apod_core::batch::BatchReport;
use apod_core::format::{format_currency, format_percent};
use rust_decimal::Decimal;

const STYLE: &str = "\
body{font-family:Helvetica,Arial,sans-serif;margin:2em;color:#222}\
h1{font-size:1.4em}\
table{border-collapse:collapse;width:100%;margin-bottom:1.5em}\
th,td{border:1px solid #999;padding:4px 8px;font-size:0.9em}\
th{background:#eee;text-align:left}\
td.num{text-align:right}\
td.neg{color:#b00}";

/// Renders the summary table, portfolio totals, and per-row errors as a
/// self-contained HTML page.
///
/// Values are formatted for reading: whole-dollar currency and 2-decimal
/// percentages. All text from the input is escaped.
#[must_use]
pub fn render_html_report(title: &str, report: &BatchReport) -> String {
    let mut html = String::with_capacity(4096);
    let title = escape_html(title);

    html.push_str(&format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <h1>{title}</h1>\n"
    ));

    write_results_table(&mut html, report);
    write_summary(&mut html, report);
    write_errors(&mut html, report);

    html.push_str("</body>\n</html>\n");
    html
}

fn write_results_table(html: &mut String, report: &BatchReport) {
    html.push_str(
        "<table>\n<thead><tr><th>Address</th><th>Price</th><th>Rent</th><th>NOI</th>\
         <th>Cap Rate</th><th>Cash Flow</th><th>CoC Return</th></tr></thead>\n<tbody>\n",
    );

    for evaluated in report.successes() {
        let row = &evaluated.row;
        let flow_class = if row.cash_flow.is_sign_negative() && !row.cash_flow.is_zero() {
            "num neg"
        } else {
            "num"
        };
        html.push_str(&format!(
            "<tr><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td>\
             <td class=\"num\">{}</td><td class=\"num\">{}</td>\
             <td class=\"{flow_class}\">{}</td><td class=\"num\">{}</td></tr>\n",
            escape_html(&row.address),
            format_currency(row.price),
            format_currency(row.rent),
            format_currency(row.noi),
            format_percent(row.cap_rate),
            format_currency(row.cash_flow),
            format_percent(row.coc_return),
        ));
    }

    html.push_str("</tbody>\n</table>\n");
}

fn write_summary(html: &mut String, report: &BatchReport) {
    let summary = report.summary();
    let money = |v: Option<Decimal>| v.map_or_else(|| "n/a".to_string(), format_currency);
    let pct = |v: Option<Decimal>| v.map_or_else(|| "n/a".to_string(), format_percent);

    html.push_str(&format!(
        "<h2>Portfolio</h2>\n<table>\n\
         <tr><th>Properties</th><td class=\"num\">{}</td></tr>\n\
         <tr><th>Failed rows</th><td class=\"num\">{}</td></tr>\n\
         <tr><th>Total price</th><td class=\"num\">{}</td></tr>\n\
         <tr><th>Total NOI</th><td class=\"num\">{}</td></tr>\n\
         <tr><th>Total cash flow</th><td class=\"num\">{}</td></tr>\n\
         <tr><th>Average cap rate</th><td class=\"num\">{}</td></tr>\n\
         <tr><th>Portfolio cap rate</th><td class=\"num\">{}</td></tr>\n\
         </table>\n",
        summary.properties,
        summary.failed,
        money(summary.total_price),
        money(summary.total_noi),
        money(summary.total_cash_flow),
        pct(summary.average_cap_rate_pct),
        pct(summary.portfolio_cap_rate_pct),
    ));
}

fn write_errors(html: &mut String, report: &BatchReport) {
    if report.failure_count() == 0 {
        return;
    }

    html.push_str(
        "<h2>Rows not evaluated</h2>\n<table>\n\
         <thead><tr><th>Row</th><th>Address</th><th>Error</th></tr></thead>\n<tbody>\n",
    );
    for failure in report.failures() {
        let message = failure
            .error()
            .map(ToString::to_string)
            .unwrap_or_default();
        html.push_str(&format!(
            "<tr><td class=\"num\">{}</td><td>{}</td><td>{}</td></tr>\n",
            failure.row_index + 1,
            escape_html(&failure.address),
            escape_html(&message),
        ));
    }
    html.push_str("</tbody>\n</table>\n");
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
