//! Standalone HTML print documents.

use std::fmt::Write as _;

use tradedesk_core::value::format_number;
use tradedesk_invoicing::Invoice;

use crate::report::ReportTable;

/// Escape text for HTML element content and attribute values.
pub fn escape(text: &str) -> String {
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

/// Inline styling of a print document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintTemplate {
    pub font_family: String,
    pub accent: String,
    /// Add a script that opens the print dialog on load.
    pub auto_print: bool,
}

impl Default for PrintTemplate {
    fn default() -> Self {
        Self {
            font_family: "'Segoe UI', Arial, sans-serif".to_string(),
            accent: "#1d4ed8".to_string(),
            auto_print: true,
        }
    }
}

impl PrintTemplate {
    fn head(&self, title: &str) -> String {
        format!(
            "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{title}</title><style>\n\
             body {{ font-family: {font}; padding: 20px; color: #333; }}\n\
             h1 {{ color: {accent}; border-bottom: 2px solid #eee; padding-bottom: 10px; }}\n\
             .section {{ margin-bottom: 20px; }}\n\
             table {{ width: 100%; border-collapse: collapse; }}\n\
             th, td {{ padding: 8px; border: 1px solid #ddd; text-align: left; }}\n\
             th {{ background-color: #f0f8ff; }}\n\
             .total {{ font-size: 1.2rem; font-weight: bold; text-align: right; color: {accent}; }}\n\
             </style></head><body>\n",
            title = escape(title),
            font = self.font_family,
            accent = self.accent,
        )
    }

    fn tail(&self) -> &'static str {
        if self.auto_print {
            "<script>window.onload = function () { window.print(); };</script>\n</body></html>\n"
        } else {
            "</body></html>\n"
        }
    }
}

/// Print document for any report table.
pub fn render_print(table: &ReportTable, template: &PrintTemplate) -> String {
    let mut html = template.head(&table.title);
    let _ = writeln!(html, "<h1>{}</h1>", escape(&table.title));
    if !table.lines.is_empty() {
        html.push_str("<div class=\"section\">");
        let lines: Vec<String> = table.lines.iter().map(|l| escape(l)).collect();
        html.push_str(&lines.join("<br/>"));
        html.push_str("</div>\n");
    }

    html.push_str("<div class=\"section\"><table>\n<thead><tr>");
    for header in &table.headers {
        let _ = write!(html, "<th>{}</th>", escape(header));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for row in &table.rows {
        html.push_str("<tr>");
        for cell in row {
            let _ = write!(html, "<td>{}</td>", escape(cell));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table></div>\n");

    for line in &table.footer {
        let _ = writeln!(html, "<div class=\"total\">{}</div>", escape(line));
    }
    html.push_str(template.tail());
    html
}

/// Printable single invoice: client, date, item lines and grand total.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDocument {
    pub invoice_number: String,
    pub client_name: String,
    pub date: String,
    /// `(name, quantity, price, line total)`
    pub lines: Vec<(String, f64, f64, f64)>,
    pub grand_total: f64,
}

impl InvoiceDocument {
    pub fn from_invoice(invoice: &Invoice) -> Self {
        Self {
            invoice_number: invoice.invoice_number.clone(),
            client_name: invoice.client_name.clone(),
            date: invoice.display_date().to_string(),
            lines: invoice
                .items
                .iter()
                .map(|i| (i.name.clone(), i.quantity, i.price, i.line_total()))
                .collect(),
            grand_total: invoice.grand_total(),
        }
    }

    pub fn render(&self, template: &PrintTemplate) -> String {
        let title = format!("Invoice {}", self.invoice_number);
        let mut html = template.head(&title);
        let _ = writeln!(html, "<h1>Invoice: {}</h1>", escape(&self.invoice_number));
        let _ = writeln!(
            html,
            "<div class=\"section\"><strong>Client:</strong> {}<br/><strong>Date:</strong> {}</div>",
            escape(&self.client_name),
            escape(&self.date)
        );
        html.push_str(
            "<div class=\"section\"><table>\n\
             <thead><tr><th>Item</th><th>Qty</th><th>Price</th><th>Total</th></tr></thead>\n<tbody>\n",
        );
        for (name, qty, price, total) in &self.lines {
            let _ = writeln!(
                html,
                "<tr><td>{}</td><td>{}</td><td>PKR {}</td><td>PKR {}</td></tr>",
                escape(name),
                format_number(*qty),
                format_number(*price),
                format_number(*total)
            );
        }
        html.push_str("</tbody>\n</table></div>\n");
        let _ = writeln!(
            html,
            "<div class=\"total\">Grand Total: PKR {}</div>",
            format_number(self.grand_total)
        );
        html.push_str(template.tail());
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_text_is_escaped() {
        let mut table = ReportTable::new("Clients <all>", ["Name"]);
        table.push_row(vec!["<script>alert(1)</script> & Co".into()]);
        let html = render_print(&table, &PrintTemplate::default());
        assert!(html.contains("<td>&lt;script&gt;alert(1)&lt;/script&gt; &amp; Co</td>"));
        assert!(html.contains("<h1>Clients &lt;all&gt;</h1>"));
        assert!(!html.contains("<script>alert"));
    }

    #[test]
    fn auto_print_is_optional() {
        let table = ReportTable::new("T", ["A"]);
        let quiet = PrintTemplate {
            auto_print: false,
            ..PrintTemplate::default()
        };
        assert!(render_print(&table, &PrintTemplate::default()).contains("window.print()"));
        assert!(!render_print(&table, &quiet).contains("window.print()"));
    }

    #[test]
    fn invoice_document_lists_lines_and_total() {
        let invoice: Invoice = serde_json::from_str(
            r#"{"invoiceNumber":"INV-7","clientName":"Ali Builders","createdAt":"2024-02-10T08:30:00Z",
                "items":[{"name":"Cement","quantity":2,"price":300},{"name":"Sand","quantity":"3","price":100}]}"#,
        )
        .unwrap();
        let doc = InvoiceDocument::from_invoice(&invoice);
        assert_eq!(doc.date, "2024-02-10");
        let html = doc.render(&PrintTemplate::default());
        assert!(html.contains("<td>Cement</td><td>2</td><td>PKR 300</td><td>PKR 600</td>"));
        assert!(html.contains("Grand Total: PKR 900"));
    }
}
