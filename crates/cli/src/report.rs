//! Ledger report and invoice printing.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context as _, Result};

use tradedesk_accounting::report_file_name;
use tradedesk_client::{endpoints, ReportService, ResourceService};
use tradedesk_core::{DateRange, Record};
use tradedesk_export::{pdf, InvoiceDocument, PrintTemplate, ReportTable};
use tradedesk_invoicing::Invoice;
use tradedesk_views::{LedgerController, LedgerView};

use crate::commands::{InvoiceCommand, ReportCommand, ReportShowArgs};
use crate::output::{print_json, print_table};
use crate::Context;

pub async fn run(ctx: &Context, command: &ReportCommand) -> Result<()> {
    match command {
        ReportCommand::Names { filter } => names(ctx, filter.as_deref()).await,
        ReportCommand::Show(args) => show(ctx, args).await,
    }
}

fn notice_or(controller: &LedgerController, e: impl Into<anyhow::Error>) -> anyhow::Error {
    match controller.view().notice() {
        Some(notice) if notice.is_error() => anyhow!(notice.message.clone()),
        _ => e.into(),
    }
}

async fn names(ctx: &Context, filter: Option<&str>) -> Result<()> {
    let mut controller = LedgerController::new(
        ReportService::new(ctx.client.clone()),
        LedgerView::new(ctx.page_size),
    );
    if let Err(e) = controller.load_names().await {
        return Err(notice_or(&controller, e));
    }
    let view = controller.view_mut();
    view.set_name_query(filter.unwrap_or(""));
    let matching = view.matching_names();
    if ctx.json {
        return print_json(&matching);
    }
    if matching.is_empty() {
        println!("No matching names.");
    }
    for name in matching {
        println!("{name}");
    }
    Ok(())
}

async fn show(ctx: &Context, args: &ReportShowArgs) -> Result<()> {
    let mut controller = LedgerController::new(
        ReportService::new(ctx.client.clone()),
        LedgerView::new(ctx.page_size),
    );
    let dates = DateRange::parse(
        args.from.as_deref().unwrap_or(""),
        args.to.as_deref().unwrap_or(""),
    )?;
    if let Err(e) = controller.select(&args.name).await {
        return Err(notice_or(&controller, e));
    }

    let view = controller.view_mut();
    view.set_type_filter(args.entry_type);
    view.set_date_range(dates);
    view.go_to_page(args.page);

    if ctx.json {
        let entries = view.entries();
        let summary = view.summary();
        print_json(&serde_json::json!({
            "name": args.name.trim(),
            "entries": entries,
            "totalPurchase": summary.total_purchase,
            "totalPayment": summary.total_payment,
            "balance": summary.balance,
        }))?;
    } else {
        let page = view.page();
        let mut lines = view.filter().describe();
        lines.push(format!(
            "Page {} of {}",
            page.number(),
            page.page_count(view.entries().len())
        ));
        let table = ReportTable::from_records(
            format!("Ledger Report - {}", args.name.trim()),
            view.page_rows(),
        )
        .with_lines(lines)
        .with_footer(view.summary().lines());
        print_table(&table);
    }

    if let Some(target) = &args.pdf {
        let Some(report) = controller.report() else {
            return Err(notice_or(&controller, anyhow!("no ledger selected")));
        };
        let path = target
            .clone()
            .unwrap_or_else(|| PathBuf::from(report_file_name(args.name.trim())));
        save_pdf(&report, &path)?;
        println!("Saved {}", path.display());
    }
    Ok(())
}

fn save_pdf(report: &ReportTable, path: &Path) -> Result<()> {
    let bytes = pdf::render(report)?;
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Find an invoice by id or invoice number.
fn find_invoice<'a>(invoices: &'a [Invoice], key: &str) -> Option<&'a Invoice> {
    let key = key.trim();
    invoices.iter().find(|invoice| {
        invoice.id().is_some_and(|id| id.as_str() == key) || invoice.invoice_number == key
    })
}

pub async fn invoice(ctx: &Context, command: &InvoiceCommand) -> Result<()> {
    let InvoiceCommand::Print {
        invoice,
        output,
        no_auto_print,
    } = command;

    let service: ResourceService<Invoice> = ResourceService::new(ctx.client.clone(), endpoints::INVOICES);
    let invoices = service
        .list(&[])
        .await
        .map_err(|e| anyhow!(e.user_message("Failed to fetch invoices.")))?;
    let Some(found) = find_invoice(&invoices, invoice) else {
        bail!("No invoice matches {}", invoice.trim());
    };

    let template = PrintTemplate {
        auto_print: !no_auto_print,
        ..PrintTemplate::default()
    };
    let html = InvoiceDocument::from_invoice(found).render(&template);
    let path = output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("invoice_{}.html", found.invoice_number)));
    fs::write(&path, html).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!("Printed invoice {}", found.invoice_number);
    println!("Saved {}", path.display());
    Ok(())
}
