//! `tradedesk <module> list|create|update|delete|export`.

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, bail, Context as _, Result};

use tradedesk_client::{endpoints, ApiError, Attachment, Endpoint, PortalService, ResourceService};
use tradedesk_core::{DateRange, Draft, Record, RecordId, Tabular};
use tradedesk_export::ReportTable;
use tradedesk_invoicing::{Invoice, PaymentEntryDraft};
use tradedesk_parties::{ClientDraft, VendorDraft};
use tradedesk_portal::{
    AgreementDraft, AsbnDraft, AsnDraft, ConsignedInventoryDraft, OrderDraft, Receipt, ReturnDraft,
    ScheduleDraft, ShipmentDraft, SupplierInvoiceDraft, SupplierPaymentDraft,
};
use tradedesk_products::{ProductDraft, StockInDraft, StockOutDraft, StockQuery};
use tradedesk_purchasing::PurchaseOrderDraft;
use tradedesk_views::{ResourceTable, SortDirection, SortSpec, TableController};

use crate::commands::{ExportArgs, ListArgs, Module, ModuleAction, WriteArgs};
use crate::output::{print_json, print_table, write_export};
use crate::Context;

/// How one module is reached and titled.
#[derive(Debug, Clone, Copy)]
pub struct Collection {
    pub endpoint: Endpoint,
    pub title: &'static str,
    /// Search and dates go to the server instead of the local filter.
    pub server_filter: bool,
}

impl Collection {
    const fn new(endpoint: Endpoint, title: &'static str) -> Self {
        Self {
            endpoint,
            title,
            server_filter: false,
        }
    }

    const fn server_filtered(mut self) -> Self {
        self.server_filter = true;
        self
    }
}

impl Module {
    pub fn collection(&self) -> Collection {
        match self {
            Module::Clients => Collection::new(endpoints::CLIENTS, "Clients"),
            Module::Vendors => Collection::new(endpoints::VENDORS, "Vendors"),
            Module::Products => Collection::new(endpoints::PRODUCTS, "Products"),
            Module::StockIn => Collection::new(endpoints::STOCK_IN, "Stock In").server_filtered(),
            Module::StockOut => Collection::new(endpoints::STOCK_OUT, "Stock Out").server_filtered(),
            Module::PurchaseOrders => Collection::new(endpoints::PURCHASE_ORDERS, "Purchase Orders"),
            Module::Payments => Collection::new(endpoints::PAYMENT_ENTRIES, "Payments"),
            Module::Invoices => Collection::new(endpoints::INVOICES, "Invoices"),
            Module::Orders => Collection::new(endpoints::ORDERS, "Orders"),
            Module::Schedules => Collection::new(endpoints::SCHEDULES, "Schedules"),
            Module::Shipments => Collection::new(endpoints::SHIPMENTS, "Shipments"),
            Module::Agreements => Collection::new(endpoints::AGREEMENTS, "Agreements"),
            Module::Returns => Collection::new(endpoints::RETURNS, "Returns"),
            Module::Asns => Collection::new(endpoints::ASNS, "ASNs"),
            Module::Asbns => Collection::new(endpoints::ASBNS, "ASBNs"),
            Module::ConsignedInventory => {
                Collection::new(endpoints::CONSIGNED_INVENTORY, "Consigned Inventory")
            }
            Module::Receipts => Collection::new(endpoints::RECEIPTS, "Receipts"),
            Module::SupplierInvoices => {
                Collection::new(endpoints::SUPPLIER_INVOICES_NO_PO, "Supplier Invoices")
            }
            Module::SupplierPayments => Collection::new(endpoints::SUPPLIER_PAYMENTS, "Supplier Payments"),
        }
    }
}

pub async fn run(ctx: &Context, module: Module, action: &ModuleAction) -> Result<()> {
    let collection = module.collection();
    match module {
        Module::Clients => crud::<ClientDraft>(ctx, collection, action).await,
        Module::Vendors => crud::<VendorDraft>(ctx, collection, action).await,
        Module::Products => crud::<ProductDraft>(ctx, collection, action).await,
        Module::StockIn => crud::<StockInDraft>(ctx, collection, action).await,
        Module::StockOut => crud::<StockOutDraft>(ctx, collection, action).await,
        Module::PurchaseOrders => crud::<PurchaseOrderDraft>(ctx, collection, action).await,
        Module::Payments => crud::<PaymentEntryDraft>(ctx, collection, action).await,
        Module::Invoices => read_only::<Invoice>(ctx, collection, action).await,
        Module::Orders => crud::<OrderDraft>(ctx, collection, action).await,
        Module::Schedules => crud::<ScheduleDraft>(ctx, collection, action).await,
        Module::Shipments => crud::<ShipmentDraft>(ctx, collection, action).await,
        Module::Agreements => agreements(ctx, collection, action).await,
        Module::Returns => crud::<ReturnDraft>(ctx, collection, action).await,
        Module::Asns => crud::<AsnDraft>(ctx, collection, action).await,
        Module::Asbns => crud::<AsbnDraft>(ctx, collection, action).await,
        Module::ConsignedInventory => crud::<ConsignedInventoryDraft>(ctx, collection, action).await,
        Module::Receipts => read_only::<Receipt>(ctx, collection, action).await,
        Module::SupplierInvoices => crud::<SupplierInvoiceDraft>(ctx, collection, action).await,
        Module::SupplierPayments => crud::<SupplierPaymentDraft>(ctx, collection, action).await,
    }
}

/// Ask on the terminal; anything but `y`/`yes` declines.
pub fn confirm_on_stdin(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    let _ = io::stdout().flush();
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn controller<R: Record>(ctx: &Context, collection: Collection) -> TableController<R> {
    TableController::new(
        ResourceService::new(ctx.client.clone(), collection.endpoint),
        ResourceTable::new(ctx.page_size),
    )
}

/// The table's notice for a failed call, falling back to the error itself.
fn failure<R: Record>(controller: &TableController<R>, e: ApiError) -> anyhow::Error {
    match controller.table().notice() {
        Some(notice) if notice.is_error() => anyhow!(notice.message.clone()),
        _ => e.into(),
    }
}

fn report_notice<R: Record>(controller: &TableController<R>) {
    if let Some(notice) = controller.table().notice() {
        println!("{}", notice.message);
    }
}

fn date_range(args: &ListArgs) -> Result<DateRange> {
    let range = DateRange::parse(
        args.from.as_deref().unwrap_or(""),
        args.to.as_deref().unwrap_or(""),
    )?;
    Ok(range)
}

/// Refresh, then apply search, status, dates and sort to the table.
async fn load<R: Record>(
    controller: &mut TableController<R>,
    collection: Collection,
    args: &ListArgs,
) -> Result<()> {
    let dates = date_range(args)?;
    if collection.server_filter {
        let query = StockQuery {
            search: args.search.clone().unwrap_or_default(),
            date_from: dates.from,
            date_to: dates.to,
        };
        controller.set_query(query.to_params());
    }
    if let Err(e) = controller.refresh().await {
        return Err(failure(controller, e));
    }

    let table = controller.table_mut();
    if !collection.server_filter {
        if let Some(search) = &args.search {
            table.set_search(search);
        }
        table.set_date_range(dates);
    }
    if let Some(status) = &args.status {
        table.set_status(status);
    }
    if let Some(field) = &args.sort {
        let direction = if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        table.set_sort(Some(SortSpec::new(field.clone(), direction)));
    }
    Ok(())
}

async fn list<R>(ctx: &Context, collection: Collection, args: &ListArgs) -> Result<()>
where
    R: Record + Tabular,
{
    let mut controller = controller::<R>(ctx, collection);
    load(&mut controller, collection, args).await?;
    let table = controller.table_mut();
    table.go_to_page(args.page);

    let rows = table.page_rows();
    if ctx.json {
        return print_json(&rows);
    }
    let page = table.page();
    let summary = format!(
        "Page {} of {} ({} matching)",
        page.number(),
        table.page_count(),
        table.visible().len()
    );
    print_table(&ReportTable::from_records(collection.title, rows).with_lines(vec![summary]));
    Ok(())
}

async fn export<R>(ctx: &Context, collection: Collection, args: &ExportArgs) -> Result<()>
where
    R: Record + Tabular,
{
    let mut controller = controller::<R>(ctx, collection);
    load(&mut controller, collection, &args.list).await?;
    let table = controller.table_mut();
    for raw in &args.ids {
        let id: RecordId = raw.parse()?;
        if table.find(&id).is_none() {
            bail!("No {} with id {}", R::KIND, id);
        }
        table.toggle_selected(&id);
    }

    let rows = table.export_rows(args.scope);
    if rows.is_empty() {
        bail!("Nothing to export.");
    }
    let report = ReportTable::from_records(format!("{} Report", collection.title), rows);
    let path = write_export(&report, args.format, args.output.as_deref())?;
    if ctx.json {
        print_json(&serde_json::json!({ "path": path, "rows": report.rows.len() }))
    } else {
        println!("Exported {} rows to {}", report.rows.len(), path.display());
        Ok(())
    }
}

fn fill<D: Draft>(draft: &mut D, fields: &WriteArgs) -> Result<()> {
    draft.apply(fields.fields.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;
    Ok(())
}

async fn delete<R: Record>(ctx: &Context, collection: Collection, id: &str, yes: bool) -> Result<()> {
    let id: RecordId = id.parse()?;
    let mut controller = controller::<R>(ctx, collection);
    let accept = |_: &str| true;
    let outcome = if yes {
        controller.delete(&id, &accept).await
    } else {
        controller.delete(&id, &confirm_on_stdin).await
    };
    match outcome {
        Ok(true) => {
            report_notice(&controller);
            Ok(())
        }
        Ok(false) => {
            println!("Cancelled.");
            Ok(())
        }
        Err(e) => Err(failure(&controller, e)),
    }
}

async fn crud<D>(ctx: &Context, collection: Collection, action: &ModuleAction) -> Result<()>
where
    D: Draft,
    D::Record: Tabular,
{
    match action {
        ModuleAction::List(args) => list::<D::Record>(ctx, collection, args).await,
        ModuleAction::Export(args) => export::<D::Record>(ctx, collection, args).await,
        ModuleAction::Create(fields) => {
            if fields.file.is_some() {
                bail!("--file is only accepted by agreements");
            }
            let mut controller = controller::<D::Record>(ctx, collection);
            let mut draft = D::default();
            fill(&mut draft, fields)?;
            if let Err(e) = controller.submit(&mut draft).await {
                return Err(failure(&controller, e));
            }
            report_notice(&controller);
            Ok(())
        }
        ModuleAction::Update { id, fields } => {
            if fields.file.is_some() {
                bail!("--file is only accepted by agreements");
            }
            let id: RecordId = id.parse()?;
            let mut controller = controller::<D::Record>(ctx, collection);
            if let Err(e) = controller.refresh().await {
                return Err(failure(&controller, e));
            }
            let mut draft: D = controller
                .edit(&id)
                .ok_or_else(|| anyhow!("No {} with id {}", D::Record::KIND, id))?;
            fill(&mut draft, fields)?;
            if let Err(e) = controller.submit(&mut draft).await {
                return Err(failure(&controller, e));
            }
            report_notice(&controller);
            Ok(())
        }
        ModuleAction::Delete { id, yes } => delete::<D::Record>(ctx, collection, id, *yes).await,
    }
}

async fn read_only<R>(ctx: &Context, collection: Collection, action: &ModuleAction) -> Result<()>
where
    R: Record + Tabular,
{
    match action {
        ModuleAction::List(args) => list::<R>(ctx, collection, args).await,
        ModuleAction::Export(args) => export::<R>(ctx, collection, args).await,
        _ => bail!("{} are read-only", collection.title),
    }
}

/// Agreements carry an optional contract file, so writes go as multipart.
async fn agreements(ctx: &Context, collection: Collection, action: &ModuleAction) -> Result<()> {
    let (id, fields) = match action {
        ModuleAction::Create(fields) => (None, fields),
        ModuleAction::Update { id, fields } => (Some(id.parse::<RecordId>()?), fields),
        _ => return crud::<AgreementDraft>(ctx, collection, action).await,
    };

    let mut draft = match &id {
        Some(id) => {
            let mut controller = controller::<<AgreementDraft as Draft>::Record>(ctx, collection);
            if let Err(e) = controller.refresh().await {
                return Err(failure(&controller, e));
            }
            controller
                .edit::<AgreementDraft>(id)
                .ok_or_else(|| anyhow!("No agreement with id {}", id))?
        }
        None => AgreementDraft::default(),
    };
    fill(&mut draft, fields)?;
    let agreement = draft.to_record()?;
    let file = match &fields.file {
        Some(path) => Some(
            Attachment::from_path(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
        ),
        None => None,
    };

    let portal = PortalService::new(ctx.client.clone());
    let (verb, result) = match &id {
        Some(id) => ("update", portal.update_agreement(id, &agreement, file).await),
        None => ("add", portal.create_agreement(&agreement, file).await),
    };
    match result {
        Ok(_) => {
            let done = if id.is_some() { "updated" } else { "added" };
            println!("Agreement {done} successfully");
            Ok(())
        }
        Err(e) => Err(anyhow!(e.user_message(&format!("Failed to {verb} agreement.")))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_modules_filter_on_the_server() {
        assert!(Module::StockIn.collection().server_filter);
        assert!(Module::StockOut.collection().server_filter);
        assert!(!Module::Clients.collection().server_filter);
    }

    #[test]
    fn supplier_invoices_post_without_po() {
        let collection = Module::SupplierInvoices.collection();
        assert_eq!(collection.endpoint.path, "invoices/no-po");
        assert_eq!(collection.endpoint.collection_path(), "invoices");
    }

    #[test]
    fn list_dates_must_parse() {
        let args = ListArgs {
            from: Some("2024-13-01".to_string()),
            ..ListArgs::default()
        };
        assert!(date_range(&args).is_err());
        let args = ListArgs {
            from: Some("2024-01-01".to_string()),
            ..ListArgs::default()
        };
        assert!(date_range(&args).unwrap().from.is_some());
    }
}
