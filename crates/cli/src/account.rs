//! Sign-in and supplier-portal commands.

use anyhow::{anyhow, Context as _, Result};

use tradedesk_auth::PasswordChange;
use tradedesk_client::{Attachment, AuthService, PortalService};
use tradedesk_core::{Draft, Tabular};
use tradedesk_export::ReportTable;
use tradedesk_portal::{AsnFile, DashboardSummary, ProfileDraft};
use tradedesk_views::{shells, ErrorBoundary, TabShell, TabView};

use crate::commands::{LoginArgs, PasswordArgs, PortalCommand, ProfileCommand, ShellName, WriteArgs};
use crate::output::{print_json, print_table, render_text};
use crate::Context;

const LOW_STOCK_THRESHOLD: f64 = 10.0;

pub async fn login(ctx: &Context, args: &LoginArgs) -> Result<()> {
    let auth = AuthService::new(ctx.client.clone());
    auth.login(&args.email, &args.password)
        .await
        .map_err(|e| anyhow!(e.user_message("Login failed.")))?;
    println!("Signed in as {}", args.email.trim());
    Ok(())
}

pub fn logout(ctx: &Context) -> Result<()> {
    AuthService::new(ctx.client.clone()).logout()?;
    println!("Signed out.");
    Ok(())
}

pub async fn whoami(ctx: &Context) -> Result<()> {
    let signed_in = ctx.client.session().is_authenticated();
    let role = AuthService::new(ctx.client.clone()).role().await;
    if ctx.json {
        return print_json(&serde_json::json!({ "signedIn": signed_in, "role": role }));
    }
    if signed_in {
        println!("Signed in; role {role}");
    } else {
        println!("Not signed in; role {role}");
    }
    Ok(())
}

pub async fn run(ctx: &Context, command: &PortalCommand) -> Result<()> {
    match command {
        PortalCommand::Tabs { shell, select } => tabs(ctx, *shell, select.as_deref()).await,
        PortalCommand::Dashboard => dashboard(ctx).await,
        PortalCommand::UploadAsn { path } => {
            let file = Attachment::from_path(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let portal = PortalService::new(ctx.client.clone());
            let stored = portal
                .upload_asn(file)
                .await
                .map_err(|e| anyhow!(e.user_message("Failed to upload ASN document.")))?;
            match stored {
                Some(entry) => println!("Uploaded {}", entry.filename),
                None => println!("ASN document uploaded"),
            }
            Ok(())
        }
        PortalCommand::AsnFiles => asn_files(ctx).await,
        PortalCommand::Password(args) => password(ctx, args).await,
        PortalCommand::Profile(ProfileCommand::Show) => {
            let profile = AuthService::new(ctx.client.clone())
                .profile()
                .await
                .map_err(|e| anyhow!(e.user_message("Failed to load profile.")))?;
            if ctx.json {
                return print_json(&profile);
            }
            print_table(&ReportTable::from_records("Profile", [&profile]));
            Ok(())
        }
        PortalCommand::Profile(ProfileCommand::Update(fields)) => update_profile(ctx, fields).await,
    }
}

async fn tabs(ctx: &Context, name: ShellName, select: Option<&str>) -> Result<()> {
    let role = AuthService::new(ctx.client.clone()).role().await;
    let mut shell: TabShell = match name {
        ShellName::Supplier => shells::supplier_portal(role),
        ShellName::Orders => shells::orders(),
        ShellName::Shipments => shells::shipments(),
        ShellName::Invoices => shells::invoices_payments(),
        ShellName::Erp => shells::erp_dashboard(),
    };
    shell.set_role(role);
    if let Some(tab) = select {
        shell.select(tab);
    }

    println!("{} ({role})", shell.title());
    let active = shell.active().map(str::to_string);
    for tab in shell.visible() {
        let marker = if active.as_deref() == Some(tab.name) { "*" } else { " " };
        println!(" {marker} {}", tab.name);
    }
    match shell.view() {
        TabView::Dashboard => println!("Showing dashboard"),
        TabView::Tab(name) => println!("Showing {name}"),
        view @ TabView::NotFound => println!("{}", view.message().unwrap_or_default()),
    }
    Ok(())
}

fn dashboard_text(summary: &DashboardSummary) -> String {
    let mut orders = ReportTable::new("Orders by Status", ["Status", "Orders"])
        .with_footer(vec![format!("Total: {}", summary.total_orders())]);
    for status in &summary.orders_by_status {
        orders.push_row(vec![status.name.clone(), status.value.to_string()]);
    }
    let mut shipments = ReportTable::new("Monthly Shipments", ["Month", "Shipments"])
        .with_footer(vec![format!("Total: {}", summary.total_shipments())]);
    for month in &summary.monthly_shipments {
        shipments.push_row(vec![month.month.clone(), month.shipments.to_string()]);
    }
    let mut stock = ReportTable::new("Low Stock", ["Product", "Qty"]);
    for level in summary.low_stock(LOW_STOCK_THRESHOLD) {
        stock.push_row(vec![level.product.clone(), level.qty.to_string()]);
    }
    [orders, shipments, stock]
        .iter()
        .map(render_text)
        .collect::<Vec<_>>()
        .join("\n")
}

async fn dashboard(ctx: &Context) -> Result<()> {
    let portal = PortalService::new(ctx.client.clone());
    let fetched = portal.dashboard_summary().await;
    if ctx.json {
        let summary = fetched.map_err(|e| anyhow!(e.user_message("Failed to load dashboard.")))?;
        return print_json(&summary);
    }
    match ErrorBoundary::default().render(|| fetched.map(|summary| dashboard_text(&summary))) {
        Ok(text) => print!("{text}"),
        Err(fallback) => println!("{fallback}"),
    }
    Ok(())
}

async fn asn_files(ctx: &Context) -> Result<()> {
    let portal = PortalService::new(ctx.client.clone());
    let files = portal
        .asn_files()
        .await
        .map_err(|e| anyhow!(e.user_message("Failed to fetch ASN documents.")))?;
    if ctx.json {
        return print_json(&files);
    }
    let mut headers = AsnFile::headers();
    headers.push("Link");
    let mut table = ReportTable::new("ASN Documents", headers);
    for file in &files {
        let mut row = file.cells();
        row.push(portal.asn_file_url(file)?.to_string());
        table.push_row(row);
    }
    print_table(&table);
    Ok(())
}

async fn password(ctx: &Context, args: &PasswordArgs) -> Result<()> {
    let change = PasswordChange {
        old_password: args.old_password.clone(),
        new_password: args.new_password.clone(),
        confirm_password: args.confirm_password.clone(),
    };
    AuthService::new(ctx.client.clone())
        .change_password(&change)
        .await
        .map_err(|e| anyhow!(e.user_message("Failed to change password.")))?;
    println!("Password updated successfully");
    Ok(())
}

async fn update_profile(ctx: &Context, fields: &WriteArgs) -> Result<()> {
    let auth = AuthService::new(ctx.client.clone());
    let current = auth
        .profile()
        .await
        .map_err(|e| anyhow!(e.user_message("Failed to load profile.")))?;
    let mut draft = ProfileDraft::from_record(&current);
    draft.apply(fields.fields.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;
    let profile = draft.to_record()?;
    auth.update_profile(&profile)
        .await
        .map_err(|e| anyhow!(e.user_message("Failed to update profile.")))?;
    println!("Profile updated successfully");
    Ok(())
}
