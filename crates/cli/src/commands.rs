//! Command-line surface.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use tradedesk_accounting::TypeFilter;
use tradedesk_views::ExportScope;

#[derive(Parser, Debug)]
#[command(
    name = "tradedesk",
    about = "Operator CLI for the TradeDesk ERP and supplier portal",
    version
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON where available"
    )]
    pub json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in to the supplier portal and store the token.
    Login(LoginArgs),
    /// Forget the stored token.
    Logout,
    /// Show the signed-in identity and role.
    Whoami,

    #[command(subcommand)]
    Clients(ModuleAction),
    #[command(subcommand)]
    Vendors(ModuleAction),
    #[command(subcommand)]
    Products(ModuleAction),
    #[command(subcommand)]
    StockIn(ModuleAction),
    #[command(subcommand)]
    StockOut(ModuleAction),
    #[command(subcommand)]
    PurchaseOrders(ModuleAction),
    /// ERP payment entries.
    #[command(subcommand)]
    Payments(ModuleAction),
    /// ERP invoices (read-only).
    #[command(subcommand)]
    Invoices(ModuleAction),
    #[command(subcommand)]
    Orders(ModuleAction),
    #[command(subcommand)]
    Schedules(ModuleAction),
    #[command(subcommand)]
    Shipments(ModuleAction),
    #[command(subcommand)]
    Agreements(ModuleAction),
    #[command(subcommand)]
    Returns(ModuleAction),
    #[command(subcommand)]
    Asns(ModuleAction),
    #[command(subcommand)]
    Asbns(ModuleAction),
    #[command(subcommand)]
    ConsignedInventory(ModuleAction),
    /// Goods receipts (read-only).
    #[command(subcommand)]
    Receipts(ModuleAction),
    #[command(subcommand)]
    SupplierInvoices(ModuleAction),
    #[command(subcommand)]
    SupplierPayments(ModuleAction),

    /// Client/vendor ledger report.
    #[command(subcommand)]
    Report(ReportCommand),
    /// Supplier-portal account and documents.
    #[command(subcommand)]
    Portal(PortalCommand),
    #[command(subcommand)]
    Invoice(InvoiceCommand),
}

/// Record collections reachable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Module {
    Clients,
    Vendors,
    Products,
    StockIn,
    StockOut,
    PurchaseOrders,
    Payments,
    Invoices,
    Orders,
    Schedules,
    Shipments,
    Agreements,
    Returns,
    Asns,
    Asbns,
    ConsignedInventory,
    Receipts,
    SupplierInvoices,
    SupplierPayments,
}

impl Command {
    /// The module and action of a record command.
    pub fn module_action(&self) -> Option<(Module, &ModuleAction)> {
        let pair = match self {
            Command::Clients(a) => (Module::Clients, a),
            Command::Vendors(a) => (Module::Vendors, a),
            Command::Products(a) => (Module::Products, a),
            Command::StockIn(a) => (Module::StockIn, a),
            Command::StockOut(a) => (Module::StockOut, a),
            Command::PurchaseOrders(a) => (Module::PurchaseOrders, a),
            Command::Payments(a) => (Module::Payments, a),
            Command::Invoices(a) => (Module::Invoices, a),
            Command::Orders(a) => (Module::Orders, a),
            Command::Schedules(a) => (Module::Schedules, a),
            Command::Shipments(a) => (Module::Shipments, a),
            Command::Agreements(a) => (Module::Agreements, a),
            Command::Returns(a) => (Module::Returns, a),
            Command::Asns(a) => (Module::Asns, a),
            Command::Asbns(a) => (Module::Asbns, a),
            Command::ConsignedInventory(a) => (Module::ConsignedInventory, a),
            Command::Receipts(a) => (Module::Receipts, a),
            Command::SupplierInvoices(a) => (Module::SupplierInvoices, a),
            Command::SupplierPayments(a) => (Module::SupplierPayments, a),
            _ => return None,
        };
        Some(pair)
    }
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[arg(long, help = "Portal account email")]
    pub email: String,
    #[arg(long, env = "TRADEDESK_PASSWORD", hide_env_values = true, help = "Portal account password")]
    pub password: String,
}

#[derive(Subcommand, Debug)]
pub enum ModuleAction {
    /// Print one page of records.
    List(ListArgs),
    /// Create a record from `--set field=value` pairs.
    Create(WriteArgs),
    /// Edit a record; unset fields keep their current values.
    Update {
        id: String,
        #[command(flatten)]
        fields: WriteArgs,
    },
    Delete {
        id: String,
        #[arg(long, short, action = ArgAction::SetTrue, help = "Skip the confirmation prompt")]
        yes: bool,
    },
    /// Write records to a CSV, PDF or printable HTML file.
    Export(ExportArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    #[arg(long, help = "Case-insensitive text search")]
    pub search: Option<String>,
    #[arg(long, help = "Status filter (\"all\" for none)")]
    pub status: Option<String>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub from: Option<String>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub to: Option<String>,
    #[arg(long, value_name = "FIELD", help = "Sort by a field's wire name")]
    pub sort: Option<String>,
    #[arg(long, action = ArgAction::SetTrue, requires = "sort")]
    pub desc: bool,
    #[arg(long, default_value_t = 1, value_parser = parse_positive_usize)]
    pub page: usize,
}

#[derive(Args, Debug, Clone, Default)]
pub struct WriteArgs {
    #[arg(
        long = "set",
        value_name = "FIELD=VALUE",
        value_parser = parse_key_value,
        help = "Form field by wire name; repeatable"
    )]
    pub fields: Vec<(String, String)>,
    #[arg(long, help = "Contract document (agreements only)")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Csv,
    Pdf,
    Html,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Html => "html",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub list: ListArgs,
    #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
    pub format: ExportFormat,
    #[arg(long, short, help = "Output file (defaults to the report title)")]
    pub output: Option<PathBuf>,
    #[arg(long, default_value = "filtered", help = "selected, filtered or all")]
    pub scope: ExportScope,
    #[arg(long = "select", value_name = "ID", help = "Record id to select; repeatable")]
    pub ids: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum ReportCommand {
    /// List client and vendor names that have a ledger.
    Names {
        #[arg(long)]
        filter: Option<String>,
    },
    /// Print one party's ledger with totals.
    Show(ReportShowArgs),
}

#[derive(Args, Debug)]
pub struct ReportShowArgs {
    pub name: String,
    #[arg(long = "type", default_value = "All", help = "All, Purchase or Payment")]
    pub entry_type: TypeFilter,
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub from: Option<String>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub to: Option<String>,
    #[arg(long, default_value_t = 1, value_parser = parse_positive_usize)]
    pub page: usize,
    #[arg(
        long,
        value_name = "PATH",
        num_args = 0..=1,
        help = "Also save the report as PDF (default name when PATH is omitted)"
    )]
    pub pdf: Option<Option<PathBuf>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ShellName {
    #[default]
    Supplier,
    Orders,
    Shipments,
    Invoices,
    Erp,
}

#[derive(Subcommand, Debug)]
pub enum PortalCommand {
    /// Show the tabs of a shell for the current role.
    Tabs {
        #[arg(long, value_enum, default_value_t = ShellName::Supplier)]
        shell: ShellName,
        #[arg(long, help = "Tab to open")]
        select: Option<String>,
    },
    /// Orders, shipments and inventory overview.
    Dashboard,
    /// Upload an ASN document.
    UploadAsn { path: PathBuf },
    /// List uploaded ASN documents with their links.
    AsnFiles,
    /// Change the account password.
    Password(PasswordArgs),
    #[command(subcommand)]
    Profile(ProfileCommand),
}

#[derive(Args, Debug)]
pub struct PasswordArgs {
    #[arg(long = "old", env = "TRADEDESK_OLD_PASSWORD", hide_env_values = true)]
    pub old_password: String,
    #[arg(long = "new", env = "TRADEDESK_NEW_PASSWORD", hide_env_values = true)]
    pub new_password: String,
    #[arg(long = "confirm", env = "TRADEDESK_CONFIRM_PASSWORD", hide_env_values = true)]
    pub confirm_password: String,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    Show,
    /// Edit profile fields with `--set field=value`.
    Update(WriteArgs),
}

#[derive(Subcommand, Debug)]
pub enum InvoiceCommand {
    /// Write a printable invoice page.
    Print {
        #[arg(help = "Invoice id or invoice number")]
        invoice: String,
        #[arg(long, short)]
        output: Option<PathBuf>,
        #[arg(long, action = ArgAction::SetTrue, help = "Do not open the print dialog on load")]
        no_auto_print: bool,
    },
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("invalid field '{raw}', expected field=value"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid field '{raw}', missing field name"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn parse_positive_usize(raw: &str) -> Result<usize, String> {
    let value: usize = raw
        .parse()
        .map_err(|_| format!("invalid integer '{raw}'"))?;
    if value == 0 {
        Err("value must be greater than zero".to_string())
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_module_list_with_filters() {
        let cli = Cli::try_parse_from([
            "tradedesk",
            "purchase-orders",
            "list",
            "--search",
            "steel",
            "--from",
            "2024-01-01",
            "--sort",
            "date",
            "--desc",
            "--page",
            "2",
        ])
        .unwrap();
        let (module, action) = cli.command.module_action().unwrap();
        assert_eq!(module, Module::PurchaseOrders);
        let ModuleAction::List(args) = action else {
            panic!("expected list");
        };
        assert_eq!(args.search.as_deref(), Some("steel"));
        assert_eq!(args.sort.as_deref(), Some("date"));
        assert!(args.desc);
        assert_eq!(args.page, 2);
    }

    #[test]
    fn parses_repeated_fields() {
        let cli = Cli::try_parse_from([
            "tradedesk",
            "clients",
            "update",
            "c1",
            "--set",
            "name=Ali Traders",
            "--set",
            "phone=0300 1234567",
        ])
        .unwrap();
        let Some((Module::Clients, ModuleAction::Update { id, fields })) = cli.command.module_action() else {
            panic!("expected clients update");
        };
        assert_eq!(id, "c1");
        assert_eq!(
            fields.fields,
            vec![
                ("name".to_string(), "Ali Traders".to_string()),
                ("phone".to_string(), "0300 1234567".to_string())
            ]
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(Cli::try_parse_from(["tradedesk", "clients", "create", "--set", "name"]).is_err());
        assert!(Cli::try_parse_from(["tradedesk", "clients", "list", "--page", "0"]).is_err());
        assert!(Cli::try_parse_from(["tradedesk", "clients", "list", "--desc"]).is_err());
        assert!(Cli::try_parse_from(["tradedesk", "clients", "export", "--scope", "some"]).is_err());
    }

    #[test]
    fn parses_export_and_report_options() {
        let cli = Cli::try_parse_from([
            "tradedesk", "--json", "orders", "export", "--format", "pdf", "--scope", "selected", "--select",
            "o1", "--select", "o2",
        ])
        .unwrap();
        assert!(cli.json);
        let Some((_, ModuleAction::Export(args))) = cli.command.module_action() else {
            panic!("expected export");
        };
        assert_eq!(args.format, ExportFormat::Pdf);
        assert_eq!(args.scope, ExportScope::Selected);
        assert_eq!(args.ids, vec!["o1", "o2"]);

        let cli = Cli::try_parse_from(["tradedesk", "report", "show", "Ali Traders", "--type", "payment", "--pdf"])
            .unwrap();
        let Command::Report(ReportCommand::Show(args)) = cli.command else {
            panic!("expected report show");
        };
        assert_eq!(args.entry_type, TypeFilter::Payment);
        assert_eq!(args.pdf, Some(None));
    }
}
