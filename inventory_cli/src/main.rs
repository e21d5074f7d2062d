mod commands;
mod output;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use inventory_lib::{AppConfig, Client, FileCredentials};

use crate::commands::Context;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "inventory")]
#[command(about = "Browse and manage inventory, suppliers, purchase orders and sales")]
struct Cli {
    /// Output format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// API base URL (overrides INVENTORY_API_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Rows per page (overrides INVENTORY_PAGE_SIZE)
    #[arg(long, global = true)]
    page_size: Option<i64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session tokens
    Login(commands::auth::LoginArgs),
    /// Forget the stored session tokens
    Logout,
    /// Product catalogue
    #[command(subcommand)]
    Products(commands::products::ProductsCommand),
    /// Suppliers
    #[command(subcommand)]
    Suppliers(commands::suppliers::SuppliersCommand),
    /// Purchase orders
    #[command(subcommand)]
    PurchaseOrders(commands::purchase_orders::PurchaseOrdersCommand),
    /// Stock batches
    #[command(subcommand)]
    Stock(commands::stock::StockCommand),
    /// Sales and sales reports
    #[command(subcommand)]
    Sales(commands::sales::SalesCommand),
    /// Dashboard summaries
    #[command(subcommand)]
    Dashboard(commands::dashboard::DashboardCommand),
    /// Point of sale
    #[command(subcommand)]
    Pos(commands::pos::PosCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("inventory=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = AppConfig::from_env();
    let base_url = cli.base_url.clone().unwrap_or(config.base_url);
    let page_size = match cli.page_size {
        Some(size) => inventory_lib::validation::validate_page_size(size)? as usize,
        None => config.page_size,
    };

    let credentials = Arc::new(FileCredentials::open(&config.token_file)?);
    let client = Client::with_timeout(&base_url, credentials, config.timeout)?;
    let ctx = Context {
        client,
        format: OutputFormat::parse(&cli.output),
        page_size,
    };

    match &cli.command {
        Commands::Login(args) => commands::auth::login(args, &ctx).await?,
        Commands::Logout => commands::auth::logout(&ctx)?,
        Commands::Products(cmd) => commands::products::run(cmd, &ctx).await?,
        Commands::Suppliers(cmd) => commands::suppliers::run(cmd, &ctx).await?,
        Commands::PurchaseOrders(cmd) => commands::purchase_orders::run(cmd, &ctx).await?,
        Commands::Stock(cmd) => commands::stock::run(cmd, &ctx).await?,
        Commands::Sales(cmd) => commands::sales::run(cmd, &ctx).await?,
        Commands::Dashboard(cmd) => commands::dashboard::run(cmd, &ctx).await?,
        Commands::Pos(cmd) => commands::pos::run(cmd, &ctx).await?,
    }

    Ok(())
}
