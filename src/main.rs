use api_client::BinanceClient;
use clap::{Parser, Subcommand};
use comfy_table::{Table, presets::UTF8_FULL};
use configuration::{Config, ConfigArgs, init_logging, load_config};
use core_types::RawOrderRequest;
use events::{InterfaceSource, TracingJournal};
use executor::{OrderExecutor, OrderOutcome, PlacedOrder};
use rust_decimal::Decimal;
use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

/// The main entry point for the testnet trading bot.
#[tokio::main]
async fn main() -> ExitCode {
    // Credentials may live in a .env file; a missing file is fine.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command failed.");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Places MARKET and LIMIT orders on the Binance USDT-M Futures Testnet.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and place a single order.
    Order(OrderArgs),
    /// Check that the exchange is reachable.
    Ping,
    /// Start the web order form.
    Serve(ServeArgs),
}

#[derive(Parser)]
struct OrderArgs {
    /// Trading pair symbol (e.g., "BTCUSDT").
    #[arg(long)]
    symbol: String,

    /// Order side: BUY or SELL.
    #[arg(long)]
    side: String,

    /// Order type: MARKET or LIMIT.
    #[arg(long = "type")]
    order_type: String,

    /// Quantity to trade.
    #[arg(long)]
    quantity: String,

    /// Limit price. Required for LIMIT orders, ignored for MARKET orders.
    #[arg(long)]
    price: Option<String>,
}

impl From<OrderArgs> for RawOrderRequest {
    fn from(args: OrderArgs) -> Self {
        RawOrderRequest {
            symbol: Some(args.symbol),
            side: Some(args.side),
            order_type: Some(args.order_type),
            quantity: Some(args.quantity),
            price: args.price,
        }
    }
}

#[derive(Parser)]
struct ServeArgs {
    /// Address to listen on. Defaults to `server.host:server.port`.
    #[arg(long)]
    addr: Option<SocketAddr>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = load_config(&cli.config.config)?;
    init_logging(&config.logging)?;
    tracing::debug!(config = %cli.config.config.display(), "Configuration loaded.");

    match cli.command {
        Commands::Order(args) => handle_order(args, &config).await,
        Commands::Ping => handle_ping(&config).await,
        Commands::Serve(args) => {
            let addr = match args.addr {
                Some(addr) => addr,
                None => config.server.socket_addr()?,
            };
            let executor = build_executor(&config)?;
            println!("Order form available at http://{addr}");
            web_server::run_server(addr, executor).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Wires the Binance client and the tracing journal into an executor.
fn build_executor(config: &Config) -> anyhow::Result<OrderExecutor> {
    let client = BinanceClient::new(&config.api)?;
    Ok(OrderExecutor::new(
        Arc::new(client),
        Arc::new(TracingJournal),
    ))
}

async fn handle_order(args: OrderArgs, config: &Config) -> anyhow::Result<ExitCode> {
    let raw = RawOrderRequest::from(args);
    println!("{}", summary_table(&raw));

    let executor = build_executor(config)?;
    let outcome = match executor.submit(&raw, InterfaceSource::Cli).await {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Error: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    match outcome {
        OrderOutcome::Placed(placed) => {
            println!("Order placed successfully.");
            println!("{}", result_table(&placed));
            Ok(ExitCode::SUCCESS)
        }
        OrderOutcome::Failed(failure) => {
            eprintln!("Error: {}", failure.message);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn handle_ping(config: &Config) -> anyhow::Result<ExitCode> {
    let executor = build_executor(config)?;
    match executor.check_connectivity().await {
        Ok(server_time) => {
            let rendered = chrono::DateTime::from_timestamp_millis(server_time)
                .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_else(|| server_time.to_string());
            println!("Exchange reachable at {}. Server time: {rendered}", config.api.base_url);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::error!(error = %e, "Connectivity check failed.");
            eprintln!("Error: Exchange is not reachable: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}

// ==============================================================================
// Terminal Rendering
// ==============================================================================

/// The request as typed, before validation.
fn summary_table(raw: &RawOrderRequest) -> Table {
    let shown = |value: &Option<String>| value.as_deref().unwrap_or("").trim().to_uppercase();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Order Request Summary", ""])
        .add_row(vec!["Symbol".to_string(), shown(&raw.symbol)])
        .add_row(vec!["Side".to_string(), shown(&raw.side)])
        .add_row(vec!["Type".to_string(), shown(&raw.order_type)])
        .add_row(vec!["Quantity".to_string(), shown(&raw.quantity)])
        .add_row(vec!["Price".to_string(), raw.price_display().to_string()]);
    table
}

fn result_table(placed: &PlacedOrder) -> Table {
    let decimal = |value: Option<Decimal>| value.map(|d| d.normalize().to_string());

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Order Result", ""])
        .add_row(vec!["Order ID".to_string(), placed.order_id.to_string()])
        .add_row(vec!["Status".to_string(), placed.status.clone()])
        .add_row(vec![
            "Executed Quantity".to_string(),
            decimal(placed.executed_qty).unwrap_or_else(|| "0".to_string()),
        ]);
    if let Some(avg_price) = decimal(placed.avg_price) {
        table.add_row(vec!["Average Price".to_string(), avg_price]);
    }
    if let Some(price) = decimal(placed.price) {
        table.add_row(vec!["Limit Price".to_string(), price]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{OrderSide, OrderType};
    use rust_decimal_macros::dec;

    fn placed(avg_price: Option<Decimal>) -> PlacedOrder {
        PlacedOrder {
            order_id: 123456789,
            symbol: "BTCUSDT".into(),
            side: OrderSide::Buy,
            order_type: OrderType::Market,
            status: "FILLED".into(),
            orig_qty: Some(dec!(0.010)),
            executed_qty: Some(dec!(0.010)),
            price: None,
            avg_price,
            time_in_force: None,
        }
    }

    #[test]
    fn cli_parses_an_order_command() {
        let cli = Cli::try_parse_from([
            "testnet-trader",
            "order",
            "--symbol",
            "btcusdt",
            "--side",
            "buy",
            "--type",
            "limit",
            "--quantity",
            "0.01",
            "--price",
            "45000",
        ])
        .unwrap();

        let Commands::Order(args) = cli.command else {
            panic!("expected the order subcommand");
        };
        let raw = RawOrderRequest::from(args);
        assert_eq!(raw.order_type.as_deref(), Some("limit"));
        assert_eq!(raw.price.as_deref(), Some("45000"));
        assert_eq!(cli.config.config, std::path::PathBuf::from("config.toml"));
    }

    #[test]
    fn config_flag_is_accepted_after_the_subcommand() {
        let cli = Cli::try_parse_from(["testnet-trader", "ping", "--config", "other.toml"]).unwrap();
        assert!(matches!(cli.command, Commands::Ping));
        assert_eq!(cli.config.config, std::path::PathBuf::from("other.toml"));
    }

    #[test]
    fn summary_shows_normalized_fields_and_missing_price() {
        let raw = RawOrderRequest::new(" btcusdt ", "buy", "market", "0.01");
        let rendered = summary_table(&raw).to_string();

        assert!(rendered.contains("BTCUSDT"));
        assert!(rendered.contains("MARKET"));
        assert!(rendered.contains("N/A"));
    }

    #[test]
    fn result_table_omits_missing_average_price() {
        let with_avg = result_table(&placed(Some(dec!(43215.75)))).to_string();
        assert!(with_avg.contains("Average Price"));
        assert!(with_avg.contains("43215.75"));
        assert!(with_avg.contains("0.01"));

        let without_avg = result_table(&placed(None)).to_string();
        assert!(!without_avg.contains("Average Price"));
        assert!(without_avg.contains("123456789"));
    }
}
