use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use pxpay::application::gateway::{CallbackParams, PxPayGateway};
use pxpay::config::GatewayConfig;
use pxpay::domain::ports::{BillingEntityStoreBox, GatewayTransportBox, PaymentStoreBox};
use pxpay::domain::request::PaymentFields;
use pxpay::infrastructure::http::HttpTransport;
use pxpay::infrastructure::in_memory::{InMemoryBillingEntityStore, InMemoryPaymentStore};
use pxpay::infrastructure::json_file::JsonFileStore;
use pxpay::infrastructure::mock::MockTransport;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing::info_span;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Gateway configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// PxPay endpoint, overrides the config file
    #[arg(long)]
    url: Option<String>,

    #[arg(long, env = "PXPAY_USER_ID")]
    user_id: Option<String>,

    #[arg(long, env = "PXPAY_KEY", hide_env_values = true)]
    key: Option<String>,

    /// Where the hosted page sends the shopper after a successful payment
    #[arg(long)]
    return_url: Option<String>,

    /// Where the hosted page sends the shopper after a failed or cancelled payment
    #[arg(long)]
    cancel_url: Option<String>,

    /// JSON file holding payment records. Without it an empty in-memory store is used.
    #[arg(long)]
    store: Option<PathBuf>,

    /// Answer with canned gateway replies instead of calling PxPay
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Request a hosted payment page
    Process(ProcessArgs),
    /// Verify a completed hosted payment
    Check(CheckArgs),
    /// List the supported currencies
    Currencies,
}

#[derive(Args)]
struct ProcessArgs {
    #[arg(long)]
    amount: Decimal,
    #[arg(long)]
    currency: String,
    #[arg(long)]
    reference: Option<String>,
    #[arg(long)]
    email: Option<String>,
    /// Ask the gateway for a billing id usable for later charges
    #[arg(long)]
    enable_add_bill_card: bool,
    #[arg(long)]
    txn_data1: Option<String>,
    #[arg(long)]
    txn_data2: Option<String>,
    #[arg(long)]
    txn_data3: Option<String>,
    /// Mock scenario: success, failure or incomplete
    #[arg(long)]
    scenario: Option<String>,
}

#[derive(Args)]
struct CheckArgs {
    #[arg(long)]
    payment_id: u64,
    /// The `result` token from the return URL
    #[arg(long)]
    result: String,
    #[arg(long)]
    userid: Option<String>,
    /// The `url` parameter from the return URL
    #[arg(long)]
    callback_url: Option<String>,
    /// Mock scenario: success, failure or incomplete
    #[arg(long)]
    scenario: Option<String>,
}

impl Cli {
    fn gateway_config(&self) -> Result<GatewayConfig> {
        let mut config = match &self.config {
            Some(path) => GatewayConfig::from_path(path).into_diagnostic()?,
            None => GatewayConfig::default(),
        };
        if let Some(url) = &self.url {
            config.url = url.clone();
        }
        if let Some(user_id) = &self.user_id {
            config.user_id = user_id.clone();
        }
        if let Some(key) = &self.key {
            config.key = key.clone();
        }
        if let Some(return_url) = &self.return_url {
            config.return_url = return_url.clone();
        }
        if let Some(cancel_url) = &self.cancel_url {
            config.cancel_url = cancel_url.clone();
        }
        Ok(config)
    }
}

fn build_gateway(config: &GatewayConfig, mock: bool, store: Option<PathBuf>) -> Result<PxPayGateway> {
    let transport: GatewayTransportBox = if mock {
        Box::new(MockTransport::new(config))
    } else {
        Box::new(HttpTransport::new(config).into_diagnostic()?)
    };

    let (payments, billing_entities): (PaymentStoreBox, BillingEntityStoreBox) = match store {
        Some(path) => {
            let store = JsonFileStore::open(path);
            (Box::new(store.clone()), Box::new(store))
        }
        None => (
            Box::new(InMemoryPaymentStore::new()),
            Box::new(InMemoryBillingEntityStore::new()),
        ),
    };

    Ok(
        PxPayGateway::new(transport, payments, billing_entities, config.callback_urls())
            .with_span(info_span!("pxpay", mock)),
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.gateway_config()?;

    let outcome = match cli.command {
        Command::Currencies => {
            for (code, name) in config.supported_currencies() {
                println!("{code},{name}");
            }
            return Ok(());
        }
        Command::Process(args) => {
            // The gateway takes any code; reject unsupported ones here.
            config.ensure_supported_currency(&args.currency).into_diagnostic()?;

            let fields = PaymentFields {
                reference: args.reference,
                email_address: args.email,
                enable_add_bill_card: args.enable_add_bill_card.then_some(true),
                txn_data1: args.txn_data1,
                txn_data2: args.txn_data2,
                txn_data3: args.txn_data3,
                mock: args.scenario,
                ..PaymentFields::new(args.amount, args.currency)
            };
            let gateway = build_gateway(&config, cli.mock, cli.store)?;
            gateway.process(&fields).await.into_diagnostic()?
        }
        Command::Check(args) => {
            let params = CallbackParams {
                url: args.callback_url,
                result: args.result,
                userid: args.userid,
                mock: args.scenario,
            };
            let gateway = build_gateway(&config, cli.mock, cli.store)?;
            gateway.check(args.payment_id, &params).await.into_diagnostic()?
        }
    };

    println!("{}", serde_json::to_string(&outcome).into_diagnostic()?);
    Ok(())
}
