use anyhow::Context;
use clap::{Parser, Subcommand};
use core_types::SwapBundle;
use events::{EventSink, SwapEvent};
use executor::{ExecutionPlan, SwapExecutor};
use indicatif::{ProgressBar, ProgressStyle};
use rpc_client::{Broadcaster, ConfirmationWatcher, JsonRpcClient};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// The main entry point for the Conduit swap pipeline CLI.
#[tokio::main]
async fn main() {
    // Load environment variables from .env if present (e.g. CONDUIT_RPC__URL).
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Execute(args) => handle_execute(args).await,
        Commands::Plan(args) => handle_plan(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

/// A client-side orchestrator for multi-step on-chain token swaps.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a prepared swap bundle: approval (if required), then swap.
    Execute(ExecuteArgs),
    /// Show the execution plan for a bundle without touching the network.
    Plan(PlanArgs),
}

#[derive(Parser)]
struct ExecuteArgs {
    /// Path to the swap bundle JSON file produced by the quote step.
    #[arg(long)]
    bundle: PathBuf,

    /// Path to the configuration file.
    #[arg(long, default_value = "config.toml")]
    config: String,
}

#[derive(Parser)]
struct PlanArgs {
    /// Path to the swap bundle JSON file produced by the quote step.
    #[arg(long)]
    bundle: PathBuf,
}

fn load_bundle(path: &PathBuf) -> anyhow::Result<SwapBundle> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read bundle file {}", path.display()))?;
    let bundle: SwapBundle =
        serde_json::from_str(&raw).context("bundle file is not a valid swap bundle")?;
    bundle.validate().context("bundle failed validation")?;
    Ok(bundle)
}

/// Handles the orchestration of one swap execution.
async fn handle_execute(args: ExecuteArgs) -> anyhow::Result<()> {
    let config = configuration::load_config_from(&args.config)
        .context("failed to load configuration")?;
    let bundle = load_bundle(&args.bundle)?;

    println!(
        "Swapping {} {} for {} (chain {})",
        bundle.quote.from_amount,
        bundle.quote.from.symbol,
        bundle.quote.to.symbol,
        config.chain.chain_id
    );

    let client = Arc::new(JsonRpcClient::new(&config.rpc, &config.watcher));
    let broadcaster: Arc<dyn Broadcaster> = client.clone();
    let watcher: Arc<dyn ConfirmationWatcher> = client;
    let swap_executor = SwapExecutor::new(broadcaster, watcher, config.chain.chain_id);

    // Set up the status spinner driven by the pipeline's lifecycle events.
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(120));

    let (sink, mut receiver) = EventSink::channel();
    let consumer_spinner = spinner.clone();
    let consumer = tokio::spawn(async move {
        while let Some(event) = receiver.recv().await {
            if let Ok(json) = event.to_json() {
                tracing::debug!(event = %json, "lifecycle event");
            }
            match &event {
                SwapEvent::ApprovalSubmitting => {
                    consumer_spinner.set_message("Submitting approval transaction...");
                }
                SwapEvent::ApprovalSubmitted { hash } => {
                    consumer_spinner.set_message(format!("Approval {hash} awaiting confirmation..."));
                }
                SwapEvent::ApprovalConfirmed { hash } => {
                    consumer_spinner.set_message(format!("Approval {hash} confirmed"));
                }
                SwapEvent::SwapSubmitting => {
                    consumer_spinner.set_message("Submitting swap transaction...");
                }
                SwapEvent::SwapSubmitted { hash } => {
                    consumer_spinner.set_message(format!("Swap {hash} awaiting confirmation..."));
                }
                SwapEvent::SwapConfirmed { receipt } => {
                    consumer_spinner.finish_with_message(format!(
                        "Swap {} confirmed in block {}",
                        receipt.transaction_hash, receipt.block_number
                    ));
                }
                SwapEvent::Failed { leg, reason } => {
                    consumer_spinner.abandon_with_message(format!("{leg} failed: {reason}"));
                }
            }
            if event.is_terminal() {
                break;
            }
        }
    });

    let result = swap_executor.execute(&bundle, &sink).await;

    // Closing the sink ends the consumer once it has drained every event.
    drop(sink);
    consumer.await?;

    let receipt = result.context("swap execution failed")?;
    println!(
        "Success: {} (block {}, gas used {})",
        receipt.transaction_hash,
        receipt.block_number,
        receipt
            .gas_used
            .map_or_else(|| "unknown".to_string(), |g| g.to_string())
    );
    Ok(())
}

/// Prints the legs the executor would run for a bundle, in order.
fn handle_plan(args: PlanArgs) -> anyhow::Result<()> {
    let bundle = load_bundle(&args.bundle)?;
    let plan = ExecutionPlan::from_bundle(&bundle);

    for (index, (leg, descriptor)) in plan.legs().iter().enumerate() {
        println!(
            "{}. {} -> {} (value {}, chain {})",
            index + 1,
            leg,
            descriptor.to,
            descriptor.value,
            descriptor.chain_id
        );
    }
    Ok(())
}
