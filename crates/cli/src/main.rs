mod local;

use std::{
    io::{BufRead, BufReader},
    path::PathBuf,
    sync::Arc,
};

use {
    anyhow::Context,
    clap::{Parser, Subcommand},
    tracing::info,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

use {
    triage_agents::AgentKind,
    triage_consumer::{MemoryDeliveryQueue, MemoryEscalationQueue, process_batch},
    triage_credentials::EnvParameterStore,
    triage_history::MemoryHistoryStore,
    triage_routing::{RouterDeps, RouterHandle},
    triage_telemetry::{ExecutionLogger, TracingLogSink},
};

use local::KeywordProvider;

#[derive(Parser)]
#[command(name = "triage", about = "Triage — support-message routing engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Route a batch of inbound records (JSON lines) from a file or stdin.
    ///
    /// Reads credentials and queues from the environment (or a `.env`
    /// file): `TRIAGE_DELIVERY_QUEUE` names the reply queue and
    /// `TRIAGE_CLASSIFIER_API_KEY` holds the classifier credential. The
    /// bundled local provider never sends the key anywhere, but the
    /// credential fetch still runs, so the variable must be set.
    Batch {
        /// JSONL file with one `{"sessionId", "message"}` record per line.
        /// Reads stdin when omitted.
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// List the registered agents.
    Agents,
    /// Print the resolved configuration.
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.json_logs);

    match cli.command {
        Commands::Batch { file } => run_batch(file).await,
        Commands::Agents => {
            for kind in AgentKind::ALL {
                let descriptor = kind.descriptor();
                println!("{:<18} {} — {}", descriptor.id, descriptor.display_name, descriptor.description);
            }
            Ok(())
        },
        Commands::Config => {
            let config = triage_config::from_env().context("loading configuration")?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        },
    }
}

fn init_tracing(log_level: &str, json_logs: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

async fn run_batch(file: Option<PathBuf>) -> anyhow::Result<()> {
    let config = triage_config::from_env().context("loading configuration")?;

    let delivery = Arc::new(MemoryDeliveryQueue::new());
    let escalation = Arc::new(MemoryEscalationQueue::new());
    let history = Arc::new(MemoryHistoryStore::new(config.history.window_pairs));
    let logger = ExecutionLogger::spawn(Arc::new(TracingLogSink), config.logging.clone());

    let handle = RouterHandle::new(RouterDeps {
        config,
        parameters: Arc::new(EnvParameterStore),
        provider_factory: Box::new(|_credential| Arc::new(KeywordProvider)),
        history,
        escalation_queue: escalation.clone(),
        logger,
    });

    let records = read_records(file).context("reading inbound records")?;
    info!(count = records.len(), "processing batch");
    let report = process_batch(&handle, delivery.as_ref(), &records).await;

    for message in delivery.drain().await {
        println!("{}", serde_json::to_string(&message)?);
    }
    for notice in escalation.drain().await {
        println!("{}", serde_json::to_string(&notice)?);
    }
    println!("{}", serde_json::to_string(&report.summary())?);
    Ok(())
}

fn read_records(file: Option<PathBuf>) -> anyhow::Result<Vec<String>> {
    let reader: Box<dyn BufRead> = match file {
        Some(path) => Box::new(BufReader::new(
            std::fs::File::open(&path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(std::io::stdin())),
    };
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            records.push(line);
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn batch_help_names_the_required_variables() {
        let mut command = Cli::command();
        let batch = command
            .get_subcommands_mut()
            .find(|c| c.get_name() == "batch")
            .unwrap();
        let help = batch.render_long_help().to_string();
        assert!(help.contains("TRIAGE_DELIVERY_QUEUE"));
        assert!(help.contains("TRIAGE_CLASSIFIER_API_KEY"));
    }
}
