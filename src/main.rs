use clap::Parser;
use otail_core::config::Config;
use otail_core::Kind;

#[derive(Parser)]
#[command(name = "otail", about = "Tail live OpenTelemetry logs, metrics and traces")]
struct Cli {
    /// WebSocket endpoint to subscribe to (overrides `stream.endpoint`).
    #[arg(long)]
    endpoint: Option<String>,

    /// Tab shown at startup: logs, metrics or traces.
    #[arg(long)]
    kind: Option<Kind>,

    /// Write debug logs to /tmp/otail-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/otail-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("otail debug log started, tail -f /tmp/otail-debug.log");
    }

    // A config file that does not parse is fatal; silently falling back to the
    // defaults would dial the wrong endpoint.
    let mut config = Config::load()?;
    if let Some(endpoint) = cli.endpoint {
        config.stream.endpoint = endpoint;
    }
    if let Some(kind) = cli.kind {
        config.ui.initial_kind = kind;
    }

    otail_tui::run(config)
}
