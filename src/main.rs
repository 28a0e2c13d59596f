use clap::{Parser, Subcommand};
use std::sync::Arc;

use ticker_bot::application::errors::BotError;
use ticker_bot::application::messaging::ResponderRegistry;
use ticker_bot::application::responders::TickerResponder;
use ticker_bot::domain::entities::{InboundMessage, TextResponse};
use ticker_bot::domain::traits::{Bot, PriceSource};
use ticker_bot::infrastructure::adapters::ConsoleAdapter;
use ticker_bot::infrastructure::binance::BinanceClient;
use ticker_bot::infrastructure::config::Config;

#[derive(Parser)]
#[command(name = "ticker-bot")]
#[command(about = "Chat command responder for exchange prices", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the console bot
    Run,
    /// Answer a single chat message and exit
    Ask {
        /// Raw message text, e.g. "$price BTCUSDT"
        message: String,
    },
    /// List the chat commands the bot understands
    #[command(name = "commands")]
    ListCommands,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run => run_bot(&cli.config),
        Commands::Ask { message } => ask(&cli.config, &message),
        Commands::ListCommands => list_commands(&cli.config),
        Commands::Version => {
            println!("ticker-bot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn load_config(config_path: &str) -> Config {
    if std::path::Path::new(config_path).exists() {
        Config::load(config_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::load_env()
        })
    } else {
        Config::load_env()
    }
}

fn build_registry(config: &Config) -> Result<ResponderRegistry<TextResponse>, BotError> {
    config.validate()?;

    let source: Arc<dyn PriceSource> = Arc::new(BinanceClient::new(&config.binance)?);
    let max = config.bot.max_fragment_len;

    let registry = ResponderRegistry::new(max)
        .with_responder(TickerResponder::new(source, max)?)
        .with_help()?;

    tracing::info!("Registry ready with {} responders: {:?}", registry.len(), registry.names());
    Ok(registry)
}

fn run_bot(config_path: &str) -> Result<(), BotError> {
    let config = load_config(config_path);
    tracing::info!("Starting {}", config.bot.name);

    // Keep one handle here so the blocking HTTP client is dropped outside the runtime
    let registry = Arc::new(build_registry(&config)?);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let bot = ConsoleAdapter::new(config.bot.name.clone());
        run_console_bot(bot, Arc::clone(&registry)).await
    })
}

async fn run_console_bot(bot: ConsoleAdapter, registry: Arc<ResponderRegistry<TextResponse>>) -> Result<(), BotError> {
    bot.start().await?;

    let info = bot.bot_info();
    tracing::info!("Bot started: @{}", info.username);

    while let Some(input) = bot.read_line("> ").await {
        if input.trim().is_empty() {
            continue;
        }

        let message = InboundMessage::new(info.id.clone(), input);
        tracing::debug!(
            "[{}] {} at {}: {}",
            message.chat_id,
            message.id,
            message.received_at.format("%H:%M:%S%.3f"),
            message.preview()
        );

        // Price lookups block on HTTP, keep them off the async workers
        let registry = Arc::clone(&registry);
        let text = message.text.clone();
        let (fragments, report) = tokio::task::spawn_blocking(move || registry.collect(&text))
            .await
            .map_err(|e| BotError::Internal(e.to_string()))?;

        if !report.failed.is_empty() {
            tracing::warn!("[{}] Failed responders: {:?}", message.chat_id, report.failed);
        }

        for fragment in fragments {
            if let Err(e) = bot.send_message(&message.chat_id, fragment.text()).await {
                tracing::error!("Failed to send message: {}", e);
            }
        }
    }

    tracing::info!("Input closed, stopping");
    Ok(())
}

fn ask(config_path: &str, message: &str) -> Result<(), BotError> {
    let config = load_config(config_path);
    let registry = build_registry(&config)?;

    let (fragments, report) = registry.collect(message);
    if report.is_unhandled() {
        tracing::info!("No command matches {:?}, try `ticker-bot commands`", message);
    }
    for fragment in fragments {
        println!("{}", fragment);
    }
    Ok(())
}

fn list_commands(config_path: &str) -> Result<(), BotError> {
    let config = load_config(config_path);
    let registry = build_registry(&config)?;

    for page in registry.help() {
        println!("{}", page);
    }
    Ok(())
}

fn init_config() -> Result<(), BotError> {
    let config = Config::default();
    let yaml = serde_yaml::to_string(&config)
        .map_err(|e| BotError::Internal(e.to_string()))?;
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
    Ok(())
}
