use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use teloxide::prelude::*;
use tokio::time::sleep;

use tallycore::core::init_logger;
use tallycore::services::ExchangeRateApi;
use tallycore::storage::migrations::run_migrations;
use tallycore::{config, create_pool, get_connection, Assistant};

mod cli;
mod telegram;

use cli::{Cli, Commands};
use telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to the selected subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, database, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Log panics from handler tasks before the dispatcher is restarted
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
        if let Some(msg) = panic_info.payload().downcast_ref::<&str>() {
            log::error!("Panic message: {}", msg);
        }
    }));

    // Load .env first so LOG_FILE_PATH and DATABASE_PATH can come from it
    let _ = dotenv();

    init_logger(&config::LOG_FILE_PATH)?;

    match cli.command {
        Some(Commands::Migrate { database }) => run_migrate(database),
        Some(Commands::Run { database }) => run_bot(database).await,
        None => run_bot(None).await,
    }
}

fn database_path(database: Option<String>) -> String {
    database.unwrap_or_else(|| config::DATABASE_PATH.clone())
}

fn run_migrate(database: Option<String>) -> Result<()> {
    let path = database_path(database);
    log::info!("Applying migrations to {}", path);

    let pool = create_pool(&path)?;
    let mut conn = get_connection(&pool)?;
    // create_pool already migrated; this reports an up-to-date schema
    run_migrations(&mut conn)?;

    log::info!("Database {} is up to date", path);
    Ok(())
}

async fn run_bot(database: Option<String>) -> Result<()> {
    log::info!("Starting bot...");

    let path = database_path(database);
    let pool = Arc::new(create_pool(&path)?);
    log::info!("Ledger database: {}", path);

    let rates = Arc::new(ExchangeRateApi::from_config()?);
    let assistant = Arc::new(Assistant::new(Arc::clone(&pool), rates));

    let bot = create_bot()?;
    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let handler = schema(HandlerDeps::new(assistant));

    let mut retry_count = 0;
    let max_retries = config::retry::MAX_DISPATCHER_RETRIES;

    // Run the dispatcher with retry logic
    loop {
        let bot_clone = bot.clone();
        let handler_clone = handler.clone();

        // A separate task isolates panics; they surface through the JoinHandle
        let handle = tokio::spawn(async move {
            use teloxide::update_listeners::Polling;

            let listener = Polling::builder(bot_clone.clone()).drop_pending_updates().build();

            Dispatcher::builder(bot_clone, handler_clone)
                .dependencies(DependencyMap::new())
                .enable_ctrlc_handler()
                .build()
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the update listener"),
                )
                .await
        });

        match handle.await {
            Ok(()) => {
                log::info!("Dispatcher shutdown gracefully");
                break;
            }
            Err(join_err) if join_err.is_panic() => {
                log::error!("Dispatcher panicked: {}", join_err);
                if retry_count >= max_retries {
                    log::error!("Max retries reached after panic. Exiting...");
                    break;
                }
                retry_count += 1;
                log::info!(
                    "Retrying dispatcher connection after panic (attempt {}/{})...",
                    retry_count,
                    max_retries
                );
            }
            Err(join_err) => {
                log::warn!("Dispatcher task was cancelled: {}", join_err);
                break;
            }
        }

        sleep(config::retry::dispatcher_delay()).await;
    }

    Ok(())
}
