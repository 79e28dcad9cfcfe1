use anyhow::{Context, Result};
use guess_the_word::{config::Config, console, game::GameEngine, scheduler::TokioScheduler};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize tracing; stdout is reserved for game events
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "guess_the_word=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let runtime = tokio::runtime::Runtime::new().context("Failed to build tokio runtime")?;
    let result = runtime.block_on(play());

    // The stdin reader can still be parked in a blocking read
    runtime.shutdown_background();

    result
}

async fn play() -> Result<()> {
    tracing::info!("Starting Guess The Word...");

    let config = Config::from_env()?;
    tracing::info!(
        "Configuration loaded: {}ms countdown, {}ms ticks",
        config.game.countdown_time_ms,
        config.game.tick_interval_ms
    );

    let engine = GameEngine::new(&config.game, &TokioScheduler::new())
        .context("Failed to start the game countdown")?;

    console::run(engine).await
}
