use std::future::Future;

use tokio::{
    io::{AsyncBufReadExt, AsyncRead, BufReader},
    sync::mpsc,
};

use crate::{
    console::messages::{ConsoleEvent, Intent},
    game::GameEngine,
    models::GameSnapshot,
};

/// Drive a game from stdin until it finishes, the player quits, or Ctrl-C.
pub async fn run(engine: GameEngine) -> anyhow::Result<()> {
    play(engine, tokio::io::stdin(), tokio::signal::ctrl_c()).await?;
    Ok(())
}

/// Drive a game from `input` until it finishes, the player quits, or
/// `shutdown` resolves. Returns the state the engine was disposed in.
///
/// Intents are applied on this task only; the countdown updates arrive through
/// the engine's observers.
pub async fn play<R, S>(engine: GameEngine, input: R, shutdown: S) -> anyhow::Result<GameSnapshot>
where
    R: AsyncRead + Unpin + Send + 'static,
    S: Future<Output = std::io::Result<()>>,
{
    let mut observers = engine.subscribe();
    let (tx, mut rx) = mpsc::channel::<Intent>(16);

    let input_task = tokio::spawn(async move {
        let mut lines = BufReader::new(input).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if line.trim().is_empty() {
                continue;
            }
            match Intent::parse(&line) {
                Ok(intent) => {
                    if tx.send(intent).await.is_err() {
                        break;
                    }
                }
                Err(e) => tracing::warn!("Ignoring input: {}", e),
            }
        }
    });

    tracing::info!(
        "Game {} ready: type c (correct), s (skip) or q (quit)",
        engine.session_id()
    );
    emit(&ConsoleEvent::State(engine.snapshot()))?;

    // One listener for the whole game so a signal between iterations is kept
    tokio::pin!(shutdown);

    let mut input_open = true;
    loop {
        tokio::select! {
            intent = rx.recv(), if input_open => {
                match intent {
                    Some(Intent::Correct) => engine.on_correct(),
                    Some(Intent::Skip) => engine.on_skip(),
                    Some(Intent::Quit) => {
                        tracing::info!("Player quit");
                        break;
                    }
                    None => {
                        tracing::info!("Input closed, waiting for the countdown");
                        input_open = false;
                        continue;
                    }
                }
                emit(&ConsoleEvent::State(engine.snapshot()))?;
            }
            changed = observers.time_left.changed() => {
                if changed.is_err() {
                    break;
                }
                observers.time_left.mark_unchanged();
                emit(&ConsoleEvent::State(engine.snapshot()))?;
            }
            changed = observers.game_finished.changed() => {
                if changed.is_err() {
                    break;
                }
                let finished = *observers.game_finished.borrow_and_update();
                if finished {
                    emit(&ConsoleEvent::GameOver {
                        final_score: engine.score(),
                    })?;
                    engine.acknowledge_finish();
                    break;
                }
            }
            _ = &mut shutdown => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    input_task.abort();
    engine.dispose();

    Ok(engine.snapshot())
}

fn emit(event: &ConsoleEvent) -> anyhow::Result<()> {
    let json = serde_json::to_string(event)?;
    println!("{}", json);
    Ok(())
}
