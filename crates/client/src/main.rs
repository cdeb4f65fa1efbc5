//! Ring siege client binary.
//!
//! Composition root: loads content, builds the runtime, plays one wave with
//! the scripted defender and narrates it into the session log.
//!
//! # Examples
//!
//! ```bash
//! SIEGE_WAVE=siege SIEGE_TIME_SCALE=0 cargo run -p siege-client
//! ```

use anyhow::{Context, Result};
use siege_content::ContentFactory;
use siege_runtime::{Runtime, ScriptedDefender};
use siege_client::{ClientConfig, Narrator, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _log_guard = logging::setup_logging(config.session_id.as_deref(), config.log_dir.as_deref())?;

    tracing::info!("Starting siege client");
    tracing::info!("Data directory: {}", config.data_dir.display());

    // 1. Load content
    let content = ContentFactory::new(&config.data_dir);
    let game_config = content.load_config()?;
    let archetypes = content.load_archetypes()?;
    let wave = content
        .load_wave(&config.wave)
        .with_context(|| format!("cannot play wave '{}'", config.wave))?;

    let names = archetypes
        .iter()
        .map(|archetype| (archetype.template_id, archetype.name.clone()));
    let narrator = Narrator::new(names);

    // 2. Build runtime
    let mut runtime = Runtime::builder()
        .config(config.runtime_config())
        .game_config(game_config)
        .archetypes(archetypes.into_iter().collect())
        .defender_provider(ScriptedDefender::default())
        .build()
        .await?;
    let narration = narrator.spawn(&runtime.handle());

    // 3. Play
    runtime.spawn_wave(&wave).await?;
    let outcome = runtime.run().await?;
    let state = runtime.handle().query_state().await?;
    runtime.shutdown().await?;

    let tally = narration.await?;
    tracing::info!(?outcome, ?tally, "Client shutdown complete");

    println!(
        "{:?} after {} turns: defender {}/{} hp, {} slain, {} coins",
        outcome,
        state.turn,
        state.defender.hp,
        state.defender.max_hp,
        tally.slain,
        state.rewards.coins
    );
    Ok(())
}
