//! Starfall Headless Runner
//!
//! Plays one scripted session without a window, logs what happens, then
//! replays the recorded input and checks the final state hashes match.
//!
//! Usage: `starfall-sim [config.json]`

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use starfall::{
    DeterministicRng, SimConfig, TICK_RATE, VERSION,
    game::{
        build_scene,
        events::GameEventData,
        input::{InputFrame, InputRecording},
        tick::{replay_session, tick},
    },
};

/// Session seed for the demo run.
const DEMO_SEED: u64 = 12345;

/// One minute of play at the default tick rate.
const DEMO_TICKS: u32 = 60 * TICK_RATE;

/// Ticks each scripted input is held for.
const HOLD_TICKS: u32 = 40;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    info!("Starfall Simulation v{}", VERSION);

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading config from {}", path);
            SimConfig::load(&path).with_context(|| format!("loading config {}", path))?
        }
        None => SimConfig::default(),
    };
    info!("Tick Rate: {} Hz", config.world.tick_rate);

    demo_session(&config)
}

/// Scripted input: a new random key combination every `HOLD_TICKS` ticks.
fn scripted_input(script: &mut DeterministicRng, current: &mut InputFrame, t: u32) -> InputFrame {
    if t % HOLD_TICKS == 0 {
        let left = script.next_int(3) == 0;
        let right = !left && script.next_int(2) == 0;
        let up = script.next_int(4) == 0;
        *current = InputFrame::from_keys(left, right, up, false);
    }
    *current
}

/// Run the demo session and verify it replays.
fn demo_session(config: &SimConfig) -> anyhow::Result<()> {
    info!("=== Starting Demo Session ===");
    info!("RNG Seed: {}", DEMO_SEED);

    let mut state = build_scene(config, DEMO_SEED)?;
    let mut recording = InputRecording::new(DEMO_SEED);
    let mut script = DeterministicRng::new(DEMO_SEED ^ 0x5EED);
    let mut current = InputFrame::new();
    let mut total_events = 0usize;

    info!("Running up to {} ticks...", DEMO_TICKS);

    for t in 0..DEMO_TICKS {
        let input = scripted_input(&mut script, &mut current, t);
        recording.record(state.tick + 1, input);

        let result = tick(&mut state, input);
        total_events += result.events.len();

        for event in &result.events {
            match &event.data {
                GameEventData::StarCollected { star_id, score, position } => {
                    info!("Tick {}: star {} collected at {}, Score: {}", event.tick, star_id, position, score);
                }
                GameEventData::StarsRespawned { count } => {
                    info!("Tick {}: {} stars respawned", event.tick, count);
                }
                GameEventData::BombSpawned { bomb_id, position, velocity } => {
                    info!("Tick {}: bomb {} spawned at {} moving {}", event.tick, bomb_id, position, velocity);
                }
                GameEventData::PlayerHit { bomb_id } => {
                    warn!("Tick {}: player hit by bomb {}", event.tick, bomb_id);
                }
                GameEventData::GameOver { score } => {
                    info!("Tick {}: Game Over, final score {}", event.tick, score);
                }
            }
        }

        if result.game_over {
            break;
        }
    }
    recording.finalize(state.tick);

    info!("=== Session Results ===");
    let hash = state.compute_hash();
    info!("Ticks simulated: {}", state.tick);
    info!("{}", state.score_text());
    info!("Bombs in play: {}", state.bombs.len());
    info!("Total events: {}", total_events);
    info!("Input deltas: {} ({} ticks)", recording.delta_count(), recording.tick_count());
    info!("Input digest: {}", hex::encode(recording.digest()));
    info!("Final State Hash: {}", hex::encode(hash));

    info!("=== Verifying Determinism ===");
    let (replayed, replay_events) = replay_session(config, DEMO_SEED, &recording)?;
    let replay_hash = replayed.compute_hash();
    info!("Replay State Hash: {}", hex::encode(replay_hash));

    if hash == replay_hash && replay_events.len() == total_events {
        info!("DETERMINISM VERIFIED: Hashes match!");
        Ok(())
    } else {
        anyhow::bail!("DETERMINISM FAILURE: Hashes differ!")
    }
}
