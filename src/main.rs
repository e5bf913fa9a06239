//! Melt Runner headless entry point
//!
//! Loads tuning and settings, builds the kitchen level, and lets the autopilot
//! play it at the fixed timestep. Usage: `melt-runner [tuning.json]`

use melt_runner::audio::{AudioManager, SilentSink};
use melt_runner::consts::{MAX_SUBSTEPS, SIM_DT};
use melt_runner::demo::{Autopilot, kitchen_scene};
use melt_runner::input::{Action, InputState};
use melt_runner::renderer::{HeadlessSink, MeshSink};
use melt_runner::sim::{GamePhase, GameState, Level, tick};
use melt_runner::{Settings, Tuning};

/// Wall-clock frame length the driver pretends to render at
const FRAME_DT: f32 = 1.0 / 60.0;
/// Give up after this much simulated time
const TIME_LIMIT: f32 = 60.0;

fn main() {
    env_logger::init();
    log::info!("Melt Runner (headless) starting...");

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::load(&path)?,
        None => Tuning::default(),
    };
    let mut settings = Settings::load(Settings::FILE_NAME);

    let level = Level::from_scene(kitchen_scene())?;
    let mut state = GameState::new(level, tuning)?;

    let mut renderer = HeadlessSink::default();
    let mesh = renderer.create_mesh(state.player.mesh.vertices());
    let mut audio = AudioManager::new();
    let mut speaker = SilentSink;
    let mut input = InputState::default();
    let mut pilot = Autopilot::default();

    let mut accumulator = 0.0;
    let mut frames = 0u32;
    while state.phase != GamePhase::Won && state.time < TIME_LIMIT {
        accumulator += FRAME_DT.min(0.1);

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            pilot.drive(&state, &mut input);
            if input.was_pressed(Action::Mute) {
                settings.toggle_mute();
            }
            tick(&mut state, &input, SIM_DT);
            audio.process(&state, &settings, &mut speaker);
            input.end_frame();

            accumulator -= SIM_DT;
            substeps += 1;
        }

        renderer.write_vertices(mesh, state.player.mesh.vertices());
        frames += 1;
        if frames % 60 == 0 {
            let position = state.player.position();
            log::debug!(
                "t={:.1}s y={:.1} z={:.1} melt={:.2}",
                state.time,
                position.y,
                position.z,
                state.player.thermal.level()
            );
        }
    }

    match state.phase {
        GamePhase::Won => log::info!(
            "Cleared the kitchen in {:.2}s with {} death(s), melt level {:.2}",
            state.time,
            state.deaths,
            state.player.thermal.level()
        ),
        _ => log::warn!(
            "Gave up after {:.0}s with {} death(s)",
            state.time,
            state.deaths
        ),
    }
    log::info!("{} frames, {} vertex uploads", frames, renderer.writes);
    Ok(())
}
