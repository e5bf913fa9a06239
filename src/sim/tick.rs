//! Fixed timestep simulation tick
//!
//! One call advances the whole game by `dt`: pause handling, stove interaction,
//! then the player followed by every pursuer.

use super::entity::{Actor, FrameContext};
use super::state::{GameEvent, GamePhase, GameState};
use crate::input::{Action, InputState};

/// Advance the game state by one step
pub fn tick(state: &mut GameState, input: &InputState, dt: f32) {
    state.events.clear();

    // Handle pause toggle
    if input.was_pressed(Action::Pause) {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::info!("Paused");
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::info!("Resumed");
            }
            GamePhase::Won => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    let mut events = std::mem::take(&mut state.events);

    if input.was_pressed(Action::Interact) {
        if let Some(setting) = input.pointer_ray.and_then(|ray| state.stove.try_toggle(&ray)) {
            events.push(GameEvent::StoveToggled(setting));
        }
    }

    // Pursuers are captured before anyone moves so the player sees last
    // frame's positions
    let occupants = state.occupants();
    let ctx = FrameContext {
        level: &state.level,
        stove: &state.stove,
        tuning: &state.tuning,
        input,
        target: None,
        occupants: &occupants,
    };
    state.player.update(&ctx, dt, &mut events);

    let ctx = FrameContext {
        target: Some(state.player.position()),
        occupants: &[],
        ..ctx
    };
    for pursuer in &mut state.pursuers {
        pursuer.update(&ctx, dt, &mut events);
    }

    state.time += dt;

    if events.contains(&GameEvent::Died) {
        state.deaths += 1;
        state.reset();
    } else if events.contains(&GameEvent::ReachedGoal) {
        state.phase = GamePhase::Won;
        log::info!("Goal reached in {:.1}s", state.time);
    }

    state.events = events;
}
