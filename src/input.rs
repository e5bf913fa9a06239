//! Logical input actions
//!
//! The window layer translates device events into [`InputState::press`] and
//! [`InputState::release`] calls. The simulation only ever asks whether an
//! action is held or was pressed since the last frame.

use crate::sim::raycast::Ray;

/// Everything the player can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    /// Use whatever is under the cursor (stove switches)
    Interact,
    Pause,
    Mute,
}

/// Held state plus press count for one action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Button {
    /// Presses since the last frame ended
    pub downs: u8,
    /// Currently held
    pub pressed: bool,
}

impl Button {
    pub fn was_pressed(&self) -> bool {
        self.downs > 0
    }
}

/// Button state for every action, plus the picking ray for Interact
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub left: Button,
    pub right: Button,
    pub jump: Button,
    pub interact: Button,
    pub pause: Button,
    pub mute: Button,
    /// World-space ray under the cursor, supplied by the UI picking layer
    pub pointer_ray: Option<Ray>,
}

impl InputState {
    fn button_mut(&mut self, action: Action) -> &mut Button {
        match action {
            Action::MoveLeft => &mut self.left,
            Action::MoveRight => &mut self.right,
            Action::Jump => &mut self.jump,
            Action::Interact => &mut self.interact,
            Action::Pause => &mut self.pause,
            Action::Mute => &mut self.mute,
        }
    }

    pub fn button(&self, action: Action) -> Button {
        match action {
            Action::MoveLeft => self.left,
            Action::MoveRight => self.right,
            Action::Jump => self.jump,
            Action::Interact => self.interact,
            Action::Pause => self.pause,
            Action::Mute => self.mute,
        }
    }

    pub fn press(&mut self, action: Action) {
        let button = self.button_mut(action);
        button.downs = button.downs.saturating_add(1);
        button.pressed = true;
    }

    pub fn release(&mut self, action: Action) {
        self.button_mut(action).pressed = false;
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.button(action).pressed
    }

    pub fn was_pressed(&self, action: Action) -> bool {
        self.button(action).was_pressed()
    }

    /// Clear per-frame press counts (held state survives)
    pub fn end_frame(&mut self) {
        for button in [
            &mut self.left,
            &mut self.right,
            &mut self.jump,
            &mut self.interact,
            &mut self.pause,
            &mut self.mute,
        ] {
            button.downs = 0;
        }
    }

    /// Signed horizontal intent: -1 left, +1 right, 0 for neither or both
    pub fn move_axis(&self) -> f32 {
        match (self.left.pressed, self.right.pressed) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release() {
        let mut input = InputState::default();
        input.press(Action::Jump);
        assert!(input.is_held(Action::Jump));
        assert!(input.was_pressed(Action::Jump));

        input.release(Action::Jump);
        assert!(!input.is_held(Action::Jump));
        assert!(input.was_pressed(Action::Jump));

        input.end_frame();
        assert!(!input.was_pressed(Action::Jump));
    }

    #[test]
    fn test_move_axis_cancels() {
        let mut input = InputState::default();
        assert_eq!(input.move_axis(), 0.0);
        input.press(Action::MoveLeft);
        assert_eq!(input.move_axis(), -1.0);
        input.press(Action::MoveRight);
        assert_eq!(input.move_axis(), 0.0);
        input.release(Action::MoveLeft);
        assert_eq!(input.move_axis(), 1.0);
    }

    #[test]
    fn test_held_survives_end_frame() {
        let mut input = InputState::default();
        input.press(Action::MoveRight);
        input.end_frame();
        assert!(input.is_held(Action::MoveRight));
    }
}
