//! Dam state machine.
//!
//! The core only reads a [`DamState`] per tick; the frame counter that breaks
//! the dam lives with the caller in [`DamController`].

use bevy::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DamState {
    #[default]
    Intact,
    Broken,
}

impl DamState {
    #[inline]
    pub fn is_intact(self) -> bool {
        matches!(self, DamState::Intact)
    }
}

/// Caller-owned frame counter that breaks the dam once, irreversibly.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct DamController {
    break_frame: u64,
    frame: u64,
    state: DamState,
}

impl DamController {
    pub fn new(break_frame: u64) -> Self {
        Self {
            break_frame,
            frame: 0,
            state: DamState::Intact,
        }
    }

    pub fn state(&self) -> DamState {
        self.state
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn break_frame(&self) -> u64 {
        self.break_frame
    }

    /// State to use for the current frame, then move the counter on.
    ///
    /// The dam breaks on the frame whose index equals `break_frame`; returns
    /// `true` only on that transition.
    pub fn advance(&mut self) -> bool {
        let broke = self.state.is_intact() && self.frame >= self.break_frame;
        if broke {
            self.state = DamState::Broken;
        }
        self.frame = self.frame.saturating_add(1);
        broke
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breaks_once_at_threshold() {
        let mut dam = DamController::new(3);
        let transitions: Vec<bool> = (0..6).map(|_| dam.advance()).collect();
        assert_eq!(transitions, vec![false, false, false, true, false, false]);
        assert_eq!(dam.state(), DamState::Broken);
        assert_eq!(dam.frame(), 6);
    }

    #[test]
    fn test_zero_threshold_breaks_on_first_frame() {
        let mut dam = DamController::new(0);
        assert!(dam.advance());
        assert!(!dam.state().is_intact());
    }
}
