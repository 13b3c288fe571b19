//! Pitch-bend ribbon as an explicit state machine.
//!
//! `Start` and `Move` carry a position in percent; `End` always recenters
//! and yields the center bend so no bend is left sounding.

use crate::midi::{ribbon_to_bend, PITCH_BEND_CENTER, RIBBON_CENTER};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RibbonEvent {
    Start(f32),
    Move(f32),
    End,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RibbonState {
    Idle,
    Dragging { position: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ribbon {
    state: RibbonState,
}

impl Default for Ribbon {
    fn default() -> Self {
        Self::new()
    }
}

impl Ribbon {
    pub fn new() -> Self {
        Ribbon {
            state: RibbonState::Idle,
        }
    }

    pub fn state(&self) -> RibbonState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, RibbonState::Dragging { .. })
    }

    /// Position shown on the ribbon; center while idle.
    pub fn position(&self) -> f32 {
        match self.state {
            RibbonState::Idle => RIBBON_CENTER,
            RibbonState::Dragging { position } => position,
        }
    }

    /// Applies an event and returns the bend value to send, if any.
    /// A `Move` without a preceding `Start` is ignored.
    pub fn handle(&mut self, event: RibbonEvent) -> Option<u16> {
        match (self.state, event) {
            (_, RibbonEvent::Start(x)) | (RibbonState::Dragging { .. }, RibbonEvent::Move(x)) => {
                let position = clamp_percent(x);
                self.state = RibbonState::Dragging { position };
                Some(ribbon_to_bend(position))
            }
            (RibbonState::Idle, RibbonEvent::Move(_)) => None,
            (_, RibbonEvent::End) => {
                self.state = RibbonState::Idle;
                Some(PITCH_BEND_CENTER)
            }
        }
    }
}

fn clamp_percent(x: f32) -> f32 {
    if x.is_nan() {
        RIBBON_CENTER
    } else {
        x.clamp(0.0, 100.0)
    }
}

/// Converts a pointer x coordinate over a ribbon spanning
/// `left..left + width` into a clamped percent.
pub fn position_from_pointer(x: f32, left: f32, width: f32) -> f32 {
    if width <= 0.0 {
        return RIBBON_CENTER;
    }
    clamp_percent((x - left) / width * 100.0)
}

/// Evenly spaced samples for a drag from `from` to `to`, excluding the
/// start point and ending exactly on `to`.
pub fn sweep_positions(from: f32, to: f32, steps: u32) -> Vec<f32> {
    let steps = steps.max(1);
    (1..=steps)
        .map(|i| {
            if i == steps {
                to
            } else {
                from + (to - from) * i as f32 / steps as f32
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_outside_ribbon_is_clamped() {
        assert_eq!(position_from_pointer(-20.0, 0.0, 200.0), 0.0);
        assert_eq!(position_from_pointer(500.0, 0.0, 200.0), 100.0);
        assert_eq!(position_from_pointer(150.0, 100.0, 200.0), 25.0);
    }

    #[test]
    fn test_sweep_positions() {
        assert_eq!(sweep_positions(50.0, 100.0, 5), vec![60.0, 70.0, 80.0, 90.0, 100.0]);
        assert_eq!(sweep_positions(50.0, 0.0, 0), vec![0.0]);
    }

    #[test]
    fn test_zero_width_ribbon_stays_centered() {
        assert_eq!(position_from_pointer(10.0, 0.0, 0.0), RIBBON_CENTER);
    }
}
