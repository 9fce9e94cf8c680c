//! Raw touch input types consumed by recognizers.

use crate::types::{GestureDisposal, TouchId};

/// Phase of a raw touch point within its sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// One raw touch sample as delivered by the input dispatch loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub id: TouchId,
    pub x: f64,
    pub y: f64,
    /// Milliseconds since the input source's epoch.
    pub timestamp: u64,
    pub phase: TouchPhase,
}

impl TouchPoint {
    pub fn new(id: TouchId, phase: TouchPhase, x: f64, y: f64) -> Self {
        Self {
            id,
            x,
            y,
            timestamp: 0,
            phase,
        }
    }

    pub fn at(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn down(id: TouchId, x: f64, y: f64) -> Self {
        Self::new(id, TouchPhase::Down, x, y)
    }

    pub fn moved(id: TouchId, x: f64, y: f64) -> Self {
        Self::new(id, TouchPhase::Move, x, y)
    }

    pub fn up(id: TouchId, x: f64, y: f64) -> Self {
        Self::new(id, TouchPhase::Up, x, y)
    }

    pub fn cancel(id: TouchId, x: f64, y: f64) -> Self {
        Self::new(id, TouchPhase::Cancel, x, y)
    }
}

/// Detector side of a recognizer: consumes raw touch samples and may emit a
/// verdict for the referee.
///
/// Recognizers never call the referee directly; the dispatch loop that owns
/// both forwards any returned disposal to [`GestureReferee::adjudicate`].
/// This keeps arbitration non-reentrant while a recognizer is borrowed.
///
/// [`GestureReferee::adjudicate`]: crate::GestureReferee::adjudicate
pub trait TouchHandler {
    fn handle_touch(&mut self, point: &TouchPoint) -> Option<GestureDisposal>;
}
