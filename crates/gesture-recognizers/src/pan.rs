//! Pan (drag) detector.

use std::collections::HashMap;

use log::warn;

use gesture_core::{
    DetectState, GestureDisposal, GesturePriority, GestureRecognizer, RefereeState, TouchHandler,
    TouchId, TouchPhase, TouchPoint,
};

use crate::core::RecognizerCore;
use crate::event::{GestureCallbacks, GestureEvent};

const MAX_PAN_FINGERS: usize = 10;

/// Axis constraint for a pan gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanDirection {
    All,
    Horizontal,
    Vertical,
}

/// Recognizes a drag once accumulated movement in the configured direction
/// crosses the distance threshold. Fires `on_action_start` when the referee
/// accepts it, `on_action_update` on further movement, and `on_action_end`
/// when the last required finger lifts.
pub struct PanRecognizer {
    core: RecognizerCore,
    fingers: usize,
    direction: PanDirection,
    distance: f64,
    touch_points: HashMap<TouchId, TouchPoint>,
    average_x: f64,
    average_y: f64,
    time: u64,
    pending_end: bool,
    pending_cancel: bool,
}

impl PanRecognizer {
    pub fn new(fingers: usize, direction: PanDirection, distance: f64) -> Self {
        let fingers = if fingers == 0 || fingers > MAX_PAN_FINGERS {
            warn!("pan finger count {fingers} out of range, using 1");
            1
        } else {
            fingers
        };
        Self {
            core: RecognizerCore::new("pan", GesturePriority::Low),
            fingers,
            direction,
            distance,
            touch_points: HashMap::new(),
            average_x: 0.0,
            average_y: 0.0,
            time: 0,
            pending_end: false,
            pending_cancel: false,
        }
    }

    pub fn with_priority(mut self, priority: GesturePriority) -> Self {
        self.core.set_priority(priority);
        self
    }

    pub fn with_callbacks(mut self, callbacks: GestureCallbacks) -> Self {
        self.core.set_callbacks(callbacks);
        self
    }

    fn on_down(&mut self, point: &TouchPoint) -> Option<GestureDisposal> {
        self.touch_points.insert(point.id, *point);
        if self.core.detect_state() == DetectState::Ready
            && self.touch_points.len() == self.fingers
        {
            self.core.set_detect_state(DetectState::Detecting);
        }
        None
    }

    fn on_move(&mut self, point: &TouchPoint) -> Option<GestureDisposal> {
        if !self.touch_points.contains_key(&point.id) {
            return None;
        }

        if self.core.detect_state() == DetectState::Ready {
            self.touch_points.insert(point.id, *point);
            return None;
        }

        let prev = self.touch_points[&point.id];
        let count = self.touch_points.len() as f64;
        self.average_x += (point.x - prev.x) / count;
        self.average_y += (point.y - prev.y) / count;
        self.touch_points.insert(point.id, *point);
        self.time = point.timestamp;

        match self.core.detect_state() {
            DetectState::Detecting => {
                if self.main_axis_offset().abs() >= self.distance {
                    self.core.set_detect_state(DetectState::Detected);
                    return Some(GestureDisposal::Accept);
                }
            }
            DetectState::Detected if self.core.referee_state() == RefereeState::Succeed => {
                // off-axis drift is not reported for constrained pans
                match self.direction {
                    PanDirection::Horizontal => self.average_y = 0.0,
                    PanDirection::Vertical => self.average_x = 0.0,
                    PanDirection::All => {}
                }
                self.core.send_update(&self.event());
            }
            _ => {}
        }
        None
    }

    fn on_up(&mut self, point: &TouchPoint) -> Option<GestureDisposal> {
        self.touch_points.remove(&point.id)?;

        match self.core.detect_state() {
            DetectState::Ready => Some(GestureDisposal::Reject),
            DetectState::Detecting => {
                if self.touch_points.len() < self.fingers {
                    Some(GestureDisposal::Reject)
                } else {
                    None
                }
            }
            DetectState::Detected => {
                if self.touch_points.len() < self.fingers {
                    if self.core.referee_state() == RefereeState::Succeed {
                        self.core.send_end(&self.event());
                        self.reset();
                    } else {
                        self.pending_end = true;
                    }
                }
                None
            }
        }
    }

    fn on_cancel(&mut self, _point: &TouchPoint) -> Option<GestureDisposal> {
        match self.core.detect_state() {
            DetectState::Ready | DetectState::Detecting => Some(GestureDisposal::Reject),
            DetectState::Detected => {
                if self.core.referee_state() == RefereeState::Succeed {
                    self.core.send_cancel();
                    self.reset();
                } else {
                    self.pending_cancel = true;
                }
                None
            }
        }
    }

    fn main_axis_offset(&self) -> f64 {
        match self.direction {
            PanDirection::All => (self.average_x * self.average_x
                + self.average_y * self.average_y)
                .sqrt(),
            PanDirection::Horizontal => self.average_x,
            PanDirection::Vertical => self.average_y,
        }
    }

    fn event(&self) -> GestureEvent {
        GestureEvent {
            offset_x: self.average_x,
            offset_y: self.average_y,
            scale: 1.0,
            timestamp: self.time,
        }
    }

    fn reset(&mut self) {
        self.touch_points.clear();
        self.average_x = 0.0;
        self.average_y = 0.0;
        self.time = 0;
        self.pending_end = false;
        self.pending_cancel = false;
        self.core.set_detect_state(DetectState::Ready);
    }
}

impl TouchHandler for PanRecognizer {
    fn handle_touch(&mut self, point: &TouchPoint) -> Option<GestureDisposal> {
        match point.phase {
            TouchPhase::Down => self.on_down(point),
            TouchPhase::Move => self.on_move(point),
            TouchPhase::Up => self.on_up(point),
            TouchPhase::Cancel => self.on_cancel(point),
        }
    }
}

impl GestureRecognizer for PanRecognizer {
    fn priority(&self) -> GesturePriority {
        self.core.priority()
    }

    fn referee_state(&self) -> RefereeState {
        self.core.referee_state()
    }

    fn set_referee_state(&mut self, state: RefereeState) {
        self.core.set_referee_state(state);
    }

    fn detect_state(&self) -> DetectState {
        self.core.detect_state()
    }

    fn on_accepted(&mut self, _touch_id: TouchId) {
        self.core.send_start(&self.event());
        if self.pending_end {
            self.core.send_end(&self.event());
            self.reset();
        } else if self.pending_cancel {
            self.core.send_cancel();
            self.reset();
        }
    }

    fn on_rejected(&mut self, _touch_id: TouchId) {
        self.reset();
    }

    fn on_pending(&mut self, _touch_id: TouchId) {}

    fn debug_name(&self) -> &str {
        self.core.label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finger_count_is_clamped() {
        let pan = PanRecognizer::new(0, PanDirection::All, 5.0);
        assert_eq!(pan.fingers, 1);
        let pan = PanRecognizer::new(MAX_PAN_FINGERS + 1, PanDirection::All, 5.0);
        assert_eq!(pan.fingers, 1);
    }

    #[test]
    fn main_axis_offset_respects_direction() {
        let mut pan = PanRecognizer::new(1, PanDirection::Horizontal, 5.0);
        pan.average_x = 3.0;
        pan.average_y = 4.0;
        assert_eq!(pan.main_axis_offset(), 3.0);

        pan.direction = PanDirection::Vertical;
        assert_eq!(pan.main_axis_offset(), 4.0);

        pan.direction = PanDirection::All;
        assert_eq!(pan.main_axis_offset(), 5.0);
    }

    #[test]
    fn accepts_once_threshold_is_crossed() {
        let mut pan = PanRecognizer::new(1, PanDirection::All, 5.0);
        assert_eq!(pan.handle_touch(&TouchPoint::down(1, 0.0, 0.0)), None);
        assert_eq!(pan.handle_touch(&TouchPoint::moved(1, 3.0, 0.0)), None);
        assert_eq!(
            pan.handle_touch(&TouchPoint::moved(1, 8.0, 0.0)),
            Some(GestureDisposal::Accept)
        );
        assert_eq!(pan.detect_state(), DetectState::Detected);
    }

    #[test]
    fn early_lift_rejects() {
        let mut pan = PanRecognizer::new(1, PanDirection::All, 5.0);
        pan.handle_touch(&TouchPoint::down(1, 0.0, 0.0));
        assert_eq!(
            pan.handle_touch(&TouchPoint::up(1, 0.0, 0.0)),
            Some(GestureDisposal::Reject)
        );
    }
}
