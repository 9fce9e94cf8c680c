//! Tap detector.

use std::collections::HashMap;

use log::warn;

use gesture_core::{
    DetectState, GestureDisposal, GesturePriority, GestureRecognizer, RefereeState, TouchHandler,
    TouchId, TouchPhase, TouchPoint,
};

use crate::core::RecognizerCore;
use crate::event::{GestureCallbacks, GestureEvent};

const MAX_TAP_FINGERS: usize = 10;

/// Recognizes a tap with a configurable finger count: every required finger
/// lands, none moves more than `slop`, and all of them lift again. An extra
/// finger beyond the configured count rejects the gesture. The tap reports
/// through `on_action_start` once the referee accepts it.
pub struct TapRecognizer {
    core: RecognizerCore,
    fingers: usize,
    slop: f64,
    starts: HashMap<TouchId, (f64, f64)>,
    time: u64,
}

impl TapRecognizer {
    pub fn new(fingers: usize, slop: f64) -> Self {
        let fingers = if fingers == 0 || fingers > MAX_TAP_FINGERS {
            warn!("tap finger count {fingers} out of range, using 1");
            1
        } else {
            fingers
        };
        Self {
            core: RecognizerCore::new("tap", GesturePriority::Low),
            fingers,
            slop,
            starts: HashMap::new(),
            time: 0,
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
        self.time = point.timestamp;
        self.starts.insert(point.id, (point.x, point.y));
        if self.starts.len() > self.fingers {
            // one finger too many breaks the tap
            self.reset();
            return Some(GestureDisposal::Reject);
        }
        if self.starts.len() == self.fingers {
            self.core.set_detect_state(DetectState::Detecting);
        }
        None
    }

    fn on_move(&mut self, point: &TouchPoint) -> Option<GestureDisposal> {
        let &(start_x, start_y) = self.starts.get(&point.id)?;
        self.time = point.timestamp;
        let dx = point.x - start_x;
        let dy = point.y - start_y;
        if (dx * dx + dy * dy).sqrt() > self.slop {
            self.reset();
            return Some(GestureDisposal::Reject);
        }
        None
    }

    fn on_up(&mut self, point: &TouchPoint) -> Option<GestureDisposal> {
        self.starts.remove(&point.id)?;
        self.time = point.timestamp;

        if self.core.detect_state() != DetectState::Detecting {
            // a finger lifted before all required fingers landed
            self.reset();
            return Some(GestureDisposal::Reject);
        }
        if self.starts.is_empty() {
            self.core.set_detect_state(DetectState::Detected);
            return Some(GestureDisposal::Accept);
        }
        None
    }

    fn on_cancel(&mut self, point: &TouchPoint) -> Option<GestureDisposal> {
        self.starts.get(&point.id)?;
        self.reset();
        Some(GestureDisposal::Reject)
    }

    fn event(&self) -> GestureEvent {
        GestureEvent {
            timestamp: self.time,
            ..GestureEvent::default()
        }
    }

    fn reset(&mut self) {
        self.starts.clear();
        self.core.set_detect_state(DetectState::Ready);
    }
}

impl TouchHandler for TapRecognizer {
    fn handle_touch(&mut self, point: &TouchPoint) -> Option<GestureDisposal> {
        match point.phase {
            TouchPhase::Down => self.on_down(point),
            TouchPhase::Move => self.on_move(point),
            TouchPhase::Up => self.on_up(point),
            TouchPhase::Cancel => self.on_cancel(point),
        }
    }
}

impl GestureRecognizer for TapRecognizer {
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
        self.reset();
    }

    fn on_rejected(&mut self, touch_id: TouchId) {
        // a scope closing for a finger that already lifted is not a loss;
        // only reset when the rejected touch is still tracked
        if self.starts.contains_key(&touch_id) {
            self.reset();
        }
    }

    fn on_pending(&mut self, _touch_id: TouchId) {}

    fn debug_name(&self) -> &str {
        self.core.label()
    }
}
