//! Pinch (scale) detector.

use std::collections::HashMap;

use log::warn;

use gesture_core::{
    DetectState, GestureDisposal, GesturePriority, GestureRecognizer, RefereeState, TouchHandler,
    TouchId, TouchPhase, TouchPoint,
};

use crate::core::RecognizerCore;
use crate::event::{GestureCallbacks, GestureEvent};

/// Recognizes a pinch once the average finger distance from the touch
/// centroid drifts by at least the configured amount from where it started.
/// `scale` in the reported events is the current span over the initial span.
pub struct PinchRecognizer {
    core: RecognizerCore,
    fingers: usize,
    distance: f64,
    initial_deviation: f64,
    current_deviation: f64,
    scale: f64,
    time: u64,
    touch_points: HashMap<TouchId, TouchPoint>,
    pending_end: bool,
    pending_cancel: bool,
}

impl PinchRecognizer {
    pub fn new(fingers: usize, distance: f64) -> Self {
        let fingers = if fingers < 2 {
            warn!("pinch needs at least two fingers, got {fingers}, using 2");
            2
        } else {
            fingers
        };
        Self {
            core: RecognizerCore::new("pinch", GesturePriority::Low),
            fingers,
            distance,
            initial_deviation: 0.0,
            current_deviation: 0.0,
            scale: 1.0,
            time: 0,
            touch_points: HashMap::new(),
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
            self.initial_deviation = self.average_deviation();
            self.core.set_detect_state(DetectState::Detecting);
        }
        None
    }

    fn on_move(&mut self, point: &TouchPoint) -> Option<GestureDisposal> {
        if !self.touch_points.contains_key(&point.id) {
            return None;
        }
        self.touch_points.insert(point.id, *point);
        if self.core.detect_state() == DetectState::Ready {
            return None;
        }

        self.time = point.timestamp;
        self.current_deviation = self.average_deviation();
        if self.initial_deviation > 0.0 {
            self.scale = self.current_deviation / self.initial_deviation;
        }

        match self.core.detect_state() {
            DetectState::Detecting => {
                if (self.current_deviation - self.initial_deviation).abs() >= self.distance {
                    self.core.set_detect_state(DetectState::Detected);
                    return Some(GestureDisposal::Accept);
                }
            }
            DetectState::Detected if self.core.referee_state() == RefereeState::Succeed => {
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

    /// Mean distance of the tracked points from their centroid.
    fn average_deviation(&self) -> f64 {
        if self.touch_points.is_empty() {
            return 0.0;
        }
        let count = self.touch_points.len() as f64;
        let (sum_x, sum_y) = self
            .touch_points
            .values()
            .fold((0.0, 0.0), |(x, y), p| (x + p.x, y + p.y));
        let (center_x, center_y) = (sum_x / count, sum_y / count);
        self.touch_points
            .values()
            .map(|p| {
                let dx = p.x - center_x;
                let dy = p.y - center_y;
                (dx * dx + dy * dy).sqrt()
            })
            .sum::<f64>()
            / count
    }

    fn event(&self) -> GestureEvent {
        GestureEvent {
            offset_x: 0.0,
            offset_y: 0.0,
            scale: self.scale,
            timestamp: self.time,
        }
    }

    fn reset(&mut self) {
        self.touch_points.clear();
        self.initial_deviation = 0.0;
        self.current_deviation = 0.0;
        self.scale = 1.0;
        self.time = 0;
        self.pending_end = false;
        self.pending_cancel = false;
        self.core.set_detect_state(DetectState::Ready);
    }
}

impl TouchHandler for PinchRecognizer {
    fn handle_touch(&mut self, point: &TouchPoint) -> Option<GestureDisposal> {
        match point.phase {
            TouchPhase::Down => self.on_down(point),
            TouchPhase::Move => self.on_move(point),
            TouchPhase::Up => self.on_up(point),
            TouchPhase::Cancel => self.on_cancel(point),
        }
    }
}

impl GestureRecognizer for PinchRecognizer {
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
