//! State shared by every concrete recognizer.

use gesture_core::{DetectState, GesturePriority, RefereeState};

use crate::event::{GestureCallbacks, GestureEvent};

/// Bookkeeping every recognizer embeds: arbitration state, detector
/// progress, priority tier, and the application's action callbacks.
/// Concrete recognizers delegate their [`GestureRecognizer`] accessors here.
///
/// [`GestureRecognizer`]: gesture_core::GestureRecognizer
pub struct RecognizerCore {
    label: &'static str,
    priority: GesturePriority,
    referee_state: RefereeState,
    detect_state: DetectState,
    callbacks: GestureCallbacks,
}

impl RecognizerCore {
    pub fn new(label: &'static str, priority: GesturePriority) -> Self {
        Self {
            label,
            priority,
            referee_state: RefereeState::Ready,
            detect_state: DetectState::Ready,
            callbacks: GestureCallbacks::default(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn priority(&self) -> GesturePriority {
        self.priority
    }

    pub fn set_priority(&mut self, priority: GesturePriority) {
        self.priority = priority;
    }

    pub fn referee_state(&self) -> RefereeState {
        self.referee_state
    }

    pub fn set_referee_state(&mut self, state: RefereeState) {
        self.referee_state = state;
    }

    pub fn detect_state(&self) -> DetectState {
        self.detect_state
    }

    pub fn set_detect_state(&mut self, state: DetectState) {
        self.detect_state = state;
    }

    pub fn set_callbacks(&mut self, callbacks: GestureCallbacks) {
        self.callbacks = callbacks;
    }

    pub fn send_start(&self, event: &GestureEvent) {
        if let Some(callback) = &self.callbacks.on_action_start {
            callback(event);
        }
    }

    pub fn send_update(&self, event: &GestureEvent) {
        if let Some(callback) = &self.callbacks.on_action_update {
            callback(event);
        }
    }

    pub fn send_end(&self, event: &GestureEvent) {
        if let Some(callback) = &self.callbacks.on_action_end {
            callback(event);
        }
    }

    pub fn send_cancel(&self) {
        if let Some(callback) = &self.callbacks.on_action_cancel {
            callback();
        }
    }
}
