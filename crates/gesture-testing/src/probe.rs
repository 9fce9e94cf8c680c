//! Scriptable recognizer that records every arbitration callback.

use std::cell::RefCell;
use std::rc::Rc;

use gesture_core::{
    DetectState, GesturePriority, GestureRecognizer, RecognizerHandle, RefereeState, TouchId,
};

/// Shared, ordered record of arbitration callbacks. Several probes can write
/// into one log to assert cross-recognizer notification order.
pub type EventLog = Rc<RefCell<Vec<String>>>;

/// Recognizer test double. It never looks at touch input; tests submit its
/// verdicts directly and assert on the recorded callbacks and states.
pub struct ProbeRecognizer {
    label: &'static str,
    priority: GesturePriority,
    referee_state: RefereeState,
    detect_state: DetectState,
    log: EventLog,
}

impl ProbeRecognizer {
    pub fn new(label: &'static str, priority: GesturePriority) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            label,
            priority,
            referee_state: RefereeState::Ready,
            detect_state: DetectState::Ready,
            log: EventLog::default(),
        }))
    }

    /// Coerces the probe into the handle type the referee accepts.
    pub fn handle(probe: &Rc<RefCell<Self>>) -> RecognizerHandle {
        probe.clone()
    }

    /// A fresh log for [`log_into`](Self::log_into).
    pub fn shared_log() -> EventLog {
        EventLog::default()
    }

    /// Redirects this probe's callback records into a shared log.
    pub fn log_into(&mut self, log: &EventLog) {
        self.log = log.clone();
    }

    /// Snapshot of the recorded callbacks.
    pub fn events(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    pub fn set_detect_state(&mut self, state: DetectState) {
        self.detect_state = state;
    }

    fn record(&self, kind: &str, touch_id: TouchId) {
        self.log
            .borrow_mut()
            .push(format!("{kind}:{}:{touch_id}", self.label));
    }
}

impl GestureRecognizer for ProbeRecognizer {
    fn priority(&self) -> GesturePriority {
        self.priority
    }

    fn referee_state(&self) -> RefereeState {
        self.referee_state
    }

    fn set_referee_state(&mut self, state: RefereeState) {
        self.referee_state = state;
    }

    fn detect_state(&self) -> DetectState {
        self.detect_state
    }

    fn on_accepted(&mut self, touch_id: TouchId) {
        self.record("accepted", touch_id);
    }

    fn on_rejected(&mut self, touch_id: TouchId) {
        self.record("rejected", touch_id);
    }

    fn on_pending(&mut self, touch_id: TouchId) {
        self.record("pending", touch_id);
    }

    fn debug_name(&self) -> &str {
        self.label
    }
}
