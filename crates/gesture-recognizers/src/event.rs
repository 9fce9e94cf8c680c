//! Application-facing gesture payloads and action callbacks.

use std::rc::Rc;

/// Details delivered with a recognized gesture's action callbacks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureEvent {
    /// Accumulated movement along x since the sequence started.
    pub offset_x: f64,
    /// Accumulated movement along y since the sequence started.
    pub offset_y: f64,
    /// Current span relative to the initial span; 1.0 for non-scaling gestures.
    pub scale: f64,
    /// Timestamp of the touch sample that produced this event, in
    /// milliseconds since the input source's epoch.
    pub timestamp: u64,
}

impl Default for GestureEvent {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 1.0,
            timestamp: 0,
        }
    }
}

pub type GestureEventFn = Rc<dyn Fn(&GestureEvent)>;
pub type GestureCancelFn = Rc<dyn Fn()>;

/// Optional action callbacks a recognizer fires as its gesture progresses.
#[derive(Clone, Default)]
pub struct GestureCallbacks {
    pub on_action_start: Option<GestureEventFn>,
    pub on_action_update: Option<GestureEventFn>,
    pub on_action_end: Option<GestureEventFn>,
    pub on_action_cancel: Option<GestureCancelFn>,
}

impl GestureCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_start(mut self, f: impl Fn(&GestureEvent) + 'static) -> Self {
        self.on_action_start = Some(Rc::new(f));
        self
    }

    pub fn on_update(mut self, f: impl Fn(&GestureEvent) + 'static) -> Self {
        self.on_action_update = Some(Rc::new(f));
        self
    }

    pub fn on_end(mut self, f: impl Fn(&GestureEvent) + 'static) -> Self {
        self.on_action_end = Some(Rc::new(f));
        self
    }

    pub fn on_cancel(mut self, f: impl Fn() + 'static) -> Self {
        self.on_action_cancel = Some(Rc::new(f));
        self
    }
}
