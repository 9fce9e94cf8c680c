//! Capability contract between the referee and gesture recognizers.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::types::{DetectState, GesturePriority, RefereeState, TouchId};

/// Narrow contract a recognizer exposes to the referee.
///
/// The referee only ever reads the priority tier, reads and writes the
/// arbitration state, reads the detector's progress, and delivers the three
/// arbitration callbacks. Everything else a recognizer does (touch tracking,
/// thresholds, user callbacks) is invisible to arbitration.
///
/// Callbacks run inline on the caller's stack. A callback must not re-enter
/// the referee for the same touch id.
pub trait GestureRecognizer {
    fn priority(&self) -> GesturePriority;

    fn referee_state(&self) -> RefereeState;

    fn set_referee_state(&mut self, state: RefereeState);

    fn detect_state(&self) -> DetectState;

    /// The recognizer won the arbitration for `touch_id`.
    fn on_accepted(&mut self, touch_id: TouchId);

    /// The recognizer lost the arbitration for `touch_id`.
    fn on_rejected(&mut self, touch_id: TouchId);

    /// The recognizer's deferred verdict was acknowledged for `touch_id`.
    fn on_pending(&mut self, touch_id: TouchId);

    /// Stable label used in log output instead of runtime type names.
    fn debug_name(&self) -> &str {
        "recognizer"
    }
}

/// Shared handle to a recognizer. The widget tree owns these; the referee
/// keeps only [`WeakRecognizer`] references.
pub type RecognizerHandle = Rc<RefCell<dyn GestureRecognizer>>;

/// Non-owning reference held inside referee scopes. A handle whose owner
/// dropped it is treated as "not a member".
pub type WeakRecognizer = Weak<RefCell<dyn GestureRecognizer>>;
