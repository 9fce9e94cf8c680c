//! Touch-id → scope registry and the arbitration entry points.

use ahash::RandomState;
use indexmap::IndexMap;
use log::{debug, error};

use crate::recognizer::RecognizerHandle;
use crate::scope::GestureScope;
use crate::types::{GestureDisposal, TouchId};

/// Routes recognizer registration and verdicts to per-touch scopes.
///
/// Construct one referee per input-dispatch owner and pass it wherever
/// adjudication is needed; there is no global instance. All methods are
/// infallible: precondition violations (unknown touch id, non-member
/// recognizer) are logged and absorbed so a stray event can never take down
/// the input pipeline.
///
/// The referee is single-threaded by construction (`Rc`-based handles make
/// it `!Send`); callers must keep all invocations for a touch id serialized
/// and must not re-enter the referee from a recognizer callback.
pub struct GestureReferee {
    scopes: IndexMap<TouchId, GestureScope, RandomState>,
}

impl GestureReferee {
    pub fn new() -> Self {
        Self {
            scopes: IndexMap::default(),
        }
    }

    /// Registers a recognizer for a touch sequence, lazily creating the
    /// scope on first registration.
    pub fn add_gesture_recognizer(&mut self, touch_id: TouchId, recognizer: &RecognizerHandle) {
        debug!(
            "add recognizer {} to scope {}",
            recognizer.borrow().debug_name(),
            touch_id
        );
        self.scopes
            .entry(touch_id)
            .or_insert_with(|| GestureScope::new(touch_id))
            .add_member(recognizer);
    }

    /// Withdraws a recognizer from a touch sequence. Unknown touch ids are
    /// ignored; widgets may unmount after their sequence already finished.
    pub fn del_gesture_recognizer(&mut self, touch_id: TouchId, recognizer: &RecognizerHandle) {
        let Some(scope) = self.scopes.get_mut(&touch_id) else {
            return;
        };
        scope.del_member(recognizer);
    }

    /// Applies a recognizer's verdict for a touch sequence. A scope emptied
    /// by the verdict is dropped from the registry.
    pub fn adjudicate(
        &mut self,
        touch_id: TouchId,
        recognizer: &RecognizerHandle,
        disposal: GestureDisposal,
    ) {
        let Some(scope) = self.scopes.get_mut(&touch_id) else {
            error!("no gesture scope for touch id {touch_id}");
            return;
        };

        scope.handle_disposal(recognizer, disposal);
        if scope.is_empty() {
            debug!("scope for touch id {touch_id} drained, dropping it");
            self.scopes.shift_remove(&touch_id);
        }
    }

    /// Tears down the scope for a finished touch sequence (up/cancel).
    /// Refused while a member's verdict is still pending; callers retry on a
    /// later cleanup opportunity. Calling this for an absent touch id is a
    /// no-op.
    pub fn clean_gesture_scope(&mut self, touch_id: TouchId) {
        let Some(scope) = self.scopes.get_mut(&touch_id) else {
            return;
        };

        if scope.is_pending() {
            error!("scope for touch id {touch_id} has a pending member, not cleaning");
            return;
        }

        if !scope.is_empty() {
            scope.force_close();
        }
        self.scopes.shift_remove(&touch_id);
    }

    /// True if a scope is currently registered for the touch id.
    pub fn has_scope(&self, touch_id: TouchId) -> bool {
        self.scopes.contains_key(&touch_id)
    }
}

impl Default for GestureReferee {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    // Import through the external `gesture_core` crate so the types match
    // `gesture_testing`, which links against that copy rather than this
    // test-compiled one (dev-dependency cycle).
    use gesture_core::{
        GestureDisposal, GesturePriority, GestureRecognizer, GestureReferee, RefereeState,
    };
    use gesture_testing::ProbeRecognizer;

    #[test]
    fn scopes_are_created_lazily_and_dropped_when_drained() {
        let mut referee = GestureReferee::new();
        let probe = ProbeRecognizer::new("a", GesturePriority::High);
        let handle = ProbeRecognizer::handle(&probe);

        assert!(!referee.has_scope(3));
        referee.add_gesture_recognizer(3, &handle);
        assert!(referee.has_scope(3));

        referee.adjudicate(3, &handle, GestureDisposal::Accept);
        assert_eq!(probe.borrow().referee_state(), RefereeState::Succeed);
        assert!(!referee.has_scope(3));
    }

    #[test]
    fn adjudicate_without_a_scope_is_absorbed() {
        let mut referee = GestureReferee::new();
        let probe = ProbeRecognizer::new("a", GesturePriority::High);

        referee.adjudicate(9, &ProbeRecognizer::handle(&probe), GestureDisposal::Accept);

        assert_eq!(probe.borrow().referee_state(), RefereeState::Ready);
        assert!(probe.borrow().events().is_empty());
    }

    #[test]
    fn clean_rejects_members_and_is_idempotent() {
        let mut referee = GestureReferee::new();
        let probe = ProbeRecognizer::new("a", GesturePriority::Low);
        referee.add_gesture_recognizer(4, &ProbeRecognizer::handle(&probe));

        referee.clean_gesture_scope(4);
        assert!(!referee.has_scope(4));
        assert_eq!(probe.borrow().events(), vec!["rejected:a:4"]);

        // second cleanup for the now-absent id is a no-op
        referee.clean_gesture_scope(4);
        assert_eq!(probe.borrow().events().len(), 1);
    }

    #[test]
    fn clean_is_refused_while_a_member_is_pending() {
        let mut referee = GestureReferee::new();
        let probe = ProbeRecognizer::new("a", GesturePriority::Low);
        let handle = ProbeRecognizer::handle(&probe);
        referee.add_gesture_recognizer(4, &handle);
        referee.adjudicate(4, &handle, GestureDisposal::Pending);

        referee.clean_gesture_scope(4);
        assert!(referee.has_scope(4));

        referee.adjudicate(4, &handle, GestureDisposal::Reject);
        assert!(!referee.has_scope(4));
    }

    #[test]
    fn del_gesture_recognizer_ignores_unknown_touch_ids() {
        let mut referee = GestureReferee::new();
        let probe = ProbeRecognizer::new("a", GesturePriority::Low);
        referee.del_gesture_recognizer(11, &ProbeRecognizer::handle(&probe));
        assert!(probe.borrow().events().is_empty());
    }
}
