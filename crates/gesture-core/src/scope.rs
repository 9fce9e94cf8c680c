//! Per-touch arbitration scope.
//!
//! A [`GestureScope`] owns the membership and decision logic for one touch
//! sequence. Members are partitioned by [`GesturePriority`]: parallel members
//! are independent, while high and low members compete for a single winner.

use std::rc::Rc;

use log::{debug, error, info};

use crate::recognizer::{RecognizerHandle, WeakRecognizer};
use crate::types::{DetectState, GestureDisposal, GesturePriority, RefereeState, TouchId};

/// Arbitration session for one touch id.
pub struct GestureScope {
    touch_id: TouchId,
    parallel: Vec<WeakRecognizer>,
    high: Vec<WeakRecognizer>,
    low: Vec<WeakRecognizer>,
}

impl GestureScope {
    pub fn new(touch_id: TouchId) -> Self {
        Self {
            touch_id,
            parallel: Vec::new(),
            high: Vec::new(),
            low: Vec::new(),
        }
    }

    pub fn touch_id(&self) -> TouchId {
        self.touch_id
    }

    /// Enters a recognizer into the arbitration. The member starts in
    /// [`RefereeState::Detecting`] and joins the list for its priority tier.
    /// Adding a recognizer that is already a member is a logged no-op.
    pub fn add_member(&mut self, recognizer: &RecognizerHandle) {
        if self.existed(recognizer) {
            error!(
                "recognizer {} is already a member of scope {}",
                recognizer.borrow().debug_name(),
                self.touch_id
            );
            return;
        }

        recognizer
            .borrow_mut()
            .set_referee_state(RefereeState::Detecting);
        let priority = recognizer.borrow().priority();
        self.list_mut(priority).push(Rc::downgrade(recognizer));
    }

    /// Withdraws a recognizer without a verdict, e.g. because its widget was
    /// unmounted mid-sequence. Runs the same unblock pass as a rejection so
    /// blocked siblings are not stranded.
    pub fn del_member(&mut self, recognizer: &RecognizerHandle) {
        self.prune();
        if !self.existed(recognizer) {
            info!(
                "recognizer {} is not a member of scope {}, nothing to delete",
                recognizer.borrow().debug_name(),
                self.touch_id
            );
            return;
        }

        let prev_state = recognizer.borrow().referee_state();
        recognizer
            .borrow_mut()
            .set_referee_state(RefereeState::Detecting);

        let priority = recognizer.borrow().priority();
        if priority == GesturePriority::Parallel {
            remove_from(&mut self.parallel, recognizer);
            return;
        }

        self.remove_and_unblock(prev_state == RefereeState::Pending, recognizer);
    }

    /// Applies a recognizer's verdict. Verdicts from non-members are logged
    /// and dropped.
    ///
    /// Parallel members only understand `Accept` and `Reject`; a parallel
    /// `Pending` disposal is ignored. Parallel recognizers have no deferral
    /// protocol (known limitation).
    pub fn handle_disposal(&mut self, recognizer: &RecognizerHandle, disposal: GestureDisposal) {
        self.prune();
        if !self.existed(recognizer) {
            error!(
                "recognizer {} is not a member of scope {}, dropping {:?}",
                recognizer.borrow().debug_name(),
                self.touch_id,
                disposal
            );
            return;
        }

        let priority = recognizer.borrow().priority();
        if priority == GesturePriority::Parallel {
            self.handle_parallel_disposal(recognizer, disposal);
            return;
        }

        match disposal {
            GestureDisposal::Accept => self.handle_accept_disposal(recognizer),
            GestureDisposal::Pending => self.handle_pending_disposal(recognizer),
            GestureDisposal::Reject => self.handle_reject_disposal(recognizer),
        }
    }

    fn handle_parallel_disposal(
        &mut self,
        recognizer: &RecognizerHandle,
        disposal: GestureDisposal,
    ) {
        match disposal {
            GestureDisposal::Accept => {
                remove_from(&mut self.parallel, recognizer);
                let mut member = recognizer.borrow_mut();
                member.set_referee_state(RefereeState::Succeed);
                member.on_accepted(self.touch_id);
            }
            GestureDisposal::Reject => {
                remove_from(&mut self.parallel, recognizer);
                let mut member = recognizer.borrow_mut();
                member.set_referee_state(RefereeState::Fail);
                member.on_rejected(self.touch_id);
            }
            // Parallel members have no pending protocol.
            GestureDisposal::Pending => {}
        }
    }

    fn handle_accept_disposal(&mut self, recognizer: &RecognizerHandle) {
        if self.check_need_blocked(recognizer) {
            info!(
                "recognizer {} blocked in scope {}",
                recognizer.borrow().debug_name(),
                self.touch_id
            );
            recognizer
                .borrow_mut()
                .set_referee_state(RefereeState::Blocked);
            return;
        }

        info!(
            "recognizer {} accepted in scope {}",
            recognizer.borrow().debug_name(),
            self.touch_id
        );
        self.accept_gesture(recognizer);
    }

    fn handle_pending_disposal(&mut self, recognizer: &RecognizerHandle) {
        if self.check_need_blocked(recognizer) {
            recognizer
                .borrow_mut()
                .set_referee_state(RefereeState::Blocked);
            return;
        }

        let mut member = recognizer.borrow_mut();
        member.set_referee_state(RefereeState::Pending);
        member.on_pending(self.touch_id);
    }

    fn handle_reject_disposal(&mut self, recognizer: &RecognizerHandle) {
        let prev_state = recognizer.borrow().referee_state();
        {
            let mut member = recognizer.borrow_mut();
            member.set_referee_state(RefereeState::Fail);
            member.on_rejected(self.touch_id);
        }
        self.remove_and_unblock(prev_state == RefereeState::Pending, recognizer);
    }

    /// Removes a high or low member and re-runs arbitration for anyone the
    /// departure may have unblocked: draining the high tier unblocks low, and
    /// removing a member that was pending unblocks its own tier.
    fn remove_and_unblock(&mut self, was_pending: bool, recognizer: &RecognizerHandle) {
        let priority = recognizer.borrow().priority();
        if priority == GesturePriority::High {
            remove_from(&mut self.high, recognizer);
            if self.high.is_empty() {
                self.unblock(GesturePriority::Low);
                return;
            }
            if was_pending {
                self.unblock(GesturePriority::High);
            }
        } else {
            remove_from(&mut self.low, recognizer);
            if was_pending {
                self.unblock(GesturePriority::Low);
            }
        }
    }

    /// A member must wait when it is low priority while any high member is
    /// still in play, or when a sibling in its own tier is pending.
    fn check_need_blocked(&self, recognizer: &RecognizerHandle) -> bool {
        let priority = recognizer.borrow().priority();
        if priority == GesturePriority::Low && !self.high.is_empty() {
            debug!(
                "recognizer {} is low priority and the high tier is undecided",
                recognizer.borrow().debug_name()
            );
            return true;
        }

        self.list(priority)
            .iter()
            .filter_map(WeakRecognizer::upgrade)
            .any(|member| {
                !Rc::ptr_eq(&member, recognizer)
                    && member.borrow().referee_state() == RefereeState::Pending
            })
    }

    /// Winner-take-all step. Every losing member in the winner's tier is
    /// rejected and failed; a winning high member additionally clears the
    /// whole low tier. Losers are notified before the winner so side effects
    /// keyed to notification order stay stable.
    fn accept_gesture(&mut self, winner: &RecognizerHandle) {
        let priority = winner.borrow().priority();
        if priority == GesturePriority::Low {
            remove_from(&mut self.low, winner);
            self.reject_remaining(GesturePriority::Low);
        } else {
            remove_from(&mut self.high, winner);
            self.reject_remaining(GesturePriority::High);
            self.reject_remaining(GesturePriority::Low);
        }

        let mut member = winner.borrow_mut();
        member.set_referee_state(RefereeState::Succeed);
        member.on_accepted(self.touch_id);
    }

    /// Drains a tier and rejects every live member it held. The list is
    /// cleared before any callback runs, so callbacks never observe a list
    /// that is mid-iteration.
    fn reject_remaining(&mut self, priority: GesturePriority) {
        let members: Vec<RecognizerHandle> = self
            .list_mut(priority)
            .drain(..)
            .filter_map(|weak| weak.upgrade())
            .collect();
        for member in members {
            let mut member = member.borrow_mut();
            member.on_rejected(self.touch_id);
            member.set_referee_state(RefereeState::Fail);
        }
    }

    /// Gives the first blocked member of a tier another chance. A member
    /// whose own detector already concluded is promoted straight through the
    /// winner path; otherwise it is parked as pending until the next round.
    fn unblock(&mut self, priority: GesturePriority) {
        let blocked = self
            .list(priority)
            .iter()
            .filter_map(WeakRecognizer::upgrade)
            .find(|member| member.borrow().referee_state() == RefereeState::Blocked);
        let Some(member) = blocked else {
            debug!("no blocked member in scope {}", self.touch_id);
            return;
        };

        let detected = member.borrow().detect_state() == DetectState::Detected;
        if detected {
            self.accept_gesture(&member);
            return;
        }

        let mut member = member.borrow_mut();
        member.set_referee_state(RefereeState::Pending);
        member.on_pending(self.touch_id);
    }

    /// Discards the whole arbitration: every live member across all three
    /// tiers receives `on_rejected` and the lists are cleared.
    pub fn force_close(&mut self) {
        debug!("force closing scope {}", self.touch_id);
        for priority in [
            GesturePriority::Low,
            GesturePriority::High,
            GesturePriority::Parallel,
        ] {
            let members: Vec<RecognizerHandle> = self
                .list_mut(priority)
                .drain(..)
                .filter_map(|weak| weak.upgrade())
                .collect();
            for member in members {
                member.borrow_mut().on_rejected(self.touch_id);
            }
        }
    }

    /// True if any live member has a deferred verdict outstanding.
    pub fn is_pending(&self) -> bool {
        self.live_members()
            .any(|member| member.borrow().referee_state() == RefereeState::Pending)
    }

    /// True if no live member remains in any tier.
    pub fn is_empty(&self) -> bool {
        self.live_members().next().is_none()
    }

    /// True if the recognizer is currently a member of its tier list.
    pub fn existed(&self, recognizer: &RecognizerHandle) -> bool {
        let target = Rc::downgrade(recognizer);
        let priority = recognizer.borrow().priority();
        self.list(priority).iter().any(|weak| weak.ptr_eq(&target))
    }

    fn live_members(&self) -> impl Iterator<Item = RecognizerHandle> + '_ {
        self.low
            .iter()
            .chain(self.high.iter())
            .chain(self.parallel.iter())
            .filter_map(WeakRecognizer::upgrade)
    }

    fn list(&self, priority: GesturePriority) -> &Vec<WeakRecognizer> {
        match priority {
            GesturePriority::Parallel => &self.parallel,
            GesturePriority::High => &self.high,
            GesturePriority::Low => &self.low,
        }
    }

    fn list_mut(&mut self, priority: GesturePriority) -> &mut Vec<WeakRecognizer> {
        match priority {
            GesturePriority::Parallel => &mut self.parallel,
            GesturePriority::High => &mut self.high,
            GesturePriority::Low => &mut self.low,
        }
    }

    /// Drops entries whose owning handle has been freed. A recognizer torn
    /// down without `del_member` is indistinguishable from a non-member.
    fn prune(&mut self) {
        self.parallel.retain(|weak| weak.upgrade().is_some());
        self.high.retain(|weak| weak.upgrade().is_some());
        self.low.retain(|weak| weak.upgrade().is_some());
    }
}

fn remove_from(list: &mut Vec<WeakRecognizer>, target: &RecognizerHandle) {
    let target = Rc::downgrade(target);
    list.retain(|weak| !weak.ptr_eq(&target));
}
