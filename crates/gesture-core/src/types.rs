//! Shared identifiers and verdict types for gesture arbitration.

/// Identifies one continuous finger-down-to-up touch sequence.
pub type TouchId = u64;

/// Where a recognizer stands in the arbitration for one touch sequence.
///
/// `Succeed` and `Fail` are terminal within a scope; at most one recognizer
/// per competing tier reaches `Succeed` for a given touch id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RefereeState {
    /// Not yet entered into any arbitration.
    Ready,
    /// Registered with a scope, no verdict submitted yet.
    Detecting,
    /// The recognizer asked to defer its verdict until more input arrives.
    Pending,
    /// Won the arbitration.
    Succeed,
    /// Lost the arbitration.
    Fail,
    /// Verdict withheld until a higher-priority or pending sibling resolves.
    Blocked,
}

/// Competition class for recognizers sharing a touch id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GesturePriority {
    /// Never competes; accepted or rejected independently of all siblings.
    Parallel,
    /// Competes ahead of `Low`; an accepted high member preempts every low member.
    High,
    /// Competes only once no high member remains undecided.
    Low,
}

/// A recognizer's verdict for one touch sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureDisposal {
    /// The gesture was recognized; claim the touch sequence.
    Accept,
    /// Undecided; keep the claim open and wait for more input.
    Pending,
    /// The gesture cannot match this touch sequence.
    Reject,
}

/// Progress of a recognizer's own detector, independent of arbitration.
///
/// The referee reads this when unblocking: a blocked member whose detector
/// already concluded (`Detected`) is promoted straight to the winner path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DetectState {
    /// Not enough touch points to start matching.
    Ready,
    /// Watching movement, no conclusion yet.
    Detecting,
    /// The detector concluded the gesture is happening.
    Detected,
}
