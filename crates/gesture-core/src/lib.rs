//! Gesture disambiguation engine.
//!
//! Multiple gesture recognizers can watch the same touch sequence; this
//! crate arbitrates among them. Each recognizer submits a verdict
//! ([`GestureDisposal`]) for a touch id, and the [`GestureReferee`] enforces
//! single-winner semantics across the competing priority tiers while
//! parallel recognizers resolve independently.

mod event;
mod recognizer;
mod referee;
mod scope;
mod types;

pub use event::*;
pub use recognizer::*;
pub use referee::*;
pub use scope::*;
pub use types::*;

pub mod prelude {
    pub use crate::event::{TouchHandler, TouchPhase, TouchPoint};
    pub use crate::recognizer::{GestureRecognizer, RecognizerHandle};
    pub use crate::referee::GestureReferee;
    pub use crate::types::{DetectState, GestureDisposal, GesturePriority, RefereeState, TouchId};
}
