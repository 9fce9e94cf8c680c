//! Concrete gesture detectors built on the arbitration engine.
//!
//! Each recognizer consumes raw [`TouchPoint`] samples through
//! [`TouchHandler`] and emits verdicts the dispatch loop forwards to the
//! referee. Arbitration outcomes come back through the
//! [`GestureRecognizer`] callbacks and are surfaced to the application via
//! [`GestureCallbacks`].
//!
//! [`TouchPoint`]: gesture_core::TouchPoint
//! [`TouchHandler`]: gesture_core::TouchHandler
//! [`GestureRecognizer`]: gesture_core::GestureRecognizer

mod core;
mod event;
mod pan;
mod pinch;
mod tap;

pub use crate::core::*;
pub use event::*;
pub use pan::*;
pub use pinch::*;
pub use tap::*;

pub mod prelude {
    pub use crate::event::{GestureCallbacks, GestureEvent};
    pub use crate::pan::{PanDirection, PanRecognizer};
    pub use crate::pinch::PinchRecognizer;
    pub use crate::tap::TapRecognizer;
}
