//! Testing utilities and harness for the gesture arbitration engine.

pub mod driver;
pub mod probe;

pub use driver::*;
pub use probe::*;

pub mod prelude {
    pub use crate::driver::TouchDriver;
    pub use crate::probe::{EventLog, ProbeRecognizer};
}
