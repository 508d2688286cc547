//! Scalar value types shared by the project and task domains.

mod error;
mod priority;
mod progress;

pub use error::{InvalidProgress, ParsePriorityError};
pub use priority::Priority;
pub use progress::Progress;
