//! Small shared helpers.

mod timing;

pub use timing::elapsed_ms;
