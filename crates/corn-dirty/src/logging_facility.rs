//! Structured logging facility for corn
//!
//! - Single initialization point via `init(profile)`
//! - Operation lifecycle macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for asserting on emitted events
//!
//! Boundary operations (see [`crate::sweep`]) own lifecycle logging. The map
//! itself only emits `tracing::debug!`/`tracing::trace!` details.
//!
//! # Usage
//!
//! ```rust
//! use corn_dirty::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
