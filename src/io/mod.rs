//! Output handling for the CLI.
//!
//! Human-readable summaries go to stderr; `--json` prints an [`Envelope`] on
//! stdout.

pub mod envelope;

pub use envelope::{EntityType, Envelope, ErrorDetails, MessageType, Meta, ResultCode, Status};
