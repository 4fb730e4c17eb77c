//! Per-step telemetry.
//!
//! Provides:
//! - `StepSink` trait for composable backends
//! - `ConsoleSink` for one-line-per-step output via `tracing`
//! - `JsonlSink` for appending records to a file
//! - `CompositeSink` for multi-backend fan-out
//! - `MemorySink` for assertions in tests

mod console;
mod jsonl;
mod record;
mod sink;

pub use console::ConsoleSink;
pub use jsonl::JsonlSink;
pub use record::{EpisodeSummary, StepRecord};
pub use sink::{CompositeSink, MemorySink, NoOpSink, StepSink};
