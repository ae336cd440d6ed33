//! SprintLens: sprint/backlog lifecycle and time-accounting engine.
//!
//! The engine behind a sprint-tracking UI: work items move between a
//! product backlog and per-sprint backlogs, free-form duration tokens
//! ("2w 4d 6h 45m") normalize to hours, and burndown/accumulation
//! series are derived for chart consumers. All state lives in an
//! injected [`store::Store`] holding three whole-collection keys;
//! every mutation is one validated read-modify-write.

pub mod analysis;
pub mod commands;
pub mod error;
pub mod models;
pub mod store;
pub mod tracker;

pub use error::TrackerError;
pub use tracker::Tracker;
