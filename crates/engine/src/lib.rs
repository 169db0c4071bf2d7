//! `taxgap-engine` — Checklist/record/grade reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded file contents, builds immutable
//! indices, returns classified result rows. No CLI or filesystem dependencies.

pub mod checklist;
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod grades;
pub mod infer;
pub mod model;
pub mod names;
pub mod records;
pub mod summary;

pub use checklist::ChecklistRegistry;
pub use config::GapConfig;
pub use engine::run;
pub use error::GapError;
pub use grades::GradeIndex;
pub use model::{GapInput, GapResult, ResultRow, SpeciesCategory};
pub use records::RecordIndex;
