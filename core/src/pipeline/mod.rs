// storefront/src/pipeline/mod.rs

//! A small synchronous workflow engine: ordered, named steps with
//! before/on/after handlers operating on a mutable context.

pub mod control;
pub mod definition;
pub mod execution;
pub mod hooks;
pub mod step;

pub use control::{PipelineControl, PipelineResult};
pub use definition::{Handler, Pipeline};
pub use step::{SkipCondition, StepDef};
