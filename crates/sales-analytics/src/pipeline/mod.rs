//! Pipeline module.
//!
//! This module provides the cleaning pipeline and related components.

mod builder;
pub mod outliers;
pub mod stage;

pub use builder::{Pipeline, PipelineBuilder, PipelineResult};
pub use outliers::{OutlierHandler, OutlierRemoval};
pub use stage::PipelineStage;
