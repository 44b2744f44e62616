//! Named stages of the generate → clean → analyze workflow, used for log
//! banners and error context.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stages of the workflow, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Synthesizing and writing the dirty dataset
    Generation,
    /// Reading the CSV
    Loading,
    /// Inspecting the table (shape, types, nulls, describe)
    Profiling,
    /// Coercing text columns to their types
    TypeCorrection,
    /// Filling missing quantity and status values
    Imputation,
    /// Dropping rows without price or customer
    MissingKeys,
    /// Removing duplicate rows
    Deduplication,
    /// Removing quantity outliers
    OutlierFiltering,
    /// Adding `total_sale`
    Derivation,
    /// Aggregate queries
    Analysis,
    /// Writing SVG charts
    ChartRendering,
    /// Writing the JSON report
    ReportGeneration,
}

impl PipelineStage {
    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Generation => "Generating Dataset",
            Self::Loading => "Loading Dataset",
            Self::Profiling => "Profiling Dataset",
            Self::TypeCorrection => "Correcting Types",
            Self::Imputation => "Imputing Values",
            Self::MissingKeys => "Dropping Incomplete Rows",
            Self::Deduplication => "Removing Duplicates",
            Self::OutlierFiltering => "Filtering Outliers",
            Self::Derivation => "Deriving Revenue",
            Self::Analysis => "Analyzing Sales",
            Self::ChartRendering => "Rendering Charts",
            Self::ReportGeneration => "Generating Reports",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

static_assertions::assert_impl_all!(PipelineStage: Send, Sync, Copy);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(PipelineStage::OutlierFiltering.to_string(), "Filtering Outliers");
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&PipelineStage::MissingKeys).unwrap();
        assert_eq!(json, "\"missing_keys\"");
    }
}
