//! Imputation module for handling missing values.
//!
//! Statistical imputation (median, mode) for the order columns.

mod statistical;

pub use statistical::StatisticalImputer;
