//! Core types shared by the generator, the cleaning pipeline and the reports.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Order schema
// =============================================================================

/// Column names of the order table, in file order.
pub mod columns {
    pub const ORDER_ID: &str = "order_id";
    pub const PURCHASE_DATE: &str = "purchase_date";
    pub const CUSTOMER_ID: &str = "customer_id";
    pub const PRODUCT: &str = "product";
    pub const CATEGORY: &str = "category";
    pub const QUANTITY: &str = "quantity";
    pub const UNIT_PRICE: &str = "unit_price";
    pub const DELIVERY_STATUS: &str = "delivery_status";
    /// Derived after cleaning.
    pub const TOTAL_SALE: &str = "total_sale";

    /// The fixed column order of the interchange CSV.
    pub const ORDER_COLUMNS: [&str; 8] = [
        ORDER_ID,
        PURCHASE_DATE,
        CUSTOMER_ID,
        PRODUCT,
        CATEGORY,
        QUANTITY,
        UNIT_PRICE,
        DELIVERY_STATUS,
    ];
}

/// Target type a raw text column is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Integer,
    Decimal,
    Date,
    Text,
}

impl ColumnKind {
    /// Kind of each order column after cleaning.
    pub fn of(column: &str) -> ColumnKind {
        match column {
            columns::ORDER_ID | columns::CUSTOMER_ID | columns::QUANTITY => ColumnKind::Integer,
            columns::UNIT_PRICE | columns::TOTAL_SALE => ColumnKind::Decimal,
            columns::PURCHASE_DATE => ColumnKind::Date,
            _ => ColumnKind::Text,
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnKind::Integer => "integer",
            ColumnKind::Decimal => "decimal",
            ColumnKind::Date => "date",
            ColumnKind::Text => "text",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Catalogue
// =============================================================================

/// A product the store sells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Product {
    pub name: &'static str,
    pub category: &'static str,
    pub unit_price: f64,
}

/// Every product the generator can draw from.
pub const PRODUCT_CATALOGUE: [Product; 5] = [
    Product {
        name: "Smartphone",
        category: "Electronics",
        unit_price: 5999.90,
    },
    Product {
        name: "Notebook",
        category: "Electronics",
        unit_price: 8500.00,
    },
    Product {
        name: "Headphones",
        category: "Accessories",
        unit_price: 799.50,
    },
    Product {
        name: "Smartwatch",
        category: "Accessories",
        unit_price: 2100.00,
    },
    Product {
        name: "Mechanical Keyboard",
        category: "Accessories",
        unit_price: 850.00,
    },
];

/// Delivery state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryStatus {
    Delivered,
    Pending,
    Cancelled,
}

impl DeliveryStatus {
    /// All statuses with their sampling weights.
    pub const WEIGHTED: [(DeliveryStatus, f64); 3] = [
        (DeliveryStatus::Delivered, 0.80),
        (DeliveryStatus::Pending, 0.15),
        (DeliveryStatus::Cancelled, 0.05),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delivered => "Delivered",
            Self::Pending => "Pending",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Profiling
// =============================================================================

/// Numeric description of a column, the `describe()` of a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericDescription {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub median: Option<f64>,
    pub max: Option<f64>,
}

/// Description of a text column: how many values, how many distinct, and the
/// most frequent one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalDescription {
    pub count: usize,
    pub unique: usize,
    pub top: Option<String>,
    pub freq: usize,
}

/// Range of a date column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateDescription {
    pub count: usize,
    pub min: Option<chrono::NaiveDate>,
    pub max: Option<chrono::NaiveDate>,
}

/// Profile of a single column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub dtype: String,
    /// Type the column had in the file, when it was profiled after coercion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_dtype: Option<String>,
    pub null_count: usize,
    pub null_percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric: Option<NumericDescription>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categorical: Option<CategoricalDescription>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateDescription>,
}

/// Profile of a whole table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetProfile {
    pub shape: (usize, usize),
    pub column_profiles: Vec<ColumnProfile>,
    pub duplicate_count: usize,
    pub duplicate_percentage: f64,
}

impl DatasetProfile {
    /// Total number of null cells.
    pub fn total_nulls(&self) -> usize {
        self.column_profiles.iter().map(|c| c.null_count).sum()
    }

    /// Look up a column profile by name.
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.column_profiles.iter().find(|c| c.name == name)
    }
}

// =============================================================================
// Cleaning summary
// =============================================================================

/// What the cleaning pipeline did, step by step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleaningSummary {
    /// Total execution time in milliseconds.
    pub duration_ms: u64,

    pub rows_before: usize,
    pub rows_after: usize,

    /// Values turned into nulls during coercion, per column.
    pub coerced_to_null: HashMap<String, usize>,

    /// Rows dropped because `unit_price` or `customer_id` was missing.
    pub rows_dropped_missing: usize,

    pub duplicates_removed: usize,

    pub outliers_removed: usize,

    /// Bounds the final outlier pass used, if it ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outlier_bounds: Option<(f64, f64)>,

    /// Human-readable log of every step.
    pub steps: Vec<String>,

    pub column_summaries: Vec<ColumnSummary>,

    pub warnings: Vec<String>,
}

impl CleaningSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows_removed(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }

    /// Record a step in the log.
    pub fn push_step(&mut self, step: impl Into<String>) {
        self.steps.push(step.into());
    }
}

/// Per-column record of what cleaning changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    pub original_type: String,
    pub final_type: String,
    pub missing_before: usize,
    pub missing_after: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imputation_method: Option<String>,
    pub values_coerced: usize,
}

// =============================================================================
// Aggregates
// =============================================================================

/// One bar of a grouped aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTotal<T> {
    pub key: String,
    pub value: T,
}

/// Revenue of one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRevenue {
    pub date: chrono::NaiveDate,
    pub revenue: f64,
}

/// Count and share of one delivery status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusShare {
    pub status: String,
    pub count: usize,
    pub percentage: f64,
}

/// Every aggregate the analysis stage computes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesAnalysis {
    pub total_revenue: f64,
    pub revenue_by_category: Vec<GroupTotal<f64>>,
    pub units_by_product: Vec<GroupTotal<i64>>,
    pub daily_revenue: Vec<DailyRevenue>,
    pub status_distribution: Vec<StatusShare>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_kind_of() {
        assert_eq!(ColumnKind::of(columns::QUANTITY), ColumnKind::Integer);
        assert_eq!(ColumnKind::of(columns::UNIT_PRICE), ColumnKind::Decimal);
        assert_eq!(ColumnKind::of(columns::PURCHASE_DATE), ColumnKind::Date);
        assert_eq!(ColumnKind::of(columns::PRODUCT), ColumnKind::Text);
    }

    #[test]
    fn test_status_weights_sum_to_one() {
        let total: f64 = DeliveryStatus::WEIGHTED.iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_catalogue_categories() {
        let electronics = PRODUCT_CATALOGUE
            .iter()
            .filter(|p| p.category == "Electronics")
            .count();
        assert_eq!(electronics, 2);
        assert_eq!(PRODUCT_CATALOGUE.len(), 5);
    }

    #[test]
    fn test_cleaning_summary_rows_removed() {
        let mut summary = CleaningSummary::new();
        summary.rows_before = 103;
        summary.rows_after = 96;
        assert_eq!(summary.rows_removed(), 7);
    }
}
