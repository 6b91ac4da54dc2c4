use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Grouped records: customer_id -> usage_type -> records.
///
/// BTreeMap keeps iteration (and therefore output) order deterministic.
pub type UsageLookup = BTreeMap<String, BTreeMap<String, Vec<RawRecord>>>;

/// Usage value as it arrives from billing exports: sometimes a number,
/// sometimes a string holding one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UsageValue {
    Number(f64),
    Text(String),
}

impl UsageValue {
    /// Coerce to a finite f64; anything else is treated as missing.
    pub fn as_finite(&self) -> Option<f64> {
        match self {
            UsageValue::Number(n) => n.is_finite().then_some(*n),
            UsageValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }
}

/// One raw billing-usage row. Every field beyond the ids may be missing
/// or malformed in real exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub customer_id: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub usage_type: Option<String>,
    #[serde(default)]
    pub billing_month: Option<String>,
    #[serde(default)]
    pub total_credit_usage: Option<UsageValue>,
}

/// Record after sequencing: canonical month string (raw string kept when
/// unparsable), 0-based rank within its sequence, coerced usage value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub billing_month: Option<String>,
    pub month_index: usize,
    pub total_credit_usage: Option<f64>,
}

/// Full history of a similar (non-target) customer for one usage type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerSeries {
    pub customer_id: String,
    pub customer_name: String,
    pub usage_type: String,
    pub records: Vec<NormalizedRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoldType {
    Validation,
    Production,
}

/// One entry of the fold plan. All three boundary fields are None for the
/// production fold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoldPlanEntry {
    pub fold_id: String,
    pub random_data_seed: u64,
    pub description: String,
    pub fold_type: FoldType,
    pub training_end_month_index: Option<usize>,
    pub validation_month_index: Option<usize>,
    pub test_month_indices: Option<Vec<Option<usize>>>,
}

/// Target customer's records split temporally for one fold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetSplit {
    pub customer_id: String,
    pub customer_name: String,
    pub usage_type: String,
    pub training_records: Vec<NormalizedRecord>,
    pub validation_record: Option<NormalizedRecord>,
    pub test_months: Vec<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_records: Option<Vec<Option<NormalizedRecord>>>,
}

/// A complete fold: static similar-customer context plus the target split.
/// Each fold owns its own copy of the similar series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fold {
    pub fold_id: String,
    pub random_data_seed: u64,
    pub description: String,
    pub fold_type: FoldType,
    pub similar_customers: Vec<CustomerSeries>,
    pub target_customer: TargetSplit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageTypeFoldSet {
    pub usage_type: String,
    pub folds: Vec<Fold>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetCustomerFolds {
    pub target_customer_id: String,
    pub usage_type_folds: Vec<UsageTypeFoldSet>,
}

/// Flat input datasets as exported upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsageDataset {
    #[serde(default)]
    pub training_dataset: Vec<RawRecord>,
    #[serde(default)]
    pub target_dataset: Vec<RawRecord>,
}

/// Both datasets bucketed by customer and usage type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupedDataset {
    pub training_dataset: UsageLookup,
    pub target_dataset: UsageLookup,
}

/// Forward/reverse obfuscation mappings plus id -> original name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NameMapping {
    pub mapping: BTreeMap<String, String>,
    pub reverse_mapping: BTreeMap<String, String>,
    pub customer_id_to_name: BTreeMap<String, String>,
}
