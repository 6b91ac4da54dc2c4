use crate::engine::calendar::BillingMonth;
use crate::engine::sequence::month_order;
use crate::types::{GroupedDataset, RawRecord, UsageDataset, UsageLookup};

const UNKNOWN_USAGE_TYPE: &str = "Unknown";

/// Bucket both flat datasets by customer and usage type.
pub fn group_datasets(input: &UsageDataset) -> GroupedDataset {
    GroupedDataset {
        training_dataset: group_records(&input.training_dataset),
        target_dataset: group_records(&input.target_dataset),
    }
}

/// Bucket records into customer -> usage type -> records, with each bucket
/// sorted by parsed month ascending. Records with a missing or blank
/// billing month are dropped here; malformed-but-present months survive
/// and are ranked last by the engine.
pub fn group_records(records: &[RawRecord]) -> UsageLookup {
    let mut lookup = UsageLookup::new();

    for record in records {
        let has_month = record
            .billing_month
            .as_deref()
            .is_some_and(|m| !m.trim().is_empty());
        if !has_month {
            log::warn!(
                "Dropping record for customer {} with missing billing month",
                record.customer_id
            );
            continue;
        }

        let usage_type = record
            .usage_type
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(UNKNOWN_USAGE_TYPE)
            .to_string();

        lookup
            .entry(record.customer_id.clone())
            .or_default()
            .entry(usage_type)
            .or_default()
            .push(record.clone());
    }

    for usage_types in lookup.values_mut() {
        for bucket in usage_types.values_mut() {
            sort_bucket(bucket);
        }
    }

    lookup
}

fn sort_bucket(bucket: &mut Vec<RawRecord>) {
    let mut decorated: Vec<(Option<BillingMonth>, RawRecord)> = std::mem::take(bucket)
        .into_iter()
        .map(|record| (BillingMonth::parse(record.billing_month.as_deref()), record))
        .collect();
    decorated.sort_by(|a, b| month_order(a.0, b.0));
    *bucket = decorated.into_iter().map(|(_, record)| record).collect();
}
