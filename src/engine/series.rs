use super::calendar::BillingMonth;
use super::plan::TEST_HORIZON;
use super::sequence::{normalize, sequence};
use crate::types::{CustomerSeries, FoldPlanEntry, NormalizedRecord, RawRecord, TargetSplit};

/// Normalize a similar customer's full history for one usage type.
/// Identity fields come from the first sorted record.
pub fn build_similar_series(records: &[RawRecord], usage_type: &str) -> Option<CustomerSeries> {
    let sorted = sequence(records);
    let first = sorted.first()?.raw;
    let normalized = normalize(&sorted);

    Some(CustomerSeries {
        customer_id: first.customer_id.clone(),
        customer_name: first.customer_name.clone(),
        usage_type: usage_type.to_string(),
        records: normalized,
    })
}

/// Split the target customer's records for one fold-plan entry.
///
/// Production folds train on everything and report the three calendar
/// months after the last record. Validation folds take the training
/// prefix, the validation point, and up to three test slots; test months
/// fall back to calendar arithmetic from the validation month when no
/// record exists that far out.
pub fn split_target_records(
    records: &[RawRecord],
    plan_entry: &FoldPlanEntry,
    usage_type: &str,
) -> Option<TargetSplit> {
    let sorted = sequence(records);
    let first = sorted.first()?.raw;
    let formatted = normalize(&sorted);

    let customer_id = first.customer_id.clone();
    let customer_name = first.customer_name.clone();

    let Some(training_end) = plan_entry.training_end_month_index else {
        // Production fold: everything trains, test months are the next
        // three calendar months after the last record.
        let last_month = sorted.last().and_then(|entry| entry.month);
        let test_months = (1..=TEST_HORIZON as i32)
            .map(|offset| last_month.map(|m| m.add_months(offset).format()))
            .collect();

        return Some(TargetSplit {
            customer_id,
            customer_name,
            usage_type: usage_type.to_string(),
            training_records: formatted,
            validation_record: None,
            test_months,
            test_records: None,
        });
    };

    let training_records: Vec<NormalizedRecord> =
        formatted.iter().take(training_end + 1).cloned().collect();
    let validation_record = plan_entry
        .validation_month_index
        .and_then(|index| formatted.get(index))
        .cloned();

    let test_indices = plan_entry.test_month_indices.as_deref().unwrap_or(&[]);
    let test_records: Vec<Option<NormalizedRecord>> = test_indices
        .iter()
        .map(|slot| slot.and_then(|index| formatted.get(index)).cloned())
        .collect();

    let validation_month = validation_record
        .as_ref()
        .and_then(|record| BillingMonth::parse(record.billing_month.as_deref()));
    let test_months = test_records
        .iter()
        .enumerate()
        .map(|(i, record)| match record {
            Some(record) => record.billing_month.clone(),
            None => validation_month.map(|m| m.add_months(i as i32 + 1).format()),
        })
        .collect();

    Some(TargetSplit {
        customer_id,
        customer_name,
        usage_type: usage_type.to_string(),
        training_records,
        validation_record,
        test_months,
        test_records: Some(test_records),
    })
}
