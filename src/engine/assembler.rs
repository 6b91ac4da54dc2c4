use super::series::{build_similar_series, split_target_records};
use crate::error::{FoldcastError, Result};
use crate::types::{
    CustomerSeries, Fold, FoldPlanEntry, RawRecord, TargetCustomerFolds, UsageLookup,
    UsageTypeFoldSet,
};
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Assemble the full fold set: fold plan x usage types x target customers.
///
/// Target customers are independent of each other, so they are processed
/// in parallel; output order follows the (sorted) lookup order regardless
/// of scheduling.
pub fn assemble_folds(
    training_lookup: &UsageLookup,
    target_lookup: &UsageLookup,
    plan: &[FoldPlanEntry],
) -> Result<Vec<TargetCustomerFolds>> {
    if target_lookup.is_empty() {
        return Err(FoldcastError::NoTargetCustomer);
    }

    let results: Vec<TargetCustomerFolds> = target_lookup
        .par_iter()
        .filter_map(|(customer_id, usage_types)| {
            assemble_target_customer(customer_id, usage_types, training_lookup, plan)
        })
        .collect();

    Ok(results)
}

fn assemble_target_customer(
    customer_id: &str,
    usage_types: &BTreeMap<String, Vec<RawRecord>>,
    training_lookup: &UsageLookup,
    plan: &[FoldPlanEntry],
) -> Option<TargetCustomerFolds> {
    if usage_types.is_empty() {
        log::warn!("Target customer {customer_id} has no usage types, skipping");
        return None;
    }
    log::info!(
        "Processing target customer {customer_id} with {} usage type(s)",
        usage_types.len()
    );

    let usage_type_folds: Vec<UsageTypeFoldSet> = usage_types
        .iter()
        .filter_map(|(usage_type, records)| {
            if records.is_empty() {
                log::warn!(
                    "Target customer {customer_id} has no records for usage type {usage_type}, skipping"
                );
                return None;
            }

            let similar_customers = similar_series_for(training_lookup, usage_type);
            log::debug!(
                "Found {} similar customer(s) with usage type {usage_type}",
                similar_customers.len()
            );

            let folds: Vec<Fold> = plan
                .iter()
                .filter_map(|entry| {
                    let target_customer = split_target_records(records, entry, usage_type)?;
                    Some(Fold {
                        fold_id: entry.fold_id.clone(),
                        random_data_seed: entry.random_data_seed,
                        description: entry.description.clone(),
                        fold_type: entry.fold_type,
                        // Independent copy per fold: a consumer may mutate
                        // one fold's series without touching another's.
                        similar_customers: similar_customers.clone(),
                        target_customer,
                    })
                })
                .collect();

            Some(UsageTypeFoldSet {
                usage_type: usage_type.clone(),
                folds,
            })
        })
        .collect();

    Some(TargetCustomerFolds {
        target_customer_id: customer_id.to_string(),
        usage_type_folds,
    })
}

/// Similar-customer series restricted to customers that have data for the
/// given usage type. Customers lacking it are excluded, not zero-filled.
fn similar_series_for(training_lookup: &UsageLookup, usage_type: &str) -> Vec<CustomerSeries> {
    training_lookup
        .values()
        .filter_map(|usage_types| {
            let records = usage_types.get(usage_type)?;
            build_similar_series(records, usage_type)
        })
        .collect()
}
