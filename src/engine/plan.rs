use super::seed::SeedSource;
use crate::error::{FoldcastError, Result};
use crate::types::{FoldPlanEntry, FoldType, UsageLookup};
use serde::{Deserialize, Serialize};

/// Shortest usable training prefix.
const MIN_TRAINING_MONTHS: usize = 3;
/// Forward test horizon of every fold.
pub const TEST_HORIZON: usize = 3;
/// Hard ceiling on auto-derived fold counts.
const MAX_FOLDS: usize = 10;

/// Maximum record count across all target customers and usage types.
/// This is the month budget the fold plan is sized against.
pub fn total_months(target_lookup: &UsageLookup) -> usize {
    target_lookup
        .values()
        .flat_map(|usage_types| usage_types.values())
        .map(|records| records.len())
        .max()
        .unwrap_or(0)
}

/// How many folds the available history supports.
pub fn optimal_folds(total_months: usize) -> usize {
    if total_months < 8 {
        return 2;
    }
    ((total_months - 6) / 2).clamp(2, MAX_FOLDS)
}

/// Months required for a given fold count: minimum training prefix, one
/// validation point per validation fold, and the test horizon.
fn months_required(num_folds: usize) -> usize {
    MIN_TRAINING_MONTHS + num_folds + TEST_HORIZON
}

/// Outcome of checking a caller-requested fold count against the data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum OverrideOutcome {
    Accepted,
    RejectedTooLow {
        requested: usize,
        minimum: usize,
    },
    RejectedInsufficientData {
        requested: usize,
        required_months: usize,
        available_months: usize,
    },
}

/// Resolved fold count plus how the request was handled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoldCountResolution {
    pub num_folds: usize,
    pub outcome: OverrideOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Validate a requested fold count against the data-derived minimum,
/// falling back to the minimum when the request cannot be honored. Never
/// fails; rejections carry a human-readable reason.
pub fn resolve_num_folds(requested: Option<usize>, total_months: usize) -> FoldCountResolution {
    let minimum = optimal_folds(total_months);
    let Some(requested) = requested else {
        return FoldCountResolution {
            num_folds: minimum,
            outcome: OverrideOutcome::Accepted,
            reason: None,
        };
    };

    if requested < minimum {
        let reason = format!(
            "Requested num_folds {requested} is below the calculated minimum {minimum}; using {minimum}"
        );
        log::warn!("{reason}");
        return FoldCountResolution {
            num_folds: minimum,
            outcome: OverrideOutcome::RejectedTooLow { requested, minimum },
            reason: Some(reason),
        };
    }

    let required_months = months_required(requested);
    if total_months < required_months {
        let reason = format!(
            "Requested num_folds {requested} needs at least {required_months} months of history, \
             only {total_months} available; using {minimum}"
        );
        log::warn!("{reason}");
        return FoldCountResolution {
            num_folds: minimum,
            outcome: OverrideOutcome::RejectedInsufficientData {
                requested,
                required_months,
                available_months: total_months,
            },
            reason: Some(reason),
        };
    }

    FoldCountResolution {
        num_folds: requested,
        outcome: OverrideOutcome::Accepted,
        reason: None,
    }
}

/// Build the walk-forward fold plan: `num_folds - 1` validation folds with
/// evenly spaced, strictly growing training prefixes, then one production
/// fold with all boundaries unset.
pub fn generate_fold_plan(
    num_folds: usize,
    total_months: usize,
    seeds: &mut dyn SeedSource,
) -> Result<Vec<FoldPlanEntry>> {
    if num_folds < 2 {
        return Err(FoldcastError::Configuration(format!(
            "num_folds must be at least 2, got {num_folds}"
        )));
    }
    let required = months_required(num_folds);
    if total_months < required {
        return Err(FoldcastError::Configuration(format!(
            "{num_folds} folds need at least {required} months of history, got {total_months}; \
             try num_folds = {}",
            optimal_folds(total_months)
        )));
    }

    let num_validation_folds = num_folds - 1;
    let min_training_months = MIN_TRAINING_MONTHS.max(total_months / 2);
    let max_validation_index = total_months - TEST_HORIZON - 1;
    let step = if num_validation_folds > 1 {
        (max_validation_index - min_training_months) / (num_validation_folds - 1)
    } else {
        0
    };

    let mut plan = Vec::with_capacity(num_folds);
    for i in 0..num_validation_folds {
        let training_end = min_training_months + i * step;
        let validation_index = training_end + 1;
        let test_indices: Vec<Option<usize>> = (1..=TEST_HORIZON)
            .map(|offset| {
                let index = validation_index + offset;
                (index < total_months).then_some(index)
            })
            .collect();

        plan.push(FoldPlanEntry {
            fold_id: format!("fold_{}", i + 1),
            random_data_seed: seeds.next_seed(),
            description: format!(
                "Train on target months 0-{training_end}, validate on month {validation_index}, \
                 predict months {}-{}",
                validation_index + 1,
                validation_index + TEST_HORIZON
            ),
            fold_type: FoldType::Validation,
            training_end_month_index: Some(training_end),
            validation_month_index: Some(validation_index),
            test_month_indices: Some(test_indices),
        });
    }

    plan.push(FoldPlanEntry {
        fold_id: format!("fold_{num_folds}_production"),
        random_data_seed: seeds.next_seed(),
        description: format!(
            "Train on all available target history (0-{}), forecast next {TEST_HORIZON} unknown months",
            total_months - 1
        ),
        fold_type: FoldType::Production,
        training_end_month_index: None,
        validation_month_index: None,
        test_month_indices: None,
    });

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::seed::SequentialSeedSource;

    #[test]
    fn test_optimal_folds_thresholds() {
        assert_eq!(optimal_folds(0), 2);
        assert_eq!(optimal_folds(7), 2);
        assert_eq!(optimal_folds(8), 2);
        assert_eq!(optimal_folds(12), 3);
        assert_eq!(optimal_folds(16), 5);
        assert_eq!(optimal_folds(24), 9);
        assert_eq!(optimal_folds(26), 10);
        assert_eq!(optimal_folds(100), 10);
    }

    #[test]
    fn test_plan_shape_for_five_folds() {
        let mut seeds = SequentialSeedSource::new();
        let plan = generate_fold_plan(5, 24, &mut seeds).unwrap();
        assert_eq!(plan.len(), 5);

        let production = &plan[4];
        assert_eq!(production.fold_type, FoldType::Production);
        assert_eq!(production.fold_id, "fold_5_production");
        assert_eq!(production.training_end_month_index, None);
        assert_eq!(production.validation_month_index, None);
        assert_eq!(production.test_month_indices, None);

        let mut previous_end = None;
        for entry in &plan[..4] {
            assert_eq!(entry.fold_type, FoldType::Validation);
            let end = entry.training_end_month_index.unwrap();
            if let Some(prev) = previous_end {
                assert!(end > prev);
            }
            previous_end = Some(end);

            let validation = entry.validation_month_index.unwrap();
            assert_eq!(validation, end + 1);
            let tests = entry.test_month_indices.as_ref().unwrap();
            assert_eq!(tests.len(), 3);
            for (i, slot) in tests.iter().enumerate() {
                let expected = validation + i + 1;
                match slot {
                    Some(index) => {
                        assert_eq!(*index, expected);
                        assert!(*index < 24);
                    }
                    None => assert!(expected >= 24),
                }
            }
        }
    }

    #[test]
    fn test_plan_clips_test_indices_at_total_months() {
        let mut seeds = SequentialSeedSource::new();
        // 2 folds over 8 months: single validation fold at the boundary.
        let plan = generate_fold_plan(2, 8, &mut seeds).unwrap();
        let entry = &plan[0];
        assert_eq!(entry.training_end_month_index, Some(4));
        assert_eq!(entry.validation_month_index, Some(5));
        assert_eq!(
            entry.test_month_indices,
            Some(vec![Some(6), Some(7), None])
        );
    }

    #[test]
    fn test_plan_rejects_too_few_folds() {
        let mut seeds = SequentialSeedSource::new();
        let err = generate_fold_plan(1, 24, &mut seeds).unwrap_err();
        assert!(matches!(err, FoldcastError::Configuration(_)));
    }

    #[test]
    fn test_plan_rejects_insufficient_months() {
        let mut seeds = SequentialSeedSource::new();
        let err = generate_fold_plan(6, 10, &mut seeds).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("12 months"), "message: {message}");
        assert!(message.contains("num_folds"), "message: {message}");
    }

    #[test]
    fn test_resolve_defaults_to_minimum() {
        let resolution = resolve_num_folds(None, 12);
        assert_eq!(resolution.num_folds, 3);
        assert_eq!(resolution.outcome, OverrideOutcome::Accepted);
        assert!(resolution.reason.is_none());
    }

    #[test]
    fn test_resolve_rejects_too_low() {
        // 16 months -> minimum 5.
        let resolution = resolve_num_folds(Some(2), 16);
        assert_eq!(resolution.num_folds, 5);
        assert_eq!(
            resolution.outcome,
            OverrideOutcome::RejectedTooLow {
                requested: 2,
                minimum: 5
            }
        );
        assert!(resolution.reason.is_some());
    }

    #[test]
    fn test_resolve_rejects_insufficient_data() {
        // 6 folds need 12 months, only 10 available.
        let resolution = resolve_num_folds(Some(6), 10);
        assert_eq!(resolution.num_folds, optimal_folds(10));
        assert_eq!(
            resolution.outcome,
            OverrideOutcome::RejectedInsufficientData {
                requested: 6,
                required_months: 12,
                available_months: 10
            }
        );
    }

    #[test]
    fn test_resolve_accepts_valid_request() {
        let resolution = resolve_num_folds(Some(8), 24);
        assert_eq!(resolution.num_folds, 8);
        assert_eq!(resolution.outcome, OverrideOutcome::Accepted);
    }

    #[test]
    fn test_total_months_is_max_sequence_length() {
        use crate::types::{RawRecord, UsageLookup};
        let record = RawRecord {
            customer_id: "t1".to_string(),
            customer_name: "Target".to_string(),
            usage_type: Some("Compute".to_string()),
            billing_month: Some("2024-01".to_string()),
            total_credit_usage: None,
        };
        let mut lookup = UsageLookup::new();
        lookup
            .entry("t1".to_string())
            .or_default()
            .insert("Compute".to_string(), vec![record.clone(); 7]);
        lookup
            .entry("t2".to_string())
            .or_default()
            .insert("Storage".to_string(), vec![record; 11]);
        assert_eq!(total_months(&lookup), 11);
        assert_eq!(total_months(&UsageLookup::new()), 0);
    }
}
