use crate::config::FoldConfig;
use crate::data::{group_datasets, obfuscate_datasets};
use crate::engine::plan::{self, FoldCountResolution};
use crate::engine::{assemble_folds, SeedSource};
use crate::error::{FoldcastError, Result};
use crate::types::{NameMapping, TargetCustomerFolds, UsageDataset};

/// Everything a run produces: the fold sets, how the fold-count request
/// was resolved, and the obfuscation tables when obfuscation ran.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub target_customers: Vec<TargetCustomerFolds>,
    pub fold_resolution: FoldCountResolution,
    pub name_mapping: Option<NameMapping>,
}

/// Run the whole pipeline: optional name obfuscation, grouping, fold-plan
/// derivation with override resolution, fold assembly. Pure function of
/// the input snapshot, the configuration, and the seed source.
pub fn run(
    input: &UsageDataset,
    config: &FoldConfig,
    seeds: &mut dyn SeedSource,
) -> Result<PipelineOutput> {
    let (dataset, name_mapping) = if config.obfuscate_names {
        let result = obfuscate_datasets(input);
        (result.datasets, Some(result.name_mapping))
    } else {
        (input.clone(), None)
    };

    let grouped = group_datasets(&dataset);
    if grouped.target_dataset.is_empty() {
        return Err(FoldcastError::NoTargetCustomer);
    }

    let total_months = config
        .total_months
        .unwrap_or_else(|| plan::total_months(&grouped.target_dataset));
    log::info!(
        "Planning folds over {total_months} month(s) of target history, {} target customer(s)",
        grouped.target_dataset.len()
    );

    let fold_resolution = plan::resolve_num_folds(config.num_folds, total_months);
    let fold_plan = plan::generate_fold_plan(fold_resolution.num_folds, total_months, seeds)?;
    let target_customers = assemble_folds(
        &grouped.training_dataset,
        &grouped.target_dataset,
        &fold_plan,
    )?;

    Ok(PipelineOutput {
        target_customers,
        fold_resolution,
        name_mapping,
    })
}
