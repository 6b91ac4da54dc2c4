pub mod assembler;
pub mod calendar;
pub mod plan;
pub mod seed;
pub mod sequence;
pub mod series;

pub use assembler::assemble_folds;
pub use calendar::BillingMonth;
pub use plan::{
    generate_fold_plan, optimal_folds, resolve_num_folds, total_months, FoldCountResolution,
    OverrideOutcome,
};
pub use seed::{RandomSeedSource, SeedSource, SequentialSeedSource};
pub use series::{build_similar_series, split_target_records};
