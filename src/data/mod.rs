pub mod grouping;
pub mod obfuscate;

pub use grouping::{group_datasets, group_records};
pub use obfuscate::{obfuscate_datasets, ObfuscationResult};
