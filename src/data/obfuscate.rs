use crate::types::{NameMapping, RawRecord, UsageDataset};
use std::collections::BTreeMap;

/// Obfuscated datasets plus the lookup tables to reverse the process.
#[derive(Debug, Clone)]
pub struct ObfuscationResult {
    pub datasets: UsageDataset,
    pub name_mapping: NameMapping,
}

/// Replace customer names in both datasets with deterministic short
/// hashes. Records missing a customer id or name are dropped. The same
/// name always maps to the same hash, so grouping is unaffected.
pub fn obfuscate_datasets(input: &UsageDataset) -> ObfuscationResult {
    let mut mapping: BTreeMap<String, String> = BTreeMap::new();
    let mut customer_id_to_name: BTreeMap<String, String> = BTreeMap::new();

    let mut obfuscate = |records: &[RawRecord]| -> Vec<RawRecord> {
        records
            .iter()
            .filter(|record| !record.customer_id.is_empty() && !record.customer_name.is_empty())
            .map(|record| {
                customer_id_to_name
                    .entry(record.customer_id.clone())
                    .or_insert_with(|| record.customer_name.clone());
                let obfuscated = mapping
                    .entry(record.customer_name.clone())
                    .or_insert_with(|| short_hash(&record.customer_name))
                    .clone();
                RawRecord {
                    customer_name: obfuscated,
                    ..record.clone()
                }
            })
            .collect()
    };

    let datasets = UsageDataset {
        training_dataset: obfuscate(&input.training_dataset),
        target_dataset: obfuscate(&input.target_dataset),
    };

    let reverse_mapping = mapping
        .iter()
        .map(|(original, obfuscated)| (obfuscated.clone(), original.clone()))
        .collect();

    ObfuscationResult {
        datasets,
        name_mapping: NameMapping {
            mapping,
            reverse_mapping,
            customer_id_to_name,
        },
    }
}

/// Last 8 hex characters of the MD5 digest. Deterministic: the same name
/// always produces the same tag.
fn short_hash(name: &str) -> String {
    let digest = format!("{:x}", md5::compute(name.as_bytes()));
    digest[digest.len() - 8..].to_string()
}
