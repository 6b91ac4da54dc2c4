use super::calendar::BillingMonth;
use crate::types::{NormalizedRecord, RawRecord};
use std::cmp::Ordering;

/// A raw record decorated with its parsed month, in sorted position.
#[derive(Debug)]
pub struct Sequenced<'a> {
    pub raw: &'a RawRecord,
    pub month: Option<BillingMonth>,
}

/// Ordering used everywhere records are ranked by month: parsed months
/// ascending, unparsable months after all parsable ones. Equal and
/// None/None pairs compare equal so a stable sort preserves input order.
pub fn month_order(a: Option<BillingMonth>, b: Option<BillingMonth>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable-sort records by parsed billing month.
pub fn sequence(records: &[RawRecord]) -> Vec<Sequenced<'_>> {
    let mut sequenced: Vec<Sequenced<'_>> = records
        .iter()
        .map(|raw| Sequenced {
            raw,
            month: BillingMonth::parse(raw.billing_month.as_deref()),
        })
        .collect();
    sequenced.sort_by(|a, b| month_order(a.month, b.month));
    sequenced
}

/// Turn a sorted sequence into normalized records. `month_index` is the
/// rank within the sequence; the canonical month string falls back to the
/// raw label when the month never parsed.
pub fn normalize(sorted: &[Sequenced<'_>]) -> Vec<NormalizedRecord> {
    sorted
        .iter()
        .enumerate()
        .map(|(month_index, entry)| NormalizedRecord {
            billing_month: entry
                .month
                .map(|m| m.format())
                .or_else(|| entry.raw.billing_month.clone()),
            month_index,
            total_credit_usage: entry
                .raw
                .total_credit_usage
                .as_ref()
                .and_then(|v| v.as_finite()),
        })
        .collect()
}
