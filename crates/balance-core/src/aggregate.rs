//! Balance totals over the selection
//!
//! Totals always run over the full collection, never the filtered view, so a
//! selected record hidden by the filter still counts.

use std::collections::BTreeSet;

use crate::records::Record;

/// Selected records, in collection order. Unknown ids are ignored.
pub fn selected_records<'a>(records: &'a [Record], selected: &BTreeSet<String>) -> Vec<&'a Record> {
    records.iter().filter(|r| selected.contains(&r.id)).collect()
}

/// Sum of balances over the selected records; a missing balance counts as 0.
///
/// The sum saturates at `f64::MAX` in either direction, so the total stays finite.
pub fn total(records: &[Record], selected: &BTreeSet<String>) -> f64 {
    let sum = selected_records(records, selected)
        .iter()
        .map(|r| r.balance.unwrap_or(0.0))
        .fold(0.0, saturating_add);
    normalize_zero(sum)
}

fn saturating_add(acc: f64, value: f64) -> f64 {
    let sum = acc + value;
    if sum.is_finite() { sum } else { f64::MAX.copysign(sum) }
}

/// Normalize -0.0 to 0.0 for cleaner display
fn normalize_zero(val: f64) -> f64 {
    if val == 0.0 { 0.0 } else { val }
}
