//! Subtree highlight aggregation for the active transition.
//!
//! During a transition, each participating intermediate tree names the
//! lattice edge it modifies; the per-transition highlight tables map
//! that edge (in its stringified input form, e.g. `"[9, 10, 11]"`) to
//! nested groups of taxon indices. The aggregation here walks the
//! segment up to the current tree, flattens one nesting level and
//! de-duplicates groups by canonical JSON, mirroring the data producer.

use rustc_hash::FxHashSet;
use serde_json::Value;

use crate::index::TransitionIndex;
use crate::movie::MovieData;

/// A group of taxon indices to emphasize together.
pub type TaxonGroup = Vec<usize>;

/// Stringify a lattice-edge tracking entry in the input's convention.
///
/// Tuple entries render as `"[9, 10, 11]"` (bracketed, comma-space
/// separated) because that is exactly how the producing pipeline keys
/// its highlight tables. Non-tuple entries fall back to compact JSON.
#[must_use]
pub fn lattice_key(edge: &Value) -> String {
    match edge.as_array() {
        Some(items) => {
            let mut key = String::from("[");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    key.push_str(", ");
                }
                key.push_str(&item.to_string());
            }
            key.push(']');
            key
        }
        None => edge.to_string(),
    }
}

/// Aggregate the highlight set for the current tree.
///
/// Walks every tree of the active highlight segment from its opening
/// anchor up to `current` inclusive, looks up each participating tree's
/// lattice edge in the transition's highlight table, flattens one level
/// of nesting and unions the taxon groups. Groups are de-duplicated by
/// canonical JSON identity; first-seen order is kept. The result is
/// empty when `current` sits outside any active segment.
#[must_use]
pub fn aggregate(
    data: &MovieData,
    index: &TransitionIndex,
    current: usize,
) -> Vec<TaxonGroup> {
    let Some(segment) = index.highlighting_index(current) else {
        return Vec::new();
    };
    let Some(table) = data.highlighted_elements.get(segment) else {
        return Vec::new();
    };

    let start = index.anchor_indices()[segment];
    let mut seen = FxHashSet::default();
    let mut groups = Vec::new();

    for j in start..=current {
        if index.highlighting_index(j) != Some(segment) {
            continue;
        }
        let Some(edge) = data.lattice_edge(j) else {
            continue;
        };
        let Some(entry) = table.get(&lattice_key(edge)) else {
            continue;
        };
        collect_groups(entry, &mut seen, &mut groups);
    }

    groups
}

/// Flatten one nesting level of a highlight table entry and union the
/// resulting taxon groups into `groups`.
fn collect_groups(
    entry: &Value,
    seen: &mut FxHashSet<String>,
    groups: &mut Vec<TaxonGroup>,
) {
    let Some(outer) = entry.as_array() else {
        log::debug!("highlight entry is not a list, ignoring");
        return;
    };
    for inner in outer {
        let Some(candidates) = inner.as_array() else {
            continue;
        };
        for candidate in candidates {
            let Some(group) = as_taxon_group(candidate) else {
                continue;
            };
            let key = canonical_key(&group);
            if seen.insert(key) {
                groups.push(group);
            }
        }
    }
}

/// Parse one taxon-index group, rejecting non-numeric entries.
fn as_taxon_group(value: &Value) -> Option<TaxonGroup> {
    let items = value.as_array()?;
    items
        .iter()
        .map(|v| v.as_u64().map(|n| n as usize))
        .collect()
}

/// Canonical JSON identity of a group (compact, order-preserving).
fn canonical_key(group: &[usize]) -> String {
    serde_json::to_string(group).unwrap_or_default()
}
