use std::collections::{BTreeSet, HashMap};

use tracing::warn;

use crate::model::item::TestItem;
use crate::resolve::index::CollectIndex;

/// Outcome of the static resolution pass: the kept items (original relative
/// order, dependency lists rewritten to canonical resolved names) and the
/// names of items dropped because their chain did not fully resolve.
#[derive(Debug)]
pub struct Resolution {
    pub items: Vec<TestItem>,
    pub dropped: Vec<String>,
}

/// Visited state of one item during the depth-first pass, keyed by concrete
/// item name.
#[derive(Debug, Clone)]
enum VisitState {
    InProgress,
    Resolved(BTreeSet<String>),
    Excluded(BTreeSet<String>),
}

impl VisitState {
    fn resolved_set(&self) -> BTreeSet<String> {
        match self {
            Self::InProgress => BTreeSet::new(),
            Self::Resolved(set) | Self::Excluded(set) => set.clone(),
        }
    }
}

/// Rewrite declared dependency names into their canonical resolved forms
/// before execution, and drop items whose `collect`-flagged dependencies
/// cannot all be matched against the collected items.
///
/// Parameterized test names acquire their value suffixes only at collection
/// time, so a declared base name must be reconciled against the concrete
/// names, transitively: a matched dependency's own `collect` dependencies
/// are expanded too, and their union replaces the declared list in place.
pub fn resolve(mut items: Vec<TestItem>) -> Resolution {
    let index = CollectIndex::from_items(&items);
    let mut states: HashMap<String, VisitState> = HashMap::new();

    for i in 0..items.len() {
        dfs(&mut items, &index, &mut states, i, false);
    }

    let mut kept = Vec::with_capacity(items.len());
    let mut dropped = Vec::new();
    for item in items {
        if matches!(states.get(item.name()), Some(VisitState::Excluded(_))) {
            warn!(item = %item.id.node_id(), "dropping item with unresolvable dependencies");
            dropped.push(item.name().to_owned());
        } else {
            kept.push(item);
        }
    }

    Resolution {
        items: kept,
        dropped,
    }
}

fn dfs(
    items: &mut [TestItem],
    index: &CollectIndex,
    states: &mut HashMap<String, VisitState>,
    idx: usize,
    force_collect: bool,
) -> BTreeSet<String> {
    let name = items[idx].name().to_owned();
    if let Some(state) = states.get(&name) {
        // Memoized result, or a cycle re-entry which contributes nothing.
        return state.resolved_set();
    }
    states.insert(name.clone(), VisitState::InProgress);

    let postfix = items[idx].id.postfix().to_owned();
    let mut resolved = BTreeSet::new();
    let mut complete = true;

    for mark_i in 0..items[idx].marks.len() {
        if !(force_collect || items[idx].marks[mark_i].collect) {
            continue;
        }
        resolved = BTreeSet::new();
        let declared: BTreeSet<String> = items[idx].marks[mark_i].depends.iter().cloned().collect();
        let mut matched: Vec<usize> = Vec::new();

        for dep in &declared {
            let variant = format!("{dep}{postfix}");
            let mut resolved_name = dep.clone();
            for &cand in index.candidates(dep) {
                let cand_name = items[cand].name();
                if cand_name == dep.as_str() {
                    matched.push(cand);
                    break;
                }
                if cand_name == variant {
                    resolved_name = variant.clone();
                    matched.push(cand);
                    break;
                }
            }
            // Unmatched names stay in the set so the runtime unknown-name
            // check can still fire for them.
            resolved.insert(resolved_name);
        }

        // Resolution is complete only when every distinct name found a
        // collected source item; only then is the chain expanded further.
        if matched.len() == resolved.len() {
            for cand in matched {
                let transitive = dfs(items, index, states, cand, true);
                resolved.extend(transitive);
            }
        } else {
            complete = false;
        }

        items[idx].marks[mark_i].depends = resolved.iter().cloned().collect();
    }

    let state = if complete {
        VisitState::Resolved(resolved.clone())
    } else {
        VisitState::Excluded(resolved.clone())
    };
    states.insert(name, state);
    resolved
}
