use serde::{Deserialize, Serialize};

use crate::model::item::TestItem;
use crate::resolve::pass::Resolution;

/// Serializable summary of a static resolution pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionReport {
    pub kept: Vec<KeptItemReport>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dropped: Vec<String>,
}

/// One kept item with its rewritten dependency list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeptItemReport {
    pub node_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends: Vec<String>,
}

impl ResolutionReport {
    pub fn from_resolution(resolution: &Resolution) -> Self {
        Self {
            kept: resolution.items.iter().map(kept_item).collect(),
            dropped: resolution.dropped.clone(),
        }
    }
}

fn kept_item(item: &TestItem) -> KeptItemReport {
    let mark = item.closest_mark();
    KeptItemReport {
        node_id: item.id.node_id(),
        scope: mark.map(|m| m.scope.to_string()),
        depends: mark.map(|m| m.depends.clone()).unwrap_or_default(),
    }
}

/// Emit a resolution pass summary as JSON.
pub fn emit_resolution_json(resolution: &Resolution) -> String {
    serde_json::to_string_pretty(&ResolutionReport::from_resolution(resolution))
        .unwrap_or_else(|e| format!("{{ \"error\": \"{}\" }}", e))
}
