// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use anyhow::Context;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::Result;

/// Description of a single node, as returned by the device.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NodeInfo {
    pub node: String,
    #[serde(default)]
    pub description: String,
    /// Comma separated list, e.g. `"Read, Write, Setting"`.
    pub properties: String,
    #[serde(rename = "Type")]
    pub node_type: String,
    #[serde(default)]
    pub unit: String,
    /// Option value to description, only present for enumerated nodes.
    #[serde(default)]
    pub options: Option<IndexMap<String, String>>,
}

/// Node path to node description, in the order reported by the device.
pub type NodeTree = IndexMap<String, NodeInfo>;

pub fn parse_node_tree(json: &str) -> Result<NodeTree> {
    let tree: NodeTree = serde_json::from_str(json).context("Failed to parse device node tree")?;
    Ok(tree)
}

/// Parameter name for a node path: the device segment is dropped, the
/// remaining segments are lower-cased and joined with underscores.
pub(crate) fn parameter_name(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .skip(1)
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}
