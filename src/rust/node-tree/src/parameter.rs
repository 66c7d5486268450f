// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use driver_log::warn;
use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::node::{NodeInfo, NodeTree, parameter_name};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Access {
    pub read: bool,
    pub write: bool,
    /// The node is part of the device settings (saved and restored with them).
    pub setting: bool,
}

impl Access {
    fn from_properties(properties: &str) -> Self {
        let mut access = Access::default();
        for property in properties.split(',').map(str::trim) {
            match property.to_lowercase().as_str() {
                "read" => access.read = true,
                "write" => access.write = true,
                "setting" => access.setting = true,
                _ => {}
            }
        }
        access
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeValueKind {
    Integer,
    Enumerated,
    Double,
    String,
    /// Vector and sample nodes; values are passed through unchecked.
    Other(String),
}

impl NodeValueKind {
    fn from_type(node_type: &str) -> Self {
        match node_type {
            "Integer (enumerated)" => NodeValueKind::Enumerated,
            t if t.starts_with("Integer") => NodeValueKind::Integer,
            "Double" => NodeValueKind::Double,
            "String" => NodeValueKind::String,
            other => NodeValueKind::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Integer(i64),
    Double(f64),
    String(String),
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Integer(i) => write!(f, "{i}"),
            ParameterValue::Double(d) => write!(f, "{d}"),
            ParameterValue::String(s) => write!(f, "'{s}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validator {
    /// One of the listed integer options.
    Enum(Vec<i64>),
}

impl Validator {
    fn validate(&self, value: &ParameterValue) -> std::result::Result<(), String> {
        match self {
            Validator::Enum(options) => match value {
                ParameterValue::Integer(i) if options.contains(i) => Ok(()),
                _ => Err(format!("expected one of {options:?}")),
            },
        }
    }
}

/// A named, typed view on a single device node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeParameter {
    pub name: String,
    pub node: String,
    pub label: String,
    pub unit: String,
    pub access: Access,
    pub kind: NodeValueKind,
    pub validator: Option<Validator>,
}

impl NodeParameter {
    pub fn from_node(path: &str, info: &NodeInfo) -> Self {
        let kind = NodeValueKind::from_type(&info.node_type);
        let validator = match (&kind, &info.options) {
            (NodeValueKind::Enumerated, Some(options)) => enum_validator(path, options),
            _ => None,
        };
        NodeParameter {
            name: parameter_name(path),
            node: path.to_string(),
            label: info.description.clone(),
            unit: info.unit.clone(),
            access: Access::from_properties(&info.properties),
            kind,
            validator,
        }
    }

    /// Check that `value` may be written to the node.
    pub fn validate_set(&self, value: &ParameterValue) -> Result<()> {
        if !self.access.write {
            return Err(Error::ReadOnly {
                node: self.node.clone(),
            });
        }
        let kind_matches = matches!(
            (&self.kind, value),
            (
                NodeValueKind::Integer | NodeValueKind::Enumerated,
                ParameterValue::Integer(_)
            ) | (
                NodeValueKind::Double,
                ParameterValue::Integer(_) | ParameterValue::Double(_)
            ) | (NodeValueKind::String, ParameterValue::String(_))
                | (NodeValueKind::Other(_), _)
        );
        if !kind_matches {
            return Err(self.invalid_value(value, format!("expected {:?}", self.kind)));
        }
        if let Some(validator) = &self.validator {
            validator
                .validate(value)
                .map_err(|reason| self.invalid_value(value, reason))?;
        }
        Ok(())
    }

    fn invalid_value(&self, value: &ParameterValue, reason: String) -> Error {
        Error::InvalidValue {
            node: self.node.clone(),
            value: value.to_string(),
            reason,
        }
    }
}

fn enum_validator(path: &str, options: &IndexMap<String, String>) -> Option<Validator> {
    let mut values = Vec::with_capacity(options.len());
    for key in options.keys() {
        match key.trim().parse::<i64>() {
            Ok(value) => values.push(value),
            Err(_) => {
                warn!("Ignoring non-integer option '{}' of node {}", key, path);
            }
        }
    }
    if values.is_empty() {
        return None;
    }
    Some(Validator::Enum(values))
}

/// Create a parameter for every node in `tree`, keyed by parameter name.
///
/// Nodes without a path below the device segment are skipped.
pub fn create_parameters(tree: &NodeTree) -> Result<IndexMap<String, NodeParameter>> {
    let mut parameters = IndexMap::with_capacity(tree.len());
    for (path, info) in tree {
        let parameter = NodeParameter::from_node(path, info);
        if parameter.name.is_empty() {
            warn!("Skipping node {} which has no path below the device", path);
            continue;
        }
        match parameters.entry(parameter.name.clone()) {
            Entry::Occupied(entry) => {
                let existing: &NodeParameter = entry.get();
                return Err(Error::DuplicateName {
                    name: parameter.name,
                    first: existing.node.clone(),
                    second: parameter.node,
                });
            }
            Entry::Vacant(entry) => {
                entry.insert(parameter);
            }
        }
    }
    Ok(parameters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_node_tree;

    const HDAWG_NODE_TREE: &str = r#"{
        "/DEV8049/SYSTEM/AWG/CHANNELGROUPING": {
            "Node": "/DEV8049/SYSTEM/AWG/CHANNELGROUPING",
            "Description": "Sets the channel grouping mode of the device.",
            "Properties": "Read, Write, Setting",
            "Type": "Integer (enumerated)",
            "Unit": "None",
            "Options": {
                "0": "Use the outputs in groups of 2. One sequencer program controls 2 outputs ",
                "1": "Use the outputs in groups of 4. One sequencer program controls 4 outputs ",
                "2": "Use the outputs in groups of 8. One sequencer program controls 8 outputs "
            }
        },
        "/DEV8049/SIGOUTS/0/ON": {
            "Node": "/DEV8049/SIGOUTS/0/ON",
            "Description": "Enabling/Disabling the Signal Output. Corresponds to the blue LED indicator",
            "Properties": "Read, Write, Setting",
            "Type": "Integer (64 bit)",
            "Unit": "None"
        },
        "/DEV8049/SYSTEM/OWNER": {
            "Node": "/DEV8049/SYSTEM/OWNER",
            "Description": "Returns the current owner of the device (IP).",
            "Properties": "Read",
            "Type": "String",
            "Unit": "None"
        },
        "/DEV8049/SINES/0/AMPLITUDES/0": {
            "Node": "/DEV8049/SINES/0/AMPLITUDES/0",
            "Description": "Sets the peak amplitude that the sine signal contributes to the signal output.",
            "Properties": "Read, Write, Setting",
            "Type": "Double",
            "Unit": "None"
        },
        "/DEV8049/AWGS/1/WAVEFORM/MEMORYUSAGE": {
            "Node": "/DEV8049/AWGS/1/WAVEFORM/MEMORYUSAGE",
            "Description": "Amount of the used waveform data relative to the device cache memory.",
            "Properties": "Read",
            "Type": "Double",
            "Unit": "%"
        }
    }"#;

    #[test]
    fn test_create_parameters_from_node_tree() {
        let tree = parse_node_tree(HDAWG_NODE_TREE).unwrap();
        let parameters = create_parameters(&tree).unwrap();
        assert_eq!(
            parameters.keys().collect::<Vec<_>>(),
            vec![
                "system_awg_channelgrouping",
                "sigouts_0_on",
                "system_owner",
                "sines_0_amplitudes_0",
                "awgs_1_waveform_memoryusage",
            ]
        );

        let grouping = &parameters["system_awg_channelgrouping"];
        assert_eq!(grouping.name, "system_awg_channelgrouping");
        assert_eq!(grouping.unit, "None");
        assert_eq!(grouping.kind, NodeValueKind::Enumerated);
        assert_eq!(grouping.validator, Some(Validator::Enum(vec![0, 1, 2])));
        assert!(grouping.validate_set(&ParameterValue::Integer(2)).is_ok());
        assert!(matches!(
            grouping.validate_set(&ParameterValue::Integer(4)),
            Err(Error::InvalidValue { .. })
        ));

        let sigout = &parameters["sigouts_0_on"];
        assert_eq!(sigout.unit, "None");
        assert_eq!(sigout.validator, None);
        assert!(sigout.validate_set(&ParameterValue::Integer(1)).is_ok());
        assert!(
            sigout
                .validate_set(&ParameterValue::String("on".to_string()))
                .is_err()
        );

        let owner = &parameters["system_owner"];
        assert_eq!(owner.validator, None);
        assert_eq!(
            owner.access,
            Access {
                read: true,
                write: false,
                setting: false
            }
        );
        assert!(matches!(
            owner.validate_set(&ParameterValue::String("me".to_string())),
            Err(Error::ReadOnly { .. })
        ));

        let amplitude = &parameters["sines_0_amplitudes_0"];
        assert_eq!(amplitude.validator, None);
        assert!(amplitude.validate_set(&ParameterValue::Double(0.5)).is_ok());
        assert!(amplitude.validate_set(&ParameterValue::Integer(1)).is_ok());

        let memory_usage = &parameters["awgs_1_waveform_memoryusage"];
        assert_eq!(memory_usage.unit, "%");
        assert_eq!(memory_usage.validator, None);
        assert!(!memory_usage.access.write);
    }

    #[test]
    fn test_enumerated_node_with_unusable_options() {
        let tree = parse_node_tree(
            r#"{"/DEV1/MODE": {
                "Node": "/DEV1/MODE",
                "Properties": "Read, Write",
                "Type": "Integer (enumerated)",
                "Options": {"\"off\"": "Off"}
            }}"#,
        )
        .unwrap();
        let parameters = create_parameters(&tree).unwrap();
        assert_eq!(parameters["mode"].validator, None);
        assert_eq!(parameters["mode"].unit, "");
    }

    #[test]
    fn test_duplicate_parameter_names() {
        let tree = parse_node_tree(
            r#"{
                "/DEV1/SIGOUTS/0": {"Node": "/DEV1/SIGOUTS/0", "Properties": "Read", "Type": "Double"},
                "/dev1/sigouts/0": {"Node": "/dev1/sigouts/0", "Properties": "Read", "Type": "Double"}
            }"#,
        )
        .unwrap();
        assert!(matches!(
            create_parameters(&tree),
            Err(Error::DuplicateName { name, .. }) if name == "sigouts_0"
        ));
    }

    #[test]
    fn test_device_root_node_is_skipped() {
        let tree = parse_node_tree(
            r#"{
                "/DEV8049": {"Node": "/DEV8049", "Properties": "Read", "Type": "String"},
                "/DEV8049/SYSTEM/OWNER": {"Node": "/DEV8049/SYSTEM/OWNER", "Properties": "Read", "Type": "String"}
            }"#,
        )
        .unwrap();
        let parameters = create_parameters(&tree).unwrap();
        assert_eq!(parameters.keys().collect::<Vec<_>>(), vec!["system_owner"]);
        assert!(!parameters.contains_key(""));
    }

    #[test]
    fn test_unknown_node_type_is_unchecked() {
        let parameter = NodeParameter::from_node(
            "/DEV1/AWGS/0/WAVEFORM/WAVES/0",
            &NodeInfo {
                node: "/DEV1/AWGS/0/WAVEFORM/WAVES/0".to_string(),
                description: String::new(),
                properties: "Read, Write".to_string(),
                node_type: "ZIVectorData".to_string(),
                unit: "None".to_string(),
                options: None,
            },
        );
        assert_eq!(
            parameter.kind,
            NodeValueKind::Other("ZIVectorData".to_string())
        );
        assert!(
            parameter
                .validate_set(&ParameterValue::String("data".to_string()))
                .is_ok()
        );
    }
}
