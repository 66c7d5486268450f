// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Typed parameter descriptors derived from the node tree a device reports.

pub mod node;
pub mod parameter;

pub use node::{NodeInfo, NodeTree, parse_node_tree};
pub use parameter::{
    Access, NodeParameter, NodeValueKind, ParameterValue, Validator, create_parameters,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Node {node} is not writable")]
    ReadOnly { node: String },
    #[error("Value {value} is not valid for node {node}: {reason}")]
    InvalidValue {
        node: String,
        value: String,
        reason: String,
    },
    #[error("Nodes {first} and {second} map to the same parameter name '{name}'")]
    DuplicateName {
        name: String,
        first: String,
        second: String,
    },
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
