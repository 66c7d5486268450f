// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Module for defining settings for the sequence program generator.
use anyhow::Context;
use serde::Deserialize;

use crate::csv_program::DEFAULT_GENERATOR_ID;
use crate::{ChannelIndex, Error, Result};

/// Number of outputs of an HDAWG8.
pub const DEFAULT_CHANNEL_COUNT: ChannelIndex = 8;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProgramSettings {
    /// Identifier written into the `// generated by` header.
    pub generator_id: String,
    /// Number of AWG outputs; valid channels are `1..=channel_count`.
    pub channel_count: ChannelIndex,
}

impl Default for ProgramSettings {
    fn default() -> Self {
        ProgramSettings {
            generator_id: DEFAULT_GENERATOR_ID.to_string(),
            channel_count: DEFAULT_CHANNEL_COUNT,
        }
    }
}

impl ProgramSettings {
    pub fn new<S: Into<String>>(generator_id: S, channel_count: ChannelIndex) -> Result<Self> {
        let settings = ProgramSettings {
            generator_id: generator_id.into(),
            channel_count,
        };
        settings.sanitize()?;
        Ok(settings)
    }

    /// Load settings from a JSON object. Missing fields take their default value.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: ProgramSettings =
            serde_json::from_str(json).context("Failed to parse program settings")?;
        settings.sanitize()?;
        Ok(settings)
    }

    fn sanitize(&self) -> Result<()> {
        if self.channel_count == 0 {
            return Err(Error::new("Channel count must be at least 1"));
        }
        if self.generator_id.contains('\n') {
            return Err(Error::new(
                "Generator identifier must fit on a single comment line",
            ));
        }
        Ok(())
    }
}
