// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{ChannelIndex, Error, Result};

/// A wave and/or marker to be played on a single AWG output.
///
/// The names refer to CSV files known to the device; they are also used
/// verbatim as sequencer variable names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelAssignment {
    pub channel: ChannelIndex,
    #[serde(default)]
    pub wave: Option<String>,
    #[serde(default)]
    pub marker: Option<String>,
}

impl ChannelAssignment {
    pub fn new<S: Into<String>>(channel: ChannelIndex, wave: Option<S>, marker: Option<S>) -> Self {
        Self {
            channel,
            wave: wave.map(Into::into),
            marker: marker.map(Into::into),
        }
    }

    pub fn wave<S: Into<String>>(channel: ChannelIndex, wave: S) -> Self {
        Self::new(channel, Some(wave), None)
    }

    pub fn marker<S: Into<String>>(channel: ChannelIndex, marker: S) -> Self {
        Self::new(channel, None, Some(marker))
    }

    pub fn wave_with_marker<S: Into<String>>(channel: ChannelIndex, wave: S, marker: S) -> Self {
        Self::new(channel, Some(wave), Some(marker))
    }

    /// The variable passed to `playWave` for this channel: the wave if there
    /// is one (with the marker already added into it), else the marker.
    pub fn play_name(&self) -> Option<&str> {
        self.wave.as_deref().or(self.marker.as_deref())
    }

    pub(crate) fn validate(&self, channel_count: ChannelIndex) -> Result<()> {
        if self.channel == 0 || self.channel > channel_count {
            return Err(Error::ChannelOutOfRange {
                channel: self.channel,
                channel_count,
            });
        }
        if self.wave.is_none() && self.marker.is_none() {
            return Err(Error::EmptyAssignment {
                channel: self.channel,
            });
        }
        for name in self.wave.iter().chain(self.marker.iter()) {
            if !is_valid_identifier(name) {
                return Err(Error::InvalidIdentifier { name: name.clone() });
            }
        }
        Ok(())
    }
}

impl<S: Into<String>> From<(ChannelIndex, Option<S>, Option<S>)> for ChannelAssignment {
    fn from((channel, wave, marker): (ChannelIndex, Option<S>, Option<S>)) -> Self {
        Self::new(channel, wave, marker)
    }
}

/// Keywords and literals of the sequencer language.
const RESERVED_WORDS: [&str; 17] = [
    "wave", "while", "true", "false", "var", "const", "cvar", "string", "if", "else", "for",
    "repeat", "do", "switch", "case", "default", "return",
];

fn is_valid_identifier(name: &str) -> bool {
    if RESERVED_WORDS.contains(&name) {
        return false;
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
