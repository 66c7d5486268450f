// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Generation of sequencer (SeqC) programs that play named CSV waves and
//! markers on the outputs of an arbitrary waveform generator.

pub mod assignment;
pub mod csv_program;
pub mod seqc_generator;
pub mod seqc_statements;
pub mod settings;

pub use assignment::ChannelAssignment;
pub use csv_program::{
    DEFAULT_GENERATOR_ID, generate_csv_sequence_program,
    generate_csv_sequence_program_with_settings,
};
pub use settings::ProgramSettings;

/// One-based index of an AWG output channel, as written in `playWave`.
pub type ChannelIndex = u16;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Cannot generate a sequence program without channel assignments")]
    EmptyProgram,
    #[error("Assignment for channel {channel} has neither a wave nor a marker")]
    EmptyAssignment { channel: ChannelIndex },
    #[error("Channel {channel} is out of range, valid channels are 1..={channel_count}")]
    ChannelOutOfRange {
        channel: ChannelIndex,
        channel_count: ChannelIndex,
    },
    #[error("Channel {channel} is assigned more than once")]
    DuplicateChannel { channel: ChannelIndex },
    #[error("'{name}' is not a valid sequencer identifier")]
    InvalidIdentifier { name: String },
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    pub fn new(msg: &str) -> Self {
        Error::Anyhow(anyhow::anyhow!(msg.to_string()))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
