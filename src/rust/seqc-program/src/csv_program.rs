// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Sequence programs that loop over CSV waves on the AWG outputs.
//!
//! Every wave and marker name refers to a CSV file on the device and is
//! declared once, in order of first use. A marker given together with a wave
//! is added into that wave, so that a single `playWave` argument carries both.
//! All channels are then played simultaneously in an endless loop:
//!
//! ```text
//! // generated by seqc_program::csv_program
//!
//! wave wave_1 = "wave_1";
//! wave marker_1 = "marker_1";
//! wave_1 = wave_1 + marker_1;
//!
//! while(true){
//!     playWave(6, wave_1);
//! }
//! ```

use std::collections::HashSet;

use driver_log::diagnostic;

use crate::assignment::ChannelAssignment;
use crate::seqc_generator::SeqCGenerator;
use crate::settings::ProgramSettings;
use crate::{Error, Result};

/// Default identifier in the header of generated programs.
pub const DEFAULT_GENERATOR_ID: &str = module_path!();

/// Generate the sequence program for `assignments` with default settings.
pub fn generate_csv_sequence_program(assignments: &[ChannelAssignment]) -> Result<String> {
    generate_csv_sequence_program_with_settings(assignments, &ProgramSettings::default())
}

pub fn generate_csv_sequence_program_with_settings(
    assignments: &[ChannelAssignment],
    settings: &ProgramSettings,
) -> Result<String> {
    validate_assignments(assignments, settings)?;

    let mut declarations = SeqCGenerator::new();
    for assignment in assignments {
        for wave_id in assignment.wave.iter().chain(assignment.marker.iter()) {
            if !declarations.is_wave_declared(wave_id) {
                declarations.add_csv_wave_declaration(wave_id.as_str())?;
            }
        }
        if let (Some(wave), Some(marker)) = (&assignment.wave, &assignment.marker) {
            declarations.add_wave_addition(wave.as_str(), marker.as_str())?;
        }
    }

    let mut loop_body = SeqCGenerator::new();
    loop_body.add_play_wave_statement(assignments.iter().filter_map(|assignment| {
        assignment
            .play_name()
            .map(|play_name| (assignment.channel, play_name))
    }));

    let mut program = SeqCGenerator::new();
    program.add_blank_line();
    program.add_comment(format!("generated by {}", settings.generator_id));
    program.add_blank_line();
    let num_declarations = declarations
        .statements()
        .iter()
        .filter(|s| s.is_declaration())
        .count();
    for statement in declarations.statements() {
        program.add_statement(statement.clone());
    }
    program.add_blank_line();
    program.add_infinite_loop(loop_body);

    diagnostic!(
        "Generated CSV sequence program for {} channel(s) with {} wave declaration(s)",
        assignments.len(),
        num_declarations
    );
    Ok(program.generate_seq_c())
}

fn validate_assignments(
    assignments: &[ChannelAssignment],
    settings: &ProgramSettings,
) -> Result<()> {
    if assignments.is_empty() {
        return Err(Error::EmptyProgram);
    }
    let mut channels = HashSet::with_capacity(assignments.len());
    for assignment in assignments {
        assignment.validate(settings.channel_count)?;
        if !channels.insert(assignment.channel) {
            return Err(Error::DuplicateChannel {
                channel: assignment.channel,
            });
        }
    }
    Ok(())
}
