// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use anyhow::anyhow;
use indexmap::IndexSet;

use crate::ChannelIndex;
use crate::Result;
use crate::seqc_statements::{SeqCStatement, SeqCVariant};

type WaveId = str;

const INDENT: &str = "    ";

fn indent(s: &str, prefix: &str) -> String {
    s.lines()
        .flat_map(|line| [prefix, line, "\n"].into_iter())
        .collect()
}

/// Ordered collection of SeqC statements for a single scope.
///
/// Waves declared in this scope are tracked in declaration order; each name
/// may only be declared once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeqCGenerator {
    statements: Vec<SeqCStatement>,
    declared_waves: IndexSet<String>,
}

impl SeqCGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn statements(&self) -> &Vec<SeqCStatement> {
        &self.statements
    }

    pub fn num_statements(&self) -> usize {
        self.statements.len()
    }

    /// Names of the waves declared in this scope, in declaration order.
    pub fn declared_waves(&self) -> impl Iterator<Item = &str> {
        self.declared_waves.iter().map(String::as_str)
    }

    pub fn is_wave_declared(&self, wave_id: &WaveId) -> bool {
        self.declared_waves.contains(wave_id)
    }

    pub fn add_statement(&mut self, statement: SeqCStatement) {
        self.statements.push(statement);
    }

    pub fn add_comment<S: Into<String>>(&mut self, comment: S) {
        self.statements.push(SeqCStatement::Comment {
            text: comment.into(),
        });
    }

    pub fn add_blank_line(&mut self) {
        self.statements.push(SeqCStatement::BlankLine);
    }

    /// Declare a wave loaded from the CSV file of the same name.
    pub fn add_csv_wave_declaration<S: Into<String>>(&mut self, wave_id: S) -> Result<()> {
        let wave_id: String = wave_id.into();
        if !self.declared_waves.insert(wave_id.clone()) {
            return Err(anyhow!(
                "Trying to declare wave {wave_id} which has already been declared in this scope"
            )
            .into());
        }
        self.statements.push(SeqCStatement::WaveDeclaration {
            value: SeqCVariant::LiteralString(wave_id.clone()),
            wave_id,
        });
        Ok(())
    }

    /// Add `addend` sample-wise into the already declared wave `wave_id`.
    pub fn add_wave_addition<S1: Into<String>, S2: Into<String>>(
        &mut self,
        wave_id: S1,
        addend: S2,
    ) -> Result<()> {
        let wave_id: String = wave_id.into();
        let addend: String = addend.into();
        if let Some(undeclared) = [&wave_id, &addend]
            .into_iter()
            .find(|w| !self.declared_waves.contains(w.as_str()))
        {
            return Err(anyhow!("Wave {undeclared} is used before its declaration").into());
        }
        self.statements
            .push(SeqCStatement::WaveAddition { wave_id, addend });
        Ok(())
    }

    pub fn add_function_call_statement<S: Into<String>>(
        &mut self,
        name: S,
        args: Vec<SeqCVariant>,
    ) {
        self.statements.push(SeqCStatement::FunctionCall {
            name: name.into(),
            args,
        });
    }

    /// Play one wave per channel simultaneously.
    pub fn add_play_wave_statement<I, S>(&mut self, channel_waves: I)
    where
        I: IntoIterator<Item = (ChannelIndex, S)>,
        S: Into<String>,
    {
        let args = channel_waves
            .into_iter()
            .flat_map(|(channel, wave_id)| {
                [
                    SeqCVariant::Integer(channel.into()),
                    SeqCVariant::String(wave_id.into()),
                ]
            })
            .collect();
        self.add_function_call_statement("playWave", args);
    }

    pub fn add_infinite_loop(&mut self, body: SeqCGenerator) {
        self.statements.push(SeqCStatement::InfiniteLoop { body });
    }

    pub fn generate_seq_c(&self) -> String {
        self.statements
            .iter()
            .map(|statement| self.emit_statement(statement))
            .collect::<String>()
    }

    fn emit_statement(&self, statement: &SeqCStatement) -> String {
        match statement {
            SeqCStatement::Comment { text } => format!("// {text}\n"),
            SeqCStatement::BlankLine => "\n".to_string(),
            SeqCStatement::WaveDeclaration { wave_id, value } => {
                format!("wave {wave_id} = {value};\n")
            }
            SeqCStatement::WaveAddition { wave_id, addend } => {
                format!("{wave_id} = {wave_id} + {addend};\n")
            }
            SeqCStatement::FunctionCall { name, args } => {
                let args = args
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<String>>()
                    .join(", ");
                format!("{name}({args});\n")
            }
            SeqCStatement::InfiniteLoop { body } => {
                let body = indent(&body.generate_seq_c(), INDENT);
                format!("while(true){{\n{body}}}\n")
            }
        }
    }
}
