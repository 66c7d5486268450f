// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use crate::seqc_generator::SeqCGenerator;
use std::fmt;

type WaveIdInternal = String;

/// A value as it appears in a SeqC expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeqCVariant {
    /// An identifier, emitted as is.
    String(String),
    /// A string literal, emitted in double quotes.
    LiteralString(String),
    Integer(i64),
}

impl fmt::Display for SeqCVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeqCVariant::String(s) => write!(f, "{s}"),
            SeqCVariant::LiteralString(s) => write!(f, "\"{s}\""),
            SeqCVariant::Integer(i) => write!(f, "{i}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeqCStatement {
    Comment {
        text: String,
    },
    BlankLine,
    /// `wave <wave_id> = <value>;`
    WaveDeclaration {
        wave_id: WaveIdInternal,
        value: SeqCVariant,
    },
    /// `<wave_id> = <wave_id> + <addend>;`
    WaveAddition {
        wave_id: WaveIdInternal,
        addend: WaveIdInternal,
    },
    FunctionCall {
        name: String,
        args: Vec<SeqCVariant>,
    },
    /// `while(true){ ... }`
    InfiniteLoop {
        body: SeqCGenerator,
    },
}

impl SeqCStatement {
    pub fn is_declaration(&self) -> bool {
        matches!(self, SeqCStatement::WaveDeclaration { .. })
    }
}
