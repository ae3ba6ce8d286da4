use thiserror::Error;

use crate::tables::TableDefect;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Voice(#[from] VoiceError),

    #[error(transparent)]
    Config(#[from] EngineConfigError),

    #[error("unknown spelling '{0}' (expected 'flat' or 'sharp')")]
    UnknownSpelling(String),

    #[error("invalid note name '{0}'")]
    NoteName(String),
}

/// Rejected note events. The active set is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VoiceError {
    #[error("note off for pitch {pitch} that is not sounding")]
    UnmatchedNoteOff { pitch: u8 },

    #[error("note on for pitch {pitch} dropped: {limit} voices already sounding")]
    PolyphonyExceeded { pitch: u8, limit: usize },
}

#[derive(Debug, Clone, Error)]
pub enum TableError {
    #[error("{count} chord table defect(s): {summary}")]
    Defects {
        count: usize,
        summary: String,
        defects: Vec<TableDefect>,
    },
}

impl TableError {
    pub fn from_defects(defects: Vec<TableDefect>) -> Self {
        let summary = defects
            .first()
            .map(|d| d.to_string())
            .unwrap_or_default();
        TableError::Defects {
            count: defects.len(),
            summary,
            defects,
        }
    }

    pub fn defects(&self) -> &[TableDefect] {
        match self {
            TableError::Defects { defects, .. } => defects,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineConfigError {
    #[error("lower limit {lower} is above upper limit {upper}")]
    InvertedRange { lower: u8, upper: u8 },
}
