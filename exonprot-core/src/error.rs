use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExonError {
    #[error("invalid nucleotide '{ch}' at position {pos}")]
    InvalidChar { ch: char, pos: usize },

    #[error("malformed codon '{codon}'")]
    MalformedCodon { codon: String },

    #[error("invalid phase {phase} on exon {rank} (must be -1, 0, 1, or 2)")]
    InvalidPhase { rank: u32, phase: i64 },

    #[error("duplicate exon rank {rank} in transcript '{transcript}'")]
    DuplicateRank { transcript: String, rank: u32 },

    #[error(
        "inconsistent phase in transcript '{transcript}': exon {prev_rank} ends with phase \
         {end_phase} but exon {rank} starts with phase {start_phase}"
    )]
    InconsistentPhase {
        transcript: String,
        prev_rank: u32,
        end_phase: i8,
        rank: u32,
        start_phase: i8,
    },

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("csv missing column '{name}' in {path}. headers: {headers:?}")]
    CsvMissingColumn {
        name: String,
        headers: Vec<String>,
        path: String,
    },

    #[error("csv missing field at row {row} for column {column} in {path}")]
    CsvMissingField {
        row: usize,
        column: String,
        path: String,
    },

    #[error("csv invalid value '{value}' at row {row} for column {column} in {path}")]
    CsvInvalidField {
        row: usize,
        column: String,
        value: String,
        path: String,
    },

    #[error("csv invalid sequence at row {row} for column {column} in {path}: {source}")]
    CsvInvalidSequence {
        row: usize,
        column: String,
        path: String,
        #[source]
        source: Box<ExonError>,
    },

    #[error("csv write error in {path}: {source}")]
    CsvWrite {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("csv parse error in {path}: {source}")]
    CsvParse {
        path: String,
        #[source]
        source: csv::Error,
    },
}

pub type ExonResult<T> = Result<T, ExonError>;
