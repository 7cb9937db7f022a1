use crate::error::{ExonError, ExonResult};
use crate::io::{normalize_seq_bytes, OnError, ReadReport, SkippedRecord};
use crate::seq::exon::{Exon, Phase, Transcript};
use crate::seq::nucleotide::NucleotideSeq;
use crate::translate::assembler::{translate_all, TranscriptTranslation};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use log::{info, warn};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// Column names of an exon table.
///
/// Rank and phase fields hold integers; integral floats (`1.0`), as written
/// by dataframe tools, are accepted too.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExonColumns {
    pub transcript_id: String,
    pub rank: String,
    pub start_phase: String,
    pub end_phase: String,
    pub sequence: String,
    pub protein: String,
    /// Separates several transcript ids sharing one exon row.
    pub transcript_delimiter: char,
}

impl Default for ExonColumns {
    fn default() -> Self {
        Self {
            transcript_id: "transcript_id".to_string(),
            rank: "rank".to_string(),
            start_phase: "startPhase".to_string(),
            end_phase: "endPhase".to_string(),
            sequence: "sequence".to_string(),
            protein: "protein".to_string(),
            transcript_delimiter: ';',
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailedTranscript {
    pub transcript_id: Box<str>,
    pub message: Box<str>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Transcripts with a resolved start.
    pub translated: usize,
    /// Transcripts written with empty proteins (no start or no ORF).
    pub unresolved: usize,
    pub failed: Vec<FailedTranscript>,
    pub skipped: Vec<SkippedRecord>,
}

struct ColumnIndices {
    transcript_id: Option<usize>,
    rank: usize,
    start_phase: usize,
    end_phase: usize,
    sequence: usize,
}

struct ExonGroup {
    id: String,
    first_row: usize,
    exons: Vec<(Exon, StringRecord)>,
}

/// An exon table as read from disk: the grouped transcripts plus the raw
/// rows behind them, so every input column can be written back.
#[derive(Clone, Debug)]
pub struct ExonTable {
    pub headers: StringRecord,
    pub transcripts: Vec<Transcript>,
    /// Input rows of each transcript, in the rank order of its exons.
    pub rows: Vec<Vec<StringRecord>>,
}

/// Reads an exon table and groups its rows into rank-ordered transcripts.
///
/// Without a transcript-id column the whole file is one transcript named
/// after the file stem. Transcripts keep the order in which they first
/// appear.
pub fn read_exon_csv(
    path: impl AsRef<Path>,
    columns: &ExonColumns,
    on_error: OnError,
) -> ExonResult<ReadReport<Vec<Transcript>>> {
    let report = read_exon_table(path, columns, on_error)?;
    Ok(ReadReport {
        data: report.data.transcripts,
        skipped: report.skipped,
    })
}

/// Like [`read_exon_csv`], but keeps the header and the raw row of every
/// exon alongside the transcripts.
pub fn read_exon_table(
    path: impl AsRef<Path>,
    columns: &ExonColumns,
    on_error: OnError,
) -> ExonResult<ReadReport<ExonTable>> {
    let path_ref = path.as_ref();
    let path_str = path_ref.display().to_string();
    let file = File::open(path_ref).map_err(|e| ExonError::CsvParse {
        path: path_str.clone(),
        source: csv::Error::from(e),
    })?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| ExonError::CsvParse {
            path: path_str.clone(),
            source: e,
        })?
        .clone();
    let idx = ColumnIndices {
        transcript_id: headers.iter().position(|h| h == columns.transcript_id),
        rank: resolve_column(&columns.rank, &headers, &path_str)?,
        start_phase: resolve_column(&columns.start_phase, &headers, &path_str)?,
        end_phase: resolve_column(&columns.end_phase, &headers, &path_str)?,
        sequence: resolve_column(&columns.sequence, &headers, &path_str)?,
    };
    let file_id = path_ref
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path_str.clone());

    let mut groups: Vec<ExonGroup> = Vec::new();
    let mut group_index: HashMap<String, usize> = HashMap::new();
    let mut skipped: Vec<SkippedRecord> = Vec::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| ExonError::CsvParse {
            path: path_str.clone(),
            source: e,
        })?;
        let row = row_idx + 1;

        let ids: Vec<String> = match idx.transcript_id {
            Some(i) => field(&record, i, &columns.transcript_id, row, &path_str)?
                .split(columns.transcript_delimiter)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            None => vec![file_id.clone()],
        };

        let parsed = if ids.is_empty() {
            Err(ExonError::CsvInvalidField {
                row,
                column: columns.transcript_id.clone(),
                value: String::new(),
                path: path_str.clone(),
            })
        } else {
            parse_exon(&record, row, &idx, columns, &path_str)
        };

        let exon = match parsed {
            Ok(exon) => exon,
            Err(err) => match on_error {
                OnError::Raise => return Err(err),
                OnError::Skip => {
                    warn!("skipping row {row} of {path_str}: {err}");
                    skipped.push(SkippedRecord {
                        row,
                        id: ids.first().map(|id| id.clone().into_boxed_str()),
                        column: error_column(&err).into(),
                        message: err.to_string().into_boxed_str(),
                    });
                    continue;
                }
            },
        };

        for id in ids {
            let slot = *group_index.entry(id.clone()).or_insert_with(|| {
                groups.push(ExonGroup {
                    id,
                    first_row: row,
                    exons: Vec::new(),
                });
                groups.len() - 1
            });
            groups[slot].exons.push((exon.clone(), record.clone()));
        }
    }

    let mut transcripts = Vec::with_capacity(groups.len());
    let mut rows = Vec::with_capacity(groups.len());
    for group in groups {
        let ExonGroup {
            id,
            first_row,
            mut exons,
        } = group;
        exons.sort_by_key(|(exon, _)| exon.rank());
        let (exons, records): (Vec<Exon>, Vec<StringRecord>) = exons.into_iter().unzip();
        match Transcript::new(id.clone(), exons) {
            Ok(t) => {
                transcripts.push(t);
                rows.push(records);
            }
            Err(err) => match on_error {
                OnError::Raise => return Err(err),
                OnError::Skip => {
                    warn!("skipping transcript {id} of {path_str}: {err}");
                    skipped.push(SkippedRecord {
                        row: first_row,
                        id: Some(id.into_boxed_str()),
                        column: columns.rank.clone().into_boxed_str(),
                        message: err.to_string().into_boxed_str(),
                    });
                }
            },
        }
    }

    Ok(ReadReport {
        data: ExonTable {
            headers,
            transcripts,
            rows,
        },
        skipped,
    })
}

/// Writes every input row of `table` back with its exon's protein fragment.
///
/// `translations[i]` belongs to `table.transcripts[i]`; `None` leaves that
/// transcript out. A row shared by several transcripts is written once per
/// transcript, carrying that transcript's id. An existing protein column is
/// overwritten, otherwise one is appended.
pub fn write_translated_csv(
    path: impl AsRef<Path>,
    table: &ExonTable,
    translations: &[Option<TranscriptTranslation>],
    columns: &ExonColumns,
) -> ExonResult<()> {
    let path_ref = path.as_ref();
    let path_str = path_ref.display().to_string();
    let write_err = |e: csv::Error| ExonError::CsvWrite {
        path: path_str.clone(),
        source: e,
    };

    let width = table.headers.len();
    let id_col = table.headers.iter().position(|h| h == columns.transcript_id);
    let protein_col = table.headers.iter().position(|h| h == columns.protein);

    let mut writer = WriterBuilder::new().from_path(path_ref).map_err(write_err)?;
    let mut header: Vec<&str> = table.headers.iter().collect();
    if protein_col.is_none() {
        header.push(&columns.protein);
    }
    writer.write_record(&header).map_err(write_err)?;

    let entries = table.transcripts.iter().zip(&table.rows).zip(translations);
    for ((transcript, records), translation) in entries {
        let Some(translation) = translation else {
            continue;
        };
        for (record, fragment) in records.iter().zip(&translation.fragments) {
            let mut out: Vec<&str> = (0..width)
                .map(|i| {
                    if Some(i) == id_col {
                        transcript.id()
                    } else if Some(i) == protein_col {
                        fragment.protein.as_str()
                    } else {
                        record.get(i).unwrap_or("")
                    }
                })
                .collect();
            if protein_col.is_none() {
                out.push(&fragment.protein);
            }
            writer.write_record(&out).map_err(write_err)?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Reads `input`, translates every transcript, and writes the annotated table
/// to `output`. Transcripts that fail are left out of the output and listed
/// in the report.
pub fn translate_csv(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    columns: &ExonColumns,
    on_error: OnError,
) -> ExonResult<BatchReport> {
    let ReadReport {
        data: table,
        skipped,
    } = read_exon_table(input, columns, on_error)?;
    let results = translate_all(&table.transcripts);

    let mut report = BatchReport {
        skipped,
        ..BatchReport::default()
    };
    let mut translations = Vec::with_capacity(results.len());
    for (transcript, result) in table.transcripts.iter().zip(results) {
        match result {
            Ok(translation) => {
                if translation.is_translated() {
                    report.translated += 1;
                } else {
                    report.unresolved += 1;
                }
                translations.push(Some(translation));
            }
            Err(err) => {
                warn!("transcript {} not translated: {err}", transcript.id());
                report.failed.push(FailedTranscript {
                    transcript_id: transcript.id().into(),
                    message: err.to_string().into_boxed_str(),
                });
                translations.push(None);
            }
        }
    }

    write_translated_csv(output, &table, &translations, columns)?;
    info!(
        "translated {} transcripts ({} without start, {} failed, {} rows skipped)",
        report.translated,
        report.unresolved,
        report.failed.len(),
        report.skipped.len()
    );
    Ok(report)
}

fn parse_exon(
    record: &StringRecord,
    row: usize,
    idx: &ColumnIndices,
    columns: &ExonColumns,
    path: &str,
) -> ExonResult<Exon> {
    let rank_field = field(record, idx.rank, &columns.rank, row, path)?;
    let rank = parse_integral(rank_field)
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| invalid_field(row, &columns.rank, rank_field, path))?;

    let start_phase = parse_phase(record, idx.start_phase, &columns.start_phase, row, path)?;
    let end_phase = parse_phase(record, idx.end_phase, &columns.end_phase, row, path)?;

    let seq_field = field(record, idx.sequence, &columns.sequence, row, path)?;
    let sequence = NucleotideSeq::new(normalize_seq_bytes(seq_field)).map_err(|err| {
        ExonError::CsvInvalidSequence {
            row,
            column: columns.sequence.clone(),
            path: path.to_string(),
            source: Box::new(err),
        }
    })?;

    Ok(Exon::new(rank, sequence, start_phase, end_phase))
}

fn parse_phase(
    record: &StringRecord,
    index: usize,
    column: &str,
    row: usize,
    path: &str,
) -> ExonResult<Phase> {
    let value = field(record, index, column, row, path)?;
    parse_integral(value)
        .and_then(Phase::from_i64)
        .ok_or_else(|| invalid_field(row, column, value, path))
}

/// Integer field; integral floats such as `2.0` are accepted too.
fn parse_integral(value: &str) -> Option<i64> {
    value.parse::<i64>().ok().or_else(|| {
        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.fract() == 0.0)
            .map(|v| v as i64)
    })
}

fn field<'r>(
    record: &'r StringRecord,
    index: usize,
    column: &str,
    row: usize,
    path: &str,
) -> ExonResult<&'r str> {
    record
        .get(index)
        .map(str::trim)
        .ok_or_else(|| ExonError::CsvMissingField {
            row,
            column: column.to_string(),
            path: path.to_string(),
        })
}

fn invalid_field(row: usize, column: &str, value: &str, path: &str) -> ExonError {
    ExonError::CsvInvalidField {
        row,
        column: column.to_string(),
        value: value.to_string(),
        path: path.to_string(),
    }
}

fn resolve_column(name: &str, headers: &StringRecord, path: &str) -> ExonResult<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| ExonError::CsvMissingColumn {
            name: name.to_string(),
            headers: headers.iter().map(|s| s.to_string()).collect(),
            path: path.to_string(),
        })
}

fn error_column(err: &ExonError) -> &str {
    match err {
        ExonError::CsvInvalidField { column, .. }
        | ExonError::CsvInvalidSequence { column, .. }
        | ExonError::CsvMissingField { column, .. } => column,
        _ => "",
    }
}
