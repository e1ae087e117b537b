//! High-level API for running batch subtitle conversions.
//!
//! This module is deliberately "high level": it wires up read → decode →
//! parse → encode → write, while keeping the lower-level pieces testable in
//! their own modules.
//!
//! Failure isolation:
//! - A malformed block is counted by the parser and never surfaces here.
//! - A file that cannot be read or decoded becomes a per-file failure in the
//!   summary; the rest of the batch proceeds.
//! - Only a structural failure — the output directory cannot be created —
//!   aborts the whole batch.
//!
//! Files are independent, so the batch runs them on a small pool of scoped
//! threads. Each worker claims inputs through an atomic cursor and reports
//! its outcome tagged with the input's position; outcomes are merged into
//! per-input slots, so the summary is identical no matter which file finishes
//! first.

use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::decode::decode_bytes;
use crate::json_array_encoder::JsonArrayEncoder;
use crate::opts::Opts;
use crate::output_type::OutputType;
use crate::parser::parse_with;
use crate::segment::Segment;
use crate::segment_encoder::SegmentEncoder;
use crate::srt_encoder::SrtEncoder;
use crate::{Error, Result};

/// One successfully converted input file, as reported in the batch summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    /// The input file, as given.
    pub file: String,

    /// Number of segments parsed out of the file. Zero is a normal outcome
    /// (an empty file, or one whose blocks were all skipped), not a failure.
    pub segments: usize,

    /// Path of the written output file. The key name is fixed by the summary
    /// contract even when the output format is not JSON.
    pub output_json: String,
}

/// One input file that could not be converted at all (unreadable or
/// undecodable bytes). Distinct from a file that parsed to zero segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    pub file: String,
    pub error: String,
}

/// The result of one batch conversion, consumed by UI layers for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub output_dir: String,

    /// Per-file reports, in input order regardless of completion order.
    pub files: Vec<FileReport>,

    /// Per-file hard failures, in input order. Omitted from JSON when empty
    /// so clean batches serialize with exactly the contract keys.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FileFailure>,

    /// Sum of all files' segment counts.
    pub total_segments: usize,

    /// Number of successfully converted files.
    pub file_count: usize,
}

enum Outcome {
    Converted(FileReport),
    Failed(FileFailure),
}

/// Convert a single subtitle file, writing its output under `out_dir`.
///
/// The output file is named after the input's stem with the format's
/// extension (`movie.srt` → `movie.json`).
pub fn convert_file(input: &Path, out_dir: &Path, opts: &Opts) -> Result<FileReport> {
    let bytes = fs::read(input)
        .map_err(|e| Error::msg(format!("failed to read '{}': {e}", input.display())))?;
    let text = decode_bytes(input, &bytes)?;

    let parsed = parse_with(&text, &opts.parse);
    if parsed.skipped > 0 {
        warn!(
            file = %input.display(),
            skipped = parsed.skipped,
            "skipped malformed subtitle blocks"
        );
    }

    let output = output_path(input, out_dir, opts.output_type);
    let file = fs::File::create(&output)
        .map_err(|e| Error::msg(format!("failed to create '{}': {e}", output.display())))?;
    let writer = BufWriter::new(file);

    match opts.output_type {
        OutputType::Json => write_all(JsonArrayEncoder::new(writer), &parsed.segments)?,
        OutputType::Srt => write_all(SrtEncoder::new(writer), &parsed.segments)?,
    }

    info!(
        file = %input.display(),
        segments = parsed.segments.len(),
        output = %output.display(),
        "converted subtitle file"
    );

    Ok(FileReport {
        file: input.display().to_string(),
        segments: parsed.segments.len(),
        output_json: output.display().to_string(),
    })
}

/// Convert a batch of subtitle files into `out_dir` and aggregate a summary.
///
/// Per-file failures are collected into `Summary::failures`; the only fatal
/// error is failing to create the output directory.
pub fn convert_batch(inputs: &[PathBuf], out_dir: &Path, opts: &Opts) -> Result<Summary> {
    fs::create_dir_all(out_dir).map_err(|e| {
        Error::msg(format!(
            "failed to create output directory '{}': {e}",
            out_dir.display()
        ))
    })?;

    let cursor = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<(usize, Outcome)>();

    let workers = num_cpus::get().min(inputs.len()).max(1);
    std::thread::scope(|scope| {
        for _ in 0..workers {
            let tx = tx.clone();
            let cursor = &cursor;
            scope.spawn(move || {
                loop {
                    let i = cursor.fetch_add(1, Ordering::Relaxed);
                    if i >= inputs.len() {
                        break;
                    }
                    let input = &inputs[i];
                    let outcome = match convert_file(input, out_dir, opts) {
                        Ok(report) => Outcome::Converted(report),
                        Err(err) => {
                            warn!(file = %input.display(), error = %err, "failed to convert file");
                            Outcome::Failed(FileFailure {
                                file: input.display().to_string(),
                                error: err.to_string(),
                            })
                        }
                    };
                    if tx.send((i, outcome)).is_err() {
                        break;
                    }
                }
            });
        }
    });
    drop(tx);

    // One slot per input: outcomes arrive in completion order but land in
    // input order, so the merge is commutative.
    let mut slots: Vec<Option<Outcome>> = inputs.iter().map(|_| None).collect();
    for (i, outcome) in rx {
        slots[i] = Some(outcome);
    }

    let mut files = Vec::new();
    let mut failures = Vec::new();
    let mut total_segments = 0;
    for outcome in slots.into_iter().flatten() {
        match outcome {
            Outcome::Converted(report) => {
                total_segments += report.segments;
                files.push(report);
            }
            Outcome::Failed(failure) => failures.push(failure),
        }
    }

    Ok(Summary {
        output_dir: out_dir.display().to_string(),
        file_count: files.len(),
        total_segments,
        files,
        failures,
    })
}

fn write_all<E: SegmentEncoder>(mut encoder: E, segments: &[Segment]) -> Result<()> {
    for seg in segments {
        encoder.write_segment(seg)?;
    }
    encoder.close()
}

fn output_path(input: &Path, out_dir: &Path, output_type: OutputType) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    out_dir.join(format!("{stem}.{}", output_type.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_uses_input_stem_and_format_extension() {
        let json = output_path(Path::new("/media/movie.srt"), Path::new("/out"), OutputType::Json);
        assert_eq!(json, Path::new("/out/movie.json"));

        let srt = output_path(Path::new("movie.srt"), Path::new("out"), OutputType::Srt);
        assert_eq!(srt, Path::new("out/movie.srt"));

        let no_ext = output_path(Path::new("captions"), Path::new("out"), OutputType::Json);
        assert_eq!(no_ext, Path::new("out/captions.json"));
    }
}
