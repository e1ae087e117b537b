//! `subsift` — a small, focused SRT subtitle parsing and conversion library.
//!
//! This crate provides:
//! - A tolerant SRT parser (malformed blocks are skipped and counted, never fatal)
//! - Timecode and segment data structures
//! - Pluggable output encoders (JSON, normalized SRT)
//! - A batch pipeline that converts many files and aggregates a summary
//!
//! The library is designed to be used by both CLI tools and host applications,
//! with an emphasis on clarity, streaming output, and minimal surprises.

// High-level API (most consumers should start here).
pub mod opts;
pub mod pipeline;

// The SRT parser and its data model.
pub mod parser;
pub mod segment;
pub mod timecode;

// Input byte decoding.
pub mod decode;

// Output selection and encoder interfaces.
pub mod output_type;
pub mod segment_encoder;

// Output encoders that serialize segments into various formats.
pub mod json_array_encoder;
pub mod srt_encoder;

// Logging configuration and control.
#[cfg(feature = "logging")]
pub mod logging;

mod error;

pub use error::{Error, Result};
