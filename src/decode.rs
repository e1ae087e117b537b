//! Input decoding: subtitle file bytes → text.
//!
//! This module isolates the one hard per-file failure in the whole flow. The
//! parser never fails on malformed *text*; bytes that cannot be interpreted
//! as text at all are a different matter, and callers need to tell that apart
//! from a file that simply parsed to zero segments. That distinction is
//! `Error::Decode`.
//!
//! Policy:
//! - a recognized BOM (UTF-8, UTF-16 LE/BE) selects the encoding
//! - otherwise bytes are decoded as UTF-8
//! - any decode error is fatal for that file, never repaired with
//!   replacement characters

use std::path::Path;

use encoding_rs::{Encoding, UTF_8};

use crate::{Error, Result};

/// Decode the raw bytes of one subtitle file into text.
///
/// `file` is used only to label the error; it is not read.
pub fn decode_bytes(file: &Path, bytes: &[u8]) -> Result<String> {
    let encoding = Encoding::for_bom(bytes).map_or(UTF_8, |(enc, _)| enc);

    // decode() strips the BOM itself when present.
    let (text, actual, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(Error::decode(
            file.display().to_string(),
            format!("invalid {} byte sequence", actual.name()),
        ));
    }

    Ok(text.into_owned())
}
