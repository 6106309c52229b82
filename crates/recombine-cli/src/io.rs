//! Reading documents and writing generated output.
//!
//! Documents are UTF-8, optionally with a byte order mark. The mark is
//! stripped on read and written back to the output so the output keeps the
//! encoding of its input.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::InputError;

pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const UTF16_LE_BOM: &[u8] = b"\xFF\xFE";
const UTF16_BE_BOM: &[u8] = b"\xFE\xFF";

/// A document read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub path: PathBuf,
    /// Contents without the byte order mark.
    pub text: String,
    pub had_bom: bool,
}

/// Read and decode the document at `path`.
///
/// # Errors
///
/// Fails when the file cannot be read, carries a UTF-16 byte order mark or
/// is not valid UTF-8.
pub fn read_document(path: &Path) -> Result<SourceDocument, InputError> {
    let bytes = std::fs::read(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    decode_document(path, bytes)
}

/// Decode raw document bytes.
pub fn decode_document(path: &Path, mut bytes: Vec<u8>) -> Result<SourceDocument, InputError> {
    if bytes.starts_with(UTF16_LE_BOM) || bytes.starts_with(UTF16_BE_BOM) {
        let encoding = if bytes.starts_with(UTF16_LE_BOM) {
            "UTF-16LE"
        } else {
            "UTF-16BE"
        };
        return Err(InputError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding,
        });
    }
    let had_bom = bytes.starts_with(UTF8_BOM);
    if had_bom {
        bytes.drain(..UTF8_BOM.len());
    }
    let text = String::from_utf8(bytes).map_err(|source| InputError::InvalidUtf8 {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(SourceDocument {
        path: path.to_path_buf(),
        text,
        had_bom,
    })
}

/// Open the output sink: `path` when given, stdout otherwise.
///
/// Writes the UTF-8 byte order mark first when `bom` is set.
///
/// # Errors
///
/// Fails when the file cannot be created or the mark cannot be written.
pub fn open_output(path: Option<&Path>, bom: bool) -> io::Result<Box<dyn Write>> {
    let mut out: Box<dyn Write> = match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    if bom {
        out.write_all(UTF8_BOM)?;
    }
    Ok(out)
}
