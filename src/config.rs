use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{MenuError, Result};
use crate::models::{HostEntry, FIELDS_PER_ENTRY};

const COMMENT: u8 = b';';
const NEWLINE: u8 = b'\n';

/// `<home>/.ssh/menu`, or `None` when no home directory is known.
pub fn rc_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".ssh").join("menu"))
}

/// Loads entries from the rc file at `path`.
///
/// A file that is missing or cannot be read is the same as an empty file.
/// Only a malformed file is an error.
pub fn load_entries(path: &Path) -> Result<Vec<HostEntry>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!("No rc file at {:?}, only localhost is available", path);
            return Ok(Vec::new());
        }
        Err(e) => {
            tracing::warn!("Could not read rc file {:?}: {}. Treating it as empty", path, e);
            return Ok(Vec::new());
        }
    };

    let entries = parse_entries(&bytes)?;
    tracing::info!("Loaded {} entries from {:?}", entries.len(), path);
    Ok(entries)
}

/// Parses rc file contents into entries, in file order.
///
/// Each entry is seven lines: `name, host, user, descr, fqdn, ip, key`.
/// A `;` starts a comment that runs through the end of its line *including*
/// the newline. Whole-line comments therefore disappear, while a comment
/// after a value cuts the value short and joins what is left of it with the
/// next line. The number of newlines that survive must be a multiple of 7.
pub fn parse_entries(input: &[u8]) -> Result<Vec<HostEntry>> {
    let stripped = strip_comments(input);

    let count = stripped.iter().filter(|&&b| b == NEWLINE).count();
    if count % FIELDS_PER_ENTRY != 0 {
        tracing::error!(
            "Malformed rc file: {} lines is not a multiple of {}",
            count,
            FIELDS_PER_ENTRY
        );
        return Err(MenuError::MalformedConfig { count });
    }

    let mut lines = stripped.split(|&b| b == NEWLINE);
    let entries = (0..count / FIELDS_PER_ENTRY)
        .map(|_| {
            HostEntry::from_fields(std::array::from_fn(|_| {
                lines.next().map(decode_field).unwrap_or_default()
            }))
        })
        .collect();

    // Whatever follows the last newline was never counted as a line.
    if let Some(rest) = lines.next() {
        if rest.iter().any(|b| !b.is_ascii_whitespace()) {
            tracing::warn!(
                "Ignoring unterminated last line in rc file: {:?}",
                String::from_utf8_lossy(rest)
            );
        }
    }

    Ok(entries)
}

fn strip_comments(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut bytes = input.iter().copied();
    let mut line = 1;

    while let Some(b) = bytes.next() {
        if b != COMMENT {
            if b == NEWLINE {
                line += 1;
            }
            out.push(b);
            continue;
        }

        if out.last().is_some_and(|&last| last != NEWLINE) {
            tracing::warn!("Comment after a value on line {}, the value is cut at ';'", line);
        }
        for skipped in bytes.by_ref() {
            if skipped == NEWLINE {
                break;
            }
        }
        line += 1;
    }

    out
}

fn decode_field(line: &[u8]) -> String {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}
