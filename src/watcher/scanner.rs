//! Incremental magic-string scanning of a single file.
//!
//! A scan resumes at the cursor's byte offset, so bytes that were already
//! scanned on an earlier poll are never read again.

use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;

use super::snapshot::ScanCursor;
use crate::error::WatcherError;
use crate::Result;

/// A line containing the magic string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    /// 1-based line number within the file.
    pub line_number: u64,
    /// Line text without its trailing newline.
    pub text: String,
}

/// Scan `path` from `cursor` to end of file for lines containing `magic`.
///
/// Matching is an exact, case-sensitive substring test. Invalid UTF-8 is
/// decoded lossily. Returns the cursor positioned at end of file together
/// with the matches in file order.
///
/// # Errors
///
/// Returns [`WatcherError::FileAccess`] if the file cannot be opened, sought
/// or read.
pub fn scan_file(
    path: &Path,
    cursor: ScanCursor,
    magic: &str,
) -> Result<(ScanCursor, Vec<LineMatch>)> {
    let file = File::open(path).map_err(|e| WatcherError::file_access(path, e))?;
    let mut reader = BufReader::new(file);
    reader
        .seek(SeekFrom::Start(cursor.byte_offset))
        .map_err(|e| WatcherError::file_access(path, e))?;

    let mut next = cursor;
    let mut matches = Vec::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| WatcherError::file_access(path, e))?;
        if read == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        if line.contains(magic) {
            matches.push(LineMatch {
                line_number: next.line_number,
                text: strip_newline(&line).to_string(),
            });
        }

        next.byte_offset += read as u64;
        next.line_number += 1;
    }

    tracing::trace!(
        path = %path.display(),
        from = cursor.byte_offset,
        to = next.byte_offset,
        matches = matches.len(),
        "Scanned file"
    );

    Ok((next, matches))
}

fn strip_newline(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
