//! Line-by-line JSONL reading.

use chrono::{DateTime, SecondsFormat, Utc};
use log::{debug, trace, warn};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Stream a JSONL file, handing every record that deserializes as `T` to
/// `visit`. Blank and malformed lines (partial writes, unexpected shapes,
/// invalid UTF-8) are skipped. Only I/O failures are returned.
pub fn for_each_record<T, F>(path: &Path, mut visit: F) -> io::Result<()>
where
    T: DeserializeOwned,
    F: FnMut(T),
{
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    let mut line_number = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_number += 1;

        let line = buf.trim_ascii();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_slice::<T>(line) {
            Ok(record) => visit(record),
            Err(err) => trace!("Skipping line {} of {:?}: {}", line_number, path, err),
        }
    }

    Ok(())
}

/// Log a failure to read a session file. Files that vanished between
/// enumeration and reading are expected; anything else is a warning.
pub fn report_read_error(path: &Path, err: &io::Error) {
    if err.kind() == io::ErrorKind::NotFound {
        debug!("Session file disappeared before it could be read: {:?}", path);
    } else {
        warn!("Failed to read session file {:?}: {}", path, err);
    }
}

/// Modification time of a file as an RFC 3339 UTC timestamp
pub fn file_modified_at(path: &Path) -> Option<String> {
    let modified = path.metadata().and_then(|m| m.modified()).ok()?;
    Some(to_rfc3339(DateTime::<Utc>::from(modified)))
}

/// Last-resort activity timestamp for a file with no usable record times
pub fn fallback_activity(path: &Path) -> String {
    file_modified_at(path).unwrap_or_else(|| to_rfc3339(Utc::now()))
}

fn to_rfc3339(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::Write;

    #[derive(Deserialize)]
    struct Line {
        n: u32,
    }

    #[test]
    fn skips_malformed_and_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"n\":1}\n\n{not json\n\xff\xfe\n{\"n\":2}\n{\"n\":3}\n{\"n\":4").unwrap();
        file.flush().unwrap();

        let mut seen = Vec::new();
        for_each_record::<Line, _>(file.path(), |line| seen.push(line.n)).unwrap();
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = for_each_record::<Line, _>(&dir.path().join("absent.jsonl"), |_| {}).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn modified_time_uses_utc_millis() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let stamp = filetime::FileTime::from_unix_time(1_767_225_600, 0);
        filetime::set_file_mtime(file.path(), stamp).unwrap();
        assert_eq!(
            file_modified_at(file.path()).as_deref(),
            Some("2026-01-01T00:00:00.000Z")
        );
    }
}
