//! External error log tail
//!
//! Failed steps carry the last line of the host's diagnostic log (PHP's
//! `error_log` target in a typical setup) as `errorLog` metadata.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Default location of the host diagnostic log
pub const DEFAULT_ERROR_LOG: &str = "/tmp/php-errors";

/// Bytes read per backward step when locating the last line
const TAIL_CHUNK: u64 = 8 * 1024;

/// Reads the last line of an external log
pub trait LogTailReader {
    fn last_line(&self) -> io::Result<String>;
}

/// Boxed reader
pub type BoxedTailReader = Box<dyn LogTailReader>;

/// Tails a file on disk, like `tail -n1`
#[derive(Debug, Clone)]
pub struct FileTail {
    path: PathBuf,
}

impl FileTail {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogTailReader for FileTail {
    fn last_line(&self) -> io::Result<String> {
        let mut file = File::open(&self.path)?;
        let tail = read_tail(&mut file, TAIL_CHUNK)?;
        Ok(last_line_of(&String::from_utf8_lossy(&tail)))
    }
}

/// Bytes from the start of the last line to the end of `src`.
///
/// Scans backwards `chunk` bytes at a time, so the cost depends on the length
/// of the last line, not of the whole log.
fn read_tail<R: Read + Seek>(src: &mut R, chunk: u64) -> io::Result<Vec<u8>> {
    let end = src.seek(SeekFrom::End(0))?;

    // a trailing newline terminates the last line
    let mut limit = end;
    if end > 0 {
        let mut byte = [0u8; 1];
        src.seek(SeekFrom::Start(end - 1))?;
        src.read_exact(&mut byte)?;
        if byte[0] == b'\n' {
            limit -= 1;
        }
    }

    let mut start = limit;
    let mut buf = vec![0u8; chunk.max(1) as usize];
    while start > 0 {
        let len = (buf.len() as u64).min(start);
        let from = start - len;
        let window = &mut buf[..len as usize];
        src.seek(SeekFrom::Start(from))?;
        src.read_exact(window)?;
        if let Some(i) = window.iter().rposition(|&b| b == b'\n') {
            start = from + i as u64 + 1;
            break;
        }
        start = from;
    }

    src.seek(SeekFrom::Start(start))?;
    let mut tail = Vec::with_capacity((end - start) as usize);
    src.read_to_end(&mut tail)?;
    Ok(tail)
}

/// Disables the error log read; always yields an empty line.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoErrorLog;

impl LogTailReader for NoErrorLog {
    fn last_line(&self) -> io::Result<String> {
        Ok(String::new())
    }
}

/// Fixed line, for embedding and tests
#[derive(Debug, Clone)]
pub struct StaticTail(pub String);

impl LogTailReader for StaticTail {
    fn last_line(&self) -> io::Result<String> {
        Ok(self.0.clone())
    }
}

/// Last line of `content`; a single trailing newline does not start a new line.
fn last_line_of(content: &str) -> String {
    let trimmed = content.strip_suffix('\n').unwrap_or(content);
    let last = trimmed.rsplit('\n').next().unwrap_or("");
    last.strip_suffix('\r').unwrap_or(last).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_line_of() {
        assert_eq!(last_line_of(""), "");
        assert_eq!(last_line_of("\n"), "");
        assert_eq!(last_line_of("one"), "one");
        assert_eq!(last_line_of("one\ntwo\n"), "two");
        assert_eq!(last_line_of("one\ntwo"), "two");
        assert_eq!(last_line_of("one\r\ntwo\r\n"), "two");
        assert_eq!(last_line_of("one\n\n"), "");
    }

    #[test]
    fn test_file_tail_reads_last_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("php-errors");
        std::fs::write(&path, "[19-Oct-2026] PHP Notice: first\n[19-Oct-2026] PHP Warning: last\n").unwrap();
        let tail = FileTail::new(&path);
        assert_eq!(tail.path(), path.as_path());
        assert_eq!(tail.last_line().unwrap(), "[19-Oct-2026] PHP Warning: last");
    }

    #[test]
    fn test_read_tail_small_chunks() {
        let cases: [(&str, &str); 6] = [
            ("", ""),
            ("\n", "\n"),
            ("one", "one"),
            ("one\ntwo\n", "two\n"),
            ("one\r\ntwo\r\n", "two\r\n"),
            ("one\n\n", "\n"),
        ];
        for chunk in [1, 2, 3, 64] {
            for (input, want) in cases {
                let mut src = io::Cursor::new(input.as_bytes());
                let tail = read_tail(&mut src, chunk).unwrap();
                assert_eq!(tail, want.as_bytes(), "input {:?}, chunk {}", input, chunk);
            }
        }
    }

    #[test]
    fn test_file_tail_spans_several_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("php-errors");
        let mut content = String::new();
        for i in 0..2000 {
            content.push_str(&format!("[19-Oct-2026] PHP Notice: entry {}\n", i));
        }
        // last line longer than one chunk
        let last = format!("PHP Fatal error: {}", "x".repeat(TAIL_CHUNK as usize * 2 + 17));
        content.push_str(&last);
        content.push('\n');
        assert!(content.len() as u64 > TAIL_CHUNK * 4);
        std::fs::write(&path, &content).unwrap();

        assert_eq!(FileTail::new(&path).last_line().unwrap(), last);
    }

    #[test]
    fn test_file_tail_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let tail = FileTail::new(dir.path().join("absent"));
        assert!(tail.last_line().is_err());
    }

    #[test]
    fn test_file_tail_invalid_utf8_is_lossy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log");
        std::fs::write(&path, b"ok\nbad \xff byte\n").unwrap();
        let line = FileTail::new(&path).last_line().unwrap();
        assert!(line.starts_with("bad "));
        assert!(line.ends_with(" byte"));
    }

    #[test]
    fn test_no_error_log() {
        assert_eq!(NoErrorLog.last_line().unwrap(), "");
    }
}
