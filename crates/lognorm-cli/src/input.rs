//! Reading command input from a file or stdin.

use crate::error::Result;
use std::io::Read;
use std::path::Path;

/// Read the whole input: `file` when given, stdin otherwise.
pub fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => read_from(std::io::stdin().lock()),
    }
}

/// Read everything from a reader.
pub fn read_from(mut reader: impl Read) -> Result<String> {
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"a\": 1}}").unwrap();
        assert_eq!(read_input(Some(file.path())).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn test_read_from_reader() {
        let text = read_from("line one\nline two".as_bytes()).unwrap();
        assert_eq!(text, "line one\nline two");
    }

    #[test]
    fn test_missing_file() {
        assert!(read_input(Some(Path::new("/nonexistent/input.txt"))).is_err());
    }
}
