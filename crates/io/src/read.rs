// Encoding-tolerant file reading

use std::io::Read;
use std::path::Path;

/// Which decoding produced the returned string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoding {
    Utf8,
    Windows1252,
}

/// Read a file as UTF-8, falling back to Windows-1252 (common for
/// Excel-exported extracts). The caller can log when the fallback fired.
/// A failure of the fallback decode is an error, not a silent mangle.
pub fn read_to_string_lossy(path: &Path) -> Result<(String, Decoding), String> {
    let mut file = std::fs::File::open(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    match String::from_utf8(bytes) {
        Ok(s) => Ok((s, Decoding::Utf8)),
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, had_errors) = encoding_rs::WINDOWS_1252.decode(&bytes);
            if had_errors {
                return Err(format!(
                    "{}: undecodable with any supported encoding",
                    path.display()
                ));
            }
            Ok((decoded.into_owned(), Decoding::Windows1252))
        }
    }
}
