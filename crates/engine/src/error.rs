use std::fmt;

#[derive(Debug)]
pub enum GapError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (missing input path, bad option value).
    ConfigValidation(String),
    /// Missing required column in a delimited input.
    MissingColumn { input: String, column: String },
    /// CSV-level read error in a delimited input.
    Csv { input: String, message: String },
    /// Input could not be decoded with any supported encoding.
    Encoding(String),
    /// IO error (file read, write, etc.).
    Io(String),
}

impl fmt::Display for GapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { input, column } => {
                write!(f, "{input}: missing column '{column}'")
            }
            Self::Csv { input, message } => write!(f, "{input}: {message}"),
            Self::Encoding(input) => write!(f, "{input}: undecodable with any supported encoding"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for GapError {}
