use std::path::PathBuf;

/// All errors produced while splitting a stylesheet.
///
/// Nothing is retried. Failures during assembly leave whatever chunk files
/// were already written in place.
#[derive(thiserror::Error, Debug)]
pub enum SplitError {
    #[error("Input file not found: {path}")]
    MissingInputFile { path: PathBuf },

    #[error("Style compilation failed: {0}")]
    Compile(#[from] CompileError),

    #[error("Malformed stylesheet at byte {offset}: {reason}")]
    MalformedStructure { offset: usize, reason: String },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SplitError {
    pub(crate) fn malformed(offset: usize, reason: impl Into<String>) -> Self {
        Self::MalformedStructure {
            offset,
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Rejection of the source text by a [`StyleCompiler`](crate::compiler::StyleCompiler).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{}{}", .message, location_suffix(.line, .column))]
pub struct CompileError {
    pub message: String,
    pub line: Option<u32>,
    pub column: Option<u32>,
}

impl CompileError {
    pub fn new(message: impl Into<String>) -> Self {
        CompileError {
            message: message.into(),
            line: None,
            column: None,
        }
    }

    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

fn location_suffix(line: &Option<u32>, column: &Option<u32>) -> String {
    match (line, column) {
        (Some(line), Some(column)) => format!(" (line {}, column {})", line, column),
        _ => String::new(),
    }
}
