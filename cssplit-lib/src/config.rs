use std::path::PathBuf;

/// Maximum number of selectors a legacy engine applies from one stylesheet.
pub const SELECTOR_LIMIT: usize = 4095;

/// Knobs for one splitting run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitConfig {
    /// Selector ceiling per output file.
    pub selector_limit: usize,
    /// Directory created next to the input file, e.g. `ie9`.
    pub output_dir_name: String,
    /// Chunk files are named `<prefix><index>.css`.
    pub chunk_prefix: String,
    /// Name of the entry stylesheet that imports every chunk.
    pub manifest_name: String,
    /// Where the input's `@import`s are resolved from. Relative paths are
    /// taken from the input file's directory.
    pub root_path: PathBuf,
    /// Fail on a missing input file instead of skipping the run.
    pub strict_input: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        SplitConfig {
            selector_limit: SELECTOR_LIMIT,
            output_dir_name: "ie9".to_string(),
            chunk_prefix: "style".to_string(),
            manifest_name: "style.css".to_string(),
            root_path: PathBuf::from("."),
            strict_input: false,
        }
    }
}

impl SplitConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selector_limit(mut self, limit: usize) -> Self {
        self.selector_limit = limit;
        self
    }

    pub fn with_output_dir_name(mut self, name: impl Into<String>) -> Self {
        self.output_dir_name = name.into();
        self
    }

    pub fn with_chunk_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.chunk_prefix = prefix.into();
        self
    }

    pub fn with_root_path(mut self, root_path: impl Into<PathBuf>) -> Self {
        self.root_path = root_path.into();
        self
    }

    pub fn strict(mut self, strict_input: bool) -> Self {
        self.strict_input = strict_input;
        self
    }

    /// File name of the chunk at `index`.
    pub fn chunk_file_name(&self, index: usize) -> String {
        format!("{}{}.css", self.chunk_prefix, index)
    }
}
