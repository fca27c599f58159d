use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::compiler::{CompileConfig, StyleCompiler};
use crate::config::SplitConfig;
use crate::error::SplitError;
use crate::parser::{comments, extract};
use crate::store::FileStore;
use crate::style::{assemble, partition};

/// What a run did with its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitStatus {
    /// The input file was not there; nothing was read or written.
    MissingInput,
    /// The sheet fits in one resource; nothing was written.
    BelowLimit { selectors: usize },
    /// Chunk files and the manifest were written.
    Split { selectors: usize, files: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOutcome {
    /// `<input dir>/<output dir>/<manifest>`, whether or not it was written.
    pub manifest_path: PathBuf,
    pub status: SplitStatus,
}

impl SplitOutcome {
    pub fn manifest_written(&self) -> bool {
        matches!(self.status, SplitStatus::Split { .. })
    }
}

/// Runs the whole pipeline for one input file.
pub struct Splitter<C, S> {
    config: SplitConfig,
    compiler: C,
    store: S,
}

impl<C: StyleCompiler, S: FileStore> Splitter<C, S> {
    pub fn new(config: SplitConfig, compiler: C, store: S) -> Self {
        Splitter {
            config,
            compiler,
            store,
        }
    }

    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Directory the chunks of `input` are written to.
    pub fn output_dir(&self, input: &Path) -> PathBuf {
        input
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(&self.config.output_dir_name)
    }

    /// Directory the compiler resolves the input's `@import`s against. A
    /// relative root path is taken from the input's directory.
    pub fn import_root(&self, input: &Path) -> PathBuf {
        if self.config.root_path.is_absolute() {
            return self.config.root_path.clone();
        }
        input
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(&self.config.root_path)
    }

    pub fn run(&self, input: &Path) -> Result<SplitOutcome, SplitError> {
        info!("Compilation process started for {}", input.display());
        let out_dir = self.output_dir(input);
        let manifest_path = out_dir.join(&self.config.manifest_name);

        if !self.store.exists(input) {
            if self.config.strict_input {
                return Err(SplitError::MissingInputFile {
                    path: input.to_path_buf(),
                });
            }
            warn!("{} does not exist, nothing to split", input.display());
            return Ok(SplitOutcome {
                manifest_path,
                status: SplitStatus::MissingInput,
            });
        }

        let source = self.store.read_all(input)?;
        let compile_config = CompileConfig {
            root_path: self.import_root(input),
            filename: input.display().to_string(),
        };
        let css = self.compiler.compile(&source, &compile_config)?;
        let css = comments::strip_comments(&css);
        let sheet = extract::extract(&css)?;
        debug!("{}", sheet);

        let selectors = sheet.selector_count();
        let limit = self.config.selector_limit;
        if selectors <= limit {
            info!("{} selectors, within the limit of {}", selectors, limit);
            return Ok(SplitOutcome {
                manifest_path,
                status: SplitStatus::BelowLimit { selectors },
            });
        }

        info!("{} selectors exceed the limit of {}, splitting", selectors, limit);
        let chunks = partition::partition(&sheet, limit);
        let files = assemble::name_chunks(&chunks, &sheet.namespaces, &self.config);
        let manifest = assemble::render_manifest(&files, &sheet);
        let written =
            assemble::write_files(&self.store, &out_dir, &files, &manifest, &self.config)?;
        info!("Compilation process ended");

        Ok(SplitOutcome {
            manifest_path: written,
            status: SplitStatus::Split {
                selectors,
                files: files.into_iter().map(|f| f.name).collect(),
            },
        })
    }
}

pub mod css_split {
    use super::*;
    use crate::compiler::LightningCompiler;
    use crate::store::FsStore;

    /// Split the stylesheet at `input` into `<input dir>/ie9/style*.css`.
    ///
    /// Returns `<input dir>/ie9/style.css`. That file only exists when the
    /// sheet had more selectors than the limit; a missing input is skipped
    /// and still yields the path.
    pub fn compile_with_splitting(input: &Path) -> Result<PathBuf, SplitError> {
        let splitter = Splitter::new(SplitConfig::default(), LightningCompiler::new(), FsStore);
        splitter.run(input).map(|outcome| outcome.manifest_path)
    }
}
