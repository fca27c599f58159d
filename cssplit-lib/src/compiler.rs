//! Style compilers that turn source text into the flat CSS the splitter reads.

use std::io;
use std::path::{Path, PathBuf};

use lightningcss::bundler::{Bundler, FileProvider, SourceProvider};
use lightningcss::error::{Error as LcssError, ErrorLocation};
use lightningcss::printer::PrinterOptions;
use lightningcss::stylesheet::ParserOptions;

use crate::error::CompileError;

/// Settings handed to a [`StyleCompiler`] for one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileConfig {
    /// Directory the source's own `@import`s are resolved against.
    pub root_path: PathBuf,
    /// Name reported in compiler diagnostics.
    pub filename: String,
}

pub trait StyleCompiler {
    fn compile(&self, source: &str, config: &CompileConfig) -> Result<String, CompileError>;
}

/// For sources that are already plain CSS.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughCompiler;

impl StyleCompiler for PassthroughCompiler {
    fn compile(&self, source: &str, _config: &CompileConfig) -> Result<String, CompileError> {
        Ok(source.to_string())
    }
}

/// Bundles the source with LightningCSS and prints it back out.
///
/// `@import`s of the source are resolved against
/// [`CompileConfig::root_path`] and inlined; imports inside imported files
/// are resolved next to those files. Comments are dropped, syntax errors
/// and unreadable imports are reported as [`CompileError`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LightningCompiler {
    pub minify: bool,
}

impl LightningCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn minified() -> Self {
        LightningCompiler { minify: true }
    }
}

impl StyleCompiler for LightningCompiler {
    fn compile(&self, source: &str, config: &CompileConfig) -> Result<String, CompileError> {
        let provider = RootedProvider::new(source, config);
        let parser_opts = ParserOptions {
            filename: config.filename.clone(),
            ..ParserOptions::default()
        };
        let mut bundler = Bundler::new(&provider, None, parser_opts);
        let sheet = bundler.bundle(&provider.entry).map_err(to_compile_error)?;

        let printer_opts = PrinterOptions {
            minify: self.minify,
            ..PrinterOptions::default()
        };
        let printed = sheet.to_css(printer_opts).map_err(to_compile_error)?;
        Ok(printed.code)
    }
}

/// Serves the in-memory source as if it sat in the root directory, and
/// everything else from disk.
struct RootedProvider<'s> {
    entry: PathBuf,
    source: &'s str,
    files: FileProvider,
}

impl<'s> RootedProvider<'s> {
    fn new(source: &'s str, config: &CompileConfig) -> Self {
        let name = Path::new(&config.filename)
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("input.css"));
        RootedProvider {
            entry: config.root_path.join(name),
            source,
            files: FileProvider::new(),
        }
    }
}

impl SourceProvider for RootedProvider<'_> {
    type Error = io::Error;

    fn read<'a>(&'a self, file: &Path) -> Result<&'a str, Self::Error> {
        if file == self.entry {
            return Ok(self.source);
        }
        self.files.read(file).map_err(|err| {
            io::Error::new(err.kind(), format!("cannot read {}: {}", file.display(), err))
        })
    }

    fn resolve(&self, specifier: &str, originating_file: &Path) -> Result<PathBuf, Self::Error> {
        if specifier.contains("://") || specifier.starts_with("//") {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                format!("remote import {} cannot be inlined", specifier),
            ));
        }
        self.files.resolve(specifier, originating_file)
    }
}

fn to_compile_error<T: std::fmt::Display>(err: LcssError<T>) -> CompileError {
    let compile_error = CompileError::new(err.kind.to_string());
    match err.loc {
        // LightningCSS lines are zero-based.
        Some(ErrorLocation { line, column, .. }) => compile_error.at(line + 1, column),
        None => compile_error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn passthrough_returns_source_unchanged() {
        let css = "/* keep */ .a { color: red }";
        let out = PassthroughCompiler.compile(css, &CompileConfig::default()).unwrap();
        assert_eq!(out, css);
    }

    #[test]
    fn lightning_prints_rules_and_media_blocks() {
        let css = ".a, .b { color: red } /* gone */ @media print { .c { color: blue } }";
        let out = LightningCompiler::new()
            .compile(css, &CompileConfig::default())
            .unwrap();
        assert!(out.contains(".a, .b"));
        assert!(out.contains("@media print"));
        assert!(!out.contains("gone"));
    }

    #[test]
    fn lightning_minify_drops_whitespace() {
        let css = ".a {\n  color: red;\n}\n";
        let out = LightningCompiler::minified()
            .compile(css, &CompileConfig::default())
            .unwrap();
        assert!(out.starts_with(".a{color:"));
        assert!(!out.contains('\n'));
    }

    #[test]
    fn lightning_reports_syntax_errors() {
        let config = CompileConfig {
            filename: "broken.css".to_string(),
            ..CompileConfig::default()
        };
        let err = LightningCompiler::new().compile(".a { color: red } ..b { color: blue }", &config);
        assert!(err.is_err());
    }

    #[test]
    fn lightning_inlines_imports_from_the_root_path() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("dep.css"), ".dep { color: green }").unwrap();
        let source = "@import \"dep.css\";\n.a { color: red }";

        let config = CompileConfig {
            root_path: root.path().to_path_buf(),
            filename: "/elsewhere/main.css".to_string(),
        };
        let out = LightningCompiler::new().compile(source, &config).unwrap();
        assert!(out.contains(".dep"));
        assert!(out.contains(".a"));
        assert!(!out.contains("@import"));
        assert!(out.find(".dep").unwrap() < out.find(".a").unwrap());

        let missing = CompileConfig {
            root_path: PathBuf::from("/nonexistent"),
            ..config
        };
        let err = LightningCompiler::new().compile(source, &missing).unwrap_err();
        assert!(err.message.contains("dep.css"), "{}", err);
    }

    #[test]
    fn nested_imports_resolve_next_to_their_file() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("parts")).unwrap();
        fs::write(
            root.path().join("parts/outer.css"),
            "@import \"inner.css\";\n.outer { color: red }",
        )
        .unwrap();
        fs::write(root.path().join("parts/inner.css"), ".inner { color: blue }").unwrap();

        let config = CompileConfig {
            root_path: root.path().to_path_buf(),
            filename: "main.css".to_string(),
        };
        let out = LightningCompiler::new()
            .compile("@import \"parts/outer.css\";\n.main { color: black }", &config)
            .unwrap();
        let positions: Vec<usize> = [".inner", ".outer", ".main"]
            .iter()
            .map(|name| out.find(name).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", out);
    }

    #[test]
    fn remote_imports_are_rejected() {
        let err = LightningCompiler::new()
            .compile(
                "@import url(\"https://example.com/a.css\");\n.a {}",
                &CompileConfig::default(),
            )
            .unwrap_err();
        assert!(err.message.contains("remote import"), "{}", err);
    }
}
