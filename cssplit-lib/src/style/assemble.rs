//! Writing chunk files and the manifest that imports them.

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::SplitConfig;
use crate::error::SplitError;
use crate::store::FileStore;
use crate::style::partition::OutputChunk;
use crate::style::sheet::Stylesheet;

/// One file about to be written into the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkFile {
    pub name: String,
    pub contents: String,
    pub selector_count: usize,
}

/// Name chunks `style0.css`, `style1.css`, ... in order.
///
/// Every file starts with the `namespaces` statements, since a namespace
/// prefix is only in scope in the sheet that declares it.
pub fn name_chunks(
    chunks: &[OutputChunk],
    namespaces: &[String],
    config: &SplitConfig,
) -> Vec<ChunkFile> {
    let prelude: String = namespaces
        .iter()
        .map(|namespace| format!("{}\n", namespace))
        .collect();

    chunks
        .iter()
        .enumerate()
        .map(|(index, chunk)| ChunkFile {
            name: config.chunk_file_name(index),
            contents: format!("{}{}", prelude, chunk.text),
            selector_count: chunk.selector_count,
        })
        .collect()
}

/// Manifest text: `@charset` / `@import` / `@layer` statements of `sheet`,
/// one `@import` per file, then any other top-level statements.
///
/// `@namespace` never goes here; an `@import` after it would be ignored.
pub fn render_manifest(files: &[ChunkFile], sheet: &Stylesheet) -> String {
    let mut manifest = String::new();
    for statement in &sheet.statements {
        manifest.push_str(statement);
        manifest.push('\n');
    }
    for file in files {
        manifest.push_str(&format!("@import url(\"{}\");\n", file.name));
    }
    for statement in &sheet.other_statements {
        manifest.push_str(statement);
        manifest.push('\n');
    }
    manifest
}

/// Replace the contents of `out_dir` with `files` and `manifest`.
///
/// Returns the manifest path. Files written before a failure are left
/// behind.
pub fn write_files(
    store: &dyn FileStore,
    out_dir: &Path,
    files: &[ChunkFile],
    manifest: &str,
    config: &SplitConfig,
) -> Result<PathBuf, SplitError> {
    info!("Assembling {} files into {}", files.len(), out_dir.display());

    if store.exists(out_dir) {
        store.clear_dir(out_dir)?;
    } else {
        store.create_dir_if_absent(out_dir)?;
    }

    for file in files {
        debug!("Writing {} ({} selectors)", file.name, file.selector_count);
        store.write_all(&out_dir.join(&file.name), &file.contents)?;
    }

    let manifest_path = out_dir.join(&config.manifest_name);
    store.write_all(&manifest_path, manifest)?;
    info!("Wrote manifest {}", manifest_path.display());
    Ok(manifest_path)
}

/// Name `chunks`, then write them and the manifest for `sheet` into
/// `out_dir`.
pub fn assemble(
    store: &dyn FileStore,
    out_dir: &Path,
    chunks: &[OutputChunk],
    sheet: &Stylesheet,
    config: &SplitConfig,
) -> Result<PathBuf, SplitError> {
    let files = name_chunks(chunks, &sheet.namespaces, config);
    let manifest = render_manifest(&files, sheet);
    write_files(store, out_dir, &files, &manifest, config)
}
