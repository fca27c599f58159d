//! Splits a compiled stylesheet into files that each stay under the
//! selector limit of legacy engines, plus a manifest importing them in order.

pub mod compiler;
pub mod config;
pub mod error;
pub mod parser;
pub mod split_generate;
pub mod store;
pub mod style;

pub use compiler::{CompileConfig, LightningCompiler, PassthroughCompiler, StyleCompiler};
pub use config::{SplitConfig, SELECTOR_LIMIT};
pub use error::{CompileError, SplitError};
pub use split_generate::css_split::compile_with_splitting;
pub use split_generate::{SplitOutcome, SplitStatus, Splitter};
pub use store::{FileStore, FsStore, MemoryStore};
