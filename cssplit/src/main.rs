use clap::{Parser, ValueEnum};
use cssplit_lib::{
    FsStore, LightningCompiler, PassthroughCompiler, SplitConfig, SplitError, SplitOutcome,
    SplitStatus, Splitter, SELECTOR_LIMIT,
};
use std::path::{Path, PathBuf};

const CSSPLIT_INTRO: &str = r#"
    cssplit - keeps every stylesheet under the legacy selector limit
"#;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CompilerKind {
    /// Parse and re-print the input with LightningCSS.
    Lightning,
    /// Use the input as-is.
    Passthrough,
}

#[derive(Parser)]
#[command(name = "cssplit")]
#[command(about = "Split a stylesheet into files under the selector limit")]
struct Args {
    /// Input stylesheet.
    input: PathBuf,

    /// Maximum selectors per output file.
    #[arg(short, long, default_value_t = SELECTOR_LIMIT)]
    limit: usize,

    /// Output directory name, created next to the input.
    #[arg(short, long, default_value = "ie9")]
    out_dir: String,

    /// How the input is turned into flat CSS.
    #[arg(short, long, value_enum, default_value_t = CompilerKind::Lightning)]
    compiler: CompilerKind,

    /// Minify the compiled CSS (lightning compiler only).
    #[arg(long)]
    minify: bool,

    /// Directory the input's @imports are resolved from, relative to the
    /// input's own directory.
    #[arg(long, default_value = ".")]
    root_path: PathBuf,

    /// Fail when the input file does not exist.
    #[arg(long)]
    strict: bool,
}

fn run(args: &Args) -> Result<SplitOutcome, SplitError> {
    let config = SplitConfig::default()
        .with_selector_limit(args.limit)
        .with_output_dir_name(&args.out_dir)
        .with_root_path(&args.root_path)
        .strict(args.strict);
    let input: &Path = &args.input;

    match args.compiler {
        CompilerKind::Lightning => {
            let compiler = LightningCompiler {
                minify: args.minify,
            };
            Splitter::new(config, compiler, FsStore).run(input)
        }
        CompilerKind::Passthrough => Splitter::new(config, PassthroughCompiler, FsStore).run(input),
    }
}

fn main() {
    env_logger::init();
    println!("{}", CSSPLIT_INTRO);

    // parse the args given in terminal
    let args: Args = Args::parse();

    match run(&args) {
        Ok(outcome) => {
            match &outcome.status {
                SplitStatus::MissingInput => {
                    log::warn!("Input {} not found, nothing written", args.input.display())
                }
                SplitStatus::BelowLimit { selectors } => println!(
                    "{} selectors, within the limit of {}. Nothing to split.",
                    selectors, args.limit
                ),
                SplitStatus::Split { selectors, files } => println!(
                    "Split {} selectors into {} files.",
                    selectors,
                    files.len()
                ),
            }
            println!("{}", outcome.manifest_path.display());
        }
        Err(e) => {
            eprintln!("Error splitting stylesheet: {}", e);
            std::process::exit(1);
        }
    }
}
