//! mdline - convert a Markdown file to HTML

mod error;
mod output;

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use mdline_core::{ConversionOutput, RenderOptions, convert_reader};

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "mdline")]
#[command(version, about = "Convert a Markdown file to HTML", long_about = None)]
#[command(after_help = "EXAMPLES:
    mdline notes.md              Write out/notes.html
    mdline notes.md index        Write out/index.html
    mdline notes.md --stdout     Print the HTML instead of writing a file")]
struct Cli {
    /// Markdown file to convert (must end in .md)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output name without extension (default: input base name)
    #[arg(value_name = "NAME")]
    name: Option<String>,

    /// Directory the HTML file is written to
    #[arg(short, long, value_name = "DIR", default_value = output::DEFAULT_OUT_DIR)]
    out_dir: PathBuf,

    /// Print the HTML to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// JSON file with render options
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Emit a bare fragment without the wrapping element
    #[arg(long)]
    no_wrapper: bool,

    /// Leave blocks that are still open at end of input unclosed
    #[arg(long)]
    keep_open_blocks: bool,

    /// Apply links, code, and emphasis inside list items
    #[arg(long)]
    inline_list_items: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Suppress log output and the success message
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "off"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let input = cli.input.as_deref().ok_or(CliError::MissingInput)?;
    let stem = output::markdown_stem(input)?;
    let options = render_options(cli)?;

    let output = convert_file(input, options)?;
    let diagnostics = output.diagnostics.with_file(&input.display().to_string());
    for warning in diagnostics.warnings {
        log::warn!("{warning}");
    }

    if cli.stdout {
        print!("{}", output.html);
        return Ok(());
    }

    let file_name = output::output_file_name(&stem, cli.name.as_deref());
    let path = output::write_output(&cli.out_dir, &file_name, output.html.as_bytes())?;
    log::info!("wrote {} bytes to {}", output.html.len(), path.display());
    if !cli.quiet {
        println!("HTML successfully written to {}", path.display());
    }
    Ok(())
}

/// Options from `--config`, then command-line flags on top.
fn render_options(cli: &Cli) -> Result<RenderOptions, CliError> {
    let mut options = match &cli.config {
        Some(path) => load_config(path)?,
        None => RenderOptions::default(),
    };
    if cli.no_wrapper {
        options.wrapper = None;
    }
    if cli.keep_open_blocks {
        options.close_open_blocks = false;
    }
    if cli.inline_list_items {
        options.inline_list_items = true;
    }
    log::debug!("render options: {:?}", options);
    Ok(options)
}

fn load_config(path: &Path) -> Result<RenderOptions, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    RenderOptions::from_json(&text).map_err(|source| CliError::Config {
        path: path.to_path_buf(),
        source,
    })
}

fn convert_file(path: &Path, options: RenderOptions) -> Result<ConversionOutput, CliError> {
    let file = File::open(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("converting {}", path.display());
    convert_reader(BufReader::new(file), options).map_err(|source| CliError::Convert {
        path: path.to_path_buf(),
        source,
    })
}
