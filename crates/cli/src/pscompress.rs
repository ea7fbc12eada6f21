//! pscompress - Shrink and obfuscate PostScript programs
//!
//! A command line tool that strips comments, removes unused procedures and
//! mangles names in a PostScript program. Reads a file or standard input
//! and writes the compressed program to standard output or a file.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use pscompress_core::{Compressor, DefinitionScan};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// A command line tool for compressing PostScript programs.
///
/// Setup lines (%!, %% and << lines) and the %%Trailer / %%EOF footer are
/// copied verbatim; everything else is rewritten.
#[derive(Parser, Debug)]
#[command(name = "pscompress")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// PostScript file to compress, or "-" for stdin
    #[arg(default_value = "-")]
    file: PathBuf,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    // === Pass options ===
    /// Keep comments in the output (each one ends its line)
    #[arg(long = "keep-comments", action = ArgAction::SetTrue)]
    keep_comments: bool,

    /// Keep procedures that are never called
    #[arg(long = "keep-dead-code", action = ArgAction::SetTrue)]
    keep_dead_code: bool,

    /// Do not rename variables or operators (implies --no-remangle)
    #[arg(long = "no-mangle", action = ArgAction::SetTrue)]
    no_mangle: bool,

    /// Keep first-seen name order instead of reassigning by use count
    #[arg(long = "no-remangle", action = ArgAction::SetTrue)]
    no_remangle: bool,

    /// Only treat `/name { ... } [bind] def` as a procedure definition
    #[arg(long = "strict-definitions", action = ArgAction::SetTrue)]
    strict_definitions: bool,

    /// Print a summary of what each pass did to stderr
    #[arg(long, action = ArgAction::SetTrue)]
    stats: bool,
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_compressor(args: &Args) -> Result<Compressor> {
    let scan = if args.strict_definitions {
        DefinitionScan::Strict
    } else {
        DefinitionScan::Lenient
    };
    Compressor::builder()
        .strip_comments(!args.keep_comments)
        .eliminate_dead_code(!args.keep_dead_code)
        .remangle(!args.no_remangle)
        .mangle(!args.no_mangle)
        .definition_scan(scan)
        .build()
        .context("invalid compressor configuration")
}

fn read_input(path: &PathBuf) -> Result<String> {
    let mut text = String::new();
    if path.as_os_str() == "-" {
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
    } else {
        File::open(path)
            .and_then(|mut file| file.read_to_string(&mut text))
            .with_context(|| format!("failed to read {}", path.display()))?;
    }
    Ok(text)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let compressor = build_compressor(&args)?;
    tracing::debug!(options = ?compressor.options(), "built compressor");
    let source = read_input(&args.file)?;
    tracing::debug!(file = %args.file.display(), bytes = source.len(), "read input");
    let compressed = compressor
        .compress_with_stats(&source)
        .with_context(|| format!("failed to compress {}", args.file.display()))?;

    if args.stats {
        eprintln!("{}", compressed.stats);
    }

    // Open output only once compression succeeded, so failures leave no file
    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)
            .with_context(|| format!("failed to create output file {}", args.outfile))?;
        Box::new(BufWriter::new(file))
    };
    writeln!(output, "{}", compressed.text)?;
    output.flush()?;

    Ok(())
}
