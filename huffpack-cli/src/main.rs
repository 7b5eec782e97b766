//! huffpack CLI - static Huffman file compression
//!
//! Compresses single files into `.huf` containers and back.

mod commands;
mod utils;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use commands::{
    TransformOptions, cmd_codes, cmd_completions, cmd_compress, cmd_decompress, cmd_info,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "huffpack")]
#[command(author, version, about = "Static Huffman file compression")]
#[command(long_about = "
huffpack compresses a file with a Huffman code built from its own byte
frequencies and stores the code tree alongside the packed bits.

Examples:
  huffpack compress notes.txt notes.huf
  huffpack decompress notes.huf notes.txt
  huffpack compress --raw notes.txt notes.raw
  huffpack info notes.huf
  huffpack codes notes.txt
  huffpack completions bash > huffpack.bash
")]
struct Cli {
    /// Log debug events to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    #[command(alias = "c")]
    Compress {
        /// File to compress
        source: PathBuf,

        /// Container to create
        dest: PathBuf,

        /// Write the headerless legacy layout
        #[arg(long)]
        raw: bool,

        /// Decode the result and compare it with the input before writing
        #[arg(long)]
        verify: bool,

        /// Overwrite the destination without asking
        #[arg(short, long)]
        force: bool,

        /// Show a progress spinner
        #[arg(short = 'P', long)]
        progress: bool,
    },

    /// Decompress a container
    #[command(alias = "d")]
    Decompress {
        /// Container to read
        source: PathBuf,

        /// File to create
        dest: PathBuf,

        /// Read the headerless legacy layout
        #[arg(long)]
        raw: bool,

        /// Overwrite the destination without asking
        #[arg(short, long)]
        force: bool,

        /// Show a progress spinner
        #[arg(short = 'P', long)]
        progress: bool,
    },

    /// Show the header of a container
    #[command(alias = "i")]
    Info {
        /// Container to inspect
        file: PathBuf,

        /// Treat the file as a headerless legacy container
        #[arg(long)]
        raw: bool,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Print the frequency and code table of a file
    Codes {
        /// File to analyse
        source: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Compress {
            source,
            dest,
            raw,
            verify,
            force,
            progress,
        } => cmd_compress(
            &source,
            &dest,
            &TransformOptions {
                raw,
                verify,
                force,
                progress,
            },
        ),
        Commands::Decompress {
            source,
            dest,
            raw,
            force,
            progress,
        } => cmd_decompress(
            &source,
            &dest,
            &TransformOptions {
                raw,
                verify: false,
                force,
                progress,
            },
        ),
        Commands::Info { file, raw, json } => cmd_info(&file, raw, json),
        Commands::Codes { source, json } => cmd_codes(&source, json),
        Commands::Completions { shell } => cmd_completions::<Cli>(shell),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
