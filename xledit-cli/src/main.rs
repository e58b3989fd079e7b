mod convert;
mod debug;
mod sync;
mod view;

use clap::{Parser, Subcommand};
use tracing_subscriber::fmt::SubscriberBuilder;

use crate::convert::{ConvertOptions, read_inputs, run_convert_command, with_baseline};
use crate::debug::run_debug_command;
use crate::sync::{SyncOptions, run_sync_command};
use crate::view::print_view;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log format detection and file handling to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert localization files between XLIFF 1.2 and flat JSON.
    Convert {
        /// Input files, read in order (put the en_us.json baseline first)
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<String>,
        /// Flat JSON baseline (en_us.json) to read before the inputs
        #[arg(short, long)]
        baseline: Option<String>,
        /// The output file to write the results to
        #[arg(short, long)]
        output: String,
        /// Output format (xliff, json); inferred from the output extension by default
        #[arg(short, long)]
        format: Option<String>,
        /// Only export the file(s) translated into this language
        #[arg(short, long)]
        lang: Option<String>,
        /// Indent with tabs instead of spaces
        #[arg(long)]
        tabs: bool,
        /// Spaces per indentation level
        #[arg(long, default_value_t = 2)]
        indent: usize,
    },

    /// View localization files.
    View {
        /// The input files to view, read in order
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<String>,

        /// Flat JSON baseline (en_us.json) to read before the inputs
        #[arg(short, long)]
        baseline: Option<String>,

        /// Optional language code to filter files by
        #[arg(short, long)]
        lang: Option<String>,

        /// Display full text without truncation
        #[arg(long)]
        full: bool,

        /// Stop after this many units
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Dump the parsed document model as JSON.
    Debug {
        /// The input files to read
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<String>,
        /// Write the JSON here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Align the group/unit structure of a translation with its source file.
    Sync {
        /// The source file (or flat JSON baseline)
        #[arg(short, long)]
        source: String,
        /// The translation file to update
        #[arg(short, long)]
        target: String,
        /// Create the target in this language when it does not exist yet
        #[arg(short, long)]
        lang: Option<String>,
        /// Write the result here instead of overwriting the target
        #[arg(short, long)]
        output: Option<String>,
        /// Write a JSON report of the changes
        #[arg(long)]
        report_json: Option<String>,
        /// Report changes without writing any file
        #[arg(long)]
        dry_run: bool,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let _ = SubscriberBuilder::default()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let result = match args.commands {
        Commands::Convert {
            input,
            baseline,
            output,
            format,
            lang,
            tabs,
            indent,
        } => run_convert_command(ConvertOptions {
            inputs: input,
            baseline,
            output,
            output_format: format,
            lang,
            tabs,
            indent,
        }),
        Commands::View {
            input,
            baseline,
            lang,
            full,
            limit,
        } => read_inputs(&with_baseline(&baseline, &input))
            .and_then(|codec| print_view(&codec, &lang, full, limit)),
        Commands::Debug { input, output } => run_debug_command(input, output),
        Commands::Sync {
            source,
            target,
            lang,
            output,
            report_json,
            dry_run,
        } => run_sync_command(SyncOptions {
            source,
            target,
            lang,
            output,
            report_json,
            dry_run,
        }),
    };

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}
