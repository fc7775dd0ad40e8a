mod compile;
mod parse;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::compile::run_compile;
use crate::parse::{run_detect, run_parse, run_skeleton};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the dialect of a Joomla .ini file (`legacy` or `modern`).
    Detect {
        /// The input file to inspect
        #[arg(short, long)]
        input: String,
    },

    /// Parse a Joomla .ini file and print its entries as JSON.
    Parse {
        /// The input file to parse
        #[arg(short, long)]
        input: String,

        /// Source-language file; when given, the input is parsed as a
        /// translation of it
        #[arg(short, long)]
        source_file: Option<String>,

        /// Resource name reported to the source lookup
        #[arg(short, long, default_value = "")]
        resource: String,
    },

    /// Write the skeleton of a source file (values replaced by hash placeholders).
    Skeleton {
        /// The source file
        #[arg(short, long)]
        input: String,

        /// Where to write the skeleton (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Substitute translations into a template and write the result.
    Compile {
        /// Skeleton or existing .ini file to substitute into
        #[arg(short, long)]
        template: String,

        /// JSON object mapping keys (or hash tags) to translations
        #[arg(short, long)]
        substitutions: String,

        /// Where to write the compiled file (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Fail instead of writing empty values for untranslated placeholders
        #[arg(long)]
        fail_untranslated: bool,

        /// Ignore substitutions that match no line of the template
        #[arg(long)]
        lenient: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let result = match args.commands {
        Commands::Detect { input } => run_detect(&input),
        Commands::Parse {
            input,
            source_file,
            resource,
        } => run_parse(&input, source_file.as_deref(), &resource),
        Commands::Skeleton { input, output } => run_skeleton(&input, output.as_deref()),
        Commands::Compile {
            template,
            substitutions,
            output,
            fail_untranslated,
            lenient,
        } => run_compile(
            &template,
            &substitutions,
            output.as_deref(),
            fail_untranslated,
            lenient,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
