//! anaphor - pronoun anaphora resolution CLI
//!
//! A thin presentation shell over the `anaphor` library: annotate text
//! from an argument, a file, or stdin, or run a line-mode prompt loop.
//!
//! # Usage
//!
//! ```bash
//! # Annotate a sentence
//! anaphor annotate "Маша пришла домой. Она устала."
//!
//! # Structured output
//! anaphor annotate --json "Директор взял свою папку."
//!
//! # Annotate a file / stdin
//! anaphor annotate --file text.txt
//! cat text.txt | anaphor annotate
//!
//! # Interactive prompt loop
//! anaphor repl
//!
//! # Lexicon statistics
//! anaphor info
//! ```

use std::io::{self, BufRead, Read, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;

use anaphor::{Lexicon, Resolver, ResolverConfig};

/// Pronoun anaphora resolution for Russian text.
#[derive(Parser)]
#[command(name = "anaphor")]
#[command(author, version, about = "Pronoun anaphora resolution for Russian text")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Text to annotate (shorthand for `anaphor annotate`)
    #[arg(trailing_var_arg = true)]
    text: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Annotate text with resolved antecedents
    #[command(visible_alias = "a")]
    Annotate(AnnotateArgs),

    /// Interactive line-mode prompt loop
    #[command(visible_alias = "r")]
    Repl,

    /// Show lexicon statistics and configuration defaults
    #[command(visible_alias = "i")]
    Info,
}

#[derive(clap::Args)]
struct AnnotateArgs {
    /// Text to annotate; falls back to --file, then stdin
    text: Option<String>,

    /// Read input from a file
    #[arg(short, long)]
    file: Option<std::path::PathBuf>,

    /// Load lexicon word lists from a directory instead of the builtin
    #[arg(long, value_name = "DIR")]
    lexicon: Option<std::path::PathBuf>,

    /// Maximum pronoun-chain depth
    #[arg(long, default_value_t = 5)]
    max_depth: usize,

    /// Emit the annotation list as JSON instead of rewritten text
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Annotate(args)) => run_annotate(args),
        Some(Commands::Repl) => run_repl(),
        Some(Commands::Info) => run_info(),
        None if !cli.text.is_empty() => run_annotate(AnnotateArgs {
            text: Some(cli.text.join(" ")),
            file: None,
            lexicon: None,
            max_depth: 5,
            json: false,
        }),
        None => {
            eprintln!("No input provided. Run `anaphor --help` for usage.");
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn build_resolver(
    lexicon_dir: Option<&std::path::Path>,
    max_depth: usize,
) -> Result<Resolver, Box<dyn std::error::Error>> {
    let config = ResolverConfig {
        max_depth,
        ..ResolverConfig::default()
    };
    let mut resolver = Resolver::new(config);
    if let Some(dir) = lexicon_dir {
        resolver = resolver.with_lexicon(Lexicon::from_dir(dir)?);
    }
    Ok(resolver)
}

fn run_annotate(args: AnnotateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = match (&args.text, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => {
            if io::stdin().is_terminal() {
                return Err("no input: pass text, --file, or pipe stdin".into());
            }
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let resolver = build_resolver(args.lexicon.as_deref(), args.max_depth)?;
    if args.json {
        let annotations = resolver.resolve_occurrences(&text);
        println!("{}", serde_json::to_string_pretty(&annotations)?);
    } else {
        println!("{}", resolver.annotate(&text));
    }
    Ok(())
}

fn run_repl() -> Result<(), Box<dyn std::error::Error>> {
    let resolver = Resolver::default();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }
        if line.is_empty() {
            continue;
        }
        println!("{}", resolver.annotate(line));
    }
    Ok(())
}

fn run_info() -> Result<(), Box<dyn std::error::Error>> {
    let lexicon = Lexicon::builtin();
    let config = ResolverConfig::default();
    println!("anaphor {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Lexicon (builtin):");
    println!("  personal pronoun forms:    {}", lexicon.personal.len());
    println!("  possessive pronoun forms:  {}", lexicon.possessive.len());
    println!("  syncretic forms:           {}", lexicon.ambiguous.len());
    println!("  reflexive forms:           {}", lexicon.reflexive.len());
    println!("  relative forms:            {}", lexicon.relative.len());
    println!("  collective nouns:          {}", lexicon.collective.len());
    println!("  common-gender nouns:       {}", lexicon.common_gender.len());
    println!("  idioms:                    {}", lexicon.idioms.len());
    println!();
    println!("Defaults:");
    println!("  max chain depth:           {}", config.max_depth);
    println!("  context window sentences:  {}", config.window_sentences);
    Ok(())
}
