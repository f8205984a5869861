#![allow(unused_assignments)]

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use meta::{Highlighter, LintMarkers, MetaError, MetaResult, SourceFormat};

/// Meta Configuration Format toolkit
///
/// Highlights meta source and converts .env, JSON and YAML into it.
#[derive(Parser)]
#[command(name = "meta")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a .env, JSON or YAML file to meta source
    Convert {
        /// File to convert ("-" for stdin)
        file: PathBuf,

        /// Input format: env, json, yaml (default: detected from the file name, else env)
        #[arg(long)]
        from: Option<String>,

        /// Output file, or a directory to write config.meta into
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Environment tag written after the banner
        #[arg(long, default_value = "@common")]
        env_tag: String,

        /// Version written in the @v tag
        #[arg(long, default_value = "1.0.0")]
        version_tag: String,
    },

    /// Print meta source with syntax highlighting
    Highlight {
        /// Meta file to highlight ("-" for stdin)
        file: PathBuf,

        /// Lint markers to overlay (JSON or YAML list of {line, message, severity})
        #[arg(long)]
        markers: Option<PathBuf>,

        /// Output format: ansi (default), html, json
        #[arg(short, long, default_value = "ansi")]
        format: String,

        /// Disable colours in ansi output
        #[arg(long)]
        no_color: bool,
    },

    /// Internal: Classify a file and print each line's kind (for debugging)
    #[command(hide = true)]
    Lex {
        /// Meta file to classify ("-" for stdin)
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    // Set up miette for nice error output
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))
    .ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Convert {
            file,
            from,
            output,
            env_tag,
            version_tag,
        } => cmd_convert(file, from, output, env_tag, version_tag),
        Commands::Highlight {
            file,
            markers,
            format,
            no_color,
        } => cmd_highlight(file, markers, format, no_color),
        Commands::Lex { file } => cmd_lex(file),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let exit_code = match &e {
                // I/O errors
                MetaError::IoError { .. } => ExitCode::from(3),
                _ => ExitCode::from(1),
            };
            eprintln!("{:?}", miette::Report::new(e));
            exit_code
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("meta={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn is_stdin(file: &Path) -> bool {
    file.to_str() == Some("-") || file.to_str() == Some("/dev/stdin")
}

fn read_input(file: &Path) -> MetaResult<String> {
    if is_stdin(file) {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| MetaError::io_error(format!("failed to read stdin: {}", e)))?;
        return Ok(buf);
    }
    std::fs::read_to_string(file)
        .map_err(|e| MetaError::io_error(format!("failed to read {}: {}", file.display(), e)))
}

fn cmd_convert(
    file: PathBuf,
    from: Option<String>,
    output: Option<PathBuf>,
    env_tag: String,
    version_tag: String,
) -> MetaResult<()> {
    // Explicit flag, then the file name, then .env
    let format = match from {
        Some(name) => name.parse::<SourceFormat>()?,
        None => SourceFormat::detect_path(&file).unwrap_or_default(),
    };
    tracing::debug!(file = %file.display(), %format, "converting");

    let source = read_input(&file)?;
    let options = meta::ConvertOptions::new()
        .with_env_tag(env_tag)
        .with_version(version_tag);
    let converted = meta::convert_with_options(&source, format, &options)?;

    match output {
        Some(out) => {
            let out_path = if out.is_dir() {
                out.join(meta::DEFAULT_OUTPUT_NAME)
            } else {
                out
            };
            std::fs::write(&out_path, &converted).map_err(|e| {
                MetaError::io_error(format!("failed to write {}: {}", out_path.display(), e))
            })?;
            eprintln!("Wrote {}", out_path.display());
        }
        None => print!("{}", converted),
    }

    Ok(())
}

fn load_markers(path: &Path) -> MetaResult<LintMarkers> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| MetaError::io_error(format!("failed to read {}: {}", path.display(), e)))?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => LintMarkers::from_yaml(&text),
        _ => LintMarkers::from_json(&text),
    }
}

fn cmd_highlight(
    file: PathBuf,
    markers: Option<PathBuf>,
    format: String,
    no_color: bool,
) -> MetaResult<()> {
    let highlight_format = meta::HighlightFormat::parse(&format)
        .ok_or_else(|| MetaError::unknown_format(&format, &meta::HighlightFormat::NAMES))?;

    let markers = match markers {
        Some(path) => load_markers(&path)?,
        None => LintMarkers::new(),
    };
    tracing::debug!(markers = markers.len(), "loaded lint markers");

    let source = read_input(&file)?;
    let lexed = meta::Lexer::new(&source, Some(file.clone())).classify_all();
    let lines = meta::render::render_lexed(&lexed, &markers);

    let output = match highlight_format {
        meta::HighlightFormat::Ansi if no_color => meta::AnsiHighlighter::plain().highlight(&lines)?,
        meta::HighlightFormat::Ansi => meta::AnsiHighlighter::new().highlight(&lines)?,
        meta::HighlightFormat::Html => meta::HtmlHighlighter::new().highlight(&lines)?,
        meta::HighlightFormat::Json => meta::JsonHighlighter::new(true).highlight(&lines)?,
    };

    println!("{}", output);
    Ok(())
}

fn cmd_lex(file: PathBuf) -> MetaResult<()> {
    let source = read_input(&file)?;
    let lexer = meta::Lexer::new(&source, Some(file.clone()));

    if let Some(path) = lexer.file() {
        println!("Lines from {}:", path.display());
    }
    println!("{:-<60}", "");

    for line in lexer.classify_all() {
        let detail = match &line.classified {
            meta::ClassifiedLine::Declaration(d) => match &d.env_reference {
                Some(env) => format!("{}:{} env({})", d.key, d.value_type, env.argument),
                None => format!("{}:{}", d.key, d.value_type),
            },
            meta::ClassifiedLine::Tag { name, .. } => name.clone(),
            _ => String::new(),
        };
        println!("{:>4}  {:12} {}", line.number, line.classified.kind_name(), detail);
    }

    Ok(())
}
