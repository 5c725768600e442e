//! markleaf CLI - HTML import and Markdown decoration tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::{ColoredString, Colorize};

use markleaf::decorate::decorate_text;
use markleaf::{render, DecorationRange, ImportOptions, JsonFormat, RenderOptions};

#[derive(Parser)]
#[command(name = "markleaf")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Import pasted HTML and inspect Markdown decorations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import an HTML file and write it in another format
    Import {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Drop whitespace-only text between top-level blocks
        #[arg(long)]
        drop_whitespace: bool,

        /// Nesting depth past which markup is imported as plain text
        #[arg(long, default_value = "512")]
        max_depth: usize,

        /// Character used for bullet list markers
        #[arg(long, default_value = "-")]
        list_marker: char,
    },

    /// Show Markdown decoration ranges for each line of a file
    Decorate {
        /// Input text or Markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print ranges as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show document statistics for an HTML file
    Info {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Editor node tree as JSON
    Json,
    /// Markdown
    Markdown,
    /// HTML
    Html,
    /// Plain text
    Text,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Import {
            input,
            format,
            output,
            compact,
            drop_whitespace,
            max_depth,
            list_marker,
        } => {
            let import_options = ImportOptions::new()
                .with_drop_whitespace_text(drop_whitespace)
                .with_max_depth(max_depth);
            let render_options = RenderOptions::new().with_list_marker(list_marker);
            cmd_import(
                &input,
                output.as_deref(),
                format,
                compact,
                &import_options,
                &render_options,
            )
        }
        Commands::Decorate { input, json } => cmd_decorate(&input, json),
        Commands::Info { input } => cmd_info(&input),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_import(
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    compact: bool,
    import_options: &ImportOptions,
    render_options: &RenderOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = markleaf::import_html_file(input, import_options)?;
    log::debug!("imported {} top-level nodes from {}", doc.children.len(), input.display());

    let content = match format {
        OutputFormat::Json => {
            let json_format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            render::to_json(&doc, json_format)?
        }
        OutputFormat::Markdown => render::to_markdown(&doc, render_options)?,
        OutputFormat::Html => render::to_html(&doc)?,
        OutputFormat::Text => render::to_text(&doc)?,
    };

    if let Some(path) = output {
        fs::write(path, &content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }

    Ok(())
}

fn cmd_decorate(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(input)?;

    if json {
        let lines: Vec<Vec<DecorationRange>> = text.lines().map(decorate_text).collect();
        println!("{}", serde_json::to_string_pretty(&lines)?);
        return Ok(());
    }

    for (number, line) in text.lines().enumerate() {
        let ranges = decorate_text(line);
        println!("{} {}", format!("{:>4}", number + 1).dimmed(), highlight(line, &ranges));
        for range in &ranges {
            println!(
                "     {} {}..{} {:?}",
                paint(&range.mark_type, &range.mark_type),
                range.start,
                range.end,
                range.slice(line)
            );
        }
    }

    Ok(())
}

/// Color each decorated range of a line by its mark type.
fn highlight(line: &str, ranges: &[DecorationRange]) -> String {
    let mut output = String::new();
    let mut position = 0;

    for range in ranges {
        let plain: String = line
            .chars()
            .skip(position)
            .take(range.start.saturating_sub(position))
            .collect();
        output.push_str(&plain);
        output.push_str(&paint(range.slice(line), &range.mark_type).to_string());
        position = range.end;
    }
    output.extend(line.chars().skip(position));
    output
}

fn paint(text: &str, mark_type: &str) -> ColoredString {
    match mark_type {
        "title" => text.cyan().bold(),
        "bold" => text.bold(),
        "italic" => text.italic(),
        "strike" => text.strikethrough(),
        "code" | "code-snippet" => text.green(),
        "url" | "url-reference" => text.blue().underline(),
        "list" | "blockquote" | "hr" => text.yellow(),
        _ => text.magenta(),
    }
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = markleaf::import_html_file(input, &ImportOptions::new().with_drop_whitespace_text(true))?;
    let stats = doc.stats();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Blocks".bold(), stats.blocks);
    println!("{}: {}", "Headings".bold(), stats.headings);
    println!("{}: {}", "Links".bold(), stats.links);
    println!("{}: {}", "Images".bold(), stats.images);

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Text leaves".bold(), stats.text_leaves);
    println!("{}: {}", "Words".bold(), stats.words);
    println!("{}: {}", "Characters".bold(), stats.characters);

    let decorated = markleaf::Decorator::new().decorate_document(&doc);
    let ranges: usize = decorated.iter().map(|leaf| leaf.ranges.len()).sum();
    println!("{}: {}", "Decorations".bold(), ranges);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "markleaf".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Rich-text HTML import and Markdown decoration tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/markleaf".dimmed());
    println!("License: MIT");
}
