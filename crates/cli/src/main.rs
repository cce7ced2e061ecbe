use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use blockport_core::{
    BodySource, Category, CategoryTable, ConfigLoader, Document, ExtractConfig, JsonConfig, JsonFormatter, TextConfig,
    TextFormatter, build_draft, draft, extract_body, has_errors, layout_title, parse_source_url, read_input,
    validate_file,
};
use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use time::OffsetDateTime;
use tracing::debug;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Turn saved article pages into reviewable block drafts and CMS rich-text documents
#[derive(Parser, Debug)]
#[command(name = "blockport")]
#[command(version)]
#[command(about = "Turn saved article pages into reviewable drafts", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding a categories.json override
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract a draft from a saved article page
    Extract(ExtractArgs),
    /// Project a draft body (or a bare block array) into a rich-text document
    Richtext(RichtextArgs),
    /// Lay out a thumbnail title
    Title(TitleArgs),
    /// Validate draft files
    Validate(ValidateArgs),
    /// Print a plain-text preview of a draft body
    Preview(PreviewArgs),
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Article category
    #[arg(short, long, default_value = "tips", value_name = "CATEGORY")]
    category: Category,

    /// URL the page was saved from
    #[arg(long, value_name = "URL")]
    source_url: Option<String>,

    /// CSS selector of the article body container
    #[arg(long, value_name = "SELECTOR")]
    selector: Option<String>,

    /// Print only the block array instead of a full draft
    #[arg(long)]
    blocks_only: bool,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Compact JSON output
    #[arg(long)]
    compact: bool,
}

#[derive(Args, Debug)]
struct RichtextArgs {
    /// Draft JSON file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Compact JSON output
    #[arg(long)]
    compact: bool,
}

#[derive(Args, Debug)]
struct TitleArgs {
    /// Title text
    #[arg(value_name = "TITLE")]
    title: String,

    /// Article category
    #[arg(short, long, default_value = "tips", value_name = "CATEGORY")]
    category: Category,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Draft JSON files
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    /// Draft JSON file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Wrap lines at this many characters (0 = no wrapping)
    #[arg(short, long, default_value = "0", value_name = "WIDTH")]
    width: usize,

    /// Print link targets after linked text
    #[arg(long)]
    links: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_categories(config_dir: Option<&PathBuf>) -> anyhow::Result<CategoryTable> {
    let loader = config_dir.map_or_else(ConfigLoader::default, ConfigLoader::with_custom_dir);
    loader.load_categories().context("Failed to load category configuration")
}

fn write_output(output: Option<&PathBuf>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            debug!(path = %path.display(), bytes = content.len(), "writing output");
            fs::write(path, content).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn run_extract(args: &ExtractArgs, categories: &CategoryTable, verbose: bool) -> anyhow::Result<()> {
    if verbose {
        echo::print_step(1, 3, &format!("Reading {}", args.input));
    }
    let html = read_input(&args.input).with_context(|| format!("Failed to read input: {}", args.input))?;
    if verbose {
        echo::print_detail("Size", &echo::format_size(html.len()));
    }

    let source_url = args
        .source_url
        .as_deref()
        .map(parse_source_url)
        .transpose()
        .context("Invalid --source-url")?;

    let mut config = ExtractConfig::default();
    if let Some(selector) = &args.selector {
        config.primary_selector = selector.clone();
    }

    if verbose {
        echo::print_step(2, 3, "Extracting body blocks");
    }
    let doc = Document::parse(&html);
    let json = JsonFormatter::new(JsonConfig { pretty: !args.compact });

    let output = if args.blocks_only {
        let body = extract_body(&doc, &config).context("Failed to extract body")?;
        if verbose {
            echo::print_detail("Blocks", &body.blocks.len().to_string());
            echo::print_detail("Source", &format!("{:?}", body.source));
        }
        json.format(&body.blocks)?
    } else {
        let assembled =
            build_draft(&doc, source_url.as_ref(), args.category, categories, &config, OffsetDateTime::now_utc())
                .context("Failed to build draft")?;
        let draft = assembled.draft;
        if verbose {
            echo::print_detail("Title", &draft.title);
            echo::print_detail("Blocks", &draft.body.len().to_string());
            echo::print_detail("Tags", &draft.tags.join(", "));
        }
        if assembled.body_source == BodySource::Placeholder {
            echo::print_warning("No body content found, placeholder inserted");
        }
        json.format(&draft)?
    };

    if verbose {
        echo::print_step(3, 3, "Writing output");
    }
    write_output(args.output.as_ref(), &output)
}

fn run_richtext(args: &RichtextArgs) -> anyhow::Result<()> {
    let json = read_input(&args.input).with_context(|| format!("Failed to read input: {}", args.input))?;
    let blocks = draft::read_blocks(&json).context("Failed to read blocks")?;
    let output = JsonFormatter::new(JsonConfig { pretty: !args.compact }).richtext(&blocks)?;
    write_output(args.output.as_ref(), &output)
}

fn run_title(args: &TitleArgs) -> anyhow::Result<()> {
    let layout = layout_title(&args.title, args.category);
    println!("{}", JsonFormatter::new(JsonConfig { pretty: true }).format(&layout)?);
    Ok(())
}

fn run_validate(args: &ValidateArgs, categories: &CategoryTable) -> anyhow::Result<()> {
    let mut failed = 0;

    for path in &args.files {
        let issues = validate_file(path, categories).with_context(|| format!("Failed to validate {}", path.display()))?;

        eprintln!("{}", path.display().bold());
        if issues.is_empty() {
            echo::print_success("OK");
            continue;
        }
        for issue in &issues {
            echo::print_issue(issue);
        }
        if has_errors(&issues) {
            failed += 1;
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} file(s) failed validation", failed, args.files.len());
    }
    Ok(())
}

fn run_preview(args: &PreviewArgs) -> anyhow::Result<()> {
    let json = read_input(&args.input).with_context(|| format!("Failed to read input: {}", args.input))?;
    let value: serde_json::Value = serde_json::from_str(&json).context("Input is not valid JSON")?;
    let title = value.get("title").and_then(|t| t.as_str()).map(str::to_string);
    let blocks = draft::blocks_from_value(value).context("Failed to read blocks")?;

    let formatter = TextFormatter::new(TextConfig { line_width: args.width, show_links: args.links });
    println!("{}", formatter.convert(&blocks, title.as_deref()));
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.verbose {
        echo::print_banner();
    }
    debug!(command = ?cli.command, "dispatching command");

    match &cli.command {
        Command::Extract(args) => {
            let categories = load_categories(cli.config_dir.as_ref())?;
            run_extract(args, &categories, cli.verbose)
        }
        Command::Richtext(args) => run_richtext(args),
        Command::Title(args) => run_title(args),
        Command::Validate(args) => {
            let categories = load_categories(cli.config_dir.as_ref())?;
            run_validate(args, &categories)
        }
        Command::Preview(args) => run_preview(args),
    }
}
