//! nbtohtml CLI - Jupyter notebook to HTML conversion tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use nbtohtml::render::{self, DEFAULT_THEME};
use nbtohtml::{
    CellKind, CellSelection, JsonFormat, Notebook, ParseOptions, RenderOptions, RenderResult,
};

#[derive(Parser)]
#[command(name = "nbtohtml")]
#[command(version)]
#[command(about = "Convert Jupyter notebooks to sanitized HTML fragments", long_about = None)]
struct Cli {
    /// Input notebook file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone, Default)]
struct CommonArgs {
    /// Skip cells that fail to decode instead of aborting
    #[arg(long, global = true)]
    lenient: bool,

    /// Render cells on one thread
    #[arg(long, global = true)]
    sequential: bool,

    /// Render code cells as plain escaped text
    #[arg(long, global = true)]
    no_highlight: bool,

    /// Cell range (e.g., "1-10", "1,3,5")
    #[arg(long, global = true, value_name = "RANGE")]
    cells: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

impl CommonArgs {
    fn parse_options(&self) -> ParseOptions {
        if self.lenient {
            ParseOptions::new().lenient()
        } else {
            ParseOptions::new()
        }
    }

    fn render_options(&self) -> Result<RenderOptions, Box<dyn std::error::Error>> {
        let selection = match self.cells.as_deref() {
            Some(cells) => {
                CellSelection::parse(cells).map_err(|e| format!("Invalid cell range: {}", e))?
            }
            None => CellSelection::All,
        };

        Ok(RenderOptions::new()
            .with_parallel(!self.sequential)
            .with_highlighting(!self.no_highlight)
            .with_cells(selection))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a notebook to an HTML fragment
    Convert {
        /// Input notebook file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Dump the parsed notebook as JSON
    Json {
        /// Input notebook file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show notebook information
    Info {
        /// Input notebook file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print conversion statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the stylesheet for highlighted code
    Css {
        /// Highlighting theme
        #[arg(long, default_value = DEFAULT_THEME)]
        theme: String,

        /// List available themes
        #[arg(long)]
        list: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.common.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let common = cli.common.clone();
    let result = match cli.command {
        Some(Commands::Convert { input, output }) => {
            cmd_convert(&input, output.as_deref(), &common)
        }
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact, &common),
        Some(Commands::Info { input, json }) => cmd_info(&input, json, &common),
        Some(Commands::Css {
            theme,
            list,
            output,
        }) => cmd_css(&theme, list, output.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), &common)
            } else {
                println!("{}", "Usage: nbtohtml <FILE> [-o OUTPUT]".yellow());
                println!("       nbtohtml --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_notebook(input: &Path, common: &CommonArgs) -> Result<Notebook, Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("File not found: {}", input.display()).into());
    }
    log::debug!("reading {}", input.display());
    Ok(nbtohtml::parse_file_with_options(
        input,
        common.parse_options(),
    )?)
}

fn write_or_print(content: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        eprintln!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn report_diagnostics(result: &RenderResult) {
    if result.diagnostics.is_empty() {
        return;
    }
    eprintln!(
        "{} {} problem(s) while rendering",
        "Warning:".yellow().bold(),
        result.diagnostics.len()
    );
    for diagnostic in &result.diagnostics {
        eprintln!("  {} {}", "-".dimmed(), diagnostic);
    }
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    common: &CommonArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let notebook = load_notebook(input, common)?;
    let result = render::to_html_with_report(&notebook, &common.render_options()?)?;

    report_diagnostics(&result);
    write_or_print(&result.content, output)
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    common: &CommonArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let notebook = load_notebook(input, common)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = render::to_json(&notebook, format)?;
    write_or_print(&json, output)
}

fn cmd_info(
    input: &Path,
    as_json: bool,
    common: &CommonArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let notebook = load_notebook(input, common)?;
    let result = render::to_html_with_report(&notebook, &common.render_options()?)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&result.stats)?);
        return Ok(());
    }

    println!("{}", "Notebook Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: nbformat {}", "Format".bold(), notebook.format_version());

    let language = notebook.language();
    println!(
        "{}: {}",
        "Language".bold(),
        if language.is_empty() { "unknown" } else { language.as_str() }
    );
    if let Some(ref title) = notebook.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref kernel) = notebook.metadata.kernelspec {
        if let Some(ref name) = kernel.display_name {
            println!("{}: {}", "Kernel".bold(), name);
        }
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Cells".bold(), notebook.cell_count());
    println!(
        "  {} markdown: {}",
        "├─".dimmed(),
        notebook.count_cells(&CellKind::Markdown)
    );
    println!(
        "  {} code: {}",
        "├─".dimmed(),
        notebook.count_cells(&CellKind::Code)
    );
    println!(
        "  {} raw: {}",
        "└─".dimmed(),
        notebook.count_cells(&CellKind::Raw)
    );
    println!("{}: {}", "Outputs".bold(), result.stats.output_count);
    println!("{}: {}", "Images".bold(), result.stats.image_count);
    println!("{}: {}", "Errors".bold(), result.stats.error_count);

    let diagnostics = result.diagnostics.len();
    let label = diagnostics.to_string();
    println!(
        "{}: {}",
        "Diagnostics".bold(),
        if diagnostics == 0 {
            label.green()
        } else {
            label.yellow()
        }
    );
    for diagnostic in &result.diagnostics {
        println!("  {} {}", "-".dimmed(), diagnostic);
    }

    Ok(())
}

fn cmd_css(
    theme: &str,
    list: bool,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    if list {
        for name in render::available_themes() {
            if name == DEFAULT_THEME {
                println!("{} {}", name, "(default)".dimmed());
            } else {
                println!("{}", name);
            }
        }
        return Ok(());
    }

    let css = render::theme_css(theme)?;
    write_or_print(&css, output)
}

fn cmd_version() {
    println!("{} {}", "nbtohtml".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Jupyter notebook to HTML conversion tool");
    println!();
    println!("License: MIT");
}
