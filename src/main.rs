use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use pinlab::layout::{layout, Layout, LayoutGeometry};
use pinlab::pagesize::{self, PageOrientation};
use pinlab::parse::LabelFile;
use pinlab::render::{LabelFont, PdfRenderer, PlanRenderer, Renderer};
use pinlab::{Info, LayoutError, ParseError, Pt, StandardFont};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "pinlab",
    version,
    about = "Lay out repeated specimen pin labels in columns and render them to PDF"
)]
struct Cli {
    #[command(flatten)]
    sheet: SheetArgs,

    #[command(subcommand)]
    cmd: Cmd,
}

/// Options that change the page geometry, accepted by every command
#[derive(Args, Debug)]
struct SheetArgs {
    /// JSON file with geometry overrides. Print the defaults with `pinlab geometry`.
    #[arg(long, global = true)]
    geometry: Option<PathBuf>,

    /// Named page size, e.g. a4 or letter.
    #[arg(long, global = true)]
    page_size: Option<String>,

    /// Turn the page sideways.
    #[arg(long, global = true)]
    landscape: bool,

    /// Font size in points used to measure label text.
    #[arg(long, global = true)]
    font_size: Option<f32>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Check a label file for errors without producing output.
    Check { file: PathBuf },

    /// Summarize the blocks in a label file.
    Show { file: PathBuf },

    /// Print where every label instance will be placed.
    Plan {
        file: PathBuf,
        /// Print the placement as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Render a label file to PDF.
    Render {
        file: PathBuf,
        /// Output path. Defaults to `<name>_output.pdf` beside the input.
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// TrueType or OpenType font to embed instead of Courier.
        #[arg(long, conflicts_with = "bold")]
        font: Option<PathBuf>,
        /// Use Courier Bold.
        #[arg(long)]
        bold: bool,
        /// Vertical scale applied to the glyphs.
        #[arg(long, default_value_t = 1.3)]
        stretch: f32,
        /// Size the glyphs are drawn at, in points. Defaults to the font size plus 0.5.
        #[arg(long)]
        text_size: Option<f32>,
    },

    /// Print the effective page geometry as JSON.
    Geometry,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            exit_code(&err)
        }
    };
    process::exit(code);
}

/// Runs a command, returning the process exit code
fn run(cli: Cli) -> Result<i32> {
    let geometry = resolve_geometry(&cli.sheet)?;
    match cli.cmd {
        Cmd::Check { file } => return cmd_check(&file, &geometry),
        Cmd::Show { file } => cmd_show(&file, &geometry)?,
        Cmd::Plan { file, json } => cmd_plan(&file, &geometry, json)?,
        Cmd::Render {
            file,
            output,
            font,
            bold,
            stretch,
            text_size,
        } => {
            let font = match font {
                Some(path) => LabelFont::Embedded(
                    fs::read(&path)
                        .with_context(|| format!("reading font {}", path.display()))?,
                ),
                None if bold => LabelFont::Standard(StandardFont::CourierBold),
                None => LabelFont::Standard(StandardFont::Courier),
            };
            let renderer = PdfRenderer {
                font,
                text_size: text_size.map(Pt),
                vertical_stretch: stretch,
                ..PdfRenderer::default()
            };
            let output = output.unwrap_or_else(|| default_output(&file));
            cmd_render(&file, &geometry, renderer, &output)?
        }
        Cmd::Geometry => println!("{}", serde_json::to_string_pretty(&geometry)?),
    }
    Ok(0)
}

// 1: the label file is at fault, 2: configuration or output
fn exit_code(err: &anyhow::Error) -> i32 {
    let invalid_input = err.chain().any(|cause| {
        cause.is::<ParseError>()
            || cause.is::<LayoutError>()
            || cause
                .downcast_ref::<pinlab::Error>()
                .is_some_and(pinlab::Error::is_invalid_input)
    });
    if invalid_input {
        1
    } else {
        2
    }
}

fn resolve_geometry(sheet: &SheetArgs) -> Result<LayoutGeometry> {
    let mut geometry = match &sheet.geometry {
        Some(path) => LayoutGeometry::from_json_file(path)
            .with_context(|| format!("loading geometry from {}", path.display()))?,
        None => LayoutGeometry::default(),
    };
    if let Some(name) = &sheet.page_size {
        geometry.page_size = match pagesize::by_name(name) {
            Some(size) => size,
            None => bail!(
                "unknown page size {name:?}; expected one of {}",
                pagesize::NAMES.join(", ")
            ),
        };
    }
    if sheet.landscape {
        geometry.page_size = geometry.page_size.landscape();
    }
    if let Some(font_size) = sheet.font_size {
        geometry.font_size = Pt(font_size);
    }
    Ok(geometry)
}

fn default_output(file: &Path) -> PathBuf {
    let stem = file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "labels".to_string());
    file.with_file_name(format!("{stem}_output.pdf"))
}

fn open(file: &Path) -> Result<LabelFile> {
    LabelFile::open(file).with_context(|| format!("reading {}", file.display()))
}

fn place<'a>(labels: &'a LabelFile, geometry: &LayoutGeometry) -> Result<Layout<'a>> {
    Ok(layout(labels.max_width, &labels.blocks, geometry)?)
}

// ── Commands ────────────────────────────────────────────────────────────

/// Reports problems on stdout. Problems in the label file exit with 1 rather
/// than failing the command
fn cmd_check(file: &Path, geometry: &LayoutGeometry) -> Result<i32> {
    let text = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let outcome = pinlab::parse::parse(&text)
        .map_err(pinlab::Error::from)
        .and_then(|labels| {
            layout(labels.max_width, &labels.blocks, geometry)?;
            Ok(())
        });

    match outcome {
        Ok(()) => {
            println!("No errors found.");
            Ok(0)
        }
        Err(pinlab::Error::Parse(err)) if err.source_line().is_some() => {
            let message = err.to_string();
            let at = err.source_line().map(|at| at.to_string()).unwrap_or_default();
            let reason = message
                .strip_prefix(&format!("{at}: "))
                .unwrap_or(&message);
            println!("ERROR: check {at}: {reason}");
            Ok(1)
        }
        Err(err) if err.is_invalid_input() => {
            println!("ERROR: {err}");
            Ok(1)
        }
        Err(err) => Err(err.into()),
    }
}

fn cmd_show(file: &Path, geometry: &LayoutGeometry) -> Result<()> {
    let labels = open(file)?;
    let placed = place(&labels, geometry)?;

    println!("max width: {}", labels.max_width);
    println!("blocks: {}", labels.blocks.len());
    for (i, block) in labels.blocks.iter().enumerate() {
        println!();
        println!("[{}] x{} ({})", i + 1, block.repeat_count, block.opened_at);
        for line in &block.lines {
            println!("    {line}");
        }
    }
    println!();
    println!(
        "{} label(s) on {} page(s), {} per column, {} column(s) per page",
        placed.instances.len(),
        placed.page_count(),
        placed.grid.capacity.labels_per_column,
        placed.grid.capacity.columns_per_page,
    );
    Ok(())
}

fn cmd_plan(file: &Path, geometry: &LayoutGeometry, json: bool) -> Result<()> {
    let labels = open(file)?;
    let placed = place(&labels, geometry)?;
    let plan = PlanRenderer.render(geometry, &placed)?;

    if json {
        println!("{}", plan.to_json()?);
        return Ok(());
    }

    for page in &plan.pages {
        println!("page {}", page.page_index + 1);
        for label in &page.labels {
            println!(
                "  column {} row {} at ({}, {}): block {} {:?}",
                label.column_index + 1,
                label.row_index + 1,
                label.x,
                label.y,
                label.block_index + 1,
                label.lines.first().map(String::as_str).unwrap_or_default(),
            );
        }
    }
    Ok(())
}

fn cmd_render(
    file: &Path,
    geometry: &LayoutGeometry,
    mut renderer: PdfRenderer,
    output: &Path,
) -> Result<()> {
    let labels = open(file)?;
    let placed = place(&labels, geometry)?;
    let title = file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    renderer.info = Info::label_sheet(title, &labels);
    let document = renderer.render(geometry, &placed)?;
    let page_count = document.pages.len();

    let out = fs::File::create(output)
        .with_context(|| format!("creating {}", output.display()))?;
    document
        .write(out)
        .with_context(|| format!("writing {}", output.display()))?;

    println!(
        "wrote {} label(s) on {} page(s) to {}",
        placed.instances.len(),
        page_count,
        output.display()
    );
    Ok(())
}
