use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use pdf_regroup::{PageSource, RasterBackend, RegroupOptions, RegroupStatistics};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfr", about = "Regroup scanned exam pages onto duplex grid sheets", version)]
struct Cli {
    /// Log more detail (repeat for debug output)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Regroup a scanned PDF into printable grid sheets
    Regroup {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON options file; flags below override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output paper size
        #[arg(long, value_enum)]
        paper: Option<PaperArg>,

        /// Output orientation
        #[arg(long, value_enum)]
        orientation: Option<OrientationArg>,

        /// Sheet margin in mm (uniform on all sides)
        #[arg(long)]
        margin: Option<f32>,

        /// Grid rows per sheet
        #[arg(long)]
        rows: Option<usize>,

        /// Grid columns per sheet
        #[arg(long)]
        columns: Option<usize>,

        /// Groups per batch (a multiple of the column count)
        #[arg(long)]
        batch_size: Option<usize>,

        /// Regex for the group marker; capture group 1 is the group id
        #[arg(long)]
        marker: Option<String>,

        /// Rasterization scale relative to the source page size
        #[arg(long)]
        scale: Option<f32>,

        /// Leave sheet titles off
        #[arg(long)]
        no_titles: bool,

        /// How page images are produced
        #[arg(long, default_value = "auto", value_enum)]
        backend: BackendArg,

        /// Show statistics only, don't generate PDF
        #[arg(long)]
        stats_only: bool,
    },

    /// Write the default options as JSON
    Config {
        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BackendArg {
    /// pdfium when available, embedded images otherwise
    Auto,
    /// Decode the image embedded in each scanned page
    Embedded,
    /// Render pages with pdfium
    Pdfium,
}

impl From<PaperArg> for pdf_regroup::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

impl From<OrientationArg> for pdf_regroup::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl BackendArg {
    fn resolve(self) -> Result<Option<RasterBackend>> {
        match self {
            BackendArg::Auto => Ok(None),
            BackendArg::Embedded => Ok(Some(RasterBackend::Embedded)),
            #[cfg(feature = "pdfium")]
            BackendArg::Pdfium => Ok(Some(RasterBackend::Pdfium)),
            #[cfg(not(feature = "pdfium"))]
            BackendArg::Pdfium => bail!("this build of pdfr has no pdfium support"),
        }
    }
}

fn print_statistics(stats: &RegroupStatistics) {
    println!("Regroup Statistics:");
    println!("  Source pages: {}", stats.source_pages);
    if stats.dropped_pages > 0 {
        println!("  Pages outside any group: {}", stats.dropped_pages);
    }
    println!("  Groups: {}", stats.groups);
    println!("    1-page: {}", stats.single_groups);
    println!("    2-page: {}", stats.pair_groups);
    println!(
        "    3+ page: {} {:?}",
        stats.extended_groups, stats.extended_ids
    );
    if stats.unplaced_pages > 0 {
        println!("  Pages beyond page 3 (not placed): {}", stats.unplaced_pages);
    }
    println!("  Batches: {}", stats.primary_batches);
    println!("  Third-page batches: {}", stats.supplemental_batches);
    println!("  Output sheets: {}", stats.output_sheets);
    println!("  Blank sheets: {}", stats.blank_sheets);
}

fn print_instructions(options: &RegroupOptions) {
    let (width, height) = options.paper_size.dimensions_with_orientation(options.orientation);
    println!();
    println!("Printing instructions:");
    println!("1. First set of sheets: pages 1 (front) and 2 (back) of every group");
    println!("   - Print double-sided, flip on short edge");
    println!("2. Sheets at the end: page 3 of groups that have one");
    println!("   - Print single-sided or double-sided");
    println!("- Paper: {:.0} x {:.0} mm", width, height);
    println!(
        "- Each sheet shows {} pages in a {}x{} grid",
        options.batch_capacity, options.grid_cols, options.grid_rows
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Config { output } => {
            RegroupOptions::default()
                .save(&output)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Default options → {}", output.display());
        }

        Commands::Regroup {
            input,
            output,
            config,
            paper,
            orientation,
            margin,
            rows,
            columns,
            batch_size,
            marker,
            scale,
            no_titles,
            backend,
            stats_only,
        } => {
            let mut options = match &config {
                Some(path) => RegroupOptions::load(path)
                    .await
                    .with_context(|| format!("Failed to load options from {}", path.display()))?,
                None => RegroupOptions::default(),
            };
            if let Some(paper) = paper {
                options.paper_size = paper.into();
            }
            if let Some(orientation) = orientation {
                options.orientation = orientation.into();
            }
            if let Some(margin) = margin {
                options.margin_mm = margin;
            }
            if let Some(rows) = rows {
                options.grid_rows = rows;
            }
            if let Some(columns) = columns {
                options.grid_cols = columns;
            }
            if let Some(batch_size) = batch_size {
                options.batch_capacity = batch_size;
            }
            if let Some(marker) = marker {
                options.marker_pattern = marker;
            }
            if let Some(scale) = scale {
                options.raster_scale = scale;
            }
            if no_titles {
                options.add_titles = false;
            }
            options.validate()?;

            let mut source = pdf_regroup::load_pdf(&input)
                .await
                .with_context(|| format!("Failed to load {}", input.display()))?;
            if let Some(backend) = backend.resolve()? {
                source = source.with_backend(backend)?;
            }
            log::info!(
                "Loaded {} ({} pages, {:?} page images)",
                input.display(),
                source.page_count(),
                source.backend()
            );

            if stats_only {
                let stats = pdf_regroup::calculate_statistics(&source, &options)?;
                print_statistics(&stats);
                return Ok(());
            }

            let Some(output) = output else {
                bail!("--output is required unless --stats-only is given");
            };

            let (document, report) = pdf_regroup::regroup(source, &options).await?;
            print_statistics(&report.statistics);
            if report.statistics.output_sheets == 0 {
                log::warn!("No groups found; writing an empty document");
            }
            pdf_regroup::save_pdf(document, &output)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;

            println!(
                "Regrouped → {} ({} sheets)",
                output.display(),
                report.statistics.output_sheets
            );
            if report.images_skipped > 0 {
                println!(
                    "  {} page image(s) could not be rendered; their cells are empty",
                    report.images_skipped
                );
            }
            print_instructions(&options);
        }
    }

    Ok(())
}
