use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use imgproc::codec;
use imgproc::models::{AppConfig, NamedFilter, Pipeline};
use imgproc::parse::{format_kernel, parse_kernel, parse_levels};
use imgproc::services::{DirectoryFilterStore, EditSession, FilterStore, History};
use pixel_filters::color::roundtrip_report;
use pixel_filters::{
    Anchor, Convolution, DitherOptions, Filter, HsvChannel, Kernel, Levels, Preset,
};

#[derive(Parser)]
#[command(name = "imgproc")]
#[command(about = "Apply point, dithering, convolution, median and HSV filters to PNG images")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a single filter to an image
    Apply {
        /// Input PNG file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,

        #[command(subcommand)]
        filter: FilterCommand,
    },
    /// Run the steps of a YAML pipeline file
    Run {
        /// Input PNG file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,

        /// Pipeline file (YAML list of steps)
        #[arg(short, long)]
        pipeline: PathBuf,

        /// Undo this many steps before saving
        #[arg(long, default_value_t = 0)]
        undo: usize,
    },
    /// Manage saved convolution kernels
    Filters {
        #[command(subcommand)]
        action: FiltersCommand,
    },
    /// Report RGB -> HSV -> RGB round-trip drift for an image
    HsvCheck {
        /// Input PNG file
        #[arg(short, long)]
        input: PathBuf,

        /// Largest per-channel difference not flagged (default from config)
        #[arg(short, long)]
        threshold: Option<u8>,
    },
}

#[derive(Subcommand)]
enum FilterCommand {
    /// 255 - v on every channel
    Invert,
    /// Add a constant to every channel
    Brightness {
        /// Shift in [-255, 255]
        #[arg(long, allow_negative_numbers = true)]
        factor: f64,
    },
    /// Scale distance from mid-gray
    Contrast {
        /// Factor, typically 0 to 3
        #[arg(long)]
        factor: f64,
    },
    /// Power-law correction
    Gamma {
        /// Gamma > 0, typically 0.1 to 10
        #[arg(long)]
        gamma: f64,
    },
    /// BT.601 luma
    Grayscale,
    /// Uniform quantization
    Quantize {
        /// Levels per channel: "4" or "2,4,8"
        #[arg(long, value_parser = parse_levels, default_value = "2")]
        levels: Levels,
    },
    /// Error diffusion dithering
    Dither {
        /// floyd-steinberg, burkes, stucki, sierra or atkinson (default from config)
        #[arg(long)]
        kernel: Option<String>,

        /// Levels per channel (default from config)
        #[arg(long, value_parser = parse_levels)]
        levels: Option<Levels>,
    },
    /// 3x3 box blur
    Blur,
    /// 3x3 Gaussian blur
    GaussianBlur,
    /// 3x3 sharpen
    Sharpen,
    /// 3x3 Laplacian edge detection
    EdgeDetection,
    /// 3x3 emboss with +128 offset
    Emboss,
    /// Convolve with a kernel given on the command line
    Convolve {
        /// Rows separated by ';', weights by ',' (e.g. "1,2,1;2,4,2;1,2,1")
        #[arg(long, allow_hyphen_values = true)]
        kernel: String,

        /// Divisor (default: weight sum, or 1 if that is zero)
        #[arg(long, allow_negative_numbers = true)]
        divisor: Option<f64>,

        /// Added after division
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        offset: f64,

        /// Anchor column (-1 for centre)
        #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
        anchor_x: i64,

        /// Anchor row (-1 for centre)
        #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
        anchor_y: i64,
    },
    /// Convolve with a saved kernel
    Custom {
        #[arg(long)]
        name: String,
    },
    /// Median filter
    Median {
        /// Odd window size >= 3
        #[arg(long, default_value_t = 3)]
        size: usize,
    },
    /// Pack RGB into an HSV container
    ToHsv,
    /// Unpack an HSV container back to RGB
    ToRgb,
    /// Hue channel of an HSV container as grayscale
    Hue,
    /// Saturation channel of an HSV container as grayscale
    Saturation,
    /// Value channel of an HSV container as grayscale
    Value,
}

#[derive(Subcommand)]
enum FiltersCommand {
    /// List saved kernel names
    List,
    /// Print a saved kernel
    Show { name: String },
    /// Save a kernel under a name
    Save {
        name: String,

        /// Rows separated by ';', weights by ','
        #[arg(long, allow_hyphen_values = true)]
        kernel: String,

        /// Divisor (default: weight sum, or 1 if that is zero)
        #[arg(long, allow_negative_numbers = true)]
        divisor: Option<f64>,

        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        offset: f64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        run_status_command();
        return Ok(());
    };

    init_logging();
    let config = AppConfig::from_env();

    match command {
        Commands::Apply {
            input,
            output,
            filter,
        } => run_apply_command(&config, &input, &output, filter),
        Commands::Run {
            input,
            output,
            pipeline,
            undo,
        } => run_pipeline_command(&config, &input, &output, &pipeline, undo),
        Commands::Filters { action } => run_filters_command(&config, action),
        Commands::HsvCheck { input, threshold } => {
            run_hsv_check_command(&input, threshold.unwrap_or(config.roundtrip_threshold))
        }
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "imgproc=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn open_store(config: &AppConfig) -> anyhow::Result<DirectoryFilterStore> {
    DirectoryFilterStore::new(&config.filters_dir).with_context(|| {
        format!(
            "Failed to open filter store at {}",
            config.filters_dir.display()
        )
    })
}

fn build_convolution(
    kernel_text: &str,
    divisor: Option<f64>,
    offset: f64,
    anchor: Anchor,
) -> anyhow::Result<Convolution> {
    let rows = parse_kernel(kernel_text).map_err(anyhow::Error::msg)?;
    let kernel = Kernel::new(rows)?.with_anchor(anchor)?;
    let mut conv = Convolution::new(kernel).offset(offset);
    if let Some(divisor) = divisor {
        if divisor.abs() < pixel_filters::convolve::DEGENERATE_SUM {
            tracing::debug!(divisor, "Divisor is effectively zero, using 1");
        }
        conv = conv.divisor(divisor);
    }
    Ok(conv)
}

impl FilterCommand {
    fn into_filter(self, config: &AppConfig) -> anyhow::Result<Filter> {
        let filter = match self {
            FilterCommand::Invert => Filter::Invert,
            FilterCommand::Brightness { factor } => Filter::Brightness(factor),
            FilterCommand::Contrast { factor } => Filter::Contrast(factor),
            FilterCommand::Gamma { gamma } => Filter::Gamma(gamma),
            FilterCommand::Grayscale => Filter::Grayscale,
            FilterCommand::Quantize { levels } => Filter::Quantize(levels),
            FilterCommand::Dither { kernel, levels } => {
                let mut options: DitherOptions = config.dither_options();
                if let Some(kernel) = kernel {
                    options = options.kernel(kernel.parse()?);
                }
                if let Some(levels) = levels {
                    options = options.levels(levels);
                }
                Filter::Dither(options)
            }
            FilterCommand::Blur => Filter::Preset(Preset::Blur),
            FilterCommand::GaussianBlur => Filter::Preset(Preset::GaussianBlur),
            FilterCommand::Sharpen => Filter::Preset(Preset::Sharpen),
            FilterCommand::EdgeDetection => Filter::Preset(Preset::EdgeDetection),
            FilterCommand::Emboss => Filter::Preset(Preset::Emboss),
            FilterCommand::Convolve {
                kernel,
                divisor,
                offset,
                anchor_x,
                anchor_y,
            } => Filter::Convolve(build_convolution(
                &kernel,
                divisor,
                offset,
                Anchor::from_signed(anchor_x, anchor_y),
            )?),
            FilterCommand::Custom { name } => {
                let store = open_store(config)?;
                let named = store
                    .load(&name)
                    .with_context(|| format!("Failed to load filter '{name}'"))?;
                Filter::Convolve(named.to_convolution()?)
            }
            FilterCommand::Median { size } => Filter::Median(size),
            FilterCommand::ToHsv => Filter::ToHsv,
            FilterCommand::ToRgb => Filter::ToRgb,
            FilterCommand::Hue => Filter::ExtractChannel(HsvChannel::Hue),
            FilterCommand::Saturation => Filter::ExtractChannel(HsvChannel::Saturation),
            FilterCommand::Value => Filter::ExtractChannel(HsvChannel::Value),
        };
        Ok(filter)
    }
}

/// Apply one filter and write the result
fn run_apply_command(
    config: &AppConfig,
    input: &Path,
    output: &Path,
    filter: FilterCommand,
) -> anyhow::Result<()> {
    let filter = filter.into_filter(config)?;
    let image = codec::load_image(input)?;
    let result = filter.apply(&image)?;
    codec::save_image(output, &result)?;
    println!("{} -> {} ({})", input.display(), output.display(), filter);
    Ok(())
}

/// Run a pipeline file through an edit session
fn run_pipeline_command(
    config: &AppConfig,
    input: &Path,
    output: &Path,
    pipeline_path: &Path,
    undo: usize,
) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let pipeline = Pipeline::load(pipeline_path)
        .with_context(|| format!("Failed to read pipeline {}", pipeline_path.display()))?;
    let filters = pipeline.resolve(&store, &config.dither_options())?;

    let history = match config.history_limit {
        Some(limit) => History::with_limit(limit),
        None => History::new(),
    };
    let mut session = EditSession::with_history(codec::load_image(input)?, history);

    session
        .apply_all(&filters)
        .map_err(|(index, e)| anyhow::anyhow!("Step {index} ({}) failed: {e}", filters[index]))?;

    let mut undone = 0;
    while undone < undo && session.undo() {
        undone += 1;
    }
    if undone < undo {
        tracing::warn!(requested = undo, undone, "History exhausted before all undos");
    }

    codec::save_image(output, session.current())?;
    println!(
        "{} -> {} ({} steps, {} undone)",
        input.display(),
        output.display(),
        filters.len(),
        undone
    );
    Ok(())
}

fn run_filters_command(config: &AppConfig, action: FiltersCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;
    match action {
        FiltersCommand::List => {
            let names = store.list_names()?;
            if names.is_empty() {
                println!("No saved filters in {}", store.dir().display());
            }
            for name in names {
                println!("{name}");
            }
        }
        FiltersCommand::Show { name } => {
            let filter = store.load(&name)?;
            println!("name:    {}", filter.name);
            println!("divisor: {}", filter.divisor);
            println!("offset:  {}", filter.offset);
            println!("kernel:  {}", format_kernel(&filter.kernel));
        }
        FiltersCommand::Save {
            name,
            kernel,
            divisor,
            offset,
        } => {
            let conv = build_convolution(&kernel, divisor, offset, Anchor::CENTER)?;
            store.save(&NamedFilter::from_convolution(&name, &conv))?;
            println!("Saved filter '{name}' to {}", store.dir().display());
        }
    }
    Ok(())
}

fn run_hsv_check_command(input: &Path, threshold: u8) -> anyhow::Result<()> {
    let image = codec::load_image(input)?;
    let report = roundtrip_report(&image, threshold);

    println!("Pixels checked:        {}", report.pixel_count);
    println!("Max channel drift:     {}", report.max_difference);
    println!(
        "Pixels over threshold: {} (threshold {})",
        report.pixels_over_threshold, report.threshold
    );
    if report.is_identity() {
        println!("Round trip is within threshold");
    }
    Ok(())
}

fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var("CONFIG_FILE").ok();
    let filters_dir = std::env::var("FILTERS_DIR").ok();
    let rust_log = std::env::var("RUST_LOG").ok();

    println!("imgproc v{VERSION}");
    println!("Raster filter toolkit\n");

    println!("Environment Variables:");
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  FILTERS_DIR = {}",
        filters_dir.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG    = {}",
        rust_log.as_deref().unwrap_or("imgproc=info (default)")
    );

    let config = AppConfig::from_env();
    println!("\nFilter Store:");
    println!("  {}", config.filters_dir.display());
    if !config.filters_dir.is_dir() {
        println!("  (not created yet)");
    } else {
        match DirectoryFilterStore::new(&config.filters_dir).and_then(|s| s.list_names()) {
            Ok(names) => println!("  {} saved filter(s)", names.len()),
            Err(e) => println!("  unavailable: {e}"),
        }
    }

    println!("\nRun 'imgproc --help' for commands.");
}
