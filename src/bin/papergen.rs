use std::path::PathBuf;

use clap::Parser;
use papergen::{
    EngineConfig, RenderOptions, RendererKind, Resolver, SidecarMode, create_renderer,
    generate_record,
};

#[derive(Parser, Debug)]
#[command(name = "papergen", version)]
struct Cli {
    /// Digitized signal file for one ECG recording.
    #[arg(short = 'i', long)]
    input_file: PathBuf,

    /// Record header file (leads, gains, sampling rate).
    #[arg(long)]
    header_file: PathBuf,

    /// Directory receiving images, ledgers, and side-cars.
    #[arg(short = 'o', long)]
    output_directory: PathBuf,

    /// Seed for the configuration resolver's random source.
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    seed: i64,

    /// Index of this record within a batch; -1 marks a standalone run and
    /// skips ledger headers.
    #[arg(long, allow_negative_numbers = true)]
    start_index: i64,

    /// Engine configuration file, relative to the working directory.
    #[arg(long, default_value = "config.yaml")]
    config_file: PathBuf,

    /// Output resolution in pixels per inch.
    #[arg(short = 'r', long, default_value_t = 200)]
    resolution: u32,

    /// Whitespace around the plot, in inches.
    #[arg(long, default_value_t = 0)]
    pad_inches: u32,

    /// Always print the header text, overriding --random_print_header.
    #[arg(long)]
    print_header: bool,

    /// Column layout for the engine; -1 lets the engine decide.
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    num_columns: i32,

    /// Leads to additionally render in full-length rhythm strips.
    #[arg(long, num_args = 0.., default_value = "None")]
    full_mode: Vec<String>,

    /// Mask samples the engine could not fit onto the page.
    #[arg(long)]
    mask_unplotted_samples: bool,

    /// Sample the resolution uniformly from [50, --resolution].
    #[arg(long)]
    random_resolution: bool,

    /// Sample the padding uniformly from [0, --pad_inches].
    #[arg(long)]
    random_padding: bool,

    /// Let the engine pick a grid color per rendered page.
    #[arg(long)]
    random_grid_color: bool,

    /// Palette index used when the grid color is not randomized.
    #[arg(long, default_value_t = 5)]
    standard_grid_color: u8,

    /// Probability of drawing the calibration (DC) pulse.
    #[arg(long, default_value_t = 1.0)]
    calibration_pulse: f64,

    /// Probability that the grid is drawn at all.
    #[arg(long, default_value_t = 1.0)]
    random_grid_present: f64,

    /// Probability of printing the header text (see --print_header).
    #[arg(long, default_value_t = 0.0)]
    random_print_header: f64,

    /// Probability of black/white rendering; any nonzero value also forces
    /// a monochrome grid.
    #[arg(long, default_value_t = 0.0)]
    random_bw: f64,

    /// Drop the lead-name labels from the rendered page.
    #[arg(long)]
    remove_lead_names: bool,

    /// Export bounding boxes for lead-name text.
    #[arg(long)]
    lead_name_bbox: bool,

    /// Per-image JSON side-car richness: 0 = off, 1 = basic, 2 = verbose.
    #[arg(long, default_value_t = 0)]
    store_config: u8,

    /// Export bounding boxes for lead waveforms.
    #[arg(long)]
    lead_bbox: bool,

    /// Directory of font assets for header and annotation text.
    #[arg(long, default_value = "Fonts")]
    font_dir: PathBuf,

    #[command(flatten)]
    downstream: DownstreamArgs,
}

/// Accepted for drop-in compatibility with batch drivers of the full
/// augmentation pipeline; the handwriting, wrinkle, QR, and photographic
/// stages that consume these run downstream of this tool.
#[allow(dead_code)]
#[derive(clap::Args, Debug)]
struct DownstreamArgs {
    #[arg(long, default_value = "twelve")]
    num_leads: String,

    #[arg(long)]
    add_qr_code: bool,

    #[arg(short = 'l', long, default_value = "")]
    link: String,

    #[arg(short = 'n', long, default_value_t = 5)]
    num_words: u32,

    #[arg(long, default_value_t = 30)]
    x_offset: i32,

    #[arg(long, default_value_t = 30)]
    y_offset: i32,

    #[arg(long = "hws", default_value_t = 0.2)]
    handwriting_size_factor: f64,

    #[arg(long, default_value_t = 90)]
    crease_angle: i32,

    #[arg(long, default_value_t = 10)]
    num_creases_vertically: u32,

    #[arg(long, default_value_t = 10)]
    num_creases_horizontally: u32,

    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    rotate: i32,

    #[arg(long, default_value_t = 50)]
    noise: i32,

    #[arg(short = 'c', long, default_value_t = 0.01)]
    crop: f64,

    #[arg(short = 't', long, default_value_t = 40000)]
    temperature: i32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let sidecar = SidecarMode::from_flag(cli.store_config)?;
    let config = EngineConfig::load(&cli.config_file)?;

    let opts = RenderOptions {
        input_file: cli.input_file,
        header_file: cli.header_file,
        resolution: cli.resolution,
        random_resolution: cli.random_resolution,
        pad_inches: cli.pad_inches,
        random_padding: cli.random_padding,
        remove_lead_names: cli.remove_lead_names,
        calibration_pulse: cli.calibration_pulse,
        random_bw: cli.random_bw,
        random_grid_present: cli.random_grid_present,
        print_header: cli.print_header,
        random_print_header: cli.random_print_header,
        random_grid_color: cli.random_grid_color,
        standard_grid_color: cli.standard_grid_color,
        font_dir: cli.font_dir,
        full_mode: cli.full_mode,
        columns: cli.num_columns,
        lead_bbox: cli.lead_bbox,
        store_text_bbox: cli.lead_name_bbox,
        mask_unplotted_samples: cli.mask_unplotted_samples,
        sidecar,
        seed: cli.seed,
    };

    let mut resolver = Resolver::with_seed(cli.seed);
    let request = resolver.resolve(&opts)?;

    let mut renderer = create_renderer(RendererKind::Process)?;
    let count = generate_record(
        &request,
        &config,
        &cli.output_directory,
        cli.start_index,
        renderer.as_mut(),
    )?;

    eprintln!(
        "wrote {count} image(s) to {}",
        cli.output_directory.display()
    );
    Ok(())
}
