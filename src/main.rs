use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use campmap::config::FileConfig;
use campmap::data::{load_camps, mock_camps};
use campmap::domain::RingAlphabet;
use campmap::render::{
    JsonSurface, MapRenderer, OutputFormat, RenderReport, RenderStyle, SvgSurface, write_output,
};
use campmap::status::Palette;
use campmap::svgdoc::{load_site_plan, parse_ring_roads};

/// Render a circular festival camp map colored by bed-assignment status
///
/// Examples:
///   # Render the built-in sample camps to campmap.svg
///   campmap
///
///   # Render real camp records, fitted to the rings
///   campmap --camps camps.json --fit -o bed-map.svg
///
///   # Twelve rings in 30 degree blocks, exported as drawing primitives
///   campmap --rings ABCDEFGHIJKL --subdivisions 12 --format json
///
///   # Overlay ring roads from a site plan
///   campmap --site-plan city.svg
#[derive(Parser, Debug)]
#[command(name = "campmap")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches campmap.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON file of camp records (defaults to built-in sample camps)
    #[arg(short = 'c', long)]
    camps: Option<PathBuf>,

    /// SVG site plan whose Ring_Roads group is drawn over the blocks
    #[arg(long)]
    site_plan: Option<PathBuf>,

    /// Output file path (defaults to campmap.svg or campmap.json)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long)]
    format: Option<OutputFormat>,

    /// Ring letters from the center outward
    #[arg(long)]
    rings: Option<String>,

    /// Number of equal blocks per ring
    #[arg(long, value_parser = clap::value_parser!(u16).range(2..=360))]
    subdivisions: Option<u16>,

    /// Global scale factor applied to all radii
    #[arg(long)]
    scale: Option<f64>,

    /// Fit the view to the rings instead of the fixed canvas
    #[arg(long)]
    fit: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    let total_start = Instant::now();

    let file_config = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            FileConfig::from_path(config_path)
                .context(format!("Failed to load config file: {:?}", config_path))?
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load().unwrap_or_default()
    };

    let verbose = args.verbose || file_config.verbose;

    let mut map_config = file_config.map.clone();
    if let Some(ref rings) = args.rings {
        map_config.rings = RingAlphabet::from(rings.as_str());
    }
    if let Some(subdivisions) = args.subdivisions {
        map_config.subdivisions = subdivisions as usize;
    }
    if let Some(scale) = args.scale {
        map_config.scale = scale;
    }
    map_config.validate().context("Invalid map configuration")?;

    let format = args.format.or(file_config.format).unwrap_or_default();
    let fit = args.fit || file_config.fit;
    let camps_path = args.camps.clone().or_else(|| file_config.camps.clone());
    let site_plan_path = args
        .site_plan
        .clone()
        .or_else(|| file_config.site_plan.clone());
    let output_path = args
        .output
        .clone()
        .or_else(|| file_config.output.clone())
        .unwrap_or_else(|| PathBuf::from(format!("campmap.{}", format.extension())));

    let palette = Palette::from_config(&file_config.palette).context("Invalid palette")?;
    let style = RenderStyle::from_config(&file_config.style).context("Invalid style")?;

    println!("campmap - Camp Bed Map Renderer");
    println!("===============================");
    println!();

    if verbose {
        println!("Configuration:");
        println!(
            "  Rings: {} ({} blocks each)",
            map_config.rings.len(),
            map_config.subdivisions
        );
        println!(
            "  Radii: base {} + {} per ring, scale {}",
            map_config.base_radius, map_config.ring_width, map_config.scale
        );
        println!(
            "  Center: ({}, {}), canvas {}",
            map_config.center.0, map_config.center.1, map_config.canvas_size
        );
        println!("  View: {}", if fit { "fit to rings" } else { "fixed canvas" });
        println!("  Format: {:?}", format);
        println!("  Output: {}", output_path.display());
        println!();
    }

    let spinner = create_spinner("Loading camp records...");
    let start = Instant::now();
    let camps = match camps_path {
        Some(ref path) => load_camps(path).context("Failed to load camp records")?,
        None => mock_camps(),
    };
    spinner.finish_with_message(format!(
        "Loaded {} camps from {} [{:.1}s]",
        camps.len(),
        camps_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in sample data".to_string()),
        start.elapsed().as_secs_f32()
    ));

    let ring_roads = match site_plan_path {
        Some(ref path) => {
            let spinner = create_spinner("Reading ring roads from site plan...");
            let doc = load_site_plan(path).context("Failed to read site plan")?;
            let roads = parse_ring_roads(&doc).context("Failed to parse site plan")?;
            spinner.finish_with_message(format!("Found {} ring roads", roads.len()));
            roads
        }
        None => BTreeMap::new(),
    };

    let spinner = create_spinner("Rendering blocks...");
    let start = Instant::now();
    let renderer = MapRenderer::new(map_config)
        .with_palette(palette)
        .with_style(style)
        .with_fit(fit)
        .with_ring_roads(ring_roads);

    let (document, report) = match format {
        OutputFormat::Svg => renderer.render(SvgSurface::new(), &camps),
        OutputFormat::Json => {
            let (value, report) = renderer.render(JsonSurface::new(), &camps);
            let document =
                serde_json::to_string_pretty(&value).context("Failed to serialize JSON output")?;
            (document, report)
        }
    };
    spinner.finish_with_message(format!(
        "Rendered {} [{:.1}s]",
        report.summary(),
        start.elapsed().as_secs_f32()
    ));

    write_output(&output_path, &document).context("Failed to write output file")?;

    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );
    println!();
    println!("Output: {}", output_path.display());

    print_report(&report, verbose);

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn print_report(report: &RenderReport, verbose: bool) {
    if report.is_clean() && !verbose {
        return;
    }

    println!();
    println!("Render report");
    println!("=============");
    for (status, count) in &report.by_status {
        println!("  {:<16} {:>4} blocks", status.to_string(), count);
    }
    if report.overlays > 0 {
        println!("  Ring roads drawn: {}", report.overlays);
    }
    if report.skipped_camps > 0 {
        println!(
            "  {} camp records have a malformed placement address and were ignored",
            report.skipped_camps
        );
    }
    for (id, reason) in &report.failed {
        println!("  Block {} left blank: {}", id, reason);
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
