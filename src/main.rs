use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;

use fastdissolve::config::FileConfig;
use fastdissolve::io::{read_frame, write_frame};
use fastdissolve::{GeoFrame, dissolve_frame_with, fill_frame};

/// Dissolve a polygon layer to its outer boundary
///
/// Examples:
///   # Dissolve all watershed polygons into their outline
///   fastdissolve dissolve basins.geojson
///
///   # Dissolve and fill every remaining hole
///   fastdissolve dissolve basins.geojson --fill-holes 0 -o outline.geojson
///
///   # Fill holes up to 0.01 square degrees without dissolving
///   fastdissolve fill lakes.geojson --area-max 0.01
#[derive(Parser, Debug)]
#[command(name = "fastdissolve")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches fastdissolve.toml if not provided)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Dissolve every polygon into the outer footprint of the layer
    Dissolve {
        /// Input GeoJSON file
        input: PathBuf,

        /// Output GeoJSON file (defaults to {input}_dissolved.geojson)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Padding around the layer bounds, in layer units
        #[arg(long)]
        margin: Option<f64>,

        /// Grow/shrink distance used to remove slivers, in layer units
        #[arg(long)]
        tolerance: Option<f64>,

        /// Fill holes up to this area after dissolving (0 fills all holes)
        #[arg(long)]
        fill_holes: Option<f64>,
    },

    /// Fill small holes in every polygon of the layer
    Fill {
        /// Input GeoJSON file
        input: PathBuf,

        /// Keep holes larger than this area, fill the rest (0 fills all holes)
        #[arg(long)]
        area_max: f64,

        /// Output GeoJSON file (defaults to {input}_filled.geojson)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let (file_config, skipped_configs) = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let config = FileConfig::load_from(config_path)
                .context(format!("Failed to load config file: {:?}", config_path))?;
            (config, Vec::new())
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        let (config, skipped) = FileConfig::load();
        (config.unwrap_or_default(), skipped)
    };

    let verbose = args.verbose || file_config.verbose;
    init_logging(verbose);
    for e in &skipped_configs {
        log::warn!("Ignoring config file: {}", e);
    }

    println!("fastdissolve - Polygon Layer Dissolver");
    println!("======================================");
    println!();

    let output_path = match args.command {
        Command::Dissolve {
            input,
            output,
            margin,
            tolerance,
            fill_holes,
        } => {
            let mut options = file_config.dissolve_options();
            if let Some(m) = margin {
                options = options.with_margin(m);
            }
            if let Some(t) = tolerance {
                options = options.with_tolerance(t);
            }
            if fill_holes.is_some() {
                options = options.with_fill_holes(fill_holes);
            }
            options.validate().context("Invalid dissolve options")?;

            if verbose {
                println!("Configuration:");
                println!("  Input: {}", input.display());
                println!("  Margin: {}", options.margin);
                println!("  Tolerance: {}", options.tolerance);
                println!("  Miter angle: {} rad", options.miter_angle);
                match options.fill_holes {
                    Some(area) => println!("  Fill holes: up to {}", area),
                    None => println!("  Fill holes: disabled"),
                }
                println!();
            }

            let layer = load_layer(&input)?;

            let spinner = create_spinner("Dissolving polygons...");
            let start = Instant::now();
            let dissolved =
                dissolve_frame_with(&layer, &options).context("Failed to dissolve layer")?;
            spinner.finish_with_message(format!(
                "Dissolved {} features into {} polygon(s) [{:.1}s]",
                layer.len(),
                dissolved.len(),
                start.elapsed().as_secs_f32()
            ));
            if verbose {
                println!("  Area: {:.6} -> {:.6}", layer.area(), dissolved.area());
            }

            let output_path = output
                .or_else(|| file_config.output.clone())
                .unwrap_or_else(|| default_output(&input, "dissolved"));
            save_layer(&output_path, &dissolved)?;
            output_path
        }
        Command::Fill {
            input,
            area_max,
            output,
        } => {
            if !area_max.is_finite() {
                bail!("--area-max must be a finite number, got {}", area_max);
            }

            let layer = load_layer(&input)?;

            let spinner = create_spinner("Filling holes...");
            let start = Instant::now();
            let before: usize = layer.shapes().map(|s| s.interior_count()).sum();
            let filled = fill_frame(&layer, area_max);
            let after: usize = filled.shapes().map(|s| s.interior_count()).sum();
            spinner.finish_with_message(format!(
                "Filled {} of {} holes [{:.1}s]",
                before - after,
                before,
                start.elapsed().as_secs_f32()
            ));

            let output_path = output
                .or_else(|| file_config.output.clone())
                .unwrap_or_else(|| default_output(&input, "filled"));
            save_layer(&output_path, &filled)?;
            output_path
        }
    };

    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );
    println!();
    println!("Output: {}", output_path.display());

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "fastdissolve=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn load_layer(input: &Path) -> Result<GeoFrame> {
    let spinner = create_spinner("Reading input layer...");
    let start = Instant::now();
    let layer = read_frame(input).context(format!("Failed to read {}", input.display()))?;
    spinner.finish_with_message(format!(
        "Read {} features ({}) [{:.1}s]",
        layer.len(),
        layer
            .crs()
            .map(|crs| crs.to_string())
            .unwrap_or_else(|| "no CRS".to_string()),
        start.elapsed().as_secs_f32()
    ));
    Ok(layer)
}

fn save_layer(output: &Path, layer: &GeoFrame) -> Result<()> {
    let spinner = create_spinner("Writing GeoJSON...");
    let start = Instant::now();
    write_frame(output, layer).context("Failed to write output GeoJSON")?;
    spinner.finish_with_message(format!(
        "Wrote {} features [{:.1}s]",
        layer.len(),
        start.elapsed().as_secs_f32()
    ));
    Ok(())
}

fn default_output(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "layer".to_string());
    input.with_file_name(format!("{}_{}.geojson", stem, suffix))
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output() {
        let path = default_output(Path::new("data/basins.geojson"), "dissolved");
        assert_eq!(path, PathBuf::from("data/basins_dissolved.geojson"));
    }

    #[test]
    fn test_args_parse_dissolve() {
        let args = Args::parse_from([
            "fastdissolve",
            "dissolve",
            "basins.geojson",
            "--fill-holes",
            "0",
            "-v",
        ]);
        assert!(args.verbose);
        match args.command {
            Command::Dissolve {
                input, fill_holes, ..
            } => {
                assert_eq!(input, PathBuf::from("basins.geojson"));
                assert_eq!(fill_holes, Some(0.0));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
