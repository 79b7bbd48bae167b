use anyhow::{Context, Result};
use clap::Parser;
use dehaze::image::{load_rgb_image, save_grayscale_f32, save_rgb_image, write_json_file};
use dehaze::{DehazeParams, Dehazer};
use std::path::PathBuf;

/// Remove atmospheric haze from a single photograph using the dark channel
/// prior with guided-filter transmission refinement.
#[derive(Parser, Debug)]
#[command(name = "dehaze", version, about)]
struct Cli {
    /// Input image (any format the `image` crate decodes)
    input: PathBuf,

    /// Output image path; format chosen by extension
    #[arg(short, long)]
    output: PathBuf,

    /// Haze removal strength in (0, 1]
    #[arg(long, default_value_t = 0.95)]
    omega: f32,

    /// Transmission floor applied before recovery
    #[arg(long, default_value_t = 0.1)]
    t0: f32,

    /// Window radius for the dark-channel minimum
    #[arg(long, default_value_t = 7)]
    radius: usize,

    /// Box radius of the guided-filter windows
    #[arg(long, default_value_t = 60)]
    guided_radius: usize,

    /// Guided-filter regularization
    #[arg(long, default_value_t = 1e-3)]
    eps: f32,

    /// Write the dark-channel map to this path (grayscale PNG)
    #[arg(long)]
    dark_out: Option<PathBuf>,

    /// Write the refined transmission map to this path (grayscale PNG)
    #[arg(long)]
    transmission_out: Option<PathBuf>,

    /// Write the JSON diagnostics report to this path
    #[arg(long)]
    report_out: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let params = DehazeParams {
        omega: cli.omega,
        t0: cli.t0,
        dark_radius: cli.radius,
        guided_radius: cli.guided_radius,
        eps: cli.eps,
    };

    let src = load_rgb_image(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let out = Dehazer::new(params).process(&src)?;

    if let Some(path) = &cli.dark_out {
        save_grayscale_f32(&out.dark_channel, path)?;
    }
    if let Some(path) = &cli.transmission_out {
        save_grayscale_f32(&out.refined_transmission, path)?;
    }
    if let Some(path) = &cli.report_out {
        write_json_file(path, &out.report)?;
    }

    save_rgb_image(&out.image, &cli.output)
        .with_context(|| format!("writing {}", cli.output.display()))?;

    let report = &out.report;
    println!(
        "{} -> {} ({}x{}, airlight=[{:.3}, {:.3}, {:.3}], {:.1} ms)",
        cli.input.display(),
        cli.output.display(),
        report.input_width,
        report.input_height,
        report.atmospheric_light[0],
        report.atmospheric_light[1],
        report.atmospheric_light[2],
        report.timings.total_ms
    );
    Ok(())
}
