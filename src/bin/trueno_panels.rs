//! trueno-panels - render the three demo figures.
//!
//! Builds a 32-row table of pseudo-random integers in `[-10, 10)` and draws
//! it with each renderer.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::{error, info};

use trueno_panels::config::PlotConfig;
use trueno_panels::output::ImageFormat;
use trueno_panels::prelude::*;

const ROWS: usize = 32;
const SERIES: [&str; 4] = ["B", "C", "D", "E"];

#[derive(Parser)]
#[command(name = "trueno-panels")]
#[command(about = "Render single, per-series and grouped demo line charts")]
struct Cli {
    /// Directory the images are written to (created if missing)
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// YAML file with `all`, `each` and `group` option sections
    #[arg(long)]
    config: Option<PathBuf>,

    /// Image format
    #[arg(long, value_enum, default_value_t = Format::Png)]
    format: Format,

    /// Seed for the demo data
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Png,
    Jpg,
}

impl From<Format> for ImageFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Png => Self::Png,
            Format::Jpg => Self::Jpeg,
        }
    }
}

/// xorshift64* stream of integers in `[-10, 10)`.
fn demo_values(seed: u64, count: usize) -> Vec<f64> {
    let mut state = seed.max(1);
    (0..count)
        .map(|_| {
            state ^= state >> 12;
            state ^= state << 25;
            state ^= state >> 27;
            let r = state.wrapping_mul(0x2545_F491_4F6C_DD1D);
            (r % 20) as f64 - 10.0
        })
        .collect()
}

fn demo_table(seed: u64) -> Result<SeriesTable> {
    let x: Vec<f64> = (0..ROWS).map(|i| i as f64).collect();
    let mut table = SeriesTable::new(x)?;
    for (i, name) in SERIES.iter().enumerate() {
        table = table.with_column(*name, demo_values(seed.wrapping_add(i as u64), ROWS))?;
    }
    Ok(table)
}

/// Options used when no config file is given.
fn demo_config() -> PlotConfig {
    let mut config = PlotConfig::default();
    config.all = AllOptions::default().x_tick_interval(10).legend_columns(2);
    config.each = EachOptions::default().x_tick_interval(10);
    config.each.x_label_size = 18.0;
    config.group = GroupOptions::default().x_tick_interval(10);
    config.group.x_label_size = 18.0;
    config.group.y_label_size = 18.0;
    config
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => PlotConfig::load(path)?,
        None => demo_config(),
    };
    let ext = ImageFormat::from(cli.format).extension();
    let data = demo_table(cli.seed)?;
    let labels = data.labels();

    let out = |name: &str| OutputPath::new(&cli.out_dir, format!("demo_{name}.{ext}"));

    plot_all(&data, &AxisLabels::new("Val1", "Val2"), &labels, &out("all"), &config.all)?;
    plot_each(&data, PanelGrid::new(2, 3)?, "Val1", &labels, &out("each"), &config.each)?;
    plot_each_group(
        &data,
        PanelGrid::new(1, 2)?,
        2,
        &AxisLabels::new("Val1", "val2"),
        &labels,
        &out("group"),
        &config.group,
    )?;

    info!("wrote 3 figures to {}", cli.out_dir.display());
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_module_path(false)
        .init();

    if let Err(e) = run(&cli) {
        error!("{e}");
        std::process::exit(1);
    }
}
