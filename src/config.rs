// Command-line configuration.

use crate::canvas::DAB_RADIUS;
use crate::sampler::Resample;
use clap::{Parser, ValueEnum};
use minifb::Scale;
use std::path::PathBuf;

/// Draw digits and collect them into an MNIST-style CSV.
#[derive(Debug, Clone, Parser)]
#[command(name = "mnist-drawer", version)]
pub struct Args {
    /// Directory the exported CSV files are written to
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Radius of one brush dab, in canvas pixels
    #[arg(long, default_value_t = DAB_RADIUS, value_parser = clap::value_parser!(i32).range(0..=64))]
    pub brush_radius: i32,

    /// How the 280×280 canvas is shrunk to 28×28
    #[arg(long, value_enum, default_value_t = Resample::Box)]
    pub resample: Resample,

    /// Label selected at startup
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=9))]
    pub label: u8,

    /// Run headless, reading one JSON event per line from this file
    #[arg(long)]
    pub replay: Option<PathBuf>,

    /// Window scale factor
    #[arg(long, value_enum, default_value_t = WindowScale::X1)]
    pub scale: WindowScale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WindowScale {
    #[value(name = "1")]
    X1,
    #[value(name = "2")]
    X2,
    #[value(name = "4")]
    X4,
}

impl Args {
    pub fn window_scale(&self) -> Scale {
        match self.scale {
            WindowScale::X1 => Scale::X1,
            WindowScale::X2 => Scale::X2,
            WindowScale::X4 => Scale::X4,
        }
    }
}
