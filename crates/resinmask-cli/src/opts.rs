// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line options.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use resinmask_core::types::Interpolation;

#[derive(Parser, Debug)]
#[command(name = "resinmask")]
#[command(version, about = "PCB artwork to exposure masks for resin printers", long_about = None)]
pub(crate) struct Opts {
    #[command(subcommand)]
    pub(crate) command: Command,

    /// JSON config file (output directory, previews, log filter)
    #[arg(long, global = true, value_name = "CONFIG_FILE")]
    pub(crate) config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Render every layer of an export request and write the files
    Export(ExportArgs),

    /// Print the cumulative exposure times of a calibration grid
    Schedule(ScheduleArgs),
}

#[derive(Debug, Args)]
pub(crate) struct ExportArgs {
    /// Export request JSON, or `-` for stdin
    #[arg(long, value_name = "REQUEST_FILE")]
    pub(crate) request: PathBuf,

    /// Output directory, overrides the config file
    #[arg(long, value_name = "DIR")]
    pub(crate) out: Option<PathBuf>,

    /// Skip writing preview PNGs
    #[arg(long)]
    pub(crate) no_previews: bool,

    /// Indent the layer stack JSON
    #[arg(long)]
    pub(crate) pretty: bool,
}

#[derive(Debug, Args)]
pub(crate) struct ScheduleArgs {
    #[arg(long, default_value_t = 1)]
    pub(crate) rows: u32,

    #[arg(long)]
    pub(crate) columns: u32,

    /// Shortest cumulative exposure, seconds
    #[arg(long)]
    pub(crate) min: f64,

    /// Longest cumulative exposure, seconds
    #[arg(long)]
    pub(crate) max: f64,

    /// Step spacing
    #[arg(long, value_enum, default_value = "geometric")]
    pub(crate) interpolation: InterpolationArg,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub(crate) enum InterpolationArg {
    Geometric,
    Linear,
}

impl From<InterpolationArg> for Interpolation {
    fn from(value: InterpolationArg) -> Self {
        match value {
            InterpolationArg::Geometric => Interpolation::Geometric,
            InterpolationArg::Linear => Interpolation::Linear,
        }
    }
}
