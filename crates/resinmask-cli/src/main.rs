// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// resinmask — PCB artwork to exposure masks for mask-projection resin printers.
//
// Entry point. Loads config, initialises logging, runs the export pipeline and
// prints a JSON summary to stdout.

mod opts;
mod output;

use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use resinmask_core::config::ExportConfig;
use resinmask_core::error::Result;
use resinmask_core::types::{CalibrationSpec, ExportRequest};
use resinmask_export::{ExportPipeline, LayerStackBuilder};
use resinmask_render::SvgRasterizer;
use resinmask_render::schedule::{cell_durations, schedule};
use serde_json::json;

use opts::{Command, ExportArgs, Opts, ScheduleArgs};
use output::{ExportSummary, write_records};

#[tokio::main]
async fn main() -> ExitCode {
    let opts = Opts::parse();

    let config = match &opts.config {
        Some(path) => ExportConfig::load(path),
        None => Ok(ExportConfig::default()),
    };
    let log_filter = config
        .as_ref()
        .map(|c| c.log_filter.clone())
        .unwrap_or_else(|_| ExportConfig::default().log_filter);

    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_filter)),
        )
        .init();

    let result = match config {
        Ok(config) => match opts.command {
            Command::Export(args) => export(config, args).await,
            Command::Schedule(args) => print_schedule(&args),
        },
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "resinmask failed");
            println!("{}", json!({ "success": false, "error": err.to_string() }));
            ExitCode::FAILURE
        }
    }
}

async fn export(mut config: ExportConfig, args: ExportArgs) -> Result<()> {
    if let Some(out) = args.out {
        config.output_dir = out;
    }
    if args.no_previews {
        config.write_previews = false;
    }

    let request = read_request(&args.request)?;
    tracing::info!(
        layers = request.layers.len(),
        model = %request.profile.model,
        "Export request loaded"
    );

    let started_at = chrono::Utc::now();
    let builder = if args.pretty {
        LayerStackBuilder::new().pretty()
    } else {
        LayerStackBuilder::new()
    };
    let pipeline = ExportPipeline::new(SvgRasterizer::new(), builder);
    let records = pipeline.run(&request).await?;
    let outputs = write_records(&config, &records)?;

    let summary = ExportSummary {
        id: records.first().map(|r| r.export_id.to_string()),
        started_at,
        finished_at: chrono::Utc::now(),
        output_dir: config.output_dir,
        outputs,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn read_request(path: &Path) -> Result<ExportRequest> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        text
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&text)?)
}

fn print_schedule(args: &ScheduleArgs) -> Result<()> {
    let spec = CalibrationSpec {
        rows: args.rows,
        columns: args.columns,
        min_time_s: args.min,
        max_time_s: args.max,
        interpolation: args.interpolation.into(),
    };
    let times = schedule(&spec)?;
    let steps: Vec<_> = times
        .iter()
        .zip(cell_durations(&times))
        .enumerate()
        .map(|(index, (cumulative, duration))| {
            json!({
                "row": index as u32 / spec.columns,
                "column": index as u32 % spec.columns,
                "cumulative_s": cumulative,
                "duration_s": duration,
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&steps)?);
    Ok(())
}
