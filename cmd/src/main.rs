// Copyright 2022 Zinc Labs Inc. and Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::PathBuf;

use activeseries_cmd::{load_trackers, parse_label, series_labels, OutputFormat, Report};
use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(about = "Validates active series custom trackers and prints them in canonical form")]
struct Cli {
    #[arg(
        long = "ingester.active-series-custom-trackers",
        value_name = "NAME:MATCHER;...",
        help = r#"Additional active series metrics, matching the provided matchers. Can be repeated.

Examples:
    foo:{foo="bar"}
    api:{job="api"};errors:{status=~"5.."}"#
    )]
    trackers: Vec<String>,

    /// YAML file with trackers under `ingester.active_series_custom_trackers`
    #[arg(long = "config.file", value_name = "PATH")]
    config_file: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Series label, e.g. `job=api`. When given, prints the trackers counting the series.
    #[arg(long = "label", value_name = "NAME=VALUE", value_parser = parse_label)]
    labels: Vec<(String, String)>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let trackers = load_trackers(cli.config_file.as_deref(), &cli.trackers)?;
    let series = if cli.labels.is_empty() {
        None
    } else {
        Some(series_labels(&cli.labels)?)
    };
    let report = Report::new(trackers, series.as_ref())?;
    println!("{}", report.render(cli.output)?);
    Ok(())
}
