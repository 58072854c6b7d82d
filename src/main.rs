mod cli;

use anyhow::Context;
use clap::Parser;
use std::path::Path;

use cli::{Cli, Command};
use wealth_health::eda::{log_summary, summarize};
use wealth_health::tooltip::TooltipRequest;
use wealth_health::{load_dataset, render_to_file, BubbleChart, ChartConfig};

fn load_config(path: Option<&Path>) -> anyhow::Result<ChartConfig> {
    match path {
        Some(path) => ChartConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(ChartConfig::default()),
    }
}

fn build_chart(input: &Path, config: &ChartConfig) -> anyhow::Result<BubbleChart> {
    let report = load_dataset(input, config.on_malformed)
        .with_context(|| format!("loading dataset {}", input.display()))?;
    Ok(BubbleChart::from_records(report.records, config)?)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Render { input, output } => {
            let chart = build_chart(&input, &config)?;
            render_to_file(&chart, &config, &output)
                .with_context(|| format!("rendering {}", output.display()))?;
        }
        Command::Inspect { input, x, y, html } => {
            let chart = build_chart(&input, &config)?;
            match chart.hover(&config, x, y) {
                request @ TooltipRequest::Show { .. } if html => println!("{}", request.html()),
                TooltipRequest::Show { content, .. } => {
                    for line in content.lines() {
                        println!("{}", line);
                    }
                }
                TooltipRequest::Hide => println!("No marker at ({}, {})", x, y),
            }
        }
        Command::Summary { input } => {
            let report = load_dataset(&input, config.on_malformed)
                .with_context(|| format!("loading dataset {}", input.display()))?;
            match summarize(&report.records) {
                Some(summary) => log_summary(&summary),
                None => log::warn!("No usable records in {}", input.display()),
            }
        }
    }

    Ok(())
}
