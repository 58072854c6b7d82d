use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "wealth-health", version, about = "Wealth & health of nations bubble chart")]
pub struct Cli {
    /// TOML file overriding the default layout.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the chart to a PNG or SVG file.
    Render {
        #[arg(short, long, default_value = "wealth-health-2014.csv")]
        input: PathBuf,
        #[arg(short, long, default_value = "wealth-health.svg")]
        output: PathBuf,
    },
    /// Show the tooltip for the marker under a device coordinate.
    Inspect {
        #[arg(short, long, default_value = "wealth-health-2014.csv")]
        input: PathBuf,
        #[arg(long)]
        x: f64,
        #[arg(long)]
        y: f64,
        /// Print the tooltip panel markup instead of plain lines.
        #[arg(long)]
        html: bool,
    },
    /// Print descriptive statistics of the dataset.
    Summary {
        #[arg(short, long, default_value = "wealth-health-2014.csv")]
        input: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_inspect_with_global_config() {
        let cli = Cli::try_parse_from([
            "wealth-health",
            "inspect",
            "--x",
            "120",
            "--y",
            "45.5",
            "--config",
            "chart.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("chart.toml")));
        match cli.command {
            Command::Inspect { input, x, y, html } => {
                assert_eq!(input, PathBuf::from("wealth-health-2014.csv"));
                assert_eq!((x, y), (120.0, 45.5));
                assert!(!html);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn inspect_html_flag() {
        let cli =
            Cli::try_parse_from(["wealth-health", "inspect", "--x", "1", "--y", "2", "--html"])
                .unwrap();
        assert!(matches!(cli.command, Command::Inspect { html: true, .. }));
    }

    #[test]
    fn render_requires_no_arguments() {
        let cli = Cli::try_parse_from(["wealth-health", "render"]).unwrap();
        assert!(matches!(cli.command, Command::Render { .. }));
    }
}
