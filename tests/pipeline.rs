use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;
use wealth_health::tooltip::TooltipRequest;
use wealth_health::{
    load_dataset, render_to_file, BubbleChart, ChartConfig, ChartError, MalformedPolicy,
};

const WEALTH_HEALTH: &str = "\
Country,LifeExpectancy,Income,Population,Region
Afghanistan,60.93,1925,31627506,South Asia
Albania,77.53,10620,2889167,Europe & Central Asia
Algeria,74.81,13434,38934334,Middle East & North Africa
Angola,52.27,6497,24227524,Sub-Saharan Africa
Argentina,76.16,17344,42980026,America
China,75.35,13017,1364270000,East Asia & Pacific
India,68.01,5565,1295291543,South Asia
United States,78.94,53354,318857056,America
";

fn write_csv(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("wealth-health-2014.csv");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn renders_svg_from_csv_file() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(&dir, WEALTH_HEALTH);
    let output = dir.path().join("chart.svg");
    let config = ChartConfig::default();

    let report = load_dataset(&input, MalformedPolicy::Fail).unwrap();
    assert_eq!(report.records.len(), 8);

    let chart = BubbleChart::from_records(report.records, &config).unwrap();
    assert_eq!(chart.records[0].country, "China");
    assert_eq!(chart.records[7].country, "Albania");

    let regions: Vec<_> = chart.scales.color.categories().to_vec();
    assert_eq!(
        regions,
        vec![
            "East Asia & Pacific",
            "South Asia",
            "America",
            "Middle East & North Africa",
            "Sub-Saharan Africa",
            "Europe & Central Asia",
        ]
    );

    let summary = render_to_file(&chart, &config, &output).unwrap();
    assert_eq!(summary.markers_drawn, 8);
    assert_eq!(summary.legend_entries, 6);

    let svg = fs::read_to_string(&output).unwrap();
    assert_eq!(svg.matches("<circle").count(), 16);
    assert!(svg.contains("16,000"));
}

#[test]
fn inspect_reports_hovered_country() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(&dir, WEALTH_HEALTH);
    let config = ChartConfig::default();
    let report = load_dataset(&input, MalformedPolicy::Skip).unwrap();
    let chart = BubbleChart::from_records(report.records, &config).unwrap();

    let us = chart
        .records
        .iter()
        .position(|r| r.country == "United States")
        .unwrap();
    let marker = chart.markers[us];
    let x = marker.x + config.margin.left as f64;
    let y = marker.y + config.margin.top as f64;

    match chart.hover(&config, x, y) {
        TooltipRequest::Show { content, .. } => {
            assert_eq!(content.country, "United States");
            assert_eq!(content.population, "318,857,056");
            assert_eq!(content.income, "53,354");
        }
        TooltipRequest::Hide => panic!("expected the United States tooltip"),
    }
}

#[test]
fn hover_produces_panel_markup() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(&dir, WEALTH_HEALTH);
    let config = ChartConfig::default();
    let report = load_dataset(&input, MalformedPolicy::Fail).unwrap();
    let chart = BubbleChart::from_records(report.records, &config).unwrap();

    let india = chart
        .records
        .iter()
        .position(|r| r.country == "India")
        .unwrap();
    let marker = chart.markers[india];
    let shown = chart.hover(
        &config,
        marker.x + config.margin.left as f64,
        marker.y + config.margin.top as f64,
    );
    match &shown {
        TooltipRequest::Show { opacity, content, .. } => {
            assert_eq!(*opacity, 0.8);
            assert_eq!(
                content.to_html(),
                "<div> Country:  India <br> Region:  South Asia <br> \
                 Population:  1,295,291,543 <br> Income:  5,565 <br> \
                 Life Expectancy:  68.01 <br> </div>"
            );
        }
        TooltipRequest::Hide => panic!("expected the India tooltip"),
    }
    assert!(shown.html().starts_with("<div> Country:  India"));

    let hidden = chart.hover(&config, 0.0, 0.0);
    assert_eq!(hidden, TooltipRequest::Hide);
    assert_eq!(hidden.html(), "");
}

#[test]
fn malformed_income_is_flagged() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(
        &dir,
        "Country,LifeExpectancy,Income,Population,Region\n\
         Foo,70.5,N/A,1000000,Asia\n\
         Bar,70.5,4000,1000000,Asia\n",
    );

    let report = load_dataset(&input, MalformedPolicy::Skip).unwrap();
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.rejected.len(), 1);
    assert!(report.rejected[0].has_column("Income"));

    match load_dataset(&input, MalformedPolicy::Fail) {
        Err(ChartError::Parse(row)) => {
            assert_eq!(row.country, "Foo");
            assert_eq!(row.fields[0].raw, "N/A");
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn header_only_file_is_an_empty_dataset() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(&dir, "Country,LifeExpectancy,Income,Population,Region\n");
    let report = load_dataset(&input, MalformedPolicy::Fail).unwrap();
    let err = BubbleChart::from_records(report.records, &ChartConfig::default()).unwrap_err();
    assert!(matches!(err, ChartError::EmptyDataset));
}

#[test]
fn missing_input_is_a_fetch_error() {
    let dir = TempDir::new().unwrap();
    let err = load_dataset(&dir.path().join("absent.csv"), MalformedPolicy::Skip).unwrap_err();
    assert!(matches!(err, ChartError::Fetch { .. }));
}

#[test]
fn config_file_changes_layout() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("chart.toml");
    fs::write(
        &path,
        "width = 1000\nheight = 700\nradius_range = [2.0, 40.0]\n\n[legend]\noffset = [0.0, 0.0]\n",
    )
    .unwrap();

    let config = ChartConfig::load(&path).unwrap();
    assert_eq!(config.chart_width(), 950.0);
    assert_eq!(config.chart_height(), 660.0);

    let input = write_csv(&dir, WEALTH_HEALTH);
    let report = load_dataset(&input, MalformedPolicy::Fail).unwrap();
    let chart = BubbleChart::from_records(report.records, &config).unwrap();
    assert_eq!(chart.markers[0].radius, 40.0);
    assert_eq!(chart.legend[0].swatch, (75.0, 110.0));
}
