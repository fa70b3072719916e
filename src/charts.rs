use log::{debug, info, warn};

use country_series::chart::{charts_in_order, summary_line, CountryChart};
use country_series::session::Session;
use country_series::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::charts::config_reader::*;
use crate::charts::io_common::resolve_path;
use crate::charts::io_csv::read_sources;

pub mod config_reader;
pub mod io_common;
pub mod io_csv;

#[derive(Debug, Snafu)]
pub enum ChartsError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the JSON content of {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error writing the charts to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of {path}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("{source}"))]
    Stats { source: StatsErrors },
    #[snafu(display("No data was loaded"))]
    NoData {},
    #[snafu(display("Difference detected between the computed charts and the reference {path}"))]
    ReferenceMismatch { path: String },
}

pub type ChartsResult<T> = Result<T, ChartsError>;

/// The settings of one run, once the configuration file and the flags are merged.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RunSettings {
    pub confirmed: PathBuf,
    pub recovered: PathBuf,
    pub deaths: PathBuf,
    pub order: SortOrder,
    pub title: String,
    pub out: Option<String>,
    pub reference: Option<String>,
}

pub fn resolve_settings(args: &Args) -> ChartsResult<RunSettings> {
    let (config, root) = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            info!("config: {:?}", config);
            let root = Path::new(config_path)
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_default();
            (config, root)
        }
        None => (ChartsConfig::default(), PathBuf::new()),
    };

    // Flags are relative to the working directory, the configuration to its own directory.
    let source = |flag: &Option<String>, configured: &Option<String>, default: &str| match (
        flag, configured,
    ) {
        (Some(f), _) => PathBuf::from(f),
        (None, Some(c)) => resolve_path(&root, c),
        (None, None) => resolve_path(&root, default),
    };

    let field: SortField = match args.order_by.as_ref().or(config.order_by.as_ref()) {
        Some(s) => s.parse().context(StatsSnafu {})?,
        None => SortOrder::DEFAULT_ORDER.field,
    };
    let direction: SortDirection = match args.order_dir.as_ref().or(config.order_dir.as_ref()) {
        Some(s) => s.parse().context(StatsSnafu {})?,
        None => SortOrder::DEFAULT_ORDER.direction,
    };

    Ok(RunSettings {
        confirmed: source(
            &args.confirmed,
            &config.sources.confirmed,
            DEFAULT_CONFIRMED_FILE,
        ),
        recovered: source(
            &args.recovered,
            &config.sources.recovered,
            DEFAULT_RECOVERED_FILE,
        ),
        deaths: source(&args.deaths, &config.sources.deaths, DEFAULT_DEATHS_FILE),
        order: SortOrder::new(field, direction),
        title: config
            .output_settings
            .title
            .clone()
            .unwrap_or_else(|| "Coronavirus COVID-19 Stat Charts".to_string()),
        out: args
            .out
            .clone()
            .or_else(|| config.output_settings.output_path.clone()),
        reference: args.reference.clone(),
    })
}

fn summary_to_json(summary: &Option<CountrySummary>) -> JSValue {
    match summary {
        Some(s) => json!({
            "firstContactDate": s.first_contact_date,
            "confirmed": s.confirmed,
            "recovered": s.recovered,
            "deaths": s.deaths,
            "active": s.active,
        }),
        None => JSValue::Null,
    }
}

fn chart_to_json(chart: &CountryChart) -> JSValue {
    let datasets: Vec<JSValue> = chart
        .datasets
        .iter()
        .map(|d| json!({"label": d.label, "color": d.color, "data": d.data}))
        .collect();
    json!({
        "country": chart.country,
        "summary": summary_to_json(&chart.summary),
        "labels": chart.labels,
        "datasets": datasets,
    })
}

fn build_charts_js(settings: &RunSettings, charts: &[CountryChart]) -> JSValue {
    let countries: Vec<JSValue> = charts.iter().map(chart_to_json).collect();
    json!({
        "title": settings.title,
        "orderBy": settings.order.field.name(),
        "orderDir": settings.order.direction.name(),
        "countries": countries,
    })
}

/// Loads the three tables and computes the charts, in ranking order.
///
/// A table that cannot be read fails the whole load: no partial or empty charts are produced.
pub fn run_charts(settings: &RunSettings, today: NaiveDate) -> ChartsResult<JSValue> {
    let mut session = Session::new(settings.order);
    let ticket = session.begin_load().context(StatsSnafu {})?;
    info!(
        "Loading {:?}, {:?}, {:?}",
        settings.confirmed, settings.recovered, settings.deaths
    );
    let tables = match read_sources(&settings.confirmed, &settings.recovered, &settings.deaths) {
        Ok(t) => t,
        Err(e) => {
            let err = session.fail_load(ticket, &e.to_string());
            return Err(err).context(StatsSnafu {});
        }
    };
    session
        .complete_load(ticket, &tables, today)
        .context(StatsSnafu {})?;

    let dataset = session.dataset().context(NoDataSnafu {})?;
    for country in session.ranking() {
        info!("{}", summary_line(country, dataset.summary(country)));
    }
    let charts = charts_in_order(dataset, session.ranking());
    Ok(build_charts_js(settings, &charts))
}

/// Compares the charts with a reference file, printing the differences.
pub fn check_reference(charts_js: &JSValue, reference_path: &str) -> ChartsResult<()> {
    let reference = read_summary(reference_path)?;
    let pretty_ref = serde_json::to_string_pretty(&reference).context(ParsingJsonSnafu {
        path: reference_path,
    })?;
    let pretty_charts = serde_json::to_string_pretty(charts_js).context(ParsingJsonSnafu {
        path: reference_path,
    })?;
    if pretty_ref != pretty_charts {
        warn!("Found differences with the reference {}", reference_path);
        print_diff(pretty_ref.as_str(), pretty_charts.as_str(), "\n");
        return ReferenceMismatchSnafu {
            path: reference_path,
        }
        .fail();
    }
    info!("The charts match the reference {}", reference_path);
    Ok(())
}

fn write_output(charts_js: &JSValue, out: Option<&str>) -> ChartsResult<()> {
    let pretty = serde_json::to_string_pretty(charts_js).context(ParsingJsonSnafu {
        path: out.unwrap_or("stdout"),
    })?;
    match out {
        None | Some("stdout") => {
            println!("{}", pretty);
        }
        Some(path) => {
            fs::write(path, pretty).context(WritingOutputSnafu { path })?;
            info!("Charts written to {}", path);
        }
    }
    Ok(())
}

pub fn run(args: &Args) -> ChartsResult<()> {
    let settings = resolve_settings(args)?;
    debug!("settings: {:?}", settings);
    let charts_js = run_charts(&settings, country_series::today())?;
    write_output(&charts_js, settings.out.as_deref())?;
    if let Some(reference_path) = &settings.reference {
        check_reference(&charts_js, reference_path)?;
    }
    Ok(())
}
