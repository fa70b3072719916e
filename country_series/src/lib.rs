mod config;
pub use chrono::NaiveDate;
use log::{debug, info};

pub mod builder;
pub mod chart;
pub mod dates;
pub mod manual;
pub mod ranking;
pub mod session;
pub mod summary;

pub use crate::config::*;

/// Runs the whole pipeline on the three tables of one load.
///
/// Arguments:
/// * `tables` the confirmed, recovered and deaths tables, already parsed into rows
/// * `order` the summary field and direction used to rank the countries
/// * `today` the first contact date of the countries without any confirmed case
///
/// Returns the dataset and the ranked country names.
pub fn run_pipeline(
    tables: &SourceTables,
    order: SortOrder,
    today: NaiveDate,
) -> (Dataset, Vec<String>) {
    info!(
        "Processing {} confirmed rows, {} recovered rows, {} deaths rows",
        tables.confirmed.len(),
        tables.recovered.len(),
        tables.deaths.len()
    );
    let mut b = builder::Builder::new();
    for (rows, metric) in tables.tables() {
        b.add_table(rows, metric);
    }
    let dataset = b.finish(today);
    debug!("run_pipeline: registry: {:?}", dataset.registry);
    debug!("run_pipeline: summaries: {:?}", dataset.summaries);
    let ranking = ranking::rank_countries(&dataset.summaries, order.field, order.direction);
    (dataset, ranking)
}

/// Today's date, in UTC.
pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}
