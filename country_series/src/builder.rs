use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use log::{debug, info, warn};

use crate::config::*;
use crate::dates::{is_date_column, normalize_date};
use crate::summary::summarize_all;

/// An accumulator for the tables of one load.
///
/// A new builder is created for every load: the dataset it produces replaces the previous
/// one as a whole and is never updated afterwards.
///
/// ```
/// use country_series::builder::Builder;
/// use country_series::{Metric, Row};
/// # use chrono::NaiveDate;
///
/// let mut row = Row::new();
/// row.insert("Country/Region".to_string(), "Testland".to_string());
/// row.insert("3/1/20".to_string(), "5".to_string());
///
/// let mut builder = Builder::new();
/// builder.add_table(&[row], Metric::Confirmed);
/// let dataset = builder.finish(NaiveDate::from_ymd_opt(2020, 3, 2).unwrap());
///
/// assert_eq!(dataset.summary("Testland").unwrap().confirmed, 5);
/// ```
#[derive(Debug, Default)]
pub struct Builder {
    registry: Registry,
    skipped_rows: usize,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    /// Folds all the rows of a table into the series of the given metric.
    ///
    /// Rows without a country are skipped. Cells for the same country and date are added
    /// together, which rolls the provinces of a country into a single series. Cells that are
    /// not numbers count as 0.
    pub fn add_table(&mut self, rows: &[Row], metric: Metric) {
        // Header -> canonical date, or None for the columns that are not dates.
        let mut date_columns: HashMap<&str, Option<String>> = HashMap::new();
        let mut skipped = 0;
        for (idx, row) in rows.iter().enumerate() {
            // The name is kept as written: names that differ in case or spacing are different
            // countries.
            let country = match row.get(COUNTRY_COLUMN) {
                Some(c) if !c.trim().is_empty() => c,
                _ => {
                    debug!("add_table: {}: row {}: no country, skipping", metric.name(), idx);
                    skipped += 1;
                    continue;
                }
            };
            let series = self
                .registry
                .entry(country.clone())
                .or_default()
                .series_mut(metric);

            for (header, cell) in row.iter() {
                let date = date_columns
                    .entry(header.as_str())
                    .or_insert_with(|| date_column(header));
                if let Some(d) = date {
                    let v = series.entry(d.clone()).or_insert(0);
                    *v = v.saturating_add(parse_count(cell));
                }
            }
        }
        if skipped > 0 {
            warn!(
                "add_table: {}: skipped {} rows without a country",
                metric.name(),
                skipped
            );
        }
        self.skipped_rows += skipped;
        info!(
            "add_table: {}: {} rows, {} countries known",
            metric.name(),
            rows.len(),
            self.registry.len()
        );
    }

    /// The series accumulated so far.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The number of rows dropped because they did not name a country.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// Derives the active series and the summaries once all the tables have been added.
    pub fn finish(self, today: NaiveDate) -> Dataset {
        let mut registry = self.registry;
        align_dates(&mut registry);
        derive_active(&mut registry);
        let summaries = summarize_all(&registry, today);
        Dataset {
            registry,
            summaries,
        }
    }
}

fn date_column(header: &str) -> Option<String> {
    if !is_date_column(header) {
        return None;
    }
    match normalize_date(header) {
        Ok(d) => Some(d),
        Err(e) => {
            warn!("add_table: column {:?} is not used: {}", header, e);
            None
        }
    }
}

/// Reads the content of a cell as a count. Anything that is not a number is 0.
///
/// Numbers out of the range of `i64` are clamped to it.
pub fn parse_count(cell: &str) -> i64 {
    let t = cell.trim();
    if let Ok(x) = t.parse::<i64>() {
        return x;
    }
    match t.parse::<f64>() {
        Ok(x) if x.is_finite() => x.trunc() as i64,
        _ => {
            if !t.is_empty() {
                debug!("parse_count: cannot read {:?}, using 0", cell);
            }
            0
        }
    }
}

/// Gives the confirmed, recovered and deaths series of each country the same dates.
///
/// A date seen in any of the three tables for a country is added with a count of 0 to the
/// series that miss it.
pub fn align_dates(registry: &mut Registry) {
    for series in registry.values_mut() {
        let dates: BTreeSet<String> = [Metric::Confirmed, Metric::Recovered, Metric::Deaths]
            .iter()
            .flat_map(|m| series.series(*m).keys().cloned())
            .collect();
        for m in [Metric::Confirmed, Metric::Recovered, Metric::Deaths] {
            let s = series.series_mut(m);
            for d in dates.iter() {
                s.entry(d.clone()).or_insert(0);
            }
        }
    }
}

/// Computes the active series of every country: confirmed - recovered - deaths.
///
/// Only the dates of the confirmed series are used. A date missing from the recovered or
/// deaths series counts as 0 there.
pub fn derive_active(registry: &mut Registry) {
    for series in registry.values_mut() {
        let active: Series = series
            .confirmed
            .iter()
            .map(|(d, c)| {
                let r = series.recovered.get(d).copied().unwrap_or(0);
                let de = series.deaths.get(d).copied().unwrap_or(0);
                (d.clone(), c.saturating_sub(r).saturating_sub(de))
            })
            .collect();
        series.active = active;
    }
}
