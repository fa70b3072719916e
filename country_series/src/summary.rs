use chrono::NaiveDate;
use log::debug;

use crate::config::*;
use crate::dates::canonical;

/// The value at the most recent date of a series, or 0 for an empty series.
fn latest_value(series: &Series) -> i64 {
    series
        .iter()
        .next_back()
        .map(|(_, v)| *v)
        .unwrap_or(0)
}

/// The first date with a positive count.
fn first_positive_date(series: &Series) -> Option<&String> {
    series.iter().find(|(_, v)| **v > 0).map(|(d, _)| d)
}

/// Computes the summary of a single country.
///
/// `today` is used as the first contact date of a country that never had a confirmed case.
pub fn summarize(series: &CountrySeries, today: NaiveDate) -> CountrySummary {
    let confirmed = latest_value(&series.confirmed);
    let recovered = latest_value(&series.recovered);
    let deaths = latest_value(&series.deaths);
    let first_contact_date = match first_positive_date(&series.confirmed) {
        Some(d) => d.clone(),
        // TODO: "no confirmed case" cannot be told apart from "first case today".
        None => canonical(today),
    };
    CountrySummary {
        first_contact_date,
        confirmed,
        recovered,
        deaths,
        // Not read from the active series: the four numbers must add up.
        active: confirmed.saturating_sub(recovered).saturating_sub(deaths),
    }
}

/// Computes the summaries of all the countries, in registry order.
pub fn summarize_all(registry: &Registry, today: NaiveDate) -> SummaryStore {
    let mut res = SummaryStore::with_capacity(registry.len());
    for (country, series) in registry.iter() {
        let s = summarize(series, today);
        debug!("summarize_all: {}: {:?}", country, s);
        res.insert(country.clone(), s);
    }
    res
}
