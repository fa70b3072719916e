//! Chart-ready views of a dataset: one line chart per country.

use crate::config::*;

/// The lines drawn for each country, in drawing order.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ChartLine {
    Confirmed,
    Active,
    Recovered,
    Deaths,
}

impl ChartLine {
    pub const ALL: [ChartLine; 4] = [
        ChartLine::Confirmed,
        ChartLine::Active,
        ChartLine::Recovered,
        ChartLine::Deaths,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChartLine::Confirmed => "Confirmed",
            ChartLine::Active => "Active",
            ChartLine::Recovered => "Recovered",
            ChartLine::Deaths => "Deaths",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ChartLine::Confirmed => "rgb(99,255,255)",
            ChartLine::Active => "rgb(255,122,54)",
            ChartLine::Recovered => "rgb(113,192,56)",
            ChartLine::Deaths => "rgb(188,192,187)",
        }
    }

    fn series<'a>(&self, cs: &'a CountrySeries) -> &'a Series {
        match self {
            ChartLine::Confirmed => &cs.confirmed,
            ChartLine::Active => &cs.active,
            ChartLine::Recovered => &cs.recovered,
            ChartLine::Deaths => &cs.deaths,
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ChartDataset {
    pub label: &'static str,
    pub color: &'static str,
    /// One value per label of the chart.
    pub data: Vec<i64>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CountryChart {
    pub country: String,
    pub summary: Option<CountrySummary>,
    /// The dates of the confirmed series, oldest first.
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

/// Builds the chart of one country, or None if the country is not in the dataset.
pub fn chart_for(country: &str, dataset: &Dataset) -> Option<CountryChart> {
    let cs = dataset.series(country)?;
    let labels: Vec<String> = cs.confirmed.keys().cloned().collect();
    let datasets = ChartLine::ALL
        .iter()
        .map(|line| {
            let s = line.series(cs);
            ChartDataset {
                label: line.label(),
                color: line.color(),
                data: labels
                    .iter()
                    .map(|d| s.get(d).copied().unwrap_or(0))
                    .collect(),
            }
        })
        .collect();
    Some(CountryChart {
        country: country.to_string(),
        summary: dataset.summary(country).cloned(),
        labels,
        datasets,
    })
}

/// The charts of the ranked countries, in ranking order.
pub fn charts_in_order(dataset: &Dataset, ranking: &[String]) -> Vec<CountryChart> {
    ranking
        .iter()
        .filter_map(|c| chart_for(c, dataset))
        .collect()
}

/// A one-line text header for a country: active, confirmed, recovered, deaths, first contact.
///
/// Missing values are shown as '-'.
pub fn summary_line(country: &str, summary: Option<&CountrySummary>) -> String {
    match summary {
        Some(s) => format!(
            "{} {} {} {} {} (first contact: {})",
            country, s.active, s.confirmed, s.recovered, s.deaths, s.first_contact_date
        ),
        None => format!("{} - - - - (first contact: -)", country),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::summarize_all;
    use chrono::NaiveDate;

    fn dataset() -> Dataset {
        let mut cs = CountrySeries::default();
        for (d, c, r, de) in [("2020-03-01", 4, 0, 0), ("2020-03-02", 9, 1, 1)] {
            cs.confirmed.insert(d.to_string(), c);
            cs.recovered.insert(d.to_string(), r);
            cs.deaths.insert(d.to_string(), de);
            cs.active.insert(d.to_string(), c - r - de);
        }
        let mut registry = Registry::new();
        registry.insert("Testland".to_string(), cs);
        let summaries = summarize_all(&registry, NaiveDate::from_ymd_opt(2020, 3, 3).unwrap());
        Dataset {
            registry,
            summaries,
        }
    }

    #[test]
    fn aligned_datasets() {
        let ds = dataset();
        let chart = chart_for("Testland", &ds).unwrap();
        assert_eq!(chart.labels, vec!["2020-03-01", "2020-03-02"]);
        let labels: Vec<&str> = chart.datasets.iter().map(|d| d.label).collect();
        assert_eq!(labels, vec!["Confirmed", "Active", "Recovered", "Deaths"]);
        for d in chart.datasets.iter() {
            assert_eq!(d.data.len(), chart.labels.len());
        }
        assert_eq!(chart.datasets[0].data, vec![4, 9]);
        assert_eq!(chart.datasets[1].data, vec![4, 7]);
        assert_eq!(chart.datasets[2].data, vec![0, 1]);
        assert_eq!(chart.datasets[3].data, vec![0, 1]);
        assert_eq!(chart.summary.unwrap().active, 7);
    }

    #[test]
    fn unknown_country() {
        assert!(chart_for("Nowhere", &dataset()).is_none());
        let charts = charts_in_order(&dataset(), &["Nowhere".to_string(), "Testland".to_string()]);
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].country, "Testland");
    }

    #[test]
    fn summary_lines() {
        let ds = dataset();
        assert_eq!(
            summary_line("Testland", ds.summary("Testland")),
            "Testland 7 9 1 1 (first contact: 2020-03-01)"
        );
        assert_eq!(
            summary_line("Nowhere", None),
            "Nowhere - - - - (first contact: -)"
        );
    }
}
