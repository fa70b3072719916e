// ********* Input data structures ***********

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;

use indexmap::IndexMap;

/// The column holding the name of the country in the source tables.
pub const COUNTRY_COLUMN: &str = "Country/Region";

/// Columns that describe a row and never carry an observation.
pub const METADATA_COLUMNS: [&str; 4] = ["Province/State", "Country/Region", "Lat", "Long"];

/// One parsed row of a source table.
///
/// Maps the name of each column to its raw content, in the left-to-right order of the
/// columns in the source file.
pub type Row = IndexMap<String, String>;

/// The three tables published upstream, already parsed into rows.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct SourceTables {
    pub confirmed: Vec<Row>,
    pub recovered: Vec<Row>,
    pub deaths: Vec<Row>,
}

impl SourceTables {
    /// The tables paired with the metric they carry, in load order.
    pub fn tables(&self) -> [(&[Row], Metric); 3] {
        [
            (self.confirmed.as_slice(), Metric::Confirmed),
            (self.recovered.as_slice(), Metric::Recovered),
            (self.deaths.as_slice(), Metric::Deaths),
        ]
    }
}

/// A metric that is read from a source table.
///
/// The number of active cases is derived from the three of them and is not a source.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Metric {
    Confirmed,
    Recovered,
    Deaths,
}

impl Metric {
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Confirmed => "confirmed",
            Metric::Recovered => "recovered",
            Metric::Deaths => "deaths",
        }
    }
}

// ******** Output data structures *********

/// A series of counts for one country and one metric, keyed by canonical date (YYYY-MM-DD).
///
/// Canonical dates sort lexicographically in chronological order, so iterating a series
/// always goes from the oldest to the most recent date.
pub type Series = BTreeMap<String, i64>;

/// All the series known for one country.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct CountrySeries {
    pub confirmed: Series,
    pub recovered: Series,
    pub deaths: Series,
    /// confirmed - recovered - deaths, for every date of the confirmed series.
    pub active: Series,
}

impl CountrySeries {
    pub fn series(&self, metric: Metric) -> &Series {
        match metric {
            Metric::Confirmed => &self.confirmed,
            Metric::Recovered => &self.recovered,
            Metric::Deaths => &self.deaths,
        }
    }

    pub fn series_mut(&mut self, metric: Metric) -> &mut Series {
        match metric {
            Metric::Confirmed => &mut self.confirmed,
            Metric::Recovered => &mut self.recovered,
            Metric::Deaths => &mut self.deaths,
        }
    }
}

/// The latest known snapshot for one country.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CountrySummary {
    /// The first date with a positive number of confirmed cases.
    pub first_contact_date: String,
    pub confirmed: i64,
    pub recovered: i64,
    pub deaths: i64,
    pub active: i64,
}

/// Country name -> series, in the order in which the countries were first seen.
pub type Registry = IndexMap<String, CountrySeries>;

/// Country name -> summary, in the same order as the registry.
pub type SummaryStore = IndexMap<String, CountrySummary>;

/// Everything produced by one load.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Dataset {
    pub registry: Registry,
    pub summaries: SummaryStore,
}

impl Dataset {
    pub fn countries(&self) -> impl Iterator<Item = &String> {
        self.registry.keys()
    }

    pub fn series(&self, country: &str) -> Option<&CountrySeries> {
        self.registry.get(country)
    }

    pub fn summary(&self, country: &str) -> Option<&CountrySummary> {
        self.summaries.get(country)
    }
}

/// Errors that prevent an operation from completing.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum StatsErrors {
    InvalidSortField(String),
    InvalidSortDirection(String),
    InvalidDate(String),
    /// A load is already running. Loads and re-sorts do not overlap.
    LoadInProgress,
    /// A load was completed or failed without having been started.
    NoLoadInProgress,
    LoadFailed(String),
}

impl Error for StatsErrors {}

impl Display for StatsErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsErrors::InvalidSortField(s) => write!(
                f,
                "unknown sort field {:?} (expected one of confirmed, active, recovered, deaths, firstContactDate)",
                s
            ),
            StatsErrors::InvalidSortDirection(s) => {
                write!(f, "unknown sort direction {:?} (expected asc or desc)", s)
            }
            StatsErrors::InvalidDate(s) => write!(f, "cannot read {:?} as a M/D/YY date", s),
            StatsErrors::LoadInProgress => write!(f, "a load is already in progress"),
            StatsErrors::NoLoadInProgress => write!(f, "no load is in progress"),
            StatsErrors::LoadFailed(reason) => write!(f, "load failed: {}", reason),
        }
    }
}

// ********* Configuration **********

/// The summary field used to order the countries.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum SortField {
    Confirmed,
    Active,
    Recovered,
    Deaths,
    FirstContactDate,
}

impl SortField {
    pub const ALL: [SortField; 5] = [
        SortField::Confirmed,
        SortField::Active,
        SortField::Recovered,
        SortField::Deaths,
        SortField::FirstContactDate,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SortField::Confirmed => "confirmed",
            SortField::Active => "active",
            SortField::Recovered => "recovered",
            SortField::Deaths => "deaths",
            SortField::FirstContactDate => "firstContactDate",
        }
    }
}

impl FromStr for SortField {
    type Err = StatsErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortField::ALL
            .iter()
            .find(|f| f.name() == s)
            .copied()
            .ok_or_else(|| StatsErrors::InvalidSortField(s.to_string()))
    }
}

impl Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn name(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = StatsErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            x => Err(StatsErrors::InvalidSortDirection(x.to_string())),
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortOrder {
    pub const DEFAULT_ORDER: SortOrder = SortOrder {
        field: SortField::Confirmed,
        direction: SortDirection::Desc,
    };

    pub fn new(field: SortField, direction: SortDirection) -> SortOrder {
        SortOrder { field, direction }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::DEFAULT_ORDER
    }
}
