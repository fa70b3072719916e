//! Reading the date columns of the source tables.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::config::{StatsErrors, METADATA_COLUMNS};

// Only a filter: the matching headers still go through normalize_date.
static DATE_COLUMN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9/]{6,}").expect("static date column pattern"));

/// True if the header of a column looks like an observation date.
pub fn is_date_column(header: &str) -> bool {
    !METADATA_COLUMNS.contains(&header) && DATE_COLUMN.is_match(header)
}

/// Converts a month-first date token ("3/14/20") to the canonical "2020-03-14".
///
/// Two-digit years are read in the 2000s. Four-digit years are also accepted since some
/// revisions of the tables spell them out.
pub fn normalize_date(token: &str) -> Result<String, StatsErrors> {
    let t = token.trim();
    let date = NaiveDate::parse_from_str(t, "%m/%d/%y")
        .or_else(|_| NaiveDate::parse_from_str(t, "%m/%d/%Y"))
        .map_err(|_| StatsErrors::InvalidDate(token.to_string()))?;
    Ok(date.format("%Y-%m-%d").to_string())
}

/// The canonical form of a date that did not come from a table.
pub fn canonical(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_tokens() {
        assert_eq!(normalize_date("3/1/20"), Ok("2020-03-01".to_string()));
        assert_eq!(normalize_date("1/22/20"), Ok("2020-01-22".to_string()));
        assert_eq!(normalize_date("12/31/21"), Ok("2021-12-31".to_string()));
        assert_eq!(normalize_date("03/09/20"), Ok("2020-03-09".to_string()));
    }

    #[test]
    fn long_years() {
        assert_eq!(normalize_date("3/14/2020"), Ok("2020-03-14".to_string()));
    }

    #[test]
    fn not_a_date() {
        assert!(normalize_date("14/3/20").is_err());
        assert!(normalize_date("123456").is_err());
        assert!(normalize_date("").is_err());
    }

    #[test]
    fn date_columns() {
        assert!(is_date_column("1/22/20"));
        assert!(is_date_column("12/31/20"));
        assert!(!is_date_column("Country/Region"));
        assert!(!is_date_column("Province/State"));
        assert!(!is_date_column("Lat"));
        assert!(!is_date_column("Long"));
        // Too short to be a date.
        assert!(!is_date_column("1/2/3"));
    }

    #[test]
    fn canonical_dates() {
        let d = NaiveDate::from_ymd_opt(2020, 2, 7).unwrap();
        assert_eq!(canonical(d), "2020-02-07");
    }
}
