use std::cmp::Ordering;

use log::debug;

use crate::config::*;

/// The value of a summary field, as compared by the ranking.
#[derive(Eq, PartialEq, Debug, Clone, PartialOrd, Ord)]
pub enum SortValue {
    Count(i64),
    /// A canonical date. Canonical dates compare in calendar order.
    Date(String),
}

impl CountrySummary {
    pub fn sort_value(&self, field: SortField) -> SortValue {
        match field {
            SortField::Confirmed => SortValue::Count(self.confirmed),
            SortField::Active => SortValue::Count(self.active),
            SortField::Recovered => SortValue::Count(self.recovered),
            SortField::Deaths => SortValue::Count(self.deaths),
            SortField::FirstContactDate => SortValue::Date(self.first_contact_date.clone()),
        }
    }
}

/// Compares two values of the same field.
///
/// Numbers come first-largest in `Desc` order. Dates are the other way around: `Desc` puts
/// the earliest first contact first. Undefined values are always last.
pub fn compare_values(
    v1: Option<&SortValue>,
    v2: Option<&SortValue>,
    field: SortField,
    direction: SortDirection,
) -> Ordering {
    match (v1, v2) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let largest_first = match field {
                SortField::FirstContactDate => direction == SortDirection::Asc,
                _ => direction == SortDirection::Desc,
            };
            if largest_first {
                b.cmp(a)
            } else {
                a.cmp(b)
            }
        }
    }
}

/// Orders country names by the given values.
///
/// Countries with equal values keep the order in which they are given.
pub fn rank_by<'a, I>(entries: I, field: SortField, direction: SortDirection) -> Vec<String>
where
    I: IntoIterator<Item = (&'a str, Option<SortValue>)>,
{
    let mut entries: Vec<(&'a str, Option<SortValue>)> = entries.into_iter().collect();
    // sort_by is stable.
    entries.sort_by(|(_, v1), (_, v2)| compare_values(v1.as_ref(), v2.as_ref(), field, direction));
    entries.into_iter().map(|(c, _)| c.to_string()).collect()
}

/// Orders all the countries of the store by one of their summary fields.
pub fn rank_countries(
    summaries: &SummaryStore,
    field: SortField,
    direction: SortDirection,
) -> Vec<String> {
    let res = rank_by(
        summaries
            .iter()
            .map(|(c, s)| (c.as_str(), Some(s.sort_value(field)))),
        field,
        direction,
    );
    debug!(
        "rank_countries: {} {}: {:?}",
        field.name(),
        direction.name(),
        res
    );
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn summary(date: &str, confirmed: i64, recovered: i64, deaths: i64) -> CountrySummary {
        CountrySummary {
            first_contact_date: date.to_string(),
            confirmed,
            recovered,
            deaths,
            active: confirmed - recovered - deaths,
        }
    }

    fn store(entries: &[(&str, CountrySummary)]) -> SummaryStore {
        entries
            .iter()
            .map(|(c, s)| (c.to_string(), s.clone()))
            .collect()
    }

    #[test]
    fn numeric_fields() {
        let st = store(&[
            ("B", summary("2020-01-01", 50, 0, 0)),
            ("A", summary("2020-01-01", 100, 0, 0)),
        ]);
        assert_eq!(
            rank_countries(&st, SortField::Confirmed, SortDirection::Desc),
            vec!["A", "B"]
        );
        assert_eq!(
            rank_countries(&st, SortField::Confirmed, SortDirection::Asc),
            vec!["B", "A"]
        );
    }

    #[test]
    fn first_contact_date_is_inverted() {
        let st = store(&[
            ("B", summary("2020-02-01", 1, 0, 0)),
            ("A", summary("2020-01-10", 1, 0, 0)),
        ]);
        // Earliest first in descending order.
        assert_eq!(
            rank_countries(&st, SortField::FirstContactDate, SortDirection::Desc),
            vec!["A", "B"]
        );
        assert_eq!(
            rank_countries(&st, SortField::FirstContactDate, SortDirection::Asc),
            vec!["B", "A"]
        );
    }

    #[test]
    fn every_field() {
        let st = store(&[
            ("X", summary("2020-01-05", 30, 20, 1)),
            ("Y", summary("2020-01-01", 20, 2, 5)),
            ("Z", summary("2020-03-01", 10, 0, 0)),
        ]);
        let desc = |f| rank_countries(&st, f, SortDirection::Desc);
        assert_eq!(desc(SortField::Confirmed), vec!["X", "Y", "Z"]);
        assert_eq!(desc(SortField::Active), vec!["Y", "Z", "X"]);
        assert_eq!(desc(SortField::Recovered), vec!["X", "Y", "Z"]);
        assert_eq!(desc(SortField::Deaths), vec!["Y", "X", "Z"]);
        assert_eq!(desc(SortField::FirstContactDate), vec!["Y", "X", "Z"]);
    }

    #[test]
    fn ties_keep_store_order() {
        let st = store(&[
            ("C", summary("2020-01-01", 5, 0, 0)),
            ("A", summary("2020-01-01", 5, 0, 0)),
            ("B", summary("2020-01-01", 9, 0, 0)),
            ("D", summary("2020-01-01", 5, 0, 0)),
        ]);
        assert_eq!(
            rank_countries(&st, SortField::Confirmed, SortDirection::Desc),
            vec!["B", "C", "A", "D"]
        );
        assert_eq!(
            rank_countries(&st, SortField::Confirmed, SortDirection::Asc),
            vec!["C", "A", "D", "B"]
        );
        assert_eq!(
            rank_countries(&st, SortField::FirstContactDate, SortDirection::Asc),
            vec!["C", "A", "B", "D"]
        );
    }

    #[test]
    fn undefined_values_are_last() {
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let res = rank_by(
                vec![
                    ("C", None),
                    ("A", Some(SortValue::Count(100))),
                    ("B", Some(SortValue::Count(50))),
                ],
                SortField::Confirmed,
                direction,
            );
            assert_eq!(res.last().unwrap(), "C");
            assert_eq!(res.len(), 3);
        }
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let res = rank_by(
                vec![
                    ("C", None),
                    ("A", Some(SortValue::Date("2020-01-10".to_string()))),
                ],
                SortField::FirstContactDate,
                direction,
            );
            assert_eq!(res, vec!["A", "C"]);
        }
    }

    #[test]
    fn ranking_is_a_permutation() {
        let st = store(&[
            ("A", summary("2020-01-05", 3, 1, 0)),
            ("B", summary("2020-01-02", 3, 1, 0)),
            ("C", summary("2020-01-09", 7, 0, 2)),
            ("D", summary("2020-02-01", 0, 0, 0)),
        ]);
        let keys: HashSet<&str> = st.keys().map(|k| k.as_str()).collect();
        for field in SortField::ALL {
            for direction in [SortDirection::Asc, SortDirection::Desc] {
                let res = rank_countries(&st, field, direction);
                assert_eq!(res.len(), st.len());
                let ranked: HashSet<&str> = res.iter().map(|k| k.as_str()).collect();
                assert_eq!(ranked, keys);
            }
        }
    }
}
