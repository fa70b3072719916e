// Reading the source tables from CSV files.

use std::path::Path;

use country_series::{Row, SourceTables};

use crate::charts::{io_common::simplify_file_name, *};

/// Reads a CSV file with a header line into rows.
///
/// Short lines are accepted: the missing trailing columns are simply absent from the row.
pub fn read_csv_table(path: &Path) -> ChartsResult<Vec<Row>> {
    let p = path.display().to_string();
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path: p.clone() })?;
    let headers: Vec<String> = rdr
        .headers()
        .context(CsvOpenSnafu { path: p.clone() })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    debug!("read_csv_table: {}: headers: {:?}", p, headers);

    let mut rows: Vec<Row> = Vec::new();
    for (idx, record_r) in rdr.records().enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let record = record_r.context(CsvLineParseSnafu {
            path: p.clone(),
            lineno,
        })?;
        let row: Row = headers
            .iter()
            .cloned()
            .zip(record.iter().map(|s| s.to_string()))
            .collect();
        rows.push(row);
    }
    info!(
        "read_csv_table: {}: {} rows, {} columns",
        simplify_file_name(path),
        rows.len(),
        headers.len()
    );
    Ok(rows)
}

/// Reads the three tables concurrently. The load only goes on once all of them are read.
pub fn read_sources(confirmed: &Path, recovered: &Path, deaths: &Path) -> ChartsResult<SourceTables> {
    let (confirmed, (recovered, deaths)) = rayon::join(
        || read_csv_table(confirmed),
        || rayon::join(|| read_csv_table(recovered), || read_csv_table(deaths)),
    );
    Ok(SourceTables {
        confirmed: confirmed?,
        recovered: recovered?,
        deaths: deaths?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::tests::data_dir;

    #[test]
    fn reads_rows_in_column_order() {
        let rows = read_csv_table(&data_dir().join("confirmed.csv")).unwrap();
        assert_eq!(rows.len(), 4);
        let headers: Vec<&String> = rows[0].keys().collect();
        assert_eq!(
            headers,
            vec!["Province/State", "Country/Region", "Lat", "Long", "3/1/20", "3/2/20", "3/3/20"]
        );
        assert_eq!(rows[0]["Country/Region"], "Testland");
        assert_eq!(rows[2]["Province/State"], "South");
        assert_eq!(rows[2]["3/3/20"], "3");
    }

    #[test]
    fn short_lines() {
        let rows = read_csv_table(&data_dir().join("short_lines.csv")).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 6);
        assert_eq!(rows[1].len(), 5);
        assert!(rows[1].get("3/2/20").is_none());
    }

    #[test]
    fn missing_file() {
        let res = read_csv_table(&data_dir().join("does_not_exist.csv"));
        assert!(matches!(res, Err(ChartsError::CsvOpen { .. })));
    }

    #[test]
    fn all_sources() {
        let t = read_sources(
            &data_dir().join("confirmed.csv"),
            &data_dir().join("recovered.csv"),
            &data_dir().join("deaths.csv"),
        )
        .unwrap();
        assert_eq!(t.confirmed.len(), 4);
        assert_eq!(t.recovered.len(), 3);
        assert_eq!(t.deaths.len(), 3);
    }
}
