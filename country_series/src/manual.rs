/*!

This is the long-form manual for `country_series` and `covcharts`.

## Input tables

Three tables are read, one per metric: confirmed cases, recoveries and deaths. They all
follow the layout of the time series published by the CSSE at Johns Hopkins University:

| Province/State | Country/Region | Lat     | Long     | 1/22/20 | 1/23/20 | ... |
|----------------|----------------|---------|----------|---------|---------|-----|
| Hubei          | China          | 30.9756 | 112.2707 | 444     | 444     |     |
|                | Thailand       | 15.0    | 101.0    | 2       | 3       |     |

- the `Country/Region` column names the country. Rows without a country are skipped.
- every column with a `M/D/YY` header is an observation date. The date columns are
  expected from the oldest to the most recent, but the order does not matter: all the
  series are kept sorted by date.
- the rows of the same country (its provinces and states) are added together.
- a cell that is empty or is not a number counts as 0.

## Output

For each country:
- the four series (confirmed, recovered, deaths, and active = confirmed - recovered - deaths)
  keyed by `YYYY-MM-DD` dates, with the same dates for all of them
- a summary: the latest value of each series, and the first contact date, which is the first
  date with a positive number of confirmed cases. A country that never had a confirmed case
  gets the date of the day the data was processed.

## Ordering

The countries are ordered by one of the summary fields: `confirmed`, `active`, `recovered`,
`deaths` or `firstContactDate`, in the `desc` or `asc` direction.

The numeric fields put the largest values first in the `desc` direction. `firstContactDate`
is reversed: `desc` puts the earliest first contact (the country hit first) at the top, `asc`
puts the most recent one at the top. Countries with equal values stay in the order in which
they appear in the confirmed table.

## Command line

```bash
covcharts --confirmed time_series_19-covid-Confirmed.csv \
  --recovered time_series_19-covid-Recovered.csv \
  --deaths time_series_19-covid-Deaths.csv \
  --order-by firstContactDate --order-dir desc --out charts.json
```

The same settings can be stored in a JSON configuration file passed with `--config`:

```json
{
  "sources": {
    "confirmed": "time_series_19-covid-Confirmed.csv",
    "recovered": "time_series_19-covid-Recovered.csv",
    "deaths": "time_series_19-covid-Deaths.csv"
  },
  "outputSettings": { "title": "COVID-19 by country", "outputPath": "charts.json" },
  "orderBy": "confirmed",
  "orderDir": "desc"
}
```

Relative paths are read from the directory of the configuration file. Flags given on the command
line take precedence over the configuration file.

*/
