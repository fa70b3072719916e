use clap::Parser;

/// This program turns the COVID-19 time series tables into per-country charts.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the sources and the ordering of the charts.
    /// For more information about the file format, read the manual of the country_series crate.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The table of confirmed cases. Overrides the source in the configuration file.
    #[clap(long, value_parser)]
    pub confirmed: Option<String>,

    /// (file path) The table of recoveries. Overrides the source in the configuration file.
    #[clap(long, value_parser)]
    pub recovered: Option<String>,

    /// (file path) The table of deaths. Overrides the source in the configuration file.
    #[clap(long, value_parser)]
    pub deaths: Option<String>,

    /// (default confirmed) The summary field used to order the countries: confirmed, active,
    /// recovered, deaths or firstContactDate.
    #[clap(long, value_parser)]
    pub order_by: Option<String>,

    /// (default desc) asc or desc. For firstContactDate, desc puts the earliest dates first.
    #[clap(long, value_parser)]
    pub order_dir: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the charts will be written in JSON format to the given
    /// location. Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the expected charts in JSON format. If provided,
    /// covcharts will check that the computed output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
