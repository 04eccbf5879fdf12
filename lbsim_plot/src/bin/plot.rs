use clap::{App, Arg};
use color_eyre::eyre::WrapErr;
use color_eyre::Report;
use lbsim::ResultSet;
use lbsim_plot::{GroupedBars, Output};

// file with the output of the simulation
const DEFAULT_RESULTS: &str = "plot_test.txt";

fn main() -> Result<(), Report> {
    // init logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let (results_file, output_file) = parse_args();

    let results = ResultSet::load(&results_file).wrap_err("load results")?;
    tracing::info!(
        "loaded metrics of {} servers from {}",
        results.len(),
        results_file
    );

    let bars = GroupedBars::from_results(&results);
    let output = Output::new(output_file.as_deref());
    lbsim_plot::render(&bars, &output).wrap_err("render chart")
}

fn parse_args() -> (String, Option<String>) {
    let matches = App::new("plot")
        .version("0.1")
        .author("Vitor Enes <vitorenesduarte@gmail.com>")
        .about("Plots per-server average delay, waiting time and queue length.")
        .arg(
            Arg::with_name("results")
                .long("results")
                .value_name("RESULTS")
                .help("file with one line of metrics per server; default: plot_test.txt")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("output")
                .long("output")
                .value_name("OUTPUT")
                .help("if set, the chart is saved to this file instead of being shown")
                .takes_value(true),
        )
        .get_matches();

    let results_file = matches
        .value_of("results")
        .unwrap_or(DEFAULT_RESULTS)
        .to_string();
    let output_file = matches.value_of("output").map(String::from);
    (results_file, output_file)
}
