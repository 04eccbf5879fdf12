use clap::{App, Arg};
use color_eyre::eyre::{bail, WrapErr};
use color_eyre::Report;
use lbsim::sim::Runner;
use lbsim::Config;
use std::time::Duration;

const DEFAULT_SERVERS: usize = 10;
const DEFAULT_SERVICE_TIME: f64 = 42.0;
const DEFAULT_INTER_ARRIVAL: f64 = 1.0;
const DEFAULT_DURATION: f64 = 5.0;
const DEFAULT_SEED: u64 = 0;
const DEFAULT_OUTPUT: &str = "plot_test.txt";

// one year, in seconds
const MAX_SERVICE_TIME: f64 = 31_536_000.0;

fn main() -> Result<(), Report> {
    // init logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let (config, output) = parse_args()?;
    tracing::info!("{:?}", config);

    let results = Runner::new(config).run();
    results
        .save(&output)
        .wrap_err("save simulation results")?;
    tracing::info!("results of {} servers saved to {}", results.len(), output);
    Ok(())
}

fn parse_args() -> Result<(Config, String), Report> {
    let matches = App::new("simulate")
        .version("0.1")
        .author("Vitor Enes <vitorenesduarte@gmail.com>")
        .about("Simulates a load balancer and saves per-server metrics.")
        .arg(
            Arg::with_name("servers")
                .long("servers")
                .value_name("SERVERS")
                .help("number of servers; default: 10")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("service_time")
                .long("service_time")
                .value_name("SERVICE_TIME")
                .help("mean task service time in seconds; default: 42")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("inter_arrival")
                .long("inter_arrival")
                .value_name("INTER_ARRIVAL")
                .help("seconds between generated tasks; default: 1")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("duration")
                .long("duration")
                .value_name("DURATION")
                .help("for how many seconds tasks are generated; default: 5")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .value_name("SEED")
                .help("seed of the task generator; default: 0")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("output")
                .long("output")
                .value_name("OUTPUT")
                .help("file where the results are saved; default: plot_test.txt")
                .takes_value(true),
        )
        .get_matches();

    let servers =
        parse_value(matches.value_of("servers"), DEFAULT_SERVERS, "servers")?;
    let service_time = parse_service_time(matches.value_of("service_time"))?;
    let inter_arrival = parse_secs(
        matches.value_of("inter_arrival"),
        DEFAULT_INTER_ARRIVAL,
        "inter-arrival time",
    )?;
    let duration =
        parse_secs(matches.value_of("duration"), DEFAULT_DURATION, "duration")?;
    let seed = parse_value(matches.value_of("seed"), DEFAULT_SEED, "seed")?;
    let output = matches
        .value_of("output")
        .unwrap_or(DEFAULT_OUTPUT)
        .to_string();

    if inter_arrival.as_millis() == 0 {
        bail!("inter-arrival time must be at least one millisecond");
    }

    let mut config = Config::new(servers, service_time);
    config.set_inter_arrival(inter_arrival);
    config.set_duration(duration);
    config.set_seed(seed);
    Ok((config, output))
}

fn parse_value<T>(
    value: Option<&str>,
    default: T,
    what: &str,
) -> Result<T, Report>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(value) => value
            .parse()
            .wrap_err_with(|| format!("error parsing {}: {:?}", what, value)),
        None => Ok(default),
    }
}

fn parse_secs(
    value: Option<&str>,
    default: f64,
    what: &str,
) -> Result<Duration, Report> {
    let secs = parse_value(value, default, what)?;
    Duration::try_from_secs_f64(secs).wrap_err_with(|| {
        format!("{} must be a non-negative number of seconds: {}", what, secs)
    })
}

fn parse_service_time(value: Option<&str>) -> Result<f64, Report> {
    let secs = parse_value(value, DEFAULT_SERVICE_TIME, "service time")?;
    if !secs.is_finite() || secs <= 0.0 {
        bail!("service time must be positive: {}", secs);
    }
    if secs > MAX_SERVICE_TIME {
        bail!(
            "service time must be at most {} seconds: {}",
            MAX_SERVICE_TIME,
            secs
        );
    }
    Ok(secs)
}
