use super::{ResultSet, ServerMetricRecord};
use color_eyre::eyre::{bail, eyre, WrapErr};
use color_eyre::Report;
use std::fmt::Debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

pub(super) const FIELD_SEP: &str = ", ";
pub(super) const LABEL_SEP: &str = ": ";

pub(super) const SERVER_LABEL: &str = "Server";
pub(super) const AVG_DELAY_LABEL: &str = "Avg Delay";
pub(super) const AVG_WAITING_LABEL: &str = "Avg Waiting";
pub(super) const AVG_QUEUE_LENGTH_LABEL: &str = "Avg Queue Length";

const FIELD_COUNT: usize = 4;

/// Parses a single line of a results file. Lines look like:
/// - "Server: 1, Avg Delay: 0.84, Avg Waiting: 0, Avg Queue Length: 0"
pub fn parse_line(line: &str) -> Result<ServerMetricRecord, Report> {
    let fields: Vec<_> = line.split(FIELD_SEP).collect();
    if fields.len() != FIELD_COUNT {
        bail!(
            "expected {} fields separated by {:?}, found {}",
            FIELD_COUNT,
            FIELD_SEP,
            fields.len()
        );
    }

    let server_id = parse_field(fields[0], SERVER_LABEL)?;
    let avg_delay = parse_field(fields[1], AVG_DELAY_LABEL)?;
    let avg_waiting = parse_field(fields[2], AVG_WAITING_LABEL)?;
    let avg_queue_length = parse_field(fields[3], AVG_QUEUE_LENGTH_LABEL)?;
    Ok(ServerMetricRecord::new(
        server_id,
        avg_delay,
        avg_waiting,
        avg_queue_length,
    ))
}

// Parses a field of the form "<label>: <value>".
fn parse_field<T>(field: &str, label: &str) -> Result<T, Report>
where
    T: FromStr,
    T::Err: Debug,
{
    let parts: Vec<_> = field.split(LABEL_SEP).collect();
    if parts.len() != 2 {
        bail!("field {:?} is not of the form '{}: <value>'", field, label);
    }
    if parts[0] != label {
        bail!("expected label {:?}, found {:?}", label, parts[0]);
    }
    let value = parts[1].trim();
    value
        .parse()
        .map_err(|e| eyre!("invalid {} value {:?}: {:?}", label, value, e))
}

impl ResultSet {
    /// Loads a result set from the file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Report> {
        let path = path.as_ref();
        let file = File::open(path).wrap_err_with(|| {
            format!("error opening results file {}", path.display())
        })?;
        Self::from_reader(BufReader::new(file)).wrap_err_with(|| {
            format!("error loading results file {}", path.display())
        })
    }

    /// Reads a result set, one record per line. Any malformed line fails the
    /// whole read.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, Report> {
        let mut results = Self::new();
        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line.wrap_err_with(|| {
                format!("error reading line {}", line_number)
            })?;
            let record = parse_line(&line)
                .wrap_err_with(|| format!("malformed line {}", line_number))?;
            results.insert(record);
        }
        Ok(results)
    }
}
