use super::parse::{
    AVG_DELAY_LABEL, AVG_QUEUE_LENGTH_LABEL, AVG_WAITING_LABEL, FIELD_SEP,
    LABEL_SEP, SERVER_LABEL,
};
use super::{ResultSet, ServerMetricRecord};
use color_eyre::eyre::WrapErr;
use color_eyre::Report;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Formats a record as a results file line (without the line terminator).
/// Floats are printed with the shortest representation that parses back to
/// the same value.
pub fn format_line(record: &ServerMetricRecord) -> String {
    let fields = [
        format!("{}{}{}", SERVER_LABEL, LABEL_SEP, record.server_id),
        format!("{}{}{}", AVG_DELAY_LABEL, LABEL_SEP, record.avg_delay),
        format!("{}{}{}", AVG_WAITING_LABEL, LABEL_SEP, record.avg_waiting),
        format!(
            "{}{}{}",
            AVG_QUEUE_LENGTH_LABEL, LABEL_SEP, record.avg_queue_length
        ),
    ];
    fields.join(FIELD_SEP)
}

impl ResultSet {
    /// Writes all records, one per line, in iteration order.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), Report> {
        for record in self.iter() {
            writeln!(writer, "{}", format_line(record))?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Saves the result set to the file at `path`, replacing it if it exists.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Report> {
        let path = path.as_ref();
        let file = File::create(path).wrap_err_with(|| {
            format!("error creating results file {}", path.display())
        })?;
        self.write_to(BufWriter::new(file)).wrap_err_with(|| {
            format!("error writing results file {}", path.display())
        })
    }
}
