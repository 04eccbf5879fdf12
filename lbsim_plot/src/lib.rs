// This module contains the geometry of the server metrics bar chart.
pub mod layout;

// This module contains thin wrappers around matplotlib.
#[cfg(feature = "pyo3")]
pub mod plot;

// Re-exports.
pub use layout::GroupedBars;

#[cfg(feature = "pyo3")]
use color_eyre::Report;
#[cfg(feature = "pyo3")]
use plot::figure::Figure;
#[cfg(feature = "pyo3")]
use plot::pyplot::PyPlot;
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

/// Where a rendered chart goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Open a window and block until it's closed.
    Show,
    /// Save to a file; the format is inferred from the file extension.
    Save(String),
}

impl Output {
    pub fn new(output_file: Option<&str>) -> Self {
        match output_file {
            Some(path) => Self::Save(path.to_string()),
            None => Self::Show,
        }
    }
}

/// Unwraps a `PyResult`. On error, the python traceback is printed and the
/// error is returned as a `Report`.
#[macro_export]
macro_rules! pytry {
    ($py:expr, $e:expr) => {{
        match $e {
            Ok(value) => value,
            Err(e) => {
                e.print($py);
                return Err(color_eyre::eyre::eyre!("python error: {:?}", e));
            }
        }
    }};
}

/// Creates a `PyDict` from a list of `(key, value)` pairs.
#[macro_export]
macro_rules! pydict {
    ($py:expr, $($entry:expr),* $(,)?) => {{
        let dict = pyo3::types::PyDict::new($py);
        #[allow(unused_mut)]
        let mut result: pyo3::PyResult<&pyo3::types::PyDict> = Ok(dict);
        $(
            let (key, value) = $entry;
            if let Err(e) = dict.set_item(key, value) {
                result = Err(e);
            }
        )*
        result
    }};
}

/// Draws `bars` with matplotlib and either shows or saves the chart.
#[cfg(feature = "pyo3")]
pub fn render(bars: &GroupedBars, output: &Output) -> Result<(), Report> {
    Python::with_gil(|py| {
        let plt = pytry!(py, PyPlot::new(py));
        let (fig, ax) = pytry!(py, plt.subplots(None));

        for series in bars.series.iter() {
            let kwargs = pytry!(
                py,
                pydict!(
                    py,
                    ("width", layout::BAR_WIDTH),
                    ("label", series.label),
                )
            );
            pytry!(
                py,
                ax.bar(series.x.clone(), series.heights.clone(), Some(kwargs))
            );
        }

        // set labels
        pytry!(py, ax.set_xlabel(bars.xlabel));
        pytry!(py, ax.set_ylabel(bars.ylabel));
        pytry!(py, ax.set_title(bars.title));

        // set xticks
        pytry!(py, ax.set_xticks(bars.xticks.clone()));
        pytry!(py, ax.set_xticklabels(bars.xtick_labels.clone()));

        pytry!(py, ax.legend(None));

        end_plot(output, py, &plt, fig)
    })
}

#[cfg(feature = "pyo3")]
fn end_plot(
    output: &Output,
    py: Python<'_>,
    plt: &PyPlot<'_>,
    fig: Figure<'_>,
) -> Result<(), Report> {
    match output {
        Output::Show => {
            tracing::info!("showing chart; close the window to exit");
            pytry!(py, plt.show());
        }
        Output::Save(path) => {
            pytry!(py, plt.savefig(path, None));
            tracing::info!("chart saved to {}", path);
        }
    }
    // close the figure
    pytry!(py, plt.close(fig));
    Ok(())
}
