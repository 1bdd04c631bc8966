#![deny(rust_2018_idioms)]

// This module contains the preparation of the curves to compare.
pub mod compare;

// This module contains thin wrappers around `matplotlib.pyplot`.
#[cfg(feature = "pyo3")]
pub mod plot;

// Re-exports.
pub use compare::{prepare, Curve};

#[cfg(feature = "pyo3")]
use color_eyre::Report;
#[cfg(feature = "pyo3")]
use plot::PyPlot;
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;
#[cfg(feature = "pyo3")]
use pyo3::types::PyDict;
#[cfg(feature = "pyo3")]
use std::path::Path;

/// Unwraps a `PyResult`; on error, prints the python traceback and bails.
#[macro_export]
macro_rules! pytry {
    ($py:expr, $e:expr) => {{
        match $e {
            Ok(v) => v,
            Err(e) => {
                e.print($py);
                ::color_eyre::eyre::bail!("python error");
            }
        }
    }};
}

/// Plots all curves on one chart, with a grid and a legend. The chart is
/// shown interactively unless `save` is set.
#[cfg(feature = "pyo3")]
pub fn compare_plot(
    curves: &[Curve],
    key: &str,
    save: Option<&Path>,
) -> Result<(), Report> {
    Python::with_gil(|py| -> Result<(), Report> {
        let plt = pytry!(py, PyPlot::new(py));
        let (fig, ax) = pytry!(py, plt.subplots(None));

        for curve in curves {
            let x: Vec<_> = (0..curve.values.len()).collect();
            let kwargs = pytry!(py, label_kwargs(py, &curve.label));
            pytry!(py, ax.plot(x, curve.values.clone(), Some(kwargs)));
        }
        pytry!(py, ax.set_ylabel(key));
        pytry!(py, ax.grid());
        pytry!(py, ax.legend(None));

        match save {
            Some(path) => {
                let path = path.display().to_string();
                pytry!(py, plt.savefig(&path, None));
                pytry!(py, plt.close(fig));
                tracing::info!("saved figure to {}", path);
            }
            None => pytry!(py, plt.show()),
        }
        Ok(())
    })
}

#[cfg(feature = "pyo3")]
fn label_kwargs<'p>(py: Python<'p>, label: &str) -> PyResult<&'p PyDict> {
    let kwargs = PyDict::new(py);
    kwargs.set_item("label", label)?;
    Ok(kwargs)
}
