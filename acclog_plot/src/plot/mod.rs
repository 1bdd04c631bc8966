pub mod axes;

use axes::Axes;
use pyo3::prelude::*;
use pyo3::types::PyDict;

/// A `matplotlib.figure.Figure`; only needed to close it.
pub struct Figure<'a>(&'a PyAny);

pub struct PyPlot<'p> {
    plt: &'p PyModule,
}

impl<'p> PyPlot<'p> {
    pub fn new(py: Python<'p>) -> PyResult<Self> {
        let plt = PyModule::import(py, "matplotlib.pyplot")?;
        Ok(Self { plt })
    }

    pub fn subplots(
        &self,
        kwargs: Option<&PyDict>,
    ) -> PyResult<(Figure<'_>, Axes<'_>)> {
        let result = self.plt.call_method("subplots", (), kwargs)?;
        let (fig, ax): (&PyAny, &PyAny) = result.extract()?;
        Ok((Figure(fig), Axes::new(ax)))
    }

    pub fn savefig(&self, path: &str, kwargs: Option<&PyDict>) -> PyResult<()> {
        self.plt.call_method("savefig", (path,), kwargs)?;
        Ok(())
    }

    // Blocks until the window is closed.
    pub fn show(&self) -> PyResult<()> {
        self.plt.call_method0("show")?;
        Ok(())
    }

    pub fn close(&self, figure: Figure<'_>) -> PyResult<()> {
        self.plt.call_method1("close", (figure.0,))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_pdf_test() {
        let path = ".test.pdf";
        if let Err(e) = save_pdf(path) {
            panic!("error while saving pdf: {:?}", e);
        }

        // check that the file was indeed created
        assert!(std::path::Path::new(path).is_file());
        std::fs::remove_file(path).unwrap();
    }

    fn save_pdf(path: &str) -> PyResult<()> {
        Python::with_gil(|py| {
            let plt = PyPlot::new(py)?;
            let (fig, ax) = plt.subplots(None)?;

            let kwargs = PyDict::new(py);
            kwargs.set_item("label", "SERVER138-20200731-120845")?;
            ax.plot(vec![0, 1, 2], vec![0.5, 0.62, 0.7], Some(kwargs))?;
            ax.grid()?;
            ax.legend(None)?;

            let kwargs = PyDict::new(py);
            kwargs.set_item("format", "pdf")?;
            plt.savefig(path, Some(kwargs))?;
            plt.close(fig)?;
            Ok(())
        })
    }
}
