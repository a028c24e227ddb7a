//! Python bindings for the simulation engine via PyO3
//!
//! Exposes `Simulation` to notebooks that sweep parameters and persist runs.

use crate::application::simulation::{Simulation, SimulationMetrics, StepReport};
use crate::error::SimulationError;
use bubbles_core::MarketConfig;
use pyo3::exceptions::{PyIndexError, PyValueError};
use pyo3::prelude::*;

impl From<SimulationError> for PyErr {
    fn from(err: SimulationError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// Python wrapper for one step's outcome
#[pyclass(name = "StepReport")]
#[derive(Clone)]
pub struct PyStepReport {
    #[pyo3(get)]
    pub step: u64,
    #[pyo3(get)]
    pub old_price: f64,
    #[pyo3(get)]
    pub new_price: f64,
    #[pyo3(get)]
    pub q_plus: f64,
    #[pyo3(get)]
    pub q_moins: f64,
    #[pyo3(get)]
    pub phi_plus: f64,
    #[pyo3(get)]
    pub phi_moins: f64,
    #[pyo3(get)]
    pub r_barre: f64,
    #[pyo3(get)]
    pub pf: f64,
}

#[pymethods]
impl PyStepReport {
    fn __repr__(&self) -> String {
        format!(
            "StepReport(step={}, price={:.6}, phi_plus={:.4}, phi_moins={:.4})",
            self.step, self.new_price, self.phi_plus, self.phi_moins
        )
    }
}

impl From<StepReport> for PyStepReport {
    fn from(report: StepReport) -> Self {
        PyStepReport {
            step: report.step,
            old_price: report.old_price,
            new_price: report.new_price,
            q_plus: report.q_plus,
            q_moins: report.q_moins,
            phi_plus: report.buy_fill,
            phi_moins: report.sell_fill,
            r_barre: report.average_return,
            pf: report.fundamentalist_probability,
        }
    }
}

/// Python wrapper for run metrics
#[pyclass(name = "SimulationMetrics")]
#[derive(Clone)]
pub struct PySimulationMetrics {
    #[pyo3(get)]
    pub total_steps: u64,
    #[pyo3(get)]
    pub avg_price: f64,
    #[pyo3(get)]
    pub min_price: f64,
    #[pyo3(get)]
    pub max_price: f64,
    #[pyo3(get)]
    pub return_volatility: f64,
    #[pyo3(get)]
    pub mean_wealth: f64,
    #[pyo3(get)]
    pub degenerated: bool,
}

#[pymethods]
impl PySimulationMetrics {
    fn __repr__(&self) -> String {
        format!(
            "SimulationMetrics(steps={}, avg_price={:.4}, vol={:.6}, degenerated={})",
            self.total_steps, self.avg_price, self.return_volatility, self.degenerated
        )
    }
}

impl From<SimulationMetrics> for PySimulationMetrics {
    fn from(metrics: SimulationMetrics) -> Self {
        PySimulationMetrics {
            total_steps: metrics.total_steps,
            avg_price: metrics.avg_price,
            min_price: metrics.min_price,
            max_price: metrics.max_price,
            return_volatility: metrics.return_volatility,
            mean_wealth: metrics.final_mean_wealth,
            degenerated: metrics.degenerated,
        }
    }
}

/// Python wrapper for the market simulation
#[pyclass(name = "Simulation")]
pub struct PySimulation {
    inner: Simulation,
}

#[pymethods]
impl PySimulation {
    /// Build a market from the six experiment parameters
    #[new]
    #[allow(non_snake_case)]
    #[pyo3(signature = (P=0.0, g_sur_l=0.1, alpha=0.9999, rho=0.02, phi=3003.0, pi=0.0, seed=None))]
    fn new(
        P: f64,
        g_sur_l: f64,
        alpha: f64,
        rho: f64,
        phi: f64,
        pi: f64,
        seed: Option<u64>,
    ) -> PyResult<Self> {
        let config = MarketConfig {
            polarization: P,
            g_sur_l,
            alpha,
            rho,
            phi,
            pi,
            seed,
            ..Default::default()
        };
        Ok(PySimulation {
            inner: Simulation::new(config)?,
        })
    }

    /// Advance one step
    fn step(&mut self) -> PyResult<PyStepReport> {
        Ok(self.inner.step()?.into())
    }

    /// Advance `steps` steps and return the accumulated metrics
    fn run(&mut self, steps: u64) -> PyResult<PySimulationMetrics> {
        Ok(self.inner.run(steps)?.into())
    }

    fn reset(&mut self) -> PyResult<()> {
        Ok(self.inner.reset()?)
    }

    /// Full price history, seed window included
    #[getter]
    fn prices(&self) -> Vec<f64> {
        self.inner.prices().to_vec()
    }

    /// `(theta, B)` for agent `i`
    fn holdings(&self, i: usize) -> PyResult<(f64, f64)> {
        self.inner
            .holdings(i)
            .map(|h| (h.risky, h.cash))
            .ok_or_else(|| PyIndexError::new_err(format!("no agent {}", i)))
    }

    /// Scores of agent `i`, no-trade slot last
    fn scores(&self, i: usize) -> PyResult<Vec<f64>> {
        self.inner
            .scores(i)
            .map(<[f64]>::to_vec)
            .ok_or_else(|| PyIndexError::new_err(format!("no agent {}", i)))
    }

    #[getter]
    fn step_count(&self) -> u64 {
        self.inner.step_count()
    }

    #[getter]
    fn is_degenerate(&self) -> bool {
        self.inner.is_degenerate()
    }

    #[getter]
    fn lambda(&self) -> f64 {
        self.inner.lambda()
    }

    fn __repr__(&self) -> String {
        let config = self.inner.config();
        format!(
            "Simulation(P={}, g_sur_l={}, alpha={}, rho={}, phi={}, pi={}, steps={})",
            config.polarization,
            config.g_sur_l,
            config.alpha,
            config.rho,
            config.phi,
            config.pi,
            self.inner.step_count()
        )
    }
}

/// Bubbles Python module, imported as `import bubbles_engine`.
///
/// The init symbol must match the cdylib file name, so the module carries
/// the lib name ([`crate::PYTHON_MODULE`]).
#[pymodule]
#[pyo3(name = "bubbles_engine")]
fn bubbles_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyStepReport>()?;
    m.add_class::<PySimulationMetrics>()?;
    m.add_class::<PySimulation>()?;
    Ok(())
}
