//! Bounded derivative-free optimization
//!
//! The distribution fitter maximizes a log-likelihood over a box of
//! parameters with [`maximize_nelder_mead`].
//!
//! ```ignore
//! use assetsim_core::optimization::{maximize_nelder_mead, NelderMeadConfig, SearchSpace};
//!
//! let space = SearchSpace {
//!     start: vec![0.0, 0.0],
//!     step: vec![0.5, 0.5],
//!     bounds: vec![(-10.0, 10.0), (-10.0, 10.0)],
//! };
//! let result = maximize_nelder_mead(|x| -(x[0] - 1.0).powi(2) - x[1].powi(2), &space,
//!     &NelderMeadConfig::default(), None)?;
//! ```

mod config;
mod nelder_mead;
mod result;

pub use config::{NelderMeadConfig, SearchSpace};
pub use nelder_mead::{ProgressCallback, maximize_nelder_mead};
pub use result::{ConvergenceHistory, OptimizationResult, TerminationReason};
