//! # survival metrics
//!
//! the statistical core of deep survival modeling - the loss and the metric,
//! nothing else
//!
//! ## what you get
//!
//! - negative log partial likelihood for right-censored cohorts (the
//!   DeepSurv training objective), O(N) via a streaming cumulative
//!   log-sum-exp
//! - its analytic gradient w.r.t. per-patient risk scores, so any external
//!   optimizer can train through it without autodiff
//! - Harrell's concordance index with explicit tie policies
//! - a small cohort container that handles validation, train/test splits,
//!   standardization, and the descending-time sort the loss requires
//!
//! model architectures, training loops, and dataset loaders live elsewhere;
//! this crate is the piece they all call into.
//!
//! ## quick start
//!
//! ```rust
//! use surv_metrics::{SurvivalData, negative_log_likelihood, concordance_index};
//! use ndarray::{Array1, Array2};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // four patients: survival time, event flag, two features each
//! let times = vec![4.1, 1.0, 3.2, 2.5];
//! let events = vec![true, true, false, true]; // true = died, false = censored
//! let covariates = Array2::from_shape_vec((4, 2), vec![
//!     1.0, 0.5,
//!     2.0, 1.0,
//!     1.5, 0.0,
//!     3.0, 1.5,
//! ])?;
//! let data = SurvivalData::new(times, events, covariates)?;
//!
//! // the loss needs the cohort sorted by descending time
//! let (sorted, _order) = data.sorted_by_time_desc()?;
//!
//! // risk scores would come from a model; any aligned sequence works
//! let risk = Array1::from(vec![-0.4, 0.1, 0.9, 1.3]);
//! let loss = negative_log_likelihood(risk.view(), sorted.events())?;
//! assert!(loss.is_finite());
//!
//! // concordance on the same ordering
//! let c = concordance_index(sorted.times(), risk.view(), sorted.events())?;
//! assert!((0.0..=1.0).contains(&c));
//! # Ok(())
//! # }
//! ```

pub mod data;
pub mod loss;
pub mod metrics;
pub mod error;

pub use data::SurvivalData;
pub use loss::{negative_log_likelihood, negative_log_likelihood_gradient};
pub use metrics::{concordance_index, concordance_index_with, ConcordanceCounts, TiePolicy};
pub use error::{Result, SurvivalError};
