use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use crate::error::{Result, SurvivalError};

/// survival cohort - times, events, and patient features
#[derive(Debug, Clone)]
pub struct SurvivalData {
    times: Array1<f64>,      // time to event/censoring
    events: Array1<bool>,    // true = event, false = censored
    covariates: Array2<f64>, // patient features (n_samples x n_features)
}

impl SurvivalData {
    /// make new survival data from raw vecs/arrays
    pub fn new(
        times: Vec<f64>,         // survival/censoring times
        events: Vec<bool>,       // true = event occurred, false = censored
        covariates: Array2<f64>, // patient features matrix
    ) -> Result<Self> {
        let n_samples = times.len();

        if n_samples == 0 {
            return Err(SurvivalError::invalid_dimensions("cohort is empty"));
        }

        if events.len() != n_samples {
            return Err(SurvivalError::invalid_dimensions(
                format!("times len ({}) != events len ({})", n_samples, events.len())
            ));
        }

        if covariates.nrows() != n_samples {
            return Err(SurvivalError::invalid_dimensions(
                format!("covariates rows ({}) != n_samples ({})", covariates.nrows(), n_samples)
            ));
        }

        if times.iter().any(|&t| t < 0.0 || !t.is_finite()) {
            return Err(SurvivalError::invalid_survival_data(
                "survival times must be non-negative & finite"
            ));
        }

        Ok(Self {
            times: Array1::from(times),
            events: Array1::from(events),
            covariates,
        })
    }

    /// how many patients
    pub fn n_samples(&self) -> usize {
        self.times.len()
    }

    /// how many features per patient
    pub fn n_features(&self) -> usize {
        self.covariates.ncols()
    }

    /// how many observed (uncensored) events
    pub fn n_events(&self) -> usize {
        self.events.iter().filter(|&&e| e).count()
    }

    /// survival/censoring times
    pub fn times(&self) -> ArrayView1<'_, f64> {
        self.times.view()
    }

    /// event indicators (true = event, false = censored)
    pub fn events(&self) -> &[bool] {
        self.events.as_slice().unwrap()
    }

    /// patient feature matrix
    pub fn covariates(&self) -> ArrayView2<'_, f64> {
        self.covariates.view()
    }

    /// grab a subset of patients by indices
    pub fn subset(&self, indices: &[usize]) -> Result<Self> {
        if indices.iter().any(|&i| i >= self.n_samples()) {
            return Err(SurvivalError::invalid_dimensions(
                "subset index out of bounds"
            ));
        }

        let times: Vec<f64> = indices.iter().map(|&i| self.times[i]).collect();
        let events: Vec<bool> = indices.iter().map(|&i| self.events[i]).collect();
        let covariates = self.covariates.select(ndarray::Axis(0), indices);

        Self::new(times, events, covariates)
    }

    /// standardize features (mean=0, std=1) - modifies in place
    pub fn standardize_covariates(&mut self) -> Result<(Array1<f64>, Array1<f64>)> {
        let means = self.covariates.mean_axis(ndarray::Axis(0)).unwrap();
        let stds = self.covariates.std_axis(ndarray::Axis(0), 0.0);

        for j in 0..self.n_features() {
            if stds[j] == 0.0 {
                return Err(SurvivalError::invalid_survival_data(
                    format!("feature {} has zero variance - can't standardize", j)
                ));
            }

            // z-score normalization
            for i in 0..self.n_samples() {
                self.covariates[[i, j]] = (self.covariates[[i, j]] - means[j]) / stds[j];
            }
        }

        Ok((means, stds))
    }

    /// copy of the cohort sorted by descending time, plus the permutation
    /// applied - the loss evaluator requires this ordering.
    ///
    /// ties are broken by original index, so repeated calls give the same
    /// arrangement.
    pub fn sorted_by_time_desc(&self) -> Result<(Self, Vec<usize>)> {
        let mut order: Vec<usize> = (0..self.n_samples()).collect();
        order.sort_by(|&i, &j| {
            self.times[j]
                .partial_cmp(&self.times[i])
                .unwrap()
                .then_with(|| i.cmp(&j))
        });

        let sorted = self.subset(&order)?;
        Ok((sorted, order))
    }

    /// cheap precondition check before calling the loss evaluator
    pub fn is_sorted_by_time_desc(&self) -> bool {
        self.times
            .as_slice()
            .unwrap()
            .windows(2)
            .all(|w| w[0] >= w[1])
    }
}
