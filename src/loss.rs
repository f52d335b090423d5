//! negative log partial likelihood for right-censored cohorts
//!
//! both functions assume the cohort is sorted by descending survival time,
//! so the risk set for patient `i` is exactly the prefix `0..=i`. that
//! ordering cannot be verified from `(risk, events)` alone - establish it
//! with [`SurvivalData::sorted_by_time_desc`](crate::SurvivalData::sorted_by_time_desc)
//! and check it with
//! [`SurvivalData::is_sorted_by_time_desc`](crate::SurvivalData::is_sorted_by_time_desc).

use ndarray::{Array1, ArrayView1};
use crate::error::{Result, SurvivalError};

fn validate(risk: ArrayView1<f64>, events: &[bool]) -> Result<f64> {
    if risk.is_empty() {
        return Err(SurvivalError::invalid_dimensions("cohort is empty"));
    }

    if risk.len() != events.len() {
        return Err(SurvivalError::invalid_dimensions(
            format!("risk len ({}) != events len ({})", risk.len(), events.len())
        ));
    }

    if risk.iter().any(|r| !r.is_finite()) {
        return Err(SurvivalError::invalid_survival_data(
            "risk scores must be finite"
        ));
    }

    let n_events = events.iter().filter(|&&e| e).count();
    if n_events == 0 {
        return Err(SurvivalError::degenerate_input(
            "no observed events in batch - loss is undefined"
        ));
    }

    Ok(n_events as f64)
}

/// negative log partial likelihood of risk scores for a cohort sorted by
/// descending time.
///
/// ```text
/// loss = - sum_i [ event_i * (risk_i - log sum_{j <= i} exp(risk_j)) ] / n_events
/// ```
///
/// censored patients never contribute a likelihood term of their own, only
/// through the risk-set denominators of later (shorter-lived) patients. the
/// cumulative sum of exponentials is kept in log space with a running max,
/// so large risk magnitudes don't overflow.
///
/// the result is an unnormalized log-likelihood: non-negative, unbounded
/// above, and not a calibrated metric.
pub fn negative_log_likelihood(risk: ArrayView1<f64>, events: &[bool]) -> Result<f64> {
    let n_events = validate(risk, events)?;

    let mut running_max = f64::NEG_INFINITY;
    let mut scaled_sum = 0.0; // sum of exp(risk_j - running_max) over the prefix
    let mut loglik = 0.0;

    for (&r, &event) in risk.iter().zip(events.iter()) {
        if r > running_max {
            scaled_sum = scaled_sum * (running_max - r).exp() + 1.0;
            running_max = r;
        } else {
            scaled_sum += (r - running_max).exp();
        }

        if event {
            let log_risk_set_sum = running_max + scaled_sum.ln();
            loglik += r - log_risk_set_sum;
        }
    }

    Ok(-loglik / n_events)
}

/// analytic gradient of [`negative_log_likelihood`] with respect to each
/// risk score.
///
/// ```text
/// d loss / d risk_k = ( exp(risk_k) * sum_{i >= k, event_i} 1/S_i - event_k ) / n_events
///     where S_i = sum_{j <= i} exp(risk_j)
/// ```
///
/// this is the piece an external optimizer needs to run gradient descent
/// through the loss without an autodiff engine: one forward pass for the
/// cumulative risk-set log-sums (the same streaming running max the loss
/// uses), one backward pass for the suffix of event reciprocals. the suffix
/// is carried scaled by the smallest log-sum seen so far, so every
/// exponent formed along the way is non-positive and neither overflow nor
/// a divide-by-underflowed-zero can occur, however wide the risk spread.
pub fn negative_log_likelihood_gradient(
    risk: ArrayView1<f64>,
    events: &[bool],
) -> Result<Array1<f64>> {
    let n_events = validate(risk, events)?;
    let n = risk.len();

    // forward: log S_k = log sum_{j <= k} exp(risk_j), streamed as in the loss
    let mut log_cumulative = Vec::with_capacity(n);
    let mut running_max = f64::NEG_INFINITY;
    let mut scaled_sum = 0.0;
    for &r in risk.iter() {
        if r > running_max {
            scaled_sum = scaled_sum * (running_max - r).exp() + 1.0;
            running_max = r;
        } else {
            scaled_sum += (r - running_max).exp();
        }
        log_cumulative.push(running_max + scaled_sum.ln());
    }

    // backward: suffix = exp(reference) * sum_{i >= k, event_i} 1/S_i.
    // log S_k never decreases going forward, so walking backward the newly
    // seen log-sum is the smallest in the suffix and both rescale exponents
    // below stay <= 0.
    let mut gradient = Array1::zeros(n);
    let mut suffix = 0.0;
    let mut reference = f64::INFINITY;
    for k in (0..n).rev() {
        let event_k = if events[k] { 1.0 } else { 0.0 };
        let log_s = log_cumulative[k];
        suffix = suffix * (log_s - reference).exp() + event_k;
        reference = log_s;
        gradient[k] = ((risk[k] - reference).exp() * suffix - event_k) / n_events;
    }

    Ok(gradient)
}
