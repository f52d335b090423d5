//! Harrell's concordance index over (time, risk proxy, event) triples
//!
//! polarity convention: a comparable pair is concordant when the patient
//! with the shorter observed time carries the higher proxy value. callers
//! scoring a model whose raw output grows with hazard can pass predictions
//! through unchanged; callers holding survival-time-like proxies should
//! negate first.

use ndarray::ArrayView1;
use crate::error::{Result, SurvivalError};

/// what to do with pairs whose proxy values are exactly equal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TiePolicy {
    /// count each tied pair as half concordant (Harrell's convention)
    #[default]
    HalfCredit,
    /// drop tied pairs from the comparable total
    Exclude,
}

/// pairwise tallies behind a concordance index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConcordanceCounts {
    pub concordant: u64,
    pub discordant: u64,
    pub tied_risk: u64,
}

impl ConcordanceCounts {
    /// total comparable pairs, ties included
    pub fn comparable(&self) -> u64 {
        self.concordant + self.discordant + self.tied_risk
    }

    /// concordance index under the given tie policy
    pub fn index(&self, ties: TiePolicy) -> Result<f64> {
        let (numerator, denominator) = match ties {
            TiePolicy::HalfCredit => (
                self.concordant as f64 + 0.5 * self.tied_risk as f64,
                self.comparable() as f64,
            ),
            TiePolicy::Exclude => (
                self.concordant as f64,
                (self.concordant + self.discordant) as f64,
            ),
        };

        if denominator == 0.0 {
            return Err(SurvivalError::degenerate_input(
                "no comparable pairs - concordance is undefined"
            ));
        }

        Ok(numerator / denominator)
    }
}

/// tally concordant/discordant/tied pairs over all comparable patient pairs.
///
/// a pair is comparable iff the patient with the shorter time had an
/// observed event. at equal times, an event patient is compared against a
/// censored one (the censored patient is known to have survived at least as
/// long); two event patients with equal times are excluded.
pub fn concordance_counts(
    times: ArrayView1<f64>,
    risk_proxies: ArrayView1<f64>,
    events: &[bool],
) -> Result<ConcordanceCounts> {
    let n = times.len();

    if n == 0 {
        return Err(SurvivalError::invalid_dimensions("cohort is empty"));
    }

    if risk_proxies.len() != n || events.len() != n {
        return Err(SurvivalError::invalid_dimensions(
            "times, risk proxies, and events must have same length"
        ));
    }

    if times.iter().any(|t| !t.is_finite()) {
        return Err(SurvivalError::invalid_survival_data(
            "times must be finite"
        ));
    }

    if risk_proxies.iter().any(|p| !p.is_finite()) {
        return Err(SurvivalError::invalid_survival_data(
            "risk proxies must be finite"
        ));
    }

    let mut counts = ConcordanceCounts {
        concordant: 0,
        discordant: 0,
        tied_risk: 0,
    };

    for i in 0..n {
        if !events[i] {
            continue; // censored obs never anchor a pair
        }

        for j in 0..n {
            if i == j {
                continue;
            }

            // j is comparable to i if j outlived i (event or censored)
            if times[j] > times[i] || (!events[j] && times[j] >= times[i]) {
                if risk_proxies[i] > risk_proxies[j] {
                    counts.concordant += 1;
                } else if risk_proxies[i] < risk_proxies[j] {
                    counts.discordant += 1;
                } else {
                    counts.tied_risk += 1;
                }
            }
        }
    }

    Ok(counts)
}

/// Harrell's c-index with half credit for tied proxies
pub fn concordance_index(
    times: ArrayView1<f64>,
    risk_proxies: ArrayView1<f64>,
    events: &[bool],
) -> Result<f64> {
    concordance_index_with(times, risk_proxies, events, TiePolicy::HalfCredit)
}

/// c-index under an explicit tie policy
pub fn concordance_index_with(
    times: ArrayView1<f64>,
    risk_proxies: ArrayView1<f64>,
    events: &[bool],
    ties: TiePolicy,
) -> Result<f64> {
    concordance_counts(times, risk_proxies, events)?.index(ties)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;
    use approx::assert_relative_eq;

    #[test]
    fn test_perfect_concordance() {
        let times = Array1::from(vec![1.0, 2.0, 3.0, 4.0]);
        let events = vec![true, true, true, true];
        // proxy strictly decreasing as time increases
        let proxies = Array1::from(vec![4.0, 3.0, 2.0, 1.0]);

        let c = concordance_index(times.view(), proxies.view(), &events).unwrap();
        assert_relative_eq!(c, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_perfect_discordance() {
        let times = Array1::from(vec![1.0, 2.0, 3.0, 4.0]);
        let events = vec![true, true, true, true];
        let proxies = Array1::from(vec![1.0, 2.0, 3.0, 4.0]);

        let c = concordance_index(times.view(), proxies.view(), &events).unwrap();
        assert_relative_eq!(c, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_all_proxies_identical_is_half() {
        let times = Array1::from(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let events = vec![true, true, true, false, true];
        let proxies = Array1::from(vec![0.7; 5]);

        let c = concordance_index(times.view(), proxies.view(), &events).unwrap();
        assert_relative_eq!(c, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_tie_policies_differ() {
        let times = Array1::from(vec![1.0, 2.0, 3.0]);
        let events = vec![true, true, true];
        // pair (0,1) tied, pairs (0,2) and (1,2) concordant
        let proxies = Array1::from(vec![2.0, 2.0, 1.0]);

        let counts = concordance_counts(times.view(), proxies.view(), &events).unwrap();
        assert_eq!(counts.concordant, 2);
        assert_eq!(counts.discordant, 0);
        assert_eq!(counts.tied_risk, 1);

        let half = counts.index(TiePolicy::HalfCredit).unwrap();
        assert_relative_eq!(half, 2.5 / 3.0, epsilon = 1e-12);

        let excluded = counts.index(TiePolicy::Exclude).unwrap();
        assert_relative_eq!(excluded, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_exclude_policy_with_only_ties_is_degenerate() {
        let times = Array1::from(vec![1.0, 2.0]);
        let events = vec![true, true];
        let proxies = Array1::from(vec![1.0, 1.0]);

        let counts = concordance_counts(times.view(), proxies.view(), &events).unwrap();
        assert!(matches!(
            counts.index(TiePolicy::Exclude),
            Err(SurvivalError::DegenerateInput { .. })
        ));
        // half credit still defined
        assert_relative_eq!(
            counts.index(TiePolicy::HalfCredit).unwrap(),
            0.5,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_negation_symmetry() {
        let times = Array1::from(vec![3.0, 1.0, 4.0, 2.0, 5.0]);
        let events = vec![true, true, false, true, true];
        let proxies = Array1::from(vec![0.3, 1.2, -0.4, 0.9, -1.1]);

        let c = concordance_index(times.view(), proxies.view(), &events).unwrap();
        let negated = proxies.mapv(|p| -p);
        let c_neg = concordance_index(times.view(), negated.view(), &events).unwrap();

        assert_relative_eq!(c_neg, 1.0 - c, epsilon = 1e-12);
    }

    #[test]
    fn test_range_bounds() {
        let times = Array1::from(vec![2.0, 7.0, 1.0, 4.0, 3.0, 6.0]);
        let events = vec![true, false, true, true, false, true];
        let proxies = Array1::from(vec![0.1, -0.8, 1.4, 0.0, 0.6, -0.2]);

        let c = concordance_index(times.view(), proxies.view(), &events).unwrap();
        assert!((0.0..=1.0).contains(&c));
    }

    #[test]
    fn test_censored_tie_against_event_is_comparable() {
        // equal times, one event and one censored: the censored patient is
        // known to have lived at least as long, so the pair counts
        let times = Array1::from(vec![5.0, 5.0]);
        let events = vec![true, false];
        let proxies = Array1::from(vec![2.0, 1.0]);

        let counts = concordance_counts(times.view(), proxies.view(), &events).unwrap();
        assert_eq!(counts.comparable(), 1);
        assert_eq!(counts.concordant, 1);
    }

    #[test]
    fn test_event_event_time_tie_excluded() {
        let times = Array1::from(vec![5.0, 5.0]);
        let events = vec![true, true];
        let proxies = Array1::from(vec![2.0, 1.0]);

        assert!(matches!(
            concordance_index(times.view(), proxies.view(), &events),
            Err(SurvivalError::DegenerateInput { .. })
        ));
    }

    #[test]
    fn test_single_patient_is_degenerate() {
        let times = Array1::from(vec![5.0]);
        let events = vec![true];
        let proxies = Array1::from(vec![1.0]);

        assert!(matches!(
            concordance_index(times.view(), proxies.view(), &events),
            Err(SurvivalError::DegenerateInput { .. })
        ));
    }

    #[test]
    fn test_all_censored_is_degenerate() {
        let times = Array1::from(vec![1.0, 2.0, 3.0]);
        let events = vec![false, false, false];
        let proxies = Array1::from(vec![0.5, 0.1, 0.9]);

        assert!(matches!(
            concordance_index(times.view(), proxies.view(), &events),
            Err(SurvivalError::DegenerateInput { .. })
        ));
    }

    #[test]
    fn test_non_finite_inputs_rejected() {
        // a NaN proxy would otherwise compare as tied against everything
        let times = Array1::from(vec![1.0, 2.0, 3.0]);
        let events = vec![true, true, true];

        let nan_proxy = Array1::from(vec![1.0, f64::NAN, 0.5]);
        assert!(matches!(
            concordance_index(times.view(), nan_proxy.view(), &events),
            Err(SurvivalError::InvalidSurvivalData { .. })
        ));

        let nan_times = Array1::from(vec![1.0, f64::NAN, 3.0]);
        let proxies = Array1::from(vec![1.0, 0.8, 0.5]);
        assert!(matches!(
            concordance_index(nan_times.view(), proxies.view(), &events),
            Err(SurvivalError::InvalidSurvivalData { .. })
        ));
    }

    #[test]
    fn test_dimension_mismatch_error() {
        let times = Array1::from(vec![1.0, 2.0, 3.0]);
        let events = vec![true, false];
        let proxies = Array1::from(vec![1.0, 2.0]);

        assert!(matches!(
            concordance_index(times.view(), proxies.view(), &events),
            Err(SurvivalError::InvalidDimensions { .. })
        ));
    }
}
