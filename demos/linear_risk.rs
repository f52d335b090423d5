use surv_metrics::{
    concordance_index, negative_log_likelihood, negative_log_likelihood_gradient, SurvivalData,
};
use ndarray::{Array1, Array2};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

/// Synthesize a cohort whose hazard follows a known linear model, then fit
/// that model back by plain gradient descent on the partial-likelihood loss
/// and score it with the concordance index.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Survival Loss + Concordance - Linear Risk Example");
    println!("=================================================\n");

    let n_samples = 300;
    let n_features = 3;
    let true_beta = Array1::from(vec![0.8, -0.5, 0.3]);

    let mut rng = StdRng::seed_from_u64(2024);

    let mut covariates_vec = Vec::with_capacity(n_samples * n_features);
    for _ in 0..(n_samples * n_features) {
        covariates_vec.push(rng.gen_range(-2.0..2.0));
    }
    let covariates = Array2::from_shape_vec((n_samples, n_features), covariates_vec)?;

    let mut times = Vec::with_capacity(n_samples);
    let mut events = Vec::with_capacity(n_samples);
    for i in 0..n_samples {
        let linear_pred: f64 = covariates.row(i).dot(&true_beta);
        let hazard = linear_pred.exp();
        let time = (-rng.r#gen::<f64>().ln() / (0.1 * hazard)).abs().max(0.1);
        let censoring_time = rng.gen_range(1.0..10.0);

        if time < censoring_time {
            times.push(time);
            events.push(true);
        } else {
            times.push(censoring_time);
            events.push(false);
        }
    }

    let mut data = SurvivalData::new(times, events, covariates)?;
    data.standardize_covariates()?;

    println!("Cohort:");
    println!("  - samples:  {}", data.n_samples());
    println!("  - features: {}", data.n_features());
    println!("  - events:   {}", data.n_events());
    println!("  - censored: {}", data.n_samples() - data.n_events());
    println!();

    // Train/test split, then the descending-time sort the loss requires
    let train_indices: Vec<usize> = (0..220).collect();
    let test_indices: Vec<usize> = (220..n_samples).collect();
    let (train, _order) = data.subset(&train_indices)?.sorted_by_time_desc()?;
    let test = data.subset(&test_indices)?;

    // Gradient descent on a linear risk model: risk = X * beta.
    // The crate supplies d(loss)/d(risk); the chain rule through the linear
    // layer is the caller's (one matrix-vector product).
    let learning_rate = 0.5;
    let epochs = 400;
    let mut beta = Array1::zeros(n_features);

    println!("Training ({} epochs, learning rate {}):", epochs, learning_rate);
    for epoch in 0..epochs {
        let risk = train.covariates().dot(&beta);
        let risk_gradient = negative_log_likelihood_gradient(risk.view(), train.events())?;
        let beta_gradient = train.covariates().t().dot(&risk_gradient);
        beta = beta - learning_rate * &beta_gradient;

        if epoch % 100 == 0 || epoch == epochs - 1 {
            let loss = negative_log_likelihood(risk.view(), train.events())?;
            println!("  epoch {:>4}: loss = {:.6}", epoch, loss);
        }
    }
    println!();

    println!("Fitted coefficients vs truth (after standardization):");
    for j in 0..n_features {
        println!("  x{}: fitted = {:>8.4}, true = {:>8.4}", j, beta[j], true_beta[j]);
    }
    println!();

    let train_risk = train.covariates().dot(&beta);
    let train_c = concordance_index(train.times(), train_risk.view(), train.events())?;

    let test_risk = test.covariates().dot(&beta);
    let test_c = concordance_index(test.times(), test_risk.view(), test.events())?;

    println!("Concordance (higher risk should mean shorter survival):");
    println!("  - train c-index: {:.4}", train_c);
    println!("  - test  c-index: {:.4}", test_c);
    println!("  (0.5 = random ranking, 1.0 = perfect)");

    Ok(())
}
