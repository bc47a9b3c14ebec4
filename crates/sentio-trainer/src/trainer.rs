//! Logistic-regression training with stochastic dual coordinate ascent.
//!
//! Minimizes `1/n Σ log(1 + exp(-y·(w·x + b))) + λ/2 (|w|² + b²)` over the
//! featurized training texts. Each example owns a dual variable; visiting an
//! example moves its dual variable toward the current loss gradient and
//! applies the matching change to the primal weights. Training stops once the
//! primal/dual gap falls under the configured tolerance or after
//! `max_epochs` passes.

use sentio_core::{
    sigmoid, Featurizer, FeaturizerConfig, LabeledExample, Result, SentioError, SparseVector,
    TrainedModel,
};

use crate::data::{rng_from_seed, shuffle};

/// Logistic loss is `1/γ`-smooth with `γ = 4`.
const LOGISTIC_SMOOTHNESS: f64 = 4.0;

/// Configuration for the trainer.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainerConfig {
    /// Featurizer settings; the vocabulary itself is fitted on the training set.
    pub featurizer: FeaturizerConfig,
    /// L2 regularization strength `λ`.
    pub l2_regularization: f64,
    /// Upper bound on passes over the training set.
    pub max_epochs: usize,
    /// Duality gap under which training is considered converged.
    pub convergence_tolerance: f64,
    /// Seed for the example visiting order (clock-seeded when `None`).
    pub seed: Option<u64>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            featurizer: FeaturizerConfig::default(),
            l2_regularization: 1e-3,
            max_epochs: 100,
            convergence_tolerance: 1e-4,
            seed: None,
        }
    }
}

impl TrainerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_featurizer(mut self, featurizer: FeaturizerConfig) -> Self {
        self.featurizer = featurizer;
        self
    }

    /// Set `λ`. Non-positive values are raised to a tiny positive floor.
    pub fn with_l2_regularization(mut self, l2: f64) -> Self {
        self.l2_regularization = l2.max(1e-12);
        self
    }

    pub fn with_max_epochs(mut self, epochs: usize) -> Self {
        self.max_epochs = epochs.max(1);
        self
    }

    pub fn with_convergence_tolerance(mut self, tolerance: f64) -> Self {
        self.convergence_tolerance = tolerance.max(0.0);
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

/// Summary of the last `fit` call, mostly for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingStats {
    pub epochs: usize,
    pub duality_gap: f64,
    pub converged: bool,
}

pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Fit the featurizer and the classifier on `examples`.
    ///
    /// # Errors
    ///
    /// Returns `SentioError::Training` if the set is empty or has one class.
    pub fn fit(&self, examples: &[LabeledExample]) -> Result<TrainedModel> {
        self.fit_with_stats(examples).map(|(model, _)| model)
    }

    pub fn fit_with_stats(&self, examples: &[LabeledExample]) -> Result<(TrainedModel, TrainingStats)> {
        check_training_set(examples)?;

        let featurizer = Featurizer::fit(
            self.config.featurizer.clone(),
            examples.iter().map(|e| e.text.as_str()),
        )?;
        let features: Vec<SparseVector> = examples
            .iter()
            .map(|e| featurizer.transform(&e.text))
            .collect();
        let targets: Vec<f64> = examples
            .iter()
            .map(|e| if e.label { 1.0 } else { -1.0 })
            .collect();

        let mut solver = Sdca::new(featurizer.dimension(), &self.config, examples.len());
        let stats = solver.run(&features, &targets, &self.config);

        tracing::info!(
            examples = examples.len(),
            vocabulary = featurizer.dimension(),
            epochs = stats.epochs,
            duality_gap = stats.duality_gap,
            converged = stats.converged,
            "Trained logistic regression"
        );

        let model = TrainedModel::new(featurizer, solver.weights, solver.bias)?;
        Ok((model, stats))
    }
}

impl Default for Trainer {
    fn default() -> Self {
        Self::new(TrainerConfig::default())
    }
}

fn check_training_set(examples: &[LabeledExample]) -> Result<()> {
    if examples.is_empty() {
        return Err(SentioError::Training("training set is empty".into()));
    }
    let positives = examples.iter().filter(|e| e.label).count();
    if positives == 0 || positives == examples.len() {
        let class = if positives == 0 { "negative" } else { "positive" };
        return Err(SentioError::Training(format!(
            "training set contains only {class} examples"
        )));
    }
    Ok(())
}

/// SDCA state: dual variables plus the primal weights they induce,
/// `w = 1/(λn) Σ αᵢ xᵢ` with an always-on bias feature.
struct Sdca {
    weights: Vec<f64>,
    bias: f64,
    alphas: Vec<f64>,
    lambda_n: f64,
}

impl Sdca {
    fn new(dimension: usize, config: &TrainerConfig, n: usize) -> Self {
        Self {
            weights: vec![0.0; dimension],
            bias: 0.0,
            alphas: vec![0.0; n],
            lambda_n: config.l2_regularization * n as f64,
        }
    }

    fn run(&mut self, features: &[SparseVector], targets: &[f64], config: &TrainerConfig) -> TrainingStats {
        let mut rng = rng_from_seed(config.seed);
        let mut order: Vec<usize> = (0..features.len()).collect();
        let mut stats = TrainingStats {
            epochs: 0,
            duality_gap: f64::INFINITY,
            converged: false,
        };

        for epoch in 0..config.max_epochs {
            shuffle(&mut order, &mut rng);
            for &i in &order {
                self.step(&features[i], targets[i], i);
            }

            stats.epochs = epoch + 1;
            stats.duality_gap = self.duality_gap(features, targets, config.l2_regularization);
            tracing::debug!(epoch = stats.epochs, gap = stats.duality_gap, "SDCA epoch");

            if stats.duality_gap < config.convergence_tolerance {
                stats.converged = true;
                break;
            }
        }

        stats
    }

    /// One smooth-loss coordinate step on example `i`.
    fn step(&mut self, x: &SparseVector, y: f64, i: usize) {
        let margin = x.dot(&self.weights) + self.bias;
        // negative loss derivative at the current margin
        let target = y * sigmoid(-y * margin);
        let norm = x.squared_norm() + 1.0;
        let scale = self.lambda_n * LOGISTIC_SMOOTHNESS;
        let step = scale / (norm + scale) * (target - self.alphas[i]);

        if step != 0.0 {
            self.alphas[i] += step;
            x.add_scaled_to(&mut self.weights, step / self.lambda_n);
            self.bias += step / self.lambda_n;
        }
    }

    fn duality_gap(&self, features: &[SparseVector], targets: &[f64], lambda: f64) -> f64 {
        let n = features.len() as f64;
        let mut loss = 0.0;
        let mut entropy = 0.0;
        for (i, (x, &y)) in features.iter().zip(targets).enumerate() {
            let margin = x.dot(&self.weights) + self.bias;
            loss += softplus(-y * margin);
            entropy += binary_entropy(self.alphas[i] * y);
        }
        let weight_norm: f64 =
            self.weights.iter().map(|w| w * w).sum::<f64>() + self.bias * self.bias;

        // P(w) - D(α); the regularizer appears in both with opposite signs
        (loss - entropy) / n + lambda * weight_norm
    }
}

/// `ln(1 + e^z)` without overflow.
fn softplus(z: f64) -> f64 {
    if z > 0.0 {
        z + (-z).exp().ln_1p()
    } else {
        z.exp().ln_1p()
    }
}

fn binary_entropy(p: f64) -> f64 {
    let term = |q: f64| if q > 0.0 { -q * q.ln() } else { 0.0 };
    term(p) + term(1.0 - p)
}
