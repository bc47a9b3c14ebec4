pub mod evaluation;
pub mod example;
pub mod prediction;

pub use evaluation::EvaluationReport;
pub use example::{DatasetSplit, LabeledExample};
pub use prediction::{Polarity, PredictionResult};
