pub mod engine;
pub mod interactive;
pub mod pipeline;
pub mod scope;
pub mod sentiment;

pub use self::engine::{apply_factor, clamp_and_round, compute_base, AdjustmentFactor};
pub use self::interactive::{
    AcceptDefaults, ConsoleInteraction, Interaction, PreviewFactors, Rating,
};
pub use self::pipeline::{
    run_calculation, Calculation, CalculationOutcome, CalculationRequest, Degradation, Stage,
};
pub use self::scope::{Scope, ScopeTable, SensitivityTables};
pub use self::sentiment::{sentiment_factor, NewsItem, Sentiment};
