use super::engine::AdjustmentFactor;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn score(self) -> f64 {
        match self {
            Self::Positive => 0.05,
            Self::Neutral => 0.0,
            Self::Negative => -0.05,
        }
    }
}

/// A labeled community post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub text: String,
    pub sentiment: Sentiment,
    pub timestamp: String,
}

impl NewsItem {
    pub fn new(text: &str, sentiment: Sentiment, timestamp: &str) -> Self {
        Self {
            text: text.to_string(),
            sentiment,
            timestamp: timestamp.to_string(),
        }
    }
}

/// `1 + mean(score)` over the items actually shown, applied equally to all three tables.
pub fn sentiment_factor(items: &[NewsItem]) -> AdjustmentFactor {
    if items.is_empty() {
        return AdjustmentFactor::neutral();
    }
    let sum: f64 = items.iter().map(|i| i.sentiment.score()).sum();
    AdjustmentFactor::uniform(1.0 + sum / items.len() as f64)
}
