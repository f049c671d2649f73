use serde::{Deserialize, Serialize};

/// Three-class sentiment assigned to each post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    #[serde(rename = "positivo")]
    Positive,
    #[serde(rename = "negativo")]
    Negative,
    #[serde(rename = "neutral")]
    Neutral,
}

impl Sentiment {
    /// Model output classes, indexed by class id.
    pub const CLASS_ORDER: [Sentiment; 3] =
        [Sentiment::Negative, Sentiment::Neutral, Sentiment::Positive];

    /// Maps a model class index to its sentiment. Returns `None` outside `0..3`.
    #[must_use]
    pub fn from_class_index(index: usize) -> Option<Self> {
        Self::CLASS_ORDER.get(index).copied()
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Sentiment::Positive => "positivo",
            Sentiment::Negative => "negativo",
            Sentiment::Neutral => "neutral",
        }
    }

    /// Label with an uppercase first letter, as used in report bullet lines.
    #[must_use]
    pub const fn capitalized(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positivo",
            Sentiment::Negative => "Negativo",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-bucket sentiment tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    #[serde(rename = "positivo")]
    pub positive: usize,
    #[serde(rename = "negativo")]
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentCounts {
    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }

    #[must_use]
    pub const fn get(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    /// Share of `sentiment` in percent. `0.0` when nothing was tallied.
    #[must_use]
    pub fn percent(&self, sentiment: Sentiment) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let share = self.get(sentiment) as f64 / total as f64 * 100.0;
        share
    }

    #[must_use]
    pub fn merged(self, other: SentimentCounts) -> Self {
        Self {
            positive: self.positive + other.positive,
            negative: self.negative + other.negative,
            neutral: self.neutral + other.neutral,
        }
    }
}
