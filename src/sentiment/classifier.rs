//! Category classification
//!
//! Two threshold policies map scores onto the three sentiment categories:
//! - document policy: sign of the polarity, exact zero is neutral
//! - token policy: dead zone around zero for weakly scored tokens
//!
//! Both are total functions. NaN satisfies no comparison and lands on Neutral.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound of the token dead zone. A token must exceed it to be positive.
pub const TOKEN_POSITIVE_THRESHOLD: f64 = 0.1;

/// Lower bound of the token dead zone. Scores at or below it are negative.
pub const TOKEN_NEGATIVE_THRESHOLD: f64 = -0.1;

/// Discrete sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Positive,
    Negative,
    Neutral,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 3] = [Category::Positive, Category::Negative, Category::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Positive => "Positive",
            Category::Negative => "Negative",
            Category::Neutral => "Neutral",
        }
    }

    /// Emoji shown next to the label in reports
    pub fn emoji(&self) -> &'static str {
        match self {
            Category::Positive => "😃",
            Category::Negative => "😠",
            Category::Neutral => "😐",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of results per category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
}

impl CategoryCounts {
    pub fn add(&mut self, category: Category, n: u64) {
        match category {
            Category::Positive => self.positive += n,
            Category::Negative => self.negative += n,
            Category::Neutral => self.neutral += n,
        }
    }

    pub fn increment(&mut self, category: Category) {
        self.add(category, 1);
    }

    pub fn get(&self, category: Category) -> u64 {
        match category {
            Category::Positive => self.positive,
            Category::Negative => self.negative,
            Category::Neutral => self.neutral,
        }
    }

    pub fn total(&self) -> u64 {
        self.positive + self.negative + self.neutral
    }

    /// Categories by descending count, ties in display order
    pub fn ranked(&self) -> Vec<(Category, u64)> {
        let mut ranked: Vec<(Category, u64)> =
            Category::ALL.iter().map(|&c| (c, self.get(c))).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

impl FromIterator<Category> for CategoryCounts {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        let mut counts = CategoryCounts::default();
        for category in iter {
            counts.increment(category);
        }
        counts
    }
}

/// Classify a document polarity: positive above zero, negative below, neutral at zero.
pub fn classify_document(polarity: f64) -> Category {
    if polarity > 0.0 {
        Category::Positive
    } else if polarity < 0.0 {
        Category::Negative
    } else {
        Category::Neutral
    }
}

/// Classify a token compound score.
///
/// `(-inf, -0.1]` is Negative, `(-0.1, 0.1]` is Neutral, `(0.1, inf)` is Positive.
/// The negative boundary is inclusive while the positive one is not.
pub fn classify_token(compound: f64) -> Category {
    if compound > TOKEN_POSITIVE_THRESHOLD {
        Category::Positive
    } else if compound <= TOKEN_NEGATIVE_THRESHOLD {
        Category::Negative
    } else {
        Category::Neutral
    }
}
