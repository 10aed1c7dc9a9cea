//! Lexicon Sentiment Analyzer
//!
//! VADER-style scorer for general English text. Word valences use the VADER
//! -4..4 scale and carry a subjectivity weight, so one lookup table answers
//! both document polarity/subjectivity and single-token compound scores.

use super::scorer::{LexiconScorer, SentimentScore};
use crate::error::{Result, SentimentError};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

/// Largest absolute valence in the lexicon
pub const MAX_VALENCE: f64 = 4.0;

/// VADER normalization constant
const ALPHA: f64 = 15.0;

/// Applied to a hit preceded by a negation word
const NEGATION_SCALAR: f64 = -0.74;

/// How many preceding words are searched for boosters and negations
const MODIFIER_WINDOW: usize = 3;

static SHARED: OnceLock<Arc<LexiconAnalyzer>> = OnceLock::new();

/// One lexicon term
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LexiconEntry {
    /// Valence (-4.0 to 4.0)
    pub valence: f64,
    /// Subjectivity weight (0.0 to 1.0)
    pub subjectivity: f64,
}

/// Row of a lexicon override file: `token,valence,subjectivity`
#[derive(Debug, Clone, Deserialize)]
pub struct LexiconOverride {
    pub token: String,
    pub valence: f64,
    pub subjectivity: f64,
}

/// Sentiment analyzer using lexicon-based approach
pub struct LexiconAnalyzer {
    /// Word and emoticon entries, keyed lowercase
    lexicon: HashMap<String, LexiconEntry>,
    /// Intensity modifiers (very, extremely, etc.)
    boosters: HashMap<String, f64>,
    /// Negation words
    negations: Vec<String>,
}

impl LexiconAnalyzer {
    /// Create a new analyzer with the default lexicon
    pub fn new() -> Self {
        let mut analyzer = Self {
            lexicon: HashMap::new(),
            boosters: HashMap::new(),
            negations: Vec::new(),
        };
        analyzer.init_lexicons();
        debug!(entries = analyzer.lexicon.len(), "Lexicon built");
        analyzer
    }

    /// Process-wide default analyzer, built on first use
    pub fn shared() -> Arc<LexiconAnalyzer> {
        SHARED.get_or_init(|| Arc::new(LexiconAnalyzer::new())).clone()
    }

    /// Default lexicon with entries replaced or added from `overrides`
    pub fn with_overrides<I>(overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = LexiconOverride>,
    {
        let mut analyzer = Self::new();
        let mut applied = 0usize;
        for entry in overrides {
            if entry.token.trim().is_empty() {
                return Err(SentimentError::Config("lexicon override with empty token".to_string()));
            }
            if !(-MAX_VALENCE..=MAX_VALENCE).contains(&entry.valence) {
                return Err(SentimentError::Config(format!(
                    "valence {} for '{}' outside -4..4",
                    entry.valence, entry.token
                )));
            }
            if !(0.0..=1.0).contains(&entry.subjectivity) {
                return Err(SentimentError::Config(format!(
                    "subjectivity {} for '{}' outside 0..1",
                    entry.subjectivity, entry.token
                )));
            }
            analyzer.lexicon.insert(
                entry.token.trim().to_lowercase(),
                LexiconEntry {
                    valence: entry.valence,
                    subjectivity: entry.subjectivity,
                },
            );
            applied += 1;
        }
        info!(applied, "Lexicon overrides applied");
        Ok(analyzer)
    }

    /// Read override rows from a CSV file with a `token,valence,subjectivity` header
    pub fn load_overrides<P: AsRef<Path>>(path: P) -> Result<Vec<LexiconOverride>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path.as_ref())?;
        let mut rows = Vec::new();
        for record in reader.deserialize() {
            rows.push(record?);
        }
        Ok(rows)
    }

    /// Initialize sentiment lexicons
    fn init_lexicons(&mut self) {
        // (word, valence, subjectivity)
        let positive_words = [
            ("good", 1.9, 0.6),
            ("great", 3.1, 0.75),
            ("excellent", 2.7, 1.0),
            ("amazing", 2.8, 0.9),
            ("awesome", 3.1, 1.0),
            ("fantastic", 2.6, 0.9),
            ("wonderful", 2.7, 1.0),
            ("best", 3.2, 0.3),
            ("better", 1.9, 0.5),
            ("love", 3.2, 0.6),
            ("loved", 2.9, 0.7),
            ("like", 1.5, 0.4),
            ("liked", 1.8, 0.5),
            ("happy", 2.7, 1.0),
            ("glad", 2.0, 1.0),
            ("beautiful", 2.9, 1.0),
            ("lovely", 2.8, 0.75),
            ("nice", 1.8, 1.0),
            ("fun", 2.3, 0.2),
            ("enjoy", 2.2, 0.5),
            ("enjoyed", 2.3, 0.5),
            ("perfect", 2.7, 1.0),
            ("brilliant", 2.8, 1.0),
            ("superb", 3.1, 1.0),
            ("delightful", 2.9, 1.0),
            ("pleasant", 2.3, 0.75),
            ("helpful", 1.8, 0.4),
            ("recommend", 1.5, 0.4),
            ("impressive", 2.3, 1.0),
            ("win", 2.8, 0.4),
            ("success", 2.7, 0.3),
            ("successful", 2.8, 0.95),
            ("thanks", 1.9, 0.2),
            ("thank", 1.5, 0.2),
            ("cool", 1.3, 0.65),
            ("fine", 0.8, 0.5),
            ("ok", 0.9, 0.5),
            ("okay", 0.9, 0.5),
            ("positive", 2.6, 0.55),
            ("satisfied", 1.8, 0.8),
            ("easy", 1.9, 0.8),
            ("friendly", 2.2, 0.6),
            ("kind", 2.4, 0.9),
            ("smile", 1.5, 0.6),
            ("excited", 1.4, 0.75),
            ("exciting", 2.2, 0.8),
            ("favorite", 2.0, 1.0),
            ("fast", 1.0, 0.6),
            ("reliable", 1.9, 0.5),
            ("clean", 1.7, 0.6),
            ("comfortable", 1.5, 0.7),
            ("strong", 2.3, 0.7),
            ("calm", 1.3, 0.75),
            ("hope", 1.9, 0.6),
            ("joy", 2.8, 0.7),
            ("proud", 2.1, 1.0),
        ];

        let negative_words = [
            ("bad", -2.5, 0.67),
            ("terrible", -2.1, 1.0),
            ("awful", -2.0, 1.0),
            ("horrible", -2.5, 1.0),
            ("poor", -2.1, 0.6),
            ("worst", -3.1, 1.0),
            ("worse", -2.1, 0.6),
            ("hate", -2.7, 0.9),
            ("hated", -3.2, 0.9),
            ("dislike", -1.6, 0.7),
            ("sad", -2.1, 1.0),
            ("unhappy", -1.8, 1.0),
            ("ugly", -2.3, 1.0),
            ("angry", -2.3, 1.0),
            ("annoying", -1.7, 0.9),
            ("boring", -1.3, 1.0),
            ("disappointing", -2.2, 0.7),
            ("disappointed", -1.9, 0.75),
            ("broken", -2.1, 0.4),
            ("fail", -2.5, 0.3),
            ("failed", -2.3, 0.3),
            ("failure", -2.3, 0.3),
            ("useless", -1.8, 0.2),
            ("waste", -1.8, 0.4),
            ("wrong", -2.1, 0.9),
            ("problem", -1.7, 0.3),
            ("slow", -0.6, 0.4),
            ("rude", -2.0, 0.7),
            ("sucks", -1.5, 0.9),
            ("mess", -1.5, 0.6),
            ("scam", -2.9, 0.5),
            ("fraud", -2.8, 0.5),
            ("crash", -1.7, 0.4),
            ("loss", -1.3, 0.2),
            ("lose", -1.7, 0.3),
            ("pain", -2.3, 0.7),
            ("difficult", -1.5, 1.0),
            ("negative", -2.7, 0.4),
            ("fear", -2.2, 0.7),
            ("worried", -1.9, 0.8),
            ("cry", -2.1, 0.6),
            ("stupid", -2.4, 1.0),
            ("dirty", -1.9, 0.8),
            ("expensive", -0.9, 0.7),
            ("broke", -1.8, 0.4),
            ("lost", -1.3, 0.2),
            ("nasty", -2.6, 1.0),
            ("sick", -2.3, 0.85),
            ("weak", -1.9, 0.7),
            ("pathetic", -2.7, 1.0),
        ];

        let emoticons = [
            (":)", 2.0, 0.8),
            (":-)", 1.3, 0.8),
            (":d", 2.3, 0.8),
            (";)", 0.9, 0.8),
            ("<3", 1.9, 0.8),
            (":(", -1.9, 0.8),
            (":-(", -1.5, 0.8),
            (":'(", -2.2, 0.8),
            (":/", -1.4, 0.8),
        ];

        for (word, valence, subjectivity) in positive_words
            .iter()
            .chain(negative_words.iter())
            .chain(emoticons.iter())
        {
            self.lexicon.insert(
                word.to_string(),
                LexiconEntry {
                    valence: *valence,
                    subjectivity: *subjectivity,
                },
            );
        }

        // Intensity boosters
        let boosters = [
            ("very", 1.3),
            ("really", 1.3),
            ("extremely", 1.5),
            ("absolutely", 1.4),
            ("completely", 1.4),
            ("totally", 1.3),
            ("so", 1.2),
            ("super", 1.3),
            ("incredibly", 1.4),
            ("highly", 1.3),
            ("quite", 1.1),
            ("slightly", 0.8),
            ("somewhat", 0.85),
            ("barely", 0.7),
        ];

        for (word, factor) in boosters {
            self.boosters.insert(word.to_string(), factor);
        }

        self.negations = [
            "not", "no", "never", "none", "neither", "nobody", "nothing", "nowhere", "isn't",
            "aren't", "wasn't", "weren't", "hasn't", "haven't", "hadn't", "doesn't", "don't",
            "didn't", "won't", "wouldn't", "can't", "cannot", "couldn't", "shouldn't", "without",
        ]
        .iter()
        .map(|w| w.to_string())
        .collect();
    }

    /// Lowercase a word and trim surrounding punctuation
    fn clean_word(&self, word: &str) -> String {
        word.trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase()
    }

    /// Entry for a raw token. Emoticons are matched before punctuation is trimmed.
    fn lookup(&self, word: &str) -> Option<LexiconEntry> {
        let lower = word.to_lowercase();
        if let Some(entry) = self.lexicon.get(&lower) {
            return Some(*entry);
        }
        self.lexicon.get(&self.clean_word(word)).copied()
    }

    /// Apply modifiers (boosters, negations) to a valence
    fn apply_modifiers(&self, words: &[&str], index: usize, mut valence: f64) -> f64 {
        let start = index.saturating_sub(MODIFIER_WINDOW);

        for prev in &words[start..index] {
            let prev_word = self.clean_word(prev);

            if let Some(&factor) = self.boosters.get(&prev_word) {
                valence *= factor;
            }

            if self.negations.contains(&prev_word) {
                valence *= NEGATION_SCALAR;
            }
        }

        valence.clamp(-MAX_VALENCE, MAX_VALENCE)
    }

    /// Normalize a valence to the -1..1 compound range
    fn normalize(&self, valence: f64) -> f64 {
        valence / (valence * valence + ALPHA).sqrt()
    }

    /// Number of entries in the lexicon
    pub fn len(&self) -> usize {
        self.lexicon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexicon.is_empty()
    }
}

impl Default for LexiconAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer for LexiconAnalyzer {
    fn score_text(&self, text: &str) -> Result<SentimentScore> {
        let words: Vec<&str> = text.split_whitespace().collect();

        let mut valences = Vec::new();
        let mut subjectivity_sum = 0.0;

        for (i, word) in words.iter().enumerate() {
            if let Some(entry) = self.lookup(word) {
                valences.push(self.apply_modifiers(&words, i, entry.valence));
                subjectivity_sum += entry.subjectivity;
            }
        }

        if valences.is_empty() {
            return Ok(SentimentScore::neutral());
        }

        let n = valences.len() as f64;
        let polarity = valences.iter().sum::<f64>() / n / MAX_VALENCE;
        Ok(SentimentScore::new(polarity, subjectivity_sum / n))
    }

    fn score_token(&self, token: &str) -> Result<f64> {
        Ok(self
            .lookup(token)
            .map(|entry| self.normalize(entry.valence))
            .unwrap_or(0.0))
    }
}
