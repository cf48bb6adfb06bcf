//! Suggestion engine.
//!
//! [`SuggestionEngine`] is the contract the guess controller consumes.
//! [`GuessHelper`] is the built-in implementation: it narrows a candidate list one
//! guess at a time and ranks what is left by expected information.

use std::collections::HashSet;

use crate::feedback::{Pattern, WORD_LENGTH};
use crate::wordbank::{WordFrequencies, WordLists};
use crate::{debug_log, info_log};

const PATTERN_COUNT: usize = 3usize.pow(WORD_LENGTH as u32);

/// Everything the controller needs from a solver. Words are lowercase.
pub trait SuggestionEngine {
    /// Ranked suggestions for the first row.
    fn opening_suggestions(&self) -> Vec<String>;

    /// Record `guess` with `pattern` and return the candidates consistent with all
    /// feedback so far, best first. The guess is recorded even when the result is empty.
    fn suggested_words(&mut self, guess: &str, pattern: &Pattern) -> Vec<String>;

    /// Ranked candidates for the current history.
    fn suggestions(&self) -> Vec<String>;

    /// Committed guesses, oldest first.
    fn guesses(&self) -> Vec<String>;

    /// Drop the last recorded guess. No-op when nothing has been guessed.
    fn undo_last_guess(&mut self);

    fn reset(&mut self);

    fn is_valid_guess(&self, word: &str) -> bool;
}

/// Which end of the ranking is offered first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankingMode {
    /// Most informative guess first.
    #[default]
    Normal,
    /// Least informative guess first.
    Dumb,
}

impl RankingMode {
    fn apply(self, mut ranked: Vec<String>) -> Vec<String> {
        if self == Self::Dumb {
            ranked.reverse();
        }
        ranked
    }
}

/// Optional inputs for [`GuessHelper::configured`].
#[derive(Debug, Clone, Default)]
pub struct HelperConfig {
    pub frequencies: WordFrequencies,
    pub mode: RankingMode,
    /// Precomputed opening ranking in [`RankingMode::Normal`] order, e.g. from the cache.
    pub opening: Option<Vec<String>>,
}

/// Candidate-list narrowing engine.
///
/// `levels[0]` is the full candidate list; each recorded guess pushes the subset
/// consistent with its pattern, so `levels.len() == guesses.len() + 1` always holds.
#[derive(Debug, Clone)]
pub struct GuessHelper {
    allowed: HashSet<String>,
    guesses: Vec<String>,
    levels: Vec<Vec<String>>,
    opening: Vec<String>,
    frequencies: WordFrequencies,
    mode: RankingMode,
}

impl GuessHelper {
    #[must_use]
    pub fn new(lists: WordLists) -> Self {
        Self::configured(lists, HelperConfig::default())
    }

    /// Build with a precomputed opening ranking, e.g. one read from the cache.
    #[must_use]
    pub fn with_opening(lists: WordLists, opening: Vec<String>) -> Self {
        Self::configured(
            lists,
            HelperConfig {
                opening: Some(opening),
                ..HelperConfig::default()
            },
        )
    }

    #[must_use]
    pub fn configured(lists: WordLists, config: HelperConfig) -> Self {
        info_log!(
            "GuessHelper: {} candidates, {} allowed guesses, {} frequencies, {:?} mode",
            lists.candidates.len(),
            lists.allowed.len(),
            config.frequencies.len(),
            config.mode
        );
        let opening = config
            .opening
            .unwrap_or_else(|| rank_by_entropy(&lists.candidates, &config.frequencies));
        Self {
            allowed: lists.allowed,
            guesses: Vec::new(),
            levels: vec![lists.candidates],
            opening,
            frequencies: config.frequencies,
            mode: config.mode,
        }
    }

    #[must_use]
    pub fn candidates(&self) -> &[String] {
        self.levels.last().map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn mode(&self) -> RankingMode {
        self.mode
    }

    fn rank(&self, words: &[String]) -> Vec<String> {
        self.mode.apply(rank_by_entropy(words, &self.frequencies))
    }
}

impl SuggestionEngine for GuessHelper {
    fn opening_suggestions(&self) -> Vec<String> {
        self.mode.apply(self.opening.clone())
    }

    fn suggested_words(&mut self, guess: &str, pattern: &Pattern) -> Vec<String> {
        let guess = guess.to_ascii_lowercase();
        let remaining: Vec<String> = self
            .candidates()
            .iter()
            .filter(|answer| Pattern::score(&guess, answer) == *pattern)
            .cloned()
            .collect();
        debug_log!(
            "suggested_words({}, {}) - {} -> {} candidates",
            guess,
            pattern,
            self.candidates().len(),
            remaining.len()
        );
        let ranked = self.rank(&remaining);
        self.guesses.push(guess);
        self.levels.push(remaining);
        ranked
    }

    fn suggestions(&self) -> Vec<String> {
        if self.guesses.is_empty() {
            self.opening_suggestions()
        } else {
            self.rank(self.candidates())
        }
    }

    fn guesses(&self) -> Vec<String> {
        self.guesses.clone()
    }

    fn undo_last_guess(&mut self) {
        if self.guesses.pop().is_some() {
            self.levels.pop();
        }
    }

    fn reset(&mut self) {
        self.guesses.clear();
        self.levels.truncate(1);
    }

    fn is_valid_guess(&self, word: &str) -> bool {
        self.allowed.contains(&word.to_ascii_lowercase())
    }
}

/// Shannon entropy, in bits, of the pattern distribution `guess` induces over `answers`.
#[must_use]
pub fn entropy(guess: &str, answers: &[String]) -> f64 {
    if answers.is_empty() {
        return 0.0;
    }
    let mut buckets = [0usize; PATTERN_COUNT];
    for answer in answers {
        buckets[Pattern::score(guess, answer).code()] += 1;
    }
    #[allow(clippy::cast_precision_loss)]
    let total = answers.len() as f64;
    buckets
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Order candidates by how evenly they split the rest.
///
/// Equal entropies go to the more frequent word, then alphabetically.
#[must_use]
pub fn rank_by_entropy(candidates: &[String], frequencies: &WordFrequencies) -> Vec<String> {
    let mut scored: Vec<(f64, f64, &String)> = candidates
        .iter()
        .map(|guess| (entropy(guess, candidates), frequencies.get(guess), guess))
        .collect();
    scored.sort_by(|a, b| {
        b.0.total_cmp(&a.0)
            .then_with(|| b.1.total_cmp(&a.1))
            .then_with(|| a.2.cmp(b.2))
    });
    scored.into_iter().map(|(_, _, word)| word.clone()).collect()
}
