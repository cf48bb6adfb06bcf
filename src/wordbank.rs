use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::feedback::WORD_LENGTH;

/// Wordle answer list, the candidate answers shipped with the binary.
pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

/// Extra words accepted as guesses but never suggested.
pub const EMBEDDED_ALLOWED: &str = include_str!("resources/allowed.txt");

#[must_use]
pub fn is_valid_word(word: &str) -> bool {
    word.len() == WORD_LENGTH && word.chars().all(|c| c.is_ascii_alphabetic())
}

fn normalise(line: &str) -> Option<String> {
    let word = line.trim().to_ascii_lowercase();
    is_valid_word(&word).then_some(word)
}

/// Parse a newline-delimited list, keeping five-letter alphabetic words in lowercase.
/// Duplicates are dropped; first occurrence wins.
#[must_use]
pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    data.lines()
        .filter_map(normalise)
        .filter(|word| seen.insert(word.clone()))
        .collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut seen = HashSet::new();
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = normalise(&line?)
            && seen.insert(word.clone())
        {
            words.push(word);
        }
    }
    Ok(words)
}

/// Candidate list and allowed-guess set the engine is built from.
#[derive(Debug, Clone)]
pub struct WordLists {
    pub candidates: Vec<String>,
    pub allowed: HashSet<String>,
}

impl WordLists {
    /// Every candidate is also an allowed guess.
    #[must_use]
    pub fn new(candidates: Vec<String>, extra_allowed: &[String]) -> Self {
        let allowed = candidates
            .iter()
            .chain(extra_allowed)
            .cloned()
            .collect();
        Self {
            candidates,
            allowed,
        }
    }

    #[must_use]
    pub fn embedded() -> Self {
        Self::new(
            load_wordbank_from_str(EMBEDDED_WORDBANK),
            &load_wordbank_from_str(EMBEDDED_ALLOWED),
        )
    }

    /// Load from optional override files, falling back to the embedded lists.
    pub fn load(candidates_path: Option<&Path>, allowed_path: Option<&Path>) -> io::Result<Self> {
        let candidates = match candidates_path {
            Some(path) => load_wordbank_from_file(path)?,
            None => load_wordbank_from_str(EMBEDDED_WORDBANK),
        };
        if candidates.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "word bank contains no five-letter words",
            ));
        }
        let extra = match allowed_path {
            Some(path) => load_wordbank_from_file(path)?,
            None => load_wordbank_from_str(EMBEDDED_ALLOWED),
        };
        Ok(Self::new(candidates, &extra))
    }
}

/// Relative word frequencies used to break ranking ties. Unknown words count as zero.
#[derive(Debug, Clone, Default)]
pub struct WordFrequencies(HashMap<String, f64>);

impl WordFrequencies {
    #[must_use]
    pub fn get(&self, word: &str) -> f64 {
        self.0.get(word).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for WordFrequencies {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn parse_frequency_line(line: &str) -> Option<(String, f64)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let mut fields = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|field| !field.is_empty());
    let word = normalise(fields.next()?)?;
    let value = fields.next()?.parse::<f64>().ok().filter(|v| v.is_finite())?;
    if fields.next().is_some() {
        return None;
    }
    Some((word, value))
}

/// Parse `word frequency` lines (space or comma separated).
/// Blank lines, `#` comments and malformed lines are skipped; later entries win.
#[must_use]
pub fn load_frequencies_from_str(data: &str) -> WordFrequencies {
    data.lines().filter_map(parse_frequency_line).collect()
}

pub fn load_frequencies_from_file<P: AsRef<Path>>(path: P) -> io::Result<WordFrequencies> {
    let data = fs::read_to_string(path)?;
    Ok(load_frequencies_from_str(&data))
}
