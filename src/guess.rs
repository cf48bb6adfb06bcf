use crate::feedback::{FeedbackTag, Pattern, WORD_LENGTH};

/// The word being typed on the active row, plus the tag of each of its five columns.
///
/// Tags are independent of how many letters are typed: a column can be tagged
/// before its letter exists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActiveGuess {
    letters: Vec<char>,
    tags: [FeedbackTag; WORD_LENGTH],
}

impl ActiveGuess {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Guess seeded with a suggested word and all-grey tags.
    #[must_use]
    pub fn seeded(word: &str) -> Self {
        let mut guess = Self::new();
        guess.replace_letters(word);
        guess
    }

    #[must_use]
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.letters.len() == WORD_LENGTH
    }

    #[must_use]
    pub fn letter(&self, column: usize) -> Option<char> {
        self.letters.get(column).copied()
    }

    /// Uppercase form, as shown on the board.
    #[must_use]
    pub fn word(&self) -> String {
        self.letters.iter().collect()
    }

    #[must_use]
    pub fn tags(&self) -> &[FeedbackTag; WORD_LENGTH] {
        &self.tags
    }

    #[must_use]
    pub fn pattern(&self) -> Pattern {
        Pattern(self.tags)
    }

    /// Append a letter. Returns `false` when the guess is full or `ch` is not A-Z.
    pub fn push(&mut self, ch: char) -> bool {
        if !ch.is_ascii_alphabetic() || self.is_complete() {
            return false;
        }
        self.letters.push(ch.to_ascii_uppercase());
        true
    }

    pub fn pop(&mut self) -> Option<char> {
        self.letters.pop()
    }

    /// Replace the letters wholesale, keeping the tags.
    ///
    /// Non-letters are dropped and the result is truncated to five letters.
    pub fn replace_letters(&mut self, word: &str) {
        self.letters = word
            .chars()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_uppercase())
            .take(WORD_LENGTH)
            .collect();
    }

    /// Advance the tag of one column. Returns the new tag, or `None` for an out-of-range column.
    pub fn cycle_tag(&mut self, column: usize) -> Option<FeedbackTag> {
        let tag = self.tags.get_mut(column)?;
        *tag = tag.cycle();
        Some(*tag)
    }
}
