//! Derived board view.
//!
//! The board is never stored: it is rebuilt from the submitted guesses and the
//! active guess whenever the UI needs it, so the row states cannot drift from the
//! controller's history.

use crate::feedback::{FeedbackTag, Pattern, WORD_LENGTH};
use crate::guess::ActiveGuess;

pub const MAX_ROWS: usize = 6;

/// A committed guess. Never mutated after it is appended to the history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmittedGuess {
    word: String,
    pattern: Pattern,
}

impl SubmittedGuess {
    #[must_use]
    pub fn new(word: &str, pattern: Pattern) -> Self {
        Self {
            word: word.to_ascii_uppercase(),
            pattern,
        }
    }

    /// Uppercase word.
    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    #[must_use]
    pub fn pattern(&self) -> Pattern {
        self.pattern
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowState<'a> {
    Submitted(&'a SubmittedGuess),
    Active(&'a ActiveGuess),
    Pending,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Row<'a> {
    pub index: usize,
    pub state: RowState<'a>,
}

/// One rendered cell: a letter (or blank) and its tag. Pending cells carry no tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub letter: Option<char>,
    pub tag: Option<FeedbackTag>,
}

impl Row<'_> {
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, RowState::Active(_))
    }

    #[must_use]
    pub fn cells(&self) -> [Cell; WORD_LENGTH] {
        let mut cells = [Cell {
            letter: None,
            tag: None,
        }; WORD_LENGTH];
        match self.state {
            RowState::Submitted(guess) => {
                for (i, (letter, tag)) in guess.word.chars().zip(guess.pattern.0).enumerate() {
                    cells[i] = Cell {
                        letter: Some(letter),
                        tag: Some(tag),
                    };
                }
            }
            RowState::Active(guess) => {
                for (i, cell) in cells.iter_mut().enumerate() {
                    *cell = Cell {
                        letter: guess.letter(i),
                        tag: Some(guess.tags()[i]),
                    };
                }
            }
            RowState::Pending => {}
        }
        cells
    }
}

/// Borrowed view over a game: fixed `MAX_ROWS` rows, row `submitted.len()` is active.
#[derive(Clone, Copy, Debug)]
pub struct Board<'a> {
    submitted: &'a [SubmittedGuess],
    active: &'a ActiveGuess,
}

impl<'a> Board<'a> {
    #[must_use]
    pub fn new(submitted: &'a [SubmittedGuess], active: &'a ActiveGuess) -> Self {
        debug_assert!(submitted.len() <= MAX_ROWS);
        Self { submitted, active }
    }

    #[must_use]
    pub fn submitted_count(&self) -> usize {
        self.submitted.len()
    }

    /// Index of the row accepting input, `None` once every row is submitted.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        active_row_index(self.submitted.len())
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.active_index().is_none()
    }

    #[must_use]
    pub fn row(&self, index: usize) -> Option<Row<'a>> {
        if index >= MAX_ROWS {
            return None;
        }
        let state = if let Some(guess) = self.submitted.get(index) {
            RowState::Submitted(guess)
        } else if Some(index) == self.active_index() {
            RowState::Active(self.active)
        } else {
            RowState::Pending
        };
        Some(Row { index, state })
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'a>> {
        let board = *self;
        (0..MAX_ROWS).filter_map(move |i| board.row(i))
    }
}

/// The single place the active row is derived from the submitted count.
#[must_use]
pub fn active_row_index(submitted_count: usize) -> Option<usize> {
    (submitted_count < MAX_ROWS).then_some(submitted_count)
}
