//! Guess controller: the only component that mutates game state or calls the engine.
//!
//! # State machine
//! `Editing` → submit → (`InvalidWord` shake | `Completed` on all-green | `Loading`).
//! `Loading` → [`GuessController::resolve_pending`] → (`Editing` with a new row |
//! `Editing` unchanged on zero candidates | `Completed` on a single candidate).
//!
//! Exactly one submission can be in flight: it lives inside [`Phase::Loading`], and
//! every input is refused while that phase is set.

use std::fmt;

use crate::board::{Board, SubmittedGuess, active_row_index};
use crate::engine::SuggestionEngine;
use crate::feedback::{FeedbackTag, Pattern};
use crate::guess::ActiveGuess;
use crate::{debug_log, info_log};

pub const NO_CANDIDATES_MESSAGE: &str =
    "No possible answers left! Are you sure you entered all the colours in correctly?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Fewer than five letters typed.
    InvalidLength { len: usize },
    /// Five letters, but not a dictionary word.
    InvalidWord { word: String },
    /// The feedback leaves no possible answer; nothing was committed.
    NoCandidatesRemain,
    /// Every row has already been submitted.
    BoardExhausted,
    /// A submission is already waiting on the engine.
    Busy,
    /// The game has been completed; restart or undo first.
    GameOver,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { len } => write!(f, "guess has {len} letters, expected 5"),
            Self::InvalidWord { word } => write!(f, "'{word}' is not in the word list"),
            Self::NoCandidatesRemain => f.write_str(NO_CANDIDATES_MESSAGE),
            Self::BoardExhausted => f.write_str("no guesses left on the board"),
            Self::Busy => f.write_str("still working on the previous guess"),
            Self::GameOver => f.write_str("the game is already solved"),
        }
    }
}

impl std::error::Error for SubmitError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The engine call is queued. Paint the loading indicator, then call
    /// [`GuessController::resolve_pending`].
    Dispatched,
    /// A new row was committed and the next row is active.
    Committed,
    Won { answer: String },
}

/// A validated guess waiting for the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    word: String,
    pattern: Pattern,
}

impl PendingSubmission {
    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    #[must_use]
    pub fn pattern(&self) -> Pattern {
        self.pattern
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Editing,
    Loading(PendingSubmission),
    /// `row_committed` is false when an all-green guess ended the game without
    /// reaching the engine; the winning guess then still sits in the active row.
    Completed { answer: String, row_committed: bool },
}

/// Snapshot read by the renderer. Only the controller can change it.
#[derive(Debug, Clone)]
pub struct GameState {
    submitted: Vec<SubmittedGuess>,
    active: ActiveGuess,
    suggestions: Vec<String>,
    selected: Option<usize>,
    phase: Phase,
    shake: bool,
    error: Option<String>,
}

impl GameState {
    fn new(suggestions: Vec<String>) -> Self {
        Self {
            submitted: Vec::new(),
            active: ActiveGuess::new(),
            suggestions,
            selected: None,
            phase: Phase::Editing,
            shake: false,
            error: None,
        }
    }

    #[must_use]
    pub fn board(&self) -> Board<'_> {
        Board::new(&self.submitted, &self.active)
    }

    #[must_use]
    pub fn submitted(&self) -> &[SubmittedGuess] {
        &self.submitted
    }

    #[must_use]
    pub fn submitted_count(&self) -> usize {
        self.submitted.len()
    }

    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        active_row_index(self.submitted.len())
    }

    #[must_use]
    pub fn active_guess(&self) -> &ActiveGuess {
        &self.active
    }

    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    #[must_use]
    pub fn selected_suggestion(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading(_))
    }

    #[must_use]
    pub fn completion(&self) -> Option<&str> {
        match &self.phase {
            Phase::Completed { answer, .. } => Some(answer),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn shake_pending(&self) -> bool {
        self.shake
    }

    /// Letters, backspace, tag cycling and suggestion picks are accepted.
    fn accepts_edits(&self) -> bool {
        matches!(self.phase, Phase::Editing) && self.active_index().is_some()
    }
}

pub struct GuessController<E: SuggestionEngine> {
    state: GameState,
    engine: E,
}

impl<E: SuggestionEngine> GuessController<E> {
    pub fn new(engine: E) -> Self {
        let state = GameState::new(engine.opening_suggestions());
        info_log!(
            "GuessController::new() - {} opening suggestions",
            state.suggestions.len()
        );
        Self { state, engine }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn on_letter_key(&mut self, ch: char) -> bool {
        if !self.state.accepts_edits() {
            return false;
        }
        let pushed = self.state.active.push(ch);
        if pushed {
            debug_log!("on_letter_key({}) - now '{}'", ch, self.state.active.word());
        }
        pushed
    }

    pub fn on_backspace(&mut self) -> bool {
        if !self.state.accepts_edits() {
            return false;
        }
        let removed = self.state.active.pop().is_some();
        if removed {
            debug_log!("on_backspace() - now '{}'", self.state.active.word());
        }
        removed
    }

    /// Replace the typed letters with `word`. Tags are left alone.
    pub fn on_suggestion_selected(&mut self, word: &str) -> bool {
        if !self.state.accepts_edits() {
            return false;
        }
        self.state.active.replace_letters(word);
        self.state.selected = self
            .state
            .suggestions
            .iter()
            .position(|s| s.eq_ignore_ascii_case(word));
        debug_log!("on_suggestion_selected({}) - now '{}'", word, self.state.active.word());
        true
    }

    pub fn select_next_suggestion(&mut self) -> bool {
        let len = self.state.suggestions.len();
        if len == 0 {
            return false;
        }
        let next = self.state.selected.map_or(0, |i| (i + 1) % len);
        self.select_suggestion_at(next)
    }

    pub fn select_previous_suggestion(&mut self) -> bool {
        let len = self.state.suggestions.len();
        if len == 0 {
            return false;
        }
        let previous = self.state.selected.map_or(len - 1, |i| (i + len - 1) % len);
        self.select_suggestion_at(previous)
    }

    fn select_suggestion_at(&mut self, index: usize) -> bool {
        match self.state.suggestions.get(index).cloned() {
            Some(word) => self.on_suggestion_selected(&word),
            None => false,
        }
    }

    /// Cycle the tag at (`row`, `column`). Only the active row can be changed.
    pub fn cycle_tag(&mut self, row: usize, column: usize) -> Option<FeedbackTag> {
        if !self.state.accepts_edits() || self.state.active_index() != Some(row) {
            debug_log!("cycle_tag({}, {}) - ignored", row, column);
            return None;
        }
        self.state.active.cycle_tag(column)
    }

    /// Validate the active guess and either finish the game or queue the engine call.
    ///
    /// On [`SubmitOutcome::Dispatched`] the caller owns the yield: show the loading
    /// state, let it paint, then call [`Self::resolve_pending`].
    pub fn submit(&mut self) -> Result<SubmitOutcome, SubmitError> {
        match &self.state.phase {
            Phase::Loading(_) => return Err(SubmitError::Busy),
            Phase::Completed { .. } => return Err(SubmitError::GameOver),
            Phase::Editing => {}
        }
        if self.state.active_index().is_none() {
            return Err(SubmitError::BoardExhausted);
        }
        if !self.state.active.is_complete() {
            return Err(SubmitError::InvalidLength {
                len: self.state.active.len(),
            });
        }

        let word = self.state.active.word().to_ascii_lowercase();
        if !self.engine.is_valid_guess(&word) {
            info_log!("submit() - '{}' rejected, not in word list", word);
            self.state.shake = true;
            return Err(SubmitError::InvalidWord { word });
        }

        let pattern = self.state.active.pattern();
        if pattern.is_solved() {
            info_log!("submit() - '{}' marked all green, game complete", word);
            self.state.phase = Phase::Completed {
                answer: word.clone(),
                row_committed: false,
            };
            return Ok(SubmitOutcome::Won { answer: word });
        }

        info_log!("submit() - dispatching '{}' with {}", word, pattern);
        self.state.phase = Phase::Loading(PendingSubmission { word, pattern });
        Ok(SubmitOutcome::Dispatched)
    }

    /// Run the queued engine call and apply its result. `None` if nothing is queued.
    pub fn resolve_pending(&mut self) -> Option<Result<SubmitOutcome, SubmitError>> {
        if !self.state.is_loading() {
            return None;
        }
        let Phase::Loading(pending) = std::mem::replace(&mut self.state.phase, Phase::Editing)
        else {
            return None;
        };

        let candidates = self
            .engine
            .suggested_words(&pending.word, &pending.pattern);

        if candidates.is_empty() {
            // Keep the engine's history in step with the board.
            self.engine.undo_last_guess();
            info_log!(
                "resolve_pending() - no candidates for '{}' {}, nothing committed",
                pending.word,
                pending.pattern
            );
            self.state.error = Some(NO_CANDIDATES_MESSAGE.to_string());
            return Some(Err(SubmitError::NoCandidatesRemain));
        }

        self.state
            .submitted
            .push(SubmittedGuess::new(&pending.word, pending.pattern));
        self.state.active = ActiveGuess::seeded(&candidates[0]);
        self.state.selected = Some(0);
        self.state.suggestions = candidates;
        info_log!(
            "resolve_pending() - committed '{}' as row {}, {} candidates remain",
            pending.word,
            self.state.submitted.len() - 1,
            self.state.suggestions.len()
        );

        if self.state.suggestions.len() == 1 {
            let answer = self.state.suggestions[0].clone();
            info_log!("resolve_pending() - single candidate '{}', game complete", answer);
            self.state.phase = Phase::Completed {
                answer: answer.clone(),
                row_committed: true,
            };
            return Some(Ok(SubmitOutcome::Won { answer }));
        }
        Some(Ok(SubmitOutcome::Committed))
    }

    /// Submit and, if dispatched, resolve immediately. For callers with nothing to paint.
    pub fn submit_now(&mut self) -> Result<SubmitOutcome, SubmitError> {
        match self.submit()? {
            SubmitOutcome::Dispatched => self
                .resolve_pending()
                .unwrap_or(Ok(SubmitOutcome::Dispatched)),
            outcome => Ok(outcome),
        }
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        match &self.state.phase {
            Phase::Loading(_) => false,
            Phase::Completed {
                row_committed: false,
                ..
            } => true,
            _ => !self.state.submitted.is_empty(),
        }
    }

    /// Pop the last committed row. The reopened row starts empty with grey tags.
    ///
    /// After an all-green win nothing was committed, so undo only reopens the
    /// active row with its letters and tags intact.
    pub fn on_undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        if let Phase::Completed {
            row_committed: false,
            ..
        } = self.state.phase
        {
            self.state.phase = Phase::Editing;
            info_log!("on_undo() - reopened the all-green guess for editing");
            return true;
        }
        self.engine.undo_last_guess();
        let history = self.engine.guesses();
        let keep = history.len().min(self.state.submitted.len() - 1);
        if history.len() != keep {
            log::warn!(
                "on_undo() - engine reports {} guesses, board keeps {}",
                history.len(),
                keep
            );
        }
        self.state.submitted.truncate(keep);
        self.state.active = ActiveGuess::new();
        self.state.suggestions = self.engine.suggestions();
        self.state.selected = None;
        self.state.phase = Phase::Editing;
        self.state.error = None;
        info_log!("on_undo() - {} rows remain", self.state.submitted.len());
        true
    }

    /// Start over: empty board, opening suggestions, signals cleared.
    /// Ignored while a submission is in flight.
    pub fn restart(&mut self) -> bool {
        if self.state.is_loading() {
            return false;
        }
        self.engine.reset();
        self.state = GameState::new(self.engine.opening_suggestions());
        info_log!("restart() - new game");
        true
    }

    pub fn dismiss_error(&mut self) {
        self.state.error = None;
    }

    /// Consume the shake signal.
    pub fn take_shake(&mut self) -> bool {
        std::mem::take(&mut self.state.shake)
    }
}
