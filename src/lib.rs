// Library interface for wordle-assist
// This allows integration tests to access internal modules

pub mod board;
pub mod cli;
pub mod controller;
pub mod engine;
pub mod feedback;
pub mod guess;
pub mod logging;
pub mod settings;
pub mod simulate;
pub mod tui;
pub mod wordbank;

// Re-export commonly used types for easier testing
pub use board::{Board, MAX_ROWS, Row, RowState, SubmittedGuess};
pub use controller::{GameState, GuessController, Phase, SubmitError, SubmitOutcome};
pub use engine::{GuessHelper, HelperConfig, RankingMode, SuggestionEngine};
pub use feedback::{FeedbackTag, Pattern, WORD_LENGTH};
pub use guess::ActiveGuess;
pub use simulate::{GameRecord, SimulationReport};
pub use wordbank::{
    WordFrequencies, WordLists, load_frequencies_from_file, load_wordbank_from_file,
    load_wordbank_from_str,
};
