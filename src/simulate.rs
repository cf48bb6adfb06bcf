//! Self-play: let an engine solve known answers by always taking its first suggestion.

use std::fmt;

use crate::board::MAX_ROWS;
use crate::engine::SuggestionEngine;
use crate::feedback::Pattern;
use crate::{debug_log, info_log};

/// One simulated game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub answer: String,
    pub guesses: Vec<(String, Pattern)>,
    pub won: bool,
}

impl GameRecord {
    #[must_use]
    pub fn guess_count(&self) -> usize {
        self.guesses.len()
    }
}

impl fmt::Display for GameRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.answer)?;
        for (guess, pattern) in &self.guesses {
            write!(f, " {guess} {pattern}")?;
        }
        if self.won {
            write!(f, " ({})", self.guess_count())
        } else {
            f.write_str(" (failed)")
        }
    }
}

/// Play one game against `answer`, at most `MAX_ROWS` guesses.
///
/// The engine is reset before and after, so it can be reused for the next game.
pub fn play_game<E: SuggestionEngine>(engine: &mut E, answer: &str) -> GameRecord {
    let answer = answer.to_ascii_lowercase();
    engine.reset();
    let mut guesses = Vec::new();
    let mut next = engine.opening_suggestions().into_iter().next();
    let mut won = false;

    while let Some(guess) = next.take() {
        if guesses.len() == MAX_ROWS {
            break;
        }
        let pattern = Pattern::score(&guess, &answer);
        debug_log!("play_game({}) - {} {}", answer, guess, pattern);
        guesses.push((guess.clone(), pattern));
        if pattern.is_solved() {
            won = true;
            break;
        }
        next = engine.suggested_words(&guess, &pattern).into_iter().next();
    }
    engine.reset();

    GameRecord {
        answer,
        guesses,
        won,
    }
}

/// Results of a batch of simulated games.
#[derive(Debug, Clone, Default)]
pub struct SimulationReport {
    pub games: Vec<GameRecord>,
}

impl SimulationReport {
    #[must_use]
    pub fn wins(&self) -> usize {
        self.games.iter().filter(|g| g.won).count()
    }

    #[must_use]
    pub fn losses(&self) -> usize {
        self.games.len() - self.wins()
    }

    /// Mean guesses over won games, `None` if nothing was won.
    #[must_use]
    pub fn average_guesses(&self) -> Option<f64> {
        let wins = self.wins();
        if wins == 0 {
            return None;
        }
        let total: usize = self
            .games
            .iter()
            .filter(|g| g.won)
            .map(GameRecord::guess_count)
            .sum();
        #[allow(clippy::cast_precision_loss)]
        let average = total as f64 / wins as f64;
        Some(average)
    }

    /// Won games by guess count; index 0 is a first-guess win.
    #[must_use]
    pub fn distribution(&self) -> [usize; MAX_ROWS] {
        let mut counts = [0; MAX_ROWS];
        for game in self.games.iter().filter(|g| g.won) {
            if let Some(slot) = game.guess_count().checked_sub(1)
                && let Some(count) = counts.get_mut(slot)
            {
                *count += 1;
            }
        }
        counts
    }

    pub fn failures(&self) -> impl Iterator<Item = &GameRecord> {
        self.games.iter().filter(|g| !g.won)
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let played = self.games.len();
        #[allow(clippy::cast_precision_loss)]
        let rate = if played == 0 {
            0.0
        } else {
            self.wins() as f64 * 100.0 / played as f64
        };
        writeln!(f, "Played {played} games, won {} ({rate:.1}%)", self.wins())?;
        match self.average_guesses() {
            Some(avg) => writeln!(f, "Average guesses per win: {avg:.3}")?,
            None => writeln!(f, "Average guesses per win: -")?,
        }
        for (i, count) in self.distribution().iter().enumerate() {
            writeln!(f, "  {}: {count}", i + 1)?;
        }
        for game in self.failures() {
            writeln!(f, "  failed {game}")?;
        }
        Ok(())
    }
}

/// Play every answer in turn.
pub fn simulate<E: SuggestionEngine>(engine: &mut E, answers: &[String]) -> SimulationReport {
    info_log!("simulate() - playing {} games", answers.len());
    let games: Vec<GameRecord> = answers
        .iter()
        .map(|answer| play_game(engine, answer))
        .collect();
    let report = SimulationReport { games };
    info_log!(
        "simulate() - won {} of {}",
        report.wins(),
        report.games.len()
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{GuessHelper, HelperConfig, RankingMode};
    use crate::wordbank::{WordLists, load_wordbank_from_str};

    fn helper(words: &str, mode: RankingMode) -> GuessHelper {
        GuessHelper::configured(
            WordLists::new(load_wordbank_from_str(words), &[]),
            HelperConfig {
                mode,
                ..HelperConfig::default()
            },
        )
    }

    const WORDS: &str = "crane\nslate\ntrace\nbrain\nghost\nplumb\nfizzy\nwordy";

    #[test]
    fn test_play_game_solves_and_resets() {
        let mut engine = helper(WORDS, RankingMode::Normal);
        let record = play_game(&mut engine, "GHOST");
        assert!(record.won);
        assert_eq!(record.answer, "ghost");
        let (last, pattern) = record.guesses.last().unwrap();
        assert_eq!(last, "ghost");
        assert!(pattern.is_solved());
        assert!(record.guess_count() <= MAX_ROWS);
        assert!(engine.guesses().is_empty());
    }

    #[test]
    fn test_first_guess_follows_opening() {
        let mut engine = helper(WORDS, RankingMode::Normal);
        let opening = engine.opening_suggestions();
        let record = play_game(&mut engine, &opening[0]);
        assert_eq!(record.guess_count(), 1);
        assert!(record.won);
    }

    #[test]
    fn test_every_answer_is_found() {
        let mut engine = helper(WORDS, RankingMode::Normal);
        let answers = load_wordbank_from_str(WORDS);
        let report = simulate(&mut engine, &answers);
        assert_eq!(report.games.len(), answers.len());
        assert_eq!(report.wins(), answers.len());
        assert_eq!(report.losses(), 0);
        assert_eq!(report.distribution().iter().sum::<usize>(), answers.len());
        assert!(report.average_guesses().unwrap() >= 1.0);
        assert_eq!(report.failures().count(), 0);
    }

    #[test]
    fn test_dumb_mode_still_terminates() {
        let mut engine = helper(WORDS, RankingMode::Dumb);
        let answers = load_wordbank_from_str(WORDS);
        let report = simulate(&mut engine, &answers);
        assert_eq!(report.games.len(), answers.len());
        assert!(report.games.iter().all(|g| g.guess_count() <= MAX_ROWS));
    }

    #[test]
    fn test_loss_when_engine_never_finds_answer() {
        let mut engine = helper("aaaaa\nbbbbb", RankingMode::Normal);
        let record = play_game(&mut engine, "zzzzz");
        assert!(!record.won);
        assert!(record.to_string().ends_with("(failed)"));
        let report = SimulationReport {
            games: vec![record],
        };
        assert_eq!(report.losses(), 1);
        assert_eq!(report.average_guesses(), None);
        assert!(report.to_string().contains("won 0 (0.0%)"));
    }

    #[test]
    fn test_report_display() {
        let mut engine = helper(WORDS, RankingMode::Normal);
        let report = simulate(&mut engine, &load_wordbank_from_str("ghost\nbrain"));
        let text = report.to_string();
        assert!(text.starts_with("Played 2 games, won 2 (100.0%)"));
        assert!(text.contains("Average guesses per win"));
    }
}
