use std::process::ExitCode;

use wordle_assist::cli::parse_cli;
use wordle_assist::engine::{GuessHelper, HelperConfig, RankingMode, rank_by_entropy};
use wordle_assist::logging::init_logging;
use wordle_assist::settings::Settings;
use wordle_assist::simulate::{play_game, simulate};
use wordle_assist::tui::{self, App};
use wordle_assist::wordbank::{WordFrequencies, WordLists, load_frequencies_from_file};
use wordle_assist::{GuessController, info_log};

fn main() -> ExitCode {
    let cli = parse_cli();
    let settings = Settings::from_data_dir();

    let log_path = cli.log_file.clone().or_else(|| settings.log_path());
    if let Err(e) = init_logging(log_path.as_deref()) {
        eprintln!("Logging disabled: {e}");
    }

    if cli.reset_help
        && let Err(e) = settings.forget_help_seen()
    {
        eprintln!("Failed to reset help flag: {e}");
    }

    let lists = match WordLists::load(cli.wordbank_path.as_deref(), cli.allowed_path.as_deref()) {
        Ok(lists) => lists,
        Err(e) => {
            eprintln!("Failed to load word lists: {e}");
            return ExitCode::FAILURE;
        }
    };
    info_log!("Loaded {} candidate words", lists.candidates.len());

    let frequencies = match cli.frequencies_path.as_deref() {
        Some(path) => match load_frequencies_from_file(path) {
            Ok(freqs) => freqs,
            Err(e) => {
                eprintln!("Failed to load frequencies from '{}': {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => WordFrequencies::default(),
    };

    // The cache holds the frequency-free ranking only.
    let use_cache = !cli.no_cache && frequencies.is_empty();
    let cached = if use_cache {
        settings.read_opening_words(&lists.candidates)
    } else {
        None
    };
    let opening = match cached {
        Some(words) => words,
        None => {
            println!("Ranking {} opening words, please wait...", lists.candidates.len());
            let words = rank_by_entropy(&lists.candidates, &frequencies);
            if use_cache && let Err(e) = settings.write_opening_words(&words) {
                log::warn!("Could not cache opening words: {e}");
            }
            words
        }
    };

    let mode = if cli.dumb {
        RankingMode::Dumb
    } else {
        RankingMode::Normal
    };
    let answers = lists.candidates.clone();
    let mut engine = GuessHelper::configured(
        lists,
        HelperConfig {
            frequencies,
            mode,
            opening: Some(opening),
        },
    );

    if cli.simulate {
        match cli.answer.as_deref().map(str::to_ascii_lowercase) {
            Some(answer) => {
                if !answers.contains(&answer) {
                    eprintln!("'{answer}' is not in the word list");
                    return ExitCode::FAILURE;
                }
                println!("{}", play_game(&mut engine, &answer));
            }
            None => print!("{}", simulate(&mut engine, &answers)),
        }
        return ExitCode::SUCCESS;
    }

    let mut app = App::new(GuessController::new(engine), settings);
    if let Err(e) = tui::run(&mut app) {
        eprintln!("Terminal error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
