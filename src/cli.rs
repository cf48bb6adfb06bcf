use clap::Parser;
use std::path::PathBuf;

/// Wordle assistant: type your guess, mark the colours, get the remaining candidates.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited list of candidate answers
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<PathBuf>,

    /// Path to a newline-delimited list of extra words accepted as guesses
    #[arg(short = 'a', long = "allowed")]
    pub allowed_path: Option<PathBuf>,

    /// Write the log here instead of the user data directory
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Show the help popup on startup again
    #[arg(long = "reset-help")]
    pub reset_help: bool,

    /// Recompute the opening suggestions instead of reading the cache
    #[arg(long = "no-cache")]
    pub no_cache: bool,

    /// Path to `word frequency` lines; frequent words win ranking ties
    #[arg(short = 'f', long = "frequencies")]
    pub frequencies_path: Option<PathBuf>,

    /// Suggest the least informative guesses first
    #[arg(long = "dumb")]
    pub dumb: bool,

    /// Play every candidate answer with the top suggestion and print the results
    #[arg(long = "simulate")]
    pub simulate: bool,

    /// Simulate only this answer
    #[arg(long = "answer", requires = "simulate")]
    pub answer: Option<String>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_cli_no_args() {
        let cli = Cli::try_parse_from(["wordle-assist"]).unwrap();
        assert_eq!(cli.wordbank_path, None);
        assert_eq!(cli.allowed_path, None);
        assert!(!cli.reset_help);
        assert!(!cli.no_cache);
        assert_eq!(cli.frequencies_path, None);
        assert!(!cli.dumb);
        assert!(!cli.simulate);
        assert_eq!(cli.answer, None);
    }

    #[test]
    fn test_parse_cli_simulation_options() {
        let cli = Cli::try_parse_from([
            "wordle-assist",
            "--simulate",
            "--dumb",
            "--answer",
            "cigar",
            "-f",
            "freq.txt",
        ])
        .unwrap();
        assert!(cli.simulate);
        assert!(cli.dumb);
        assert_eq!(cli.answer.as_deref(), Some("cigar"));
        assert_eq!(cli.frequencies_path, Some(PathBuf::from("freq.txt")));
    }

    #[test]
    fn test_answer_requires_simulate() {
        assert!(Cli::try_parse_from(["wordle-assist", "--answer", "cigar"]).is_err());
    }

    #[test]
    fn test_parse_cli_with_paths() {
        let cli = Cli::try_parse_from([
            "wordle-assist",
            "-i",
            "words.txt",
            "--allowed",
            "extra.txt",
            "--log-file",
            "/tmp/app.log",
            "--reset-help",
            "--no-cache",
        ])
        .unwrap();
        assert_eq!(cli.wordbank_path, Some(PathBuf::from("words.txt")));
        assert_eq!(cli.allowed_path, Some(PathBuf::from("extra.txt")));
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/app.log")));
        assert!(cli.reset_help);
        assert!(cli.no_cache);
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["wordle-assist", "--bogus"]).is_err());
    }
}
