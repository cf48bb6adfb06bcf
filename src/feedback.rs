use std::fmt;

pub const WORD_LENGTH: usize = 5;

/// Per-letter feedback colour.
///
/// Tags form a cycle `Grey -> Yellow -> Green -> Grey`; an unset cell is `Grey`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum FeedbackTag {
    #[default]
    Grey,
    Yellow,
    Green,
}

impl FeedbackTag {
    pub const ALL: [Self; 3] = [Self::Grey, Self::Yellow, Self::Green];

    #[must_use]
    pub fn cycle(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Cycle `n` times. Equivalent to cycling `n % 3` times.
    #[must_use]
    pub fn cycle_n(self, n: usize) -> Self {
        Self::ALL[(self.index() + n % Self::ALL.len()) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        match self {
            Self::Grey => 0,
            Self::Yellow => 1,
            Self::Green => 2,
        }
    }

    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'X' | '-' | '.' => Some(Self::Grey),
            'Y' => Some(Self::Yellow),
            'G' => Some(Self::Green),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_char(self) -> char {
        match self {
            Self::Grey => 'X',
            Self::Yellow => 'Y',
            Self::Green => 'G',
        }
    }

    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Grey => "⬜",
            Self::Yellow => "🟨",
            Self::Green => "🟩",
        }
    }
}

impl fmt::Display for FeedbackTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Grey => "grey",
            Self::Yellow => "yellow",
            Self::Green => "green",
        };
        f.write_str(name)
    }
}

/// The five tags of one row, in column order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Pattern(pub [FeedbackTag; WORD_LENGTH]);

impl Pattern {
    pub const SOLVED: Self = Self([FeedbackTag::Green; WORD_LENGTH]);

    #[must_use]
    pub fn is_solved(&self) -> bool {
        *self == Self::SOLVED
    }

    #[must_use]
    pub fn tags(&self) -> &[FeedbackTag; WORD_LENGTH] {
        &self.0
    }

    /// Parse `GYXXG`-style text. Returns `None` unless exactly five valid characters.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let tags: Vec<FeedbackTag> = text
            .trim()
            .chars()
            .map(FeedbackTag::from_char)
            .collect::<Option<_>>()?;
        let tags: [FeedbackTag; WORD_LENGTH] = tags.try_into().ok()?;
        Some(Self(tags))
    }

    /// Pattern a guess would receive against a known answer.
    ///
    /// Greens are assigned first; a letter is yellow only while the answer still has
    /// unclaimed copies of it. Positions missing from a short `guess` or `answer`
    /// score grey.
    #[must_use]
    pub fn score(guess: &str, answer: &str) -> Self {
        let guess = guess.as_bytes();
        let answer = answer.as_bytes();
        let mut tags = [FeedbackTag::Grey; WORD_LENGTH];
        let mut remaining = [0u8; 26];

        for (i, tag) in tags.iter_mut().enumerate() {
            match (guess.get(i), answer.get(i)) {
                (Some(g), Some(a)) if g.eq_ignore_ascii_case(a) => *tag = FeedbackTag::Green,
                (_, Some(&a)) => remaining[letter_slot(a)] += 1,
                _ => {}
            }
        }
        for (i, tag) in tags.iter_mut().enumerate() {
            if *tag == FeedbackTag::Green {
                continue;
            }
            let Some(&g) = guess.get(i) else {
                continue;
            };
            let slot = letter_slot(g);
            if remaining[slot] > 0 {
                *tag = FeedbackTag::Yellow;
                remaining[slot] -= 1;
            }
        }
        Self(tags)
    }

    /// Base-3 encoding in `0..243`, first column least significant.
    #[must_use]
    pub fn code(&self) -> usize {
        self.0
            .iter()
            .rev()
            .fold(0, |acc, tag| acc * FeedbackTag::ALL.len() + tag.index())
    }
}

fn letter_slot(b: u8) -> usize {
    usize::from(b.to_ascii_lowercase().wrapping_sub(b'a')) % 26
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tag in self.0 {
            write!(f, "{}", tag.to_char())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use FeedbackTag::{Green, Grey, Yellow};

    #[test]
    fn test_cycle_order() {
        assert_eq!(Grey.cycle(), Yellow);
        assert_eq!(Yellow.cycle(), Green);
        assert_eq!(Green.cycle(), Grey);
    }

    #[test]
    fn test_cycle_n_is_mod_three() {
        for tag in FeedbackTag::ALL {
            for n in 0..10 {
                let mut stepped = tag;
                for _ in 0..n {
                    stepped = stepped.cycle();
                }
                assert_eq!(stepped, tag.cycle_n(n));
                assert_eq!(tag.cycle_n(n), tag.cycle_n(n % 3));
            }
        }
    }

    #[test]
    fn test_default_is_grey() {
        assert_eq!(FeedbackTag::default(), Grey);
        assert_eq!(Pattern::default(), Pattern([Grey; 5]));
    }

    #[test]
    fn test_parse_pattern() {
        assert_eq!(
            Pattern::parse("GYXXG"),
            Some(Pattern([Green, Yellow, Grey, Grey, Green]))
        );
        assert_eq!(Pattern::parse("gy-.g"), Some(Pattern([Green, Yellow, Grey, Grey, Green])));
        assert_eq!(Pattern::parse("GYXX"), None);
        assert_eq!(Pattern::parse("GYXXGG"), None);
        assert_eq!(Pattern::parse("GYXXA"), None);
    }

    #[test]
    fn test_score_basic() {
        assert_eq!(Pattern::score("crane", "crane"), Pattern::SOLVED);
        assert_eq!(Pattern::score("crane", "slate").to_string(), "XXGXG");
        assert_eq!(Pattern::score("RAISE", "arise").to_string(), "YYGGG");
    }

    #[test]
    fn test_score_repeated_letters() {
        assert_eq!(Pattern::score("speed", "creep").to_string(), "XYGGX");
        // The answer has a single E, already claimed by the green.
        assert_eq!(Pattern::score("eerie", "tepid").to_string(), "XGXGX");
        assert_eq!(Pattern::score("llama", "hello").to_string(), "YYXXX");
    }

    #[test]
    fn test_score_tolerates_wrong_lengths() {
        assert_eq!(Pattern::score("cra", "crane").to_string(), "GGGXX");
        assert_eq!(Pattern::score("crane", "cr").to_string(), "GGXXX");
        assert_eq!(Pattern::score("", "crane"), Pattern::default());
        assert_eq!(Pattern::score("cranes", "crane"), Pattern::SOLVED);
    }

    #[test]
    fn test_code_is_unique_and_in_range() {
        assert_eq!(Pattern::default().code(), 0);
        assert_eq!(Pattern::SOLVED.code(), 242);
        assert_eq!(Pattern::parse("YXXXX").unwrap().code(), 1);
        assert_eq!(Pattern::parse("XYXXX").unwrap().code(), 3);
        let mut seen = std::collections::HashSet::new();
        for a in FeedbackTag::ALL {
            for b in FeedbackTag::ALL {
                for c in FeedbackTag::ALL {
                    for d in FeedbackTag::ALL {
                        for e in FeedbackTag::ALL {
                            let code = Pattern([a, b, c, d, e]).code();
                            assert!(code < 243);
                            assert!(seen.insert(code));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Green.to_string(), "green");
        assert_eq!(Pattern::SOLVED.to_string(), "GGGGG");
        assert!(Pattern::SOLVED.is_solved());
    }
}
