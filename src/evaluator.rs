/// Per-letter result of comparing a guess with the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// Right letter, right position (green)
    Correct,
    /// Letter is in the target somewhere else (yellow)
    Present,
    /// Letter is not in the target, or every copy is already accounted for (gray)
    Absent,
}

impl Feedback {
    #[must_use]
    pub fn to_char(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::Present => 'Y',
            Self::Absent => 'X',
        }
    }
}

/// Scores `guess` against `target`, one tag per guess letter.
///
/// Exact matches are taken first and remove their target letter from play, so
/// a repeated guess letter can never be marked more times than the target
/// contains it. Comparison ignores ASCII case. Both words are expected to have
/// the same length; extra letters in a longer guess are marked `Absent`.
#[must_use]
pub fn evaluate(target: &str, guess: &str) -> Vec<Feedback> {
    let guess_chars: Vec<char> = guess.chars().map(|c| c.to_ascii_lowercase()).collect();
    // `None` marks a target letter already matched
    let mut remaining: Vec<Option<char>> = target
        .chars()
        .map(|c| Some(c.to_ascii_lowercase()))
        .collect();
    let mut feedback = vec![Feedback::Absent; guess_chars.len()];

    // First pass: greens
    for (i, &g) in guess_chars.iter().enumerate() {
        if remaining.get(i).copied().flatten() == Some(g) {
            feedback[i] = Feedback::Correct;
            remaining[i] = None;
        }
    }

    // Second pass: yellows
    for (i, &g) in guess_chars.iter().enumerate() {
        if feedback[i] == Feedback::Correct {
            continue;
        }
        if let Some(pos) = remaining.iter().position(|&c| c == Some(g)) {
            feedback[i] = Feedback::Present;
            remaining[pos] = None;
        }
    }

    feedback
}

#[must_use]
pub fn is_solved(feedback: &[Feedback]) -> bool {
    !feedback.is_empty() && feedback.iter().all(|&f| f == Feedback::Correct)
}

/// Renders feedback as a `G`/`Y`/`X` string, handy for logs and tests.
#[must_use]
pub fn feedback_string(feedback: &[Feedback]) -> String {
    feedback.iter().map(|f| f.to_char()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use Feedback::{Absent, Correct, Present};

    fn count_marked(target: &str, guess: &str, letter: char) -> usize {
        guess
            .chars()
            .zip(evaluate(target, guess))
            .filter(|&(c, f)| c == letter && f != Absent)
            .count()
    }

    #[test]
    fn test_same_word_is_all_correct() {
        for word in ["light", "sassy", "jinx", "planet"] {
            let fb = evaluate(word, word);
            assert_eq!(fb.len(), word.len());
            assert!(is_solved(&fb));
        }
    }

    #[test]
    fn test_disjoint_letters_are_all_absent() {
        assert_eq!(evaluate("light", "curve"), vec![Absent; 5]);
        assert_eq!(evaluate("jinx", "bolt"), vec![Absent; 4]);
    }

    #[test]
    fn test_right_against_light() {
        assert_eq!(
            evaluate("light", "right"),
            vec![Absent, Correct, Correct, Correct, Correct]
        );
    }

    #[test]
    fn test_sassy_assay() {
        // sassy: s a s s y / assay: a s s a y
        let fb = evaluate("sassy", "assay");
        assert_eq!(fb, vec![Present, Present, Correct, Absent, Correct]);
        // Both guess 's' are marked; only one of the two 'a' can be
        assert_eq!(count_marked("sassy", "assay", 's'), 2);
        assert_eq!(count_marked("sassy", "assay", 'a'), 1);
    }

    #[test]
    fn test_repeated_guess_letter_not_over_claimed() {
        // "stone" has a single 'e', taken by the final position
        let fb = evaluate("stone", "geese");
        assert_eq!(fb, vec![Absent, Absent, Absent, Present, Correct]);

        let fb = evaluate("creep", "speed");
        assert_eq!(fb, vec![Absent, Present, Correct, Correct, Absent]);
    }

    #[test]
    fn test_present_consumes_leftmost_unmatched() {
        let fb = evaluate("abbey", "kebab");
        assert_eq!(fb, vec![Absent, Present, Correct, Present, Present]);
        assert_eq!(count_marked("abbey", "kebab", 'b'), 2);
    }

    #[test]
    fn test_letter_counts_never_exceed_target() {
        let pairs = [
            ("sassy", "assay"),
            ("sassy", "sssss"),
            ("occur", "cocoa"),
            ("apple", "papal"),
            ("fizz", "zizz"),
        ];
        for (target, guess) in pairs {
            for letter in guess.chars() {
                let in_target = target.chars().filter(|&c| c == letter).count();
                assert!(
                    count_marked(target, guess, letter) <= in_target,
                    "{guess} vs {target} over-claims '{letter}'"
                );
            }
        }
    }

    fn all_words(alphabet: &[char], len: usize) -> Vec<String> {
        let mut words = vec![String::new()];
        for _ in 0..len {
            words = words
                .iter()
                .flat_map(|w| alphabet.iter().map(move |&c| format!("{w}{c}")))
                .collect();
        }
        words
    }

    #[test]
    fn test_every_short_pair_marks_exactly_the_shared_letters() {
        let alphabet = ['a', 'b', 'c'];
        let words = all_words(&alphabet, 3);
        assert_eq!(words.len(), 27);

        for target in &words {
            for guess in &words {
                let fb = evaluate(target, guess);
                assert_eq!(fb.len(), 3);

                for ((g, t), f) in guess.chars().zip(target.chars()).zip(&fb) {
                    assert_eq!(
                        *f == Correct,
                        g == t,
                        "{guess} vs {target}: green must mean same position"
                    );
                }

                for letter in alphabet {
                    let in_target = target.chars().filter(|&c| c == letter).count();
                    let in_guess = guess.chars().filter(|&c| c == letter).count();
                    assert_eq!(
                        count_marked(target, guess, letter),
                        in_target.min(in_guess),
                        "{guess} vs {target} mis-marks '{letter}'"
                    );
                }
            }
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(evaluate("LIGHT", "right"), evaluate("light", "RIGHT"));
        assert!(is_solved(&evaluate("Light", "lIGHT")));
    }

    #[test]
    fn test_feedback_string() {
        assert_eq!(feedback_string(&evaluate("light", "lathe")), "GXYGX");
    }
}
