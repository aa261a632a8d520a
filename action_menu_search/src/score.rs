// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fuzzy command scoring.
//!
//! The scorer walks the query through the candidate, trying every occurrence
//! of each query character and keeping the best path. Each matched character
//! multiplies the path score by a factor that depends on what precedes it:
//!
//! | Match position | Factor |
//! |---|---|
//! | directly after the previous match | [`SCORE_CONTINUE_MATCH`] |
//! | after a space or hyphen | [`SCORE_SPACE_WORD_JUMP`] |
//! | after another word gap (`/`, `.`, `_`, brackets, ...) | [`SCORE_NON_SPACE_WORD_JUMP`] |
//! | anywhere else | [`SCORE_CHARACTER_JUMP`] |
//!
//! Skipped characters, case mismatches, and an unconsumed candidate tail
//! apply small penalties. Adjacent transposed query characters are still
//! found, at [`SCORE_TRANSPOSITION`].

/// Factor for a match right after the previous one.
pub const SCORE_CONTINUE_MATCH: f64 = 1.0;
/// Factor for a match at the start of a space-separated word.
pub const SCORE_SPACE_WORD_JUMP: f64 = 0.9;
/// Factor for a match after a non-space word gap.
pub const SCORE_NON_SPACE_WORD_JUMP: f64 = 0.8;
/// Factor for a match in the middle of a word.
pub const SCORE_CHARACTER_JUMP: f64 = 0.17;
/// Factor for a pair of transposed query characters.
pub const SCORE_TRANSPOSITION: f64 = 0.1;
/// Penalty per skipped character or word.
pub const PENALTY_SKIPPED: f64 = 0.999;
/// Penalty for a case-insensitive (but not exact-case) match.
pub const PENALTY_CASE_MISMATCH: f64 = 0.9999;
/// Penalty when the candidate has characters left after the query.
pub const PENALTY_NOT_COMPLETE: f64 = 0.99;

fn is_gap(c: char) -> bool {
    matches!(c, '\\' | '/' | '_' | '+' | '.' | '#' | '"' | '@' | '[' | '(' | '{' | '&')
}

fn is_space(c: char) -> bool {
    c.is_whitespace() || c == '-'
}

/// Lowercases per character and folds spaces and hyphens together, keeping
/// one output character per input character.
fn fold(s: &str) -> Vec<char> {
    s.chars()
        .map(|c| {
            if is_space(c) {
                ' '
            } else {
                c.to_lowercase().next().unwrap_or(c)
            }
        })
        .collect()
}

struct Scorer {
    candidate: Vec<char>,
    query: Vec<char>,
    lower_candidate: Vec<char>,
    lower_query: Vec<char>,
    memo: Vec<Option<f64>>,
}

impl Scorer {
    fn new(candidate: &str, query: &str) -> Self {
        let lower_candidate = fold(candidate);
        let lower_query = fold(query);
        let candidate: Vec<char> = candidate.chars().collect();
        let query: Vec<char> = query.chars().collect();
        let memo = vec![None; (candidate.len() + 1) * (query.len() + 1)];
        Self {
            candidate,
            query,
            lower_candidate,
            lower_query,
            memo,
        }
    }

    fn find(&self, needle: char, from: usize) -> Option<usize> {
        self.lower_candidate
            .get(from..)?
            .iter()
            .position(|&c| c == needle)
            .map(|offset| from + offset)
    }

    fn score(&mut self, at: usize, q: usize) -> f64 {
        if q == self.query.len() {
            return if at == self.candidate.len() {
                SCORE_CONTINUE_MATCH
            } else {
                PENALTY_NOT_COMPLETE
            };
        }
        let key = at * (self.query.len() + 1) + q;
        if let Some(score) = self.memo[key] {
            return score;
        }

        let needle = self.lower_query[q];
        let next_needle = self.lower_query.get(q + 1).copied();
        let mut best = 0.0_f64;
        let mut found = self.find(needle, at);
        while let Some(index) = found {
            let mut score = self.score(index + 1, q + 1);
            if score > best {
                score *= self.jump_factor(at, index);
                if self.candidate[index] != self.query[q] {
                    score *= PENALTY_CASE_MISMATCH;
                }
            }

            let before = index.checked_sub(1).map(|i| self.lower_candidate[i]);
            let swapped = score < SCORE_TRANSPOSITION && before.is_some() && before == next_needle;
            let doubled = next_needle == Some(needle) && before != Some(needle);
            if (swapped || doubled) && q + 2 <= self.query.len() {
                let transposed = self.score(index + 1, q + 2) * SCORE_TRANSPOSITION;
                if transposed > score {
                    score = transposed;
                }
            }

            if score > best {
                best = score;
            }
            found = self.find(needle, index + 1);
        }

        self.memo[key] = Some(best);
        best
    }

    fn jump_factor(&self, at: usize, index: usize) -> f64 {
        if index == at {
            return SCORE_CONTINUE_MATCH;
        }
        // `index > at >= 0` here, so there is a preceding character.
        let previous = self.candidate[index - 1];
        let skipped = &self.candidate[at..index - 1];
        if is_gap(previous) {
            let mut factor = SCORE_NON_SPACE_WORD_JUMP;
            let breaks = skipped.iter().filter(|&&c| is_gap(c)).count();
            if breaks > 0 && at > 0 {
                factor *= PENALTY_SKIPPED.powi(breaks as i32);
            }
            factor
        } else if is_space(previous) {
            let mut factor = SCORE_SPACE_WORD_JUMP;
            let breaks = skipped.iter().filter(|&&c| is_space(c)).count();
            if breaks > 0 && at > 0 {
                factor *= PENALTY_SKIPPED.powi(breaks as i32);
            }
            factor
        } else {
            let mut factor = SCORE_CHARACTER_JUMP;
            if at > 0 {
                factor *= PENALTY_SKIPPED.powi((index - at) as i32);
            }
            factor
        }
    }
}

fn score_one(candidate: &str, query: &str) -> f64 {
    if candidate == query {
        return 1.0;
    }
    if query.chars().count() > candidate.chars().count() {
        return 0.0;
    }
    Scorer::new(candidate, query).score(0, 0)
}

/// Scores how well `query` abbreviates `candidate`, in `[0, 1]`.
///
/// `0` means no match. Each alias is scored on its own and the best score
/// wins, with the candidate tried first. The function is pure.
///
/// ```
/// use action_menu_search::command_score;
///
/// assert_eq!(command_score("Export", "Export", &[] as &[&str]), 1.0);
/// assert_eq!(command_score("cut", "cutting", &[] as &[&str]), 0.0);
/// assert!(command_score("Save As", "sa", &[] as &[&str]) > command_score("Save As", "ae", &[] as &[&str]));
/// assert!(command_score("Quit", "exit", &["exit", "close"]) > 0.9);
/// ```
#[must_use]
pub fn command_score<S: AsRef<str>>(candidate: &str, query: &str, aliases: &[S]) -> f64 {
    let mut best = score_one(candidate, query);
    for alias in aliases {
        if best >= 1.0 {
            break;
        }
        best = best.max(score_one(alias.as_ref(), query));
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: &[&str] = &[];

    #[test]
    fn exact_match_is_one() {
        assert_eq!(command_score("Open Recent", "Open Recent", NONE), 1.0);
    }

    #[test]
    fn case_only_difference_is_slightly_below_one() {
        let score = command_score("Open", "open", NONE);
        assert!(score < 1.0);
        assert!(score > 0.999);
    }

    #[test]
    fn longer_query_never_matches() {
        assert_eq!(command_score("ab", "abc", NONE), 0.0);
    }

    #[test]
    fn missing_character_never_matches() {
        assert_eq!(command_score("paste", "pz", NONE), 0.0);
    }

    #[test]
    fn prefix_beats_suffix() {
        let prefix = command_score("format", "for", NONE);
        let suffix = command_score("platform", "for", NONE);
        assert!(prefix > suffix, "{prefix} <= {suffix}");
    }

    #[test]
    fn word_boundary_beats_mid_word() {
        let boundary = command_score("go to line", "gl", NONE);
        let mid_word = command_score("goal", "gl", NONE);
        assert!(boundary > mid_word, "{boundary} <= {mid_word}");
    }

    #[test]
    fn space_jump_beats_gap_jump() {
        let space = command_score("file open", "fo", NONE);
        let gap = command_score("file/open", "fo", NONE);
        assert!(space > gap, "{space} <= {gap}");
        assert!(gap > command_score("fileopen", "fo", NONE));
    }

    #[test]
    fn exact_case_run_beats_mixed_case() {
        assert!(command_score("Copy", "Co", NONE) > command_score("Copy", "co", NONE));
    }

    #[test]
    fn hyphen_in_query_matches_space() {
        assert!(command_score("zoom in", "zoom-in", NONE) > 0.9);
    }

    #[test]
    fn transposed_characters_still_match() {
        let score = command_score("abcd", "acbd", NONE);
        assert!(score > 0.0);
        assert!(score < command_score("abcd", "abcd", NONE));
    }

    #[test]
    fn complete_match_beats_incomplete() {
        assert!(command_score("cut", "cut", NONE) > command_score("cuts", "cut", NONE));
    }

    #[test]
    fn best_alias_wins() {
        let plain = command_score("Remove", "del", NONE);
        let aliased = command_score("Remove", "del", &["delete", "trash"]);
        assert_eq!(plain, 0.0);
        assert!(aliased > 0.9);
    }

    #[test]
    fn non_ascii_is_scored_per_character() {
        assert!(command_score("Größe ändern", "gä", NONE) > 0.0);
        assert_eq!(command_score("é", "éé", NONE), 0.0);
    }
}
