//! Approximate matching of a folded query against folded field text.
//!
//! Matching is tiered. A field is tried against, in order:
//! - exact equality with the whole query
//! - the whole query as a contiguous substring
//! - the whole query as an in-order subsequence (gaps allowed)
//! - every query term as a subsequence, in any order
//! - every query term with at most one interior character dropped, as long
//!   as at least one term still matches strictly
//!
//! The first tier that matches decides the score. The last two tiers only
//! apply to multi-term queries.

use crate::domain::SearchQuery;
use serde::Serialize;

/// Terms shorter than this never tolerate a dropped character.
const MIN_TERM_LEN_FOR_DROP: usize = 3;

/// How a field matched, strongest first.
///
/// Variant order is the ranking order: a smaller variant ranks ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// The field text equals the query
    Exact,
    /// The query occurs contiguously in the field
    Substring,
    /// The query characters occur in order with gaps
    Subsequence,
    /// Each query term occurs as a subsequence
    Terms,
    /// Each query term occurs, some with one character dropped
    Approximate,
}

impl MatchKind {
    /// Get display name for the match kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Substring => "substring",
            Self::Subsequence => "subsequence",
            Self::Terms => "terms",
            Self::Approximate => "approximate",
        }
    }
}

/// Relevance of a match. `a < b` means `a` ranks ahead of `b`.
///
/// Ordering is lexicographic over the fields in declaration order: tier,
/// dropped characters, gap length, start position, then configured field
/// priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MatchScore {
    /// Match tier
    pub kind: MatchKind,

    /// Query characters that had to be dropped
    pub dropped: usize,

    /// Unmatched field characters inside the matched windows
    pub gaps: usize,

    /// Character offset of the first matched character
    pub start: usize,

    /// Position of the matching field in the configured field list
    pub field_rank: usize,
}

/// A query split into char vectors once per search.
#[derive(Debug, Clone)]
pub(crate) struct PreparedQuery {
    whole: Vec<char>,
    terms: Vec<Vec<char>>,
}

impl PreparedQuery {
    pub(crate) fn new(query: &SearchQuery) -> Self {
        Self {
            whole: query.as_str().chars().collect(),
            terms: query.terms().map(|t| t.chars().collect()).collect(),
        }
    }
}

/// An inclusive span of matched characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Window {
    start: usize,
    end: usize,
}

impl Window {
    fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Score one folded field against a prepared query.
///
/// Returns `None` when no tier matches.
pub(crate) fn match_text(
    text: &[char],
    query: &PreparedQuery,
    field_rank: usize,
) -> Option<MatchScore> {
    let whole = query.whole.as_slice();
    if whole.is_empty() || text.is_empty() {
        return None;
    }

    let score = |kind, dropped, gaps, start| MatchScore {
        kind,
        dropped,
        gaps,
        start,
        field_rank,
    };

    if text == whole {
        return Some(score(MatchKind::Exact, 0, 0, 0));
    }

    if let Some(start) = find_substring(text, whole) {
        return Some(score(MatchKind::Substring, 0, 0, start));
    }

    if let Some(window) = tightest_window(text, whole) {
        return Some(score(
            MatchKind::Subsequence,
            0,
            window.len() - whole.len(),
            window.start,
        ));
    }

    if query.terms.len() < 2 {
        return None;
    }

    let mut dropped = 0;
    let mut strict = 0;
    let mut gaps = 0;
    let mut start = usize::MAX;

    for term in &query.terms {
        if let Some(window) = tightest_window(text, term) {
            strict += 1;
            gaps += window.len() - term.len();
            start = start.min(window.start);
        } else if let Some(window) = window_dropping_one(text, term) {
            dropped += 1;
            gaps += window.len() - (term.len() - 1);
            start = start.min(window.start);
        } else {
            return None;
        }
    }

    match (dropped, strict) {
        (0, _) => Some(score(MatchKind::Terms, 0, gaps, start)),
        (_, 0) => None,
        _ => Some(score(MatchKind::Approximate, dropped, gaps, start)),
    }
}

/// First offset where `pattern` occurs contiguously.
fn find_substring(text: &[char], pattern: &[char]) -> Option<usize> {
    if pattern.is_empty() {
        return None;
    }
    text.windows(pattern.len()).position(|w| w == pattern)
}

/// Shortest window containing `pattern` as a subsequence, earliest on ties.
fn tightest_window(text: &[char], pattern: &[char]) -> Option<Window> {
    let (first, rest) = pattern.split_first()?;
    let mut best: Option<Window> = None;

    for (start, _) in text.iter().enumerate().filter(|(_, c)| *c == first) {
        // A later start sees a suffix of this one, so it cannot succeed either.
        let Some(end) = greedy_end(text, start, rest) else {
            break;
        };
        let window = Window { start, end };
        if best.map_or(true, |b| window.len() < b.len()) {
            best = Some(window);
        }
    }

    best
}

/// Offset of the last character when matching `rest` greedily after `start`.
fn greedy_end(text: &[char], start: usize, rest: &[char]) -> Option<usize> {
    let mut pos = start;
    for c in rest {
        pos += 1 + text[pos + 1..].iter().position(|t| t == c)?;
    }
    Some(pos)
}

/// Best window for `term` with one interior character removed.
fn window_dropping_one(text: &[char], term: &[char]) -> Option<Window> {
    if term.len() < MIN_TERM_LEN_FOR_DROP {
        return None;
    }

    let mut best: Option<Window> = None;
    for skip in 1..term.len() - 1 {
        let reduced: Vec<char> = term
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != skip)
            .map(|(_, c)| *c)
            .collect();

        if let Some(window) = tightest_window(text, &reduced) {
            let better = best.map_or(true, |b| {
                (window.len(), window.start) < (b.len(), b.start)
            });
            if better {
                best = Some(window);
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fold_text;

    fn chars(text: &str) -> Vec<char> {
        fold_text(text).chars().collect()
    }

    fn score(text: &str, query: &str) -> Option<MatchScore> {
        let prepared = PreparedQuery::new(&SearchQuery::parse(query));
        match_text(&chars(text), &prepared, 0)
    }

    #[test]
    fn test_exact_match() {
        let s = score("Operating Systems", "operating systems").unwrap();
        assert_eq!(s.kind, MatchKind::Exact);
    }

    #[test]
    fn test_substring_reports_start() {
        let s = score("Thermodynamics", "dyna").unwrap();
        assert_eq!(s.kind, MatchKind::Substring);
        assert_eq!(s.start, 6);
        assert_eq!(s.gaps, 0);
    }

    #[test]
    fn test_subsequence_gaps() {
        // d-a-t-a-b-a-s-e: "dbs" spans d(0) b(4) s(6)
        let s = score("Database", "dbs").unwrap();
        assert_eq!(s.kind, MatchKind::Subsequence);
        assert_eq!(s.start, 0);
        assert_eq!(s.gaps, 4);
    }

    #[test]
    fn test_tightest_window_prefers_short_span() {
        // "ab" first appears as a(0)..b(5); tighter at a(4)..b(5)
        let w = tightest_window(&chars("axxxab"), &chars("ab")).unwrap();
        assert_eq!(w, Window { start: 4, end: 5 });
    }

    #[test]
    fn test_terms_any_order() {
        let s = score("Database Systems", "systems data").unwrap();
        assert_eq!(s.kind, MatchKind::Terms);
        assert_eq!(s.start, 0);
    }

    #[test]
    fn test_approximate_drops_interior_char() {
        let s = score("Data Structures", "data sys").unwrap();
        assert_eq!(s.kind, MatchKind::Approximate);
        assert_eq!(s.dropped, 1);
    }

    #[test]
    fn test_approximate_requires_a_strict_term() {
        assert_eq!(score("Data Structures", "dxta syx"), None);
    }

    #[test]
    fn test_single_term_is_strict() {
        assert_eq!(score("Data Structures", "sys"), None);
        assert_eq!(score("Thermodynamics", "mech"), None);
    }

    #[test]
    fn test_short_terms_never_drop() {
        assert_eq!(window_dropping_one(&chars("abc"), &chars("ax")), None);
    }

    #[test]
    fn test_no_match_on_empty_text() {
        assert_eq!(score("", "os"), None);
    }

    #[test]
    fn test_score_ordering() {
        let exact = score("dbms", "dbms").unwrap();
        let early = score("dbms lab", "dbms").unwrap();
        let late = score("advanced dbms", "dbms").unwrap();
        let scattered = score("database management systems", "dbms").unwrap();

        assert!(exact < early);
        assert!(early < late);
        assert!(late < scattered);
    }

    #[test]
    fn test_field_rank_breaks_ties() {
        let prepared = PreparedQuery::new(&SearchQuery::parse("cse"));
        let text = chars("CSE");
        let first = match_text(&text, &prepared, 0).unwrap();
        let second = match_text(&text, &prepared, 1).unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_match_kind_display() {
        assert_eq!(MatchKind::Subsequence.as_str(), "subsequence");
        assert_eq!(
            serde_json::to_string(&MatchKind::Approximate).unwrap(),
            "\"approximate\""
        );
    }
}
