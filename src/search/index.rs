//! Fuzzy multi-field search index.
//!
//! The index is built once over an immutable record list and answers
//! queries with references into that list. Field text is folded ahead of
//! time so a query only pays for matching.

use super::record::SearchRecord;
use super::scoring::{match_text, MatchScore, PreparedQuery};
use crate::domain::{fold_text, SearchQuery};
use crate::error::{SearchError, SearchResult};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Which field produced a record's best match, and how well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMatch {
    pub field: &'static str,
    pub score: MatchScore,
}

/// A record returned from a search, borrowed from the index.
#[derive(Debug)]
pub struct ScoredMatch<'a, R> {
    /// The matching record, identical to the element in the input list
    pub record: &'a R,

    /// Offset of the record in the input list
    pub position: usize,

    /// Best field match; `None` when the query was empty
    pub matched: Option<FieldMatch>,
}

/// Search index over a fixed record list and field set.
///
/// # Example
///
/// ```
/// use study_catalog_mcp::models::Pyq;
/// use study_catalog_mcp::search::SearchIndex;
///
/// let pyqs = vec![
///     Pyq { id: "1".into(), name: "Data Structures".into(), ..Default::default() },
///     Pyq { id: "2".into(), name: "Operating Systems".into(), ..Default::default() },
/// ];
/// let index = SearchIndex::new(pyqs, &["name"]).unwrap();
///
/// let hits = index.search("opsys");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id, "2");
/// ```
pub struct SearchIndex<R> {
    records: Arc<[R]>,
    fields: Vec<&'static str>,
    // folded[record][field], aligned with `records` and `fields`
    folded: Vec<Vec<Option<Vec<char>>>>,
}

impl<R: SearchRecord> SearchIndex<R> {
    /// Build an index over `records`, searching `fields` in priority order.
    ///
    /// # Errors
    ///
    /// Fails with a [`SearchError`] when `fields` is empty, repeats a name, or
    /// names a field outside `R::FIELDS`.
    pub fn new(records: impl Into<Arc<[R]>>, fields: &[&str]) -> SearchResult<Self> {
        let fields = resolve_fields::<R>(fields)?;
        let records = records.into();

        let folded = records
            .iter()
            .map(|record| {
                fields
                    .iter()
                    .map(|field| {
                        record
                            .field_text(field)
                            .map(|text| fold_text(text).chars().collect())
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            records,
            fields,
            folded,
        })
    }

    /// Records matching `query`, most relevant first.
    ///
    /// An empty or whitespace-only query returns every record in its
    /// original order.
    pub fn search(&self, query: &str) -> Vec<&R> {
        self.search_scored(query)
            .into_iter()
            .map(|hit| hit.record)
            .collect()
    }

    /// Like [`search`](Self::search), keeping the match details.
    pub fn search_scored(&self, query: &str) -> Vec<ScoredMatch<'_, R>> {
        self.search_query(&SearchQuery::parse(query))
    }

    /// Run an already normalized query.
    pub fn search_query(&self, query: &SearchQuery) -> Vec<ScoredMatch<'_, R>> {
        if query.is_empty() {
            return self
                .records
                .iter()
                .enumerate()
                .map(|(position, record)| ScoredMatch {
                    record,
                    position,
                    matched: None,
                })
                .collect();
        }

        let prepared = PreparedQuery::new(query);

        let mut hits: Vec<ScoredMatch<'_, R>> = self
            .folded
            .iter()
            .enumerate()
            .filter_map(|(position, texts)| {
                let best = self.best_field(texts, &prepared)?;
                Some(ScoredMatch {
                    record: &self.records[position],
                    position,
                    matched: Some(best),
                })
            })
            .collect();

        // Stable: equal scores keep input order
        hits.sort_by_key(|hit| hit.matched.map(|m| m.score));
        hits
    }

    fn best_field(&self, texts: &[Option<Vec<char>>], query: &PreparedQuery) -> Option<FieldMatch> {
        texts
            .iter()
            .enumerate()
            .filter_map(|(rank, text)| {
                let score = match_text(text.as_deref()?, query, rank)?;
                Some(FieldMatch {
                    field: self.fields[rank],
                    score,
                })
            })
            .min_by_key(|m| m.score)
    }
}

impl<R> SearchIndex<R> {
    /// The indexed records, in input order.
    pub fn records(&self) -> &Arc<[R]> {
        &self.records
    }

    /// Configured fields in priority order.
    pub fn fields(&self) -> &[&'static str] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<R> fmt::Debug for SearchIndex<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchIndex")
            .field("records", &self.records.len())
            .field("fields", &self.fields)
            .finish()
    }
}

/// Map configured names onto the record schema's static names.
fn resolve_fields<R: SearchRecord>(fields: &[&str]) -> SearchResult<Vec<&'static str>> {
    if fields.is_empty() {
        return Err(SearchError::EmptyFieldSet);
    }

    let mut seen = HashSet::new();
    fields
        .iter()
        .map(|name| {
            let known = R::FIELDS
                .iter()
                .copied()
                .find(|f| f == name)
                .ok_or_else(|| SearchError::UnknownField {
                    field: name.to_string(),
                    record_kind: R::KIND,
                })?;
            if !seen.insert(known) {
                return Err(SearchError::DuplicateField(known.to_string()));
            }
            Ok(known)
        })
        .collect()
}
