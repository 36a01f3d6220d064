//! Catalog listing tools: cached fuzzy search over one record catalog.
//!
//! Notes, previous-year papers, question banks and purchases are all served
//! by the same [`CatalogTools`], parameterized by record type, fetch source
//! and search fields.

use super::source::RecordSource;
use crate::cache::{CatalogSnapshot, SnapshotCache};
use crate::domain::{fold_text, SearchQuery};
use crate::error::{CatalogApiError, CatalogApiResult, SearchResult};
use crate::metrics::{Metrics, Timer};
use crate::search::{FieldMatch, SearchIndex, SearchRecord};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

/// Fields searched when a catalog is not given its own list.
pub const DEFAULT_SEARCH_FIELDS: &[&str] = &["name", "subject", "branch", "year"];

/// Default number of results per search.
const DEFAULT_LIMIT: usize = 50;

/// Which catalog a listing belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Notes,
    Pyqs,
    QuestionBanks,
    Purchases,
}

impl CatalogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Notes => "notes",
            Self::Pyqs => "pyqs",
            Self::QuestionBanks => "question_banks",
            Self::Purchases => "purchases",
        }
    }

    /// Message shown when the catalog has no records at all.
    pub fn no_records_message(&self) -> &'static str {
        match self {
            Self::Notes => "No notes available",
            Self::Pyqs => "No PYQs available.",
            Self::QuestionBanks => "No question banks available.",
            Self::Purchases => "No purchased notes yet.",
        }
    }

    /// Message shown when records exist but none pass the query and filters.
    pub fn no_matches_message(&self, query: &SearchQuery) -> String {
        match self {
            Self::Notes if query.is_empty() => "No notes found matching your filters".to_string(),
            Self::Notes => format!("No notes found matching \"{}\"", query.raw()),
            Self::Pyqs => "No PYQs found matching your search.".to_string(),
            Self::QuestionBanks => "No question banks found matching your search.".to_string(),
            Self::Purchases => "No purchased notes found matching your search.".to_string(),
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CatalogKind {
    type Err = CatalogApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "notes" => Ok(Self::Notes),
            "pyqs" | "pyq" => Ok(Self::Pyqs),
            "question_banks" | "question_bank" => Ok(Self::QuestionBanks),
            "purchases" | "purchased_notes" => Ok(Self::Purchases),
            other => Err(CatalogApiError::InvalidRequest(format!(
                "Unknown catalog '{}' (expected notes, pyqs, question_banks or purchases)",
                other
            ))),
        }
    }
}

/// Outcome of a listing, driving which empty state is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingState {
    /// The catalog itself is empty
    NoRecords,
    /// Records exist but nothing passed the query and filters
    NoMatches,
    Results,
}

impl ListingState {
    fn classify(total_records: usize, total_matches: usize) -> Self {
        if total_records == 0 {
            Self::NoRecords
        } else if total_matches == 0 {
            Self::NoMatches
        } else {
            Self::Results
        }
    }
}

/// Exact facet filters, compared case-insensitively.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    pub subject: Option<String>,
    pub branch: Option<String>,
    pub year: Option<String>,
    pub semester: Option<String>,
}

impl CatalogFilter {
    pub fn is_empty(&self) -> bool {
        self.folded().is_empty()
    }

    fn folded(&self) -> Vec<(&'static str, String)> {
        [
            ("subject", &self.subject),
            ("branch", &self.branch),
            ("year", &self.year),
            ("semester", &self.semester),
        ]
        .into_iter()
        .filter_map(|(field, value)| {
            let value = fold_text(value.as_deref()?);
            (!value.is_empty()).then_some((field, value))
        })
        .collect()
    }
}

/// One listing request.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    /// Free-text query; empty lists everything
    pub text: String,

    pub filter: CatalogFilter,

    /// Maximum results; the catalog default when `None`
    pub limit: Option<usize>,
}

impl CatalogQuery {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// A record in a listing, with the field that matched.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogHit<R> {
    #[serde(flatten)]
    pub record: R,

    #[serde(
        rename = "match",
        serialize_with = "serialize_match",
        skip_serializing_if = "Option::is_none"
    )]
    pub matched: Option<FieldMatch>,
}

fn serialize_match<S: Serializer>(
    matched: &Option<FieldMatch>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match matched {
        Some(m) => {
            let mut state = serializer.serialize_struct("FieldMatch", 2)?;
            state.serialize_field("field", m.field)?;
            state.serialize_field("kind", &m.score.kind)?;
            state.end()
        }
        None => serializer.serialize_none(),
    }
}

/// Result of a catalog listing.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogResponse<R> {
    pub catalog: CatalogKind,

    /// The query as given, trimmed
    pub query: String,

    pub state: ListingState,

    /// Empty-state text; `None` when there are results
    pub message: Option<String>,

    pub result_count: usize,

    /// Matches before the limit was applied
    pub total_matches: usize,

    pub total_records: usize,

    /// RFC 3339 time the snapshot was fetched
    pub fetched_at: String,

    pub from_cache: bool,

    pub results: Vec<CatalogHit<R>>,
}

/// Distinct facet values of a catalog, sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Facets {
    pub subjects: Vec<String>,
    pub branches: Vec<String>,
    pub years: Vec<String>,
    pub semesters: Vec<String>,
}

/// Cached search over one catalog.
pub struct CatalogTools<R: Send + 'static> {
    kind: CatalogKind,
    source: Arc<dyn RecordSource<R>>,
    fields: Vec<&'static str>,
    cache: SnapshotCache<R>,
    /// Serializes rebuilds so concurrent misses fetch once
    rebuild: Mutex<()>,
    default_limit: usize,
    metrics: Metrics,
}

impl<R> CatalogTools<R>
where
    R: SearchRecord + Clone + Send + Sync + 'static,
{
    /// Create catalog tools searching [`DEFAULT_SEARCH_FIELDS`].
    ///
    /// # Arguments
    /// * `kind` - Which catalog this serves
    /// * `source` - Fetch seam for the full record list
    /// * `cache_ttl_secs` - Snapshot time-to-live in seconds
    pub fn new(kind: CatalogKind, source: Arc<dyn RecordSource<R>>, cache_ttl_secs: u64) -> Self {
        Self {
            kind,
            source,
            fields: DEFAULT_SEARCH_FIELDS.to_vec(),
            cache: SnapshotCache::new(cache_ttl_secs),
            rebuild: Mutex::new(()),
            default_limit: DEFAULT_LIMIT,
            metrics: Metrics::new(),
        }
    }

    /// Search `fields` instead of the defaults, in priority order.
    ///
    /// # Errors
    ///
    /// Rejects a field list the record type cannot index, before any fetch.
    pub fn with_fields(mut self, fields: &[&str]) -> SearchResult<Self> {
        let probe = SearchIndex::<R>::new(Vec::new(), fields)?;
        self.fields = probe.fields().to_vec();
        Ok(self)
    }

    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    /// Record cache and index activity into shared metrics.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    pub fn fields(&self) -> &[&'static str] {
        &self.fields
    }

    /// Search the catalog.
    ///
    /// Facet filters are applied to the ranked hits, so relevance order is
    /// kept; an empty query lists the catalog in backend order.
    pub async fn search(&self, request: CatalogQuery) -> CatalogApiResult<CatalogResponse<R>> {
        let timer = Timer::new(format!("search_{}", self.kind));
        let (snapshot, from_cache) = self.snapshot().await?;

        let query = SearchQuery::parse(&request.text);
        let filters = request.filter.folded();
        let limit = request.limit.unwrap_or(self.default_limit);

        let matches: Vec<_> = snapshot
            .index
            .search_query(&query)
            .into_iter()
            .filter(|hit| passes(hit.record, &filters))
            .collect();
        let total_matches = matches.len();

        let results: Vec<CatalogHit<R>> = matches
            .into_iter()
            .take(limit)
            .map(|hit| CatalogHit {
                record: hit.record.clone(),
                matched: hit.matched,
            })
            .collect();

        let total_records = snapshot.index.len();
        let state = ListingState::classify(total_records, total_matches);
        let message = match state {
            ListingState::NoRecords => Some(self.kind.no_records_message().to_string()),
            ListingState::NoMatches => Some(self.kind.no_matches_message(&query)),
            ListingState::Results => None,
        };

        tracing::debug!(
            catalog = %self.kind,
            query = %query,
            matches = total_matches,
            returned = results.len(),
            "Catalog search completed"
        );
        timer.finish();

        Ok(CatalogResponse {
            catalog: self.kind,
            query: query.raw().to_string(),
            state,
            message,
            result_count: results.len(),
            total_matches,
            total_records,
            fetched_at: snapshot.fetched_at.to_rfc3339(),
            from_cache,
            results,
        })
    }

    /// Look a record up by id in the current snapshot.
    pub async fn get(&self, id: &str) -> CatalogApiResult<R> {
        let (snapshot, _) = self.snapshot().await?;
        snapshot
            .records()
            .iter()
            .find(|record| record.record_id() == id)
            .cloned()
            .ok_or_else(|| CatalogApiError::NotFound(format!("{} {}", R::KIND, id)))
    }

    /// Distinct subjects, branches, years and semesters, sorted.
    pub async fn facets(&self) -> CatalogApiResult<Facets> {
        let (snapshot, _) = self.snapshot().await?;
        let records = snapshot.records();

        Ok(Facets {
            subjects: distinct(records, "subject"),
            branches: distinct(records, "branch"),
            years: distinct(records, "year"),
            semesters: distinct(records, "semester"),
        })
    }

    /// Make sure a snapshot is loaded; returns its record count.
    pub async fn warm(&self) -> CatalogApiResult<usize> {
        let (snapshot, _) = self.snapshot().await?;
        Ok(snapshot.index.len())
    }

    /// Drop the cached snapshot; the next call refetches.
    pub fn invalidate(&self) {
        tracing::debug!(catalog = %self.kind, "Invalidating catalog snapshot");
        self.cache.invalidate();
    }

    /// Number of snapshots built so far.
    pub fn generation(&self) -> u64 {
        self.cache.generation()
    }

    /// Get the cached snapshot or fetch and index a new one.
    async fn snapshot(&self) -> CatalogApiResult<(Arc<CatalogSnapshot<R>>, bool)> {
        if let Some(snapshot) = self.cached() {
            return Ok((snapshot, true));
        }

        let _guard = self.rebuild.lock().await;
        // Another caller may have rebuilt while we waited
        if let Some(snapshot) = self.cached() {
            return Ok((snapshot, true));
        }
        self.metrics.record_cache_miss();

        let records = self.source.fetch_all().await.map_err(|e| {
            tracing::warn!(catalog = %self.kind, error = %e, "Failed to fetch catalog");
            e
        })?;

        let start = Instant::now();
        let index = SearchIndex::new(records, &self.fields)?;
        self.metrics.record_index_build();
        tracing::info!(
            catalog = %self.kind,
            records = index.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Search index built"
        );

        Ok((self.cache.store(index), false))
    }

    fn cached(&self) -> Option<Arc<CatalogSnapshot<R>>> {
        let snapshot = self.cache.get()?;
        self.metrics.record_cache_hit();
        tracing::debug!(catalog = %self.kind, generation = snapshot.generation, "Using cached snapshot");
        Some(snapshot)
    }
}

fn passes<R: SearchRecord>(record: &R, filters: &[(&'static str, String)]) -> bool {
    filters.iter().all(|(field, wanted)| {
        record
            .field_text(field)
            .map_or(false, |text| fold_text(text) == *wanted)
    })
}

fn distinct<R: SearchRecord>(records: &[R], field: &str) -> Vec<String> {
    records
        .iter()
        .filter_map(|record| record.field_text(field))
        .map(|text| text.trim().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
