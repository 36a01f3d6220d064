//! Catalog service behavior over in-memory repositories.

mod mocks;

use mocks::{
    MockNoteRepository, MockPurchaseRepository, MockPyqRepository, MockQuestionBankRepository,
    MockUserInfoRepository,
};
use std::sync::Arc;
use study_catalog_mcp::models::{Note, Purchase, Pyq, QuestionBank, UserInfo};
use study_catalog_mcp::repositories::Repositories;
use study_catalog_mcp::services::{
    CatalogService, CatalogServiceImpl, CatalogSettings, SearchRequest,
};
use study_catalog_mcp::{CatalogApiError, CatalogKind, ListingState, MatchKind, Metrics};

struct Fixture {
    notes: MockNoteRepository,
    pyqs: MockPyqRepository,
    banks: MockQuestionBankRepository,
    purchases: MockPurchaseRepository,
    users: MockUserInfoRepository,
}

impl Fixture {
    fn new() -> Self {
        Self {
            notes: MockNoteRepository::new(),
            pyqs: MockPyqRepository::new(),
            banks: MockQuestionBankRepository::new(),
            purchases: MockPurchaseRepository::new(),
            users: MockUserInfoRepository::new(),
        }
    }

    fn repositories(&self) -> Repositories {
        Repositories {
            notes: Arc::new(self.notes.clone()),
            pyqs: Arc::new(self.pyqs.clone()),
            question_banks: Arc::new(self.banks.clone()),
            purchases: Arc::new(self.purchases.clone()),
            user_info: Arc::new(self.users.clone()),
        }
    }

    fn service(&self, user_id: Option<&str>, ttl: u64) -> CatalogServiceImpl {
        let settings = CatalogSettings {
            user_id: user_id.map(str::to_string),
            cache_ttl_secs: ttl,
            max_results: 50,
        };
        CatalogServiceImpl::new(self.repositories(), settings, Metrics::new()).unwrap()
    }
}

fn note(id: &str, name: &str, subject: &str, branch: &str, semester: &str) -> Note {
    Note {
        semester: semester.to_string(),
        price: 99.0,
        ..Note::new(id, name, subject, branch, "3")
    }
}

fn pyq(id: &str, name: &str, subject: &str, year: &str) -> Pyq {
    Pyq {
        id: id.to_string(),
        name: name.to_string(),
        subject: subject.to_string(),
        branch: "CSE".to_string(),
        year: year.to_string(),
        semester: "4".to_string(),
        ..Default::default()
    }
}

fn seeded() -> Fixture {
    let fixture = Fixture::new();
    fixture.notes.add_notes(vec![
        note("n1", "Data Structures", "DS", "CSE", "3"),
        note("n2", "Database Systems", "DBMS", "CSE", "4"),
        note("n3", "Operating Systems", "OS", "CSE", "5"),
        note("n4", "Digital Electronics", "DE", "ECE", "3"),
    ]);
    fixture
}

#[tokio::test]
async fn test_search_ranks_closest_note_first() {
    let fixture = seeded();
    let service = fixture.service(None, 300);

    let response = service
        .search_notes(SearchRequest::query("data sys"))
        .await
        .unwrap();

    assert_eq!(response.state, ListingState::Results);
    let ids: Vec<_> = response.results.iter().map(|h| h.record.id.as_str()).collect();
    assert_eq!(ids, vec!["n2", "n1"]);
    let first = response.results[0].matched.unwrap();
    assert_eq!(first.field, "name");
    assert_eq!(first.score.kind, MatchKind::Subsequence);
}

#[tokio::test]
async fn test_abbreviation_finds_note() {
    let fixture = seeded();
    let service = fixture.service(None, 300);

    let response = service
        .search_notes(SearchRequest::query("opsys"))
        .await
        .unwrap();

    assert_eq!(response.results[0].record.id, "n3");
}

#[tokio::test]
async fn test_empty_query_lists_in_backend_order() {
    let fixture = seeded();
    let service = fixture.service(None, 300);

    let response = service.search_notes(SearchRequest::default()).await.unwrap();

    let ids: Vec<_> = response.results.iter().map(|h| h.record.id.as_str()).collect();
    assert_eq!(ids, vec!["n1", "n2", "n3", "n4"]);
    assert!(response.results.iter().all(|h| h.matched.is_none()));
    assert_eq!(response.total_records, 4);
}

#[tokio::test]
async fn test_filters_narrow_ranked_results() {
    let fixture = seeded();
    let service = fixture.service(None, 300);

    let request = SearchRequest {
        query: String::new(),
        branch: Some("cse".to_string()),
        semester: Some("3".to_string()),
        ..Default::default()
    };
    let response = service.search_notes(request).await.unwrap();

    assert_eq!(response.result_count, 1);
    assert_eq!(response.results[0].record.id, "n1");
}

#[tokio::test]
async fn test_limit_truncates_but_counts_all_matches() {
    let fixture = seeded();
    let service = fixture.service(None, 300);

    let request = SearchRequest {
        query: "s".to_string(),
        limit: Some(1),
        ..Default::default()
    };
    let response = service.search_notes(request).await.unwrap();

    assert_eq!(response.result_count, 1);
    assert!(response.total_matches > 1);
}

#[tokio::test]
async fn test_empty_catalog_and_no_match_messages() {
    let fixture = seeded();
    let service = fixture.service(None, 300);

    let response = service.search_pyqs(SearchRequest::query("os")).await.unwrap();
    assert_eq!(response.state, ListingState::NoRecords);
    assert_eq!(response.message.as_deref(), Some("No PYQs available."));

    let response = service
        .search_notes(SearchRequest::query("zzzz"))
        .await
        .unwrap();
    assert_eq!(response.state, ListingState::NoMatches);
    assert_eq!(
        response.message.as_deref(),
        Some("No notes found matching \"zzzz\"")
    );
    assert!(response.results.is_empty());
}

#[tokio::test]
async fn test_snapshot_is_reused_until_refresh() {
    let fixture = seeded();
    let service = fixture.service(None, 300);

    let first = service.search_notes(SearchRequest::query("os")).await.unwrap();
    let second = service.search_notes(SearchRequest::query("de")).await.unwrap();

    assert!(!first.from_cache);
    assert!(second.from_cache);
    assert_eq!(fixture.notes.get_call_count("list"), 1);

    fixture.notes.add_note(note("n5", "Compiler Design", "CD", "CSE", "6"));
    let stale = service.search_notes(SearchRequest::query("compiler")).await.unwrap();
    assert_eq!(stale.state, ListingState::NoMatches);

    let summary = service.refresh_all().await.unwrap();
    assert_eq!(summary.notes, 5);
    assert_eq!(summary.purchased_notes, None);
    assert_eq!(fixture.notes.get_call_count("list"), 2);

    let fresh = service.search_notes(SearchRequest::query("compiler")).await.unwrap();
    assert_eq!(fresh.results[0].record.id, "n5");
}

#[tokio::test]
async fn test_zero_ttl_refetches_every_call() {
    let fixture = seeded();
    let service = fixture.service(None, 0);

    service.search_notes(SearchRequest::query("os")).await.unwrap();
    service.search_notes(SearchRequest::query("os")).await.unwrap();

    assert_eq!(fixture.notes.get_call_count("list"), 2);
}

#[tokio::test]
async fn test_concurrent_searches_share_one_fetch() {
    let fixture = seeded();
    let service = fixture.service(None, 300);

    let (a, b) = tokio::join!(
        service.search_notes(SearchRequest::query("os")),
        service.search_notes(SearchRequest::query("ds")),
    );

    assert!(a.is_ok() && b.is_ok());
    assert_eq!(fixture.notes.get_call_count("list"), 1);
}

#[tokio::test]
async fn test_get_note_falls_back_to_repository() {
    let fixture = seeded();
    let service = fixture.service(None, 300);

    let cached = service.get_note("n2").await.unwrap();
    assert_eq!(cached.name, "Database Systems");
    assert_eq!(fixture.notes.get_call_count("get"), 0);

    fixture.notes.add_note(note("n9", "Computer Networks", "CN", "CSE", "6"));
    let fetched = service.get_note("n9").await.unwrap();
    assert_eq!(fetched.name, "Computer Networks");
    assert_eq!(fixture.notes.get_call_count("get"), 1);

    let missing = service.get_note("nope").await;
    assert!(matches!(missing, Err(CatalogApiError::NotFound(_))));
}

#[tokio::test]
async fn test_get_note_rejects_blank_id() {
    let fixture = seeded();
    let service = fixture.service(None, 300);

    let result = service.get_note("   ").await;
    assert!(matches!(result, Err(CatalogApiError::InvalidRequest(_))));
}

#[tokio::test]
async fn test_invalid_limit_is_rejected() {
    let fixture = seeded();
    let service = fixture.service(None, 300);

    let request = SearchRequest {
        limit: Some(0),
        ..SearchRequest::query("os")
    };
    let result = service.search_notes(request).await;

    assert!(matches!(result, Err(CatalogApiError::InvalidRequest(_))));
    assert_eq!(fixture.notes.get_call_count("list"), 0);
}

#[tokio::test]
async fn test_backend_failure_is_not_cached() {
    let fixture = seeded();
    let service = fixture.service(None, 300);

    fixture.notes.set_failing(true);
    let result = service.search_notes(SearchRequest::query("os")).await;
    assert!(matches!(result, Err(CatalogApiError::ApiError { status: 503, .. })));

    fixture.notes.set_failing(false);
    let response = service.search_notes(SearchRequest::query("os")).await.unwrap();
    assert!(!response.from_cache);
    assert_eq!(fixture.notes.get_call_count("list"), 2);
}

#[tokio::test]
async fn test_purchase_status_uses_configured_user() {
    let fixture = seeded();
    fixture.notes.mark_purchased("n3");
    let service = fixture.service(Some("user-1"), 300);

    let response = service
        .search_notes(SearchRequest::query("operating"))
        .await
        .unwrap();

    assert!(response.results[0].record.is_purchased);
}

#[tokio::test]
async fn test_purchased_notes_require_user() {
    let fixture = seeded();
    let service = fixture.service(None, 300);

    let result = service.search_purchased_notes(SearchRequest::default()).await;
    assert!(matches!(result, Err(CatalogApiError::InvalidRequest(_))));

    let result = service.get_user_info().await;
    assert!(matches!(result, Err(CatalogApiError::InvalidRequest(_))));
    assert_eq!(fixture.purchases.get_call_count("list_with_notes"), 0);
}

#[tokio::test]
async fn test_purchased_notes_listing() {
    let fixture = seeded();
    fixture.purchases.add_purchase(Purchase {
        id: "p1".to_string(),
        user_id: "user-1".to_string(),
        note_id: "n3".to_string(),
        purchase_price: 79.0,
        created_at: "2024-03-09T18:30:00+00:00".to_string(),
        note: Some(note("n3", "Operating Systems", "OS", "CSE", "5")),
    });
    fixture.purchases.add_purchase(Purchase {
        id: "p2".to_string(),
        user_id: "user-1".to_string(),
        note_id: "deleted".to_string(),
        note: None,
        ..Default::default()
    });
    fixture.purchases.add_purchase(Purchase {
        id: "p3".to_string(),
        user_id: "someone-else".to_string(),
        note: Some(note("n1", "Data Structures", "DS", "CSE", "3")),
        ..Default::default()
    });
    let service = fixture.service(Some("user-1"), 300);

    let response = service
        .search_purchased_notes(SearchRequest::default())
        .await
        .unwrap();

    assert_eq!(response.total_records, 1);
    let row = &response.results[0].record;
    assert_eq!(row.id, "n3");
    assert_eq!(row.purchase_price, 79.0);
    assert_eq!(row.purchase_date, "Mar 9, 2024");

    let response = service
        .search_purchased_notes(SearchRequest::query("networks"))
        .await
        .unwrap();
    assert_eq!(
        response.message.as_deref(),
        Some("No purchased notes found matching your search.")
    );
}

#[tokio::test]
async fn test_facets_are_sorted_and_distinct() {
    let fixture = seeded();
    fixture.pyqs.add_pyq(pyq("q1", "OS End Sem", "OS", "2023"));
    fixture.pyqs.add_pyq(pyq("q2", "DBMS End Sem", "DBMS", "2022"));
    fixture.pyqs.add_pyq(pyq("q3", "OS Mid Sem", "OS", "2022"));
    let service = fixture.service(None, 300);

    let facets = service.facets(CatalogKind::Pyqs).await.unwrap();
    assert_eq!(facets.subjects, vec!["DBMS", "OS"]);
    assert_eq!(facets.years, vec!["2022", "2023"]);
    assert_eq!(facets.branches, vec!["CSE"]);

    let facets = service.facets(CatalogKind::Notes).await.unwrap();
    assert_eq!(facets.branches, vec!["CSE", "ECE"]);
    assert_eq!(facets.semesters, vec!["3", "4", "5"]);
}

#[tokio::test]
async fn test_refresh_with_user_warms_purchases() {
    let fixture = seeded();
    fixture.banks.add_bank(QuestionBank {
        id: "b1".to_string(),
        name: "DSA Question Bank".to_string(),
        ..Default::default()
    });
    fixture.users.add_user(UserInfo {
        id: "user-1".to_string(),
        name: "Asha".to_string(),
        ..Default::default()
    });
    let service = fixture.service(Some("user-1"), 300);

    let summary = service.refresh_all().await.unwrap();
    assert_eq!(summary.notes, 4);
    assert_eq!(summary.pyqs, 0);
    assert_eq!(summary.question_banks, 1);
    assert_eq!(summary.purchased_notes, Some(0));

    let user = service.get_user_info().await.unwrap();
    assert_eq!(user.name, "Asha");
}
