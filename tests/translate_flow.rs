//! End-to-end workflow tests against a local fake provider

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use translate_me::{
    FileStorage, HistoryStore, MemoryStorage, Outcome, TranslateSession, TranslationError,
    TranslationRecord, Translator, TranslatorConfig,
};

#[derive(Debug, Clone, Copy)]
enum Behavior {
    Dictionary,
    Malformed,
    WrongShape,
    Unavailable,
    Hanging,
}

struct Provider {
    behavior: Behavior,
    hits: AtomicUsize,
    queries: Mutex<Vec<HashMap<String, String>>>,
}

impl Provider {
    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn provider_get(
    State(provider): State<Arc<Provider>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    provider.hits.fetch_add(1, Ordering::SeqCst);
    let q = params.get("q").cloned().unwrap_or_default();
    {
        provider.queries.lock().unwrap().push(params);
    }

    match provider.behavior {
        Behavior::Dictionary => {
            let translated = match q.as_str() {
                "hello" => "hola".to_string(),
                "good morning" => "buenos días".to_string(),
                other => format!("[es] {}", other),
            };
            axum::Json(serde_json::json!({
                "responseData": { "translatedText": translated, "match": 1 },
                "responseStatus": 200
            }))
            .into_response()
        }
        Behavior::Malformed => (StatusCode::OK, "{\"responseData\": ").into_response(),
        Behavior::WrongShape => {
            axum::Json(serde_json::json!({ "translation": "hola" })).into_response()
        }
        Behavior::Unavailable => (StatusCode::SERVICE_UNAVAILABLE, "try later").into_response(),
        Behavior::Hanging => {
            tokio::time::sleep(Duration::from_secs(5)).await;
            axum::Json(serde_json::json!({ "responseData": { "translatedText": "tarde" } }))
                .into_response()
        }
    }
}

async fn spawn_provider(behavior: Behavior) -> (String, Arc<Provider>) {
    let provider = Arc::new(Provider {
        behavior,
        hits: AtomicUsize::new(0),
        queries: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/get", get(provider_get))
        .with_state(provider.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/get", addr), provider)
}

fn translator_for(endpoint: &str) -> Translator {
    Translator::new(TranslatorConfig {
        api_endpoint: endpoint.to_string(),
        ..Default::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_hello_becomes_hola() {
    let (endpoint, provider) = spawn_provider(Behavior::Dictionary).await;
    let storage = MemoryStorage::new();
    let mut session = TranslateSession::new(
        translator_for(&endpoint),
        HistoryStore::load(storage.clone()),
    );

    let outcome = session.submit("hello").await;

    assert!(matches!(outcome, Outcome::Translated(ref r) if r.translated() == "hola"));
    assert_eq!(session.displayed(), "hola");
    assert_eq!(session.history().len(), 1);
    let head = &session.history().records()[0];
    assert_eq!(head.original(), "hello");
    assert_eq!(head.translated(), "hola");

    assert_eq!(provider.hits(), 1);
    let queries = provider.queries.lock().unwrap();
    assert_eq!(queries[0]["q"], "hello");
    assert_eq!(queries[0]["langpair"], "en|es");

    let reloaded = HistoryStore::load(storage);
    assert_eq!(reloaded.records(), session.history().records());
}

#[tokio::test]
async fn test_each_success_prepends_once() {
    let (endpoint, provider) = spawn_provider(Behavior::Dictionary).await;
    let mut session = TranslateSession::new(
        translator_for(&endpoint),
        HistoryStore::load(MemoryStorage::new()),
    );

    for (i, text) in ["hello", "good morning", "see you & bye?"].iter().enumerate() {
        let before = session.history().len();
        let outcome = session.submit(text).await;
        assert!(matches!(outcome, Outcome::Translated(_)));
        assert!(!session.displayed().is_empty());
        assert_eq!(session.history().len(), before + 1);
        assert_eq!(session.history().records()[0].original(), *text);
        assert_eq!(provider.hits(), i + 1);
    }

    assert_eq!(session.history().records()[1].translated(), "buenos días");
    assert_eq!(session.history().records()[0].translated(), "[es] see you & bye?");
}

#[tokio::test]
async fn test_empty_input_never_reaches_provider() {
    let (endpoint, provider) = spawn_provider(Behavior::Dictionary).await;
    let mut session = TranslateSession::new(
        translator_for(&endpoint),
        HistoryStore::load(MemoryStorage::new()),
    );

    assert_eq!(session.submit("").await, Outcome::Skipped);
    assert_eq!(provider.hits(), 0);
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn test_malformed_response_leaves_history_unchanged() {
    for behavior in [Behavior::Malformed, Behavior::WrongShape] {
        let (endpoint, _provider) = spawn_provider(behavior).await;
        let storage = MemoryStorage::new();
        let mut history = HistoryStore::load(storage.clone());
        history.prepend(TranslationRecord::new("cat", "gato"));
        let saved = storage.contents();

        let mut session = TranslateSession::new(translator_for(&endpoint), history);
        let outcome = session.submit("hello").await;

        assert!(matches!(outcome, Outcome::Failed(_)));
        assert!(session.displayed().starts_with("Error: Invalid response"));
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history().records()[0].original(), "cat");
        assert_eq!(storage.contents(), saved);
    }
}

#[tokio::test]
async fn test_non_success_status_is_api_error() {
    let (endpoint, provider) = spawn_provider(Behavior::Unavailable).await;
    let translator = translator_for(&endpoint);

    let err = translator.translate("hello").await.unwrap_err();
    match err {
        TranslationError::Api { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "try later");
        }
        other => panic!("expected API error, got {:?}", other),
    }
    // Single attempt, no retry
    assert_eq!(provider.hits(), 1);
}

#[tokio::test]
async fn test_timeout_surfaces_as_network_error() {
    let (endpoint, provider) = spawn_provider(Behavior::Hanging).await;
    let translator = Translator::new(TranslatorConfig {
        api_endpoint: endpoint,
        timeout_ms: Some(200),
        ..Default::default()
    })
    .unwrap();
    let mut session = TranslateSession::new(translator, HistoryStore::load(MemoryStorage::new()));

    let started = Instant::now();
    let err = session.translator().translate("hello").await.unwrap_err();
    assert!(matches!(err, TranslationError::Network { .. }), "got {:?}", err);
    assert!(started.elapsed() < Duration::from_secs(4));
    assert_eq!(provider.hits(), 1);

    let outcome = session.submit("hello").await;
    assert!(matches!(outcome, Outcome::Failed(ref msg) if msg.starts_with("Error: Network error")));
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn test_history_survives_restart_on_disk() {
    let (endpoint, _provider) = spawn_provider(Behavior::Dictionary).await;
    let dir = tempfile::tempdir().unwrap();

    {
        let history = HistoryStore::load(FileStorage::new(dir.path(), "translationHistory"));
        let mut session = TranslateSession::new(translator_for(&endpoint), history);
        session.submit("hello").await;
        session.submit("good morning").await;
    }

    let history = HistoryStore::load(FileStorage::new(dir.path(), "translationHistory"));
    let originals: Vec<&str> = history.records().iter().map(|r| r.original()).collect();
    assert_eq!(originals, vec!["good morning", "hello"]);

    let mut session = TranslateSession::new(translator_for(&endpoint), history);
    session.clear_history();
    session.clear_history();
    assert!(HistoryStore::load(FileStorage::new(dir.path(), "translationHistory")).is_empty());
}

#[tokio::test]
async fn test_corrupt_history_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path(), "translationHistory");
    std::fs::write(storage.path(), b"{ definitely not a list").unwrap();

    let mut history = HistoryStore::load(storage.clone());
    assert!(history.is_empty());

    // The next mutation overwrites the corrupt blob
    history.prepend(TranslationRecord::new("hello", "hola"));
    assert_eq!(HistoryStore::load(storage).len(), 1);
}

#[tokio::test]
async fn test_concurrent_translations_on_shared_client() {
    let (endpoint, provider) = spawn_provider(Behavior::Dictionary).await;
    let translator = translator_for(&endpoint);

    let a = tokio::spawn({
        let translator = translator.clone();
        async move { translator.translate("hello").await }
    });
    let b = tokio::spawn({
        let translator = translator.clone();
        async move { translator.translate("good morning").await }
    });

    assert_eq!(a.await.unwrap().unwrap().as_deref(), Some("hola"));
    assert_eq!(b.await.unwrap().unwrap().as_deref(), Some("buenos días"));
    assert_eq!(provider.hits(), 2);
}
