#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpListener;
use verification_provider::{
    app_with_state,
    error::{StorageError, VerificationResult},
    models::{AppState, VerificationRecord},
    services::{
        code::{CodeGenerator, SeededCodeSource},
        publisher::{MessagePublisher, PublishError},
        store::{MemoryVerificationStore, VerificationStore},
        workflow::VerificationWorkflow,
    },
};

pub fn init_tracing_once() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("verification_provider=debug")
            .with_test_writer()
            .init();
    });
}

/// A publisher that records payloads instead of enqueueing them.
#[derive(Debug, Default)]
pub struct MockPublisher {
    published: Mutex<Vec<String>>,
    reject: bool,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A publisher whose queue refuses every payload.
    pub fn rejecting() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            reject: true,
        }
    }

    pub fn published_count(&self) -> usize {
        self.published.lock().unwrap().len()
    }

    pub fn last_published(&self) -> Option<String> {
        self.published.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl MessagePublisher for MockPublisher {
    async fn publish(&self, payload: &str) -> Result<(), PublishError> {
        if self.reject {
            return Err(PublishError::PublishFailed("queue full".to_string()));
        }
        self.published.lock().unwrap().push(payload.to_string());
        Ok(())
    }
}

/// Simulates a persistence outage.
pub struct OfflineStore;

#[async_trait]
impl VerificationStore for OfflineStore {
    async fn upsert(
        &self,
        _email: &str,
        _code: &str,
        _ttl: Duration,
    ) -> VerificationResult<VerificationRecord> {
        Err(StorageError::Unavailable("connection refused".to_string()).into())
    }

    async fn find_by_email(&self, _email: &str) -> VerificationResult<Option<VerificationRecord>> {
        Err(StorageError::Unavailable("connection refused".to_string()).into())
    }
}

pub struct TestApp {
    pub address: String,
    pub store: Arc<MemoryVerificationStore>,
    pub publisher: Arc<MockPublisher>,
}

/// Spawns the application on a random port with an in-memory store.
///
/// Returned address format: `http://127.0.0.1:8492`
pub async fn spawn_app() -> TestApp {
    let store = Arc::new(MemoryVerificationStore::new());
    let publisher = Arc::new(MockPublisher::new());
    let address = serve(store.clone(), publisher.clone()).await;

    TestApp {
        address,
        store,
        publisher,
    }
}

/// Spawns the application over arbitrary collaborators.
pub async fn serve(
    store: Arc<dyn VerificationStore>,
    publisher: Arc<dyn MessagePublisher>,
) -> String {
    init_tracing_once();

    let workflow = VerificationWorkflow::new(
        CodeGenerator::new(Arc::new(SeededCodeSource::new(2026))),
        store,
    );
    let state = Arc::new(AppState::new(workflow, publisher));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port at localhost");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app_with_state(state)).await.unwrap();
    });

    let address = format!("http://127.0.0.1:{port}");

    // Wait for server to be ready
    let client = reqwest::Client::new();
    for _ in 0..10 {
        if client
            .get(format!("{address}/health-check"))
            .send()
            .await
            .is_ok()
        {
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    address
}
