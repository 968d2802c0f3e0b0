//! Test harness infrastructure for backend testing.
//!
//! This module provides the [`TestableBackend`] trait and [`TestContext`]
//! struct for running tests against seeded storage backends.

use std::collections::HashSet;
use std::sync::{Arc, Once};

use async_trait::async_trait;
use roster_persistence::core::{
    Backend, BackendCapability, BackendKind, EntityStorage, MemberRepository, QueryExecutor,
    QueryFactory,
};
use roster_persistence::error::StorageResult;
use roster_persistence::types::NewTeam;

#[cfg(feature = "sqlite")]
use roster_persistence::backends::sqlite::SqliteBackend;

use super::fixtures::{SeededRoster, TestFixtures};

static TRACING: Once = Once::new();

/// Installs a `tracing` subscriber honouring `RUST_LOG`, once per test binary.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Creates an in-memory SQLite backend with an initialised schema.
#[cfg(feature = "sqlite")]
pub fn create_backend() -> SqliteBackend {
    init_tracing();
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to initialize schema");
    backend
}

/// Trait that storage backends must implement to be testable.
///
/// This extends [`EntityStorage`] and [`QueryExecutor`] with test-specific
/// operations like reset and seed.
#[async_trait]
pub trait TestableBackend: EntityStorage + QueryExecutor + Send + Sync + 'static {
    /// Returns the kind of backend being tested.
    fn backend_kind(&self) -> BackendKind;

    /// Returns the set of capabilities this backend supports.
    fn supported_capabilities(&self) -> HashSet<BackendCapability>;

    /// Resets the backend to a clean state.
    ///
    /// This should clear all data while preserving the schema.
    async fn reset(&self) -> StorageResult<()>;

    /// Seeds the backend with test fixtures: teams first, then members.
    async fn seed(&self, fixtures: &TestFixtures) -> StorageResult<SeededRoster> {
        let mut seeded = SeededRoster::default();
        for team in &fixtures.teams {
            let saved = self.save_team(NewTeam::new(team.name.clone())).await?;
            seeded.teams.insert(team.name.clone(), saved);
        }
        for member in &fixtures.members {
            let saved = self
                .save_member(member.to_new_member(&seeded.teams))
                .await?;
            seeded.members.push(saved);
        }
        Ok(seeded)
    }

    /// Checks if this backend supports the given capability.
    fn supports(&self, capability: BackendCapability) -> bool {
        self.supported_capabilities().contains(&capability)
    }

    /// Checks if this backend supports all the given capabilities.
    fn supports_all(&self, capabilities: &[BackendCapability]) -> bool {
        let supported = self.supported_capabilities();
        capabilities.iter().all(|c| supported.contains(c))
    }
}

#[cfg(feature = "sqlite")]
#[async_trait]
impl TestableBackend for SqliteBackend {
    fn backend_kind(&self) -> BackendKind {
        self.kind()
    }

    fn supported_capabilities(&self) -> HashSet<BackendCapability> {
        self.capabilities().into_iter().collect()
    }

    async fn reset(&self) -> StorageResult<()> {
        self.reset_schema()
    }
}

/// Context for running backend tests.
///
/// Holds the backend together with the fixtures it was seeded with and the
/// rows seeding produced.
///
/// # Type Parameters
///
/// * `B` - The backend type being tested
pub struct TestContext<B: TestableBackend> {
    /// The backend instance being tested.
    pub backend: Arc<B>,

    /// Test fixtures that have been seeded.
    pub fixtures: TestFixtures,

    /// Rows stored by the last seed.
    pub seeded: SeededRoster,
}

impl<B: TestableBackend> TestContext<B> {
    /// Seeds `backend` with `fixtures` and wraps it in a context.
    pub async fn seeded(backend: B, fixtures: TestFixtures) -> StorageResult<Self> {
        let seeded = backend.seed(&fixtures).await?;
        Ok(Self {
            backend: Arc::new(backend),
            fixtures,
            seeded,
        })
    }

    /// Resets the backend and re-seeds with fixtures.
    pub async fn reset_and_seed(&mut self) -> StorageResult<()> {
        self.backend.reset().await?;
        self.seeded = self.backend.seed(&self.fixtures).await?;
        Ok(())
    }

    /// Returns a reference to the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// A query factory over the backend.
    pub fn factory(&self) -> QueryFactory<'_, B> {
        QueryFactory::new(self.backend.as_ref())
    }

    /// A member repository sharing the backend.
    pub fn repository(&self) -> MemberRepository<Arc<B>> {
        MemberRepository::new(Arc::clone(&self.backend))
    }

    /// Checks if the backend supports a capability.
    pub fn supports(&self, capability: BackendCapability) -> bool {
        self.backend.supports(capability)
    }
}

/// SQLite context seeded with the standard roster.
#[cfg(feature = "sqlite")]
pub async fn roster_context() -> TestContext<SqliteBackend> {
    seeded_context(TestFixtures::roster()).await
}

/// SQLite context seeded with `fixtures`.
#[cfg(feature = "sqlite")]
pub async fn seeded_context(fixtures: TestFixtures) -> TestContext<SqliteBackend> {
    TestContext::seeded(create_backend(), fixtures)
        .await
        .expect("Failed to seed fixtures")
}
