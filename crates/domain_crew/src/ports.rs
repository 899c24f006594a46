//! Crew Domain Ports
//!
//! This module defines the port interfaces the crew services depend on,
//! enabling swappable implementations (PostgreSQL, in-memory mock, REST).
//!
//! # Architecture
//!
//! - [`Repository`] is a generic persistence gateway parameterized over an
//!   [`Entity`]. It is implemented for crew members, licenses and member types.
//! - [`CrewMemberRepository`] adds the email uniqueness query.
//! - [`StatusResolver`] computes a crew member's status from the birthday and
//!   certification date; the production adapter calls the status service.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_crew::ports::{CrewMemberRepository, StatusResolver};
//! use std::sync::Arc;
//!
//! let service = CrewMemberService::new(
//!     crew_members,   // Arc<dyn CrewMemberRepository>
//!     licenses,       // Arc<dyn Repository<License>>
//!     member_types,   // Arc<dyn Repository<MemberType>>
//!     status_resolver,
//!     validator,
//! );
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;
use std::fmt;
use std::hash::Hash;

use core_kernel::{CrewMemberId, DomainPort, HealthCheckable, LicenseId, MemberTypeId, PortError};

use crate::crew_member::CrewMember;
use crate::dto::CrewMemberStatusDto;
use crate::error::ExternalServiceError;
use crate::license::License;
use crate::member_type::MemberType;
use crate::pagination::PageWindow;

/// A persisted record with a stable identity
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Copy + Eq + Ord + Hash + fmt::Display + fmt::Debug + Send + Sync + 'static;

    /// Name reported in not-found errors
    const ENTITY_NAME: &'static str;

    fn id(&self) -> Self::Id;

    /// Primary listing order; ties are broken by id
    fn sort_key(&self) -> &str;

    /// Value that must be unique across all records of this kind, if any
    fn unique_key(&self) -> Option<&str> {
        None
    }
}

impl Entity for CrewMember {
    type Id = CrewMemberId;
    const ENTITY_NAME: &'static str = "CrewMember";

    fn id(&self) -> CrewMemberId {
        self.id
    }

    fn sort_key(&self) -> &str {
        &self.name
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.email)
    }
}

impl Entity for License {
    type Id = LicenseId;
    const ENTITY_NAME: &'static str = "License";

    fn id(&self) -> LicenseId {
        self.id
    }

    fn sort_key(&self) -> &str {
        &self.name
    }
}

impl Entity for MemberType {
    type Id = MemberTypeId;
    const ENTITY_NAME: &'static str = "MemberType";

    fn id(&self) -> MemberTypeId {
        self.id
    }

    fn sort_key(&self) -> &str {
        &self.name
    }
}

/// Read side of the persistence gateway
#[async_trait]
pub trait ReadRepository<E: Entity>: DomainPort {
    /// Retrieves a record by id, `None` if absent
    async fn find(&self, id: E::Id) -> Result<Option<E>, PortError>;

    /// Checks if a record exists
    async fn exists(&self, id: E::Id) -> Result<bool, PortError>;

    /// Lists records ordered by sort key then id, optionally windowed
    async fn list(&self, window: Option<PageWindow>) -> Result<Vec<E>, PortError>;

    /// Counts all records, ignoring any window
    async fn count(&self) -> Result<u64, PortError>;
}

/// Generic persistence gateway
///
/// Writes are durable when the call returns; there is no separate save step.
#[async_trait]
pub trait Repository<E: Entity>: ReadRepository<E> {
    /// Inserts a new record
    ///
    /// Returns `PortError::Conflict` if the id or the unique key is taken.
    async fn add(&self, entity: E) -> Result<(), PortError>;

    /// Replaces an existing record
    ///
    /// Returns `PortError::NotFound` if absent, `PortError::Conflict` if the
    /// unique key now clashes with another record.
    async fn update(&self, entity: E) -> Result<(), PortError>;

    /// Removes a record, `PortError::NotFound` if absent
    async fn delete(&self, id: E::Id) -> Result<(), PortError>;
}

/// Crew member persistence
#[async_trait]
pub trait CrewMemberRepository: Repository<CrewMember> + HealthCheckable {
    /// Checks if a crew member other than `excluding` uses the email
    ///
    /// The comparison is exact and case-sensitive.
    async fn email_in_use(
        &self,
        email: &str,
        excluding: Option<CrewMemberId>,
    ) -> Result<bool, PortError>;
}

/// Computes a crew member's status
#[async_trait]
pub trait StatusResolver: DomainPort {
    /// Resolves the status for a birthday and certification date
    ///
    /// A single attempt is made; failures are returned as they occur.
    async fn resolve(
        &self,
        birthday: NaiveDate,
        certification_date: NaiveDate,
    ) -> Result<CrewMemberStatusDto, ExternalServiceError>;
}

/// In-memory implementations of the crew ports for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use core_kernel::HealthCheckResult;

    use crate::crew_member::CrewMemberStatus;

    /// In-memory repository for any entity
    ///
    /// Enforces the entity's unique key on writes and counts successful
    /// writes so tests can assert that nothing was persisted.
    #[derive(Debug)]
    pub struct InMemoryRepository<E: Entity> {
        entities: Arc<RwLock<HashMap<E::Id, E>>>,
        writes: AtomicUsize,
    }

    impl<E: Entity> Default for InMemoryRepository<E> {
        fn default() -> Self {
            Self {
                entities: Arc::new(RwLock::new(HashMap::new())),
                writes: AtomicUsize::new(0),
            }
        }
    }

    impl<E: Entity> InMemoryRepository<E> {
        /// Creates an empty repository
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with records; does not count as writes
        pub fn with_entities(entities: impl IntoIterator<Item = E>) -> Self {
            let map = entities.into_iter().map(|e| (e.id(), e)).collect();
            Self {
                entities: Arc::new(RwLock::new(map)),
                writes: AtomicUsize::new(0),
            }
        }

        /// Number of successful add/update/delete calls
        pub fn write_count(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }

        /// Current record for an id, bypassing the port
        pub async fn get(&self, id: E::Id) -> Option<E> {
            self.entities.read().await.get(&id).cloned()
        }

        fn unique_key_taken(map: &HashMap<E::Id, E>, entity: &E) -> bool {
            let Some(key) = entity.unique_key() else {
                return false;
            };
            map.values()
                .any(|other| other.id() != entity.id() && other.unique_key() == Some(key))
        }
    }

    impl<E: Entity> DomainPort for InMemoryRepository<E> {}

    #[async_trait]
    impl<E: Entity> HealthCheckable for InMemoryRepository<E> {
        async fn health_check(&self) -> HealthCheckResult {
            let mut result = HealthCheckResult::healthy(format!("in-memory-{}", E::ENTITY_NAME));
            result.message = Some("Mock adapter always healthy".to_string());
            result
        }
    }

    #[async_trait]
    impl<E: Entity> ReadRepository<E> for InMemoryRepository<E> {
        async fn find(&self, id: E::Id) -> Result<Option<E>, PortError> {
            Ok(self.entities.read().await.get(&id).cloned())
        }

        async fn exists(&self, id: E::Id) -> Result<bool, PortError> {
            Ok(self.entities.read().await.contains_key(&id))
        }

        async fn list(&self, window: Option<PageWindow>) -> Result<Vec<E>, PortError> {
            let mut results: Vec<E> = self.entities.read().await.values().cloned().collect();
            results.sort_by(|a, b| {
                a.sort_key()
                    .cmp(b.sort_key())
                    .then_with(|| a.id().cmp(&b.id()))
            });

            // Apply pagination
            if let Some(window) = window {
                let offset = usize::try_from(window.offset).unwrap_or(usize::MAX);
                let limit = usize::try_from(window.limit).unwrap_or(usize::MAX);
                results = results.into_iter().skip(offset).take(limit).collect();
            }

            Ok(results)
        }

        async fn count(&self) -> Result<u64, PortError> {
            Ok(self.entities.read().await.len() as u64)
        }
    }

    #[async_trait]
    impl<E: Entity> Repository<E> for InMemoryRepository<E> {
        async fn add(&self, entity: E) -> Result<(), PortError> {
            let mut entities = self.entities.write().await;
            if entities.contains_key(&entity.id()) {
                return Err(PortError::conflict(format!(
                    "{} {} already exists",
                    E::ENTITY_NAME,
                    entity.id()
                )));
            }
            if Self::unique_key_taken(&entities, &entity) {
                return Err(PortError::conflict(format!("{} unique key taken", E::ENTITY_NAME)));
            }

            entities.insert(entity.id(), entity);
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn update(&self, entity: E) -> Result<(), PortError> {
            let mut entities = self.entities.write().await;
            if !entities.contains_key(&entity.id()) {
                return Err(PortError::not_found(E::ENTITY_NAME, entity.id()));
            }
            if Self::unique_key_taken(&entities, &entity) {
                return Err(PortError::conflict(format!("{} unique key taken", E::ENTITY_NAME)));
            }

            entities.insert(entity.id(), entity);
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn delete(&self, id: E::Id) -> Result<(), PortError> {
            self.entities
                .write()
                .await
                .remove(&id)
                .ok_or_else(|| PortError::not_found(E::ENTITY_NAME, id))?;
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[async_trait]
    impl CrewMemberRepository for InMemoryRepository<CrewMember> {
        async fn email_in_use(
            &self,
            email: &str,
            excluding: Option<CrewMemberId>,
        ) -> Result<bool, PortError> {
            Ok(self
                .entities
                .read()
                .await
                .values()
                .any(|m| m.email == email && Some(m.id) != excluding))
        }
    }

    /// Status resolver returning a canned response
    #[derive(Debug)]
    pub struct MockStatusResolver {
        response: RwLock<Result<CrewMemberStatusDto, ExternalServiceError>>,
        calls: AtomicUsize,
        last_request: RwLock<Option<(NaiveDate, NaiveDate)>>,
    }

    impl MockStatusResolver {
        /// Resolves every request to the given status
        pub fn returning(status: CrewMemberStatus, description: impl Into<String>) -> Self {
            Self::with_response(Ok(CrewMemberStatusDto {
                status,
                status_description: description.into(),
            }))
        }

        /// Fails every request with the given error
        pub fn failing(error: ExternalServiceError) -> Self {
            Self::with_response(Err(error))
        }

        fn with_response(response: Result<CrewMemberStatusDto, ExternalServiceError>) -> Self {
            Self {
                response: RwLock::new(response),
                calls: AtomicUsize::new(0),
                last_request: RwLock::new(None),
            }
        }

        /// Replaces the canned response
        pub async fn set_response(&self, response: Result<CrewMemberStatusDto, ExternalServiceError>) {
            *self.response.write().await = response;
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        /// The `(birthday, certification_date)` of the latest call
        pub async fn last_request(&self) -> Option<(NaiveDate, NaiveDate)> {
            *self.last_request.read().await
        }
    }

    impl Default for MockStatusResolver {
        fn default() -> Self {
            Self::returning(CrewMemberStatus::Ok, "Ok")
        }
    }

    impl DomainPort for MockStatusResolver {}

    #[async_trait]
    impl StatusResolver for MockStatusResolver {
        async fn resolve(
            &self,
            birthday: NaiveDate,
            certification_date: NaiveDate,
        ) -> Result<CrewMemberStatusDto, ExternalServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.write().await = Some((birthday, certification_date));
            self.response.read().await.clone()
        }
    }
}
