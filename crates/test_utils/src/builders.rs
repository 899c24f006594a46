//! Test Data Builders
//!
//! Builders for crew members and for a fully in-memory service stack.
//! Tests specify only the fields they care about.

use chrono::NaiveDate;
use std::sync::Arc;

use core_kernel::{CrewMemberId, LicenseId, MemberTypeId};
use domain_crew::{
    CrewMember, CrewMemberService, CrewMemberStatus, InMemoryRepository, IsoCountryLookup,
    License, MemberType, MockStatusResolver, ReferenceDataService,
};

use crate::fixtures::{CrewFixtures, DateFixtures, ReferenceFixtures};

/// Builder for constructing persisted crew member records
#[derive(Debug, Clone)]
pub struct TestCrewMemberBuilder {
    member: CrewMember,
}

impl Default for TestCrewMemberBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCrewMemberBuilder {
    /// Starts from a valid pilot with status `Ok` and a fresh id
    pub fn new() -> Self {
        let fields = CrewFixtures::fields();
        Self {
            member: CrewMember {
                id: CrewMemberId::new_v7(),
                name: fields.name,
                birthday: DateFixtures::adult_birthday(),
                email: fields.email,
                country_code: fields.country_code,
                profile_image_url: fields.profile_image_url,
                last_certification_date: DateFixtures::certification_date(),
                status: CrewMemberStatus::Ok,
                status_description: "Ok".to_string(),
                license_id: ReferenceFixtures::pilot_license(),
                member_type_id: ReferenceFixtures::pilot(),
            },
        }
    }

    pub fn with_id(mut self, id: CrewMemberId) -> Self {
        self.member.id = id;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.member.name = name.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.member.email = email.into();
        self
    }

    pub fn with_country_code(mut self, code: impl Into<String>) -> Self {
        self.member.country_code = code.into();
        self
    }

    pub fn with_birthday(mut self, birthday: NaiveDate) -> Self {
        self.member.birthday = birthday;
        self
    }

    pub fn with_certification_date(mut self, date: NaiveDate) -> Self {
        self.member.last_certification_date = date;
        self
    }

    pub fn with_status(mut self, status: CrewMemberStatus, description: impl Into<String>) -> Self {
        self.member.status = status;
        self.member.status_description = description.into();
        self
    }

    /// Shorthand for a member whose license can no longer be renewed
    pub fn retired(self) -> Self {
        self.with_status(CrewMemberStatus::CrewRetired, "Crew member is retired")
    }

    pub fn with_license(mut self, license_id: LicenseId) -> Self {
        self.member.license_id = license_id;
        self
    }

    pub fn with_member_type(mut self, member_type_id: MemberTypeId) -> Self {
        self.member.member_type_id = member_type_id;
        self
    }

    pub fn build(self) -> CrewMember {
        self.member
    }
}

/// In-memory crew stack seeded with the reference data
///
/// The repositories and the status resolver stay reachable so tests can
/// inspect writes and calls after exercising the services.
pub struct InMemoryCrewStack {
    pub crew_members: Arc<InMemoryRepository<CrewMember>>,
    pub licenses: Arc<InMemoryRepository<License>>,
    pub member_types: Arc<InMemoryRepository<MemberType>>,
    pub status_resolver: Arc<MockStatusResolver>,
}

impl Default for InMemoryCrewStack {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCrewStack {
    /// Seeded reference data, no crew members, status `Ok`
    pub fn new() -> Self {
        Self::with_members(Vec::new())
    }

    pub fn with_members(members: impl IntoIterator<Item = CrewMember>) -> Self {
        Self {
            crew_members: Arc::new(InMemoryRepository::with_entities(members)),
            licenses: Arc::new(InMemoryRepository::with_entities(License::seeded())),
            member_types: Arc::new(InMemoryRepository::with_entities(MemberType::seeded())),
            status_resolver: Arc::new(MockStatusResolver::default()),
        }
    }

    /// Replaces the status resolver
    pub fn with_status_resolver(mut self, resolver: MockStatusResolver) -> Self {
        self.status_resolver = Arc::new(resolver);
        self
    }

    /// Crew service wired to this stack with the pinned clock
    pub fn crew_service(&self) -> CrewMemberService {
        CrewMemberService::new(
            self.crew_members.clone(),
            self.licenses.clone(),
            self.member_types.clone(),
            self.status_resolver.clone(),
            CrewFixtures::validator(),
        )
    }

    pub fn reference_service(&self) -> ReferenceDataService {
        ReferenceDataService::new(
            self.licenses.clone(),
            self.member_types.clone(),
            Arc::new(IsoCountryLookup::new()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_only_given_fields() {
        let member = TestCrewMemberBuilder::new()
            .with_email("other@doe.com")
            .retired()
            .build();

        assert_eq!(member.email, "other@doe.com");
        assert_eq!(member.name, "John Doe");
        assert!(member.is_retired());
    }

    #[tokio::test]
    async fn test_stack_creates_through_mock_resolver() {
        let stack = InMemoryCrewStack::new();

        let id = stack
            .crew_service()
            .create(CrewFixtures::create_request())
            .await
            .unwrap();

        assert_eq!(stack.status_resolver.call_count(), 1);
        assert!(stack.crew_members.get(id).await.is_some());
    }
}
