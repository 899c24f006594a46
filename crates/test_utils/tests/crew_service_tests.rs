//! Crew service rules over generated inputs, wired to the in-memory stack

use proptest::prelude::*;

use core_kernel::format_date;
use domain_crew::{CreateCrewMemberRequest, CrewError, UpdateCrewMemberRequest};
use test_utils::{
    assert_not_found, assert_validation_error, fields_strategy, minor_birthday_strategy,
    name_strategy, CrewFixtures, InMemoryCrewStack, ReferenceFixtures, TestCrewMemberBuilder,
};

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_valid_fields_are_created_as_given(fields in fields_strategy()) {
        let stack = InMemoryCrewStack::new();
        let service = stack.crew_service();
        let request = CreateCrewMemberRequest {
            fields: fields.clone(),
            ..CrewFixtures::create_request()
        };

        let stored = block_on(async {
            let id = service.create(request).await.unwrap();
            service.get_by_id(id).await.unwrap()
        });

        prop_assert_eq!(stored.fields, fields);
        prop_assert_eq!(stack.status_resolver.call_count(), 1);
    }

    #[test]
    fn prop_minors_are_rejected_before_any_side_effect(birthday in minor_birthday_strategy()) {
        let stack = InMemoryCrewStack::new();
        let request = CreateCrewMemberRequest {
            birthday: format_date(birthday),
            ..CrewFixtures::create_request()
        };

        let error = block_on(stack.crew_service().create(request)).unwrap_err();

        assert_validation_error(&error, "Birthday", "Crew member is younger than 18");
        prop_assert_eq!(stack.crew_members.write_count(), 0);
        prop_assert_eq!(stack.status_resolver.call_count(), 0);
    }

    #[test]
    fn prop_update_renames_without_touching_status(name in name_strategy()) {
        let member = TestCrewMemberBuilder::new().build();
        let id = member.id;
        let stack = InMemoryCrewStack::with_members(vec![member.clone()]);
        let service = stack.crew_service();
        let mut request = CrewFixtures::update_request();
        request.fields.name = name.clone();

        let stored = block_on(async {
            service.update(id, request).await.unwrap();
            stack.crew_members.get(id).await.unwrap()
        });

        prop_assert_eq!(stored.name, name);
        prop_assert_eq!(stored.status, member.status);
        prop_assert_eq!(stored.last_certification_date, member.last_certification_date);
    }
}

#[tokio::test]
async fn test_unknown_references_are_not_found() {
    let stack = InMemoryCrewStack::new();
    let service = stack.crew_service();

    let unknown_license = CreateCrewMemberRequest {
        license_id: ReferenceFixtures::unknown_license(),
        ..CrewFixtures::create_request()
    };
    let error = service.create(unknown_license).await.unwrap_err();
    assert_not_found(&error, "License");

    let unknown_member_type = CreateCrewMemberRequest {
        member_type_id: ReferenceFixtures::unknown_member_type(),
        ..CrewFixtures::create_request()
    };
    let error = service.create(unknown_member_type).await.unwrap_err();
    assert_not_found(&error, "MemberType");

    assert_eq!(stack.crew_members.write_count(), 0);
}

#[tokio::test]
async fn test_update_of_missing_member_is_not_found() {
    let stack = InMemoryCrewStack::new();
    let id = TestCrewMemberBuilder::new().build().id;

    let error = stack
        .crew_service()
        .update(id, CrewFixtures::update_request())
        .await
        .unwrap_err();

    assert_not_found(&error, "CrewMember");
}

#[tokio::test]
async fn test_retired_member_cannot_renew() {
    let member = TestCrewMemberBuilder::new().retired().build();
    let id = member.id;
    let stack = InMemoryCrewStack::with_members(vec![member]);

    let error = stack
        .crew_service()
        .renew_license(id, test_utils::DateFixtures::renewal_date())
        .await
        .unwrap_err();

    assert!(matches!(error, CrewError::Validation(_)));
    assert_validation_error(&error, "Status", "Crew member is retired");
    assert_eq!(stack.status_resolver.call_count(), 0);
}

#[test]
fn test_blank_update_fields_fail_validation() {
    let request = UpdateCrewMemberRequest {
        fields: Default::default(),
        ..CrewFixtures::update_request()
    };

    let error = CrewError::Validation(
        CrewFixtures::validator()
            .validate_update(&request)
            .unwrap_err(),
    );

    assert_validation_error(&error, "Name", "Name is missing");
    assert_validation_error(&error, "Email", "Email is missing");
    assert_validation_error(&error, "CountryCode", "Country code is missing");
}
