//! HTTP API tests against the router wired to in-memory adapters

use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;

use core_kernel::{AdapterHealth, HealthCheckResult, HealthCheckable};
use domain_crew::{CrewMemberStatus, ExternalServiceError, MockStatusResolver, ATP_LICENSE_ID};
use interface_api::{config::ApiConfig, create_router, AppState};
use test_utils::{fake_crew_members, InMemoryCrewStack, TestCrewMemberBuilder};

fn state(stack: &InMemoryCrewStack, config: ApiConfig) -> AppState {
    AppState {
        crew_service: Arc::new(stack.crew_service()),
        reference_service: Arc::new(stack.reference_service()),
        health: stack.crew_members.clone(),
        config,
    }
}

fn server(stack: &InMemoryCrewStack) -> TestServer {
    TestServer::new(create_router(state(stack, ApiConfig::default()))).unwrap()
}

fn create_body(email: &str) -> Value {
    json!({
        "name": "John Doe",
        "email": email,
        "countryCode": "BGR",
        "profileImageUrl": "image",
        "birthday": "1990-01-01",
        "lastCertificationDate": "2024-01-01",
        "licenseId": "ead47c5e-c268-44ea-8837-30ff16e0ee10",
        "memberTypeId": "f3b3b3b3-3b3b-3b3b-3b3b-3b3b3b3b3b3b"
    })
}

fn update_body(email: &str) -> Value {
    json!({
        "name": "Jane Doe",
        "email": email,
        "countryCode": "DEU",
        "profileImageUrl": "other",
        "licenseId": "09917044-4413-43a4-82bf-4689ba49d2a2",
        "memberTypeId": "f3b3b3b3-3b3b-3b3b-3b3b-3b3b3b3b3b3d"
    })
}

// ============================================================================
// Create
// ============================================================================

mod create_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_returns_id_and_member_is_readable() {
        let stack = InMemoryCrewStack::new();
        let server = server(&stack);

        let response = server.post("/api/crew-members").json(&create_body("john@doe.com")).await;

        response.assert_status(StatusCode::CREATED);
        let id = response.json::<Value>()["id"].as_str().unwrap().to_string();

        let member = server.get(&format!("/api/crew-members/{}", id)).await;
        member.assert_status_ok();
        let member = member.json::<Value>();
        assert_eq!(member["email"], "john@doe.com");
        assert_eq!(member["birthday"], "1990-01-01");
        assert_eq!(member["status"], 0);
        assert_eq!(member["license"]["name"], "Airline transport pilot (ATP) license");
        assert_eq!(member["memberType"]["type"], 0);
    }

    #[tokio::test]
    async fn test_validation_errors_are_listed() {
        let stack = InMemoryCrewStack::new();
        let mut body = create_body("");
        body["name"] = json!("");
        body["countryCode"] = json!("");

        let response = server(&stack).post("/api/crew-members").json(&body).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let errors = response.json::<Value>();
        let fields: Vec<_> = errors
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["fieldName"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["Name", "Email", "CountryCode"]);
        assert_eq!(errors[0]["validationMessage"], "Name is missing");
        assert_eq!(stack.crew_members.write_count(), 0);
    }

    #[tokio::test]
    async fn test_null_text_fields_are_reported_as_missing() {
        let stack = InMemoryCrewStack::new();
        let mut body = create_body("");
        body["name"] = Value::Null;
        body["email"] = Value::Null;
        body["countryCode"] = Value::Null;
        body["profileImageUrl"] = Value::Null;

        let response = server(&stack).post("/api/crew-members").json(&body).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!([
            { "fieldName": "Name", "validationMessage": "Name is missing" },
            { "fieldName": "Email", "validationMessage": "Email is missing" },
            { "fieldName": "CountryCode", "validationMessage": "Country code is missing" }
        ]));
        assert_eq!(stack.status_resolver.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_license_is_not_found() {
        let stack = InMemoryCrewStack::new();
        let mut body = create_body("john@doe.com");
        body["licenseId"] = json!(uuid::Uuid::new_v4());

        let response = server(&stack).post("/api/crew-members").json(&body).await;

        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({ "entityName": "License" }));
        assert_eq!(stack.status_resolver.call_count(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let stack = InMemoryCrewStack::with_members(vec![TestCrewMemberBuilder::new()
            .with_email("john@doe.com")
            .build()]);

        let response = server(&stack)
            .post("/api/crew-members")
            .json(&create_body("john@doe.com"))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        response.assert_json(&json!({ "duplicateEntity": "Crew.Email" }));
    }

    #[tokio::test]
    async fn test_status_service_failure_is_bad_request() {
        let stack = InMemoryCrewStack::new()
            .with_status_resolver(MockStatusResolver::failing(ExternalServiceError::BadStatusCode(503)));

        let response = server(&stack)
            .post("/api/crew-members")
            .json(&create_body("john@doe.com"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "message": "bad status code 503" }));
        assert_eq!(stack.crew_members.write_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let stack = InMemoryCrewStack::new();

        let response = server(&stack)
            .post("/api/crew-members")
            .bytes("{\"name\": ".into())
            .content_type("application/json")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_reference_id_is_bad_request() {
        let stack = InMemoryCrewStack::new();
        let mut body = create_body("john@doe.com");
        body.as_object_mut().unwrap().remove("memberTypeId");

        let response = server(&stack).post("/api/crew-members").json(&body).await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}

// ============================================================================
// Queries
// ============================================================================

mod query_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_pages() {
        let stack = InMemoryCrewStack::with_members(fake_crew_members(7));
        let server = server(&stack);

        let page = server
            .get("/api/crew-members")
            .add_query_param("page", 2)
            .add_query_param("pageSize", 2)
            .await
            .json::<Value>();

        assert_eq!(page["totalCount"], 7);
        assert_eq!(page["totalPages"], 4);
        assert_eq!(page["crewMembers"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_non_integer_paging_lists_everything() {
        let stack = InMemoryCrewStack::with_members(fake_crew_members(7));

        let page = server(&stack)
            .get("/api/crew-members")
            .add_query_param("page", "first")
            .add_query_param("pageSize", 2)
            .await
            .json::<Value>();

        assert_eq!(page["totalPages"], 4);
        assert_eq!(page["crewMembers"].as_array().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_empty_listing_has_zero_pages() {
        let stack = InMemoryCrewStack::new();

        let response = server(&stack).get("/api/crew-members").await;

        response.assert_status_ok();
        response.assert_json(&json!({ "totalCount": 0, "totalPages": 0, "crewMembers": [] }));
    }

    #[tokio::test]
    async fn test_unknown_member_is_not_found() {
        let stack = InMemoryCrewStack::new();

        let response = server(&stack)
            .get(&format!("/api/crew-members/{}", uuid::Uuid::new_v4()))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({ "entityName": "CrewMember" }));
    }

    #[tokio::test]
    async fn test_malformed_id_is_bad_request() {
        let stack = InMemoryCrewStack::new();

        let response = server(&stack).get("/api/crew-members/not-a-uuid").await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}

// ============================================================================
// Update, delete, renew
// ============================================================================

mod command_tests {
    use super::*;

    #[tokio::test]
    async fn test_update_persists_fields() {
        let member = TestCrewMemberBuilder::new().build();
        let stack = InMemoryCrewStack::with_members(vec![member.clone()]);

        let response = server(&stack)
            .patch(&format!("/api/crew-members/{}", member.id.as_uuid()))
            .json(&update_body("jane@doe.com"))
            .await;

        response.assert_status_ok();
        let stored = stack.crew_members.get(member.id).await.unwrap();
        assert_eq!(stored.email, "jane@doe.com");
        assert_eq!(stored.country_code, "DEU");
        assert_eq!(stored.status, member.status);
    }

    #[tokio::test]
    async fn test_update_to_taken_email_is_conflict() {
        let member = TestCrewMemberBuilder::new().with_email("a@x.com").build();
        let other = TestCrewMemberBuilder::new().with_email("b@x.com").build();
        let stack = InMemoryCrewStack::with_members(vec![member.clone(), other]);

        let response = server(&stack)
            .patch(&format!("/api/crew-members/{}", member.id.as_uuid()))
            .json(&update_body("b@x.com"))
            .await;

        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_delete_answers_created_then_not_found() {
        let member = TestCrewMemberBuilder::new().build();
        let stack = InMemoryCrewStack::with_members(vec![member.clone()]);
        let server = server(&stack);
        let path = format!("/api/crew-members/{}", member.id.as_uuid());

        server.delete(&path).await.assert_status(StatusCode::CREATED);
        server.delete(&path).await.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_renew_with_malformed_date() {
        let member = TestCrewMemberBuilder::new().build();
        let stack = InMemoryCrewStack::with_members(vec![member.clone()]);

        let response = server(&stack)
            .patch(&format!("/api/crew-members/{}/license/renew", member.id.as_uuid()))
            .add_query_param("newCertificationDate", "01-08-2024")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "message": "Invalid date." }));
    }

    #[tokio::test]
    async fn test_renew_retired_member_is_rejected_without_status_call() {
        let member = TestCrewMemberBuilder::new().retired().build();
        let stack = InMemoryCrewStack::with_members(vec![member.clone()]);

        let response = server(&stack)
            .patch(&format!("/api/crew-members/{}/license/renew", member.id.as_uuid()))
            .add_query_param("newCertificationDate", "2024-08-01")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!([{
            "fieldName": "Status",
            "validationMessage": "Crew member is retired"
        }]));
        assert_eq!(stack.status_resolver.call_count(), 0);
    }

    #[tokio::test]
    async fn test_renew_stores_new_status() {
        let member = TestCrewMemberBuilder::new().build();
        let stack = InMemoryCrewStack::with_members(vec![member.clone()]).with_status_resolver(
            MockStatusResolver::returning(CrewMemberStatus::LicenseExpired, "Expired"),
        );

        let response = server(&stack)
            .patch(&format!("/api/crew-members/{}/license/renew", member.id.as_uuid()))
            .add_query_param("newCertificationDate", "2024-08-01")
            .await;

        response.assert_status_ok();
        let stored = stack.crew_members.get(member.id).await.unwrap();
        assert_eq!(stored.status, CrewMemberStatus::LicenseExpired);
        assert_eq!(stored.status_description, "Expired");
        assert_eq!(stored.last_certification_date.to_string(), "2024-08-01");
    }
}

// ============================================================================
// Reference data
// ============================================================================

mod reference_tests {
    use super::*;

    #[tokio::test]
    async fn test_licenses_and_member_types() {
        let stack = InMemoryCrewStack::new();
        let server = server(&stack);

        let licenses = server.get("/api/licenses").await.json::<Value>();
        assert_eq!(licenses.as_array().unwrap().len(), 2);
        assert_eq!(licenses[0]["id"], ATP_LICENSE_ID.as_uuid().to_string());

        let member_types = server.get("/api/member-types").await.json::<Value>();
        let kinds: Vec<_> = member_types
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["type"].as_u64().unwrap())
            .collect();
        assert_eq!(kinds, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_countries_are_listed_by_alpha3() {
        let stack = InMemoryCrewStack::new();

        let countries = server(&stack).get("/api/countries").await.json::<Vec<Value>>();

        assert!(countries.len() > 240);
        let bulgaria = countries.iter().find(|c| c["code"] == "BGR").unwrap();
        assert_eq!(bulgaria["name"], "Bulgaria");
    }
}

// ============================================================================
// API key and health
// ============================================================================

mod access_tests {
    use super::*;

    fn keyed_server(stack: &InMemoryCrewStack) -> TestServer {
        let config = ApiConfig {
            api_key: Some("secret".to_string()),
            ..ApiConfig::default()
        };
        TestServer::new(create_router(state(stack, config))).unwrap()
    }

    #[tokio::test]
    async fn test_missing_or_wrong_key_is_unauthorized() {
        let stack = InMemoryCrewStack::new();
        let server = keyed_server(&stack);

        server.get("/api/licenses").await.assert_status(StatusCode::UNAUTHORIZED);
        server
            .get("/api/licenses")
            .add_query_param("code", "wrong")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_key_in_header_or_query() {
        let stack = InMemoryCrewStack::new();
        let server = keyed_server(&stack);

        server
            .get("/api/licenses")
            .add_header(
                HeaderName::from_static("x-functions-key"),
                HeaderValue::from_static("secret"),
            )
            .await
            .assert_status_ok();
        server
            .get("/api/licenses")
            .add_query_param("code", "secret")
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let stack = InMemoryCrewStack::new();
        let server = keyed_server(&stack);

        server.get("/health").await.assert_status_ok();
        server.get("/health/ready").await.assert_status_ok();
    }

    struct Unreachable;

    #[async_trait]
    impl HealthCheckable for Unreachable {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                status: AdapterHealth::Unhealthy,
                message: Some("connection refused".to_string()),
                ..HealthCheckResult::healthy("unreachable")
            }
        }
    }

    #[tokio::test]
    async fn test_ready_is_unavailable_when_storage_is_down() {
        let stack = InMemoryCrewStack::new();
        let mut state = state(&stack, ApiConfig::default());
        state.health = Arc::new(Unreachable);

        let server = TestServer::new(create_router(state)).unwrap();
        let response = server.get("/health/ready").await;

        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.json::<Value>()["status"], "unhealthy");
    }
}
