//! Custom Test Assertions
//!
//! Assertion helpers for crew service outcomes that print the whole error
//! on mismatch.

use domain_crew::{CrewError, CrewMemberPage};

/// Asserts that the error is a validation failure carrying the given pair
///
/// # Panics
///
/// Panics if the error is not `CrewError::Validation` or lacks the pair
pub fn assert_validation_error(error: &CrewError, field: &str, message: &str) {
    match error {
        CrewError::Validation(errors) => assert!(
            errors.contains(field, message),
            "Expected validation error {}: {}, got {}",
            field,
            message,
            errors
        ),
        other => panic!("Expected validation failure, got {:?}", other),
    }
}

/// Asserts that the error reports a missing entity of the given kind
pub fn assert_not_found(error: &CrewError, entity: &str) {
    assert!(
        matches!(error, CrewError::EntityNotFound(name) if name == entity),
        "Expected {} not found, got {:?}",
        entity,
        error
    );
}

/// Asserts that the error reports a clash on the given unique field
pub fn assert_duplicate(error: &CrewError, field: &str) {
    assert!(
        matches!(error, CrewError::DuplicateEntity(name) if name == field),
        "Expected duplicate {}, got {:?}",
        field,
        error
    );
}

/// Asserts the totals and the number of members on a page
pub fn assert_page(page: &CrewMemberPage, total_count: u64, total_pages: u64, len: usize) {
    assert_eq!(
        (page.total_count, page.total_pages, page.crew_members.len()),
        (total_count, total_pages, len),
        "Expected (totalCount, totalPages, len) = ({}, {}, {})",
        total_count,
        total_pages,
        len
    );
}
