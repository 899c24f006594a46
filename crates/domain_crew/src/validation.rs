//! Crew member validation rules
//!
//! Validation runs before any persistence or network interaction and
//! accumulates every violation it finds; it never stops at the first one.
//!
//! # Validation Rules
//!
//! ## Shared fields (create and update)
//! - Name must not be blank
//! - Email must not be blank, must be at most 100 characters and must be a
//!   syntactically valid address (only the first failing check is reported)
//! - Country code must not be blank, must be at most 3 characters and must
//!   be a known ISO-3166 alpha-3 code (only the first failing check is reported)
//!
//! ## Create only
//! - Birthday must be `yyyy-MM-dd`; if it is, it must not be in the future
//!   and the member must be at least 18 years old
//! - Last certification date must be `yyyy-MM-dd`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use validator::ValidateEmail;

use core_kernel::{add_years, parse_date, DateProvider};

use crate::country::CountryLookup;
use crate::dto::{CreateCrewMemberRequest, CrewMemberFields, UpdateCrewMemberRequest};

const MAX_EMAIL_LENGTH: usize = 100;
const MAX_COUNTRY_CODE_LENGTH: usize = 3;
const MINIMUM_AGE_YEARS: u32 = 18;

/// A single field violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    #[serde(rename = "fieldName")]
    pub field: String,
    #[serde(rename = "validationMessage")]
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A non-empty, ordered set of field violations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Wraps a single violation
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self(vec![ValidationError::new(field, message)])
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the given violation was reported
    pub fn contains(&self, field: &str, message: &str) -> bool {
        self.0.iter().any(|e| e.field == field && e.message == message)
    }

    /// Violations reported for one field
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.0.iter().filter(move |e| e.field == field)
    }

    pub fn into_inner(self) -> Vec<ValidationError> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error(s)", self.0.len())?;
        for (i, error) in self.0.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{}{}: {}", sep, error.field, error.message)?;
        }
        Ok(())
    }
}

/// Accumulator for violations found during a validation pass
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Creates an empty (passing) result
    pub fn ok() -> Self {
        Self::default()
    }

    /// Adds an error to the result
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ValidationError::new(field, message));
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Passes silently when nothing was recorded
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}

/// Validator for crew member payloads
#[derive(Clone)]
pub struct CrewMemberValidator {
    countries: Arc<dyn CountryLookup>,
    dates: Arc<dyn DateProvider>,
}

impl fmt::Debug for CrewMemberValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrewMemberValidator")
            .field("today", &self.dates.today())
            .finish_non_exhaustive()
    }
}

impl CrewMemberValidator {
    pub fn new(countries: Arc<dyn CountryLookup>, dates: Arc<dyn DateProvider>) -> Self {
        Self { countries, dates }
    }

    /// Validates a creation payload: shared fields plus both dates
    ///
    /// # Errors
    ///
    /// Returns every violation found, in field order.
    pub fn validate_create(&self, request: &CreateCrewMemberRequest) -> Result<(), ValidationErrors> {
        let mut result = self.validate_fields(&request.fields);
        self.validate_birthday(&request.birthday, &mut result);

        if parse_date(&request.last_certification_date).is_err() {
            result.add_error(
                "LastCertificationDate",
                "Last certification date is not in the correct format",
            );
        }

        result.into_result()
    }

    /// Validates an update payload: shared fields only
    ///
    /// # Errors
    ///
    /// Returns every violation found, in field order.
    pub fn validate_update(&self, request: &UpdateCrewMemberRequest) -> Result<(), ValidationErrors> {
        self.validate_fields(&request.fields).into_result()
    }

    /// Checks shared by every payload
    pub fn validate_fields(&self, fields: &CrewMemberFields) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if is_blank(&fields.name) {
            result.add_error("Name", "Name is missing");
        }

        if is_blank(&fields.email) {
            result.add_error("Email", "Email is missing");
        } else if fields.email.chars().count() > MAX_EMAIL_LENGTH {
            result.add_error("Email", "Email is more than 100 characters");
        } else if !fields.email.validate_email() {
            result.add_error("Email", "Email is not a valid email");
        }

        if is_blank(&fields.country_code) {
            result.add_error("CountryCode", "Country code is missing");
        } else if fields.country_code.chars().count() > MAX_COUNTRY_CODE_LENGTH {
            result.add_error("CountryCode", "Country code is more than 3 characters");
        } else if !self.countries.contains_code(&fields.country_code) {
            result.add_error("CountryCode", "Country code is not valid");
        }

        result
    }

    fn validate_birthday(&self, birthday: &str, result: &mut ValidationResult) {
        let Ok(birthday) = parse_date(birthday) else {
            result.add_error("Birthday", "Birthday is not in the correct format");
            return;
        };

        let today = self.dates.today();
        if birthday > today {
            result.add_error("Birthday", "Birthday is in the future");
        } else if add_years(birthday, MINIMUM_AGE_YEARS).map_or(true, |adult| adult > today) {
            result.add_error("Birthday", "Crew member is younger than 18");
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
