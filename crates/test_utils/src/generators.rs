//! Property-Based Test Generators
//!
//! Proptest strategies for crew inputs that satisfy the validation rules,
//! and `fake`-backed generators for realistic-looking bulk data.

use chrono::{Duration, NaiveDate};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use proptest::prelude::*;

use domain_crew::{CrewMember, CrewMemberFields};

use crate::builders::TestCrewMemberBuilder;
use crate::fixtures::DateFixtures;

/// A sample of valid ISO-3166 alpha-3 codes
const COUNTRY_CODES: &[&str] = &[
    "BGR", "DEU", "FRA", "GBR", "USA", "JPN", "BRA", "IND", "NZL", "ZAF",
];

/// Strategy for valid country codes
pub fn country_code_strategy() -> impl Strategy<Value = String> {
    proptest::sample::select(COUNTRY_CODES).prop_map(str::to_string)
}

/// Strategy for non-blank names up to the column width
pub fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,30} [A-Z][a-z]{1,30}"
}

/// Strategy for well-formed emails well under 100 characters
pub fn email_strategy() -> impl Strategy<Value = String> {
    ("[a-z]{1,20}", "[a-z]{1,20}", prop_oneof![Just("com"), Just("org"), Just("net")])
        .prop_map(|(local, domain, tld)| format!("{}@{}.{}", local, domain, tld))
}

/// Strategy for birthdays at least 18 years before the fixture today
pub fn adult_birthday_strategy() -> impl Strategy<Value = NaiveDate> {
    let latest = NaiveDate::from_ymd_opt(2006, 8, 17).unwrap();
    (0i64..25_000).prop_map(move |days| latest - Duration::days(days))
}

/// Strategy for birthdays less than 18 years before the fixture today
pub fn minor_birthday_strategy() -> impl Strategy<Value = NaiveDate> {
    let today = DateFixtures::today();
    (0i64..6_570).prop_map(move |days| today - Duration::days(days))
}

/// Strategy for complete, valid field sets
pub fn fields_strategy() -> impl Strategy<Value = CrewMemberFields> {
    (name_strategy(), email_strategy(), country_code_strategy()).prop_map(
        |(name, email, country_code)| CrewMemberFields {
            name,
            email,
            country_code,
            profile_image_url: "image".to_string(),
        },
    )
}

/// Generates a crew member with a fake name and a unique fake email
///
/// The index is folded into the email so repeated calls never clash on the
/// unique email constraint.
pub fn fake_crew_member(index: usize) -> CrewMember {
    let name: String = Name().fake();
    let email: String = SafeEmail().fake();
    TestCrewMemberBuilder::new()
        .with_name(name)
        .with_email(format!("{}.{}", index, email))
        .build()
}

/// Generates `count` fake crew members
pub fn fake_crew_members(count: usize) -> Vec<CrewMember> {
    (0..count).map(fake_crew_member).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::CrewFixtures;
    use domain_crew::UpdateCrewMemberRequest;
    use std::collections::HashSet;

    proptest! {
        #[test]
        fn prop_generated_fields_pass_validation(fields in fields_strategy()) {
            let request = UpdateCrewMemberRequest {
                fields,
                ..CrewFixtures::update_request()
            };
            prop_assert!(CrewFixtures::validator().validate_update(&request).is_ok());
        }

        #[test]
        fn prop_adult_birthdays_are_eighteen(birthday in adult_birthday_strategy()) {
            let eighteenth = core_kernel::add_years(birthday, 18).unwrap();
            prop_assert!(eighteenth <= DateFixtures::today());
        }
    }

    #[test]
    fn test_fake_members_have_unique_emails() {
        let members = fake_crew_members(50);
        let emails: HashSet<_> = members.iter().map(|m| m.email.as_str()).collect();
        assert_eq!(emails.len(), 50);
    }
}
