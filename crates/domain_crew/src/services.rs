//! Crew application services
//!
//! [`CrewMemberService`] orchestrates validation, reference checks, the
//! email uniqueness check and the status resolver for every crew member
//! operation. [`ReferenceDataService`] serves the static lookup lists.
//!
//! Each operation awaits its collaborators one after the other; the result
//! of every step is needed before the next one is issued.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use core_kernel::{parse_date, CrewMemberId, LicenseId, MemberTypeId, PortError};

use crate::country::CountryLookup;
use crate::crew_member::CrewMember;
use crate::dto::{
    CountryDto, CreateCrewMemberRequest, CrewMemberPage, CrewMemberResponse, LicenseSummary,
    MemberTypeSummary, UpdateCrewMemberRequest,
};
use crate::error::CrewError;
use crate::license::License;
use crate::member_type::MemberType;
use crate::pagination::PageRequest;
use crate::ports::{CrewMemberRepository, Entity, Repository, StatusResolver};
use crate::validation::CrewMemberValidator;

/// Field reported when an email is already taken
pub const EMAIL_UNIQUE_FIELD: &str = "Crew.Email";

/// Crew member lifecycle
#[derive(Clone)]
pub struct CrewMemberService {
    crew_members: Arc<dyn CrewMemberRepository>,
    licenses: Arc<dyn Repository<License>>,
    member_types: Arc<dyn Repository<MemberType>>,
    status_resolver: Arc<dyn StatusResolver>,
    validator: CrewMemberValidator,
}

impl CrewMemberService {
    pub fn new(
        crew_members: Arc<dyn CrewMemberRepository>,
        licenses: Arc<dyn Repository<License>>,
        member_types: Arc<dyn Repository<MemberType>>,
        status_resolver: Arc<dyn StatusResolver>,
        validator: CrewMemberValidator,
    ) -> Self {
        Self {
            crew_members,
            licenses,
            member_types,
            status_resolver,
            validator,
        }
    }

    /// Creates a crew member with a freshly resolved status
    ///
    /// Checks run in a fixed order: validation, license, member type, email.
    /// The status service is only called once all of them pass.
    #[instrument(skip_all, fields(email = %request.fields.email))]
    pub async fn create(&self, request: CreateCrewMemberRequest) -> Result<CrewMemberId, CrewError> {
        self.validator.validate_create(&request)?;
        self.ensure_references(request.license_id, request.member_type_id).await?;

        if self.crew_members.email_in_use(&request.fields.email, None).await? {
            debug!("Email already in use");
            return Err(CrewError::duplicate(EMAIL_UNIQUE_FIELD));
        }

        let birthday = parse_date(&request.birthday)
            .map_err(|_| CrewError::invalid("Birthday", "Birthday is not in the correct format"))?;
        let last_certification_date = parse_date(&request.last_certification_date).map_err(|_| {
            CrewError::invalid(
                "LastCertificationDate",
                "Last certification date is not in the correct format",
            )
        })?;

        let status = self
            .status_resolver
            .resolve(birthday, last_certification_date)
            .await?;

        let member = CrewMember {
            id: CrewMemberId::new_v7(),
            name: request.fields.name,
            birthday,
            email: request.fields.email,
            country_code: request.fields.country_code,
            profile_image_url: request.fields.profile_image_url,
            last_certification_date,
            status: status.status,
            status_description: status.status_description,
            license_id: request.license_id,
            member_type_id: request.member_type_id,
        };
        let id = member.id;

        self.crew_members.add(member).await.map_err(write_error)?;

        info!(crew_member_id = %id, "Crew member created");
        Ok(id)
    }

    /// Updates the editable fields of a crew member
    ///
    /// Status, status description and both dates are left unchanged.
    #[instrument(skip_all, fields(crew_member_id = %id, email = %request.fields.email))]
    pub async fn update(
        &self,
        id: CrewMemberId,
        request: UpdateCrewMemberRequest,
    ) -> Result<(), CrewError> {
        self.validator.validate_update(&request)?;

        let mut member = self.find_member(id).await?;
        self.ensure_references(request.license_id, request.member_type_id).await?;

        if self.crew_members.email_in_use(&request.fields.email, Some(id)).await? {
            debug!("Email already used by another crew member");
            return Err(CrewError::duplicate(EMAIL_UNIQUE_FIELD));
        }

        member.apply_update(&request);
        self.crew_members.update(member).await.map_err(write_error)?;

        info!("Crew member updated");
        Ok(())
    }

    /// Records a new certification date and re-resolves the status
    ///
    /// Retired crew members cannot renew; the status service is not called
    /// for them.
    #[instrument(skip_all, fields(crew_member_id = %id, new_certification_date = %new_certification_date))]
    pub async fn renew_license(
        &self,
        id: CrewMemberId,
        new_certification_date: NaiveDate,
    ) -> Result<(), CrewError> {
        let mut member = self.find_member(id).await?;

        if member.is_retired() {
            warn!("Renewal rejected for retired crew member");
            return Err(CrewError::invalid("Status", "Crew member is retired"));
        }

        let status = self
            .status_resolver
            .resolve(member.birthday, new_certification_date)
            .await?;

        member.renew_license(new_certification_date, status);
        self.crew_members.update(member).await.map_err(write_error)?;

        info!("Crew member license renewed");
        Ok(())
    }

    /// Lists crew members with their license and member type
    ///
    /// The total count covers the whole set regardless of paging.
    #[instrument(skip(self))]
    pub async fn get_all(&self, paging: PageRequest) -> Result<CrewMemberPage, CrewError> {
        let total_count = self.crew_members.count().await?;
        let members = self.crew_members.list(paging.window()).await?;

        let licenses = index_by_id(self.licenses.list(None).await?);
        let member_types = index_by_id(self.member_types.list(None).await?);

        let crew_members = members
            .iter()
            .map(|member| {
                let license = lookup(&licenses, member.license_id)?;
                let member_type = lookup(&member_types, member.member_type_id)?;
                Ok(CrewMemberResponse::project(member, license, member_type))
            })
            .collect::<Result<Vec<_>, PortError>>()?;

        debug!(total_count, returned = crew_members.len(), "Listed crew members");
        Ok(CrewMemberPage {
            total_count,
            total_pages: paging.total_pages(total_count),
            crew_members,
        })
    }

    /// Retrieves a single crew member with its license and member type
    #[instrument(skip_all, fields(crew_member_id = %id))]
    pub async fn get_by_id(&self, id: CrewMemberId) -> Result<CrewMemberResponse, CrewError> {
        let member = self.find_member(id).await?;

        let license = self
            .licenses
            .find(member.license_id)
            .await?
            .ok_or_else(|| dangling::<License>(member.license_id))?;
        let member_type = self
            .member_types
            .find(member.member_type_id)
            .await?
            .ok_or_else(|| dangling::<MemberType>(member.member_type_id))?;

        Ok(CrewMemberResponse::project(&member, &license, &member_type))
    }

    /// Removes a crew member
    #[instrument(skip_all, fields(crew_member_id = %id))]
    pub async fn delete(&self, id: CrewMemberId) -> Result<(), CrewError> {
        let member = self.find_member(id).await?;

        self.crew_members.delete(member.id).await.map_err(|e| {
            if e.is_not_found() {
                CrewError::not_found(CrewMember::ENTITY_NAME)
            } else {
                CrewError::Persistence(e)
            }
        })?;

        info!("Crew member deleted");
        Ok(())
    }

    async fn find_member(&self, id: CrewMemberId) -> Result<CrewMember, CrewError> {
        self.crew_members
            .find(id)
            .await?
            .ok_or_else(|| CrewError::not_found(CrewMember::ENTITY_NAME))
    }

    async fn ensure_references(
        &self,
        license_id: LicenseId,
        member_type_id: MemberTypeId,
    ) -> Result<(), CrewError> {
        if !self.licenses.exists(license_id).await? {
            debug!(license_id = %license_id, "Unknown license");
            return Err(CrewError::not_found(License::ENTITY_NAME));
        }

        if !self.member_types.exists(member_type_id).await? {
            debug!(member_type_id = %member_type_id, "Unknown member type");
            return Err(CrewError::not_found(MemberType::ENTITY_NAME));
        }

        Ok(())
    }
}

/// The unique email index can still reject a write that passed the
/// existence check when two requests race.
fn write_error(error: PortError) -> CrewError {
    if error.is_conflict() {
        CrewError::duplicate(EMAIL_UNIQUE_FIELD)
    } else {
        CrewError::Persistence(error)
    }
}

fn index_by_id<E: Entity>(entities: Vec<E>) -> HashMap<E::Id, E> {
    entities.into_iter().map(|e| (e.id(), e)).collect()
}

fn lookup<E: Entity>(index: &HashMap<E::Id, E>, id: E::Id) -> Result<&E, PortError> {
    index.get(&id).ok_or_else(|| dangling::<E>(id))
}

fn dangling<E: Entity>(id: E::Id) -> PortError {
    PortError::internal(format!("dangling {} reference {}", E::ENTITY_NAME, id))
}

/// Static lookup lists: licenses, member types and countries
#[derive(Clone)]
pub struct ReferenceDataService {
    licenses: Arc<dyn Repository<License>>,
    member_types: Arc<dyn Repository<MemberType>>,
    countries: Arc<dyn CountryLookup>,
}

impl ReferenceDataService {
    pub fn new(
        licenses: Arc<dyn Repository<License>>,
        member_types: Arc<dyn Repository<MemberType>>,
        countries: Arc<dyn CountryLookup>,
    ) -> Self {
        Self {
            licenses,
            member_types,
            countries,
        }
    }

    #[instrument(skip(self))]
    pub async fn list_licenses(&self) -> Result<Vec<LicenseSummary>, CrewError> {
        let licenses = self.licenses.list(None).await?;
        Ok(licenses.iter().map(LicenseSummary::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn list_member_types(&self) -> Result<Vec<MemberTypeSummary>, CrewError> {
        let member_types = self.member_types.list(None).await?;
        Ok(member_types.iter().map(MemberTypeSummary::from).collect())
    }

    /// Every ISO-3166 country, sorted by alpha-3 code
    pub fn list_countries(&self) -> Vec<CountryDto> {
        self.countries.all()
    }
}
