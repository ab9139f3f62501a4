//! Cat management
//!
//! Thin create/read/update/delete over the cat store. The only rule of its own
//! is that a new cat's breed must be known to the breed registry.

use shared::{component_info, CatId, CatProfile, Component, CreateCatRequest, UpdateCatRequest, Validate};

use crate::error::{AgencyError, AgencyResult};
use crate::traits::{BreedValidator, CatStore, MissionStore, NewCat};

/// Cat management service with injected stores and breed registry
pub struct CatService<C, M, V>
where
    C: CatStore,
    M: MissionStore,
    V: BreedValidator,
{
    cats: C,
    missions: M,
    validator: V,
}

impl<C, M, V> CatService<C, M, V>
where
    C: CatStore,
    M: MissionStore,
    V: BreedValidator,
{
    pub fn new(cats: C, missions: M, validator: V) -> Self {
        Self {
            cats,
            missions,
            validator,
        }
    }

    /// Register a cat after the registry confirms its breed
    ///
    /// A registry outage fails the request; there is no offline fallback.
    pub async fn create_cat(&self, request: CreateCatRequest) -> AgencyResult<CatProfile> {
        request.validate()?;

        if !self.validator.validate_breed(&request.breed).await? {
            return Err(AgencyError::bad_request(format!(
                "invalid cat breed \"{}\"",
                request.breed
            )));
        }

        let cat = self
            .cats
            .create_cat(NewCat {
                name: request.name,
                years_experience: request.years_experience,
                breed: request.breed,
                salary: request.salary,
            })
            .await?;

        component_info!(
            Component::Cats,
            cat_id = %cat.id,
            "🐱 Cat {} ({}) recruited",
            cat.id,
            cat.breed
        );
        Ok(CatProfile { cat, mission: None })
    }

    pub async fn list_cats(&self) -> AgencyResult<Vec<CatProfile>> {
        let cats = self.cats.list_cats().await?;
        let mut profiles = Vec::with_capacity(cats.len());
        for cat in cats {
            let mission = self.missions.get_active_mission_by_cat(cat.id).await?;
            profiles.push(CatProfile { cat, mission });
        }
        Ok(profiles)
    }

    /// The cat with its current (incomplete) mission attached
    pub async fn get_cat(&self, cat_id: CatId) -> AgencyResult<CatProfile> {
        let cat = self.cats.get_cat(cat_id).await?;
        let mission = self.missions.get_active_mission_by_cat(cat_id).await?;
        Ok(CatProfile { cat, mission })
    }

    /// Salary is the only attribute that changes after recruitment
    pub async fn update_cat(&self, cat_id: CatId, request: UpdateCatRequest) -> AgencyResult<CatProfile> {
        request.validate()?;

        let mut cat = self.cats.get_cat(cat_id).await?;
        cat.salary = request.salary;
        self.cats.update_cat(&cat).await?;

        component_info!(Component::Cats, cat_id = %cat_id, "💰 Salary of cat {} set to {}", cat_id, cat.salary);
        self.get_cat(cat_id).await
    }

    pub async fn delete_cat(&self, cat_id: CatId) -> AgencyResult<()> {
        self.cats.delete_cat(cat_id).await?;
        component_info!(Component::Cats, cat_id = %cat_id, "🗑️ Cat {} deleted", cat_id);
        Ok(())
    }
}
