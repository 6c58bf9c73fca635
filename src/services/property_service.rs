use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{Property, PropertyRequest, Unit, UnitRequest};
use crate::store::Store;
use crate::utils::validators::sanitize_string;

pub struct PropertyService;

impl PropertyService {
    pub async fn create(store: &dyn Store, request: PropertyRequest) -> AppResult<Property> {
        request.validate()?;

        let property = Property {
            id: Uuid::new_v4(),
            address: sanitize_string(&request.address),
            monthly_rent: request.monthly_rent,
            description: request.description,
            status: request.status,
            created_at: Utc::now(),
        };
        store.insert_property(&property).await?;

        Ok(property)
    }

    pub async fn get(store: &dyn Store, id: Uuid) -> AppResult<Property> {
        store
            .get_property(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Property not found".to_string()))
    }

    pub async fn list(store: &dyn Store) -> AppResult<Vec<Property>> {
        store.list_properties().await
    }

    pub async fn update(
        store: &dyn Store,
        id: Uuid,
        request: PropertyRequest,
    ) -> AppResult<Property> {
        request.validate()?;

        let mut property = Self::get(store, id).await?;
        property.address = sanitize_string(&request.address);
        property.monthly_rent = request.monthly_rent;
        property.description = request.description;
        property.status = request.status;

        if !store.update_property(&property).await? {
            return Err(AppError::NotFound("Property not found".to_string()));
        }
        Ok(property)
    }

    pub async fn delete(store: &dyn Store, id: Uuid) -> AppResult<()> {
        if !store.delete_property(id).await? {
            return Err(AppError::NotFound("Property not found".to_string()));
        }
        Ok(())
    }
}

pub struct UnitService;

impl UnitService {
    pub async fn create(store: &dyn Store, request: UnitRequest) -> AppResult<Unit> {
        request.validate()?;
        // Юнит всегда принадлежит существующему объекту
        PropertyService::get(store, request.property_id).await?;

        let unit = Unit {
            id: Uuid::new_v4(),
            property_id: request.property_id,
            unit_number: sanitize_string(&request.unit_number),
            unit_type: request.unit_type,
            monthly_rent: request.monthly_rent,
            bedrooms: request.bedrooms,
            bathrooms: request.bathrooms,
            surface_area: request.surface_area,
            description: request.description,
            status: request.status,
            created_at: Utc::now(),
        };
        store.insert_unit(&unit).await?;

        Ok(unit)
    }

    pub async fn get(store: &dyn Store, id: Uuid) -> AppResult<Unit> {
        store
            .get_unit(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Unit not found".to_string()))
    }

    pub async fn list(store: &dyn Store, property_id: Option<Uuid>) -> AppResult<Vec<Unit>> {
        store.list_units(property_id).await
    }

    pub async fn update(store: &dyn Store, id: Uuid, request: UnitRequest) -> AppResult<Unit> {
        request.validate()?;

        let mut unit = Self::get(store, id).await?;
        if unit.property_id != request.property_id {
            PropertyService::get(store, request.property_id).await?;
        }

        unit.property_id = request.property_id;
        unit.unit_number = sanitize_string(&request.unit_number);
        unit.unit_type = request.unit_type;
        unit.monthly_rent = request.monthly_rent;
        unit.bedrooms = request.bedrooms;
        unit.bathrooms = request.bathrooms;
        unit.surface_area = request.surface_area;
        unit.description = request.description;
        unit.status = request.status;

        if !store.update_unit(&unit).await? {
            return Err(AppError::NotFound("Unit not found".to_string()));
        }
        Ok(unit)
    }

    pub async fn delete(store: &dyn Store, id: Uuid) -> AppResult<()> {
        if !store.delete_unit(id).await? {
            return Err(AppError::NotFound("Unit not found".to_string()));
        }
        Ok(())
    }
}
