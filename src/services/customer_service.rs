//! Customer Service - Pure business logic without HTTP layer

use chrono::NaiveDate;

use super::today;
use crate::domain::rules::{normalize_name, validate_customer_age};
use crate::domain::{
    Customer, CustomerPatch, CustomerRepository, DomainError, NewCustomer, Page, PageRequest,
};

/// Input for creating a customer; birthdate is checked here, not by the schema
#[derive(Debug, Clone)]
pub struct CreateCustomer {
    pub customer_name: String,
    pub birthdate: Option<NaiveDate>,
    pub is_subscribed_to_newsletter: Option<bool>,
}

pub async fn list_customers(
    repo: &dyn CustomerRepository,
    request: &PageRequest,
) -> Result<Page<Customer>, DomainError> {
    tracing::info!(
        "Fetching customers - page: {}, size: {}",
        request.page,
        request.size
    );
    repo.find_page(request).await
}

pub async fn get_customer(repo: &dyn CustomerRepository, id: i32) -> Result<Customer, DomainError> {
    tracing::info!("Fetching customer by ID: {}", id);
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::customer_not_found(id))
}

pub async fn create_customer(
    repo: &dyn CustomerRepository,
    input: CreateCustomer,
) -> Result<Customer, DomainError> {
    tracing::info!("Creating new customer: {}", input.customer_name);

    let birthdate = validate_customer_age(input.birthdate, today())?;

    repo.create(NewCustomer {
        customer_name: normalize_name(&input.customer_name),
        birthdate,
        is_subscribed_to_newsletter: input.is_subscribed_to_newsletter.unwrap_or(false),
    })
    .await
}

/// Apply the supplied fields that differ from `existing`.
///
/// Returns `None` when nothing would change.
pub fn apply_patch(
    existing: &Customer,
    patch: CustomerPatch,
    today: NaiveDate,
) -> Result<Option<Customer>, DomainError> {
    let mut updated = existing.clone();
    let mut changed = false;

    if let Some(name) = patch.customer_name
        && !name.trim().is_empty()
    {
        let name = normalize_name(&name);
        if name != updated.customer_name {
            updated.customer_name = name;
            changed = true;
        }
    }

    if let Some(birthdate) = patch.birthdate {
        let birthdate = validate_customer_age(Some(birthdate), today)?;
        if birthdate != updated.birthdate {
            updated.birthdate = birthdate;
            changed = true;
        }
    }

    if let Some(subscribed) = patch.is_subscribed_to_newsletter
        && subscribed != updated.is_subscribed_to_newsletter
    {
        updated.is_subscribed_to_newsletter = subscribed;
        changed = true;
    }

    Ok(changed.then_some(updated))
}

pub async fn update_customer(
    repo: &dyn CustomerRepository,
    id: i32,
    patch: CustomerPatch,
) -> Result<Customer, DomainError> {
    tracing::info!("Updating customer ID: {} with partial data", id);

    if !patch.has_updates() {
        return Err(DomainError::InvalidArgument(
            "No fields provided for update".to_string(),
        ));
    }

    let existing = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::customer_not_found(id))?;

    match apply_patch(&existing, patch, today())? {
        Some(updated) => {
            let saved = repo.update(updated).await?;
            tracing::info!("Customer ID: {} updated successfully", id);
            Ok(saved)
        }
        None => {
            tracing::info!("Customer ID: {} - no changes detected", id);
            Ok(existing)
        }
    }
}
