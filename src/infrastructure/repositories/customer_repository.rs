//! SeaORM implementation of CustomerRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};

use super::{now, ordered, unsupported_sort};
use crate::domain::rules::normalize_name;
use crate::domain::{Customer, CustomerRepository, DomainError, NewCustomer, Page, PageRequest};
use crate::models::customer::{ActiveModel, Column, Entity as CustomerEntity};

/// SeaORM-based implementation of CustomerRepository
pub struct SeaOrmCustomerRepository {
    db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn sort_column(property: &str) -> Option<Column> {
    match property {
        "customerId" | "id" => Some(Column::Id),
        "customerName" => Some(Column::CustomerName),
        "birthdate" => Some(Column::Birthdate),
        "isSubscribedToNewsletter" => Some(Column::IsSubscribedToNewsletter),
        "createdDate" => Some(Column::CreatedAt),
        "modifiedDate" => Some(Column::UpdatedAt),
        _ => None,
    }
}

#[async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn find_page(&self, request: &PageRequest) -> Result<Page<Customer>, DomainError> {
        let column = sort_column(&request.sort.property)
            .ok_or_else(|| unsupported_sort(&request.sort))?;
        let query = ordered(
            CustomerEntity::find(),
            column,
            request.sort.direction,
            Column::Id,
        );

        let paginator = query.paginate(&self.db, request.size);
        let total = paginator.num_items().await?;
        let customers = paginator.fetch_page(request.page).await?;

        Ok(Page::new(
            customers.into_iter().map(Customer::from).collect(),
            request,
            total,
        ))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, DomainError> {
        let customer = CustomerEntity::find_by_id(id).one(&self.db).await?;
        Ok(customer.map(Customer::from))
    }

    async fn create(&self, input: NewCustomer) -> Result<Customer, DomainError> {
        let now = now();

        let new_customer = ActiveModel {
            customer_name: Set(normalize_name(&input.customer_name)),
            birthdate: Set(input.birthdate),
            is_subscribed_to_newsletter: Set(input.is_subscribed_to_newsletter),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = new_customer.insert(&self.db).await?;
        Ok(Customer::from(result))
    }

    async fn update(&self, customer: Customer) -> Result<Customer, DomainError> {
        let existing = CustomerEntity::find_by_id(customer.customer_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::customer_not_found(customer.customer_id))?;

        let mut active: ActiveModel = existing.into();
        active.customer_name = Set(normalize_name(&customer.customer_name));
        active.birthdate = Set(customer.birthdate);
        active.is_subscribed_to_newsletter = Set(customer.is_subscribed_to_newsletter);
        active.updated_at = Set(now());

        let result = active.update(&self.db).await?;
        Ok(Customer::from(result))
    }
}
