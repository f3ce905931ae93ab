use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::Customer;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Always upper-cased before it reaches the table
    pub customer_name: String,
    pub birthdate: Date,
    pub is_subscribed_to_newsletter: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::rental_header::Entity")]
    RentalHeader,
}

impl Related<super::rental_header::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RentalHeader.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Customer {
    fn from(model: Model) -> Self {
        Self {
            customer_id: model.id,
            customer_name: model.customer_name,
            is_subscribed_to_newsletter: model.is_subscribed_to_newsletter,
            birthdate: model.birthdate,
            created_date: model.created_at,
            modified_date: model.updated_at,
        }
    }
}
