use chrono::Utc;
use sea_orm::entity::prelude::*;

use crate::models::{Product, ProductId};

/// Sea-ORM Entity for the products table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub category: String,
    pub stock_quantity: i32,
    #[sea_orm(unique)]
    pub sku: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Conversion from Sea-ORM Model to domain Product
impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: ProductId::Serial(i64::from(model.id)),
            name: model.name,
            description: model.description,
            price: model.price,
            category: Some(model.category).filter(|c| !c.is_empty()),
            stock_quantity: model.stock_quantity,
            sku: Some(model.sku).filter(|s| !s.is_empty()),
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}
