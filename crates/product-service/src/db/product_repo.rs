use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::db::entities::{prelude::Product, product};

pub async fn create_product(
    db: &DatabaseConnection,
    name: &str,
    description: &str,
    price: f64,
    stock: i32,
) -> Result<product::Model, sea_orm::DbErr> {
    let model = product::ActiveModel {
        name: Set(name.to_string()),
        description: Set(description.to_string()),
        price: Set(price),
        stock: Set(stock),
        ..Default::default()
    };
    model.insert(db).await
}

pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<product::Model>, sea_orm::DbErr> {
    Product::find().all(db).await
}
