use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::db::entities::{prelude::User, user};

pub async fn find_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<user::Model>, sea_orm::DbErr> {
    User::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await
}

pub async fn find_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<user::Model>, sea_orm::DbErr> {
    User::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await
}

pub async fn find_by_id(
    db: &DatabaseConnection,
    id: i64,
) -> Result<Option<user::Model>, sea_orm::DbErr> {
    User::find_by_id(id).one(db).await
}

pub async fn create_user(
    db: &DatabaseConnection,
    username: &str,
    email: &str,
    password_hash: &str,
    role: &str,
) -> Result<user::Model, sea_orm::DbErr> {
    let model = user::ActiveModel {
        username: Set(username.to_string()),
        email: Set(email.to_string()),
        password_hash: Set(password_hash.to_string()),
        role: Set(role.to_string()),
        ..Default::default()
    };
    model.insert(db).await
}

pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<user::Model>, sea_orm::DbErr> {
    User::find().all(db).await
}
