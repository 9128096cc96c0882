use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::{authz::RoleCheck, db::product_repo, error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub stock: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct ProductCreatedResponse {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub stock: i32,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i32,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/products", post(create_product).get(list_products))
        .with_state(state)
}

async fn create_product(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductCreatedResponse>), AppError> {
    let token = bearer_token(&headers)?;

    // Fail closed: an unreachable user service denies the privileged action,
    // it never surfaces as a 5xx.
    match state.authz.check_admin(token).await {
        RoleCheck::Authorized => {}
        RoleCheck::Denied => return Err(AppError::forbidden("Admin access required")),
        RoleCheck::Unreachable => {
            tracing::warn!("user service unreachable, refusing privileged request");
            return Err(AppError::forbidden("Admin access required"));
        }
    }

    let (Some(name), Some(price)) = (body.name, body.price) else {
        return Err(AppError::bad_request("Missing required fields: name and price"));
    };

    let product = product_repo::create_product(
        &state.db,
        &name,
        body.description.as_deref().unwrap_or(""),
        price,
        body.stock.unwrap_or(0),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ProductCreatedResponse {
            id: product.id,
            name: product.name,
            price: product.price,
            stock: product.stock,
        }),
    ))
}

async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = product_repo::list_all(&state.db).await?;

    Ok(Json(
        products
            .into_iter()
            .map(|product| ProductResponse {
                id: product.id,
                name: product.name,
                description: product.description,
                price: product.price,
                stock: product.stock,
            })
            .collect(),
    ))
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized("Missing token"))
}
