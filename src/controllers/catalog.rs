use axum::Json;

use crate::domain::story::catalog::{catalog, Catalog};

/// GET /api/catalog - Themes, books and durations a story can be requested with
pub async fn get_catalog() -> Json<Catalog> {
    Json(catalog())
}
