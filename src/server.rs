//! HTTP surface for the web app.

use crate::error::GuacoError;
use crate::generator::RecipeGenerator;
use crate::grocery::GroceryDataset;
use crate::model::{FoodItem, ParsedRecipe};
use crate::store::{normalize_category, RecipeStore};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

/// Shared, read-only handles for the request handlers.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<RecipeGenerator>,
    pub store: Arc<RecipeStore>,
    pub groceries: Arc<GroceryDataset>,
}

impl AppState {
    pub fn new(generator: RecipeGenerator, store: RecipeStore, groceries: GroceryDataset) -> Self {
        Self {
            generator: Arc::new(generator),
            store: Arc::new(store),
            groceries: Arc::new(groceries),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub ingredients: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveRecipeRequest {
    pub category: String,
    pub recipe: ParsedRecipe,
}

#[derive(Debug, Serialize)]
pub struct SaveRecipeResponse {
    pub message: String,
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

/// Error body returned by every endpoint: `{"error": "..."}`.
pub struct ApiError(GuacoError);

impl From<GuacoError> for ApiError {
    fn from(err: GuacoError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            GuacoError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            GuacoError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if self.0.is_client_error() {
            warn!("Rejected request: {}", self.0);
        } else {
            error!("Request failed: {}", self.0);
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// Unwrap a JSON body, turning axum's plain-text rejection into the
/// `{"error": ...}` shape.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| GuacoError::InvalidInput(rejection.body_text()).into())
}

/// Create the API router with permissive CORS.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/api/hello", get(hello))
        .route("/api/food", post(add_food))
        .route("/api/grocery-data/csv", get(grocery_csv))
        .route(
            "/api/generate_recipe_from_ingredients",
            post(generate_recipe),
        )
        .route("/api/recipes", post(save_recipe))
        .route("/api/recipes/:category", get(list_recipes))
        .layer(cors)
        .with_state(state)
}

/// Bind `address` and serve until the process is stopped.
pub async fn serve(address: &str, state: AppState) -> Result<(), GuacoError> {
    let listener = TcpListener::bind(address).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello from Guaco!".to_string(),
    })
}

async fn add_food(
    payload: Result<Json<FoodItem>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let food = json_body(payload)?;
    Ok(Json(MessageResponse {
        message: format!(
            "Received food: {} with {} calories",
            food.name, food.calories
        ),
    }))
}

async fn grocery_csv(State(state): State<AppState>) -> ApiResult<Response> {
    let csv = state.groceries.read_csv().await?;
    Ok(([(header::CONTENT_TYPE, "text/csv")], csv).into_response())
}

async fn generate_recipe(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> ApiResult<Json<ParsedRecipe>> {
    let request = json_body(payload)?;
    let recipe = state.generator.generate(&request.ingredients).await?;
    Ok(Json(recipe))
}

async fn save_recipe(
    State(state): State<AppState>,
    payload: Result<Json<SaveRecipeRequest>, JsonRejection>,
) -> ApiResult<Json<SaveRecipeResponse>> {
    let request = json_body(payload)?;
    let category = normalize_category(&request.category)?;
    let count = state.store.save(&category, request.recipe).await?;
    Ok(Json(SaveRecipeResponse {
        message: "Recipe saved".to_string(),
        category,
        count,
    }))
}

async fn list_recipes(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> ApiResult<Json<Vec<ParsedRecipe>>> {
    Ok(Json(state.store.list(&category).await?))
}
