use axum::Json;
use axum::extract::{Path, Query, State};
use axum::extract::rejection::JsonRejection;
use axum::response::{Html, IntoResponse, Response};
use tracing::{debug, warn};
use crate::AppState;
use crate::error::AppError;
use crate::logger::log_request;
use crate::menu::{self, DEFAULT_TIP_PERCENTAGE};
use crate::metrics::MetricsReport;
use crate::models::{
    AdvancedRecipeSummary, CoffeeDetails, CoffeeWelcome, ErrorMessage, Recipe,
    RecipeSubmission, RecipeSummary, RecipeWelcome, TipQuery, TotalsResponse
};
use crate::validation::{ValidationError, validate_recipe};

pub async fn health_check() -> &'static str {

    "OK"

}

pub async fn metrics(State(state): State<AppState>) -> Json<MetricsReport> {

    Json(MetricsReport::from(state.metrics.snapshot()))

}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {

    let html = tokio::fs::read_to_string(&state.config.index_html_path)
        .await
        .map_err(|e| {
            warn!("Failed to read {}: {}", state.config.index_html_path.display(), e);
            AppError::InternalError(Box::new(e))
        })?;

    Ok(Html(html))

}

// ---- coffee shop ----

pub async fn coffee_welcome() -> Json<CoffeeWelcome> {

    Json(CoffeeWelcome {
        message: "☕ Welcome to Brew Master Coffee Shop!",
        description: "Your favorite neighborhood coffee shop, now with an API!",
        todays_special: "Vanilla Latte with extra foam",
        wifi_password: "BrewMaster2024",
        available_coffees: menu::menu()
    })

}

pub async fn coffee_by_id(
    State(state): State<AppState>,
    Path(coffee_id): Path<i64>
) -> Response {

    let ledger = state.config.request_log_path.as_deref();
    let detail = format!("id={}", coffee_id);

    match menu::get_by_id(coffee_id) {
        Ok(item) => {
            state.metrics.record_menu_lookup(true);
            log_request(ledger, state.service, "/menu/coffee/:coffee_id", "found", &detail).await;
            Json(CoffeeDetails::from(item)).into_response()
        }
        // unknown ids are answered with a normal body, not a 404
        Err(e) => {
            state.metrics.record_menu_lookup(false);
            log_request(ledger, state.service, "/menu/coffee/:coffee_id", "not_found", &detail).await;
            Json(ErrorMessage { error: e.to_string() }).into_response()
        }
    }

}

pub async fn calculate_total(
    State(state): State<AppState>,
    Path(coffee_price): Path<f64>,
    Query(query): Query<TipQuery>
) -> Response {

    let ledger = state.config.request_log_path.as_deref();
    let tip_percentage = query.tip_percentage.unwrap_or(DEFAULT_TIP_PERCENTAGE);
    let detail = format!("price={} tip={}%", coffee_price, tip_percentage);

    match menu::compute_total(coffee_price, tip_percentage) {
        Ok(totals) => {
            state.metrics.record_total(true);
            log_request(ledger, state.service, "/calculate/total/:coffee_price", "computed", &detail).await;
            Json(TotalsResponse::from(totals)).into_response()
        }
        Err(e) => {
            state.metrics.record_total(false);
            log_request(ledger, state.service, "/calculate/total/:coffee_price", "invalid", &detail).await;
            Json(ErrorMessage { error: e.to_string() }).into_response()
        }
    }

}

// ---- recipe master ----

pub async fn recipe_welcome() -> Json<RecipeWelcome> {

    Json(RecipeWelcome {
        message: "👨‍🍳 Welcome to Recipe Master API! Explore simple recipe validation."
    })

}

pub async fn create_recipe(
    State(state): State<AppState>,
    payload: Result<Json<RecipeSubmission>, JsonRejection>
) -> Result<Json<RecipeSummary>, AppError> {

    let recipe = accept_recipe(&state, "/recipes/", payload).await?;
    Ok(Json(RecipeSummary::from(recipe)))

}

pub async fn validate_advanced_recipe(
    State(state): State<AppState>,
    payload: Result<Json<RecipeSubmission>, JsonRejection>
) -> Result<Json<AdvancedRecipeSummary>, AppError> {

    let recipe = accept_recipe(&state, "/recipes/validate-advanced/", payload).await?;
    Ok(Json(AdvancedRecipeSummary::from(recipe)))

}

// shared by both recipe endpoints so they accept exactly the same payloads
async fn accept_recipe(
    state: &AppState,
    route: &str,
    payload: Result<Json<RecipeSubmission>, JsonRejection>
) -> Result<Recipe, AppError> {

    let ledger = state.config.request_log_path.as_deref();

    let submission = match payload {
        Ok(Json(submission)) => submission,
        Err(rejection) => {
            state.metrics.record_malformed_payload();
            log_request(ledger, state.service, route, "malformed", &rejection.body_text()).await;
            return Err(AppError::from(rejection));
        }
    };

    debug!("Received recipe submission: {:?}", submission);

    match validate_recipe(&submission) {
        Ok(recipe) => {
            state.metrics.record_recipe_accepted();
            let detail = format!("name={} difficulty={}", recipe.name, recipe.difficulty.as_str());
            log_request(ledger, state.service, route, "accepted", &detail).await;
            Ok(recipe)
        }
        Err(e) => {
            let detail = match &e {
                ValidationError::FieldConstraints(violations) => {
                    state.metrics.record_field_rejection();
                    format!("violations={}", violations.len())
                }
                ValidationError::BusinessRule { rule, .. } => {
                    state.metrics.record_business_rule_rejection();
                    format!("rule={}", rule)
                }
            };
            log_request(ledger, state.service, route, "rejected", &detail).await;
            Err(AppError::from(e))
        }
    }

}
