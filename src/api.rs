//! Web API Module
//!
//! Exposes RESTful endpoints for the DigitalWorkforce frontend and chat
//! component. All endpoints return JSON and require no authentication
//! (the marketplace gateway fronts this service with its own auth).

use crate::profile::{
    analyzer::{analyze_profile_completion, should_suggest_profile_completion, ProfileAnalysis},
    prompts::{personalized_greeting, profile_aware_prompt},
    store::{self, ProfileStore, StoreError},
    text::process_skills_input,
    types::ProfileRecord,
};
use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================
// APPLICATION STATE
// ============================================================

/// Shared application state
pub struct AppState {
    pub store: ProfileStore,
}

impl AppState {
    pub fn new() -> Result<Self, StoreError> {
        Ok(Self {
            store: ProfileStore::new(None)?,
        })
    }

    pub fn in_memory() -> Result<Self, StoreError> {
        Ok(Self {
            store: ProfileStore::in_memory()?,
        })
    }
}

// ============================================================
// API REQUEST/RESPONSE TYPES
// ============================================================

#[derive(Deserialize)]
pub struct SaveProfileRequest {
    pub user_id: String,
    pub profile: ProfileRecord,
}

#[derive(Deserialize)]
pub struct ComposePromptRequest {
    pub user_id: String,
    pub base_prompt: String,
}

#[derive(Deserialize)]
pub struct NormalizeSkillsRequest {
    pub input: String,
}

#[derive(Serialize)]
pub struct AnalysisResponse {
    #[serde(flatten)]
    pub analysis: ProfileAnalysis,
    pub greeting: String,
    pub suggest_completion: bool,
}

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: &str) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.to_string()),
        }
    }
}

// ============================================================
// API HANDLERS
// ============================================================

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "DigitalWorkforce Profile API",
        "version": "0.1.0"
    }))
}

/// Create or update a worker profile
async fn save_profile(
    data: web::Data<Arc<AppState>>,
    req: web::Json<SaveProfileRequest>,
) -> impl Responder {
    match data.store.upsert_profile(&req.user_id, &req.profile) {
        Ok(existed) => {
            let _ = store::record_profile_saved(&data.store, &req.user_id, existed);
            HttpResponse::Ok().json(ApiResponse::success(req.profile.clone()))
        }
        Err(e) => {
            log::error!("failed to save profile for {}: {}", req.user_id, e);
            HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error(&format!("Failed to save profile: {}", e)))
        }
    }
}

/// Fetch a stored profile
async fn get_profile(data: web::Data<Arc<AppState>>, path: web::Path<String>) -> impl Responder {
    let user_id = path.into_inner();
    match data.store.get_profile(&user_id) {
        Ok(Some(profile)) => HttpResponse::Ok().json(ApiResponse::success(profile)),
        Ok(None) => HttpResponse::NotFound()
            .json(ApiResponse::<()>::error("Profile not found. Save one first.")),
        Err(e) => HttpResponse::InternalServerError()
            .json(ApiResponse::<()>::error(&format!("Database error: {}", e))),
    }
}

/// Analyze a stored profile. The analysis is computed fresh on every call
/// and never persisted.
async fn analyze_profile(
    data: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> impl Responder {
    let user_id = path.into_inner();
    let profile = match data.store.get_profile(&user_id) {
        Ok(Some(p)) => p,
        Ok(None) => {
            return HttpResponse::NotFound()
                .json(ApiResponse::<()>::error("Profile not found. Save one first."));
        }
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error(&format!("Database error: {}", e)));
        }
    };

    let analysis = analyze_profile_completion(&profile);
    let _ = store::record_analysis_run(&data.store, &user_id, analysis.completion_percentage);

    let response = AnalysisResponse {
        greeting: personalized_greeting(&profile, &analysis),
        suggest_completion: should_suggest_profile_completion(&analysis),
        analysis,
    };
    HttpResponse::Ok().json(ApiResponse::success(response))
}

/// Compose a profile-aware prompt for the AI chat service
async fn compose_prompt(
    data: web::Data<Arc<AppState>>,
    req: web::Json<ComposePromptRequest>,
) -> impl Responder {
    let profile = match data.store.get_profile(&req.user_id) {
        Ok(Some(p)) => p,
        Ok(None) => ProfileRecord::default(), // brand-new user, nothing known yet
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error(&format!("Database error: {}", e)));
        }
    };

    let analysis = analyze_profile_completion(&profile);
    let prompt = profile_aware_prompt(&profile, &analysis, &req.base_prompt);
    let _ = store::record_prompt_composed(&data.store, &req.user_id);

    HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({ "prompt": prompt })))
}

/// Normalize a free-text skills answer into canonical skill names
async fn normalize_skills(req: web::Json<NormalizeSkillsRequest>) -> impl Responder {
    let skills = process_skills_input(&req.input);
    HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({ "skills": skills })))
}

/// Get a user's profile activity timeline
async fn get_activity(data: web::Data<Arc<AppState>>, path: web::Path<String>) -> impl Responder {
    let user_id = path.into_inner();
    match data.store.get_activity(&user_id) {
        Ok(activity) => HttpResponse::Ok().json(ApiResponse::success(activity)),
        Err(e) => HttpResponse::InternalServerError()
            .json(ApiResponse::<()>::error(&format!("Database error: {}", e))),
    }
}

// ============================================================
// SERVER CONFIGURATION
// ============================================================

fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/api/profile", web::post().to(save_profile))
        .route("/api/profile/{user_id}", web::get().to(get_profile))
        .route("/api/profile/{user_id}/analysis", web::get().to(analyze_profile))
        .route("/api/prompt", web::post().to(compose_prompt))
        .route("/api/skills/normalize", web::post().to(normalize_skills))
        .route("/api/activity/{user_id}", web::get().to(get_activity));
}

/// Configure and run the API server
pub async fn run_server(host: &str, port: u16) -> std::io::Result<()> {
    let state = Arc::new(AppState::new().expect("Failed to initialize app state"));

    println!("🚀 Profile API starting at http://{}:{}", host, port);
    println!("📚 API Endpoints:");
    println!("   POST /api/profile                - Save profile");
    println!("   GET  /api/profile/:id            - Get profile");
    println!("   GET  /api/profile/:id/analysis   - Analyze completion");
    println!("   POST /api/prompt                 - Compose profile-aware prompt");
    println!("   POST /api/skills/normalize       - Normalize skills input");
    println!("   GET  /api/activity/:id           - Get activity timeline");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(state.clone()))
            .configure(configure_routes)
    })
    .bind((host, port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    #[actix_web::test]
    async fn test_save_then_analyze() {
        let state = Arc::new(AppState::in_memory().unwrap());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/profile")
            .set_json(serde_json::json!({
                "user_id": "u1",
                "profile": {
                    "name": "Alice",
                    "bio": "Engineer",
                    "skills": ["Go", "Rust", "C++"],
                    "experience": [{"role": "Dev", "company": "X", "details": "built things"}]
                }
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let req = test::TestRequest::get()
            .uri("/api/profile/u1/analysis")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["completionPercentage"], 50);
        assert_eq!(body["data"]["priority"], "high");
        assert_eq!(body["data"]["suggest_completion"], true);
        assert!(body["data"]["greeting"].as_str().unwrap().contains("Alice"));
    }

    #[actix_web::test]
    async fn test_analysis_for_missing_profile_is_404() {
        let state = Arc::new(AppState::in_memory().unwrap());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/profile/nobody/analysis")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}
