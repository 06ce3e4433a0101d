use actix_web::{web, App, HttpServer, HttpResponse, Result, HttpRequest, middleware};
use chrono::Utc;
use serde::Deserialize;
use std::sync::{Mutex, MutexGuard};
use tracing::{info, warn};

use crate::balance::{
    balance_score, optimize_team_balance, rebalance_team, suggest_player_swaps, validate_team_balance,
    Player, Team, DEFAULT_MAX_SKILL_DIFFERENCE,
};
use crate::config::SessionConfig;
use crate::form::{validate_signup, write_roster, SignupRequest};
use crate::parser::{active_players, read_players};
use crate::schedule::{add_individual_game, optimize_schedule, schedule_stats, validate_schedule, Match};

/// The one pickup session the server holds in memory
#[derive(Debug, Default)]
pub struct Session {
    pub players: Vec<Player>,
    pub teams: Vec<Team>,
    pub matches: Vec<Match>,
}

impl Session {
    /// Rebuilds teams from the active roster; the old schedule no longer applies
    fn regenerate_teams(&mut self, config: &SessionConfig) {
        let mut rng = config.rng();
        let active = active_players(&self.players);
        self.teams = optimize_team_balance(&active, config.settings.teams_count, config.balance_attempts, &mut rng);
        self.matches.clear();
    }

    fn regenerate_schedule(&mut self, config: &SessionConfig) {
        let mut rng = config.rng();
        self.matches = optimize_schedule(&self.teams, &config.settings, config.schedule_attempts, &mut rng);
    }
}

pub struct AppState {
    pub session: Mutex<Session>,
    pub config: SessionConfig,
}

impl AppState {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            session: Mutex::new(Session::default()),
            config,
        }
    }

    fn session(&self) -> Result<MutexGuard<'_, Session>> {
        self.session
            .lock()
            .map_err(|_| actix_web::error::ErrorInternalServerError("session state is poisoned"))
    }

    fn authorized(&self, req: &HttpRequest) -> bool {
        let password = req
            .headers()
            .get("X-Admin-Password")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        password == self.config.admin_password
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    password: String,
}

#[derive(Deserialize)]
pub struct RebalanceRequest {
    from_index: usize,
    to_index: usize,
}

#[derive(Deserialize)]
pub struct AddMatchRequest {
    team_a_id: String,
    team_b_id: String,
}

#[derive(Deserialize)]
pub struct CompleteMatchRequest {
    score_a: u32,
    score_b: u32,
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(serde_json::json!({"success": false, "error": "Unauthorized"}))
}

// Admin login endpoint
async fn admin_login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if req.password == state.config.admin_password {
        Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
    } else {
        Ok(HttpResponse::Unauthorized().json(serde_json::json!({"success": false, "error": "Invalid password"})))
    }
}

// Admin roster upload endpoint: replaces the roster, then regenerates teams and schedule
async fn admin_upload(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if !state.authorized(&req) {
        return Ok(unauthorized());
    }

    match read_players(&body[..]) {
        Ok(players) => {
            let mut session = state.session()?;
            session.players = players;
            session.regenerate_teams(&state.config);
            session.regenerate_schedule(&state.config);
            info!(players = session.players.len(), games = session.matches.len(), "roster uploaded");

            Ok(HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "message": "Teams and schedule generated successfully",
                "players": session.players.len(),
                "games": session.matches.len(),
            })))
        }
        Err(e) => {
            warn!(error = %e, "roster upload rejected");
            Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": format!("Failed to process CSV: {}", e)
            })))
        }
    }
}

// Player sign-up endpoint
async fn signup(
    req: web::Json<SignupRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if let Err(e) = validate_signup(&req) {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({"success": false, "error": e.to_string()})));
    }

    let mut session = state.session()?;
    if session.players.iter().any(|p| p.id == req.player_id.trim()) {
        return Ok(HttpResponse::Conflict().json(serde_json::json!({
            "success": false,
            "error": "Player ID is already signed up"
        })));
    }

    let order = session.players.iter().map(|p| p.signup_order).max().unwrap_or(0) + 1;
    let player = req.into_inner().into_player(order, state.config.settings.capacity());
    info!(player = %player.id, order, waitlisted = player.is_waitlisted, "player signed up");
    session.players.push(player.clone());

    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true, "player": player})))
}

async fn get_players(state: web::Data<AppState>) -> Result<HttpResponse> {
    let session = state.session()?;
    Ok(HttpResponse::Ok().json(&session.players))
}

async fn generate_teams(state: web::Data<AppState>) -> Result<HttpResponse> {
    let mut session = state.session()?;
    session.regenerate_teams(&state.config);
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "teams": &session.teams,
        "balance_score": balance_score(&session.teams),
    })))
}

async fn get_teams(state: web::Data<AppState>) -> Result<HttpResponse> {
    let session = state.session()?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "teams": &session.teams,
        "balance_score": balance_score(&session.teams),
    })))
}

async fn team_validation(state: web::Data<AppState>) -> Result<HttpResponse> {
    let session = state.session()?;
    Ok(HttpResponse::Ok().json(validate_team_balance(&session.teams, DEFAULT_MAX_SKILL_DIFFERENCE)))
}

async fn team_suggestions(state: web::Data<AppState>) -> Result<HttpResponse> {
    let session = state.session()?;
    Ok(HttpResponse::Ok().json(suggest_player_swaps(&session.teams)))
}

async fn rebalance(
    req: web::Json<RebalanceRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let mut session = state.session()?;
    session.teams = rebalance_team(&session.teams, req.from_index, req.to_index);
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "teams": &session.teams,
        "balance_score": balance_score(&session.teams),
    })))
}

async fn generate_schedule(state: web::Data<AppState>) -> Result<HttpResponse> {
    let mut session = state.session()?;
    session.regenerate_schedule(&state.config);
    Ok(HttpResponse::Ok().json(&session.matches))
}

async fn get_schedule(state: web::Data<AppState>) -> Result<HttpResponse> {
    let session = state.session()?;
    Ok(HttpResponse::Ok().json(&session.matches))
}

async fn schedule_validation(state: web::Data<AppState>) -> Result<HttpResponse> {
    let session = state.session()?;
    Ok(HttpResponse::Ok().json(validate_schedule(&session.matches, &session.teams, &state.config.settings)))
}

async fn get_schedule_stats(state: web::Data<AppState>) -> Result<HttpResponse> {
    let session = state.session()?;
    Ok(HttpResponse::Ok().json(schedule_stats(&session.matches, &session.teams)))
}

// Manual "add game" endpoint
async fn add_match(
    req: web::Json<AddMatchRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let mut session = state.session()?;
    let known = |id: &str| session.teams.iter().any(|t| t.id == id);
    if !known(&req.team_a_id) || !known(&req.team_b_id) {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({"success": false, "error": "Unknown team"})));
    }

    match add_individual_game(&session.matches, &req.team_a_id, &req.team_b_id, &state.config.settings) {
        Some(game) => {
            session.matches.push(game.clone());
            Ok(HttpResponse::Ok().json(serde_json::json!({"success": true, "match": game})))
        }
        None => Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": "A team cannot play itself"
        }))),
    }
}

fn match_not_found(match_id: &str) -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "success": false,
        "error": format!("No match with id {}", match_id)
    }))
}

// Kick off a scheduled game
async fn start_match(
    req: HttpRequest,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if !state.authorized(&req) {
        return Ok(unauthorized());
    }

    let match_id = path.into_inner();
    let mut session = state.session()?;
    let Some(game) = session.matches.iter_mut().find(|m| m.id == match_id) else {
        return Ok(match_not_found(&match_id));
    };
    game.start(Utc::now());
    info!(game = %game.id, status = ?game.status, "match started");
    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true, "match": game})))
}

// Record the final score of a game
async fn complete_match(
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<CompleteMatchRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if !state.authorized(&req) {
        return Ok(unauthorized());
    }

    let match_id = path.into_inner();
    let mut session = state.session()?;
    let Some(game) = session.matches.iter_mut().find(|m| m.id == match_id) else {
        return Ok(match_not_found(&match_id));
    };
    game.complete(body.score_a, body.score_b, Utc::now());
    info!(game = %game.id, score_a = game.score_a, score_b = game.score_b, "match completed");
    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true, "match": game})))
}

// Admin roster download in the same CSV layout the upload accepts
async fn export_roster(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    if !state.authorized(&req) {
        return Ok(unauthorized());
    }

    let session = state.session()?;
    let mut csv_bytes = Vec::new();
    write_roster(&session.players, &mut csv_bytes)
        .map_err(actix_web::error::ErrorInternalServerError)?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(("Content-Disposition", "attachment; filename=\"roster.csv\""))
        .body(csv_bytes))
}

/// Registers every API route; shared by the server and the tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/login", web::post().to(admin_login))
        .route("/api/upload", web::post().to(admin_upload))
        .route("/api/signup", web::post().to(signup))
        .route("/api/players", web::get().to(get_players))
        .route("/api/teams", web::get().to(get_teams))
        .route("/api/teams/generate", web::post().to(generate_teams))
        .route("/api/teams/validation", web::get().to(team_validation))
        .route("/api/teams/suggestions", web::get().to(team_suggestions))
        .route("/api/teams/rebalance", web::post().to(rebalance))
        .route("/api/schedule", web::get().to(get_schedule))
        .route("/api/schedule/generate", web::post().to(generate_schedule))
        .route("/api/schedule/validation", web::get().to(schedule_validation))
        .route("/api/schedule/stats", web::get().to(get_schedule_stats))
        .route("/api/matches", web::post().to(add_match))
        .route("/api/matches/{id}/start", web::post().to(start_match))
        .route("/api/matches/{id}/complete", web::post().to(complete_match))
        .route("/api/roster/export", web::get().to(export_roster));
}

pub async fn start_server(port: u16, config: SessionConfig) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::new(config));

    info!(port, "starting web server");
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    const ROSTER: &str = "\
player id,name,skill,waitlist
p1,Alice,4,no
p2,Bob,3,no
p3,Cara,2,no
p4,Dan,1,no
p5,Eve,4,no
p6,Finn,1,no
p7,Gus,2,yes
";

    fn state() -> web::Data<AppState> {
        let config = SessionConfig {
            seed: Some(5),
            admin_password: "pw".to_string(),
            ..SessionConfig::default()
        };
        web::Data::new(AppState::new(config))
    }

    #[actix_web::test]
    async fn upload_requires_password() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/upload")
            .set_payload(ROSTER)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn upload_builds_teams_and_schedule() {
        let data = state();
        let app = test::init_service(App::new().app_data(data.clone()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/upload")
            .insert_header(("X-Admin-Password", "pw"))
            .set_payload(ROSTER)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let session = data.session.lock().unwrap();
        assert_eq!(session.players.len(), 7);
        // Gus is waitlisted and sits out
        let assigned: usize = session.teams.iter().map(|t| t.players.len()).sum();
        assert_eq!(assigned, 6);
        assert_eq!(session.teams.len(), 2);
        assert_eq!(session.matches.len(), 1);
    }

    #[actix_web::test]
    async fn signup_then_duplicate_is_rejected() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let body = serde_json::json!({"name": "Hana", "player_id": "h1", "skill_level": 3});

        let req = test::TestRequest::post().uri("/api/signup").set_json(&body).to_request();
        let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp["success"], true);
        assert_eq!(resp["player"]["signup_order"], 1);

        let req = test::TestRequest::post().uri("/api/signup").set_json(&body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 409);
    }

    #[actix_web::test]
    async fn invalid_signup_is_a_bad_request() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let body = serde_json::json!({"name": "Hana", "player_id": "h1", "skill_level": 7});
        let req = test::TestRequest::post().uri("/api/signup").set_json(&body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn manual_match_needs_known_distinct_teams() {
        let data = state();
        {
            let mut session = data.session.lock().unwrap();
            session.players = read_players(ROSTER.as_bytes()).unwrap();
            session.regenerate_teams(&data.config);
        }
        let app = test::init_service(App::new().app_data(data.clone()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/matches")
            .set_json(serde_json::json!({"team_a_id": "team-1", "team_b_id": "team-7"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404);

        let req = test::TestRequest::post()
            .uri("/api/matches")
            .set_json(serde_json::json!({"team_a_id": "team-1", "team_b_id": "team-1"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);

        let req = test::TestRequest::post()
            .uri("/api/matches")
            .set_json(serde_json::json!({"team_a_id": "team-1", "team_b_id": "team-2"}))
            .to_request();
        let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp["match"]["game_number"], 1);
    }

    #[actix_web::test]
    async fn matches_can_be_started_and_completed() {
        let data = state();
        {
            let mut session = data.session.lock().unwrap();
            session.players = read_players(ROSTER.as_bytes()).unwrap();
            session.regenerate_teams(&data.config);
            session.regenerate_schedule(&data.config);
        }
        let app = test::init_service(App::new().app_data(data.clone()).configure(configure)).await;

        let req = test::TestRequest::post().uri("/api/matches/game-1/start").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 401);

        let req = test::TestRequest::post()
            .uri("/api/matches/game-9/start")
            .insert_header(("X-Admin-Password", "pw"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404);

        let req = test::TestRequest::post()
            .uri("/api/matches/game-1/start")
            .insert_header(("X-Admin-Password", "pw"))
            .to_request();
        let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp["match"]["status"], "in-progress");
        assert!(resp["match"]["started_at"].is_string());

        let req = test::TestRequest::post()
            .uri("/api/matches/game-1/complete")
            .insert_header(("X-Admin-Password", "pw"))
            .set_json(serde_json::json!({"score_a": 5, "score_b": 3}))
            .to_request();
        let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp["match"]["status"], "completed");

        let session = data.session.lock().unwrap();
        let game = &session.matches[0];
        assert_eq!((game.score_a, game.score_b), (5, 3));
        assert!(game.ended_at.is_some());
    }

    #[actix_web::test]
    async fn roster_export_reads_back_as_upload() {
        let data = state();
        {
            let mut session = data.session.lock().unwrap();
            session.players = read_players(ROSTER.as_bytes()).unwrap();
        }
        let app = test::init_service(App::new().app_data(data.clone()).configure(configure)).await;

        let req = test::TestRequest::get().uri("/api/roster/export").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 401);

        let req = test::TestRequest::get()
            .uri("/api/roster/export")
            .insert_header(("X-Admin-Password", "pw"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let body = test::read_body(resp).await;

        let exported = read_players(&body[..]).unwrap();
        assert_eq!(exported.len(), 7);
        assert_eq!(exported[0].name, "Alice");
        assert!(exported[6].is_waitlisted);
    }

    #[actix_web::test]
    async fn schedule_stats_endpoint_reports_totals() {
        let data = state();
        {
            let mut session = data.session.lock().unwrap();
            session.players = read_players(ROSTER.as_bytes()).unwrap();
            session.regenerate_teams(&data.config);
            session.regenerate_schedule(&data.config);
        }
        let app = test::init_service(App::new().app_data(data.clone()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/schedule/stats").to_request();
        let stats: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stats["total_games"], 1);
        assert_eq!(stats["estimated_duration_minutes"], 10);
    }
}
