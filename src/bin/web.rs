//! Single binary web server: REST API for players, queues, matches, sessions.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::http::header;
use actix_web::{
    delete, get, post,
    web::{Data, Json, Path, Query},
    App, HttpRequest, HttpResponse, HttpServer, Responder,
};
use badminton_queue_web::auth::decode_user_id;
use badminton_queue_web::cache::ExpiringMap;
use badminton_queue_web::{
    finish_match, order_entries, partition_teams, plan_checkin_sync, select_next_match,
    start_auto_match, start_manual_match, validate_finish, waiting_list, MatchId, Mode, Player,
    PlayerId, Queue, QueueEntry, QueueError, QueueId, RawSetScore, ScoreFormat, Session,
    SessionId, TeamAssignment, UserId,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use std::time::Duration;

/// Queues idle this long are dropped by the cleanup task.
const QUEUE_TTL: Duration = Duration::from_secs(12 * 3600);

/// Sessions idle this long are dropped by the cleanup task.
const SESSION_TTL: Duration = Duration::from_secs(24 * 3600);

/// In-memory state: the player registry plus expiring queue and session maps.
struct Registry {
    players: Vec<Player>,
    queues: ExpiringMap<QueueId, Queue>,
    sessions: ExpiringMap<SessionId, Session>,
}

impl Registry {
    fn new() -> Self {
        Self {
            players: Vec::new(),
            queues: ExpiringMap::new(QUEUE_TTL),
            sessions: ExpiringMap::new(SESSION_TTL),
        }
    }

    /// Add a player. Names must be non-empty and unique (case-insensitive).
    fn add_player(
        &mut self,
        display_name: &str,
        is_registered: bool,
        user_id: Option<UserId>,
    ) -> Result<Player, QueueError> {
        let name = display_name.trim();
        if name.is_empty() {
            return Err(QueueError::EmptyName);
        }
        if self
            .players
            .iter()
            .any(|p| p.display_name.eq_ignore_ascii_case(name))
        {
            return Err(QueueError::DuplicatePlayerName);
        }
        let mut player = match user_id {
            Some(uid) => Player::registered(name, uid),
            None => Player::new(name),
        };
        player.is_registered = is_registered || user_id.is_some();
        self.players.push(player.clone());
        Ok(player)
    }

    fn player_name_for_user(&self, user_id: UserId) -> Option<String> {
        self.players
            .iter()
            .find(|p| p.user_id == Some(user_id))
            .map(|p| p.display_name.clone())
    }
}

type AppState = Data<RwLock<Registry>>;

/// User id decoded from the Authorization header, if present and well-formed.
fn bearer_user(req: &HttpRequest) -> Option<UserId> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    decode_user_id(token)
}

fn error_json(e: impl std::fmt::Display) -> serde_json::Value {
    serde_json::json!({ "error": e.to_string() })
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreatePlayerBody {
    display_name: String,
    #[serde(default)]
    is_registered: bool,
    user_id: Option<UserId>,
}

#[derive(Deserialize)]
struct CreateQueueBody {
    name: String,
    #[serde(default)]
    mode: Mode,
    session_id: Option<SessionId>,
}

#[derive(Deserialize)]
struct QueueStatusBody {
    is_open: bool,
}

#[derive(Deserialize)]
struct QueueModeBody {
    mode: Mode,
}

#[derive(Deserialize)]
struct PlayerRefBody {
    player_id: PlayerId,
}

#[derive(Deserialize)]
struct StartMatchBody {
    mode: Option<Mode>,
}

#[derive(Deserialize)]
struct StartManualBody {
    player_ids: Vec<PlayerId>,
    mode: Option<Mode>,
}

#[derive(Deserialize)]
struct FinishMatchBody {
    match_id: MatchId,
    winner_id: Option<PlayerId>,
    #[serde(default)]
    format: ScoreFormat,
    #[serde(default)]
    sets: Vec<RawSetScore>,
}

#[derive(Deserialize)]
struct CreateSessionBody {
    name: String,
    description: Option<String>,
    #[serde(default = "default_true")]
    is_public: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
struct JoinSessionBody {
    name: Option<String>,
}

#[derive(Deserialize)]
struct MemberRefBody {
    user_id: UserId,
}

#[derive(Deserialize)]
struct ListSessionsQuery {
    search: Option<String>,
}

/// Path segment: queue id (e.g. /api/queues/{id})
#[derive(Deserialize)]
struct QueuePath {
    id: QueueId,
}

/// Path segment: session id (e.g. /api/sessions/{id})
#[derive(Deserialize)]
struct SessionPath {
    id: SessionId,
}

/// Path segment: player id (e.g. /api/players/{id})
#[derive(Deserialize)]
struct PlayerPath {
    id: PlayerId,
}

/// Session list item: detail minus the member list.
#[derive(Serialize)]
struct SessionSummary {
    id: SessionId,
    name: String,
    description: Option<String>,
    is_public: bool,
    owner_name: String,
    member_count: usize,
}

/// The engine's view of one queue: fairness order, next match, waiting list.
#[derive(Serialize)]
struct NextMatchResponse {
    mode: Mode,
    needed: usize,
    ordered: Vec<QueueEntry>,
    /// Court slots for the next match; absent while waiting for players.
    selection: Option<TeamAssignment>,
    waiting: Vec<QueueEntry>,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "badminton-queue-web",
    })
}

/// List all known players.
#[get("/api/players")]
async fn api_list_players(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(&g.players)
}

/// Add a player to the registry (guest, or linked to a user account).
#[post("/api/players")]
async fn api_create_player(state: AppState, body: Json<CreatePlayerBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.add_player(&body.display_name, body.is_registered, body.user_id) {
        Ok(player) => HttpResponse::Ok().json(player),
        Err(e) => HttpResponse::BadRequest().json(error_json(e)),
    }
}

/// Delete a player; their queue entries go with them.
#[delete("/api/players/{id}")]
async fn api_delete_player(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let reg = &mut *g;
    let idx = match reg.players.iter().position(|p| p.id == path.id) {
        Some(i) => i,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No player" })),
    };
    for queue in reg.queues.values_mut() {
        queue.entries.retain(|e| e.player_id != path.id);
    }
    reg.players.remove(idx);
    HttpResponse::Ok().json(serde_json::json!({ "deleted": true }))
}

/// Create a queue, optionally attached to a session.
#[post("/api/queues")]
async fn api_create_queue(state: AppState, body: Json<CreateQueueBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if let Some(session_id) = body.session_id {
        if g.sessions.get(&session_id).is_none() {
            return HttpResponse::BadRequest().json(serde_json::json!({ "error": "No session" }));
        }
    }
    let name = body.name.trim();
    let queue = Queue::new(
        if name.is_empty() { "Queue" } else { name },
        body.mode,
        body.session_id,
    );
    let id = queue.id;
    g.queues.insert(id, queue.clone());
    log::info!("Created queue {} ({:?})", id, body.mode);
    HttpResponse::Ok().json(queue)
}

/// Get a queue by id (404 if not found or expired).
#[get("/api/queues/{id}")]
async fn api_get_queue(state: AppState, path: Path<QueuePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.queues.get(&path.id) {
        Some(queue) => HttpResponse::Ok().json(queue),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No queue" })),
    }
}

/// The fairness order, next-match slots, and waiting list for a queue.
#[get("/api/queues/{id}/next-match")]
async fn api_next_match(state: AppState, path: Path<QueuePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let queue = match g.queues.get(&path.id) {
        Some(q) => q,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No queue" })),
    };
    let ordered = order_entries(&queue.entries);
    let selection = select_next_match(&ordered, queue.mode)
        .and_then(|next| partition_teams(&next.players, queue.mode).ok());
    let waiting = waiting_list(&ordered, queue.mode).to_vec();
    HttpResponse::Ok().json(NextMatchResponse {
        mode: queue.mode,
        needed: queue.mode.needed_players(),
        ordered,
        selection,
        waiting,
    })
}

/// Open or close a queue.
#[post("/api/queues/{id}/status")]
async fn api_set_queue_status(
    state: AppState,
    path: Path<QueuePath>,
    body: Json<QueueStatusBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.queues.get_mut(&path.id) {
        Some(queue) => {
            queue.set_open(body.is_open);
            HttpResponse::Ok().json(queue)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No queue" })),
    }
}

/// Switch a queue between singles and doubles.
#[post("/api/queues/{id}/mode")]
async fn api_set_queue_mode(
    state: AppState,
    path: Path<QueuePath>,
    body: Json<QueueModeBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.queues.get_mut(&path.id) {
        Some(queue) => {
            queue.set_mode(body.mode);
            HttpResponse::Ok().json(queue)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No queue" })),
    }
}

/// Add a registered player to the queue.
#[post("/api/queues/{id}/enqueue")]
async fn api_enqueue(
    state: AppState,
    path: Path<QueuePath>,
    body: Json<PlayerRefBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let reg = &mut *g;
    let player = match reg.players.iter().find(|p| p.id == body.player_id) {
        Some(p) => p.clone(),
        None => {
            return HttpResponse::BadRequest()
                .json(error_json(QueueError::PlayerNotFound(body.player_id)))
        }
    };
    let queue = match reg.queues.get_mut(&path.id) {
        Some(q) => q,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No queue" })),
    };
    match queue.enqueue(&player, Utc::now()) {
        Ok(()) => HttpResponse::Ok().json(queue),
        Err(e) => HttpResponse::BadRequest().json(error_json(e)),
    }
}

/// Remove a player from the queue.
#[post("/api/queues/{id}/remove")]
async fn api_remove_from_queue(
    state: AppState,
    path: Path<QueuePath>,
    body: Json<PlayerRefBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let queue = match g.queues.get_mut(&path.id) {
        Some(q) => q,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No queue" })),
    };
    match queue.remove_player(body.player_id) {
        Ok(()) => HttpResponse::Ok().json(queue),
        Err(e) => HttpResponse::BadRequest().json(error_json(e)),
    }
}

/// Start a match with the automatic fairness pick.
#[post("/api/queues/{id}/start-match")]
async fn api_start_match(
    state: AppState,
    path: Path<QueuePath>,
    body: Option<Json<StartMatchBody>>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let queue = match g.queues.get_mut(&path.id) {
        Some(q) => q,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No queue" })),
    };
    let mode = body.as_ref().and_then(|b| b.mode).unwrap_or(queue.mode);
    match start_auto_match(queue, mode, Utc::now()) {
        Ok(id) => {
            log::info!("Started match {} on queue {}", id, queue.id);
            HttpResponse::Ok().json(queue.match_mut(id).cloned())
        }
        Err(e) => HttpResponse::BadRequest().json(error_json(e)),
    }
}

/// Start a match from an explicit participant list (manual selection).
#[post("/api/queues/{id}/start-match-manual")]
async fn api_start_match_manual(
    state: AppState,
    path: Path<QueuePath>,
    body: Json<StartManualBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let queue = match g.queues.get_mut(&path.id) {
        Some(q) => q,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No queue" })),
    };
    let mode = body.mode.unwrap_or(queue.mode);
    match start_manual_match(queue, &body.player_ids, mode, Utc::now()) {
        Ok(id) => {
            log::info!("Started manual match {} on queue {}", id, queue.id);
            HttpResponse::Ok().json(queue.match_mut(id).cloned())
        }
        Err(e) => HttpResponse::BadRequest().json(error_json(e)),
    }
}

/// Finish an ongoing match: validate winner and set scores, then apply.
/// Each participant's games counter is bumped so the fairness order moves.
#[post("/api/queues/{id}/finish-match")]
async fn api_finish_match(
    state: AppState,
    path: Path<QueuePath>,
    body: Json<FinishMatchBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let reg = &mut *g;
    let queue = match reg.queues.get_mut(&path.id) {
        Some(q) => q,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No queue" })),
    };
    let participants = match queue.match_mut(body.match_id) {
        Some(m) => m.participant_ids(),
        None => {
            return HttpResponse::BadRequest()
                .json(error_json(QueueError::MatchNotFound(body.match_id)))
        }
    };
    let input = match validate_finish(body.winner_id, &participants, body.format, &body.sets) {
        Ok(input) => input,
        Err(e) => return HttpResponse::BadRequest().json(error_json(e)),
    };
    let ids = match finish_match(queue, body.match_id, &input, Utc::now()) {
        Ok(ids) => ids,
        Err(e) => return HttpResponse::BadRequest().json(error_json(e)),
    };
    let finished = queue.match_mut(body.match_id).cloned();
    for id in &ids {
        if let Some(p) = reg.players.iter_mut().find(|p| p.id == *id) {
            p.record_game();
        }
    }
    HttpResponse::Ok().json(finished)
}

/// Matches currently being played on this queue.
#[get("/api/queues/{id}/ongoing-matches")]
async fn api_ongoing_matches(state: AppState, path: Path<QueuePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.queues.get(&path.id) {
        Some(queue) => HttpResponse::Ok().json(queue.ongoing()),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No queue" })),
    }
}

/// Finished matches, most recent first (last 50).
#[get("/api/queues/{id}/matches")]
async fn api_match_history(state: AppState, path: Path<QueuePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.queues.get(&path.id) {
        Some(queue) => HttpResponse::Ok().json(queue.history(50)),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No queue" })),
    }
}

/// Align the queue with its session's check-ins: enqueue checked-in members'
/// players, remove players whose member checked out.
#[post("/api/queues/{id}/sync-checkins")]
async fn api_sync_checkins(state: AppState, path: Path<QueuePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let reg = &mut *g;
    let plan = {
        let queue = match reg.queues.get(&path.id) {
            Some(q) => q,
            None => {
                return HttpResponse::NotFound().json(serde_json::json!({ "error": "No queue" }))
            }
        };
        let session_id = match queue.session_id {
            Some(id) => id,
            None => {
                return HttpResponse::BadRequest()
                    .json(serde_json::json!({ "error": "Queue has no session" }))
            }
        };
        let session = match reg.sessions.get(&session_id) {
            Some(s) => s,
            None => {
                return HttpResponse::NotFound()
                    .json(serde_json::json!({ "error": "No session" }))
            }
        };
        plan_checkin_sync(queue, session, &reg.players)
    };
    let to_enqueue: Vec<Player> = plan
        .enqueue
        .iter()
        .filter_map(|id| reg.players.iter().find(|p| p.id == *id).cloned())
        .collect();
    let queue = match reg.queues.get_mut(&path.id) {
        Some(q) => q,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No queue" })),
    };
    let now = Utc::now();
    for player in &to_enqueue {
        // Per-player failures (e.g. a just-closed queue) skip that player,
        // the rest of the plan still applies.
        let _ = queue.enqueue(player, now);
    }
    for id in &plan.remove {
        let _ = queue.remove_player(*id);
    }
    if !plan.is_empty() {
        log::info!(
            "Synced queue {}: {} enqueued, {} removed",
            queue.id,
            plan.enqueue.len(),
            plan.remove.len()
        );
    }
    HttpResponse::Ok().json(queue)
}

/// List sessions, optionally filtered by a name substring.
#[get("/api/sessions")]
async fn api_list_sessions(state: AppState, query: Query<ListSessionsQuery>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let needle = query.search.as_deref().unwrap_or("").to_lowercase();
    let sessions: Vec<SessionSummary> = g
        .sessions
        .values()
        .filter(|s| needle.is_empty() || s.name.to_lowercase().contains(&needle))
        .map(|s| SessionSummary {
            id: s.id,
            name: s.name.clone(),
            description: s.description.clone(),
            is_public: s.is_public,
            owner_name: s.owner_name.clone(),
            member_count: s.members.len(),
        })
        .collect();
    HttpResponse::Ok().json(sessions)
}

/// Create a session; the caller (from the bearer token) becomes the owner.
#[post("/api/sessions")]
async fn api_create_session(
    state: AppState,
    req: HttpRequest,
    body: Json<CreateSessionBody>,
) -> HttpResponse {
    let user_id = match bearer_user(&req) {
        Some(id) => id,
        None => {
            return HttpResponse::Unauthorized()
                .json(serde_json::json!({ "error": "Missing or invalid bearer token" }))
        }
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let name = body.name.trim();
    if name.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": "Name required" }));
    }
    let owner_name = g
        .player_name_for_user(user_id)
        .unwrap_or_else(|| "Unknown".to_string());
    let session = Session::new(
        name,
        body.description.clone().filter(|d| !d.trim().is_empty()),
        body.is_public,
        user_id,
        owner_name,
    );
    let id = session.id;
    g.sessions.insert(id, session.clone());
    log::info!("Created session {}", id);
    HttpResponse::Ok().json(session)
}

/// Get a session with its member list.
#[get("/api/sessions/{id}")]
async fn api_get_session(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.sessions.get(&path.id) {
        Some(session) => HttpResponse::Ok().json(session),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    }
}

/// Delete a session. Attached queues stay and expire on their own.
#[delete("/api/sessions/{id}")]
async fn api_delete_session(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.sessions.remove(&path.id) {
        Some(_) => HttpResponse::Ok().json(serde_json::json!({ "deleted": true })),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    }
}

/// Join a session as the calling user.
#[post("/api/sessions/{id}/join")]
async fn api_join_session(
    state: AppState,
    req: HttpRequest,
    path: Path<SessionPath>,
    body: Option<Json<JoinSessionBody>>,
) -> HttpResponse {
    let user_id = match bearer_user(&req) {
        Some(id) => id,
        None => {
            return HttpResponse::Unauthorized()
                .json(serde_json::json!({ "error": "Missing or invalid bearer token" }))
        }
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let name = body
        .as_ref()
        .and_then(|b| b.name.clone())
        .or_else(|| g.player_name_for_user(user_id));
    let name = match name {
        Some(n) => n,
        None => {
            return HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": "Display name required" }))
        }
    };
    let session = match g.sessions.get_mut(&path.id) {
        Some(s) => s,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    match session.join(user_id, name) {
        Ok(()) => HttpResponse::Ok().json(session),
        Err(e) => HttpResponse::BadRequest().json(error_json(e)),
    }
}

/// Leave a session as the calling user.
#[post("/api/sessions/{id}/leave")]
async fn api_leave_session(
    state: AppState,
    req: HttpRequest,
    path: Path<SessionPath>,
) -> HttpResponse {
    let user_id = match bearer_user(&req) {
        Some(id) => id,
        None => {
            return HttpResponse::Unauthorized()
                .json(serde_json::json!({ "error": "Missing or invalid bearer token" }))
        }
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let session = match g.sessions.get_mut(&path.id) {
        Some(s) => s,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    match session.leave(user_id) {
        Ok(()) => HttpResponse::Ok().json(session),
        Err(e) => HttpResponse::BadRequest().json(error_json(e)),
    }
}

/// Check a member in (present and available for queueing).
#[post("/api/sessions/{id}/check-in")]
async fn api_check_in(
    state: AppState,
    path: Path<SessionPath>,
    body: Json<MemberRefBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let session = match g.sessions.get_mut(&path.id) {
        Some(s) => s,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    match session.check_in(body.user_id) {
        Ok(()) => HttpResponse::Ok().json(session),
        Err(e) => HttpResponse::BadRequest().json(error_json(e)),
    }
}

/// Check a member out.
#[post("/api/sessions/{id}/check-out")]
async fn api_check_out(
    state: AppState,
    path: Path<SessionPath>,
    body: Json<MemberRefBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let session = match g.sessions.get_mut(&path.id) {
        Some(s) => s,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    match session.check_out(body.user_id) {
        Ok(()) => HttpResponse::Ok().json(session),
        Err(e) => HttpResponse::BadRequest().json(error_json(e)),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(Registry::new()));

    // Background task: every 30 minutes, drop queues and sessions past
    // their idle window.
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let queues = g.queues.purge_expired();
            let sessions = g.sessions.purge_expired();
            if queues + sessions > 0 {
                log::info!("Expired {} queue(s) and {} session(s)", queues, sessions);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_list_players)
            .service(api_create_player)
            .service(api_delete_player)
            .service(api_create_queue)
            .service(api_get_queue)
            .service(api_next_match)
            .service(api_set_queue_status)
            .service(api_set_queue_mode)
            .service(api_enqueue)
            .service(api_remove_from_queue)
            .service(api_start_match)
            .service(api_start_match_manual)
            .service(api_finish_match)
            .service(api_ongoing_matches)
            .service(api_match_history)
            .service(api_sync_checkins)
            .service(api_list_sessions)
            .service(api_create_session)
            .service(api_get_session)
            .service(api_delete_session)
            .service(api_join_session)
            .service(api_leave_session)
            .service(api_check_in)
            .service(api_check_out)
    })
    .bind(bind)?
    .run()
    .await
}
