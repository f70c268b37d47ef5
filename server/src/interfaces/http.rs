
use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

use league::{Error, ErrorKind, OpponentId, OpponentRecord, Registry};

use utils::log;

use uuid::Uuid;

use super::messages::*;

///
/// State shared by every request handler. The registry is the only state the service
/// holds; the instance id tells replicas apart in logs and health checks.
///
pub struct AppState 
{
    pub registry: Arc<Registry>,
    pub instance: Uuid
}

impl AppState 
{
    pub fn new (registry: Arc<Registry>) -> AppState 
    {
        AppState { registry, instance: Uuid::new_v4() }
    }
}

///
/// Builds the router, serving every route at the root and again below `prefix` when
/// one is given.
///
pub fn create_router (state: Arc<AppState>, prefix: & str) -> Router 
{
    let router = match prefix 
    {
        "" | "/" => routes(),
        prefix   => routes().nest(prefix, routes())
    };

    router.with_state(state)
}

fn routes () -> Router<Arc<AppState>>
{
    Router::new()
        .route("/add_opponent", post(add_opponent))
        .route("/get_opponent", get(get_opponent))
        .route("/update_skill", post(update_skill))
        .route("/opponents", get(list_opponents))
        .route("/opponents/:id", get(opponent_by_id))
        .route("/health", get(health))
}

///
/// A failed request: the registry's error kind decides the status code.
///
#[derive(Debug)]
pub struct ApiError(Error);

impl IntoResponse for ApiError 
{
    fn into_response (self) -> Response 
    {
        let kind = self.0.kind();
        let status = match kind 
        {
            ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound        => StatusCode::NOT_FOUND,
            ErrorKind::Conflict        => StatusCode::CONFLICT
        };

        log::warn!("Rejected request ({}): {}", kind, self.0);
        (status, Json(ErrorResponse { kind, message: self.0.to_string() })).into_response()
    }
}

impl From<Error> for ApiError 
{
    fn from (err: Error) -> ApiError 
    {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError 
{
    fn from (rejection: JsonRejection) -> ApiError 
    {
        ApiError(Error::invalid(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError 
{
    fn from (rejection: PathRejection) -> ApiError 
    {
        ApiError(Error::invalid(rejection.body_text()))
    }
}

///
/// Registers a new opponent.
///
async fn add_opponent (
    State(state): State<Arc<AppState>>,
    body: Result<Json<AddOpponentRequest>, JsonRejection>
) -> Result<Json<AddOpponentResponse>, ApiError>
{
    let Json(request) = body?;
    let path = request.opponent_path()?;
    let label = request.label();

    let id = state.registry.register_as(label, & path, request.opponent_info)?;

    Ok(Json(AddOpponentResponse { msg: format!("Opponent {} added with model path: {}", id, path), opponent_id: id }))
}

///
/// Returns the opponent to play next.
///
async fn get_opponent (State(state): State<Arc<AppState>>) -> Result<Json<OpponentResponse>, ApiError>
{
    let record = state.registry.select()?;
    Ok(Json(record.into()))
}

///
/// Applies a match result to both participants.
///
async fn update_skill (
    State(state): State<Arc<AppState>>,
    body: Result<Json<UpdateSkillRequest>, JsonRejection>
) -> Result<Json<UpdateSkillResponse>, ApiError>
{
    let Json(request) = body?;
    let (opponent, other) = state.registry.report_result(request.opponent_id, request.other_id, request.result)?;

    Ok(Json(UpdateSkillResponse { msg: "Skill updated.".to_owned(), opponent, other }))
}

async fn list_opponents (State(state): State<Arc<AppState>>) -> Json<Vec<OpponentRecord>>
{
    Json(state.registry.standings())
}

async fn opponent_by_id (
    State(state): State<Arc<AppState>>,
    id: Result<Path<OpponentId>, PathRejection>
) -> Result<Json<OpponentRecord>, ApiError>
{
    let Path(id) = id?;
    Ok(Json(state.registry.get(id)?))
}

async fn health (State(state): State<Arc<AppState>>) -> Json<HealthResponse>
{
    Json(HealthResponse 
    { 
        status: "ok".to_owned(), 
        instance: state.instance.to_string(), 
        opponents: state.registry.len() 
    })
}

#[cfg(test)]
mod tests 
{
    use super::*;

    use axum::body::Body;
    use axum::http::Request;

    use serde_json::{json, Value};

    use tower::ServiceExt;

    fn router () -> Router 
    {
        create_router(Arc::new(AppState::new(Arc::new(Registry::default()))), "/selfplay")
    }

    async fn call (router: & Router, method: & str, uri: & str, body: Option<Value>) -> (StatusCode, Value)
    {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body 
        {
            Some(body) => builder.header("content-type", "application/json").body(Body::from(body.to_string())).unwrap(),
            None       => builder.body(Body::empty()).unwrap()
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, serde_json::from_slice(& bytes).unwrap_or(Value::Null))
    }

    async fn add (router: & Router, path: & str) -> OpponentId 
    {
        let (status, body) = call(router, "POST", "/add_opponent", Some(json!({ "opponent_id": path, "opponent_info": { "opponent_path": path } }))).await;
        assert_eq!(status, StatusCode::OK);
        body["opponent_id"].as_u64().unwrap() as OpponentId
    }

    #[tokio::test]
    async fn empty_pool_has_no_opponent ()
    {
        let (status, body) = call(& router(), "GET", "/get_opponent", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["kind"], "NotFound");
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn registered_opponents_are_served_newest_first ()
    {
        let router = router();

        let (status, body) = call(& router, "POST", "/add_opponent", Some(json!({
            "opponent_id": "player_0",
            "opponent_info": { "opponent_path": "ckpt_001", "opponent_type": "main", "iteration": 10 }
        }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["opponent_id"], 0);
        assert_eq!(body["msg"], "Opponent 0 added with model path: ckpt_001");

        assert_eq!(add(& router, "ckpt_002").await, 1);

        let (status, body) = call(& router, "GET", "/get_opponent", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["opponent_id"], 1);
        assert_eq!(body["opponent_path"], "ckpt_002");
        assert_eq!(body["opponent_type"], "default");

        let (_, body) = call(& router, "GET", "/opponents/0", None).await;
        assert_eq!(body["kind"], "main");
        assert_eq!(body["label"], "player_0");
        assert_eq!(body["metadata"]["iteration"], 10);
    }

    #[tokio::test]
    async fn registration_needs_a_path ()
    {
        let router = router();

        for body in [json!({ "opponent_id": 3 }), json!({ "opponent_info": { "opponent_path": "" } }), json!({ "opponent_info": { "opponent_path": 12 } })]
        {
            let (status, body) = call(& router, "POST", "/add_opponent", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["kind"], "InvalidArgument");
        }

        let (_, body) = call(& router, "GET", "/health", None).await;
        assert_eq!(body["opponents"], 0);
    }

    #[tokio::test]
    async fn malformed_bodies_are_bad_requests ()
    {
        let router = router();
        let request = Request::builder()
            .method("POST")
            .uri("/update_skill")
            .header("content-type", "application/json")
            .body(Body::from("{\"opponent_id\": 0"))
            .unwrap();

        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let (status, _) = call(& router, "POST", "/update_skill", Some(json!({ "opponent_id": 0, "other_id": 1, "result": "sideways" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(& router, "GET", "/opponents/first", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn skill_updates_move_both_ratings ()
    {
        let router = router();
        add(& router, "ckpt_001").await;
        add(& router, "ckpt_002").await;

        let (status, body) = call(& router, "POST", "/update_skill", Some(json!({ "opponent_id": 0, "other_id": 1, "result": "A_WINS" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["msg"], "Skill updated.");

        let gained = body["opponent"]["mu"].as_f64().unwrap() - 1000.0;
        let lost = 1000.0 - body["other"]["mu"].as_f64().unwrap();
        assert!(gained > 0.0);
        assert_eq!(gained, lost);

        let (_, standings) = call(& router, "GET", "/opponents", None).await;
        assert_eq!(standings[0]["id"], 0);
        assert_eq!(standings[1]["id"], 1);
        assert_eq!(standings[0]["rating"]["games"], 1);
    }

    #[tokio::test]
    async fn skill_updates_check_their_ids ()
    {
        let router = router();
        add(& router, "ckpt_001").await;

        let (status, body) = call(& router, "POST", "/update_skill", Some(json!({ "opponent_id": 0, "other_id": 5, "result": "DRAW" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["kind"], "NotFound");

        let (status, body) = call(& router, "POST", "/update_skill", Some(json!({ "opponent_id": 0, "other_id": 0, "result": "DRAW" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "InvalidArgument");

        let (_, body) = call(& router, "GET", "/opponents/0", None).await;
        assert_eq!(body["rating"]["games"], 0);
    }

    #[tokio::test]
    async fn routes_are_served_under_the_prefix ()
    {
        let router = router();
        add(& router, "ckpt_001").await;

        let (status, body) = call(& router, "GET", "/selfplay/get_opponent", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["opponent_path"], "ckpt_001");

        let bare = create_router(Arc::new(AppState::new(Arc::new(Registry::default()))), "");
        let (status, _) = call(& bare, "GET", "/selfplay/health", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, body) = call(& bare, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_reports_all_land ()
    {
        let registry = Arc::new(Registry::default());
        let router = create_router(Arc::new(AppState::new(registry.clone())), "");

        add(& router, "hub").await;
        for i in 0 .. 32 
        {
            add(& router, & format!("ckpt_{}", i)).await;
        }

        let tasks : Vec<_> = (1 ..= 32)
            .map(|other| 
            {
                let router = router.clone();
                tokio::spawn(async move 
                {
                    call(& router, "POST", "/update_skill", Some(json!({ "opponent_id": 0, "other_id": other, "result": "A_WINS" }))).await.0
                })
            })
            .collect();

        for task in tasks 
        {
            assert_eq!(task.await.unwrap(), StatusCode::OK);
        }

        let hub = registry.get(0).unwrap();
        assert_eq!(hub.rating.games, 32);

        let total : f64 = registry.snapshot().iter().map(|record| record.rating.mu - 1000.0).sum();
        assert!(total.abs() < 1e-6);
    }
}
