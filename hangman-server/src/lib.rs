use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use warp::Filter;
use warp::http::StatusCode;

use crate::game_service::{GameService, ServiceError};
use hangman_types::GameError;

pub mod config;
pub mod game_service;
pub mod stats_cache;

#[derive(Deserialize)]
struct CreateUserRequest {
    user_name: String,
    email: Option<String>,
}

#[derive(Deserialize)]
struct NewGameRequest {
    user_name: String,
    target_word: String,
}

#[derive(Deserialize)]
struct MakeMoveRequest {
    guess: String,
}

#[derive(Deserialize)]
struct HighScoresQuery {
    limit: Option<u64>,
}

pub fn create_routes(
    service: Arc<GameService>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let service_filter = warp::any().map({
        let service = service.clone();
        move || service.clone()
    });

    // Health check endpoint
    let health = warp::path!("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    let create_user = warp::path!("user")
        .and(warp::post())
        .and(warp::body::json())
        .and(service_filter.clone())
        .and_then(handle_create_user);

    let new_game = warp::path!("game")
        .and(warp::post())
        .and(warp::body::json())
        .and(service_filter.clone())
        .and_then(handle_new_game);

    let get_game = warp::path!("game" / String)
        .and(warp::get())
        .and(service_filter.clone())
        .and_then(handle_get_game);

    let make_move = warp::path!("game" / String)
        .and(warp::put())
        .and(warp::body::json())
        .and(service_filter.clone())
        .and_then(handle_make_move);

    let cancel_game = warp::path!("game" / String)
        .and(warp::delete())
        .and(service_filter.clone())
        .and_then(handle_cancel_game);

    let game_history = warp::path!("game" / String / "history")
        .and(warp::get())
        .and(service_filter.clone())
        .and_then(handle_game_history);

    let user_games = warp::path!("games" / "active" / "user" / String)
        .and(warp::get())
        .and(service_filter.clone())
        .and_then(handle_user_games);

    let average_wrong_guesses = warp::path!("games" / "average_wrong_guesses_remaining")
        .and(warp::get())
        .and(service_filter.clone())
        .and_then(handle_average_wrong_guesses);

    let scores = warp::path!("scores")
        .and(warp::get())
        .and(service_filter.clone())
        .and_then(handle_scores);

    let user_scores = warp::path!("scores" / "user" / String)
        .and(warp::get())
        .and(service_filter.clone())
        .and_then(handle_user_scores);

    let high_scores = warp::path!("high_scores")
        .and(warp::get())
        .and(warp::query::<HighScoresQuery>())
        .and(service_filter.clone())
        .and_then(handle_high_scores);

    let rankings = warp::path!("users" / "rankings")
        .and(warp::get())
        .and(service_filter.clone())
        .and_then(handle_rankings);

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST", "PUT", "DELETE"]);

    health
        .or(create_user)
        .or(new_game)
        .or(game_history)
        .or(get_game)
        .or(make_move)
        .or(cancel_game)
        .or(user_games)
        .or(average_wrong_guesses)
        .or(user_scores)
        .or(scores)
        .or(high_scores)
        .or(rankings)
        .with(cors)
        .with(warp::log("hangman"))
}

fn json_error(message: &str, status: StatusCode) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(
        warp::reply::json(&serde_json::json!({ "error": message })),
        status,
    )
}

fn json_message(message: String) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(
        warp::reply::json(&serde_json::json!({ "message": message })),
        StatusCode::OK,
    )
}

fn service_error_reply(err: ServiceError) -> warp::reply::WithStatus<warp::reply::Json> {
    match err {
        ServiceError::Game(game_err) => {
            let status = match &game_err {
                GameError::InvalidWord { .. }
                | GameError::WordTooShort { .. }
                | GameError::InvalidGuess { .. }
                | GameError::DuplicateGuess { .. }
                | GameError::GameAlreadyOver => StatusCode::BAD_REQUEST,
                GameError::UserNotFound { .. } | GameError::GameNotFound { .. } => {
                    StatusCode::NOT_FOUND
                }
                GameError::UserAlreadyExists { .. } | GameError::VersionConflict { .. } => {
                    StatusCode::CONFLICT
                }
            };
            json_error(&game_err.to_string(), status)
        }
        ServiceError::Internal(err) => {
            tracing::error!("Internal error handling request: {err:#}");
            json_error("Internal server error", StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn parse_game_id(game_id: &str) -> Result<Uuid, warp::reply::WithStatus<warp::reply::Json>> {
    Uuid::parse_str(game_id)
        .map_err(|_| json_error("Invalid game ID format", StatusCode::BAD_REQUEST))
}

async fn handle_create_user(
    request: CreateUserRequest,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match service.create_user(&request.user_name, request.email).await {
        Ok(user) => Ok(json_message(format!("User {} created!", user.name))),
        Err(err) => Ok(service_error_reply(err)),
    }
}

async fn handle_new_game(
    request: NewGameRequest,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match service
        .create_game(&request.user_name, &request.target_word)
        .await
    {
        Ok(view) => Ok(warp::reply::with_status(
            warp::reply::json(&view),
            StatusCode::OK,
        )),
        Err(err) => Ok(service_error_reply(err)),
    }
}

async fn handle_get_game(
    game_id: String,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let game_id = match parse_game_id(&game_id) {
        Ok(id) => id,
        Err(reply) => return Ok(reply),
    };

    match service.get_game(game_id).await {
        Ok(view) => Ok(warp::reply::with_status(
            warp::reply::json(&view),
            StatusCode::OK,
        )),
        Err(err) => Ok(service_error_reply(err)),
    }
}

async fn handle_make_move(
    game_id: String,
    request: MakeMoveRequest,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let game_id = match parse_game_id(&game_id) {
        Ok(id) => id,
        Err(reply) => return Ok(reply),
    };

    match service.apply_guess(game_id, &request.guess).await {
        Ok(view) => Ok(warp::reply::with_status(
            warp::reply::json(&view),
            StatusCode::OK,
        )),
        Err(err) => Ok(service_error_reply(err)),
    }
}

async fn handle_cancel_game(
    game_id: String,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let game_id = match parse_game_id(&game_id) {
        Ok(id) => id,
        Err(reply) => return Ok(reply),
    };

    match service.cancel_game(game_id).await {
        Ok(()) => Ok(json_message(format!("Game {game_id} deleted!"))),
        Err(err) => Ok(service_error_reply(err)),
    }
}

async fn handle_game_history(
    game_id: String,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let game_id = match parse_game_id(&game_id) {
        Ok(id) => id,
        Err(reply) => return Ok(reply),
    };

    match service.game_history(game_id).await {
        Ok(history) => Ok(warp::reply::with_status(
            warp::reply::json(&history),
            StatusCode::OK,
        )),
        Err(err) => Ok(service_error_reply(err)),
    }
}

async fn handle_user_games(
    user_name: String,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match service.user_games(&user_name, true).await {
        Ok(views) => Ok(warp::reply::with_status(
            warp::reply::json(&views),
            StatusCode::OK,
        )),
        Err(err) => Ok(service_error_reply(err)),
    }
}

async fn handle_average_wrong_guesses(
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let message = service.average_wrong_guesses_remaining().await;
    Ok(json_message(message))
}

async fn handle_scores(service: Arc<GameService>) -> Result<impl warp::Reply, warp::Rejection> {
    match service.all_scores().await {
        Ok(views) => Ok(warp::reply::with_status(
            warp::reply::json(&views),
            StatusCode::OK,
        )),
        Err(err) => Ok(service_error_reply(err)),
    }
}

async fn handle_user_scores(
    user_name: String,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match service.user_scores(&user_name).await {
        Ok(views) => Ok(warp::reply::with_status(
            warp::reply::json(&views),
            StatusCode::OK,
        )),
        Err(err) => Ok(service_error_reply(err)),
    }
}

async fn handle_high_scores(
    query: HighScoresQuery,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let limit = query.limit.unwrap_or(10).min(100); // Default 10, max 100

    match service.high_scores(limit).await {
        Ok(views) => Ok(warp::reply::with_status(
            warp::reply::json(&views),
            StatusCode::OK,
        )),
        Err(err) => Ok(service_error_reply(err)),
    }
}

async fn handle_rankings(service: Arc<GameService>) -> Result<impl warp::Reply, warp::Rejection> {
    match service.rankings().await {
        Ok(views) => Ok(warp::reply::with_status(
            warp::reply::json(&views),
            StatusCode::OK,
        )),
        Err(err) => Ok(service_error_reply(err)),
    }
}
