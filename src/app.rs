use std::sync::Arc;

use axum::response::IntoResponse;
use thiserror::Error;

use crate::{
    chat::{ChatService, ChatServiceImpl},
    client::{ClientService, ClientServiceImpl},
    game::{GameService, GameServiceImpl},
    league::{LeagueService, LeagueServiceImpl},
    persistence::{
        chat::{ChatMessageRepository, ChatMessageRepositoryImpl},
        games::{GameRepository, GameRepositoryImpl},
        leagues::{LeagueRepository, LeagueRepositoryImpl},
        players::{PlayerRepository, PlayerRepositoryImpl},
        teams::{TeamRepository, TeamRepositoryImpl},
        trades::{TradeOfferRepository, TradeOfferRepositoryImpl},
        users::{UserRepository, UserRepositoryImpl},
    },
    player::{PlayerService, PlayerServiceImpl},
    seed,
    team::{TeamService, TeamServiceImpl},
    trade::{TradeService, TradeServiceImpl},
    user::{UserService, UserServiceImpl},
};

pub type ArcClientService = Arc<Box<dyn ClientService + Send + Sync + 'static>>;
pub type ArcUserService = Arc<Box<dyn UserService + Send + Sync + 'static>>;
pub type ArcLeagueService = Arc<Box<dyn LeagueService + Send + Sync + 'static>>;
pub type ArcTeamService = Arc<Box<dyn TeamService + Send + Sync + 'static>>;
pub type ArcPlayerService = Arc<Box<dyn PlayerService + Send + Sync + 'static>>;
pub type ArcGameService = Arc<Box<dyn GameService + Send + Sync + 'static>>;
pub type ArcChatService = Arc<Box<dyn ChatService + Send + Sync + 'static>>;
pub type ArcTradeService = Arc<Box<dyn TradeService + Send + Sync + 'static>>;

pub type ArcUserRepository = Arc<Box<dyn UserRepository + Send + Sync + 'static>>;
pub type ArcLeagueRepository = Arc<Box<dyn LeagueRepository + Send + Sync + 'static>>;
pub type ArcTeamRepository = Arc<Box<dyn TeamRepository + Send + Sync + 'static>>;
pub type ArcPlayerRepository = Arc<Box<dyn PlayerRepository + Send + Sync + 'static>>;
pub type ArcGameRepository = Arc<Box<dyn GameRepository + Send + Sync + 'static>>;
pub type ArcChatMessageRepository = Arc<Box<dyn ChatMessageRepository + Send + Sync + 'static>>;
pub type ArcTradeOfferRepository = Arc<Box<dyn TradeOfferRepository + Send + Sync + 'static>>;

#[derive(Clone)]
pub struct AppState {
    pub client_service: ArcClientService,
    pub user_service: ArcUserService,
    pub league_service: ArcLeagueService,
    pub team_service: ArcTeamService,
    pub player_service: ArcPlayerService,
    pub game_service: ArcGameService,
    pub chat_service: ArcChatService,
    pub trade_service: ArcTradeService,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn bad_request<T, R>(msg: T) -> ServiceResult<R>
    where
        T: Into<String>,
    {
        Err(ServiceError::BadRequest(msg.into()))
    }

    pub fn unauthorized<T, R>(msg: T) -> ServiceResult<R>
    where
        T: Into<String>,
    {
        Err(ServiceError::Unauthorized(msg.into()))
    }

    pub fn not_found<T, R>(msg: T) -> ServiceResult<R>
    where
        T: Into<String>,
    {
        Err(ServiceError::NotFound(msg.into()))
    }

    pub fn forbidden<T, R>(msg: T) -> ServiceResult<R>
    where
        T: Into<String>,
    {
        Err(ServiceError::Forbidden(msg.into()))
    }

    pub fn internal<T, R>(msg: T) -> ServiceResult<R>
    where
        T: Into<String>,
    {
        Err(ServiceError::Internal(msg.into()))
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::http::Response<axum::body::Body> {
        let (status, msg) = match self {
            ServiceError::NotFound(msg) => (axum::http::StatusCode::NOT_FOUND, msg),
            ServiceError::Unauthorized(msg) => (axum::http::StatusCode::UNAUTHORIZED, msg),
            ServiceError::BadRequest(msg) => (axum::http::StatusCode::BAD_REQUEST, msg),
            ServiceError::Forbidden(msg) => (axum::http::StatusCode::FORBIDDEN, msg),
            ServiceError::Internal(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        let body = serde_json::json!({ "error": msg });
        (status, axum::Json(body)).into_response()
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

pub fn construct_app() -> AppState {
    let user_repository: ArcUserRepository = Arc::new(Box::new(UserRepositoryImpl::new()));
    let league_repository: ArcLeagueRepository = Arc::new(Box::new(LeagueRepositoryImpl::new()));
    let team_repository: ArcTeamRepository = Arc::new(Box::new(TeamRepositoryImpl::new()));
    let player_repository: ArcPlayerRepository = Arc::new(Box::new(PlayerRepositoryImpl::new()));
    let game_repository: ArcGameRepository = Arc::new(Box::new(GameRepositoryImpl::new()));
    let chat_repository: ArcChatMessageRepository =
        Arc::new(Box::new(ChatMessageRepositoryImpl::new()));
    let trade_repository: ArcTradeOfferRepository =
        Arc::new(Box::new(TradeOfferRepositoryImpl::new()));

    seed::install_fixtures(
        &user_repository,
        &league_repository,
        &team_repository,
        &player_repository,
        &chat_repository,
    );

    let client_service: ArcClientService = Arc::new(Box::new(ClientServiceImpl::new()));

    let user_service: ArcUserService =
        Arc::new(Box::new(UserServiceImpl::new(user_repository.clone())));

    let league_service: ArcLeagueService = Arc::new(Box::new(LeagueServiceImpl::new(
        user_repository.clone(),
        league_repository.clone(),
    )));

    let team_service: ArcTeamService = Arc::new(Box::new(TeamServiceImpl::new(
        league_repository.clone(),
        team_repository.clone(),
    )));

    let player_service: ArcPlayerService = Arc::new(Box::new(PlayerServiceImpl::new(
        team_repository.clone(),
        player_repository.clone(),
    )));

    let game_service: ArcGameService = Arc::new(Box::new(GameServiceImpl::new(
        league_repository.clone(),
        team_repository.clone(),
        game_repository.clone(),
    )));

    let chat_service: ArcChatService = Arc::new(Box::new(ChatServiceImpl::new(
        client_service.clone(),
        user_repository.clone(),
        league_repository.clone(),
        chat_repository.clone(),
    )));

    let trade_service: ArcTradeService = Arc::new(Box::new(TradeServiceImpl::new(
        team_repository.clone(),
        trade_repository.clone(),
    )));

    AppState {
        client_service,
        user_service,
        league_service,
        team_service,
        player_service,
        game_service,
        chat_service,
        trade_service,
    }
}
