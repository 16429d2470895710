use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::{
    AppState, ServiceError, ServiceResult,
    chat::{ChatMessageView, ChatService},
    game::{Game, GameService},
    jwt::Claims,
    league::{League, LeagueId, LeagueService},
    player::{Player, PlayerService},
    team::{CreateTeam, StandingsRow, Team, TeamService},
    user::{UserId, UserService},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaguesQuery {
    pub commissioner_id: Option<UserId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeaguePayload {
    pub name: String,
    #[serde(default)]
    pub salary_cap: Option<f64>,
}

pub async fn get_leagues(
    State(state): State<AppState>,
    Query(query): Query<LeaguesQuery>,
) -> ServiceResult<Json<Vec<League>>> {
    let Some(commissioner_id) = query.commissioner_id else {
        return ServiceError::bad_request("Commissioner ID required");
    };
    Ok(Json(
        state.league_service.leagues_by_commissioner(commissioner_id),
    ))
}

pub async fn create_league(
    State(state): State<AppState>,
    claims: Claims,
    Json(payload): Json<CreateLeaguePayload>,
) -> ServiceResult<Json<League>> {
    let user = state.user_service.fetch_user_by_username(&claims.sub)?;
    let league = state
        .league_service
        .create_league(user.id, &payload.name, payload.salary_cap)?;
    Ok(Json(league))
}

pub async fn get_league(
    State(state): State<AppState>,
    Path(id): Path<LeagueId>,
) -> ServiceResult<Json<League>> {
    Ok(Json(state.league_service.fetch_league(id)?))
}

pub async fn get_league_teams(
    State(state): State<AppState>,
    Path(id): Path<LeagueId>,
) -> ServiceResult<Json<Vec<Team>>> {
    Ok(Json(state.team_service.teams_by_league(id)?))
}

pub async fn create_league_team(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<LeagueId>,
    Json(payload): Json<CreateTeam>,
) -> ServiceResult<Json<Team>> {
    let user = state.user_service.fetch_user_by_username(&claims.sub)?;
    Ok(Json(state.team_service.create_team(user.id, id, payload)?))
}

pub async fn get_standings(
    State(state): State<AppState>,
    Path(id): Path<LeagueId>,
) -> ServiceResult<Json<Vec<StandingsRow>>> {
    Ok(Json(state.team_service.standings(id)?))
}

pub async fn get_league_players(
    State(state): State<AppState>,
    Path(id): Path<LeagueId>,
) -> ServiceResult<Json<Vec<Player>>> {
    state.league_service.fetch_league(id)?;
    Ok(Json(state.player_service.players_by_league(id)))
}

pub async fn get_league_games(
    State(state): State<AppState>,
    Path(id): Path<LeagueId>,
) -> ServiceResult<Json<Vec<Game>>> {
    Ok(Json(state.game_service.games_by_league(id)?))
}

pub async fn get_league_chat(
    State(state): State<AppState>,
    Path(id): Path<LeagueId>,
) -> ServiceResult<Json<Vec<ChatMessageView>>> {
    Ok(Json(state.chat_service.history(id)?))
}
