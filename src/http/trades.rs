use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::{
    AppState, ServiceResult,
    jwt::Claims,
    team::TeamId,
    trade::{CreateTradeOffer, TradeOffer, TradeOfferId, TradeService},
    user::UserService,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondPayload {
    pub accept: bool,
}

pub async fn get_team_trades(
    State(state): State<AppState>,
    Path(id): Path<TeamId>,
) -> ServiceResult<Json<Vec<TradeOffer>>> {
    Ok(Json(state.trade_service.offers_by_team(id)?))
}

pub async fn create_trade(
    State(state): State<AppState>,
    claims: Claims,
    Json(payload): Json<CreateTradeOffer>,
) -> ServiceResult<Json<TradeOffer>> {
    let user = state.user_service.fetch_user_by_username(&claims.sub)?;
    Ok(Json(state.trade_service.create_offer(&user, payload)?))
}

pub async fn respond_trade(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<TradeOfferId>,
    Json(payload): Json<RespondPayload>,
) -> ServiceResult<Json<TradeOffer>> {
    let user = state.user_service.fetch_user_by_username(&claims.sub)?;
    Ok(Json(state.trade_service.respond(&user, id, payload.accept)?))
}
