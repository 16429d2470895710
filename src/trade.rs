use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    ServiceError, ServiceResult,
    app::{ArcTeamRepository, ArcTradeOfferRepository},
    league::LeagueId,
    persistence::{
        teams::TeamRepository,
        trades::{NewTradeOffer, TradeOfferRepository, TradeOfferUpdate},
    },
    team::{Team, TeamId},
    user::{User, UserRole},
};

pub type TradeOfferId = i64;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeOffer {
    pub id: TradeOfferId,
    pub league_id: LeagueId,
    pub from_team_id: TeamId,
    pub to_team_id: TeamId,
    /// Opaque JSON blob describing the offered players/picks; the server
    /// stores and relays it without interpreting it.
    pub offer_details: String,
    pub status: TradeStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTradeOffer {
    pub league_id: LeagueId,
    pub from_team_id: TeamId,
    pub to_team_id: TeamId,
    pub offer_details: String,
}

pub trait TradeService {
    fn create_offer(&self, acting: &User, offer: CreateTradeOffer) -> ServiceResult<TradeOffer>;
    fn offers_by_team(&self, team_id: TeamId) -> ServiceResult<Vec<TradeOffer>>;
    fn respond(
        &self,
        acting: &User,
        offer_id: TradeOfferId,
        accept: bool,
    ) -> ServiceResult<TradeOffer>;
}

pub struct TradeServiceImpl {
    team_repository: ArcTeamRepository,
    trade_repository: ArcTradeOfferRepository,
}

impl TradeServiceImpl {
    pub fn new(team_repository: ArcTeamRepository, trade_repository: ArcTradeOfferRepository) -> Self {
        Self {
            team_repository,
            trade_repository,
        }
    }

    fn fetch_team(&self, team_id: TeamId) -> ServiceResult<Team> {
        match self.team_repository.get_team(team_id) {
            Some(team) => Ok(team),
            None => ServiceError::not_found("Team not found"),
        }
    }

    fn can_act_for(acting: &User, team: &Team) -> bool {
        acting.role == UserRole::Commissioner || team.gm_id == Some(acting.id)
    }
}

impl TradeService for TradeServiceImpl {
    fn create_offer(&self, acting: &User, offer: CreateTradeOffer) -> ServiceResult<TradeOffer> {
        if offer.from_team_id == offer.to_team_id {
            return ServiceError::bad_request("A team cannot trade with itself");
        }
        let from_team = self.fetch_team(offer.from_team_id)?;
        let to_team = self.fetch_team(offer.to_team_id)?;
        if from_team.league_id != offer.league_id || to_team.league_id != offer.league_id {
            return ServiceError::bad_request("Both teams must belong to the offer's league");
        }
        if !Self::can_act_for(acting, &from_team) {
            return ServiceError::forbidden("You do not manage the offering team");
        }
        let offer = self.trade_repository.create_offer(NewTradeOffer {
            league_id: offer.league_id,
            from_team_id: offer.from_team_id,
            to_team_id: offer.to_team_id,
            offer_details: offer.offer_details,
            status: TradeStatus::Pending,
        });
        info!(
            "Trade offer {} created: team {} -> team {}",
            offer.id, offer.from_team_id, offer.to_team_id
        );
        Ok(offer)
    }

    fn offers_by_team(&self, team_id: TeamId) -> ServiceResult<Vec<TradeOffer>> {
        self.fetch_team(team_id)?;
        Ok(self.trade_repository.get_offers_by_team(team_id))
    }

    fn respond(
        &self,
        acting: &User,
        offer_id: TradeOfferId,
        accept: bool,
    ) -> ServiceResult<TradeOffer> {
        let Some(offer) = self.trade_repository.get_offer(offer_id) else {
            return ServiceError::not_found("Trade offer not found");
        };
        if offer.status != TradeStatus::Pending {
            return ServiceError::bad_request("Trade offer has already been resolved");
        }
        let to_team = self.fetch_team(offer.to_team_id)?;
        if !Self::can_act_for(acting, &to_team) {
            return ServiceError::forbidden("You do not manage the receiving team");
        }
        let status = if accept {
            TradeStatus::Accepted
        } else {
            TradeStatus::Rejected
        };
        let updated = self
            .trade_repository
            .update_offer(
                offer_id,
                &TradeOfferUpdate {
                    status: Some(status),
                },
            )
            .ok_or_else(|| ServiceError::NotFound("Trade offer not found".to_string()))?;
        info!("Trade offer {} {:?}", offer_id, updated.status);
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        league::DEFAULT_SALARY_CAP,
        persistence::{
            teams::{NewTeam, TeamRepositoryImpl},
            trades::TradeOfferRepositoryImpl,
        },
        team::Tier,
    };

    fn user(id: i64, role: UserRole) -> User {
        User {
            id,
            username: format!("user{}", id),
            password_hash: "".into(),
            role,
            email: format!("user{}@example.com", id),
            created_at: Utc::now(),
        }
    }

    fn service() -> (TradeServiceImpl, Team, Team) {
        let teams = TeamRepositoryImpl::new();
        let from_team = teams.create_team(NewTeam {
            league_id: 1,
            city: "Boston".into(),
            name: "Bears".into(),
            gm_id: Some(10),
            tier: Tier::Pro,
            wins: 0,
            losses: 0,
            overtime_losses: 0,
            goals_for: 0,
            goals_against: 0,
            budget: DEFAULT_SALARY_CAP,
        });
        let to_team = teams.create_team(NewTeam {
            league_id: 1,
            city: "Montreal".into(),
            name: "Hawks".into(),
            gm_id: Some(11),
            tier: Tier::Pro,
            wins: 0,
            losses: 0,
            overtime_losses: 0,
            goals_for: 0,
            goals_against: 0,
            budget: DEFAULT_SALARY_CAP,
        });
        let service = TradeServiceImpl::new(
            Arc::new(Box::new(teams)),
            Arc::new(Box::new(TradeOfferRepositoryImpl::new())),
        );
        (service, from_team, to_team)
    }

    fn draft_offer(from_team: &Team, to_team: &Team) -> CreateTradeOffer {
        CreateTradeOffer {
            league_id: 1,
            from_team_id: from_team.id,
            to_team_id: to_team.id,
            offer_details: r#"{"players":[3],"picks":[]}"#.to_string(),
        }
    }

    #[test]
    fn test_offer_lifecycle() {
        let (service, from_team, to_team) = service();
        let gm_from = user(10, UserRole::Gm);
        let gm_to = user(11, UserRole::Gm);

        let offer = service
            .create_offer(&gm_from, draft_offer(&from_team, &to_team))
            .unwrap();
        assert_eq!(offer.status, TradeStatus::Pending);

        let listed = service.offers_by_team(to_team.id).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, offer.id);

        let resolved = service.respond(&gm_to, offer.id, true).unwrap();
        assert_eq!(resolved.status, TradeStatus::Accepted);

        // A resolved offer cannot be answered again.
        assert!(matches!(
            service.respond(&gm_to, offer.id, false),
            Err(ServiceError::BadRequest(..))
        ));
    }

    #[test]
    fn test_only_involved_gms_can_act() {
        let (service, from_team, to_team) = service();
        let outsider = user(99, UserRole::Gm);
        let gm_from = user(10, UserRole::Gm);

        assert!(matches!(
            service.create_offer(&outsider, draft_offer(&from_team, &to_team)),
            Err(ServiceError::Forbidden(..))
        ));

        let offer = service
            .create_offer(&gm_from, draft_offer(&from_team, &to_team))
            .unwrap();
        assert!(matches!(
            service.respond(&gm_from, offer.id, true),
            Err(ServiceError::Forbidden(..))
        ));
    }

    #[test]
    fn test_commissioner_can_act_for_any_team() {
        let (service, from_team, to_team) = service();
        let commissioner = user(1, UserRole::Commissioner);

        let offer = service
            .create_offer(&commissioner, draft_offer(&from_team, &to_team))
            .unwrap();
        let resolved = service.respond(&commissioner, offer.id, false).unwrap();
        assert_eq!(resolved.status, TradeStatus::Rejected);
    }
}
