use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;

use crate::{
    ServiceError, ServiceResult,
    app::{ArcLeagueRepository, ArcUserRepository},
    persistence::{
        leagues::{LeagueRepository, NewLeague},
        users::UserRepository,
    },
    user::{UserId, UserRole},
};

pub type LeagueId = i64;

pub const DEFAULT_SALARY_CAP: f64 = 80_000_000.0;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct League {
    pub id: LeagueId,
    pub name: String,
    pub commissioner_id: UserId,
    pub current_season: i32,
    pub current_day: i32,
    pub salary_cap: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

pub trait LeagueService {
    fn create_league(
        &self,
        commissioner_id: UserId,
        name: &str,
        salary_cap: Option<f64>,
    ) -> ServiceResult<League>;
    fn fetch_league(&self, id: LeagueId) -> ServiceResult<League>;
    fn leagues_by_commissioner(&self, commissioner_id: UserId) -> Vec<League>;
}

pub struct LeagueServiceImpl {
    user_repository: ArcUserRepository,
    league_repository: ArcLeagueRepository,
}

impl LeagueServiceImpl {
    pub fn new(user_repository: ArcUserRepository, league_repository: ArcLeagueRepository) -> Self {
        Self {
            user_repository,
            league_repository,
        }
    }
}

impl LeagueService for LeagueServiceImpl {
    fn create_league(
        &self,
        commissioner_id: UserId,
        name: &str,
        salary_cap: Option<f64>,
    ) -> ServiceResult<League> {
        let Some(user) = self.user_repository.get_user(commissioner_id) else {
            return ServiceError::not_found("User not found");
        };
        if user.role != UserRole::Commissioner {
            return ServiceError::forbidden("Only commissioners can create leagues");
        }
        if name.trim().is_empty() {
            return ServiceError::bad_request("League name must not be empty");
        }
        let league = self.league_repository.create_league(NewLeague {
            name: name.trim().to_string(),
            commissioner_id,
            current_season: 1,
            current_day: 1,
            salary_cap: salary_cap.unwrap_or(DEFAULT_SALARY_CAP),
            is_active: true,
        });
        info!(
            "League {} ({}) created by commissioner {}",
            league.id, league.name, user.username
        );
        Ok(league)
    }

    fn fetch_league(&self, id: LeagueId) -> ServiceResult<League> {
        match self.league_repository.get_league(id) {
            Some(league) => Ok(league),
            None => ServiceError::not_found("League not found"),
        }
    }

    fn leagues_by_commissioner(&self, commissioner_id: UserId) -> Vec<League> {
        self.league_repository
            .get_leagues_by_commissioner(commissioner_id)
    }
}
