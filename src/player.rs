use serde::{Deserialize, Serialize};

use crate::{
    ServiceError, ServiceResult,
    app::{ArcPlayerRepository, ArcTeamRepository},
    league::LeagueId,
    persistence::{players::PlayerRepository, teams::TeamRepository},
    team::TeamId,
};

pub type PlayerId = i64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    C,
    LW,
    RW,
    D,
    G,
}

/// Skater/goalie attribute ratings on the usual 0-99 scale.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Ratings {
    pub overall: i32,
    pub skating: i32,
    pub shooting: i32,
    pub hands: i32,
    pub checking: i32,
    pub defense: i32,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub league_id: LeagueId,
    pub team_id: Option<TeamId>,
    pub first_name: String,
    pub last_name: String,
    pub position: Position,
    pub age: i32,
    pub jersey_number: Option<i32>,
    pub nationality: String,
    #[serde(flatten)]
    pub ratings: Ratings,
    pub salary: f64,
    pub contract_length: i32,
    pub goals: i32,
    pub assists: i32,
    pub points: i32,
}

pub trait PlayerService {
    fn fetch_player(&self, id: PlayerId) -> ServiceResult<Player>;
    fn players_by_team(&self, team_id: TeamId) -> ServiceResult<Vec<Player>>;
    fn players_by_league(&self, league_id: LeagueId) -> Vec<Player>;
}

pub struct PlayerServiceImpl {
    team_repository: ArcTeamRepository,
    player_repository: ArcPlayerRepository,
}

impl PlayerServiceImpl {
    pub fn new(team_repository: ArcTeamRepository, player_repository: ArcPlayerRepository) -> Self {
        Self {
            team_repository,
            player_repository,
        }
    }
}

impl PlayerService for PlayerServiceImpl {
    fn fetch_player(&self, id: PlayerId) -> ServiceResult<Player> {
        match self.player_repository.get_player(id) {
            Some(player) => Ok(player),
            None => ServiceError::not_found("Player not found"),
        }
    }

    fn players_by_team(&self, team_id: TeamId) -> ServiceResult<Vec<Player>> {
        if self.team_repository.get_team(team_id).is_none() {
            return ServiceError::not_found("Team not found");
        }
        Ok(self.player_repository.get_players_by_team(team_id))
    }

    fn players_by_league(&self, league_id: LeagueId) -> Vec<Player> {
        self.player_repository.get_players_by_league(league_id)
    }
}
