use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    ServiceError, ServiceResult,
    app::{ArcLeagueRepository, ArcTeamRepository},
    league::{DEFAULT_SALARY_CAP, LeagueId},
    persistence::{
        leagues::LeagueRepository,
        teams::{NewTeam, TeamRepository},
    },
    user::UserId,
};

pub type TeamId = i64;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Pro,
    Farm,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub league_id: LeagueId,
    pub city: String,
    pub name: String,
    pub gm_id: Option<UserId>,
    pub tier: Tier,
    pub wins: i32,
    pub losses: i32,
    pub overtime_losses: i32,
    pub goals_for: i32,
    pub goals_against: i32,
    pub budget: f64,
}

impl Team {
    /// Standings credit: two points per win, one per overtime loss.
    pub fn points(&self) -> i32 {
        self.wins * 2 + self.overtime_losses
    }

    pub fn games_played(&self) -> i32 {
        self.wins + self.losses + self.overtime_losses
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeam {
    pub city: String,
    pub name: String,
    #[serde(default)]
    pub gm_id: Option<UserId>,
    #[serde(default)]
    pub tier: Tier,
    #[serde(default)]
    pub budget: Option<f64>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsRow {
    #[serde(flatten)]
    pub team: Team,
    pub points: i32,
    pub games_played: i32,
    pub goal_differential: i32,
}

pub trait TeamService {
    fn fetch_team(&self, id: TeamId) -> ServiceResult<Team>;
    fn teams_by_league(&self, league_id: LeagueId) -> ServiceResult<Vec<Team>>;
    fn teams_by_gm(&self, gm_id: UserId) -> Vec<Team>;
    fn create_team(
        &self,
        acting_user_id: UserId,
        league_id: LeagueId,
        payload: CreateTeam,
    ) -> ServiceResult<Team>;
    fn standings(&self, league_id: LeagueId) -> ServiceResult<Vec<StandingsRow>>;
}

pub struct TeamServiceImpl {
    league_repository: ArcLeagueRepository,
    team_repository: ArcTeamRepository,
}

impl TeamServiceImpl {
    pub fn new(league_repository: ArcLeagueRepository, team_repository: ArcTeamRepository) -> Self {
        Self {
            league_repository,
            team_repository,
        }
    }
}

impl TeamService for TeamServiceImpl {
    fn fetch_team(&self, id: TeamId) -> ServiceResult<Team> {
        match self.team_repository.get_team(id) {
            Some(team) => Ok(team),
            None => ServiceError::not_found("Team not found"),
        }
    }

    fn teams_by_league(&self, league_id: LeagueId) -> ServiceResult<Vec<Team>> {
        if self.league_repository.get_league(league_id).is_none() {
            return ServiceError::not_found("League not found");
        }
        Ok(self.team_repository.get_teams_by_league(league_id))
    }

    fn teams_by_gm(&self, gm_id: UserId) -> Vec<Team> {
        self.team_repository.get_teams_by_gm(gm_id)
    }

    fn create_team(
        &self,
        acting_user_id: UserId,
        league_id: LeagueId,
        payload: CreateTeam,
    ) -> ServiceResult<Team> {
        let Some(league) = self.league_repository.get_league(league_id) else {
            return ServiceError::not_found("League not found");
        };
        if league.commissioner_id != acting_user_id {
            return ServiceError::forbidden("Only the league commissioner can add teams");
        }
        if payload.city.trim().is_empty() || payload.name.trim().is_empty() {
            return ServiceError::bad_request("Team city and name must not be empty");
        }
        let team = self.team_repository.create_team(NewTeam {
            league_id,
            city: payload.city.trim().to_string(),
            name: payload.name.trim().to_string(),
            gm_id: payload.gm_id,
            tier: payload.tier,
            wins: 0,
            losses: 0,
            overtime_losses: 0,
            goals_for: 0,
            goals_against: 0,
            budget: payload.budget.unwrap_or(DEFAULT_SALARY_CAP),
        });
        info!(
            "Team {} ({} {}) added to league {}",
            team.id, team.city, team.name, league_id
        );
        Ok(team)
    }

    fn standings(&self, league_id: LeagueId) -> ServiceResult<Vec<StandingsRow>> {
        let teams = self.teams_by_league(league_id)?;
        let mut rows: Vec<StandingsRow> = teams
            .into_iter()
            .map(|team| StandingsRow {
                points: team.points(),
                games_played: team.games_played(),
                goal_differential: team.goals_for - team.goals_against,
                team,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then(b.goal_differential.cmp(&a.goal_differential))
        });
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::persistence::{
        leagues::{LeagueRepositoryImpl, NewLeague},
        teams::{TeamRepositoryImpl, TeamUpdate},
    };

    fn service_with_league() -> (TeamServiceImpl, LeagueId, UserId) {
        let leagues = LeagueRepositoryImpl::new();
        let commissioner_id = 1;
        let league = leagues.create_league(NewLeague {
            name: "Elite Hockey League".into(),
            commissioner_id,
            current_season: 1,
            current_day: 1,
            salary_cap: DEFAULT_SALARY_CAP,
            is_active: true,
        });
        let service = TeamServiceImpl::new(
            Arc::new(Box::new(leagues)),
            Arc::new(Box::new(TeamRepositoryImpl::new())),
        );
        (service, league.id, commissioner_id)
    }

    fn add_team(
        service: &TeamServiceImpl,
        league_id: LeagueId,
        commissioner_id: UserId,
        city: &str,
        name: &str,
        record: (i32, i32, i32, i32, i32),
    ) -> Team {
        let team = service
            .create_team(
                commissioner_id,
                league_id,
                CreateTeam {
                    city: city.into(),
                    name: name.into(),
                    gm_id: None,
                    tier: Tier::Pro,
                    budget: None,
                },
            )
            .unwrap();
        let (wins, losses, overtime_losses, goals_for, goals_against) = record;
        service
            .team_repository
            .update_team(
                team.id,
                &TeamUpdate {
                    wins: Some(wins),
                    losses: Some(losses),
                    overtime_losses: Some(overtime_losses),
                    goals_for: Some(goals_for),
                    goals_against: Some(goals_against),
                    ..Default::default()
                },
            )
            .unwrap()
    }

    #[test]
    fn test_standings_sorted_by_points() {
        let (service, league_id, commissioner_id) = service_with_league();
        add_team(&service, league_id, commissioner_id, "Boston", "Bears", (18, 12, 2, 104, 89));
        add_team(&service, league_id, commissioner_id, "Montreal", "Hawks", (17, 13, 2, 98, 92));
        add_team(&service, league_id, commissioner_id, "Toronto", "Eagles", (16, 12, 3, 94, 88));

        let rows = service.standings(league_id).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].team.name, "Bears");
        assert_eq!(rows[0].points, 38);
        assert_eq!(rows[1].team.name, "Hawks");
        assert_eq!(rows[2].team.name, "Eagles");
        assert_eq!(rows[2].games_played, 31);
    }

    #[test]
    fn test_only_commissioner_adds_teams() {
        let (service, league_id, _) = service_with_league();
        let payload = CreateTeam {
            city: "Chicago".into(),
            name: "Storm".into(),
            gm_id: None,
            tier: Tier::Pro,
            budget: None,
        };
        assert!(matches!(
            service.create_team(99, league_id, payload),
            Err(ServiceError::Forbidden(..))
        ));
    }

    #[test]
    fn test_teams_by_unknown_league() {
        let (service, _, _) = service_with_league();
        assert!(matches!(
            service.teams_by_league(42),
            Err(ServiceError::NotFound(..))
        ));
    }
}
