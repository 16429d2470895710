use dashmap::DashMap;

use crate::{
    league::LeagueId,
    persistence::IdSequence,
    team::{Team, TeamId, Tier},
    user::UserId,
};

#[derive(Clone, Debug)]
pub struct NewTeam {
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

/// Field merge for a team update. `gm_id` is doubly optional: the outer
/// level selects the field for merging, the inner one assigns or clears
/// the GM seat.
#[derive(Clone, Debug, Default)]
pub struct TeamUpdate {
    pub city: Option<String>,
    pub name: Option<String>,
    pub gm_id: Option<Option<UserId>>,
    pub tier: Option<Tier>,
    pub wins: Option<i32>,
    pub losses: Option<i32>,
    pub overtime_losses: Option<i32>,
    pub goals_for: Option<i32>,
    pub goals_against: Option<i32>,
    pub budget: Option<f64>,
}

pub trait TeamRepository {
    fn get_team(&self, id: TeamId) -> Option<Team>;
    fn get_teams_by_league(&self, league_id: LeagueId) -> Vec<Team>;
    fn get_teams_by_gm(&self, gm_id: UserId) -> Vec<Team>;
    fn create_team(&self, new_team: NewTeam) -> Team;
    fn update_team(&self, id: TeamId, update: &TeamUpdate) -> Option<Team>;
}

pub struct TeamRepositoryImpl {
    teams: DashMap<TeamId, Team>,
    ids: IdSequence,
}

impl TeamRepositoryImpl {
    pub fn new() -> Self {
        Self {
            teams: DashMap::new(),
            ids: IdSequence::new(),
        }
    }
}

impl TeamRepository for TeamRepositoryImpl {
    fn get_team(&self, id: TeamId) -> Option<Team> {
        self.teams.get(&id).map(|entry| entry.value().clone())
    }

    fn get_teams_by_league(&self, league_id: LeagueId) -> Vec<Team> {
        let mut teams: Vec<Team> = self
            .teams
            .iter()
            .filter(|entry| entry.value().league_id == league_id)
            .map(|entry| entry.value().clone())
            .collect();
        teams.sort_by_key(|team| team.id);
        teams
    }

    fn get_teams_by_gm(&self, gm_id: UserId) -> Vec<Team> {
        let mut teams: Vec<Team> = self
            .teams
            .iter()
            .filter(|entry| entry.value().gm_id == Some(gm_id))
            .map(|entry| entry.value().clone())
            .collect();
        teams.sort_by_key(|team| team.id);
        teams
    }

    fn create_team(&self, new_team: NewTeam) -> Team {
        let team = Team {
            id: self.ids.next(),
            league_id: new_team.league_id,
            city: new_team.city,
            name: new_team.name,
            gm_id: new_team.gm_id,
            tier: new_team.tier,
            wins: new_team.wins,
            losses: new_team.losses,
            overtime_losses: new_team.overtime_losses,
            goals_for: new_team.goals_for,
            goals_against: new_team.goals_against,
            budget: new_team.budget,
        };
        self.teams.insert(team.id, team.clone());
        team
    }

    fn update_team(&self, id: TeamId, update: &TeamUpdate) -> Option<Team> {
        let mut entry = self.teams.get_mut(&id)?;
        let team = entry.value_mut();
        if let Some(city) = &update.city {
            team.city = city.clone();
        }
        if let Some(name) = &update.name {
            team.name = name.clone();
        }
        if let Some(gm_id) = update.gm_id {
            team.gm_id = gm_id;
        }
        if let Some(tier) = update.tier {
            team.tier = tier;
        }
        if let Some(wins) = update.wins {
            team.wins = wins;
        }
        if let Some(losses) = update.losses {
            team.losses = losses;
        }
        if let Some(overtime_losses) = update.overtime_losses {
            team.overtime_losses = overtime_losses;
        }
        if let Some(goals_for) = update.goals_for {
            team.goals_for = goals_for;
        }
        if let Some(goals_against) = update.goals_against {
            team.goals_against = goals_against;
        }
        if let Some(budget) = update.budget {
            team.budget = budget;
        }
        Some(team.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_team(league_id: LeagueId, city: &str, name: &str) -> NewTeam {
        NewTeam {
            league_id,
            city: city.to_string(),
            name: name.to_string(),
            gm_id: None,
            tier: Tier::Pro,
            wins: 0,
            losses: 0,
            overtime_losses: 0,
            goals_for: 0,
            goals_against: 0,
            budget: 80_000_000.0,
        }
    }

    #[test]
    fn test_update_merges_only_given_fields() {
        let repo = TeamRepositoryImpl::new();
        let team = repo.create_team(new_team(1, "Boston", "Bears"));

        let updated = repo
            .update_team(
                team.id,
                &TeamUpdate {
                    wins: Some(3),
                    gm_id: Some(Some(7)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.wins, 3);
        assert_eq!(updated.gm_id, Some(7));
        assert_eq!(updated.city, "Boston");
        assert_eq!(updated.losses, 0);
    }

    #[test]
    fn test_update_missing_team_reports_not_found() {
        let repo = TeamRepositoryImpl::new();
        assert!(repo.update_team(42, &TeamUpdate::default()).is_none());
    }

    #[test]
    fn test_filters_by_league_and_gm() {
        let repo = TeamRepositoryImpl::new();
        repo.create_team(new_team(1, "Boston", "Bears"));
        repo.create_team(new_team(2, "Quebec", "Wolves"));
        let mut with_gm = new_team(1, "Montreal", "Hawks");
        with_gm.gm_id = Some(5);
        repo.create_team(with_gm);

        assert_eq!(repo.get_teams_by_league(1).len(), 2);
        assert_eq!(repo.get_teams_by_league(2).len(), 1);
        let managed = repo.get_teams_by_gm(5);
        assert_eq!(managed.len(), 1);
        assert_eq!(managed[0].name, "Hawks");
    }
}
