use chrono::{DateTime, Utc};
use log::info;
use rand::Rng;
use serde::Serialize;

use crate::{
    ServiceError, ServiceResult,
    app::{ArcGameRepository, ArcLeagueRepository, ArcTeamRepository},
    league::LeagueId,
    persistence::{
        games::{GameRepository, NewGame},
        leagues::LeagueRepository,
        teams::{TeamRepository, TeamUpdate},
    },
    team::{Team, TeamId},
};

pub type GameId = i64;

const MIN_SCORE: i32 = 1;
const MAX_SCORE: i32 = 6;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: GameId,
    pub league_id: LeagueId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub home_score: i32,
    pub away_score: i32,
    pub period: i32,
    pub time_remaining: String,
    pub is_finished: bool,
    pub scheduled_date: DateTime<Utc>,
    pub play_by_play: Vec<String>,
}

pub trait GameService {
    fn simulate(
        &self,
        league_id: LeagueId,
        home_team_id: TeamId,
        away_team_id: TeamId,
    ) -> ServiceResult<Game>;
    fn fetch_game(&self, id: GameId) -> ServiceResult<Game>;
    fn games_by_league(&self, league_id: LeagueId) -> ServiceResult<Vec<Game>>;
}

pub struct GameServiceImpl {
    league_repository: ArcLeagueRepository,
    team_repository: ArcTeamRepository,
    game_repository: ArcGameRepository,
}

impl GameServiceImpl {
    pub fn new(
        league_repository: ArcLeagueRepository,
        team_repository: ArcTeamRepository,
        game_repository: ArcGameRepository,
    ) -> Self {
        Self {
            league_repository,
            team_repository,
            game_repository,
        }
    }

    fn fetch_league_team(&self, league_id: LeagueId, team_id: TeamId) -> ServiceResult<Team> {
        let Some(team) = self.team_repository.get_team(team_id) else {
            return ServiceError::not_found("Team not found");
        };
        if team.league_id != league_id {
            return ServiceError::bad_request("Team does not belong to this league");
        }
        Ok(team)
    }

    fn apply_result(
        &self,
        team: &Team,
        won: bool,
        overtime: bool,
        goals_for: i32,
        goals_against: i32,
    ) -> ServiceResult<()> {
        let update = TeamUpdate {
            wins: won.then(|| team.wins + 1),
            losses: (!won && !overtime).then(|| team.losses + 1),
            overtime_losses: (!won && overtime).then(|| team.overtime_losses + 1),
            goals_for: Some(team.goals_for + goals_for),
            goals_against: Some(team.goals_against + goals_against),
            ..Default::default()
        };
        match self.team_repository.update_team(team.id, &update) {
            Some(_) => Ok(()),
            None => ServiceError::internal("Team disappeared during settlement"),
        }
    }

    /// Settles a game from a pair of drawn scores. An equal draw goes to
    /// sudden-death overtime: one extra goal to a random side, and the loser
    /// is credited with an overtime loss instead of a regulation loss.
    fn settle_game(
        &self,
        league_id: LeagueId,
        home: &Team,
        away: &Team,
        home_score: i32,
        away_score: i32,
    ) -> ServiceResult<Game> {
        let overtime = home_score == away_score;
        let (home_score, away_score, ot_line) = if overtime {
            let home_wins_ot = rand::random::<bool>();
            let winner = if home_wins_ot { home } else { away };
            let line = format!(
                "Sudden death overtime: {} {} win it",
                winner.city, winner.name
            );
            if home_wins_ot {
                (home_score + 1, away_score, Some(line))
            } else {
                (home_score, away_score + 1, Some(line))
            }
        } else {
            (home_score, away_score, None)
        };

        let mut play_by_play = vec![
            "Game started".to_string(),
            format!("Goal! Home team scores: {}-{}", home_score, away_score),
        ];
        if let Some(line) = ot_line {
            play_by_play.push(line);
        }
        play_by_play.push("Game finished".to_string());

        let game = self.game_repository.create_game(NewGame {
            league_id,
            home_team_id: home.id,
            away_team_id: away.id,
            home_score,
            away_score,
            period: 3,
            time_remaining: "00:00".to_string(),
            is_finished: true,
            scheduled_date: Utc::now(),
            play_by_play,
        });

        let home_won = home_score > away_score;
        self.apply_result(home, home_won, overtime, home_score, away_score)?;
        self.apply_result(away, !home_won, overtime, away_score, home_score)?;

        info!(
            "Game {} settled: {} {} {} - {} {} {}{}",
            game.id,
            home.city,
            home.name,
            home_score,
            away_score,
            away.city,
            away.name,
            if overtime { " (OT)" } else { "" }
        );
        Ok(game)
    }
}

impl GameService for GameServiceImpl {
    fn simulate(
        &self,
        league_id: LeagueId,
        home_team_id: TeamId,
        away_team_id: TeamId,
    ) -> ServiceResult<Game> {
        if self.league_repository.get_league(league_id).is_none() {
            return ServiceError::not_found("League not found");
        }
        if home_team_id == away_team_id {
            return ServiceError::bad_request("A team cannot play against itself");
        }
        let home = self.fetch_league_team(league_id, home_team_id)?;
        let away = self.fetch_league_team(league_id, away_team_id)?;

        let mut rng = rand::rng();
        let home_score = rng.random_range(MIN_SCORE..=MAX_SCORE);
        let away_score = rng.random_range(MIN_SCORE..=MAX_SCORE);

        self.settle_game(league_id, &home, &away, home_score, away_score)
    }

    fn fetch_game(&self, id: GameId) -> ServiceResult<Game> {
        match self.game_repository.get_game(id) {
            Some(game) => Ok(game),
            None => ServiceError::not_found("Game not found"),
        }
    }

    fn games_by_league(&self, league_id: LeagueId) -> ServiceResult<Vec<Game>> {
        if self.league_repository.get_league(league_id).is_none() {
            return ServiceError::not_found("League not found");
        }
        Ok(self.game_repository.get_games_by_league(league_id))
    }
}
