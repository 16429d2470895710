use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::{
    game::{Game, GameId},
    league::LeagueId,
    persistence::IdSequence,
    team::TeamId,
};

#[derive(Clone, Debug)]
pub struct NewGame {
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

#[derive(Clone, Debug, Default)]
pub struct GameUpdate {
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub period: Option<i32>,
    pub time_remaining: Option<String>,
    pub is_finished: Option<bool>,
    pub play_by_play: Option<Vec<String>>,
}

pub trait GameRepository {
    fn get_game(&self, id: GameId) -> Option<Game>;
    fn get_games_by_league(&self, league_id: LeagueId) -> Vec<Game>;
    fn create_game(&self, new_game: NewGame) -> Game;
    fn update_game(&self, id: GameId, update: &GameUpdate) -> Option<Game>;
}

pub struct GameRepositoryImpl {
    games: DashMap<GameId, Game>,
    ids: IdSequence,
}

impl GameRepositoryImpl {
    pub fn new() -> Self {
        Self {
            games: DashMap::new(),
            ids: IdSequence::new(),
        }
    }
}

impl GameRepository for GameRepositoryImpl {
    fn get_game(&self, id: GameId) -> Option<Game> {
        self.games.get(&id).map(|entry| entry.value().clone())
    }

    fn get_games_by_league(&self, league_id: LeagueId) -> Vec<Game> {
        let mut games: Vec<Game> = self
            .games
            .iter()
            .filter(|entry| entry.value().league_id == league_id)
            .map(|entry| entry.value().clone())
            .collect();
        games.sort_by_key(|game| game.id);
        games
    }

    fn create_game(&self, new_game: NewGame) -> Game {
        let game = Game {
            id: self.ids.next(),
            league_id: new_game.league_id,
            home_team_id: new_game.home_team_id,
            away_team_id: new_game.away_team_id,
            home_score: new_game.home_score,
            away_score: new_game.away_score,
            period: new_game.period,
            time_remaining: new_game.time_remaining,
            is_finished: new_game.is_finished,
            scheduled_date: new_game.scheduled_date,
            play_by_play: new_game.play_by_play,
        };
        self.games.insert(game.id, game.clone());
        game
    }

    fn update_game(&self, id: GameId, update: &GameUpdate) -> Option<Game> {
        let mut entry = self.games.get_mut(&id)?;
        let game = entry.value_mut();
        if let Some(home_score) = update.home_score {
            game.home_score = home_score;
        }
        if let Some(away_score) = update.away_score {
            game.away_score = away_score;
        }
        if let Some(period) = update.period {
            game.period = period;
        }
        if let Some(time_remaining) = &update.time_remaining {
            game.time_remaining = time_remaining.clone();
        }
        if let Some(is_finished) = update.is_finished {
            game.is_finished = is_finished;
        }
        if let Some(play_by_play) = &update.play_by_play {
            game.play_by_play = play_by_play.clone();
        }
        Some(game.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_game(league_id: LeagueId) -> NewGame {
        NewGame {
            league_id,
            home_team_id: 1,
            away_team_id: 2,
            home_score: 0,
            away_score: 0,
            period: 1,
            time_remaining: "20:00".to_string(),
            is_finished: false,
            scheduled_date: Utc::now(),
            play_by_play: Vec::new(),
        }
    }

    #[test]
    fn test_league_lookup_and_update() {
        let repo = GameRepositoryImpl::new();
        let game = repo.create_game(new_game(1));
        repo.create_game(new_game(2));

        assert_eq!(repo.get_games_by_league(1).len(), 1);

        let updated = repo
            .update_game(
                game.id,
                &GameUpdate {
                    home_score: Some(4),
                    away_score: Some(2),
                    period: Some(3),
                    time_remaining: Some("00:00".to_string()),
                    is_finished: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(updated.is_finished);
        assert_eq!((updated.home_score, updated.away_score), (4, 2));

        assert!(repo.update_game(999, &GameUpdate::default()).is_none());
    }
}
