use dashmap::DashMap;

use crate::{
    league::LeagueId,
    persistence::IdSequence,
    player::{Player, PlayerId, Position, Ratings},
    team::TeamId,
};

#[derive(Clone, Debug)]
pub struct NewPlayer {
    pub league_id: LeagueId,
    pub team_id: Option<TeamId>,
    pub first_name: String,
    pub last_name: String,
    pub position: Position,
    pub age: i32,
    pub jersey_number: Option<i32>,
    pub nationality: String,
    pub ratings: Ratings,
    pub salary: f64,
    pub contract_length: i32,
    pub goals: i32,
    pub assists: i32,
    pub points: i32,
}

#[derive(Clone, Debug, Default)]
pub struct PlayerUpdate {
    pub team_id: Option<Option<TeamId>>,
    pub salary: Option<f64>,
    pub contract_length: Option<i32>,
    pub goals: Option<i32>,
    pub assists: Option<i32>,
    pub points: Option<i32>,
}

pub trait PlayerRepository {
    fn get_player(&self, id: PlayerId) -> Option<Player>;
    fn get_players_by_team(&self, team_id: TeamId) -> Vec<Player>;
    fn get_players_by_league(&self, league_id: LeagueId) -> Vec<Player>;
    fn create_player(&self, new_player: NewPlayer) -> Player;
    fn update_player(&self, id: PlayerId, update: &PlayerUpdate) -> Option<Player>;
}

pub struct PlayerRepositoryImpl {
    players: DashMap<PlayerId, Player>,
    ids: IdSequence,
}

impl PlayerRepositoryImpl {
    pub fn new() -> Self {
        Self {
            players: DashMap::new(),
            ids: IdSequence::new(),
        }
    }
}

impl PlayerRepository for PlayerRepositoryImpl {
    fn get_player(&self, id: PlayerId) -> Option<Player> {
        self.players.get(&id).map(|entry| entry.value().clone())
    }

    fn get_players_by_team(&self, team_id: TeamId) -> Vec<Player> {
        let mut players: Vec<Player> = self
            .players
            .iter()
            .filter(|entry| entry.value().team_id == Some(team_id))
            .map(|entry| entry.value().clone())
            .collect();
        players.sort_by_key(|player| player.id);
        players
    }

    fn get_players_by_league(&self, league_id: LeagueId) -> Vec<Player> {
        let mut players: Vec<Player> = self
            .players
            .iter()
            .filter(|entry| entry.value().league_id == league_id)
            .map(|entry| entry.value().clone())
            .collect();
        players.sort_by_key(|player| player.id);
        players
    }

    fn create_player(&self, new_player: NewPlayer) -> Player {
        let player = Player {
            id: self.ids.next(),
            league_id: new_player.league_id,
            team_id: new_player.team_id,
            first_name: new_player.first_name,
            last_name: new_player.last_name,
            position: new_player.position,
            age: new_player.age,
            jersey_number: new_player.jersey_number,
            nationality: new_player.nationality,
            ratings: new_player.ratings,
            salary: new_player.salary,
            contract_length: new_player.contract_length,
            goals: new_player.goals,
            assists: new_player.assists,
            points: new_player.points,
        };
        self.players.insert(player.id, player.clone());
        player
    }

    fn update_player(&self, id: PlayerId, update: &PlayerUpdate) -> Option<Player> {
        let mut entry = self.players.get_mut(&id)?;
        let player = entry.value_mut();
        if let Some(team_id) = update.team_id {
            player.team_id = team_id;
        }
        if let Some(salary) = update.salary {
            player.salary = salary;
        }
        if let Some(contract_length) = update.contract_length {
            player.contract_length = contract_length;
        }
        if let Some(goals) = update.goals {
            player.goals = goals;
        }
        if let Some(assists) = update.assists {
            player.assists = assists;
        }
        if let Some(points) = update.points {
            player.points = points;
        }
        Some(player.clone())
    }
}
