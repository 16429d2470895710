use chrono::Utc;
use dashmap::DashMap;

use crate::{
    league::{League, LeagueId},
    persistence::IdSequence,
    user::UserId,
};

#[derive(Clone, Debug)]
pub struct NewLeague {
    pub name: String,
    pub commissioner_id: UserId,
    pub current_season: i32,
    pub current_day: i32,
    pub salary_cap: f64,
    pub is_active: bool,
}

pub trait LeagueRepository {
    fn get_league(&self, id: LeagueId) -> Option<League>;
    fn get_leagues_by_commissioner(&self, commissioner_id: UserId) -> Vec<League>;
    fn create_league(&self, new_league: NewLeague) -> League;
}

pub struct LeagueRepositoryImpl {
    leagues: DashMap<LeagueId, League>,
    ids: IdSequence,
}

impl LeagueRepositoryImpl {
    pub fn new() -> Self {
        Self {
            leagues: DashMap::new(),
            ids: IdSequence::new(),
        }
    }
}

impl LeagueRepository for LeagueRepositoryImpl {
    fn get_league(&self, id: LeagueId) -> Option<League> {
        self.leagues.get(&id).map(|entry| entry.value().clone())
    }

    fn get_leagues_by_commissioner(&self, commissioner_id: UserId) -> Vec<League> {
        let mut leagues: Vec<League> = self
            .leagues
            .iter()
            .filter(|entry| entry.value().commissioner_id == commissioner_id)
            .map(|entry| entry.value().clone())
            .collect();
        leagues.sort_by_key(|league| league.id);
        leagues
    }

    fn create_league(&self, new_league: NewLeague) -> League {
        let league = League {
            id: self.ids.next(),
            name: new_league.name,
            commissioner_id: new_league.commissioner_id,
            current_season: new_league.current_season,
            current_day: new_league.current_day,
            salary_cap: new_league.salary_cap,
            is_active: new_league.is_active,
            created_at: Utc::now(),
        };
        self.leagues.insert(league.id, league.clone());
        league
    }
}
