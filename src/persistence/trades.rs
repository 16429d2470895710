use chrono::Utc;
use dashmap::DashMap;

use crate::{
    league::LeagueId,
    persistence::IdSequence,
    team::TeamId,
    trade::{TradeOffer, TradeOfferId, TradeStatus},
};

#[derive(Clone, Debug)]
pub struct NewTradeOffer {
    pub league_id: LeagueId,
    pub from_team_id: TeamId,
    pub to_team_id: TeamId,
    pub offer_details: String,
    pub status: TradeStatus,
}

#[derive(Clone, Debug, Default)]
pub struct TradeOfferUpdate {
    pub status: Option<TradeStatus>,
}

pub trait TradeOfferRepository {
    fn get_offer(&self, id: TradeOfferId) -> Option<TradeOffer>;
    /// Offers where the team appears on either side.
    fn get_offers_by_team(&self, team_id: TeamId) -> Vec<TradeOffer>;
    fn create_offer(&self, new_offer: NewTradeOffer) -> TradeOffer;
    fn update_offer(&self, id: TradeOfferId, update: &TradeOfferUpdate) -> Option<TradeOffer>;
}

pub struct TradeOfferRepositoryImpl {
    offers: DashMap<TradeOfferId, TradeOffer>,
    ids: IdSequence,
}

impl TradeOfferRepositoryImpl {
    pub fn new() -> Self {
        Self {
            offers: DashMap::new(),
            ids: IdSequence::new(),
        }
    }
}

impl TradeOfferRepository for TradeOfferRepositoryImpl {
    fn get_offer(&self, id: TradeOfferId) -> Option<TradeOffer> {
        self.offers.get(&id).map(|entry| entry.value().clone())
    }

    fn get_offers_by_team(&self, team_id: TeamId) -> Vec<TradeOffer> {
        let mut offers: Vec<TradeOffer> = self
            .offers
            .iter()
            .filter(|entry| {
                let offer = entry.value();
                offer.from_team_id == team_id || offer.to_team_id == team_id
            })
            .map(|entry| entry.value().clone())
            .collect();
        offers.sort_by_key(|offer| offer.id);
        offers
    }

    fn create_offer(&self, new_offer: NewTradeOffer) -> TradeOffer {
        let offer = TradeOffer {
            id: self.ids.next(),
            league_id: new_offer.league_id,
            from_team_id: new_offer.from_team_id,
            to_team_id: new_offer.to_team_id,
            offer_details: new_offer.offer_details,
            status: new_offer.status,
            created_at: Utc::now(),
        };
        self.offers.insert(offer.id, offer.clone());
        offer
    }

    fn update_offer(&self, id: TradeOfferId, update: &TradeOfferUpdate) -> Option<TradeOffer> {
        let mut entry = self.offers.get_mut(&id)?;
        let offer = entry.value_mut();
        if let Some(status) = update.status {
            offer.status = status;
        }
        Some(offer.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_offer(from_team_id: TeamId, to_team_id: TeamId) -> NewTradeOffer {
        NewTradeOffer {
            league_id: 1,
            from_team_id,
            to_team_id,
            offer_details: "{}".to_string(),
            status: TradeStatus::Pending,
        }
    }

    #[test]
    fn test_offers_visible_from_both_sides() {
        let repo = TradeOfferRepositoryImpl::new();
        let offer = repo.create_offer(new_offer(1, 2));
        repo.create_offer(new_offer(3, 4));

        assert_eq!(repo.get_offers_by_team(1).len(), 1);
        assert_eq!(repo.get_offers_by_team(2).len(), 1);
        assert!(repo.get_offers_by_team(5).is_empty());

        let updated = repo
            .update_offer(
                offer.id,
                &TradeOfferUpdate {
                    status: Some(TradeStatus::Accepted),
                },
            )
            .unwrap();
        assert_eq!(updated.status, TradeStatus::Accepted);
        assert!(repo.update_offer(999, &TradeOfferUpdate::default()).is_none());
    }
}
