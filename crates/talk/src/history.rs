//! Recent analyses list and dashboard statistics.

use crate::card::Card;

/// Newest-first list of the user's cards, capped at `limit`.
#[derive(Debug, Clone)]
pub struct RecentCards {
    cards: Vec<Card>,
    limit: usize,
}

impl RecentCards {
    pub fn new(limit: usize) -> Self {
        Self {
            cards: Vec::new(),
            limit,
        }
    }

    /// Replace the list with cards loaded from the card API.
    pub fn replace(&mut self, cards: Vec<Card>) {
        self.cards = cards;
        self.cards.truncate(self.limit);
    }

    /// Put a freshly created card at the top.
    pub fn push_front(&mut self, card: Card) {
        self.cards.insert(0, card);
        self.cards.truncate(self.limit);
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Totals shown on the dashboard header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: usize,
    /// Mean rating rounded to the nearest integer, 0 without cards
    pub average_rating: i64,
}

impl DashboardStats {
    pub fn from_cards(cards: &[Card]) -> Self {
        if cards.is_empty() {
            return Self {
                total: 0,
                average_rating: 0,
            };
        }
        let sum: f64 = cards.iter().map(|c| c.rating).sum();
        Self {
            total: cards.len(),
            average_rating: (sum / cards.len() as f64).round() as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn card(rating: f64) -> Card {
        Card::from_value(&json!({ "rating": rating })).unwrap()
    }

    #[test]
    fn test_push_front_keeps_newest_three() {
        let mut recent = RecentCards::new(3);
        recent.replace(vec![card(1.0), card(2.0), card(3.0)]);
        recent.push_front(card(4.0));

        let ratings: Vec<f64> = recent.cards().iter().map(|c| c.rating).collect();
        assert_eq!(ratings, vec![4.0, 1.0, 2.0]);
    }

    #[test]
    fn test_replace_truncates() {
        let mut recent = RecentCards::new(2);
        recent.replace(vec![card(1.0), card(2.0), card(3.0)]);
        assert_eq!(recent.cards().len(), 2);
    }

    #[test]
    fn test_stats_round_average() {
        let stats = DashboardStats::from_cards(&[card(70.0), card(75.0)]);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.average_rating, 73);
    }

    #[test]
    fn test_stats_empty() {
        let stats = DashboardStats::from_cards(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.average_rating, 0);
    }
}
