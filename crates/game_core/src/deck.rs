use rand::{seq::SliceRandom, Rng};
use shared::domain::{Card, CardKind};

/// Two cards of every kind, in board order for the current round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new(kinds: &[CardKind]) -> Self {
        let cards = kinds
            .iter()
            .chain(kinds.iter())
            .map(|kind| Card::new(*kind))
            .collect();
        Self { cards }
    }

    /// Uniform in-place permutation; every ordering of the deck is reachable.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn kind_at(&self, index: usize) -> Option<CardKind> {
        self.cards.get(index).map(Card::kind)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn kind_counts(deck: &Deck) -> BTreeMap<CardKind, usize> {
        let mut counts = BTreeMap::new();
        for card in deck.cards() {
            *counts.entry(card.kind()).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn holds_two_cards_of_every_kind() {
        let deck = Deck::new(&CardKind::ALL);
        assert_eq!(deck.len(), 20);
        let counts = kind_counts(&deck);
        assert_eq!(counts.len(), 10);
        assert!(counts.values().all(|count| *count == 2));
    }

    #[test]
    fn shuffling_keeps_the_multiset_of_kinds() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut deck = Deck::new(&CardKind::ALL);
        let before = kind_counts(&deck);
        for _ in 0..50 {
            deck.shuffle(&mut rng);
            assert_eq!(kind_counts(&deck), before);
        }
    }

    #[test]
    fn shuffling_reaches_every_ordering_of_a_small_deck() {
        // Two kinds make 4 cards, i.e. 4!/(2!*2!) = 6 distinct kind orders.
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            let mut deck = Deck::new(&[CardKind::Fire, CardKind::Water]);
            deck.shuffle(&mut rng);
            let order: Vec<CardKind> = deck.cards().iter().map(Card::kind).collect();
            seen.insert(order);
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn out_of_range_lookups_are_none() {
        let deck = Deck::new(&[CardKind::Fire]);
        assert_eq!(deck.kind_at(1), Some(CardKind::Fire));
        assert_eq!(deck.kind_at(2), None);
    }
}
