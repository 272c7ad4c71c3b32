use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank, Suit};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::HighCard => "high card",
            Category::OnePair => "one pair",
            Category::TwoPair => "two pair",
            Category::ThreeOfAKind => "three of a kind",
            Category::Straight => "straight",
            Category::Flush => "flush",
            Category::FullHouse => "full house",
            Category::FourOfAKind => "four of a kind",
            Category::StraightFlush => "straight flush",
        };
        f.write_str(name)
    }
}

/// Totally ordered strength of a five-card hand: the category followed by
/// kicker ranks in descending tie-break priority. Equality follows
/// [`compare_score`], so trailing zero kickers do not make scores differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Score {
    pub category: Category,
    pub kickers: Vec<u8>,
}

impl Score {
    /// Flat form `[category, kickers...]` used for lexicographic comparison.
    pub fn values(&self) -> Vec<u8> {
        let mut v = Vec::with_capacity(self.kickers.len() + 1);
        v.push(self.category as u8);
        v.extend_from_slice(&self.kickers);
        v
    }
}

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        compare_score(self, other).is_eq()
    }
}

impl Eq for Score {}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_score(self, other)
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The strongest five-card subset found among a larger set of cards.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct BestHand {
    pub cards: [Card; 5],
    pub score: Score,
}

/// Lexicographic comparison over category then kickers; the shorter side is
/// padded with zeros.
pub fn compare_score(a: &Score, b: &Score) -> Ordering {
    let (a, b) = (a.values(), b.values());
    let len = a.len().max(b.len());
    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        match x.cmp(&y) {
            Ordering::Equal => continue,
            ord => return ord,
        }
    }
    Ordering::Equal
}

pub fn score_five(cards: &[Card; 5]) -> Score {
    let mut ranks: Vec<u8> = cards.iter().map(|c| c.rank.value()).collect();
    ranks.sort_unstable_by(|a, b| b.cmp(a));

    let mut rank_counts = [0u8; 15];
    let mut suit_counts = [0u8; 4];
    for c in cards {
        rank_counts[c.rank.value() as usize] += 1;
        suit_counts[suit_index(c.suit)] += 1;
    }
    let is_flush = suit_counts.iter().any(|&n| n == 5);
    let straight = straight_high(&ranks);

    // (count, rank) ordered by count then rank, both descending
    let mut groups: Vec<(u8, u8)> = (2..=14u8)
        .rev()
        .filter(|&r| rank_counts[r as usize] > 0)
        .map(|r| (rank_counts[r as usize], r))
        .collect();
    groups.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));
    let group_ranks = |skip: usize| groups.iter().skip(skip).map(|g| g.1);

    let (category, kickers) = match (is_flush, straight, groups[0].0, groups.get(1).map(|g| g.0)) {
        (true, Some(high), _, _) => (Category::StraightFlush, vec![high]),
        (_, _, 4, _) => (Category::FourOfAKind, group_ranks(0).collect()),
        (_, _, 3, Some(2)) => (Category::FullHouse, group_ranks(0).collect()),
        (true, None, _, _) => (Category::Flush, ranks),
        (false, Some(high), _, _) => (Category::Straight, vec![high]),
        (_, _, 3, _) => (Category::ThreeOfAKind, group_ranks(0).collect()),
        (_, _, 2, Some(2)) => (Category::TwoPair, group_ranks(0).collect()),
        (_, _, 2, _) => (Category::OnePair, group_ranks(0).collect()),
        _ => (Category::HighCard, ranks),
    };
    Score { category, kickers }
}

/// Enumerates every five-card subset in index order and keeps the first one
/// with the maximal score. Returns `None` for fewer than five cards.
pub fn best_hand(cards: &[Card]) -> Option<BestHand> {
    let n = cards.len();
    if n < 5 {
        return None;
    }
    let mut best: Option<BestHand> = None;
    for a in 0..n {
        for b in a + 1..n {
            for c in b + 1..n {
                for d in c + 1..n {
                    for e in d + 1..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let score = score_five(&five);
                        let better = match &best {
                            Some(current) => compare_score(&score, &current.score).is_gt(),
                            None => true,
                        };
                        if better {
                            best = Some(BestHand { cards: five, score });
                        }
                    }
                }
            }
        }
    }
    best
}

fn suit_index(s: Suit) -> usize {
    match s {
        Suit::Spades => 0,
        Suit::Hearts => 1,
        Suit::Diamonds => 2,
        Suit::Clubs => 3,
    }
}

// Expects ranks sorted descending. Ace-low wheel reports 5 as its high card.
fn straight_high(sorted_desc: &[u8]) -> Option<u8> {
    let distinct = sorted_desc.windows(2).all(|w| w[0] != w[1]);
    if !distinct || sorted_desc.len() != 5 {
        return None;
    }
    if sorted_desc == [Rank::Ace.value(), 5, 4, 3, 2] {
        return Some(5);
    }
    if sorted_desc[0] - sorted_desc[4] == 4 {
        Some(sorted_desc[0])
    } else {
        None
    }
}
