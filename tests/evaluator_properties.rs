use holdem_rs::cards::{Card, Rank, Suit};
use holdem_rs::evaluator::{evaluate, Category, HandRank};
use proptest::prelude::*;
use std::cmp::Ordering;

fn full_deck() -> Vec<Card> {
    Suit::ALL.iter().flat_map(|&s| Rank::ALL.iter().map(move |&r| Card::new(r, s))).collect()
}

/// `n` distinct cards.
fn any_cards(n: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::sample::subsequence(full_deck(), n).prop_shuffle()
}

fn rank_from_val(v: u8) -> Rank {
    Rank::from_value(v).unwrap_or(Rank::Ace)
}

fn straight_cards(top: u8) -> [Card; 5] {
    let ranks = if top == 5 {
        [Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five]
    } else {
        [
            rank_from_val(top - 4),
            rank_from_val(top - 3),
            rank_from_val(top - 2),
            rank_from_val(top - 1),
            rank_from_val(top),
        ]
    };
    let suits = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades, Suit::Clubs];
    [
        Card::new(ranks[0], suits[0]),
        Card::new(ranks[1], suits[1]),
        Card::new(ranks[2], suits[2]),
        Card::new(ranks[3], suits[3]),
        Card::new(ranks[4], suits[4]),
    ]
}

fn flush_rank_set() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::btree_set(2u8..=14u8, 5)
        .prop_filter("non-straight ranks", |set| {
            let vals: Vec<u8> = set.iter().copied().collect();
            let is_wheel = vals == vec![2, 3, 4, 5, 14];
            let is_straight = vals.windows(2).all(|w| w[1] == w[0] + 1);
            !(is_straight || is_wheel)
        })
        .prop_map(|set| set.into_iter().rev().collect())
}

fn best_of_fives(cards: &[Card]) -> HandRank {
    let n = cards.len();
    let mut best: Option<HandRank> = None;
    for mask in 0u32..(1 << n) {
        if mask.count_ones() != 5 {
            continue;
        }
        let five: Vec<Card> = (0..n).filter(|i| mask & (1 << i) != 0).map(|i| cards[i]).collect();
        let r = evaluate(&five).unwrap();
        if best.as_ref().map_or(true, |b| r > *b) {
            best = Some(r);
        }
    }
    best.unwrap()
}

fn rank_counts(cards: &[Card]) -> Vec<usize> {
    let mut counts = [0usize; 15];
    for c in cards {
        counts[c.rank().value() as usize] += 1;
    }
    counts.into_iter().filter(|&c| c > 0).collect()
}

proptest! {
    #[test]
    fn ordering_is_antisymmetric_and_transitive(
        a in any_cards(7),
        b in any_cards(6),
        c in any_cards(5),
    ) {
        let ea = evaluate(&a).unwrap();
        let eb = evaluate(&b).unwrap();
        let ec = evaluate(&c).unwrap();

        if ea >= eb && eb >= ea { prop_assert_eq!(&ea, &eb); }
        if ea >= eb && eb >= ec { prop_assert!(ea >= ec); }
        if ea <= eb && eb <= ec { prop_assert!(ea <= ec); }
    }

    #[test]
    fn seven_cards_rank_as_their_best_five(cards in any_cards(7)) {
        let best7 = evaluate(&cards).unwrap();
        prop_assert_eq!(best7, best_of_fives(&cards));
    }

    #[test]
    fn large_sets_rank_as_their_best_five(cards in (8usize..=12).prop_flat_map(any_cards)) {
        prop_assert_eq!(evaluate(&cards).unwrap(), best_of_fives(&cards));
    }

    #[test]
    fn card_order_does_not_matter(cards in (5usize..=12).prop_flat_map(any_cards)) {
        let mut reversed = cards.clone();
        reversed.reverse();
        prop_assert_eq!(evaluate(&cards).unwrap(), evaluate(&reversed).unwrap());
    }

    #[test]
    fn category_matches_its_pattern(cards in any_cards(7)) {
        let e = evaluate(&cards).unwrap();
        let counts = rank_counts(&cards);
        let pairs = counts.iter().filter(|&&c| c == 2).count();
        match e.category {
            Category::FourOfAKind => prop_assert!(counts.contains(&4)),
            Category::FullHouse => {
                let trips = counts.iter().filter(|&&c| c == 3).count();
                prop_assert!(trips > 0 && (pairs > 0 || trips > 1))
            }
            Category::ThreeOfAKind => prop_assert!(counts.contains(&3) && pairs == 0),
            Category::TwoPair => prop_assert!(pairs >= 2 && !counts.contains(&3)),
            Category::Pair => prop_assert!(pairs == 1 && !counts.contains(&3)),
            Category::HighCard => prop_assert!(counts.iter().all(|&c| c == 1)),
            _ => {}
        }
        let lens = match e.category {
            Category::FourOfAKind | Category::FullHouse => 2,
            Category::ThreeOfAKind | Category::TwoPair => 3,
            Category::Pair => 4,
            _ => 5,
        };
        prop_assert_eq!(e.tiebreak().len(), lens);
    }

    #[test]
    fn straights_order_by_top_card(a in 5u8..=14, b in 5u8..=14) {
        let ea = evaluate(&straight_cards(a)).unwrap();
        let eb = evaluate(&straight_cards(b)).unwrap();
        prop_assert_eq!(ea.category, Category::Straight);
        prop_assert_eq!(ea.cmp(&eb), a.cmp(&b));
    }

    #[test]
    fn five_suited_non_straight_ranks_are_a_flush(ranks in flush_rank_set(), suit in 0usize..4) {
        let suit = Suit::ALL[suit];
        let cards: Vec<Card> = ranks.iter().map(|&v| Card::new(rank_from_val(v), suit)).collect();
        let e = evaluate(&cards).unwrap();
        prop_assert_eq!(e.category, Category::Flush);
        prop_assert_eq!(e.tiebreak(), ranks.as_slice());
    }

    #[test]
    fn higher_category_always_wins(a in any_cards(7), b in any_cards(7)) {
        let ea = evaluate(&a).unwrap();
        let eb = evaluate(&b).unwrap();
        if ea.category != eb.category {
            prop_assert_eq!(ea.cmp(&eb), ea.category.cmp(&eb.category));
        } else {
            prop_assert_eq!(ea.cmp(&eb), ea.tiebreak().cmp(eb.tiebreak()));
        }
    }
}

#[test]
fn wheel_loses_to_six_high_straight() {
    let wheel = evaluate(&straight_cards(5)).unwrap();
    let six_high = evaluate(&straight_cards(6)).unwrap();
    assert_eq!(wheel.cmp(&six_high), Ordering::Less);
}
