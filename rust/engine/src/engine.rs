//! Betting-round state machine for a single hand.
//!
//! Every operation takes the current [`Room`] snapshot by reference and
//! returns a new snapshot; the input is never modified, so a rejected action
//! leaves the caller's state exactly as it was.

use rand::Rng;
use tracing::{debug, info};

use crate::deck::{create_deck, shuffle, Deck};
use crate::errors::GameError;
use crate::game::{next_active, Game, Street};
use crate::hand::{best_hand, compare_score, BestHand};
use crate::player::PlayerAction;
use crate::room::{HandSummary, Payout, Room, RoomStatus, ShowdownHand, MAX_TABLE_CHIPS};
use crate::rules::{validate_action, ValidatedAction};

/// Shuffles a fresh deck with `rng` and deals the next hand.
pub fn start_hand<R: Rng + ?Sized>(room: &Room, rng: &mut R) -> Result<Room, GameError> {
    start_hand_with_deck(room, shuffle(&create_deck(), rng))
}

/// Deals the next hand from `deck`, dealing from its tail.
///
/// The dealer button moves one seat from the previous hand (seat 0 for the
/// first hand), every seat receives two cards in seat order, and the blinds
/// are posted by the next two funded seats after the dealer.
///
/// # Errors
///
/// - [`GameError::RoomAlreadyStarted`] if a hand is already running
/// - [`GameError::NotEnoughPlayers`] if fewer than `min_players` seats hold chips
/// - [`GameError::DeckExhausted`] if `deck` runs out while dealing
/// - [`GameError::ChipLimitExceeded`] if the seated stacks add up past
///   [`MAX_TABLE_CHIPS`]
pub fn start_hand_with_deck(room: &Room, mut deck: Deck) -> Result<Room, GameError> {
    if room.status == RoomStatus::Playing || room.game.is_some() {
        return Err(GameError::RoomAlreadyStarted);
    }
    // pot and stacks never exceed the chips seated, so u32 sums cannot overflow
    if room.total_chips() > MAX_TABLE_CHIPS {
        return Err(GameError::ChipLimitExceeded {
            limit: MAX_TABLE_CHIPS,
        });
    }
    let funded = room.players.iter().filter(|p| p.chips > 0).count();
    if funded < room.min_players.max(2) {
        return Err(GameError::NotEnoughPlayers);
    }

    let n = room.players.len();
    let dealer = room.last_dealer.map_or(0, |d| (d + 1) % n);

    let mut players = Vec::with_capacity(n);
    for p in &room.players {
        let hand = [deck.deal_card()?, deck.deal_card()?];
        players.push(p.deal_in(hand));
    }

    let sb_seat = next_active(&players, dealer).ok_or(GameError::NotEnoughPlayers)?;
    let bb_seat = next_active(&players, sb_seat).ok_or(GameError::NotEnoughPlayers)?;
    let sb_paid = players[sb_seat].pay(room.small_blind);
    let bb_paid = players[bb_seat].pay(room.big_blind);

    let log = vec![
        format!("Small blind {} posts {}", players[sb_seat].name, sb_paid),
        format!("Big blind {} posts {}", players[bb_seat].name, bb_paid),
    ];
    let turn = next_active(&players, bb_seat);
    let game = Game {
        hand_number: room.hands_played + 1,
        deck,
        pot: sb_paid + bb_paid,
        board: Vec::with_capacity(5),
        dealer,
        street: Street::Preflop,
        current_bet: room.big_blind,
        turn,
        last_aggressor: bb_seat,
        players,
        log,
    };

    info!(
        room_id = %room.room_id,
        hand = game.hand_number,
        dealer,
        small_blind_seat = sb_seat,
        big_blind_seat = bb_seat,
        pot = game.pot,
        "hand started"
    );

    let mut next = room.clone();
    next.status = RoomStatus::Playing;
    next.last_dealer = Some(dealer);
    next.hands_played = game.hand_number;
    if game.turn.is_none() {
        return finish_street(next, game);
    }
    next.game = Some(game);
    Ok(next)
}

/// Applies one action by `player_id` and advances the hand as far as it goes.
///
/// # Errors
///
/// - [`GameError::HandNotInProgress`] if no hand is running
/// - [`GameError::OutOfTurn`] if `player_id` is not the seat to act
/// - [`GameError::IllegalCheck`], [`GameError::InvalidRaiseAmount`],
///   [`GameError::InsufficientChips`] for actions the seat cannot make
pub fn apply_action(
    room: &Room,
    player_id: &str,
    action: PlayerAction,
) -> Result<Room, GameError> {
    let mut game = match (&room.game, room.status) {
        (Some(game), RoomStatus::Playing) => game.clone(),
        _ => return Err(GameError::HandNotInProgress),
    };
    let idx = match game.players.iter().position(|p| p.id == player_id) {
        Some(idx) if game.turn == Some(idx) => idx,
        _ => return Err(GameError::OutOfTurn),
    };

    let validated = validate_action(&game.players[idx], game.current_bet, action)?;
    let raises = validated.raises(game.current_bet);
    let paid = game.players[idx].pay(validated.paid());
    game.pot += paid;
    if validated == ValidatedAction::Fold {
        game.players[idx].folded = true;
    }
    if raises {
        game.current_bet = game.players[idx].committed;
        game.last_aggressor = idx;
        for (i, p) in game.players.iter_mut().enumerate() {
            if i != idx && !p.folded && !p.all_in {
                p.acted = false;
            }
        }
    }
    game.players[idx].acted = true;
    game.log.push(describe(&game.players[idx].name, &validated));

    debug!(
        room_id = %room.room_id,
        player_id,
        seat = idx,
        action = ?validated,
        street = game.street.as_str(),
        pot = game.pot,
        "action applied"
    );

    let next = room.clone();
    let alive: Vec<usize> = game.unfolded().map(|(i, _)| i).collect();
    if let [winner] = alive[..] {
        return Ok(award_uncontested(next, game, winner));
    }
    if game.is_street_complete() {
        return finish_street(next, game);
    }
    match next_active(&game.players, idx) {
        Some(turn) => {
            game.turn = Some(turn);
            let mut next = next;
            next.game = Some(game);
            Ok(next)
        }
        None => finish_street(next, game),
    }
}

fn describe(name: &str, action: &ValidatedAction) -> String {
    match action {
        ValidatedAction::Fold => format!("{} folds", name),
        ValidatedAction::Check => format!("{} checks", name),
        ValidatedAction::Call(paid) => format!("{} calls {}", name, paid),
        ValidatedAction::Raise { to, .. } => format!("{} raises to {}", name, to),
        ValidatedAction::AllIn { to, .. } => format!("{} goes all-in for {}", name, to),
    }
}

fn finish_street(mut room: Room, mut game: Game) -> Result<Room, GameError> {
    if advance_street(&mut game)? {
        return Ok(settle_showdown(room, game));
    }
    room.game = Some(game);
    Ok(room)
}

/// Deals the next street and resets street commitments. Streets without
/// anyone able to act are dealt straight through. Returns `true` once the
/// river has been completed and the hand is ready for showdown.
fn advance_street(game: &mut Game) -> Result<bool, GameError> {
    loop {
        if matches!(game.street, Street::River | Street::Showdown) {
            game.street = Street::Showdown;
            game.turn = None;
            return Ok(true);
        }
        let cards = game.deck.deal_n(game.street.cards_to_deal())?;
        game.board.extend(cards);
        game.street = game.street.next();
        game.current_bet = 0;
        for p in &mut game.players {
            p.committed = 0;
            p.acted = false;
        }
        game.turn = next_active(&game.players, game.dealer);
        game.log.push(format!("Dealing the {}", game.street.as_str()));
        debug!(street = game.street.as_str(), board = game.board.len(), "street advanced");
        if game.turn.is_some() {
            return Ok(false);
        }
    }
}

fn award_uncontested(room: Room, mut game: Game, winner: usize) -> Room {
    let pot = game.pot;
    game.players[winner].chips += pot;
    let name = game.players[winner].name.clone();
    let id = game.players[winner].id.clone();
    game.log.push(format!("{} wins pot {}", name, pot));
    let summary = HandSummary {
        hand_number: game.hand_number,
        dealer: game.dealer,
        pot,
        board: game.board.clone(),
        winners: vec![id.clone()],
        payouts: vec![Payout {
            player_id: id,
            amount: pot,
        }],
        showdown: Vec::new(),
        log: game.log.clone(),
    };
    close_hand(room, game, summary)
}

/// Single-pot settlement: the best hand among all unfolded players takes the
/// whole pot regardless of how much each all-in player contributed. Ties split
/// evenly; odd chips go one each to the tied winners closest to the left of
/// the dealer.
fn settle_showdown(room: Room, mut game: Game) -> Room {
    let mut scored: Vec<(usize, BestHand)> = Vec::new();
    for (i, p) in game.unfolded() {
        let mut cards = p.hand.to_vec();
        cards.extend_from_slice(&game.board);
        // two hole cards plus a full board always yield a five-card hand
        if let Some(best) = best_hand(&cards) {
            scored.push((i, best));
        }
    }
    scored.sort_by(|a, b| compare_score(&b.1.score, &a.1.score));

    let winners: Vec<usize> = match scored.first() {
        Some((_, top)) => scored
            .iter()
            .filter(|(_, s)| compare_score(&s.score, &top.score).is_eq())
            .map(|(i, _)| *i)
            .collect(),
        None => Vec::new(),
    };

    let n = game.players.len();
    let dealer = game.dealer;
    let mut order = winners.clone();
    order.sort_by_key(|&i| (i + n - dealer - 1) % n);

    let pot = game.pot;
    let count = order.len().max(1) as u32;
    let (share, odd) = (pot / count, pot % count);
    let mut payouts = Vec::with_capacity(order.len());
    for (k, &i) in order.iter().enumerate() {
        let amount = share + u32::from((k as u32) < odd);
        game.players[i].chips += amount;
        payouts.push(Payout {
            player_id: game.players[i].id.clone(),
            amount,
        });
    }

    let names: Vec<&str> = order.iter().map(|&i| game.players[i].name.as_str()).collect();
    let line = match (names.as_slice(), scored.first()) {
        ([single], Some((_, best))) => {
            format!("Showdown: {} wins pot {} with {}", single, pot, best.score.category)
        }
        _ => format!("Showdown: {} split pot {} ({} each)", names.join(", "), pot, share),
    };
    game.log.push(line);

    let showdown = scored
        .into_iter()
        .map(|(i, best)| ShowdownHand {
            player_id: game.players[i].id.clone(),
            hole: game.players[i].hand,
            best: best.cards,
            score: best.score,
        })
        .collect();
    let summary = HandSummary {
        hand_number: game.hand_number,
        dealer,
        pot,
        board: game.board.clone(),
        winners: order.iter().map(|&i| game.players[i].id.clone()).collect(),
        payouts,
        showdown,
        log: game.log.clone(),
    };
    close_hand(room, game, summary)
}

fn close_hand(mut room: Room, game: Game, summary: HandSummary) -> Room {
    info!(
        room_id = %room.room_id,
        hand = summary.hand_number,
        pot = summary.pot,
        winners = ?summary.winners,
        showdown = !summary.showdown.is_empty(),
        "hand settled"
    );
    room.players = game.players.into_iter().map(|p| p.into_lobby()).collect();
    room.status = RoomStatus::Waiting;
    room.game = None;
    room.last_hand = Some(summary);
    room
}
