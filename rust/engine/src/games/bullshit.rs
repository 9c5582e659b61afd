use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::cards::Rank;
use crate::deck::{Deck, STANDARD_DECK_SIZE};
use crate::errors::GameError;
use crate::game::{GameKind, GameState, Variant};
use crate::player::{PlayerId, Seat};
use crate::rules::RoundConfig;

pub const MAX_PLAY: usize = 4;

/// Claims cycle through this order, wrapping after the king.
pub const RANK_ORDER: [Rank; 13] = [
    Rank::Ace,
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
];

pub fn next_rank(rank: Rank) -> Rank {
    let pos = RANK_ORDER.iter().position(|r| *r == rank).unwrap_or(0);
    RANK_ORDER[(pos + 1) % RANK_ORDER.len()]
}

/// The face-down play that can currently be challenged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub player_id: PlayerId,
    pub seat: usize,
    pub rank: Rank,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeResult {
    pub challenger: PlayerId,
    pub accused: PlayerId,
    pub was_bluff: bool,
    /// Whoever picked up the pile
    pub loser: PlayerId,
    pub cards_taken: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BullshitState {
    /// Rank the next play must claim
    pub expected: Rank,
    pub last_claim: Option<Claim>,
    pub last_challenge: Option<ChallengeResult>,
}

/// Deals the whole deck round-robin, so any remainder lands on the first
/// seats.
pub(crate) fn begin<R: Rng + ?Sized>(
    seats: &[Seat],
    config: RoundConfig,
    round: u32,
    rng: &mut R,
) -> Result<GameState, GameError> {
    let deck = Deck::build(GameKind::Bullshit, rng);
    let initial = BullshitState {
        expected: RANK_ORDER[0],
        last_claim: None,
        last_challenge: None,
    };
    let mut state = GameState::seated(
        GameKind::Bullshit,
        seats,
        config,
        round,
        deck,
        Variant::Bullshit(initial),
    )?;
    let cards = state.deck.draw(STANDARD_DECK_SIZE)?;
    let n = state.players.len();
    for (i, card) in cards.into_iter().enumerate() {
        state.players[i % n].hand.push(card);
    }
    Ok(state)
}

fn bullshit_state(state: &GameState) -> Result<BullshitState, GameError> {
    match &state.variant {
        Variant::Bullshit(b) => Ok(b.clone()),
        _ => Err(GameError::illegal("not a Bullshit round")),
    }
}

pub(crate) fn apply(state: &mut GameState, seat: usize, action: &Action) -> Result<(), GameError> {
    let mut bs = bullshit_state(state)?;
    match action {
        Action::Play {
            cards,
            chosen_color,
            claimed_rank,
        } => {
            if chosen_color.is_some() {
                return Err(GameError::malformed("Bullshit plays do not choose a color"));
            }
            let claimed =
                claimed_rank.ok_or_else(|| GameError::malformed("a play must claim a rank"))?;
            if cards.is_empty() || cards.len() > MAX_PLAY {
                return Err(GameError::malformed(format!(
                    "play between 1 and {MAX_PLAY} cards, got {}",
                    cards.len()
                )));
            }
            if claimed != bs.expected {
                return Err(GameError::illegal(format!(
                    "the claim must be {}, not {claimed}",
                    bs.expected
                )));
            }
            let played = state.players[seat].take_cards(cards)?;
            state.pile.extend(played.into_iter().map(|c| c.concealed()));
            bs.last_claim = Some(Claim {
                player_id: state.players[seat].id.clone(),
                seat,
                rank: claimed,
                count: cards.len(),
            });
            bs.expected = next_rank(claimed);

            if state.players[seat].hand.is_empty() {
                let winner = state.players[seat].id.clone();
                state.variant = Variant::Bullshit(bs);
                state.finish(Some(winner));
                return Ok(());
            }
            state.turn.advance(&state.players)?;
        }
        Action::Challenge => {
            let claim = bs
                .last_claim
                .take()
                .ok_or_else(|| GameError::illegal("there is no play to challenge"))?;
            if claim.seat == seat {
                return Err(GameError::illegal("cannot challenge your own play"));
            }
            let start = state.pile.len().saturating_sub(claim.count);
            let was_bluff = state.pile[start..].iter().any(|c| c.rank != claim.rank);
            let loser_seat = if was_bluff { claim.seat } else { seat };
            let pile = std::mem::take(&mut state.pile);
            let cards_taken = pile.len();
            state.players[loser_seat].hand.extend(pile);
            bs.last_challenge = Some(ChallengeResult {
                challenger: state.players[seat].id.clone(),
                accused: claim.player_id,
                was_bluff,
                loser: state.players[loser_seat].id.clone(),
                cards_taken,
            });
            // the challenger keeps the turn
        }
        other => {
            return Err(GameError::illegal(format!(
                "{} is not a Bullshit action",
                other.name()
            )));
        }
    }
    state.variant = Variant::Bullshit(bs);
    Ok(())
}

/// A truthful single-card play per matching card, the full set of matching
/// cards, one bluff, and a challenge when available.
pub(crate) fn legal_actions(state: &GameState, seat: usize) -> Vec<Action> {
    let Ok(bs) = bullshit_state(state) else {
        return Vec::new();
    };
    let hand = &state.players[seat].hand;
    let matching: Vec<_> = hand
        .iter()
        .filter(|c| c.rank == bs.expected)
        .map(|c| c.id)
        .take(MAX_PLAY)
        .collect();
    let mut actions: Vec<Action> = matching
        .iter()
        .map(|id| Action::claim(vec![*id], bs.expected))
        .collect();
    if matching.len() > 1 {
        actions.push(Action::claim(matching.clone(), bs.expected));
    }
    if let Some(bluff) = hand.iter().find(|c| c.rank != bs.expected) {
        actions.push(Action::claim(vec![bluff.id], bs.expected));
    }
    if bs.last_claim.as_ref().is_some_and(|c| c.seat != seat) {
        actions.push(Action::Challenge);
    }
    actions
}
