//! The dialog router.
//!
//! Maps (state, intent, attributes) to a [`TurnResult`]. Every state has a
//! catch-all row, so the only failures are contract violations of the input.
//!
//! | State | Intent             | Next  |
//! |-------|--------------------|-------|
//! | NONE  | LaunchOrNewSession | START |
//! | START | Yes                | GUESS |
//! | START | No / Help / other  | START |
//! | GUESS | NumberGuess        | GUESS, or START when correct |
//! | GUESS | LaunchOrNewSession | START (via NONE) |
//! | any   | SessionEnded       | unchanged |

use std::cmp::Ordering;

use rand::Rng;
use tracing::{debug, info};

use crate::attributes::SessionAttributes;
use crate::error::DialogError;
use crate::intent::{IntentEvent, IntentName, NUMBER_SLOT};
use crate::prompts;
use crate::response::TurnResult;
use crate::state::FsmState;

/// Exclusive upper bound of the secret number.
pub const GUESS_UPPER_BOUND: i64 = 100;

/// Run one turn using the state recorded in `attributes`.
pub fn handle_turn<R: Rng>(
    event: &IntentEvent,
    attributes: SessionAttributes,
    rng: &mut R,
) -> Result<TurnResult, DialogError> {
    let state = attributes.fsm_state();
    transition(state, event, attributes, rng)
}

/// Resolve which row of `state` handles `event`.
///
/// A new platform session always lands on the welcome prompt, and so does
/// any turn while no state is recorded. Session termination is never
/// redirected.
pub fn route(state: FsmState, event: &IntentEvent) -> IntentName {
    match &event.name {
        IntentName::SessionEnded => IntentName::SessionEnded,
        _ if event.is_new_session || state == FsmState::None => IntentName::LaunchOrNewSession,
        name => name.clone(),
    }
}

/// Compute the transition for one turn.
///
/// Pure apart from drawing the secret number from `rng`.
pub fn transition<R: Rng>(
    state: FsmState,
    event: &IntentEvent,
    attributes: SessionAttributes,
    rng: &mut R,
) -> Result<TurnResult, DialogError> {
    let intent = route(state, event);
    info!(intent = %event.name, "Intent: {}", intent);

    let mut result = match state {
        FsmState::None => none_mode(&intent, attributes),
        FsmState::Start => start_mode(&intent, attributes, rng),
        FsmState::Guess => guess_mode(&intent, event, attributes, rng)?,
    };

    result.attributes.ensure_counters();
    if intent != IntentName::SessionEnded {
        result.attributes.state = Some(result.next_state);
    }

    debug!(
        from = %state,
        to = %result.next_state,
        end_session = result.should_end_session,
        "Dialog transition"
    );
    Ok(result)
}

fn none_mode(intent: &IntentName, attributes: SessionAttributes) -> TurnResult {
    match intent {
        IntentName::SessionEnded => session_ended(FsmState::None, attributes),
        _ => welcome(attributes),
    }
}

fn start_mode<R: Rng>(intent: &IntentName, mut attributes: SessionAttributes, rng: &mut R) -> TurnResult {
    match intent {
        IntentName::LaunchOrNewSession => welcome(attributes),
        IntentName::Help => TurnResult::ask(
            FsmState::Start,
            attributes,
            prompts::START_HELP,
            prompts::START_HELP,
        ),
        IntentName::Yes => {
            let target = rng.random_range(0..GUESS_UPPER_BOUND);
            attributes.guess_number = Some(target);
            TurnResult::ask(
                FsmState::Guess,
                attributes,
                prompts::START_GAME,
                prompts::TRY_A_NUMBER,
            )
        }
        // The state is deliberately left at START.
        IntentName::No => TurnResult::tell(FsmState::Start, attributes, prompts::GOODBYE),
        IntentName::SessionEnded => session_ended(FsmState::Start, attributes),
        IntentName::NumberGuess | IntentName::Unrecognized(_) => TurnResult::ask(
            FsmState::Start,
            attributes,
            prompts::START_UNHANDLED,
            prompts::START_UNHANDLED,
        ),
    }
}

fn guess_mode<R: Rng>(
    intent: &IntentName,
    event: &IntentEvent,
    mut attributes: SessionAttributes,
    rng: &mut R,
) -> Result<TurnResult, DialogError> {
    let result = match intent {
        IntentName::LaunchOrNewSession => {
            attributes.state = Some(FsmState::None);
            return transition(FsmState::None, event, attributes, rng);
        }
        IntentName::NumberGuess => evaluate_guess(event, attributes)?,
        IntentName::Help => TurnResult::ask(
            FsmState::Guess,
            attributes,
            prompts::GUESS_HELP,
            prompts::TRY_A_NUMBER,
        ),
        IntentName::SessionEnded => session_ended(FsmState::Guess, attributes),
        IntentName::Yes | IntentName::No | IntentName::Unrecognized(_) => TurnResult::ask(
            FsmState::Guess,
            attributes,
            prompts::GUESS_UNHANDLED,
            prompts::TRY_A_NUMBER,
        ),
    };
    Ok(result)
}

/// Welcome prompt; lazily initializes the counters on the first turn.
fn welcome(mut attributes: SessionAttributes) -> TurnResult {
    if attributes.is_empty() {
        debug!("First turn for this session, initializing counters");
    }
    attributes.ensure_counters();
    let games_played = attributes.games_played.unwrap_or(0);

    TurnResult::ask(
        FsmState::Start,
        attributes,
        prompts::welcome(games_played),
        prompts::WELCOME_REPROMPT,
    )
}

fn session_ended(state: FsmState, mut attributes: SessionAttributes) -> TurnResult {
    attributes.ensure_counters();
    let count = attributes.record_session_end();
    info!(ended_session_count = count, "session ended! ({})", state.mode());
    TurnResult::silent(state, attributes)
}

fn evaluate_guess(
    event: &IntentEvent,
    mut attributes: SessionAttributes,
) -> Result<TurnResult, DialogError> {
    let raw = event
        .slot(NUMBER_SLOT)
        .ok_or_else(|| DialogError::MalformedEvent {
            intent: event.name.to_string(),
            reason: format!("missing slot '{}'", NUMBER_SLOT),
        })?;

    // Parse validity is checked before anything is compared.
    let guess = match raw.trim().parse::<i64>() {
        Ok(guess) => guess,
        Err(_) => {
            debug!(raw, "Guess is not a number");
            return Ok(TurnResult::ask(
                FsmState::Guess,
                attributes,
                prompts::NOT_A_NUMBER,
                prompts::GUESS_REPROMPT,
            ));
        }
    };

    let target = attributes
        .guess_number
        .ok_or_else(|| DialogError::MissingAttribute {
            key: "guessNumber",
            state: FsmState::Guess.to_string(),
        })?;

    info!(guess, "user guessed: {}", guess);

    let result = match guess.cmp(&target) {
        Ordering::Greater => TurnResult::ask(
            FsmState::Guess,
            attributes,
            prompts::too_high(guess),
            prompts::GUESS_REPROMPT,
        ),
        Ordering::Less => TurnResult::ask(
            FsmState::Guess,
            attributes,
            prompts::too_low(guess),
            prompts::GUESS_REPROMPT,
        ),
        Ordering::Equal => {
            let games_played = attributes.record_game_won();
            debug!(games_played, "Round won");
            TurnResult::ask(
                FsmState::Start,
                attributes,
                prompts::correct(guess),
                prompts::NEW_GAME_REPROMPT,
            )
        }
    };
    Ok(result)
}

// =============================================================================
// Tests
// =============================================================================
