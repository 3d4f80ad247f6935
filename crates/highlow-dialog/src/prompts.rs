//! Spoken wording of every turn.
//!
//! Downstream consumers compare these strings literally; punctuation and
//! casing are part of the contract.

pub const WELCOME_REPROMPT: &str = "Say yes to start the game or no to quit.";

pub const START_HELP: &str = "I will think of a number between zero and one hundred, try to guess and I will tell you if it is higher or lower. Do you want to start the game?";

pub const START_GAME: &str = "Great! Try saying a number to start the game.";

pub const TRY_A_NUMBER: &str = "Try saying a number.";

pub const GOODBYE: &str = "Ok, see you next time!";

pub const START_UNHANDLED: &str = "Say yes to continue, or no to end the game.";

pub const GUESS_HELP: &str = "I am thinking of a number between zero and one hundred, try to guess and I will tell you if it is higher or lower.";

pub const GUESS_UNHANDLED: &str = "Sorry, I didn't get that. Try saying a number.";

pub const NOT_A_NUMBER: &str = "Try saying a number";

pub const GUESS_REPROMPT: &str = "Try saying a number, or, cancel, to quit.";

pub const NEW_GAME_REPROMPT: &str = "Say yes to start a new game, or no to end the game.";

pub fn welcome(games_played: u64) -> String {
    format!(
        "Welcome to High Low guessing game. You have played {} times. Would you like to play?",
        games_played
    )
}

pub fn too_high(guess: i64) -> String {
    format!(
        "Sorry, {} is too high. Say another number to try again, or say cancel to quit.",
        guess
    )
}

pub fn too_low(guess: i64) -> String {
    format!(
        "Sorry, {} is too low. Say another number to try again, or say cancel to quit.",
        guess
    )
}

pub fn correct(guess: i64) -> String {
    format!("{} is correct! Would you like to play a new game?", guess)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_wording() {
        assert_eq!(
            welcome(0),
            "Welcome to High Low guessing game. You have played 0 times. Would you like to play?"
        );
        assert!(welcome(12).contains("You have played 12 times."));
    }

    #[test]
    fn test_guess_feedback_wording() {
        assert_eq!(
            too_low(41),
            "Sorry, 41 is too low. Say another number to try again, or say cancel to quit."
        );
        assert_eq!(
            too_high(43),
            "Sorry, 43 is too high. Say another number to try again, or say cancel to quit."
        );
        assert_eq!(correct(42), "42 is correct! Would you like to play a new game?");
    }

    #[test]
    fn test_negative_guess_formats_sign() {
        assert!(too_low(-1).starts_with("Sorry, -1 is too low."));
    }
}
