//! Structured warnings surfaced to the presentation layer.
//!
//! Unlike `DomainError`, a warning never blocks an operation by itself.

use serde::Serialize;

use crate::domain::state::PlayerIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoundWarning {
    /// The dealer's current guess is the one value they may not choose.
    DealerForbidden {
        dealer: PlayerIndex,
        forbidden: i16,
        cards: u8,
    },
    /// Tricks recorded do not add up to the cards dealt. Overridable.
    TrickTotalMismatch { total: u32, cards: u8 },
}

impl RoundWarning {
    /// User-facing text; `names` resolves player indices.
    pub fn message(&self, names: &[String]) -> String {
        match *self {
            RoundWarning::DealerForbidden {
                dealer,
                forbidden,
                cards,
            } => {
                let name = names.get(dealer).map(String::as_str).unwrap_or("Dealer");
                format!("{name} cannot guess {forbidden} (total guesses cannot equal {cards}).")
            }
            RoundWarning::TrickTotalMismatch { total, cards } => {
                format!("Total tricks recorded ({total}) should equal cards this round ({cards}).")
            }
        }
    }
}
