//! Leader summary during play and the final result.

use serde::Serialize;

use crate::domain::state::{GameState, PlayerIndex};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standings {
    pub rounds_played: usize,
    pub top_score: i16,
    /// Every player on `top_score`, in seat order.
    pub leaders: Vec<PlayerIndex>,
    /// Lead over the next-best score; `None` when tied at the top.
    pub margin: Option<i16>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum GameOutcome {
    Winner { player: PlayerIndex, score: i16 },
    Tie { players: Vec<PlayerIndex>, score: i16 },
}

fn top_players(scores: &[i16]) -> Option<(i16, Vec<PlayerIndex>)> {
    let top = *scores.iter().max()?;
    let leaders = scores
        .iter()
        .enumerate()
        .filter(|(_, s)| **s == top)
        .map(|(i, _)| i)
        .collect();
    Some((top, leaders))
}

/// Current standings, `None` before any round is complete.
pub fn standings(game: &GameState) -> Option<Standings> {
    if game.history().is_empty() {
        return None;
    }
    let scores = game.scores();
    let (top_score, leaders) = top_players(scores)?;
    let margin = if leaders.len() == 1 {
        let mut sorted = scores.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.get(1).map(|second| top_score - second)
    } else {
        None
    };
    Some(Standings {
        rounds_played: game.history().len(),
        top_score,
        leaders,
        margin,
    })
}

/// Winner or tie on the current totals. Ties are reported, never broken.
pub fn outcome(game: &GameState) -> Option<GameOutcome> {
    let (score, mut players) = top_players(game.scores())?;
    Some(if players.len() == 1 {
        GameOutcome::Winner {
            player: players.remove(0),
            score,
        }
    } else {
        GameOutcome::Tie { players, score }
    })
}

fn join_names(game: &GameState, players: &[PlayerIndex]) -> String {
    players
        .iter()
        .map(|&p| game.player_name(p))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One-line summary for the history table.
pub fn summary(game: &GameState) -> String {
    let Some(st) = standings(game) else {
        return "No rounds played yet.".to_string();
    };
    let plural = if st.rounds_played > 1 { "s" } else { "" };
    let rounds = format!("{} round{plural}", st.rounds_played);
    match (st.leaders.as_slice(), st.margin) {
        ([leader], Some(margin)) => format!(
            "{} leads with {} points, ahead by {margin} after {rounds}.",
            game.player_name(*leader),
            st.top_score
        ),
        ([leader], None) => format!(
            "{} leads with {} points after {rounds}.",
            game.player_name(*leader),
            st.top_score
        ),
        (leaders, _) => format!(
            "It's a tie between {} at {} points after {rounds}.",
            join_names(game, leaders),
            st.top_score
        ),
    }
}

/// Game-over banner text.
pub fn outcome_message(game: &GameState) -> Option<String> {
    Some(match outcome(game)? {
        GameOutcome::Winner { player, score } => {
            format!("{} wins with {score} points!", game.player_name(player))
        }
        GameOutcome::Tie { players, score } => format!(
            "It's a tie between {} with {score} points!",
            join_names(game, &players)
        ),
    })
}
