pub mod board;
pub mod sentence;
pub mod knowledge;
pub mod ai;
pub mod interaction;
pub mod config;
pub mod error;
use std::io::BufRead;
use std::thread;
use std::time::Duration;
use log::{info, warn};
use rand::Rng;

use board::{Board, Point, Probe};
use error::Result;
use interaction::Action;
use knowledge::KnowledgeBase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost(Point),
    /// Input ran out, or no playable cell is left, before the board was cleared.
    Exhausted
}

/// Applies a click or flag to the board, feeding revealed hints and flagged
/// mines to the knowledge base.
fn apply(board: &mut Board, kb: &mut KnowledgeBase, action: Action) -> Result<Option<Outcome>> {
    match action {
        Action::Click(point) => match board.probe(&point) {
            Probe::Mine => Ok(Some(Outcome::Lost(point))),
            Probe::Hint(count) => {
                kb.add_knowledge(point, count)?;
                Ok(None)
            }
        },
        Action::Flag(point) => {
            kb.mark_mine(point)?;
            board.flag(&point);
            Ok(None)
        }
        Action::Hint => Ok(None)
    }
}

fn announce(board: &Board, outcome: Outcome) -> Outcome {
    println!("{}", board);
    match outcome {
        Outcome::Won => println!("you win!"),
        Outcome::Lost(point) => println!("you lose: mine at {:?}", point),
        Outcome::Exhausted => println!("no moves left")
    }
    info!("game over: {:?}, {} of {} mines flagged", outcome, board.mines_found(), board.mine_count);
    outcome
}

pub fn ai_game_loop<R: Rng + ?Sized>(board: &mut Board, kb: &mut KnowledgeBase, rng: &mut R, delay: Duration) -> Result<Outcome>{
    while !board.is_won(){
        println!("{}", board);
        thread::sleep(delay);
        let moves = ai::generate_moves(kb, board, rng);
        if moves.is_empty() {
            return Ok(announce(board, Outcome::Exhausted))
        }
        for action in moves {
            if let Some(outcome) = apply(board, kb, action)? {
                return Ok(announce(board, outcome))
            }
        }
    }
    Ok(announce(board, Outcome::Won))
}

pub fn game_loop<B: BufRead, R: Rng + ?Sized>(board: &mut Board, kb: &mut KnowledgeBase, input: &mut B, rng: &mut R) -> Result<Outcome>{
    while !board.is_won(){
        println!("{}", board);
        let action = match interaction::read_action(input) {
            Ok(Some(action)) => action,
            Ok(None) => return Ok(announce(board, Outcome::Exhausted)),
            Err(err) => {
                warn!("failed to read input: {}", err);
                return Ok(announce(board, Outcome::Exhausted))
            }
        };
        match action {
            Action::Hint => match ai::make_safe_move(kb) {
                Some(point) => println!("{:?} is certainly safe", point),
                None => match ai::make_random_move(kb, rng) {
                    Some(point) => println!("no certain move; try your luck at {:?}", point),
                    None => println!("no moves left")
                }
            },
            Action::Click(point) | Action::Flag(point) if !board.size.contains(&point) => {
                println!("{:?} is off the board", point)
            }
            Action::Click(point) if kb.moves_made().contains(&point) => {
                println!("{:?} is already revealed", point)
            }
            // a player's flag can be wrong or taken back, so it stays on the board only
            Action::Flag(point) => board.toggle_flag(&point),
            action => {
                if let Some(outcome) = apply(board, kb, action)? {
                    return Ok(announce(board, outcome))
                }
            }
        }
    }
    Ok(announce(board, Outcome::Won))
}
