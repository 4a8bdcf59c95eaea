use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;

use crate::board::BoardSize;
use crate::error::{Error, Result};

/// Command line configuration for a single game.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "minesweeper-logic", about = "Plays minesweeper by logical deduction")]
pub struct GameConfig {
    /// Number of rows
    #[arg(long, default_value_t = 8)]
    pub height: usize,

    /// Number of columns
    #[arg(long, default_value_t = 8)]
    pub width: usize,

    /// Number of mines placed on the board
    #[arg(long, default_value_t = 8)]
    pub mines: usize,

    /// Seed for mine placement and random guesses
    #[arg(long)]
    pub seed: Option<u64>,

    /// Play yourself instead of watching the AI
    #[arg(long)]
    pub human: bool,

    /// Pause between AI turns, in milliseconds
    #[arg(long, default_value_t = 500)]
    pub delay_ms: u64,
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        if self.height == 0 || self.width == 0 {
            return Err(Error::InvalidConfiguration {
                message: format!("board must be at least 1x1, got {}x{}", self.height, self.width),
            });
        }
        if self.mines > self.size().area() {
            return Err(Error::InvalidConfiguration {
                message: format!("{} mines do not fit on a {}x{} board", self.mines, self.height, self.width),
            });
        }
        Ok(())
    }

    pub fn size(&self) -> BoardSize {
        BoardSize::new(self.height, self.width)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
