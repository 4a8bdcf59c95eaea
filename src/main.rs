use clap::Parser;
use std::io;
use std::process;

use minesweeper_logic::board::Board;
use minesweeper_logic::config::GameConfig;
use minesweeper_logic::error::Result;
use minesweeper_logic::knowledge::KnowledgeBase;
use minesweeper_logic::{ai_game_loop, game_loop, Outcome};

fn run(config: &GameConfig) -> Result<Outcome> {
    config.validate()?;
    let mut rng = config.rng();
    let mut board = Board::new(config.size(), config.mines, &mut rng)?;
    let mut kb = KnowledgeBase::new(config.size());
    if config.human {
        let stdin = io::stdin();
        game_loop(&mut board, &mut kb, &mut stdin.lock(), &mut rng)
    } else {
        ai_game_loop(&mut board, &mut kb, &mut rng, config.delay())
    }
}

fn main() {
    let config = GameConfig::parse();
    match run(&config) {
        Ok(Outcome::Won) => {}
        Ok(_) => process::exit(1),
        Err(err) => {
            eprintln!("error: {}", err);
            process::exit(2)
        }
    }
}
