use rand::Rng;
use rand::seq::SliceRandom;
use log::{debug, info};

use super::board::{Board, Point};
use super::interaction::Action;
use super::knowledge::KnowledgeBase;

/// Flags for every confirmed mine first, then one click: a certain safe cell
/// if there is one, a random guess otherwise. Empty when nothing is left.
pub fn generate_moves<R: Rng + ?Sized>(kb: &KnowledgeBase, board: &Board, rng: &mut R) -> Vec<Action>{
    let flags = pending_flags(kb, board);
    if flags.len() > 0{
        return flags.into_iter().map(Action::Flag).collect()
    }

    if let Some(point) = make_safe_move(kb) {
        debug!("safe move at {:?}", point);
        return vec![Action::Click(point)]
    }
    match make_random_move(kb, rng) {
        None => vec![],
        Some(point) => {
            info!("no certain move, guessing {:?}", point);
            vec![Action::Click(point)]
        }
    }
}

/// Confirmed mines not yet flagged on the board.
pub fn pending_flags(kb: &KnowledgeBase, board: &Board) -> Vec<Point> {
    kb.mines().iter()
        .filter(|point| !board.is_flagged(point))
        .copied()
        .collect()
}

/// The first (row-major) cell known to be safe that has not been played.
pub fn make_safe_move(kb: &KnowledgeBase) -> Option<Point> {
    kb.safes().difference(kb.moves_made()).next().copied()
}

/// A uniformly random cell that is neither played nor a known mine.
pub fn make_random_move<R: Rng + ?Sized>(kb: &KnowledgeBase, rng: &mut R) -> Option<Point> {
    let candidates: Vec<Point> = kb.size().points().into_iter()
        .filter(|point| !kb.moves_made().contains(point) && !kb.mines().contains(point))
        .collect();
    candidates.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardSize;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn safe_move_skips_played_cells() {
        let mut kb = KnowledgeBase::new(BoardSize::new(3, 3));
        assert_eq!(make_safe_move(&kb), None);
        kb.add_knowledge(Point(0, 0), 0).unwrap();
        assert_eq!(make_safe_move(&kb), Some(Point(0, 1)));
        kb.add_knowledge(Point(0, 1), 0).unwrap();
        assert_eq!(make_safe_move(&kb), Some(Point(0, 2)));
    }

    #[test]
    fn safe_move_does_not_mutate() {
        let mut kb = KnowledgeBase::new(BoardSize::new(3, 3));
        kb.add_knowledge(Point(0, 0), 0).unwrap();
        let safes = kb.safes().clone();
        make_safe_move(&kb);
        make_safe_move(&kb);
        assert_eq!(kb.safes(), &safes);
        assert_eq!(kb.moves_made().len(), 1);
    }

    #[test]
    fn random_move_avoids_moves_and_mines() {
        let mut kb = KnowledgeBase::new(BoardSize::new(1, 3));
        kb.add_knowledge(Point(0, 0), 1).unwrap();
        assert!(kb.mines().contains(&Point(0, 1)));
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(make_random_move(&kb, &mut rng), Some(Point(0, 2)));
        }
        kb.add_knowledge(Point(0, 2), 1).unwrap();
        assert_eq!(make_random_move(&kb, &mut rng), None);
    }

    #[test]
    fn random_move_is_reproducible_when_seeded() {
        let kb = KnowledgeBase::new(BoardSize::new(6, 6));
        let picks = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..10).map(|_| make_random_move(&kb, &mut rng)).collect::<Vec<_>>()
        };
        assert_eq!(picks(3), picks(3));
    }

    #[test]
    fn moves_flag_before_clicking() {
        let size = BoardSize::new(1, 3);
        let mut board = Board::with_mines(size, &[Point(0, 1)]);
        let mut kb = KnowledgeBase::new(size);
        let mut rng = StdRng::seed_from_u64(1);
        kb.add_knowledge(Point(0, 0), 1).unwrap();

        assert_eq!(generate_moves(&kb, &board, &mut rng), vec![Action::Flag(Point(0, 1))]);
        board.flag(&Point(0, 1));
        assert_eq!(generate_moves(&kb, &board, &mut rng), vec![Action::Click(Point(0, 2))]);
    }
}
