use super::*;
use crate::eval::EvalProfile;
use std::time::Duration;

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).unwrap()
}

fn searcher(tt: &TranspositionTable, profile: EvalProfile) -> Searcher<'_> {
    Searcher::new(tt, Evaluator::new(profile), TimeControl::infinite())
}

const MATE_IN_ONE: &str = "6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1";

#[test]
fn test_terminal_score() {
    let mated = pos("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    assert_eq!(terminal_score(&mated, 3), Some(-(MATE - 3)));

    let stalemate = pos("k7/8/1Q6/8/8/8/8/1K6 b - - 0 1");
    assert_eq!(terminal_score(&stalemate, 5), Some(0));

    assert_eq!(terminal_score(&Position::startpos(), 0), None);
}

#[test]
fn test_mate_scores_are_reanchored() {
    let at_node = MATE - 7;
    let stored = score_to_tt(at_node, 4);
    assert_eq!(stored, MATE - 3);
    assert_eq!(score_from_tt(stored, 4), at_node);
    assert_eq!(score_from_tt(stored, 2), MATE - 5);

    assert_eq!(score_to_tt(-(MATE - 7), 4), -(MATE - 3));
    assert_eq!(score_to_tt(250, 9), 250);
}

#[test]
fn test_depth_one_finds_mate_in_one() {
    let tt = TranspositionTable::new();
    let p = pos(MATE_IN_ONE);
    let (mv, score) = searcher(&tt, EvalProfile::Balanced)
        .search_depth(&p, 1, None)
        .unwrap();
    assert_eq!(mv.to_string(), "e1e8");
    assert_eq!(score, MATE - 1);
}

#[test]
fn test_quiesce_without_captures_is_stand_pat() {
    let tt = TranspositionTable::new();
    let eval = Evaluator::default();
    let p = pos("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
    assert!(p.captures().is_empty());

    let stand_pat = eval.evaluate(&p);
    let mut s = searcher(&tt, EvalProfile::Balanced);
    assert_eq!(s.quiesce(&p, 0, -INFINITY, INFINITY), stand_pat);
    // Clamped to the window
    assert_eq!(s.quiesce(&p, 0, stand_pat - 20, stand_pat - 10), stand_pat - 10);
    assert_eq!(s.quiesce(&p, 0, stand_pat + 10, stand_pat + 20), stand_pat + 10);
}

#[test]
fn test_quiesce_resolves_hanging_queen() {
    let tt = TranspositionTable::new();
    let p = pos("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1");
    let mut s = searcher(&tt, EvalProfile::Material);
    // Stand pat is -800, exd5 leaves White a pawn up
    assert_eq!(s.quiesce(&p, 0, -INFINITY, INFINITY), 100);
}

#[test]
fn test_quiescence_checks_find_quiet_mate() {
    let tt = TranspositionTable::new();
    let p = pos(MATE_IN_ONE);

    let mut plain = searcher(&tt, EvalProfile::Material);
    assert_eq!(plain.quiesce(&p, 0, -INFINITY, INFINITY), 900);

    let mut with_checks = searcher(&tt, EvalProfile::Material).with_quiescence_checks(true);
    assert_eq!(with_checks.quiesce(&p, 0, -INFINITY, INFINITY), MATE - 1);
}

#[test]
fn test_expired_clock_falls_back_to_random_move() {
    let tt = TranspositionTable::new();
    let p = Position::startpos();
    let clock = TimeControl::new(Some(Duration::ZERO));
    let mut s = Searcher::new(&tt, Evaluator::default(), clock);

    let result = s.iterate(&p, 4);
    let mv = result.best_move.expect("fallback move");
    assert!(p.legal_moves().contains(&mv));
    assert_eq!(result.depth, 0);
    assert!(result.stopped);
    assert!(s.aborted());
    assert!(tt.is_empty(), "aborted searches store nothing");
}

#[test]
fn test_stop_signal_interrupts_search() {
    let tt = TranspositionTable::new();
    let clock = TimeControl::infinite();
    clock.stop();
    let mut s = Searcher::new(&tt, Evaluator::default(), clock);
    assert_eq!(s.search_depth(&Position::startpos(), 3, None), None);
    assert!(s.aborted());
}

#[test]
fn test_iterate_without_moves() {
    let tt = TranspositionTable::new();
    let p = pos("k7/8/1Q6/8/8/8/8/1K6 b - - 0 1");
    let result = searcher(&tt, EvalProfile::Balanced).iterate(&p, 3);
    assert_eq!(result.best_move, None);
}

#[test]
fn test_iterate_reports_completed_depth() {
    let tt = TranspositionTable::new();
    let mut s = searcher(&tt, EvalProfile::Material);
    let result = s.iterate(&Position::startpos(), 2);
    assert_eq!(result.depth, 2);
    assert!(!result.stopped);
    assert!(result.nodes > 20);
    assert_eq!(result.nodes, s.nodes());
    assert!(!tt.is_empty());
}

#[test]
fn test_warm_table_gives_same_score() {
    let tt = TranspositionTable::new();
    let p = pos("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4");

    let cold = searcher(&tt, EvalProfile::Balanced).iterate(&p, 2);
    let warm = searcher(&tt, EvalProfile::Balanced).iterate(&p, 2);
    assert_eq!(cold.score, warm.score);
    assert!(p.legal_moves().contains(&warm.best_move.unwrap()));
}

#[test]
fn test_root_entry_is_exact() {
    let tt = TranspositionTable::new();
    let p = pos(MATE_IN_ONE);
    searcher(&tt, EvalProfile::Balanced).search_depth(&p, 1, None);

    let entry = tt.probe(p.fingerprint()).unwrap();
    assert_eq!(entry.bound, Bound::Exact);
    assert_eq!(entry.depth, 1);
    assert_eq!(entry.best_move.map(|m| m.to_string()), Some("e1e8".to_string()));
}

fn seed(tt: &TranspositionTable, p: &Position, depth: u8, score: Score, bound: Bound) {
    tt.store(
        p.fingerprint(),
        TtEntry {
            depth,
            score,
            bound,
            best_move: None,
        },
    );
}

#[test]
fn test_deep_exact_entry_returns_without_searching() {
    let tt = TranspositionTable::new();
    let p = Position::startpos();
    seed(&tt, &p, 5, 4242, Bound::Exact);

    let mut s = searcher(&tt, EvalProfile::Material);
    assert_eq!(s.negamax(&p, 2, 1, -INFINITY, INFINITY), 4242);
    assert_eq!(s.nodes(), 0);
}

#[test]
fn test_shallow_entry_is_ignored() {
    let tt = TranspositionTable::new();
    let p = Position::startpos();
    seed(&tt, &p, 1, 4242, Bound::Exact);

    let mut s = searcher(&tt, EvalProfile::Material);
    // Nothing can be won in two plies from the start
    assert_eq!(s.negamax(&p, 2, 1, -INFINITY, INFINITY), 0);
    assert!(s.nodes() > 0);

    let replaced = tt.probe(p.fingerprint()).unwrap();
    assert_eq!(replaced.depth, 2);
    assert_eq!(replaced.bound, Bound::Exact);
}

#[test]
fn test_lower_bound_above_window_cuts_off() {
    let tt = TranspositionTable::new();
    let p = Position::startpos();
    seed(&tt, &p, 5, 300, Bound::LowerBound);

    let mut s = searcher(&tt, EvalProfile::Material);
    assert_eq!(s.negamax(&p, 2, 1, -50, 50), 300);
    assert_eq!(s.nodes(), 0);
}

#[test]
fn test_upper_bound_below_window_cuts_off() {
    let tt = TranspositionTable::new();
    let p = Position::startpos();
    seed(&tt, &p, 5, -300, Bound::UpperBound);

    let mut s = searcher(&tt, EvalProfile::Material);
    assert_eq!(s.negamax(&p, 2, 1, -50, 50), -300);
    assert_eq!(s.nodes(), 0);
}

#[test]
fn test_bound_inside_window_only_narrows_it() {
    let tt = TranspositionTable::new();
    let p = Position::startpos();
    seed(&tt, &p, 5, -20, Bound::LowerBound);

    let mut s = searcher(&tt, EvalProfile::Material);
    // Window becomes (-20, 50); the real value 0 lies inside it
    assert_eq!(s.negamax(&p, 2, 1, -50, 50), 0);
    assert!(s.nodes() > 0);
}

#[test]
fn test_mate_entry_is_reanchored_on_probe() {
    let tt = TranspositionTable::new();
    let p = Position::startpos();
    // Mate two plies below the node that stored it
    seed(&tt, &p, 5, MATE - 2, Bound::Exact);

    let mut s = searcher(&tt, EvalProfile::Material);
    assert_eq!(s.negamax(&p, 2, 3, -INFINITY, INFINITY), MATE - 5);
}
