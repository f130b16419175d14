use super::*;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

fn play_all(pos: &mut Position, moves: &[&str]) {
    for coords in moves {
        let mv = pos
            .find_move(coords)
            .unwrap_or_else(|| panic!("{coords} should be legal in {}", pos.to_fen()));
        pos.play(mv).unwrap();
    }
}

#[test]
fn test_startpos_basics() {
    let pos = Position::startpos();
    assert_eq!(pos.legal_moves().len(), 20);
    assert_eq!(pos.legal_move_count(), 20);
    assert_eq!(pos.side_to_move(), Color::White);
    assert_eq!(pos.outcome(), Outcome::Ongoing);
    assert!(!pos.outcome().is_terminal());
    assert_eq!(pos.termination(), None);
    assert_eq!(pos.to_fen(), STARTPOS_FEN);
}

#[test]
fn test_piece_at() {
    let pos = Position::startpos();
    assert_eq!(
        pos.piece_at(sq("e1")),
        Some(Piece {
            color: Color::White,
            kind: PieceKind::King
        })
    );
    assert_eq!(
        pos.piece_at(sq("d8")),
        Some(Piece {
            color: Color::Black,
            kind: PieceKind::Queen
        })
    );
    assert_eq!(pos.piece_at(sq("e4")), None);
}

#[test]
fn test_from_fen_accepts_short_fen() {
    let pos = Position::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -").unwrap();
    assert_eq!(pos.legal_moves().len(), 14);
}

#[test]
fn test_from_fen_rejects_garbage() {
    let err = Position::from_fen("not a fen").unwrap_err();
    assert!(matches!(err, ChessError::InvalidFen { .. }));
}

#[test]
fn test_capture_tag() {
    let pos =
        Position::from_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2").unwrap();
    let mv = pos.find_move("e4d5").unwrap();
    assert!(mv.is_capture());
    assert!(!mv.is_en_passant());
    assert!(!pos.find_move("e4e5").unwrap().is_capture());
}

#[test]
fn test_en_passant_tag() {
    let pos =
        Position::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3").unwrap();
    let mv = pos.find_move("e5f6").unwrap();
    assert!(mv.is_en_passant());
    assert!(mv.is_capture());

    let captures = pos.captures();
    assert!(captures.contains(&mv));
    assert!(captures.iter().all(|m| m.is_capture()));
}

#[test]
fn test_castle_uses_king_destination() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let short = pos.find_move("e1g1").unwrap();
    assert!(short.is_castle());
    assert_eq!(short.to, sq("g1"));
    assert_eq!(short.to_string(), "e1g1");

    let long = pos.find_move("e1c1").unwrap();
    assert!(long.is_castle());

    let next = pos.apply(short).unwrap();
    assert_eq!(
        next.piece_at(sq("f1")).map(|p| p.kind),
        Some(PieceKind::Rook)
    );
    assert_eq!(
        next.piece_at(sq("g1")).map(|p| p.kind),
        Some(PieceKind::King)
    );
}

#[test]
fn test_check_tag() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
    assert!(pos.find_move("a1a8").unwrap().gives_check());
    assert!(!pos.find_move("a1a2").unwrap().gives_check());
}

#[test]
fn test_promotion_encoding() {
    let pos = Position::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
    let mv = pos.find_move("a7a8q").unwrap();
    assert_eq!(mv.promo, Some(PieceKind::Queen));
    assert_eq!(mv.to_string(), "a7a8q");
    assert!(pos.find_move("a7a8n").is_some());
}

#[test]
fn test_apply_leaves_original_untouched() {
    let pos = Position::startpos();
    let mv = pos.find_move("e2e4").unwrap();
    let next = pos.apply(mv).unwrap();

    assert_eq!(pos.to_fen(), STARTPOS_FEN);
    assert_eq!(next.side_to_move(), Color::Black);
    assert_ne!(pos.fingerprint(), next.fingerprint());
}

#[test]
fn test_apply_rejects_illegal_move() {
    let pos = Position::startpos();
    let mv = pos.find_move("e2e4").unwrap();
    let next = pos.apply(mv).unwrap();

    // The same move makes no sense with Black to move
    let err = next.apply(mv).unwrap_err();
    assert!(matches!(err, ChessError::IllegalMove { .. }));
}

#[test]
fn test_transpositions_share_fingerprint() {
    let mut a = Position::startpos();
    play_all(&mut a, &["g1f3", "g8f6", "b1c3"]);
    let mut b = Position::startpos();
    play_all(&mut b, &["b1c3", "g8f6", "g1f3"]);
    assert_eq!(a.fingerprint(), b.fingerprint());
}

#[test]
fn test_move_equality_ignores_tags() {
    let pos = Position::startpos();
    let mv = pos.find_move("e2e4").unwrap();
    let mut tagged = mv;
    tagged.tags.check = true;
    assert_eq!(mv, tagged);
}

#[test]
fn test_legal_move_count_matches_generation() {
    let pos = Position::from_fen(KIWIPETE).unwrap();
    assert_eq!(pos.legal_moves().len(), 48);
    assert_eq!(pos.legal_move_count(), 48);
}

#[test]
fn test_checkmate_outcome() {
    // Fool's mate: White is mated
    let pos = Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
        .unwrap();
    assert!(pos.in_check());
    assert!(pos.legal_moves().is_empty());
    assert_eq!(pos.termination(), Some(Termination::Checkmate));
    assert_eq!(pos.outcome(), Outcome::BlackWins);
    assert!(pos.outcome().is_terminal());
    assert_eq!(pos.outcome().winner(), Some(Color::Black));
}

#[test]
fn test_threefold_repetition() {
    let mut pos = Position::startpos();
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];

    play_all(&mut pos, &shuffle);
    assert!(!pos.is_threefold_repetition());

    play_all(&mut pos, &shuffle);
    assert!(pos.is_threefold_repetition());
    assert_eq!(pos.termination(), Some(Termination::ThreefoldRepetition));
    assert_eq!(pos.outcome(), Outcome::Draw);
}

#[test]
fn test_pawn_move_resets_repetition_history() {
    let mut pos = Position::startpos();
    play_all(&mut pos, &["g1f3", "g8f6", "f3g1", "f6g8", "e2e4"]);
    play_all(&mut pos, &["g8f6", "g1f3", "f6g8", "f3g1"]);
    assert!(!pos.is_threefold_repetition());
}
