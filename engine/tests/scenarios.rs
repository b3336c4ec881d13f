use c4_engine::ai::{score_position, ScoreMode};
use c4_engine::rules::{detect_win, playable_columns};
use c4_engine::{
    BattleMode, Board, Difficulty, Easy, GameError, GameOutcome, GameSession, MemoryStore, Medium,
    Minimax, Piece, SearchConfig, Snapshot, Strategy, Turn, COLS, ROWS,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn board_with(cells: &[(usize, usize, Piece)]) -> Board {
    let mut board = Board::create_empty();
    for &(row, col, piece) in cells {
        board.place(row, col, piece);
    }
    board
}

#[test]
fn horizontal_four_on_the_bottom_row_wins() {
    let mut board = Board::create_empty();
    for col in 1..=4 {
        assert_eq!(board.drop_piece(col, Piece::Player1).unwrap(), 0);
    }
    assert!(detect_win(&board, Piece::Player1));
    assert!(!detect_win(&board, Piece::Player2));
}

#[test]
fn column_accepts_exactly_six_pieces() {
    let mut board = Board::create_empty();
    for expected_row in 0..ROWS {
        assert_eq!(board.drop_piece(0, Piece::Player1).unwrap(), expected_row);
    }
    let err = board.drop_piece(0, Piece::Player1).unwrap_err();
    assert!(matches!(err, GameError::ColumnFull { column: 0 }));
    assert_eq!(err.to_string(), "column 0 is full");
}

#[test]
fn easy_with_one_open_column_always_plays_it() {
    let mut board = Board::create_empty();
    for col in (0..COLS).filter(|&c| c != 3) {
        for row in 0..ROWS {
            let piece = if (row + col) % 2 == 0 {
                Piece::Player1
            } else {
                Piece::Player2
            };
            board.place(row, col, piece);
        }
    }
    assert_eq!(playable_columns(&board), vec![3]);

    for seed in 0..50 {
        let mut easy = Easy::with_rng(StdRng::seed_from_u64(seed));
        assert_eq!(easy.choose_column(&board).unwrap(), 3);
    }
}

#[test]
fn medium_completes_its_own_four() {
    let board = board_with(&[
        (0, 0, Piece::Player2),
        (0, 1, Piece::Player2),
        (0, 2, Piece::Player2),
        (1, 0, Piece::Player1),
        (1, 1, Piece::Player1),
        (1, 2, Piece::Player1),
    ]);

    let mut winning = board.clone();
    winning.drop_piece(3, Piece::Player2).unwrap();
    assert!(score_position(&winning, Piece::Player2, ScoreMode::Medium) >= 10_000);

    let mut medium = Medium::with_rng(StdRng::seed_from_u64(4));
    assert_eq!(medium.choose_column(&board).unwrap(), 3);
}

#[test]
fn hard_blocks_an_open_three() {
    let board = board_with(&[
        (0, 0, Piece::Player1),
        (0, 1, Piece::Player1),
        (0, 2, Piece::Player1),
        (1, 0, Piece::Player2),
        (1, 1, Piece::Player2),
    ]);
    for pruning in [false, true] {
        let config = SearchConfig { depth: 3, pruning };
        let mut hard = Minimax::with_rng(config, StdRng::seed_from_u64(8)).unwrap();
        assert_eq!(hard.choose_column(&board).unwrap(), 3);
    }
}

#[test]
fn hard_blocks_the_threat_on_the_right_edge() {
    let board = board_with(&[
        (0, 4, Piece::Player1),
        (0, 5, Piece::Player1),
        (0, 6, Piece::Player1),
        (0, 0, Piece::Player2),
    ]);
    let mut hard = Minimax::with_rng(SearchConfig::default(), StdRng::seed_from_u64(2)).unwrap();
    assert_eq!(hard.choose_column(&board).unwrap(), 3);
}

#[test]
fn snapshot_round_trips_through_json() {
    let mut session = GameSession::new(
        BattleMode::PlayerVsComputer,
        Some(Difficulty::Hard),
        MemoryStore::new(),
    )
    .unwrap()
    .with_seed(99);
    session.play(3).unwrap();
    session.play_ai_turn().unwrap();
    session.play(2).unwrap();

    let snapshot = session.snapshot();
    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: Snapshot = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, snapshot);
    for row in 0..ROWS {
        for col in 0..COLS {
            assert_eq!(restored.board.cell(row, col), snapshot.board.cell(row, col));
        }
    }
    assert_eq!(restored.turn, Turn::ComputerAI);
    assert_eq!(restored.battle_mode, BattleMode::PlayerVsComputer);
    assert_eq!(restored.difficulty, Some(Difficulty::Hard));
}

#[test]
fn full_game_against_hard_reaches_an_end() {
    let mut session = GameSession::new(
        BattleMode::PlayerVsComputer,
        Some(Difficulty::Hard),
        MemoryStore::new(),
    )
    .unwrap()
    .with_seed(5);
    let mut human = Easy::with_rng(StdRng::seed_from_u64(6));

    let mut moves = 0;
    while !session.outcome().is_over() {
        if session.turn() == Turn::Player1 {
            let col = human.choose_column(session.board()).unwrap();
            session.play(col).unwrap();
        } else {
            session.play_ai_turn().unwrap();
        }
        moves += 1;
        assert!(moves <= ROWS * COLS);
    }
    assert!(matches!(
        session.outcome(),
        GameOutcome::Win(_) | GameOutcome::Draw
    ));
    assert_eq!(session.store().saves(), moves + 1);
}
