use baduk::{Board, Cell, DecodeError, GoError, MAX_SIZE, MIN_SIZE, Score, Stone};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn play(board: &mut Board, moves: &[((u8, u8), Stone)]) {
    for &(point, stone) in moves {
        board.place(point, stone).unwrap();
    }
}

/// Every chain left on the board has at least one liberty.
fn assert_all_chains_breathe(board: &Board) -> Result<(), TestCaseError> {
    let size = board.size();
    for y in 0..size {
        for x in 0..size {
            if board.stone_at((x, y)).is_some() {
                prop_assert!(
                    !board.liberties((x, y)).is_empty(),
                    "chain at ({}, {}) has no liberties:\n{}",
                    x,
                    y,
                    board
                );
            }
        }
    }
    Ok(())
}

#[test]
fn empty_board_round_trips_for_all_sizes() {
    for size in MIN_SIZE..=MAX_SIZE {
        let board = Board::new(size).unwrap();
        let decoded = Board::decode(&board.encode()).unwrap();
        assert_eq!(decoded, board);
        assert_eq!(decoded.size(), size);
    }
}

#[test]
fn empty_board_scores_nothing() {
    assert_eq!(Board::new(19).unwrap().score(), Score { black: 0, white: 0 });
}

#[test]
fn single_black_stone_takes_the_board() {
    let mut board = Board::new(4).unwrap();
    board.place_black((0, 0)).unwrap();
    let score = board.score();
    assert_eq!(score, Score { black: 16, white: 0 });
    assert_eq!(score.to_string(), "Black wins, by 16");
}

#[test]
fn surrounded_stone_is_captured_in_encoded_state() {
    init_tracing();
    let mut board = Board::new(5).unwrap();
    play(
        &mut board,
        &[
            ((2, 2), Stone::White),
            ((2, 1), Stone::Black),
            ((1, 2), Stone::Black),
            ((3, 2), Stone::Black),
        ],
    );
    let report = board.place_black((2, 3)).unwrap();
    assert_eq!(report.captured, vec![(2, 2)]);
    assert_eq!(report.stone, Stone::Black);

    let decoded = Board::decode(&board.encode()).unwrap();
    assert_eq!(decoded.get((2, 2)), Ok(Cell::Empty));
    assert_eq!(decoded.stone_count(Stone::White), 0);
    assert_eq!(decoded.stone_count(Stone::Black), 4);
}

#[test]
fn suicide_leaves_encoded_state_identical() {
    init_tracing();
    let mut board = Board::new(5).unwrap();
    play(
        &mut board,
        &[
            ((2, 1), Stone::Black),
            ((1, 2), Stone::Black),
            ((3, 2), Stone::Black),
            ((2, 3), Stone::Black),
        ],
    );
    let before = board.encode();
    assert_eq!(
        board.place_white((2, 2)),
        Err(GoError::Suicide { x: 2, y: 2 })
    );
    assert_eq!(board.encode(), before);
}

#[test]
fn edge_capture_of_a_larger_chain() {
    let mut board = Board::new(6).unwrap();
    play(
        &mut board,
        &[
            ((0, 0), Stone::White),
            ((1, 0), Stone::White),
            ((2, 0), Stone::White),
            ((0, 1), Stone::Black),
            ((1, 1), Stone::Black),
            ((2, 1), Stone::Black),
        ],
    );
    let mut report = board.place_black((3, 0)).unwrap();
    report.captured.sort();
    assert_eq!(report.captured, vec![(0, 0), (1, 0), (2, 0)]);
    assert_eq!(board.score(), Score { black: 36, white: 0 });
}

#[test]
fn contested_region_scores_for_neither() {
    let mut board = Board::new(4).unwrap();
    play(
        &mut board,
        &[((0, 0), Stone::Black), ((3, 3), Stone::White)],
    );
    let score = board.score();
    assert_eq!(score, Score { black: 1, white: 1 });
    assert_eq!(score.result(), "Draw");
}

#[test]
fn reads_boards_written_by_other_encoders() {
    // Raw deflate at level 9 with the [2, 1, 0] dictionary, from zlib.
    let mut expected = Board::new(4).unwrap();
    play(
        &mut expected,
        &[((0, 0), Stone::Black), ((1, 1), Stone::White)],
    );
    assert_eq!(Board::decode("BGNiAAJGBjgAAA==").unwrap(), expected);
    assert_eq!(expected.encode(), "BGNiAAJGBjgAAA==");
    assert_eq!(Board::new(19).unwrap().encode(), "ExsFdAIA");
}

#[test]
fn decode_failure_is_typed() {
    assert_eq!(Board::decode(""), Err(DecodeError::MissingSize));
    assert!("%%%".parse::<Board>().is_err());
}

#[test]
fn text_rendering_shows_rows() {
    let mut board = Board::new(4).unwrap();
    play(
        &mut board,
        &[((1, 1), Stone::Black), ((2, 1), Stone::White)],
    );
    assert_eq!(board.to_string(), "++++\n+BW+\n++++\n++++\n");
}

fn arb_attempts() -> impl Strategy<Value = (u8, Vec<(u8, u8, bool)>)> {
    (MIN_SIZE..=9u8).prop_flat_map(|size| {
        (
            Just(size),
            prop::collection::vec((0..size + 1, 0..size + 1, any::<bool>()), 0..120),
        )
    })
}

proptest! {
    #[test]
    fn failed_moves_change_nothing((size, attempts) in arb_attempts()) {
        let mut board = Board::new(size).unwrap();
        for (x, y, black) in attempts {
            let stone = if black { Stone::Black } else { Stone::White };
            let before = board.clone();
            match board.place((x, y), stone) {
                Ok(report) => {
                    prop_assert_eq!(board.stone_at((x, y)), Some(stone));
                    for p in report.captured {
                        prop_assert_eq!(board.get(p), Ok(Cell::Empty));
                        prop_assert_eq!(before.stone_at(p), Some(stone.opp()));
                    }
                }
                Err(_) => prop_assert_eq!(&board, &before),
            }
        }
    }

    #[test]
    fn reachable_boards_round_trip((size, attempts) in arb_attempts()) {
        let mut board = Board::new(size).unwrap();
        for (x, y, black) in attempts {
            let stone = if black { Stone::Black } else { Stone::White };
            if board.place((x, y), stone).is_ok() {
                assert_all_chains_breathe(&board)?;
            }
            let decoded = Board::decode(&board.encode()).unwrap();
            prop_assert_eq!(&decoded, &board);
        }
    }

    #[test]
    fn area_never_exceeds_the_board((size, attempts) in arb_attempts()) {
        let mut board = Board::new(size).unwrap();
        for (x, y, black) in attempts {
            let stone = if black { Stone::Black } else { Stone::White };
            let _ = board.place((x, y), stone);
        }
        let before = board.clone();
        let score = board.score();
        prop_assert!(score.black + score.white <= size as u32 * size as u32);
        prop_assert!(score.black >= board.stone_count(Stone::Black));
        prop_assert!(score.white >= board.stone_count(Stone::White));
        prop_assert_eq!(board, before);
    }
}
