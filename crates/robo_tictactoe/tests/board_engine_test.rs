//! Tests for the board engine's public operations.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use robo_tictactoe::{
    Board, MoveError, Player, Position, WIN_PATTERNS, check_draw, check_win, reset,
    select_computer_move,
};

fn board_with(human: &[usize], computer: &[usize]) -> Board {
    let mut board = Board::new();
    for &i in human {
        board = board
            .apply_move(Player::Human, Position::from_index(i).unwrap())
            .unwrap();
    }
    for &i in computer {
        board = board
            .apply_move(Player::Computer, Position::from_index(i).unwrap())
            .unwrap();
    }
    board
}

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(2022)
}

#[test]
fn test_is_occupied_tracks_placed_moves() {
    let board = board_with(&[0, 8], &[4]);
    for pos in Position::ALL {
        let expected = board.moves().any(|m| m.position() == pos);
        assert_eq!(board.is_occupied(pos), expected, "{pos}");
    }
}

#[test]
fn test_check_win_requires_full_pattern() {
    for pattern in WIN_PATTERNS {
        let cells: Vec<usize> = pattern.iter().map(|p| p.to_index()).collect();
        assert!(check_win(&board_with(&[], &cells), Player::Computer));
        assert!(!check_win(&board_with(&[], &cells[..2]), Player::Computer));
    }
}

#[test]
fn test_check_draw_only_on_full_board() {
    let mut board = Board::new();
    let order = [0, 1, 2, 4, 3, 5, 7, 6, 8];
    for (turn, &i) in order.iter().enumerate() {
        assert!(!check_draw(&board));
        let player = if turn % 2 == 0 {
            Player::Human
        } else {
            Player::Computer
        };
        board = board
            .apply_move(player, Position::from_index(i).unwrap())
            .unwrap();
    }
    assert!(check_draw(&board));
}

#[test]
fn test_win_preference() {
    let board = board_with(&[3, 4], &[0, 1]);
    assert_eq!(
        select_computer_move(&board, &mut rng()),
        Ok(Position::TopRight)
    );
}

#[test]
fn test_block_preference() {
    let board = board_with(&[0, 1], &[4]);
    assert_eq!(
        select_computer_move(&board, &mut rng()),
        Ok(Position::TopRight)
    );
}

#[test]
fn test_center_preference() {
    for i in [0, 1, 2, 3, 5, 6, 7, 8] {
        let board = board_with(&[i], &[]);
        assert_eq!(
            select_computer_move(&board, &mut rng()),
            Ok(Position::Center),
            "human at {i}"
        );
    }
}

#[test]
fn test_single_empty_cell_is_chosen() {
    // X O X / O O X / X X _ leaves only cell 8.
    let board = board_with(&[0, 2, 5, 6, 7], &[1, 3, 4]);
    assert_eq!(board.empty_cells(), vec![Position::BottomRight]);
    assert_eq!(
        select_computer_move(&board, &mut rng()),
        Ok(Position::BottomRight)
    );
}

#[test]
fn test_selection_never_returns_occupied_cell() {
    let mut rng = rng();
    let mut board = Board::new();
    let mut player = Player::Human;
    while !board.is_full() {
        let pos = select_computer_move(&board, &mut rng).unwrap();
        assert!(!board.is_occupied(pos));
        board = board.apply_move(player, pos).unwrap();
        player = player.opponent();
    }
    assert_eq!(
        select_computer_move(&board, &mut rng),
        Err(MoveError::NoAvailableCell)
    );
}

#[test]
fn test_reset_empties_board() {
    let board = reset();
    assert!(Position::ALL.iter().all(|p| !board.is_occupied(*p)));
}

#[test]
fn test_board_serializes_as_nine_slots() {
    let board = board_with(&[4], &[]);
    let json = serde_json::to_value(board).unwrap();
    let cells = json["cells"].as_array().unwrap();
    assert_eq!(cells.len(), 9);
    assert!(cells[0].is_null());
    assert_eq!(cells[4]["player"], "Human");
    assert_eq!(cells[4]["position"], "Center");
}
