//! Rules-engine behaviour through the public board API.

use hare_hounds::rules::MOVE_LIMIT;
use hare_hounds::{
    Animal, Board, Layout, MatchStatus, MoveError, MoveStatus, Placement, PlayerDescriptor,
    PositionId, Side,
};

fn hound_first() -> [PlayerDescriptor; 2] {
    [
        PlayerDescriptor::new("Hound player", "hound-id", "1"),
        PlayerDescriptor::new("Hare player", "hare-id", "2"),
    ]
}

fn hare_first() -> [PlayerDescriptor; 2] {
    [
        PlayerDescriptor::new("Hare player", "hare-id", "2"),
        PlayerDescriptor::new("Hound player", "hound-id", "1"),
    ]
}

fn custom(hare: PositionId, hounds: [PositionId; 3]) -> Board {
    Board::with_placement(Layout::default(), Placement::new(hare, hounds).expect("valid placement"))
}

/// Hounds shuffle in the left column, the hare shuffles on the right.
/// Neither side can win from these positions.
const SHUFFLE: [(PositionId, PositionId); 4] = [
    (PositionId::BottomLeft, PositionId::MiddleLeft),
    (PositionId::OuterRight, PositionId::MiddleRight),
    (PositionId::MiddleLeft, PositionId::BottomLeft),
    (PositionId::MiddleRight, PositionId::OuterRight),
];

fn side_to_move(board: &Board) -> Side {
    if board.is_local_player_turn() {
        Side::Local
    } else {
        Side::Remote
    }
}

fn play_shuffle(board: &mut Board, count: usize) {
    for (from, to) in SHUFFLE.iter().cycle().take(count) {
        let side = side_to_move(board);
        board
            .move_piece(*from, *to, side)
            .unwrap_or_else(|e| panic!("{from} -> {to} should be legal: {e}"));
    }
}

#[test]
fn test_adjacency_is_symmetric_and_irreflexive() {
    let board = Board::new();
    for a in board.positions() {
        assert!(!a.is_adjacent_to(a.id()), "{} neighbours itself", a.id());
        for b in board.positions() {
            assert_eq!(
                a.is_adjacent_to(b.id()),
                b.is_adjacent_to(a.id()),
                "asymmetric edge {} / {}",
                a.id(),
                b.id()
            );
        }
    }
}

#[test]
fn test_adjacency_table() {
    use PositionId::*;

    let board = Board::new();
    let neighbours = |id: PositionId| {
        let mut n = board.position(id).adjacent().to_vec();
        n.sort();
        n
    };

    assert_eq!(neighbours(OuterLeft), vec![TopLeft, MiddleLeft, BottomLeft]);
    assert_eq!(neighbours(OuterRight), vec![TopRight, MiddleRight, BottomRight]);
    assert_eq!(neighbours(Top), vec![TopLeft, Middle, TopRight]);
    assert_eq!(neighbours(Bottom), vec![BottomLeft, Middle, BottomRight]);
    assert_eq!(neighbours(MiddleLeft), vec![OuterLeft, TopLeft, BottomLeft, Middle]);
    assert_eq!(neighbours(MiddleRight), vec![Middle, TopRight, BottomRight, OuterRight]);
    assert_eq!(
        neighbours(Middle),
        vec![TopLeft, MiddleLeft, BottomLeft, Top, Bottom, TopRight, MiddleRight, BottomRight]
    );
    assert_eq!(board.positions().len(), PositionId::COUNT);
}

#[test]
fn test_end_to_end_opening() {
    let mut board = Board::new();
    board.start_match(&hound_first()).unwrap();

    // Not an edge.
    assert!(!board.is_valid_move(PositionId::OuterLeft, Some(PositionId::Middle)));
    assert!(matches!(
        board.move_piece(PositionId::OuterLeft, PositionId::Middle, Side::Local),
        Err(MoveError::NotAdjacent { .. })
    ));

    // Another hound is already there.
    assert!(!board.is_valid_move(PositionId::OuterLeft, Some(PositionId::TopLeft)));
    assert_eq!(
        board.move_piece(PositionId::OuterLeft, PositionId::TopLeft, Side::Local),
        Err(MoveError::Occupied(PositionId::TopLeft))
    );
    assert_eq!(board.move_counter(), 0);

    assert!(board.is_valid_move(PositionId::BottomLeft, Some(PositionId::MiddleLeft)));
    let payload = board
        .move_piece(PositionId::BottomLeft, PositionId::MiddleLeft, Side::Local)
        .unwrap()
        .unwrap();

    assert_eq!(payload.match_status, MoveStatus::Next);
    assert_eq!(board.move_counter(), 1);
    assert_eq!(board.status(), MatchStatus::RemoteTurn);
    assert!(board.remote_player().unwrap().has_turn());
    assert!(!board.local_player().unwrap().has_turn());
}

#[test]
fn test_hound_backward_move_rejected_regardless_of_occupancy() {
    let board = custom(
        PositionId::OuterRight,
        [PositionId::Middle, PositionId::TopLeft, PositionId::BottomRight],
    );
    // middle (x = 640) to middle-left (x = 440) is a retreat.
    assert_eq!(
        board.validate_move(PositionId::Middle, Some(PositionId::MiddleLeft)),
        Err(MoveError::HoundRetreat {
            from: PositionId::Middle,
            to: PositionId::MiddleLeft,
        })
    );
    assert!(!board.is_valid_move(PositionId::Middle, Some(PositionId::BottomLeft)));
}

#[test]
fn test_turn_alternation() {
    for n in 0..12 {
        let mut board = Board::new();
        board.start_match(&hound_first()).unwrap();
        play_shuffle(&mut board, n);

        let expected = if n % 2 == 0 {
            MatchStatus::LocalTurn
        } else {
            MatchStatus::RemoteTurn
        };
        assert_eq!(board.status(), expected, "after {n} moves");
        assert_eq!(board.move_counter(), n as u32);
        assert_eq!(board.history().len(), n);
    }
}

#[test]
fn test_hare_wins_when_hounds_fall_behind() {
    let mut board = custom(
        PositionId::MiddleLeft,
        [PositionId::OuterLeft, PositionId::Top, PositionId::Bottom],
    );
    board.start_match(&hound_first()).unwrap();
    assert_eq!(board.evaluate_winner(), None);

    let payload = board
        .move_piece(PositionId::OuterLeft, PositionId::TopLeft, Side::Local)
        .unwrap()
        .unwrap();

    assert_eq!(payload.winner, Some(Animal::Hare));
    assert_eq!(payload.match_status, MoveStatus::Finished);
    assert_eq!(board.status(), MatchStatus::Finished);
    assert_eq!(board.winner(), Some(Animal::Hare));
    assert!(board.remote_player().unwrap().is_winner());
    assert!(!board.is_local_player_winner());
}

#[test]
fn test_hounds_win_by_encirclement() {
    let mut board = custom(
        PositionId::OuterRight,
        [PositionId::TopRight, PositionId::Middle, PositionId::BottomRight],
    );
    board.start_match(&hound_first()).unwrap();

    let payload = board
        .move_piece(PositionId::Middle, PositionId::MiddleRight, Side::Local)
        .unwrap()
        .unwrap();

    assert_eq!(payload.winner, Some(Animal::Hound));
    assert_eq!(board.status(), MatchStatus::Finished);
    assert!(board.is_local_player_winner());
    assert!(!board.remote_player().unwrap().is_winner());
}

#[test]
fn test_move_limit_gives_hare_the_win() {
    let mut board = Board::new();
    board.start_match(&hound_first()).unwrap();

    play_shuffle(&mut board, MOVE_LIMIT as usize - 1);
    assert!(board.is_match_in_progress());
    assert_eq!(board.evaluate_winner(), None);

    play_shuffle_from(&mut board, MOVE_LIMIT as usize - 1, 1);
    assert_eq!(board.move_counter(), MOVE_LIMIT);
    assert_eq!(board.status(), MatchStatus::Finished);
    assert_eq!(board.winner(), Some(Animal::Hare));
}

/// Continues the shuffle cycle at `offset`.
fn play_shuffle_from(board: &mut Board, offset: usize, count: usize) {
    for (from, to) in SHUFFLE.iter().cycle().skip(offset).take(count) {
        let side = side_to_move(board);
        board.move_piece(*from, *to, side).unwrap();
    }
}

#[test]
fn test_reset_ignored_mid_match() {
    let mut board = Board::new();
    board.start_match(&hound_first()).unwrap();
    play_shuffle(&mut board, 1);

    let before: Vec<_> = board.positions().iter().map(|p| p.piece()).collect();
    assert!(!board.reset());

    let after: Vec<_> = board.positions().iter().map(|p| p.piece()).collect();
    assert_eq!(before, after);
    assert_eq!(board.move_counter(), 1);
    assert_eq!(board.status(), MatchStatus::RemoteTurn);
}

#[test]
fn test_reset_after_finish_restores_placement() {
    let mut board = Board::new();
    board.start_match(&hound_first()).unwrap();
    play_shuffle(&mut board, MOVE_LIMIT as usize);
    assert_eq!(board.status(), MatchStatus::Finished);

    assert!(board.reset());
    assert_eq!(board.status(), MatchStatus::NotStarted);
    assert_eq!(board.move_counter(), 0);
    assert!(board.history().is_empty());
    assert_eq!(board.hare().position(), PositionId::OuterRight);
    assert!(board.position(PositionId::BottomLeft).is_occupied());
    assert!(!board.position(PositionId::MiddleLeft).is_occupied());
    assert!(!board.position(PositionId::MiddleRight).is_occupied());
}

#[test]
fn test_reset_after_abandon_and_restart() {
    let mut board = Board::new();
    board.start_match(&hound_first()).unwrap();
    play_shuffle(&mut board, 3);
    board.receive_withdrawal_notification();
    assert_eq!(board.status(), MatchStatus::Abandoned);

    assert!(board.reset());
    assert_eq!(board.move_counter(), 0);

    // A new match may start with the roles swapped.
    assert_eq!(board.start_match(&hare_first()), Ok(MatchStatus::RemoteTurn));
    assert_eq!(board.local_player().unwrap().animal(), Animal::Hare);
    assert!(!board.is_local_player_winner());
}

#[test]
fn test_start_after_finish_resets_first() {
    let mut board = Board::new();
    board.start_match(&hound_first()).unwrap();
    play_shuffle(&mut board, MOVE_LIMIT as usize);

    board.start_match(&hound_first()).unwrap();
    assert_eq!(board.move_counter(), 0);
    assert_eq!(board.winner(), None);
    assert_eq!(board.hare().position(), PositionId::OuterRight);
}

#[test]
fn test_remote_replay_keeps_clients_in_sync() {
    let mut hounds_client = Board::new();
    let mut hare_client = Board::new();
    hounds_client.start_match(&hound_first()).unwrap();
    hare_client.start_match(&hare_first()).unwrap();

    let moves = [
        (PositionId::BottomLeft, PositionId::Middle),
        (PositionId::OuterRight, PositionId::BottomRight),
        (PositionId::TopLeft, PositionId::Top),
        (PositionId::BottomRight, PositionId::Bottom),
    ];

    for (i, (from, to)) in moves.into_iter().enumerate() {
        let (mover, watcher) = if i % 2 == 0 {
            (&mut hounds_client, &mut hare_client)
        } else {
            (&mut hare_client, &mut hounds_client)
        };
        let payload = mover.move_piece(from, to, Side::Local).unwrap().unwrap();
        let json = payload.to_json().unwrap();
        let received = hare_hounds::MoveResult::from_json(&json).unwrap();
        watcher.apply_remote_move(&received).unwrap();
    }

    let occupancy = |board: &Board| -> Vec<_> {
        board
            .positions()
            .iter()
            .map(|p| board.occupant(p.id()).map(|piece| piece.animal()))
            .collect()
    };
    assert_eq!(occupancy(&hounds_client), occupancy(&hare_client));
    assert_eq!(hounds_client.move_counter(), 4);
    assert_eq!(hare_client.move_counter(), 4);
    assert!(hounds_client.is_local_player_turn());
    assert!(!hare_client.is_local_player_turn());
}
