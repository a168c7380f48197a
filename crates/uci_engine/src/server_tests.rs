use super::*;
use std::io::Cursor;

fn exchange(server: &mut UciServer, script: &str) -> String {
    let mut out = Vec::new();
    server.run(Cursor::new(script.to_string()), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_handshake() {
    let mut server = UciServer::new(Tier::Greedy);
    let out = exchange(&mut server, "uci\nisready\n");
    assert!(out.contains("option name Tier type spin default 2 min 1 max 3"));
    assert!(out.contains("uciok\n"));
    assert!(out.ends_with("readyok\n"));
}

#[test]
fn test_go_answers_with_legal_move() {
    let mut server = UciServer::new(Tier::Minimax);
    let out = exchange(
        &mut server,
        "ucinewgame\nposition startpos moves e2e4 e7e5\ngo movetime 200\n",
    );
    let reply = out
        .lines()
        .find_map(|l| l.strip_prefix("bestmove "))
        .expect("bestmove line");
    assert!(chess_core::parse_uci_move(&server.pos, reply).is_ok());
}

#[test]
fn test_go_without_moves_reports_null_move() {
    let mut server = UciServer::new(Tier::Greedy);
    let out = exchange(&mut server, "position fen k7/2K5/1Q6/8/8/8/8/8 b - - 0 1\ngo\n");
    assert!(out.contains("bestmove 0000"));
}

#[test]
fn test_setoption_and_quit() {
    let mut server = UciServer::new(Tier::Greedy);
    let out = exchange(
        &mut server,
        "setoption name Depth value 9\nsetoption name Tier value 1\nquit\nisready\n",
    );
    assert_eq!(server.depth, MAX_DEPTH);
    assert_eq!(server.engine.tier(), Tier::Heuristic);
    assert!(out.is_empty(), "nothing after quit is processed");
}

#[test]
fn test_bad_position_keeps_serving() {
    let mut server = UciServer::new(Tier::Greedy);
    let out = exchange(&mut server, "position fen nonsense\nisready\n");
    assert_eq!(out, "readyok\n");
}

#[test]
fn test_bad_move_list_keeps_previous_position() {
    let mut server = UciServer::new(Tier::Greedy);
    exchange(&mut server, "position startpos moves e2e4\n");
    let before = server.pos.clone();
    exchange(&mut server, "position startpos moves d2d4 d2d4\n");
    assert_eq!(server.pos, before);
}
