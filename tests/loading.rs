use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use streak_board::config::{Config, DEFAULT_PLAYERS_SOURCE};
use streak_board::loader::{PlayerSource, load_players, spawn_loader};
use streak_board::player::parse_players_json;
use streak_board::state::{AppState, Delta, apply_delta};
use streak_board::streak::ResultClass;

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

#[test]
fn normalizes_numeric_strings() {
    let raw = r#"[{"name":"Alpha","goals":"3","motm":"1","cleanSheets":"0","streak":"W, L, W"}]"#;
    let players = parse_players_json(raw).expect("valid json");
    assert_eq!(players.len(), 1);
    let alpha = &players[0];
    assert_eq!(alpha.goals, 3.0);
    assert_eq!(alpha.motm, 1.0);
    assert_eq!(alpha.clean_sheets, 0.0);
    assert_eq!(alpha.photo, "");

    let summary = alpha.streak_summary();
    assert_eq!((summary.wins, summary.losses), (2, 1));
    assert_eq!(summary.latest, "W");
    assert_eq!(summary.class, ResultClass::Win);
}

#[test]
fn non_numeric_and_missing_stats_become_nan() {
    let players = load_players(
        &PlayerSource::File(fixture_path("players.json")),
        Duration::from_secs(1),
    )
    .expect("fixture should load");
    assert_eq!(players.len(), 4);

    let delta = &players[3];
    assert!(delta.goals.is_nan());
    assert!(delta.motm.is_nan());
    assert_eq!(delta.clean_sheets, 0.0);
    assert_eq!(players[1].goals, 5.0);
}

#[test]
fn loosely_typed_text_fields_still_load() {
    let raw = r#"[
        {"name":7,"photo":null,"goals":1,"motm":0,"cleanSheets":0,"streak":"W"},
        {"name":"Bravo","photo":"b.jpg","goals":2,"motm":1,"cleanSheets":0,"streak":true}
    ]"#;
    let players = parse_players_json(raw).expect("both records should load");
    assert_eq!(players.len(), 2);
    assert_eq!(players[0].name, "7");
    assert_eq!(players[0].photo, "");
    assert_eq!(players[1].name, "Bravo");
    assert_eq!(players[1].streak, "true");
    assert_eq!(players[1].streak_summary().class, ResultClass::Loss);
}

#[test]
fn rejects_non_array_document() {
    assert!(parse_players_json(r#"{"name":"Alpha"}"#).is_err());
    assert!(parse_players_json("not json").is_err());
}

#[test]
fn missing_file_error_names_the_path() {
    let err = load_players(
        &PlayerSource::File(fixture_path("no_such_players.json")),
        Duration::from_secs(1),
    )
    .expect_err("missing file should fail");
    assert!(format!("{err:#}").contains("no_such_players.json"));
}

#[test]
fn source_kind_follows_scheme() {
    assert_eq!(
        PlayerSource::parse("https://example.com/players.json"),
        PlayerSource::Url("https://example.com/players.json".to_string())
    );
    assert_eq!(
        PlayerSource::parse(" data/players.json "),
        PlayerSource::File(PathBuf::from("data/players.json"))
    );
}

#[test]
fn loader_thread_delivers_players() {
    let (tx, rx) = mpsc::channel();
    spawn_loader(
        PlayerSource::File(fixture_path("players.json")),
        Duration::from_secs(1),
        tx,
    );

    let mut state = AppState::new();
    for delta in rx.iter() {
        apply_delta(&mut state, delta);
    }
    assert!(!state.loading);
    assert_eq!(state.players.len(), 4);
    assert_eq!(state.visible.len(), 4);
    assert_eq!(
        state.logs.back().map(String::as_str),
        Some("[INFO] Loaded 4 players")
    );
}

#[test]
fn load_failure_leaves_empty_list_and_error_log() {
    let (tx, rx) = mpsc::channel();
    spawn_loader(
        PlayerSource::File(fixture_path("no_such_players.json")),
        Duration::from_secs(1),
        tx,
    );

    let mut state = AppState::new();
    let deltas: Vec<Delta> = rx.iter().collect();
    assert!(matches!(deltas.last(), Some(Delta::LoadFailed(_))));
    for delta in deltas {
        apply_delta(&mut state, delta);
    }
    assert!(!state.loading);
    assert!(state.players.is_empty());
    assert!(state.visible.is_empty());
    let last = state.logs.back().expect("error should be logged");
    assert!(last.starts_with("[ERROR] Error loading players:"));
}

#[test]
fn cli_argument_overrides_default_source() {
    let config = Config::from_env(Some(" squad.json ".to_string()));
    assert_eq!(config.players_source, "squad.json");
    assert_eq!(Config::default().players_source, DEFAULT_PLAYERS_SOURCE);
    assert_eq!(
        Config::default().modal_close_delay,
        Duration::from_millis(300)
    );
}

/// Serves one canned HTTP response on a loopback port and returns its URL.
fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        let response = format!(
            "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = stream.write_all(response.as_bytes());
    });
    format!("http://{addr}/players.json")
}

#[test]
fn loads_players_over_http() {
    let url = serve_once(
        "HTTP/1.1 200 OK",
        r#"[{"name":"Alpha","goals":"3","motm":"1","cleanSheets":"0","streak":"W, L, W"}]"#,
    );
    let source = PlayerSource::parse(&url);
    assert!(matches!(source, PlayerSource::Url(_)));

    let players = load_players(&source, Duration::from_secs(5)).expect("http load");
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].goals, 3.0);
}

#[test]
fn http_error_status_fails_the_load() {
    let url = serve_once("HTTP/1.1 404 Not Found", "missing");
    let err = load_players(&PlayerSource::parse(&url), Duration::from_secs(5))
        .expect_err("404 should fail");
    let msg = format!("{err:#}");
    assert!(msg.contains("http 404"), "{msg}");
    assert!(msg.contains("missing"), "{msg}");
}
