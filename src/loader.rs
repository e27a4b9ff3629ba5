use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::header::USER_AGENT;

use crate::http_client::http_client;
use crate::player::{Player, parse_players_json};
use crate::state::Delta;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerSource {
    File(PathBuf),
    Url(String),
}

impl PlayerSource {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            PlayerSource::Url(trimmed.to_string())
        } else {
            PlayerSource::File(PathBuf::from(trimmed))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            PlayerSource::File(path) => path.display().to_string(),
            PlayerSource::Url(url) => url.clone(),
        }
    }
}

pub fn load_players(source: &PlayerSource, timeout: Duration) -> Result<Vec<Player>> {
    let raw = match source {
        PlayerSource::File(path) => fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?,
        PlayerSource::Url(url) => fetch_text(url, timeout)?,
    };
    parse_players_json(&raw)
}

fn fetch_text(url: &str, timeout: Duration) -> Result<String> {
    let client = http_client(timeout)?;
    let resp = client
        .get(url)
        .header(USER_AGENT, "streak_board")
        .send()
        .with_context(|| format!("request failed: {url}"))?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        let snippet: String = body.chars().take(120).collect();
        return Err(anyhow!("http {}: {}", status, snippet));
    }
    Ok(body)
}

/// Loads once on a worker thread and reports back through `tx`.
pub fn spawn_loader(source: PlayerSource, timeout: Duration, tx: Sender<Delta>) {
    thread::spawn(move || {
        let _ = tx.send(Delta::Log(format!(
            "[INFO] Loading players from {}",
            source.describe()
        )));
        let delta = match load_players(&source, timeout) {
            Ok(players) => Delta::SetPlayers(players),
            Err(err) => Delta::LoadFailed(format!("{err:#}")),
        };
        let _ = tx.send(delta);
    });
}
