use std::cmp::Ordering;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::config::DEFAULT_MODAL_CLOSE_MS;
use crate::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Goals,
    Motm,
    Wins,
    Losses,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [SortKey::Goals, SortKey::Motm, SortKey::Wins, SortKey::Losses];

    pub fn value(self, player: &Player) -> f64 {
        match self {
            SortKey::Goals => player.goals,
            SortKey::Motm => player.motm,
            SortKey::Wins => player.streak_summary().wins as f64,
            SortKey::Losses => player.streak_summary().losses as f64,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Goals => "GOALS",
            SortKey::Motm => "MOTM",
            SortKey::Wins => "WINS",
            SortKey::Losses => "LOSSES",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Browse,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    Hidden,
    Open,
    /// Exit animation; the panel is still drawn until the hide fires.
    Closing,
}

/// Detail panel with a deferred hide. Re-opening cancels a pending hide.
#[derive(Debug, Clone, Default)]
pub struct DetailModal {
    player: Option<Player>,
    shown: bool,
    hide_at: Option<Instant>,
}

impl DetailModal {
    pub fn open(&mut self, player: Player) {
        self.player = Some(player);
        self.shown = true;
        self.hide_at = None;
    }

    pub fn close(&mut self, now: Instant, delay: Duration) {
        if self.player.is_none() || !self.shown {
            return;
        }
        self.shown = false;
        self.hide_at = Some(now + delay);
    }

    /// Fires the pending hide once its deadline has passed. Returns true if
    /// the panel was hidden by this call.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.hide_at {
            Some(at) if now >= at => {
                self.player = None;
                self.hide_at = None;
                true
            }
            _ => false,
        }
    }

    pub fn phase(&self) -> ModalPhase {
        match (&self.player, self.shown) {
            (None, _) => ModalPhase::Hidden,
            (Some(_), true) => ModalPhase::Open,
            (Some(_), false) => ModalPhase::Closing,
        }
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetPlayers(Vec<Player>),
    LoadFailed(String),
    Log(String),
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Full collection as loaded. Never reordered or filtered in place.
    pub players: Vec<Player>,
    pub visible: Vec<Player>,
    pub query: String,
    pub sort: Option<SortKey>,
    pub focus: Focus,
    pub selected: usize,
    pub modal: DetailModal,
    pub close_delay: Duration,
    pub loading: bool,
    pub source: String,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            visible: Vec::new(),
            query: String::new(),
            sort: None,
            focus: Focus::Browse,
            selected: 0,
            modal: DetailModal::default(),
            close_delay: Duration::from_millis(DEFAULT_MODAL_CLOSE_MS),
            loading: true,
            source: String::new(),
            logs: VecDeque::new(),
            help_overlay: false,
        }
    }

    pub fn set_players(&mut self, players: Vec<Player>) {
        self.players = players;
        self.loading = false;
        self.refresh_visible();
    }

    /// Replaces the query and re-filters the full collection. Searching drops
    /// any active sort, so results come back in collection order.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.sort = None;
        self.selected = 0;
        self.refresh_visible();
    }

    pub fn push_query_char(&mut self, c: char) {
        let mut query = self.query.clone();
        query.push(c);
        self.set_query(query);
    }

    pub fn pop_query_char(&mut self) {
        let mut query = self.query.clone();
        if query.pop().is_some() {
            self.set_query(query);
        }
    }

    /// Sorts a copy of the full collection. Clears the search query.
    pub fn apply_sort(&mut self, key: SortKey) {
        self.sort = Some(key);
        self.query.clear();
        self.selected = 0;
        self.refresh_visible();
    }

    fn refresh_visible(&mut self) {
        self.visible = match self.sort {
            Some(key) => sort_players(&self.players, key),
            None => filter_players(&self.players, &self.query),
        };
        self.clamp_selected();
    }

    fn clamp_selected(&mut self) {
        if self.visible.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.visible.len() {
            self.selected = self.visible.len() - 1;
        }
    }

    pub fn select(&mut self, idx: usize) {
        if idx < self.visible.len() {
            self.selected = idx;
        }
    }

    pub fn select_next(&mut self) {
        self.move_selection(1);
    }

    pub fn select_prev(&mut self) {
        self.move_selection(-1);
    }

    pub fn move_selection(&mut self, step: isize) {
        if self.visible.is_empty() {
            return;
        }
        let last = self.visible.len() as isize - 1;
        let next = (self.selected as isize + step).clamp(0, last);
        self.selected = next as usize;
    }

    pub fn selected_player(&self) -> Option<&Player> {
        self.visible.get(self.selected)
    }

    pub fn open_detail(&mut self, idx: usize) {
        let Some(player) = self.visible.get(idx).cloned() else {
            return;
        };
        self.selected = idx;
        self.modal.open(player);
    }

    pub fn open_selected(&mut self) {
        self.open_detail(self.selected);
    }

    pub fn close_detail(&mut self, now: Instant) {
        self.modal.close(now, self.close_delay);
    }

    pub fn tick(&mut self, now: Instant) {
        self.modal.tick(now);
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetPlayers(players) => {
            let count = players.len();
            state.set_players(players);
            state.push_log(format!("[INFO] Loaded {count} players"));
        }
        Delta::LoadFailed(err) => {
            state.set_players(Vec::new());
            state.push_log(format!("[ERROR] Error loading players: {err}"));
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}

/// Case-insensitive substring match on name, in collection order.
pub fn filter_players(players: &[Player], query: &str) -> Vec<Player> {
    let needle = query.to_lowercase();
    players
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Stable descending sort on `key`; `NaN` values go last.
pub fn sort_players(players: &[Player], key: SortKey) -> Vec<Player> {
    let mut keyed: Vec<(f64, &Player)> = players.iter().map(|p| (key.value(p), p)).collect();
    keyed.sort_by(|a, b| cmp_desc_nan_last(a.0, b.0));
    keyed.into_iter().map(|(_, p)| p.clone()).collect()
}

fn cmp_desc_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
