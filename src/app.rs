use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use crate::config::Config;
use crate::state::{AppState, Focus, ModalPhase, SortKey};
use crate::view::{Hit, ViewLayout};

/// Event dispatch on top of `AppState`. `layout` is the one from the last
/// drawn frame and is what mouse clicks are resolved against.
pub struct App {
    pub state: AppState,
    pub layout: ViewLayout,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let mut state = AppState::new();
        state.close_delay = config.modal_close_delay;
        state.source = config.players_source.clone();
        Self {
            state,
            layout: ViewLayout::default(),
            should_quit: false,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if self.state.focus == Focus::Search {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => self.state.focus = Focus::Browse,
                KeyCode::Backspace => self.state.pop_query_char(),
                KeyCode::Char(c) => self.state.push_query_char(c),
                _ => {}
            }
            return;
        }

        if self.state.help_overlay {
            match key.code {
                KeyCode::Char('?') | KeyCode::Esc => self.state.help_overlay = false,
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            }
            return;
        }

        if self.state.modal.phase() == ModalPhase::Open {
            match key.code {
                KeyCode::Esc | KeyCode::Char('x') | KeyCode::Enter => {
                    self.state.close_detail(Instant::now())
                }
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            }
            return;
        }

        let columns = self.layout.columns() as isize;
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') => self.state.focus = Focus::Search,
            KeyCode::Char('1') => self.state.apply_sort(SortKey::Goals),
            KeyCode::Char('2') => self.state.apply_sort(SortKey::Motm),
            KeyCode::Char('3') => self.state.apply_sort(SortKey::Wins),
            KeyCode::Char('4') => self.state.apply_sort(SortKey::Losses),
            KeyCode::Right | KeyCode::Char('l') => self.state.select_next(),
            KeyCode::Left | KeyCode::Char('h') => self.state.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.state.move_selection(columns),
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection(-columns),
            KeyCode::Enter => self.state.open_selected(),
            KeyCode::Esc | KeyCode::Char('x') => self.state.close_detail(Instant::now()),
            KeyCode::Char('?') => self.state.help_overlay = true,
            _ => {}
        }
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let Some(hit) = self.layout.hit(&self.state, mouse.column, mouse.row) else {
            return;
        };
        match hit {
            Hit::Help => self.state.help_overlay = false,
            Hit::Search => self.state.focus = Focus::Search,
            Hit::Sort(key) => {
                self.state.focus = Focus::Browse;
                self.state.apply_sort(key);
            }
            Hit::Card(idx) => {
                self.state.focus = Focus::Browse;
                self.state.open_detail(idx);
            }
            Hit::ModalClose | Hit::Backdrop => self.state.close_detail(Instant::now()),
            Hit::ModalBody => {}
        }
    }
}
