use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::player::{Player, format_stat};
use crate::state::{AppState, Focus, ModalPhase, SortKey};
use crate::streak::ResultClass;

pub const PLACEHOLDER: &str = "No players found.";
pub const CARD_WIDTH: u16 = 30;
pub const CARD_HEIGHT: u16 = 10;
const SORT_BUTTON_WIDTH: u16 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Search,
    Sort(SortKey),
    Card(usize),
    ModalClose,
    ModalBody,
    Backdrop,
    /// Any click while the help overlay is up.
    Help,
}

/// Screen rectangles for every interactive element of one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewLayout {
    pub header: Rect,
    pub search: Rect,
    pub sort_buttons: Vec<(SortKey, Rect)>,
    pub list: Rect,
    pub footer: Rect,
    pub cards: Vec<(usize, Rect)>,
    pub modal: Option<Rect>,
    pub modal_close: Option<Rect>,
}

impl ViewLayout {
    pub fn new(area: Rect, state: &AppState) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(3),
            ])
            .split(area);

        let toolbar = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(16),
                Constraint::Length(SORT_BUTTON_WIDTH),
                Constraint::Length(SORT_BUTTON_WIDTH),
                Constraint::Length(SORT_BUTTON_WIDTH),
                Constraint::Length(SORT_BUTTON_WIDTH),
            ])
            .split(rows[1]);

        let sort_buttons = SortKey::ALL
            .iter()
            .enumerate()
            .map(|(i, key)| (*key, toolbar[i + 1]))
            .collect();

        let cards = card_slots(rows[2], state.visible.len(), state.selected);

        let (modal, modal_close) = if state.modal.phase() == ModalPhase::Hidden {
            (None, None)
        } else {
            let panel = centered_rect(60, 70, area);
            (Some(panel), Some(close_control_rect(panel)))
        };

        Self {
            header: rows[0],
            search: toolbar[0],
            sort_buttons,
            list: rows[2],
            footer: rows[3],
            cards,
            modal,
            modal_close,
        }
    }

    /// Resolves a click. The help overlay and an open panel capture every
    /// click; a closing panel lets clicks through to the cards underneath.
    pub fn hit(&self, state: &AppState, x: u16, y: u16) -> Option<Hit> {
        if state.help_overlay {
            return Some(Hit::Help);
        }
        if state.modal.phase() == ModalPhase::Open {
            if self.modal_close.is_some_and(|r| contains(r, x, y)) {
                return Some(Hit::ModalClose);
            }
            if self.modal.is_some_and(|r| contains(r, x, y)) {
                return Some(Hit::ModalBody);
            }
            return Some(Hit::Backdrop);
        }
        if contains(self.search, x, y) {
            return Some(Hit::Search);
        }
        if let Some((key, _)) = self.sort_buttons.iter().find(|(_, r)| contains(*r, x, y)) {
            return Some(Hit::Sort(*key));
        }
        self.cards
            .iter()
            .find(|(_, r)| contains(*r, x, y))
            .map(|(idx, _)| Hit::Card(*idx))
    }

    pub fn columns(&self) -> usize {
        grid_columns(self.list.width)
    }
}

fn contains(r: Rect, x: u16, y: u16) -> bool {
    x >= r.x && x < r.x.saturating_add(r.width) && y >= r.y && y < r.y.saturating_add(r.height)
}

pub fn grid_columns(width: u16) -> usize {
    ((width / CARD_WIDTH) as usize).max(1)
}

pub fn card_slots(list: Rect, total: usize, selected: usize) -> Vec<(usize, Rect)> {
    if total == 0 || list.height < CARD_HEIGHT || list.width == 0 {
        return Vec::new();
    }
    let columns = grid_columns(list.width);
    let card_width = list.width / columns as u16;
    let total_rows = total.div_ceil(columns);
    let visible_rows = (list.height / CARD_HEIGHT) as usize;
    let (start, end) = visible_range(selected / columns, total_rows, visible_rows);

    let mut slots = Vec::new();
    for (i, row) in (start..end).enumerate() {
        for col in 0..columns {
            let idx = row * columns + col;
            if idx >= total {
                break;
            }
            slots.push((
                idx,
                Rect {
                    x: list.x + col as u16 * card_width,
                    y: list.y + i as u16 * CARD_HEIGHT,
                    width: card_width,
                    height: CARD_HEIGHT,
                },
            ));
        }
    }
    slots
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn close_control_rect(panel: Rect) -> Rect {
    Rect {
        x: panel.x + panel.width.saturating_sub(5),
        y: panel.y,
        width: 3.min(panel.width),
        height: 1.min(panel.height),
    }
}

pub fn render(frame: &mut Frame, state: &AppState) -> ViewLayout {
    let layout = ViewLayout::new(frame.size(), state);

    frame.render_widget(Paragraph::new(header_text(state)), layout.header);
    render_search(frame, layout.search, state);
    for (key, area) in &layout.sort_buttons {
        render_sort_button(frame, *area, *key, state.sort == Some(*key));
    }
    render_cards(frame, &layout, state);

    let footer = Paragraph::new(footer_text(state)).block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, layout.footer);

    if let (Some(panel), Some(player)) = (layout.modal, state.modal.player()) {
        render_modal(frame, panel, player, state.modal.phase());
    }

    if state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
    layout
}

fn header_text(state: &AppState) -> String {
    let sort = state.sort.map(SortKey::label).unwrap_or("NONE");
    let count = if state.loading {
        "loading".to_string()
    } else {
        format!("{}/{} players", state.visible.len(), state.players.len())
    };
    let mut header = format!("STREAK BOARD | {count} | Sort: {sort}");
    if !state.query.is_empty() {
        header.push_str(&format!(" | Search: \"{}\"", state.query));
    }
    if !state.source.is_empty() {
        header.push_str(&format!(" | {}", state.source));
    }
    header
}

fn footer_text(state: &AppState) -> String {
    let hints = match state.focus {
        Focus::Search => "Type to filter | Backspace Delete | Enter/Esc Done",
        Focus::Browse => {
            "/ Search | 1 Goals | 2 MOTM | 3 Wins | 4 Losses | ←↓↑→/hjkl Move | Enter Open | Esc/x Close | ? Help | q Quit"
        }
    };
    let last = state.logs.back().map(String::as_str).unwrap_or("");
    format!("{hints}\n{last}")
}

fn render_search(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == Focus::Search;
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let text = if focused {
        format!("{}_", state.query)
    } else if state.query.is_empty() {
        "Search players...".to_string()
    } else {
        state.query.clone()
    };
    let text_style = if !focused && state.query.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let search = Paragraph::new(text).style(text_style).block(
        Block::default()
            .title("Search (/)")
            .borders(Borders::ALL)
            .border_style(border),
    );
    frame.render_widget(search, area);
}

fn render_sort_button(frame: &mut Frame, area: Rect, key: SortKey, active: bool) {
    let (hotkey, label) = match key {
        SortKey::Goals => ('1', "Goals"),
        SortKey::Motm => ('2', "MOTM"),
        SortKey::Wins => ('3', "Wins"),
        SortKey::Losses => ('4', "Losses"),
    };
    let style = if active {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else {
        Style::default()
    };
    let button = Paragraph::new(format!("{hotkey} {label}"))
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(button, area);
}

fn render_cards(frame: &mut Frame, layout: &ViewLayout, state: &AppState) {
    let area = layout.list;
    frame.render_widget(Clear, area);

    if state.visible.is_empty() {
        let msg = if state.loading {
            "Loading players..."
        } else {
            PLACEHOLDER
        };
        let empty = Paragraph::new(msg).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    if layout.cards.is_empty() {
        let empty = Paragraph::new("Card list needs more height")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    for (idx, rect) in &layout.cards {
        let Some(player) = state.visible.get(*idx) else {
            continue;
        };
        render_card(frame, *rect, player, *idx == state.selected);
    }
}

fn class_style(class: ResultClass) -> Style {
    match class {
        ResultClass::Win => Style::default().fg(Color::Green),
        ResultClass::Loss => Style::default().fg(Color::Red),
    }
}

fn badge(class: ResultClass) -> Span<'static> {
    let bg = match class {
        ResultClass::Win => Color::Green,
        ResultClass::Loss => Color::Red,
    };
    Span::styled(
        format!(" {} ", class.label()),
        Style::default()
            .fg(Color::Black)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )
}

fn render_card(frame: &mut Frame, area: Rect, player: &Player, selected: bool) {
    let summary = player.streak_summary();
    let border = if selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let lines = vec![
        Line::from(badge(summary.class)),
        Line::from(format!("Photo: {}", player.photo)).style(Style::default().fg(Color::DarkGray)),
        Line::from(Span::styled(
            format!("Streak: {}", player.streak),
            class_style(summary.class),
        )),
        Line::from(format!("Wins: {}", summary.wins)),
        Line::from(format!("Losses: {}", summary.losses)),
        Line::from(format!("Goals: {}", format_stat(player.goals))),
        Line::from(format!("MOTM: {}", format_stat(player.motm))),
        Line::from(format!("Clean Sheets: {}", format_stat(player.clean_sheets))),
    ];

    let card = Paragraph::new(lines).block(
        Block::default()
            .title(player.name.clone())
            .borders(Borders::ALL)
            .border_style(border),
    );
    frame.render_widget(card, area);
}

fn render_modal(frame: &mut Frame, area: Rect, player: &Player, phase: ModalPhase) {
    frame.render_widget(Clear, area);

    let summary = player.streak_summary();
    let closing = phase == ModalPhase::Closing;
    let dim = |style: Style| {
        if closing {
            Style::default().fg(Color::DarkGray)
        } else {
            style
        }
    };

    let lines = vec![
        Line::from(Span::styled(
            player.name.clone(),
            dim(Style::default().add_modifier(Modifier::BOLD)),
        )),
        Line::from(Span::styled(
            format!("Photo: {}", player.photo),
            dim(Style::default().fg(Color::DarkGray)),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Goals: {}", format_stat(player.goals)),
            dim(Style::default()),
        )),
        Line::from(Span::styled(
            format!("Streak: {}", player.streak),
            dim(class_style(summary.class)),
        )),
        Line::from(Span::styled(
            format!("Wins: {}", summary.wins),
            dim(Style::default()),
        )),
        Line::from(Span::styled(
            format!("Losses: {}", summary.losses),
            dim(Style::default()),
        )),
        Line::from(Span::styled(
            format!("Clean Sheets: {}", format_stat(player.clean_sheets)),
            dim(Style::default()),
        )),
        Line::from(Span::styled(
            format!("MOTM: {}", format_stat(player.motm)),
            dim(Style::default()),
        )),
    ];

    let panel = Paragraph::new(lines).block(
        Block::default()
            .title("Player")
            .borders(Borders::ALL)
            .border_style(dim(class_style(summary.class))),
    );
    frame.render_widget(panel, area);

    let close = Paragraph::new("[x]").style(dim(Style::default().add_modifier(Modifier::BOLD)));
    frame.render_widget(close, close_control_rect(area));
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Streak Board - Help",
        "",
        "Cards:",
        "  ←↓↑→ / hjkl  Move selection",
        "  Enter        Open player",
        "  Esc / x      Close player",
        "  click        Open card, close outside panel",
        "",
        "Search & sort:",
        "  /            Search by name",
        "  1 / 2        Sort by goals / MOTM",
        "  3 / 4        Sort by wins / losses",
        "",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
