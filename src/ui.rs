//! Terminal rendering of the player widget, plus mouse hit-testing against the
//! same layout.
//!
//! `draw` only reads the projected [`WidgetView`]; it never touches the
//! controller. `hit_test` maps a click back to the gesture it stands for.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::config::{ControlsSettings, UiSettings};
use crate::controller::{Command, PlaybackState};
use crate::view::WidgetView;

/// Screen regions of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetLayout {
    pub header: Rect,
    pub now_playing: Rect,
    pub progress: Rect,
    pub controls: Rect,
    pub playlist: Rect,
    pub footer: Rect,
}

/// What a mouse click landed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hit {
    Button(Command),
    Seek { offset_x: f64, bar_width: f64 },
    Row(usize),
}

pub fn layout(area: Rect) -> WidgetLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(area);

    WidgetLayout {
        header: chunks[0],
        now_playing: chunks[1],
        progress: chunks[2],
        controls: chunks[3],
        playlist: chunks[4],
        footer: chunks[5],
    }
}

/// The control buttons left to right. The play button turns into pause while playing.
pub fn control_buttons(state: PlaybackState) -> [(&'static str, Command); 4] {
    let play = if state == PlaybackState::Playing {
        ("[ || pause ]", Command::Pause)
    } else {
        ("[ > play ]", Command::Play)
    };
    [
        ("[ |< prev ]", Command::Prev),
        play,
        ("[ [] stop ]", Command::Stop),
        ("[ next >| ]", Command::Next),
    ]
}

const BUTTON_GAP: u16 = 1;

/// Which button covers column `x` (relative to the controls' inner area).
fn button_at(state: PlaybackState, x: u16) -> Option<Command> {
    let mut start: u16 = 0;
    for (label, cmd) in control_buttons(state) {
        let width = label.len() as u16;
        if x >= start && x < start + width {
            return Some(cmd);
        }
        start += width + BUTTON_GAP;
    }
    None
}

/// The slice `[start, end)` of a `total`-row list shown in `height` rows,
/// keeping `anchor` centered when possible.
pub fn visible_window(total: usize, height: usize, anchor: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let half = height / 2;
    let mut start = anchor.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

fn inside(r: Rect, column: u16, row: u16) -> bool {
    column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
}

/// Map a click at (`column`, `row`) on a frame of size `area` to a gesture.
pub fn hit_test(area: Rect, view: &WidgetView, cursor: usize, column: u16, row: u16) -> Option<Hit> {
    let l = layout(area);

    let bar = Block::bordered().inner(l.progress);
    if inside(bar, column, row) {
        return Some(Hit::Seek {
            offset_x: f64::from(column - bar.x),
            bar_width: f64::from(bar.width),
        });
    }

    let controls = controls_block().inner(l.controls);
    if inside(controls, column, row) {
        return button_at(view.play_state, column - controls.x).map(Hit::Button);
    }

    let list = Block::bordered().inner(l.playlist);
    if inside(list, column, row) {
        let (start, end) = visible_window(view.rows.len(), list.height as usize, cursor);
        let index = start + (row - list.y) as usize;
        return (index < end).then_some(Hit::Row(index));
    }

    None
}

fn controls_block() -> Block<'static> {
    Block::bordered().title(" controls ").padding(Padding::left(1))
}

fn state_label(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
        PlaybackState::Stopped => "Stopped",
    }
}

fn thumbnail_label(thumbnail: Option<&str>) -> String {
    match thumbnail {
        Some(t) => {
            let name = std::path::Path::new(t)
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or(t);
            format!("art: {name}")
        }
        None => "no artwork".to_string(),
    }
}

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    [
        "[h/l] prev/next".to_string(),
        "[space/p] play/pause".to_string(),
        "[s] stop".to_string(),
        format!("[H/L] scrub -/+{scrub_seconds}s"),
        "[j/k] move".to_string(),
        "[enter] play selected".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Render the whole widget into `frame`.
pub fn draw(
    frame: &mut Frame,
    view: &WidgetView,
    cursor: usize,
    status: Option<&str>,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let l = layout(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", state_label(view.play_state)))
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, l.header);

    // Thumbnail on the left, details on the right.
    let now = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(10)])
        .split(l.now_playing);

    let thumb = Paragraph::new(thumbnail_label(view.thumbnail.as_deref()))
        .block(Block::bordered().title(" thumb "))
        .wrap(Wrap { trim: true });
    frame.render_widget(thumb, now[0]);

    let details: Vec<Line> = match view.details {
        Some(ref d) => vec![
            Line::from(Span::styled(
                d.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(d.artist.clone()),
            Line::from(Span::styled(
                d.album.clone(),
                Style::default().add_modifier(Modifier::ITALIC),
            )),
        ],
        None => vec![Line::from("No track")],
    };
    let mut details_par = Paragraph::new(details)
        .block(Block::bordered().title(" now playing "))
        .wrap(Wrap { trim: true });
    if let Some(msg) = status {
        details_par = details_par.block(
            Block::bordered()
                .title(" now playing ")
                .title_bottom(Line::from(format!(" {msg} ")).red()),
        );
    }
    frame.render_widget(details_par, now[1]);

    let gauge = Gauge::default()
        .block(
            Block::bordered()
                .title(format!(" {} ", view.elapsed))
                .title(Line::from(format!(" {} ", view.total)).right_aligned()),
        )
        .gauge_style(if view.is_playing() {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        })
        .ratio(view.progress_ratio())
        .label(format!("{:.0}%", view.progress_fill));
    frame.render_widget(gauge, l.progress);

    let mut spans: Vec<Span> = Vec::new();
    for (i, (label, _)) in control_buttons(view.play_state).iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" ".repeat(BUTTON_GAP as usize)));
        }
        spans.push(Span::raw(*label));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).block(controls_block()), l.controls);

    // Only build ListItems for the visible window.
    let list_block = Block::bordered().title(" playlist ");
    let list_height = list_block.inner(l.playlist).height as usize;
    let (start, end) = visible_window(view.rows.len(), list_height, cursor);
    let items: Vec<ListItem> = view.rows[start..end]
        .iter()
        .enumerate()
        .map(|(offset, r)| {
            let text = if r.artist.trim().is_empty() {
                r.title.clone()
            } else {
                format!("{} - {}", r.title, r.artist)
            };
            if view.highlighted == Some(start + offset) {
                ListItem::new(format!("♪ {text}")).style(Style::default().add_modifier(Modifier::BOLD))
            } else {
                ListItem::new(format!("  {text}"))
            }
        })
        .collect();

    let list = List::new(items)
        .block(list_block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default();
    if cursor >= start && cursor < end {
        state.select(Some(cursor - start));
    }
    frame.render_stateful_widget(list, l.playlist, &mut state);

    let footer = Paragraph::new(controls_text(controls_settings.scrub_seconds))
        .block(Block::bordered().title(" keys "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, l.footer);
}
