use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Padding, SelectList, SelectListBehavior, SelectListProps, SelectListStyle,
    SelectionStyle,
};

use super::{Component, ACCENT_RED, BG_HIGHLIGHT, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::roster::RosterRow;
use crate::state::RosterPage;

pub const NOT_FOUND: &str = "Pokemon not found";
const PAGE_STEP: i16 = 10;

pub struct RosterListProps<'a> {
    pub page: &'a RosterPage,
    pub is_focused: bool,
}

pub struct RosterList {
    list: SelectList,
}

impl Default for RosterList {
    fn default() -> Self {
        Self {
            list: SelectList::new(),
        }
    }
}

impl RosterList {
    pub fn new() -> Self {
        Self::default()
    }

    fn items(page: &RosterPage) -> Vec<Line<'static>> {
        page.visible
            .iter()
            .map(|entry| {
                let row = RosterRow::from_entry(entry);
                Line::from(vec![
                    Span::styled(format!("{:<5}", row.number), Style::default().fg(TEXT_DIM)),
                    Span::raw(row.name),
                ])
            })
            .collect()
    }

    fn style() -> SelectListStyle {
        SelectListStyle {
            base: BaseStyle {
                border: None,
                padding: Padding::xy(1, 0),
                bg: None,
                fg: Some(TEXT_MAIN),
            },
            selection: SelectionStyle {
                style: Some(
                    Style::default()
                        .bg(BG_HIGHLIGHT)
                        .fg(TEXT_MAIN)
                        .add_modifier(Modifier::BOLD),
                ),
                marker: None,
                disabled: false,
            },
            ..SelectListStyle::default()
        }
    }

    fn status_text(page: &RosterPage) -> Option<Vec<Line<'static>>> {
        if page.roster.is_loading() {
            return Some(vec![Line::from("Loading roster...")]);
        }
        if !page.not_found() {
            return None;
        }
        let mut lines = vec![Line::from(Span::styled(
            NOT_FOUND,
            Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD),
        ))];
        if let Some(error) = page.roster.error() {
            lines.push(Line::from(Span::styled(
                error.to_string(),
                Style::default().fg(TEXT_DIM),
            )));
        }
        Some(lines)
    }
}

impl Component<Action> for RosterList {
    type Props<'a> = RosterListProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Enter => return vec![Action::RosterOpen],
                KeyCode::Char('/') => return vec![Action::SearchStart],
                KeyCode::Char('f') => return vec![Action::FilterModeCycle],
                KeyCode::Char('c') => return vec![Action::SearchClear],
                KeyCode::PageDown => return vec![Action::RosterMove(PAGE_STEP)],
                KeyCode::PageUp => return vec![Action::RosterMove(-PAGE_STEP)],
                _ => {}
            },
            EventKind::Scroll { delta, .. } => {
                return vec![Action::RosterMove((*delta * 3) as i16)];
            }
            _ => {}
        }

        let items = Self::items(props.page);
        if items.is_empty() {
            return Vec::new();
        }
        let list_props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: props.page.selected.min(items.len() - 1),
            is_focused: true,
            style: Self::style(),
            behavior: SelectListBehavior {
                show_scrollbar: true,
                wrap_navigation: false,
            },
            on_select: Action::RosterSelect,
            render_item: &|item| item.clone(),
        };
        self.list.handle_event(event, list_props).into_iter().collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let border = if props.is_focused {
            Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_DIM)
        };
        let title = format!(
            "POKEDEX {}/{}",
            props.page.visible.len(),
            props.page.entries().len()
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if let Some(lines) = Self::status_text(props.page) {
            frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
            return;
        }

        let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);
        let items = Self::items(props.page);
        let list_props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: props.page.selected.min(items.len().saturating_sub(1)),
            is_focused: props.is_focused,
            style: Self::style(),
            behavior: SelectListBehavior {
                show_scrollbar: true,
                wrap_navigation: false,
            },
            on_select: Action::RosterSelect,
            render_item: &|item| item.clone(),
        };
        self.list.render(frame, chunks[0], list_props);

        if let Some(entry) = props.page.selected_entry() {
            let row = RosterRow::from_entry(entry);
            let sprite = Paragraph::new(Line::from(Span::styled(
                row.sprite_url,
                Style::default().fg(TEXT_DIM),
            )));
            frame.render_widget(sprite, chunks[1]);
        }
    }
}
