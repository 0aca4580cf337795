use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;

use super::{Component, ACCENT_GOLD, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::roster::FilterMode;

pub struct SearchBarProps<'a> {
    pub query: &'a str,
    pub mode: FilterMode,
    pub is_active: bool,
}

#[derive(Default)]
pub struct SearchBar;

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_active {
            return Vec::new();
        }
        let EventKind::Key(key) = event else {
            return Vec::new();
        };
        match key.code {
            KeyCode::Esc => vec![Action::SearchClear],
            KeyCode::Enter => vec![Action::SearchSubmit],
            KeyCode::Backspace => vec![Action::SearchBackspace],
            KeyCode::Tab => vec![Action::FilterModeCycle],
            KeyCode::Char(ch) => vec![Action::SearchInput(ch)],
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let text = if props.is_active {
            format!("/{}_", props.query)
        } else if props.query.is_empty() {
            "/ to search".to_string()
        } else {
            format!("/{}", props.query)
        };
        let text_style = if props.is_active {
            Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_DIM)
        };

        let mut spans = vec![Span::styled(text, text_style), Span::raw("   ")];
        for mode in [FilterMode::ByNumber, FilterMode::ByName, FilterMode::Off] {
            let marker = if mode == props.mode { "(x)" } else { "( )" };
            let style = if mode == props.mode {
                Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(TEXT_DIM)
            };
            spans.push(Span::styled(format!("{marker} {}  ", mode.label()), style));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title("SEARCH")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN));
        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    fn press(code: KeyCode) -> EventKind {
        EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn active(query: &str) -> SearchBarProps<'_> {
        SearchBarProps {
            query,
            mode: FilterMode::ByName,
            is_active: true,
        }
    }

    #[test]
    fn typing_emits_input() {
        let mut bar = SearchBar;
        let actions: Vec<_> = bar
            .handle_event(&press(KeyCode::Char('q')), active(""))
            .into_iter()
            .collect();
        actions.assert_first(Action::SearchInput('q'));
    }

    #[test]
    fn escape_clears_and_tab_cycles() {
        let mut bar = SearchBar;
        let actions: Vec<_> = bar
            .handle_event(&press(KeyCode::Esc), active("pi"))
            .into_iter()
            .collect();
        actions.assert_first(Action::SearchClear);

        let actions: Vec<_> = bar
            .handle_event(&press(KeyCode::Tab), active("pi"))
            .into_iter()
            .collect();
        actions.assert_first(Action::FilterModeCycle);
    }

    #[test]
    fn inactive_bar_ignores_keys() {
        let mut bar = SearchBar;
        let props = SearchBarProps {
            query: "",
            mode: FilterMode::ByNumber,
            is_active: false,
        };
        let actions: Vec<_> = bar
            .handle_event(&press(KeyCode::Char('x')), props)
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn render_marks_active_mode() {
        let mut render = RenderHarness::new(70, 3);
        let mut bar = SearchBar;
        let output = render.render_to_string_plain(|frame| {
            bar.render(frame, frame.area(), active("char"));
        });
        assert!(output.contains("/char_"));
        assert!(output.contains("(x) Name"));
        assert!(output.contains("( ) Number"));
    }
}
