use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::EventKind;

use super::{hex_color, Component, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::detail::{DetailView, StatLine};
use crate::state::DetailPage;

const STAT_BAR_WIDTH: usize = 20;

pub struct DetailPanelProps<'a> {
    pub page: &'a DetailPage,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct DetailPanel;

impl Component<Action> for DetailPanel {
    type Props<'a> = DetailPanelProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Left | KeyCode::Char('h') => Some(Action::DetailPrev),
                KeyCode::Right | KeyCode::Char('l') => Some(Action::DetailNext),
                KeyCode::Esc | KeyCode::Backspace => Some(Action::ShowRoster),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let Some(view) = props.page.view.as_ref() else {
            let pending = props
                .page
                .current_id
                .map(|id| format!("Loading #{id:03}..."))
                .unwrap_or_else(|| "Loading...".to_string());
            let block = Block::default()
                .borders(Borders::ALL)
                .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN));
            frame.render_widget(
                Paragraph::new(pending)
                    .alignment(Alignment::Center)
                    .block(block),
                area,
            );
            return;
        };

        let accent = hex_color(&view.accent);
        let frame_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN));
        let inner = frame_block.inner(area);
        frame.render_widget(frame_block, area);

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(8),
            Constraint::Length(4),
        ])
        .split(inner);

        render_header(frame, rows[0], props.page, view, accent);
        render_image(frame, rows[1], view);

        let columns = Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(rows[2]);
        render_about(frame, columns[0], view, accent);
        render_stats(frame, columns[1], &view.stats, accent);
        render_description(frame, rows[3], view);
    }
}

fn render_header(frame: &mut Frame, area: Rect, page: &DetailPage, view: &DetailView, accent: Color) {
    let cells = Layout::horizontal([
        Constraint::Length(10),
        Constraint::Min(10),
        Constraint::Length(10),
    ])
    .split(area);

    let control = |target: Option<u16>, left: bool| {
        let (text, style) = match target {
            Some(id) if left => (format!("< #{id:03}"), Style::default().fg(TEXT_MAIN)),
            Some(id) => (format!("#{id:03} >"), Style::default().fg(TEXT_MAIN)),
            None => ("".to_string(), Style::default().fg(TEXT_DIM)),
        };
        Paragraph::new(Span::styled(text, style))
    };
    frame.render_widget(control(page.controls.prev, true), cells[0]);
    frame.render_widget(
        control(page.controls.next, false).alignment(Alignment::Right),
        cells[2],
    );

    let title = Line::from(vec![
        Span::styled(
            view.name.clone(),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(view.number.clone(), Style::default().fg(TEXT_DIM)),
    ]);
    frame.render_widget(Paragraph::new(title).alignment(Alignment::Center), cells[1]);
}

fn render_image(frame: &mut Frame, area: Rect, view: &DetailView) {
    let lines = vec![
        Line::from(Span::styled(
            view.image_alt.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        )),
        Line::from(Span::styled(view.image_url.clone(), Style::default().fg(TEXT_DIM))),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_about(frame: &mut Frame, area: Rect, view: &DetailView, accent: Color) {
    let mut badges = Vec::new();
    for badge in &view.types {
        badges.push(Span::styled(
            format!(" {} ", badge.label),
            Style::default()
                .bg(hex_color(&badge.color))
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
        badges.push(Span::raw(" "));
    }

    let mut lines = vec![
        Line::from(badges),
        Line::default(),
        Line::from(vec![
            Span::styled("Weight ", Style::default().fg(TEXT_DIM)),
            Span::raw(view.weight.clone()),
        ]),
        Line::from(vec![
            Span::styled("Height ", Style::default().fg(TEXT_DIM)),
            Span::raw(view.height.clone()),
        ]),
        Line::default(),
        Line::from(Span::styled("Moves", Style::default().fg(TEXT_DIM))),
    ];
    lines.extend(view.abilities.iter().map(|ability| Line::from(ability.clone())));

    let block = Block::default()
        .borders(Borders::ALL)
        .title("ABOUT")
        .border_style(Style::default().fg(accent));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_stats(frame: &mut Frame, area: Rect, stats: &[StatLine], accent: Color) {
    let lines: Vec<Line> = stats
        .iter()
        .map(|stat| {
            let filled = stat.filled(STAT_BAR_WIDTH);
            Line::from(vec![
                Span::styled(
                    format!("{:<5}", stat.label),
                    Style::default().fg(accent).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("{} ", stat.value)),
                Span::styled("█".repeat(filled), Style::default().fg(accent)),
                Span::styled(
                    "░".repeat(STAT_BAR_WIDTH - filled),
                    Style::default().fg(TEXT_DIM),
                ),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title("BASE STATS")
        .border_style(Style::default().fg(accent));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_description(frame: &mut Frame, area: Rect, view: &DetailView) {
    frame.render_widget(
        Paragraph::new(Text::from(view.description.clone()))
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center),
        area,
    );
}
