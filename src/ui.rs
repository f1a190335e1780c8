use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::App,
    metrics::{CharState, CharacterState, Metrics},
    session::Status,
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

pub fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let metrics = self.engine.metrics();
        let states = self.engine.character_states();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // title
                Constraint::Length(1), // padding
                Constraint::Length(3), // metrics row
                Constraint::Length(1), // padding
                Constraint::Min(1),    // paragraph
                Constraint::Length(1), // status
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled(
            "Typing Speed Test",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        render_metrics(&metrics, chunks[2], buf);

        let text_width = chunks[4].width as usize;
        let fits_one_line = !self.engine.session().reference_text.contains('\n')
            && self.engine.session().reference_text.width() <= text_width;
        Paragraph::new(paragraph_lines(&states))
            .alignment(if fits_one_line {
                // short prompts look better centered
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: false })
            .render(chunks[4], buf);

        Paragraph::new(Span::styled(
            status_line(&metrics),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(chunks[5], buf);

        let legend = match metrics.status {
            Status::Finished => "(r/tab) restart / (esc)ape",
            _ => "(tab) restart / (esc)ape",
        };
        Paragraph::new(Span::styled(
            legend,
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .render(chunks[6], buf);
    }
}

fn render_metrics(metrics: &Metrics, area: Rect, buf: &mut Buffer) {
    let boxes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let finished = metrics.status == Status::Finished;
    let border_style = if finished {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let value_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let values = [
        ("Time Left", format!("{}s", metrics.time_remaining)),
        ("WPM", metrics.wpm.to_string()),
        ("Accuracy", format!("{:.1}%", metrics.accuracy_percent)),
    ];

    for ((label, value), rect) in values.into_iter().zip(boxes.iter()) {
        Paragraph::new(Span::styled(value, value_style))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(label)
                    .title_alignment(Alignment::Center),
            )
            .render(*rect, buf);
    }
}

fn status_line(metrics: &Metrics) -> String {
    match metrics.status {
        Status::Waiting => "start typing to begin".to_string(),
        Status::Started => format!("time bonus {:+}s", metrics.bonus_secs),
        Status::Finished => format!(
            "finished in {:.1}s with {:+}s bonus",
            metrics.elapsed_secs, metrics.bonus_secs
        ),
    }
}

fn char_style(state: &CharacterState) -> Style {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let style = match state.state {
        CharState::Correct => bold.fg(Color::Green),
        CharState::Incorrect => bold.fg(Color::Red),
        CharState::Pending => bold.add_modifier(Modifier::DIM),
    };
    if state.is_cursor {
        style.add_modifier(Modifier::UNDERLINED)
    } else {
        style
    }
}

/// One ratatui line per reference line; line breaks are typed as spaces so
/// they get a visible marker when they carry an error or the cursor.
pub fn paragraph_lines(states: &[CharacterState]) -> Vec<Line<'static>> {
    states
        .split(|s| s.char == '\n')
        .zip(
            states
                .iter()
                .filter(|s| s.char == '\n')
                .map(Some)
                .chain(std::iter::once(None)),
        )
        .map(|(line, brk)| {
            let mut spans = line
                .iter()
                .map(|s| {
                    let symbol = match (s.char, s.state) {
                        (' ', CharState::Incorrect) => "·".to_string(),
                        (c, _) => c.to_string(),
                    };
                    Span::styled(symbol, char_style(s))
                })
                .collect_vec();
            if let Some(brk) = brk {
                if brk.is_cursor || brk.state == CharState::Incorrect {
                    spans.push(Span::styled("↵", char_style(brk)));
                }
            }
            Line::from(spans)
        })
        .collect_vec()
}
