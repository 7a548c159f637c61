// TUI module for rendering the card deck in a terminal
pub mod colors;
pub mod input;

// Re-exports
pub use colors::*;
pub use input::{handle_key_event, handle_mouse_event, KeyAction, PointerAction};

use crate::domain::{CardDeck, CardLayer, DeckFrame, ReleaseDecision, SwipeDirection, Vector2};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame,
};

/// Stacked cards deeper than this are hidden behind the ones above
const MAX_STACK_DRAWN: usize = 3;

/// Minimum card width in columns
const MIN_CARD_WIDTH: u16 = 24;

/// Cards swiped during the session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwipeTally {
    pub liked: Vec<String>,
    pub passed: Vec<String>,
}

impl SwipeTally {
    pub fn record(&mut self, direction: SwipeDirection, card: &str) {
        match direction {
            SwipeDirection::Right => self.liked.push(card.to_string()),
            SwipeDirection::Left => self.passed.push(card.to_string()),
        }
    }

    pub fn total(&self) -> usize {
        self.liked.len() + self.passed.len()
    }
}

/// Maps terminal cells to deck units.
///
/// One column is one horizontal unit; one row spans `row_units` vertical
/// units so that a stacked card peeks out one row below the card above.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellScale {
    pub row_units: f32,
}

impl CellScale {
    pub fn for_deck<T>(deck: &CardDeck<T>) -> Self {
        Self {
            row_units: deck.config().stack_offset.max(1.0),
        }
    }

    pub fn to_deck(&self, column: u16, row: u16) -> (f32, f32) {
        (column as f32, row as f32 * self.row_units)
    }

    pub fn columns(&self, x: f32) -> i32 {
        x.round() as i32
    }

    pub fn rows(&self, y: f32) -> i32 {
        (y / self.row_units).round() as i32
    }
}

/// Header, deck area and footer
pub fn layout(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with progress
            Constraint::Min(0),    // Deck
            Constraint::Length(3), // Footer
        ])
        .split(area);

    [chunks[0], chunks[1], chunks[2]]
}

/// Area the deck is drawn in; its width is the deck's viewport width
pub fn content_area(area: Rect) -> Rect {
    layout(area)[1]
}

/// Renders the whole screen and returns where the top card was drawn
pub fn render(frame: &mut Frame, deck: &CardDeck<String>, tally: &SwipeTally) -> Option<Rect> {
    let [header, content, footer] = layout(frame.area());

    render_header(frame, header, deck);
    let top = render_deck(frame, content, deck, tally);
    render_footer(frame, footer);

    top
}

pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

/// Resting rectangle of the top card inside the deck area
fn card_base_rect(area: Rect) -> Rect {
    let width = (area.width * 3 / 5).max(MIN_CARD_WIDTH).min(area.width);
    let height = area
        .height
        .saturating_sub(MAX_STACK_DRAWN as u16 + 1)
        .max(3)
        .min(area.height);

    Rect::new(area.x + (area.width - width) / 2, area.y, width, height)
}

/// Shifts `base` by a deck offset and clips it to `area`
fn place_card(base: Rect, area: Rect, offset: Vector2, scale: CellScale) -> Option<Rect> {
    let x0 = base.x as i32 + scale.columns(offset.x);
    let y0 = base.y as i32 + scale.rows(offset.y);
    let x1 = x0 + base.width as i32;
    let y1 = y0 + base.height as i32;

    let left = x0.max(area.x as i32);
    let top = y0.max(area.y as i32);
    let right = x1.min(area.right() as i32);
    let bottom = y1.min(area.bottom() as i32);

    if right <= left || bottom <= top {
        return None;
    }

    Some(Rect::new(
        left as u16,
        top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}

fn card_lines(text: &str) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from("")];
    lines.extend(text.split(" | ").map(|part| Line::from(part.to_string())));
    lines
}

fn empty_lines(tally: &SwipeTally) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "No More Cards",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("✓ ", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("Liked:  "),
            Span::styled(
                tally.liked.len().to_string(),
                Style::default()
                    .fg(ACCENT_SECONDARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("✗ ", Style::default().fg(ACCENT_PRIMARY)),
            Span::raw("Passed: "),
            Span::styled(
                tally.passed.len().to_string(),
                Style::default()
                    .fg(ACCENT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Press r to deal again or q to quit",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ]
}

fn render_deck(
    frame: &mut Frame,
    area: Rect,
    deck: &CardDeck<String>,
    tally: &SwipeTally,
) -> Option<Rect> {
    let scale = CellScale::for_deck(deck);
    let base = card_base_rect(area);

    match deck.render(|text| card_lines(text), || empty_lines(tally)) {
        DeckFrame::Empty(lines) => {
            let empty = Paragraph::new(lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(BORDER_COLOR)),
                )
                .alignment(Alignment::Center);
            frame.render_widget(empty, area);
            None
        }
        DeckFrame::Stack(layers) => {
            let mut top = None;
            for layer in layers.into_iter().filter(|l| l.depth <= MAX_STACK_DRAWN) {
                let Some(rect) = place_card(base, area, layer.offset, scale) else {
                    continue;
                };

                frame.render_widget(Clear, rect);
                if layer.interactive {
                    frame.render_widget(top_card_widget(layer, deck), rect);
                    top = Some(rect);
                } else {
                    frame.render_widget(stacked_card_widget(layer), rect);
                }
            }
            top
        }
    }
}

fn top_card_widget(
    layer: CardLayer<Vec<Line<'static>>>,
    deck: &CardDeck<String>,
) -> Paragraph<'static> {
    let (accent, hint) = match deck.preview_decision() {
        ReleaseDecision::Commit(SwipeDirection::Right) => (ACCENT_SECONDARY, Some(" LIKE ")),
        ReleaseDecision::Commit(SwipeDirection::Left) => (ACCENT_PRIMARY, Some(" NOPE ")),
        ReleaseDecision::Reset => (ACCENT_HIGHLIGHT, None),
    };

    let mut title = vec![
        Span::styled(
            format!(" {}/{} ", layer.index + 1, deck.len()),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {:+.0}° ", layer.rotation_deg),
            Style::default().fg(TEXT_SECONDARY),
        ),
    ];
    if let Some(hint) = hint {
        title.push(Span::styled(
            hint,
            Style::default()
                .fg(BG_DARK)
                .bg(accent)
                .add_modifier(Modifier::BOLD),
        ));
    }

    Paragraph::new(layer.content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(accent))
                .title(Line::from(title)),
        )
        .style(Style::default().fg(TEXT_PRIMARY).bg(BG_DARK))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
}

fn stacked_card_widget(layer: CardLayer<Vec<Line<'static>>>) -> Paragraph<'static> {
    Paragraph::new(layer.content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .style(Style::default().fg(TEXT_SECONDARY).bg(BG_DARK))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
}

/// Renders the header with swipe progress
fn render_header(frame: &mut Frame, area: Rect, deck: &CardDeck<String>) {
    let title = match deck.current_item() {
        Some(_) => format!(" Card {}/{} ", deck.index() + 1, deck.len()),
        None => " All cards swiped ".to_string(),
    };

    let total = deck.len();
    let swiped = deck.index().min(total);
    let progress = if total > 0 {
        swiped as f64 / total as f64
    } else {
        0.0
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR))
                .title(Span::styled(
                    title,
                    Style::default()
                        .fg(ACCENT_HIGHLIGHT)
                        .add_modifier(Modifier::BOLD),
                )),
        )
        .gauge_style(Style::default().fg(ACCENT_SECONDARY).bg(BG_DARK))
        .ratio(progress)
        .label(format!("{}/{} swiped", swiped, total));

    frame.render_widget(gauge, area);
}

/// Renders the footer with styled controls
fn render_footer(frame: &mut Frame, area: Rect) {
    let controls = Line::from(vec![
        Span::styled(
            " ← ",
            Style::default()
                .fg(ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("Pass", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled(
            "→ ",
            Style::default()
                .fg(ACCENT_SECONDARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("Like", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("drag ", Style::default().fg(ACCENT_HIGHLIGHT)),
        Span::styled("Swipe", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("r ", Style::default().fg(ACCENT_HIGHLIGHT)),
        Span::styled("Deal again", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("q ", Style::default().fg(TEXT_SECONDARY)),
        Span::styled("Quit", Style::default().fg(TEXT_SECONDARY)),
    ]);

    let footer = Paragraph::new(controls)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(footer, area);
}
