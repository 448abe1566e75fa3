use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::models::Book;
use crate::state::VisiblePage;

use super::helpers::visible_window;

/// Height of one book card including its border.
pub(crate) const BOOK_CARD_HEIGHT: u16 = 6;

/// Display unit for one record of the visible slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCard {
    /// Raw cover reference, shown as-is even when empty.
    pub image: String,
    pub title: String,
    pub byline: String,
    pub publication: String,
}

impl BookCard {
    fn from_book(book: &Book) -> Self {
        Self {
            image: book.image.clone(),
            title: book.title.clone(),
            byline: format!("By: {}", book.author),
            publication: format!("Publication Date: {}", book.publication_date),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLink {
    pub number: usize,
    pub active: bool,
}

/// Everything the list and pagination regions show. Rebuilt from scratch on
/// every refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookView {
    pub cards: Vec<BookCard>,
    pub page_links: Vec<PageLink>,
    pub current_page: usize,
    pub matching: usize,
}

impl BookView {
    pub fn render(visible: &[&Book], total_pages: usize, current_page: usize) -> Self {
        Self {
            cards: visible.iter().map(|book| BookCard::from_book(book)).collect(),
            page_links: (1..=total_pages)
                .map(|number| PageLink {
                    number,
                    active: number == current_page,
                })
                .collect(),
            current_page,
            matching: visible.len(),
        }
    }

    pub fn from_page(page: &VisiblePage<'_>) -> Self {
        let mut view = Self::render(&page.books, page.total_pages, page.current_page);
        view.matching = page.matching;
        view
    }

    pub fn total_pages(&self) -> usize {
        self.page_links.len()
    }
}

/// Draw the cards of the visible slice, scrolling so `selected` stays in view
/// when the page is taller than the area.
pub(crate) fn draw_book_list(frame: &mut Frame, area: Rect, view: &BookView, selected: usize) {
    let block = Block::default().borders(Borders::ALL).title(format!(
        "Books ({} matching)",
        view.matching
    ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if view.cards.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No books match the current filters.",
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }
    if inner.height == 0 {
        return;
    }

    let capacity = ((inner.height / BOOK_CARD_HEIGHT) as usize).max(1);
    let window = visible_window(selected, view.cards.len(), capacity);
    let constraints: Vec<Constraint> = window
        .clone()
        .map(|_| Constraint::Length(BOOK_CARD_HEIGHT))
        .collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (chunk, index) in rows.iter().zip(window) {
        if chunk.height == 0 {
            continue;
        }
        let card = &view.cards[index];
        let is_selected = index == selected;

        let mut block = Block::default().borders(Borders::ALL);
        if is_selected {
            block = block.border_style(Style::default().fg(Color::Yellow));
        }

        let title = if is_selected {
            format!("▶ {}", card.title)
        } else {
            card.title.clone()
        };
        let lines = vec![
            Line::from(Span::styled(
                card.image.clone(),
                Style::default().fg(Color::Cyan),
            )),
            Line::from(Span::styled(
                title,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                card.byline.clone(),
                Style::default().fg(Color::Gray),
            )),
            Line::from(card.publication.clone()),
        ];

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, *chunk);
    }
}

/// Draw one control per page. `cursor` marks the link under the keyboard
/// cursor while the pagination bar has focus.
pub(crate) fn draw_pagination(
    frame: &mut Frame,
    area: Rect,
    view: &BookView,
    cursor: Option<usize>,
    focused: bool,
) {
    let mut block = Block::default().borders(Borders::ALL).title("Pages");
    if focused {
        block = block.border_style(Style::default().fg(Color::Cyan));
    }

    let mut spans = Vec::with_capacity(view.page_links.len() * 2);
    for link in &view.page_links {
        let mut style = Style::default();
        if link.active {
            style = style.fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD);
        }
        if cursor == Some(link.number) {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        spans.push(Span::styled(format!(" {} ", link.number), style));
        spans.push(Span::raw(" "));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
