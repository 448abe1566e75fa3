use crossterm::event::KeyCode;
use open::that as open_link;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};

use crate::enrichment::{EnrichmentEvent, Enricher, PLACEHOLDER_IMAGE};
use crate::filter::CategoryFilter;
use crate::state::AppState;

use super::helpers::{key_hint, step_within};
use super::view::{draw_book_list, draw_pagination, BookView};

/// Search input and category selector row.
const CONTROLS_HEIGHT: u16 = 3;
/// Page selector bar.
const PAGINATION_HEIGHT: u16 = 3;
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;

/// Which control receives keystrokes that are not global shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Category,
    Pages,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Search => Focus::Category,
            Focus::Category => Focus::Pages,
            Focus::Pages => Focus::Search,
        }
    }

    fn previous(self) -> Self {
        match self {
            Focus::Search => Focus::Pages,
            Focus::Category => Focus::Search,
            Focus::Pages => Focus::Category,
        }
    }
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Controller: owns the application state, routes input and enrichment
/// completions into it, and keeps the rendered view in sync.
pub struct App {
    state: AppState,
    view: BookView,
    focus: Focus,
    /// Selected card within the visible slice.
    selected: usize,
    /// Page link under the keyboard cursor while the pagination bar has focus.
    page_cursor: usize,
    enricher: Enricher,
    events: UnboundedReceiver<EnrichmentEvent>,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(
        state: AppState,
        enricher: Enricher,
        events: UnboundedReceiver<EnrichmentEvent>,
    ) -> Self {
        let mut app = Self {
            state,
            view: BookView::default(),
            focus: Focus::Search,
            selected: 0,
            page_cursor: 1,
            enricher,
            events,
            status: None,
        };
        app.refresh();
        app
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> &BookView {
        &self.view
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn enricher(&self) -> &Enricher {
        &self.enricher
    }

    /// Kick off lookups for every record not yet enriched.
    pub fn start_enrichment(&mut self) -> usize {
        let started = self.enricher.enrich_all(&self.state.books);
        if started > 0 {
            info!(started, "enrichment started");
        }
        started
    }

    /// Apply every completion waiting in the channel. Each applied completion
    /// triggers a full recompute under the filters active right now.
    pub fn pump_enrichment(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events.try_recv() {
            let index = event.index;
            if self.enricher.apply(&mut self.state.books, event) {
                applied += 1;
                self.refresh();
            } else {
                debug!(index, "ignored stale enrichment result");
            }
        }
        if applied > 0 && !self.enricher.is_busy() {
            info!("enrichment finished");
        }
        applied
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.state.set_search_text(text);
        self.selected = 0;
        self.refresh();
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.state.set_category(category);
        self.selected = 0;
        self.refresh();
    }

    /// Behaves like clicking page link `number`.
    pub fn activate_page_link(&mut self, number: usize) {
        self.state.request_page(number);
        self.selected = 0;
        self.refresh();
        self.page_cursor = self.view.current_page;
    }

    /// Recompute filter and pagination and replace the whole view.
    pub fn refresh(&mut self) {
        let page = self.state.visible();
        self.view = BookView::from_page(&page);

        self.selected = self.selected.min(self.view.cards.len().saturating_sub(1));
        let total = self.view.total_pages();
        if total == 0 {
            self.page_cursor = 1;
        } else if !(1..=total).contains(&self.page_cursor) {
            self.page_cursor = self.view.current_page;
        }
    }

    /// Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Esc => return true,
            KeyCode::Tab => self.move_focus(self.focus.next()),
            KeyCode::BackTab => self.move_focus(self.focus.previous()),
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => {
                if self.view.current_page > 1 {
                    self.activate_page_link(self.view.current_page - 1);
                }
            }
            KeyCode::PageDown => {
                if self.view.current_page < self.view.total_pages() {
                    self.activate_page_link(self.view.current_page + 1);
                }
            }
            _ => match self.focus {
                Focus::Search => self.handle_search_key(code),
                Focus::Category => self.handle_category_key(code),
                Focus::Pages => self.handle_pages_key(code),
            },
        }
        false
    }

    /// Ctrl-U: clear the search text.
    pub(crate) fn handle_ctrl_u(&mut self) {
        if !self.state.filter.search_text.is_empty() {
            self.set_search_text(String::new());
        }
    }

    /// Ctrl-O: open the selected book's cover in the system viewer.
    pub(crate) fn handle_ctrl_o(&mut self) {
        let Some(card) = self.view.cards.get(self.selected) else {
            self.set_status("No book selected.", StatusKind::Error);
            return;
        };
        let image = card.image.trim().to_string();
        let title = card.title.clone();

        if image.is_empty() || image == PLACEHOLDER_IMAGE {
            self.set_status(format!("No cover available for {title}."), StatusKind::Error);
        } else if let Err(err) = open_link(&image) {
            self.set_status(format!("Failed to open cover: {err}"), StatusKind::Error);
        } else {
            self.set_status(format!("Opened cover for {title}."), StatusKind::Info);
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => {
                let mut text = self.state.filter.search_text.clone();
                text.push(c);
                self.set_search_text(text);
            }
            KeyCode::Backspace => {
                let mut text = self.state.filter.search_text.clone();
                if text.pop().is_some() {
                    self.set_search_text(text);
                }
            }
            _ => {}
        }
    }

    fn handle_category_key(&mut self, code: KeyCode) {
        let offset = match code {
            KeyCode::Left | KeyCode::Char('h') => -1,
            KeyCode::Right | KeyCode::Char('l') => 1,
            _ => return,
        };
        self.set_category(self.state.filter.category.cycle(offset));
    }

    fn handle_pages_key(&mut self, code: KeyCode) {
        let total = self.view.total_pages();
        if total == 0 {
            return;
        }
        match code {
            KeyCode::Left => self.page_cursor = step_within(self.page_cursor - 1, -1, total) + 1,
            KeyCode::Right => self.page_cursor = step_within(self.page_cursor - 1, 1, total) + 1,
            KeyCode::Home => self.page_cursor = 1,
            KeyCode::End => self.page_cursor = total,
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_page_link(self.page_cursor),
            _ => {}
        }
    }

    fn move_focus(&mut self, focus: Focus) {
        self.focus = focus;
        if focus == Focus::Pages {
            self.page_cursor = self.view.current_page;
        }
        self.clear_status();
    }

    fn move_selection(&mut self, offset: isize) {
        self.selected = step_within(self.selected, offset, self.view.cards.len());
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(CONTROLS_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(PAGINATION_HEIGHT),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_controls(frame, chunks[0]);
        draw_book_list(frame, chunks[1], &self.view, self.selected);
        let cursor = (self.focus == Focus::Pages).then_some(self.page_cursor);
        draw_pagination(frame, chunks[2], &self.view, cursor, self.focus == Focus::Pages);
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_controls(&self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(area);

        let search_block = focused_block("Search", self.focus == Focus::Search);
        let search_inner = search_block.inner(columns[0]);
        let search = Paragraph::new(Span::raw(self.state.filter.search_text.clone()))
            .block(search_block);
        frame.render_widget(search, columns[0]);
        if self.focus == Focus::Search {
            let cursor_x = search_inner.x
                + (self.state.filter.search_text.chars().count() as u16)
                    .min(search_inner.width.saturating_sub(1));
            frame.set_cursor_position((cursor_x, search_inner.y));
        }

        let category = Paragraph::new(Line::from(vec![
            Span::raw("◀ "),
            Span::raw(self.state.filter.category.label()),
            Span::raw(" ▶"),
        ]))
        .block(focused_block("Category", self.focus == Focus::Category));
        frame.render_widget(category, columns[1]);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from(self.summary())
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn summary(&self) -> String {
        let (enriched, in_flight) = self.enricher.progress();
        let pages = format!(
            "{} matching, page {} of {}",
            self.view.matching,
            self.view.current_page.min(self.view.total_pages()),
            self.view.total_pages()
        );
        if in_flight > 0 {
            format!(
                "{pages}  |  Enriching covers… {enriched}/{}",
                enriched + in_flight
            )
        } else {
            pages
        }
    }

    fn footer_instructions(&self) -> Line<'static> {
        let mut spans = vec![
            key_hint("[Tab]"),
            Span::raw(" Focus   "),
            key_hint("[↑↓]"),
            Span::raw(" Select   "),
            key_hint("[PgUp/PgDn]"),
            Span::raw(" Page   "),
        ];
        match self.focus {
            Focus::Search => {
                spans.push(key_hint("[Ctrl-U]"));
                spans.push(Span::raw(" Clear   "));
            }
            Focus::Category => {
                spans.push(key_hint("[←→]"));
                spans.push(Span::raw(" Category   "));
            }
            Focus::Pages => {
                spans.push(key_hint("[←→]"));
                spans.push(Span::raw(" Choose   "));
                spans.push(key_hint("[Enter]"));
                spans.push(Span::raw(" Go   "));
            }
        }
        spans.push(key_hint("[Ctrl-O]"));
        spans.push(Span::raw(" Cover   "));
        spans.push(key_hint("[Esc]"));
        spans.push(Span::raw(" Quit"));
        Line::from(spans)
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

fn focused_block(title: &'static str, focused: bool) -> Block<'static> {
    let block = Block::default().borders(Borders::ALL).title(title);
    if focused {
        block.border_style(Style::default().fg(Color::Cyan))
    } else {
        block
    }
}
