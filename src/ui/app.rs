use std::mem;

use anyhow::Result;
use chrono::NaiveDateTime;
use crossterm::event::KeyCode;
use open::that as open_link;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use rusqlite::Connection;
use tracing::warn;

use crate::catalog::{delete_book, fetch_audit_trail, save};
use crate::db::{create_publisher, fetch_books, fetch_publishers};
use crate::error::CatalogError;
use crate::models::{AuditEntry, Book, Publisher};
use crate::validation::SystemClock;

use super::forms::{BookForm, ConfirmBookDelete, FormField, PublisherForm};
use super::helpers::{
    book_list_line, centered_rect, isbn_lookup_url, surface_error, truncate_chars,
};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Summary characters shown in the detail pane before cutting off.
const SUMMARY_PREVIEW_CHARS: usize = 600;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

enum Screen {
    Books,
    AuditTrail(AuditScreen),
}

/// History of one book, oldest entry first.
struct AuditScreen {
    book: Book,
    entries: Vec<AuditEntry>,
    offset: usize,
}

/// Modal state layered over the current screen.
enum Mode {
    Normal,
    CreatingBook(BookForm),
    EditingBook {
        book: Book,
        form: BookForm,
    },
    /// Esc was pressed on a form with unsaved edits. `book` is `None` when
    /// the form was creating a new book.
    ConfirmDiscard {
        book: Option<Book>,
        form: BookForm,
    },
    ConfirmBookDelete(ConfirmBookDelete),
    AddingPublisher(PublisherForm),
}

/// What a key press did to a book form.
enum FormAction {
    Continue,
    Submit,
    Cancel,
}

struct StatusMessage {
    text: String,
    kind: StatusKind,
}

enum StatusKind {
    Info,
    /// The catalog rejected the input; the form stays open for a fix.
    Rejected,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Rejected => Style::default().fg(Color::Yellow),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    conn: Connection,
    clock: SystemClock,
    books: Vec<Book>,
    publishers: Vec<Publisher>,
    selected: usize,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(conn: Connection, books: Vec<Book>, publishers: Vec<Publisher>) -> Self {
        Self {
            conn,
            clock: SystemClock,
            books,
            publishers,
            selected: 0,
            screen: Screen::Books,
            mode: Mode::Normal,
            status: None,
        }
    }

    /// Route a key press to the active mode. Returns `true` when the user
    /// asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::CreatingBook(form) => self.handle_create_book(code, form),
            Mode::EditingBook { book, form } => self.handle_edit_book(code, book, form),
            Mode::ConfirmDiscard { book, form } => self.handle_confirm_discard(code, book, form),
            Mode::ConfirmBookDelete(confirm) => self.handle_confirm_delete(code, confirm),
            Mode::AddingPublisher(form) => self.handle_add_publisher(code, form),
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        if let Screen::AuditTrail(audit) = &mut self.screen {
            match code {
                KeyCode::Char('q') => *exit = true,
                KeyCode::Esc | KeyCode::Char('b') => {
                    self.screen = Screen::Books;
                    self.clear_status();
                }
                KeyCode::Up => audit.offset = audit.offset.saturating_sub(1),
                KeyCode::Down => {
                    if audit.offset + 1 < audit.entries.len() {
                        audit.offset += 1;
                    }
                }
                _ => {}
            }
            return Ok(Mode::Normal);
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => *exit = true,
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-10),
            KeyCode::PageDown => self.move_selection(10),
            KeyCode::Char('+') | KeyCode::Char('n') => {
                self.clear_status();
                return Ok(Mode::CreatingBook(BookForm::blank(&self.publishers)));
            }
            KeyCode::Enter | KeyCode::Char('e') => {
                if let Some(book) = self.current_book().cloned() {
                    self.clear_status();
                    let form = BookForm::from_book(&book, &self.publishers);
                    return Ok(Mode::EditingBook { book, form });
                }
                self.set_status("No book selected to edit.", StatusKind::Error);
            }
            KeyCode::Char('-') | KeyCode::Char('d') => {
                if let Some(book) = self.current_book() {
                    let confirm = ConfirmBookDelete::from(book);
                    self.clear_status();
                    return Ok(Mode::ConfirmBookDelete(confirm));
                }
                self.set_status("No book selected to delete.", StatusKind::Error);
            }
            KeyCode::Char('a') => {
                if let Some(book) = self.current_book().cloned() {
                    self.open_audit_trail(book)?;
                } else {
                    self.set_status("No book selected.", StatusKind::Error);
                }
            }
            KeyCode::Char('p') => {
                self.clear_status();
                return Ok(Mode::AddingPublisher(PublisherForm::default()));
            }
            KeyCode::Char('o') => self.open_isbn_lookup(),
            KeyCode::Char('r') => {
                self.reload_books(None)?;
                self.reload_publishers()?;
                self.set_status("Catalog reloaded.", StatusKind::Info);
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    /// Keys shared by the create and edit forms.
    fn handle_form_key(&self, code: KeyCode, form: &mut BookForm) -> FormAction {
        match code {
            KeyCode::Esc => return FormAction::Cancel,
            KeyCode::Enter => return FormAction::Submit,
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Left if form.active == FormField::Publisher => {
                form.cycle_publisher(-1, self.publishers.len())
            }
            KeyCode::Right if form.active == FormField::Publisher => {
                form.cycle_publisher(1, self.publishers.len())
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        FormAction::Continue
    }

    fn handle_create_book(&mut self, code: KeyCode, mut form: BookForm) -> Mode {
        match self.handle_form_key(code, &mut form) {
            FormAction::Continue => Mode::CreatingBook(form),
            FormAction::Cancel => {
                if form.is_dirty(&self.publishers) {
                    Mode::ConfirmDiscard { book: None, form }
                } else {
                    self.set_status("Add book cancelled.", StatusKind::Info);
                    Mode::Normal
                }
            }
            FormAction::Submit => match self.submit_book(&Book::default(), &form) {
                Ok(_) => Mode::Normal,
                Err(err) => {
                    self.report_form_error(&mut form, &err);
                    Mode::CreatingBook(form)
                }
            },
        }
    }

    fn handle_edit_book(&mut self, code: KeyCode, book: Book, mut form: BookForm) -> Mode {
        match self.handle_form_key(code, &mut form) {
            FormAction::Continue => Mode::EditingBook { book, form },
            FormAction::Cancel => {
                if form.is_dirty(&self.publishers) {
                    Mode::ConfirmDiscard {
                        book: Some(book),
                        form,
                    }
                } else {
                    self.set_status("Edit cancelled.", StatusKind::Info);
                    Mode::Normal
                }
            }
            FormAction::Submit => match self.submit_book(&book, &form) {
                Ok(_) => Mode::Normal,
                Err(err) => {
                    self.report_form_error(&mut form, &err);
                    Mode::EditingBook { book, form }
                }
            },
        }
    }

    fn handle_confirm_discard(
        &mut self,
        code: KeyCode,
        book: Option<Book>,
        form: BookForm,
    ) -> Mode {
        match code {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.set_status("Changes discarded.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => match book {
                Some(book) => Mode::EditingBook { book, form },
                None => Mode::CreatingBook(form),
            },
            _ => Mode::ConfirmDiscard { book, form },
        }
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmBookDelete) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match self.perform_delete(&confirm) {
                    Ok(_) => Mode::Normal,
                    Err(err) => {
                        self.set_status(surface_error(&err), StatusKind::Error);
                        Mode::ConfirmBookDelete(confirm)
                    }
                }
            }
            _ => Mode::ConfirmBookDelete(confirm),
        }
    }

    fn handle_add_publisher(&mut self, code: KeyCode, mut form: PublisherForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Add publisher cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Backspace => {
                form.name.pop();
            }
            KeyCode::Enter => match self.save_publisher(&form) {
                Ok(_) => return Mode::Normal,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) if !ch.is_control() => {
                form.name.push(ch);
                form.error = None;
            }
            _ => {}
        }
        Mode::AddingPublisher(form)
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Books => self.draw_book_list(frame, content_area),
            Screen::AuditTrail(audit) => self.draw_audit_trail(frame, content_area, audit),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::CreatingBook(form) => self.draw_book_form(frame, area, "Add Book", form),
            Mode::EditingBook { form, .. } => self.draw_book_form(frame, area, "Edit Book", form),
            Mode::ConfirmDiscard { .. } => self.draw_confirm_discard(frame, area),
            Mode::ConfirmBookDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::AddingPublisher(form) => self.draw_publisher_form(frame, area, form),
            Mode::Normal => {}
        }
    }

    fn draw_book_list(&self, frame: &mut Frame, area: Rect) {
        if self.books.is_empty() {
            let message = Paragraph::new("No books yet. Press '+' to add one.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Books"));
            frame.render_widget(message, area);
            return;
        }

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        let items: Vec<ListItem> = self
            .books
            .iter()
            .map(|book| ListItem::new(book_list_line(book)))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Books ({})", self.books.len())),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, columns[0], &mut state);

        if let Some(book) = self.current_book() {
            self.draw_book_details(frame, columns[1], book);
        }
    }

    fn draw_book_details(&self, frame: &mut Frame, area: Rect, book: &Book) {
        let label = Style::default().fg(Color::Cyan);
        let field = |name: &str, value: String| {
            Line::from(vec![Span::styled(format!("{name}: "), label), Span::raw(value)])
        };

        let mut lines = vec![
            field("Title", book.title.clone()),
            field("Year", book.year_published.to_string()),
            field("ISBN", book.isbn.clone()),
            field("Publisher", book.publisher.name.clone()),
            field("Added", format_timestamp(book.date_added())),
            field("Modified", format_timestamp(book.last_modified)),
            Line::from(""),
        ];
        if !book.summary.is_empty() {
            lines.push(Line::from(truncate_chars(&book.summary, SUMMARY_PREVIEW_CHARS)));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Details"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn draw_audit_trail(&self, frame: &mut Frame, area: Rect, audit: &AuditScreen) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Audit Trail: {}", audit.book.title));

        if audit.entries.is_empty() {
            let message = Paragraph::new("No changes recorded for this book.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let items: Vec<ListItem> = audit
            .entries
            .iter()
            .skip(audit.offset)
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        entry.timestamp.format(TIMESTAMP_FORMAT).to_string(),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw("  "),
                    Span::raw(entry.message.clone()),
                ]))
            })
            .collect();
        frame.render_widget(List::new(items).block(block), area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let keys: &[(&str, &str)] = match (&self.screen, &self.mode) {
            (_, Mode::CreatingBook(_)) | (_, Mode::EditingBook { .. }) => &[
                ("[Tab]", " Next field   "),
                ("[←→]", " Publisher   "),
                ("[Enter]", " Save   "),
                ("[Esc]", " Cancel"),
            ],
            (_, Mode::ConfirmDiscard { .. }) | (_, Mode::ConfirmBookDelete(_)) => {
                &[("[Y]", " Confirm   "), ("[N]", " Back")]
            }
            (_, Mode::AddingPublisher(_)) => &[("[Enter]", " Save   "), ("[Esc]", " Cancel")],
            (Screen::AuditTrail(_), Mode::Normal) => &[
                ("[↑↓]", " Scroll   "),
                ("[Esc]", " Back   "),
                ("[q]", " Quit"),
            ],
            (Screen::Books, Mode::Normal) => &[
                ("[↑↓]", " Navigate   "),
                ("[+]", " Add   "),
                ("[e]", " Edit   "),
                ("[-]", " Delete   "),
                ("[a]", " Audit trail   "),
                ("[p]", " Add publisher   "),
                ("[o]", " Look up ISBN   "),
                ("[q]", " Quit"),
            ],
        };

        let spans: Vec<Span<'static>> = keys
            .iter()
            .flat_map(|(key, text)| {
                [
                    Span::styled(key.to_string(), key_style),
                    Span::raw(text.to_string()),
                ]
            })
            .collect();
        Line::from(spans)
    }

    fn draw_book_form(&self, frame: &mut Frame, area: Rect, title: &str, form: &BookForm) {
        let popup_area = centered_rect(70, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let fields = [
            FormField::Title,
            FormField::Summary,
            FormField::Year,
            FormField::Isbn,
            FormField::Publisher,
        ];
        let mut lines: Vec<Line> = fields
            .iter()
            .map(|field| form.build_line(*field, &self.publishers))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to switch • ←→ to pick publisher • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines);
        frame.render_widget(paragraph, inner);

        let row = fields
            .iter()
            .position(|field| *field == form.active)
            .unwrap_or(0) as u16;
        let prefix = format!("{}: ", form.active.label()).len() as u16;
        let cursor_x = (inner.x + prefix + form.active_len(&self.publishers) as u16)
            .min(inner.x + inner.width.saturating_sub(1));
        frame.set_cursor_position((cursor_x, inner.y + row));
    }

    fn draw_confirm_discard(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(50, 25, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Unsaved Changes")
            .borders(Borders::ALL);
        let lines = vec![
            Line::from("Discard your unsaved changes?"),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to discard or N / Esc to keep editing.",
                Style::default().fg(Color::Gray),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmBookDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Removal")
            .borders(Borders::ALL);
        let lines = vec![
            Line::from(format!("Delete '{}'?", confirm.title)),
            Line::from("Its audit trail will be removed as well."),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);
    }

    fn draw_publisher_form(&self, frame: &mut Frame, area: Rect, form: &PublisherForm) {
        let popup_area = centered_rect(50, 25, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add Publisher").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![Line::from(format!("Name: {}", form.name)), Line::from("")];
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }
        frame.render_widget(Paragraph::new(lines), inner);

        let cursor_x = inner.x + "Name: ".len() as u16 + form.name.chars().count() as u16;
        frame.set_cursor_position((cursor_x, inner.y));
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

    fn report_form_error(&mut self, form: &mut BookForm, err: &anyhow::Error) {
        let message = surface_error(err);
        form.error = Some(message.clone());
        let kind = match err.downcast_ref::<CatalogError>() {
            Some(catalog_err) if catalog_err.is_validation() => StatusKind::Rejected,
            _ => StatusKind::Error,
        };
        self.set_status(message, kind);
    }

    /// Save the form through the catalog. `book` is `Book::default()` for a
    /// new entry.
    fn submit_book(&mut self, book: &Book, form: &BookForm) -> Result<()> {
        let fields = form.parse_inputs(&self.publishers)?;
        let saved = save(&mut self.conn, &self.clock, book, &fields)?;
        self.reload_books(Some(saved.id))?;
        let verb = if book.is_new() { "Added" } else { "Saved" };
        self.set_status(format!("{verb} '{}'.", saved.title), StatusKind::Info);
        Ok(())
    }

    fn save_publisher(&mut self, form: &PublisherForm) -> Result<()> {
        let name = form.parse_name()?;
        let publisher = create_publisher(&self.conn, &name)?;
        self.reload_publishers()?;
        self.set_status(
            format!("Added publisher '{}'.", publisher.name),
            StatusKind::Info,
        );
        Ok(())
    }

    fn perform_delete(&mut self, confirm: &ConfirmBookDelete) -> Result<()> {
        delete_book(&mut self.conn, confirm.id)?;
        self.reload_books(None)?;
        self.set_status(format!("Deleted '{}'.", confirm.title), StatusKind::Info);
        Ok(())
    }

    fn open_audit_trail(&mut self, book: Book) -> Result<()> {
        let entries = fetch_audit_trail(&self.conn, book.id)?;
        self.clear_status();
        self.screen = Screen::AuditTrail(AuditScreen {
            book,
            entries,
            offset: 0,
        });
        Ok(())
    }

    fn open_isbn_lookup(&mut self) {
        let Some(book) = self.current_book() else {
            self.set_status("No book selected.", StatusKind::Error);
            return;
        };
        let Some(url) = isbn_lookup_url(&book.isbn) else {
            self.set_status("This book has no ISBN.", StatusKind::Error);
            return;
        };
        match open_link(&url) {
            Ok(_) => self.set_status(format!("Opened {url}"), StatusKind::Info),
            Err(err) => {
                warn!(%url, error = %err, "failed to open ISBN lookup");
                self.set_status(format!("Could not open {url}: {err}"), StatusKind::Error);
            }
        }
    }

    fn reload_books(&mut self, focus_id: Option<i64>) -> Result<()> {
        self.books = fetch_books(&self.conn)?;
        if self.books.is_empty() {
            self.selected = 0;
            return Ok(());
        }

        if let Some(id) = focus_id {
            if let Some(idx) = self.books.iter().position(|book| book.id == id) {
                self.selected = idx;
                return Ok(());
            }
        }

        if self.selected >= self.books.len() {
            self.selected = self.books.len() - 1;
        }
        Ok(())
    }

    fn reload_publishers(&mut self) -> Result<()> {
        self.publishers = fetch_publishers(&self.conn)?;
        Ok(())
    }

    fn current_book(&self) -> Option<&Book> {
        self.books.get(self.selected)
    }

    fn move_selection(&mut self, offset: isize) {
        if self.books.is_empty() {
            return;
        }
        let max = self.books.len() as isize - 1;
        self.selected = (self.selected as isize + offset).clamp(0, max) as usize;
    }
}

fn format_timestamp(timestamp: Option<NaiveDateTime>) -> String {
    timestamp
        .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string())
}
