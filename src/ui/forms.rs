use anyhow::{anyhow, Context, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{Book, BookFields, Publisher, DEFAULT_PUBLISHER_ID};

/// Fields of the book form, in tab order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum FormField {
    #[default]
    Title,
    Summary,
    Year,
    Isbn,
    Publisher,
}

impl FormField {
    const ORDER: [FormField; 5] = [
        FormField::Title,
        FormField::Summary,
        FormField::Year,
        FormField::Isbn,
        FormField::Publisher,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Summary => "Summary",
            FormField::Year => "Year",
            FormField::Isbn => "ISBN",
            FormField::Publisher => "Publisher",
        }
    }

    fn position(self) -> usize {
        Self::ORDER
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0)
    }

    fn offset(self, delta: isize) -> Self {
        let len = Self::ORDER.len() as isize;
        let idx = (self.position() as isize + delta).rem_euclid(len);
        Self::ORDER[idx as usize]
    }
}

/// Editable text behind the create/edit book popup. Values stay raw strings
/// until `parse_inputs`, so the user can type freely and get one error on
/// save.
#[derive(Clone, Debug, Default)]
pub(crate) struct BookForm {
    pub(crate) title: String,
    pub(crate) summary: String,
    pub(crate) year: String,
    pub(crate) isbn: String,
    pub(crate) publisher_idx: usize,
    pub(crate) active: FormField,
    pub(crate) error: Option<String>,
    /// Values the form was opened with, used to detect unsaved edits.
    initial: BookFields,
}

impl BookForm {
    /// Empty form for a new book with the "Unknown" publisher preselected.
    pub(crate) fn blank(publishers: &[Publisher]) -> Self {
        let initial = BookFields::default();
        Self {
            publisher_idx: publisher_index(publishers, initial.publisher_id),
            initial,
            ..Self::default()
        }
    }

    pub(crate) fn from_book(book: &Book, publishers: &[Publisher]) -> Self {
        Self {
            title: book.title.clone(),
            summary: book.summary.clone(),
            year: book.year_published.to_string(),
            isbn: book.isbn.clone(),
            publisher_idx: publisher_index(publishers, book.publisher.id),
            active: FormField::Title,
            error: None,
            initial: book.fields(),
        }
    }

    pub(crate) fn next_field(&mut self) {
        self.active = self.active.offset(1);
    }

    pub(crate) fn previous_field(&mut self) {
        self.active = self.active.offset(-1);
    }

    /// Append a character to the active field. The year only takes digits
    /// and the publisher is chosen with the arrow keys.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            FormField::Title => self.title.push(ch),
            FormField::Summary => self.summary.push(ch),
            FormField::Year => {
                if !ch.is_ascii_digit() {
                    return false;
                }
                self.year.push(ch);
            }
            FormField::Isbn => self.isbn.push(ch),
            FormField::Publisher => return false,
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            FormField::Title => {
                self.title.pop();
            }
            FormField::Summary => {
                self.summary.pop();
            }
            FormField::Year => {
                self.year.pop();
            }
            FormField::Isbn => {
                self.isbn.pop();
            }
            FormField::Publisher => {}
        }
    }

    /// Step through the publisher list, wrapping at either end.
    pub(crate) fn cycle_publisher(&mut self, delta: isize, count: usize) {
        if count == 0 {
            return;
        }
        let idx = (self.publisher_idx as isize + delta).rem_euclid(count as isize);
        self.publisher_idx = idx as usize;
    }

    /// Turn the raw inputs into typed fields. Only parsing happens here;
    /// the catalog validator owns the field rules.
    pub(crate) fn parse_inputs(&self, publishers: &[Publisher]) -> Result<BookFields> {
        let year_raw = self.year.trim();
        let year_published = if year_raw.is_empty() {
            0
        } else {
            year_raw
                .parse::<i32>()
                .context("Year must be a whole number.")?
        };

        let publisher_id = publishers
            .get(self.publisher_idx)
            .map(|publisher| publisher.id)
            .ok_or_else(|| anyhow!("Select a publisher."))?;

        Ok(BookFields {
            title: self.title.clone(),
            summary: self.summary.clone(),
            year_published,
            isbn: self.isbn.trim().to_string(),
            publisher_id,
        })
    }

    /// Whether anything differs from the values the form was opened with.
    pub(crate) fn is_dirty(&self, publishers: &[Publisher]) -> bool {
        match self.parse_inputs(publishers) {
            Ok(fields) => fields != self.initial,
            Err(_) => true,
        }
    }

    pub(crate) fn value(&self, field: FormField, publishers: &[Publisher]) -> String {
        match field {
            FormField::Title => self.title.clone(),
            FormField::Summary => self.summary.clone(),
            FormField::Year => self.year.clone(),
            FormField::Isbn => self.isbn.clone(),
            FormField::Publisher => publishers
                .get(self.publisher_idx)
                .map(|publisher| format!("< {} >", publisher.name))
                .unwrap_or_default(),
        }
    }

    pub(crate) fn build_line(&self, field: FormField, publishers: &[Publisher]) -> Line<'static> {
        let value = self.value(field, publishers);
        let is_active = self.active == field;

        let display = if value.is_empty() {
            match field {
                FormField::Title => "<required>".to_string(),
                _ => "<optional>".to_string(),
            }
        } else {
            value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ])
    }

    /// Character count of the active field, for cursor placement.
    pub(crate) fn active_len(&self, publishers: &[Publisher]) -> usize {
        self.value(self.active, publishers).chars().count()
    }
}

fn publisher_index(publishers: &[Publisher], id: i64) -> usize {
    publishers
        .iter()
        .position(|publisher| publisher.id == id)
        .or_else(|| {
            publishers
                .iter()
                .position(|publisher| publisher.id == DEFAULT_PUBLISHER_ID)
        })
        .unwrap_or(0)
}

/// Single-field form for adding a publisher.
#[derive(Clone, Debug, Default)]
pub(crate) struct PublisherForm {
    pub(crate) name: String,
    pub(crate) error: Option<String>,
}

impl PublisherForm {
    pub(crate) fn parse_name(&self) -> Result<String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(anyhow!("Publisher name is required."));
        }
        Ok(name.to_string())
    }
}

#[derive(Clone, Debug)]
pub(crate) struct ConfirmBookDelete {
    pub(crate) id: i64,
    pub(crate) title: String,
}

impl ConfirmBookDelete {
    pub(crate) fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publishers() -> Vec<Publisher> {
        vec![
            Publisher {
                id: 7,
                name: "Ace Books".into(),
            },
            Publisher::unknown(),
        ]
    }

    #[test]
    fn blank_form_selects_unknown_publisher() {
        let form = BookForm::blank(&publishers());
        assert_eq!(form.publisher_idx, 1);
        assert!(!form.is_dirty(&publishers()));
    }

    #[test]
    fn year_accepts_digits_only() {
        let mut form = BookForm::blank(&publishers());
        form.active = FormField::Year;
        assert!(form.push_char('1'));
        assert!(!form.push_char('a'));
        assert_eq!(form.year, "1");
    }

    #[test]
    fn tab_order_wraps() {
        let mut form = BookForm::blank(&publishers());
        form.previous_field();
        assert_eq!(form.active, FormField::Publisher);
        form.next_field();
        assert_eq!(form.active, FormField::Title);
    }

    #[test]
    fn parse_and_dirty_tracking() {
        let publishers = publishers();
        let mut form = BookForm::blank(&publishers);
        form.title = "Dune".into();
        form.year = "1965".into();
        form.cycle_publisher(1, publishers.len());

        let fields = form.parse_inputs(&publishers).unwrap();
        assert_eq!(fields.title, "Dune");
        assert_eq!(fields.year_published, 1965);
        assert_eq!(fields.publisher_id, 7);
        assert!(form.is_dirty(&publishers));
    }

    #[test]
    fn publisher_name_is_required() {
        let form = PublisherForm {
            name: "   ".into(),
            error: None,
        };
        assert!(form.parse_name().is_err());
    }
}
