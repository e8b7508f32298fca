//! Field-by-field diff between a stored book and a proposed edit, rendered
//! as the human-readable lines written to `book_audit_trail`.
//!
//! Comparison is plain value equality. No trimming or case folding happens
//! here; callers that want normalized input normalize before saving.
//!
//! An old value counts as *unset* when it is an empty string or the
//! "Unknown" publisher. Filling an unset value is logged as
//! `<Field> <new> Added`; every other change, clearing included, is
//! `<Field> changed from <old> to <new>`. The year is always a real value
//! (0 is a valid year) so it only ever produces the "changed from" form.

use std::fmt;

use crate::models::{Book, BookFields, Publisher};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookField {
    Title,
    Summary,
    YearPublished,
    Isbn,
    Publisher,
}

impl BookField {
    pub fn label(self) -> &'static str {
        match self {
            BookField::Title => "Title",
            BookField::Summary => "Summary",
            BookField::YearPublished => "Year Published",
            BookField::Isbn => "ISBN",
            BookField::Publisher => "Publisher",
        }
    }
}

impl fmt::Display for BookField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single detected change. `old` is `None` when the field was unset
/// before the edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: BookField,
    pub old: Option<String>,
    pub new: String,
}

impl FieldChange {
    /// The audit trail line for this change.
    pub fn audit_message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.old {
            None => write!(f, "{} {} Added", self.field, self.new),
            Some(old) => write!(f, "{} changed from {} to {}", self.field, old, self.new),
        }
    }
}

/// Compare `current` with the proposed values and return one change per
/// differing field, in form order. `proposed_publisher` must be the row
/// behind `proposed.publisher_id`; publishers are compared by id and
/// reported by name.
pub fn diff(
    current: &Book,
    proposed: &BookFields,
    proposed_publisher: &Publisher,
) -> Vec<FieldChange> {
    let mut changes = Vec::new();

    diff_text(&mut changes, BookField::Title, &current.title, &proposed.title);
    diff_text(
        &mut changes,
        BookField::Summary,
        &current.summary,
        &proposed.summary,
    );

    if current.year_published != proposed.year_published {
        changes.push(FieldChange {
            field: BookField::YearPublished,
            old: Some(current.year_published.to_string()),
            new: proposed.year_published.to_string(),
        });
    }

    diff_text(&mut changes, BookField::Isbn, &current.isbn, &proposed.isbn);

    if current.publisher.id != proposed.publisher_id {
        changes.push(FieldChange {
            field: BookField::Publisher,
            old: publisher_value(&current.publisher),
            new: proposed_publisher.name.clone(),
        });
    }

    changes
}

fn diff_text(changes: &mut Vec<FieldChange>, field: BookField, old: &str, new: &str) {
    if old != new {
        changes.push(FieldChange {
            field,
            old: text_value(old),
            new: new.to_string(),
        });
    }
}

fn text_value(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn publisher_value(publisher: &Publisher) -> Option<String> {
    if publisher.is_unknown() {
        None
    } else {
        Some(publisher.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> Book {
        let mut book = Book::new(BookFields {
            title: "Dune".into(),
            summary: "Spice.".into(),
            year_published: 1965,
            isbn: "0441013597".into(),
            ..BookFields::default()
        });
        book.id = 3;
        book
    }

    fn ace() -> Publisher {
        Publisher {
            id: 7,
            name: "Ace Books".into(),
        }
    }

    fn messages(changes: &[FieldChange]) -> Vec<String> {
        changes.iter().map(FieldChange::audit_message).collect()
    }

    #[test]
    fn identical_fields_produce_no_changes() {
        let book = dune();
        assert!(diff(&book, &book.fields(), &book.publisher).is_empty());
    }

    #[test]
    fn title_change() {
        let book = dune();
        let proposed = BookFields {
            title: "Dune Messiah".into(),
            ..book.fields()
        };
        assert_eq!(
            messages(&diff(&book, &proposed, &book.publisher)),
            vec!["Title changed from Dune to Dune Messiah"]
        );
    }

    #[test]
    fn whitespace_differences_are_changes() {
        let book = dune();
        let proposed = BookFields {
            title: "Dune ".into(),
            ..book.fields()
        };
        assert_eq!(diff(&book, &proposed, &book.publisher).len(), 1);
    }

    #[test]
    fn first_publisher_assignment_is_an_addition() {
        let book = dune();
        let proposed = BookFields {
            publisher_id: 7,
            ..book.fields()
        };
        assert_eq!(
            messages(&diff(&book, &proposed, &ace())),
            vec!["Publisher Ace Books Added"]
        );
    }

    #[test]
    fn publisher_reassignment_names_both_sides() {
        let mut book = dune();
        book.publisher = Publisher {
            id: 4,
            name: "Chilton".into(),
        };
        let proposed = BookFields {
            publisher_id: 7,
            ..book.fields()
        };
        assert_eq!(
            messages(&diff(&book, &proposed, &ace())),
            vec!["Publisher changed from Chilton to Ace Books"]
        );
    }

    #[test]
    fn empty_and_cleared_text_fields() {
        let mut book = dune();
        book.isbn.clear();
        let proposed = BookFields {
            isbn: "9780441013593".into(),
            summary: String::new(),
            ..book.fields()
        };
        assert_eq!(
            messages(&diff(&book, &proposed, &book.publisher)),
            vec!["Summary changed from Spice. to ", "ISBN 9780441013593 Added"]
        );
    }

    #[test]
    fn moving_back_to_unknown_publisher_is_a_change() {
        let mut book = dune();
        book.publisher = ace();
        let proposed = BookFields {
            publisher_id: Publisher::unknown().id,
            ..book.fields()
        };
        assert_eq!(
            messages(&diff(&book, &proposed, &Publisher::unknown())),
            vec!["Publisher changed from Ace Books to Unknown"]
        );
    }

    #[test]
    fn every_field_in_form_order() {
        let book = dune();
        let proposed = BookFields {
            title: "Children of Dune".into(),
            summary: "More spice.".into(),
            year_published: 1976,
            isbn: "0399116974".into(),
            publisher_id: 7,
        };
        let fields: Vec<BookField> = diff(&book, &proposed, &ace())
            .into_iter()
            .map(|change| change.field)
            .collect();
        assert_eq!(
            fields,
            vec![
                BookField::Title,
                BookField::Summary,
                BookField::YearPublished,
                BookField::Isbn,
                BookField::Publisher,
            ]
        );
    }

    #[test]
    fn year_zero_is_a_real_value() {
        let mut book = dune();
        book.year_published = 0;
        let proposed = BookFields {
            year_published: 1965,
            ..book.fields()
        };
        assert_eq!(
            messages(&diff(&book, &proposed, &book.publisher)),
            vec!["Year Published changed from 0 to 1965"]
        );
    }
}
