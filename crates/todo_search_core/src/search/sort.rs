//! Caller-supplied ordering for todo reads.
//!
//! # Invariants
//! - Sortable fields form a closed set, so an unknown column cannot be requested.
//! - SQL rendering and in-process comparison produce the same order, including
//!   the trailing `id ASC` tie-break and `NULL` descriptions sorting first.

use crate::model::todo::Todo;
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Column a todo list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TodoField {
    Id,
    Title,
    Description,
    CreatedAt,
    ModifiedAt,
}

impl TodoField {
    pub fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Description => "description",
            Self::CreatedAt => "created_at",
            Self::ModifiedAt => "modified_at",
        }
    }

    fn compare(self, left: &Todo, right: &Todo) -> Ordering {
        match self {
            Self::Id => left.id.cmp(&right.id),
            // Byte order of UTF-8 text equals SQLite's BINARY collation.
            Self::Title => left.title.as_bytes().cmp(right.title.as_bytes()),
            Self::Description => left
                .description
                .as_deref()
                .map(str::as_bytes)
                .cmp(&right.description.as_deref().map(str::as_bytes)),
            Self::CreatedAt => left.created_at.cmp(&right.created_at),
            Self::ModifiedAt => left.modified_at.cmp(&right.modified_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFieldError(String);

impl Display for ParseFieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown todo field `{}`; expected id|title|description|created_at|modified_at",
            self.0
        )
    }
}

impl Error for ParseFieldError {}

impl FromStr for TodoField {
    type Err = ParseFieldError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "id" => Ok(Self::Id),
            "title" => Ok(Self::Title),
            "description" => Ok(Self::Description),
            "created_at" => Ok(Self::CreatedAt),
            "modified_at" => Ok(Self::ModifiedAt),
            _ => Err(ParseFieldError(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// One `(field, direction)` sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Order {
    pub field: TodoField,
    pub direction: Direction,
}

impl Order {
    pub fn asc(field: TodoField) -> Self {
        Self {
            field,
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: TodoField) -> Self {
        Self {
            field,
            direction: Direction::Desc,
        }
    }
}

/// Ordered list of sort keys, applied left to right.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Sort {
    orders: Vec<Order>,
}

impl Sort {
    /// No caller ordering; rows come back by ascending id.
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn by(order: Order) -> Self {
        Self {
            orders: vec![order],
        }
    }

    /// The ordering embedded in the fixed-sort search statements.
    pub fn by_title_asc() -> Self {
        Self::by(Order::asc(TodoField::Title))
    }

    /// Appends a lower-priority sort key.
    pub fn then(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn is_unsorted(&self) -> bool {
        self.orders.is_empty()
    }

    /// Renders ` ORDER BY ...` including the `id` tie-break.
    pub fn order_by_sql(&self) -> String {
        let mut keys = self
            .orders
            .iter()
            .map(|order| format!("{} {}", order.field.column(), order.direction.keyword()))
            .collect::<Vec<_>>();
        if !self.has_id_key() {
            keys.push("id ASC".to_string());
        }
        format!(" ORDER BY {}", keys.join(", "))
    }

    /// Compares two todos exactly as [`Sort::order_by_sql`] orders rows.
    pub fn compare(&self, left: &Todo, right: &Todo) -> Ordering {
        self.orders
            .iter()
            .map(|order| order.direction.apply(order.field.compare(left, right)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| left.id.cmp(&right.id))
    }

    fn has_id_key(&self) -> bool {
        self.orders.iter().any(|order| order.field == TodoField::Id)
    }
}

#[cfg(test)]
mod tests {
    use super::{Order, Sort, TodoField};
    use crate::model::todo::Todo;
    use std::cmp::Ordering;

    fn todo(id: i64, title: &str, description: Option<&str>) -> Todo {
        Todo {
            id,
            title: title.to_string(),
            description: description.map(str::to_string),
            created_at: 0,
            modified_at: 0,
        }
    }

    #[test]
    fn order_by_sql_appends_id_tie_break() {
        assert_eq!(Sort::unsorted().order_by_sql(), " ORDER BY id ASC");
        assert_eq!(
            Sort::by_title_asc().order_by_sql(),
            " ORDER BY title ASC, id ASC"
        );
        assert_eq!(
            Sort::by(Order::desc(TodoField::Id)).order_by_sql(),
            " ORDER BY id DESC"
        );
    }

    #[test]
    fn compare_uses_binary_collation_and_id_tie_break() {
        let sort = Sort::by_title_asc();
        // Uppercase sorts before lowercase under BINARY.
        assert_eq!(
            sort.compare(&todo(1, "banana", None), &todo(2, "Zebra", None)),
            Ordering::Greater
        );
        assert_eq!(
            sort.compare(&todo(3, "same", None), &todo(4, "same", None)),
            Ordering::Less
        );
    }

    #[test]
    fn null_description_sorts_first_ascending() {
        let sort = Sort::by(Order::asc(TodoField::Description));
        assert_eq!(
            sort.compare(&todo(1, "a", None), &todo(2, "b", Some("text"))),
            Ordering::Less
        );
    }

    #[test]
    fn parses_kebab_and_snake_field_names() {
        assert_eq!("created-at".parse::<TodoField>(), Ok(TodoField::CreatedAt));
        assert_eq!("Modified_At".parse::<TodoField>(), Ok(TodoField::ModifiedAt));
        assert!("priority".parse::<TodoField>().is_err());
    }
}
