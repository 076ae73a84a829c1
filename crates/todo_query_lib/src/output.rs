//! Rendering TODO comments as a table or as plain lines.
use crate::parser::TodoComment;

/// Printed instead of an empty listing.
pub const NOT_FOUND: &str = "No TODO comments found.";

const IMPORTANCE_WIDTH: usize = 3;
const ASSIGNEE_WIDTH: (usize, usize) = (10, 12);
const DATE_WIDTH: (usize, usize) = (10, 12);
const TEXT_WIDTH: (usize, usize) = (50, 52);

/// How listings are laid out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Layout {
    /// Fixed-width columns of importance, assignee, date and text.
    #[default]
    Table,
    /// `path: comment` per line.
    Plain,
}

/// Cut `s` down to `max` chars, then pad it with spaces to `width` chars.
///
/// ```rust
/// use todo_query_lib::output::fit;
///
/// assert_eq!(fit("abc", 2, 4), "ab  ");
/// assert_eq!(fit("ab", 10, 4), "ab  ");
/// assert_eq!(fit("αβγ", 2, 2), "αβ");
/// ```
pub fn fit(s: &str, max: usize, width: usize) -> String {
    let cut = s.chars().take(max).collect::<String>();
    format!("{cut:<width$}")
}

/// One row of the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRow {
    pub importance: char,
    pub assignee: String,
    pub date: String,
    pub text: String,
}

impl TableRow {
    pub fn from_todo(todo: &TodoComment) -> Self {
        let parsed = todo.parsed();
        TableRow {
            importance: if parsed.importance > 0 { '!' } else { ' ' },
            assignee: parsed.assignee.unwrap_or(" ").to_string(),
            date: parsed
                .date
                .map(|date| date.to_string())
                .unwrap_or_else(|| " ".to_string()),
            text: parsed.text.to_string(),
        }
    }

    /// ```rust
    /// use todo_query_lib::{output::TableRow, parser::TodoComment};
    ///
    /// let todo = TodoComment::new("a.js", "// TODO {Alice}; 2024-06-01; ship it!");
    /// assert_eq!(
    ///     TableRow::from_todo(&todo).format().trim_end(),
    ///     "!   |  Alice        |  2024-06-01   |  ship it!"
    /// );
    /// ```
    pub fn format(&self) -> String {
        let importance = fit(
            &self.importance.to_string(),
            IMPORTANCE_WIDTH,
            IMPORTANCE_WIDTH,
        );
        let assignee = fit(&self.assignee, ASSIGNEE_WIDTH.0, ASSIGNEE_WIDTH.1);
        let date = fit(&self.date, DATE_WIDTH.0, DATE_WIDTH.1);
        let text = fit(&self.text, TEXT_WIDTH.0, TEXT_WIDTH.1);
        format!("{importance} |  {assignee} |  {date} |  {text}")
    }
}

/// Render each comment on its own line. An empty slice renders as a single
/// [`NOT_FOUND`] line.
pub fn render(todos: &[&TodoComment], layout: Layout) -> Vec<String> {
    if todos.is_empty() {
        return vec![NOT_FOUND.to_string()];
    }
    todos
        .iter()
        .map(|todo| match layout {
            Layout::Table => TableRow::from_todo(todo).format(),
            Layout::Plain => format!("{}: {}", todo.path, todo.comment),
        })
        .collect()
}
