use nom::{bytes::complete as bytes, character::complete as character, combinator, IResult, Parser};
use serde::Serialize;

use crate::finder::SourceFile;

pub mod date;
pub mod source;

use source::ParsedTodo;

/// The token that starts every recognized TODO comment.
pub const MARKER: &str = "// TODO";

/// Eat the marker, as long as it isn't glued to more text (eg. `// TODOS`).
///
/// ```rust
/// use todo_query_lib::parser::*;
///
/// assert_eq!(marker("// TODO fix it"), Ok((" fix it", "// TODO")));
/// assert_eq!(marker("// TODO"), Ok(("", "// TODO")));
/// assert!(marker("// TODOS").is_err());
/// assert!(marker("//TODO").is_err());
/// ```
pub fn marker(i: &str) -> IResult<&str, &str> {
    let (i, tag) = bytes::tag(MARKER).parse(i)?;
    let (i, _) = combinator::not(character::satisfy(|c: char| !c.is_whitespace())).parse(i)?;
    Ok((i, tag))
}

fn until_marker(i: &str) -> IResult<&str, &str> {
    bytes::take_until(MARKER).parse(i)
}

/// Find the TODO comment on one line of source, if any. The comment runs from
/// the first marker to the end of the line.
///
/// ```rust
/// use todo_query_lib::parser::*;
///
/// assert_eq!(
///     comment_in_line("let x = 1; // TODO {bob}; 2024-01-01; rename"),
///     Some("// TODO {bob}; 2024-01-01; rename")
/// );
/// assert_eq!(comment_in_line("// TODOS // TODO later"), Some("// TODO later"));
/// assert_eq!(comment_in_line("/* TODO block */"), None);
/// ```
pub fn comment_in_line(line: &str) -> Option<&str> {
    let mut i = line;
    loop {
        let (j, _) = until_marker(i).ok()?;
        if marker(j).is_ok() {
            return Some(j);
        }
        // Skip past the '/' that started this false match.
        i = &j[1..];
    }
}

/// Every TODO comment in the text, in the order they appear.
pub fn extract_comments(content: &str) -> Vec<&str> {
    content
        .split(|c: char| c == '\n' || c == '\r')
        .filter_map(comment_in_line)
        .collect()
}

/// One TODO comment and the file it was found in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TodoComment {
    pub path: String,
    pub comment: String,
}

impl TodoComment {
    pub fn new(path: &str, comment: &str) -> Self {
        TodoComment {
            path: path.into(),
            comment: comment.into(),
        }
    }

    /// Parse the metadata out of the raw comment.
    pub fn parsed(&self) -> ParsedTodo<'_> {
        source::parse_todo(&self.comment)
    }

    /// The number of `!` in the comment.
    pub fn importance(&self) -> usize {
        source::importance(&self.comment)
    }
}

/// Extract the TODO comments from each file, in file order.
pub fn extract_todos(files: &[SourceFile]) -> Vec<TodoComment> {
    let mut todos = vec![];
    for file in files.iter() {
        for comment in extract_comments(&file.content) {
            log::trace!("{}: {comment}", file.path);
            todos.push(TodoComment::new(&file.path, comment));
        }
    }
    todos
}
