//! Filtering and sorting TODO comments.
//!
//! Every query takes the full list of comments and returns references into
//! it, so results never duplicate or lose a record.
use std::{cmp::Reverse, collections::BTreeMap};

use chrono::NaiveDate;

use crate::parser::TodoComment;

/// Comments with at least one `!`, most important first. Ties keep their
/// original order.
pub fn important(todos: &[TodoComment]) -> Vec<&TodoComment> {
    let mut important = todos
        .iter()
        .filter(|todo| todo.importance() > 0)
        .collect::<Vec<_>>();
    important.sort_by_key(|todo| Reverse(todo.importance()));
    important
}

/// Comments assigned to `name`, compared case-insensitively.
pub fn by_assignee<'a>(todos: &'a [TodoComment], name: &str) -> Vec<&'a TodoComment> {
    let name = name.to_lowercase();
    todos
        .iter()
        .filter(|todo| todo.parsed().assignee_key().as_deref() == Some(name.as_str()))
        .collect()
}

/// Comments dated on or after `date`. Undated comments are left out.
pub fn since(todos: &[TodoComment], date: NaiveDate) -> Vec<&TodoComment> {
    todos
        .iter()
        .filter(|todo| todo.parsed().date.is_some_and(|d| d >= date))
        .collect()
}

/// Same as [`important`].
pub fn sort_by_importance(todos: &[TodoComment]) -> Vec<&TodoComment> {
    important(todos)
}

/// Comments grouped by lowercased assignee.
#[derive(Debug, Default)]
pub struct AssigneeGroups<'a> {
    pub groups: BTreeMap<String, Vec<&'a TodoComment>>,
    pub unrecognized: Vec<&'a TodoComment>,
}

impl<'a> AssigneeGroups<'a> {
    pub fn new(todos: &'a [TodoComment]) -> Self {
        let mut grouped = AssigneeGroups::default();
        for todo in todos.iter() {
            match todo.parsed().assignee_key() {
                Some(key) => grouped.groups.entry(key).or_default().push(todo),
                None => grouped.unrecognized.push(todo),
            }
        }
        grouped
    }

    /// Each group in name order, then the comments without a name.
    pub fn flatten(self) -> Vec<&'a TodoComment> {
        let mut todos = self.groups.into_values().flatten().collect::<Vec<_>>();
        todos.extend(self.unrecognized);
        todos
    }
}

pub fn sort_by_assignee(todos: &[TodoComment]) -> Vec<&TodoComment> {
    AssigneeGroups::new(todos).flatten()
}

/// Dated comments first, newest to oldest, then the undated ones in their
/// original order.
pub fn sort_by_date(todos: &[TodoComment]) -> Vec<&TodoComment> {
    let mut sorted = todos.iter().collect::<Vec<_>>();
    // None sorts below every date, so reversing puts it last.
    sorted.sort_by_key(|todo| Reverse(todo.parsed().date));
    sorted
}
