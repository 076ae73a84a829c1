//! # Parsing metadata out of a TODO comment.
//!
//! A comment looks like `// TODO {name}; yyyy-mm-dd; free text`, where the
//! name and the date are both optional. Parsing never fails: whatever doesn't
//! fit a section is left in the free text.
use chrono::NaiveDate;
use nom::{
    bytes::complete as bytes, character::complete as character, combinator, error::ErrorKind,
    Err, IResult, Parser,
};

use super::marker;

/// Eat an assignee section, the text up to the first `;` along with the `;`.
/// Curly braces around the name are removed. A blank name is `None`.
///
/// ```rust
/// use todo_query_lib::parser::source::*;
///
/// assert_eq!(assignee(" {Alice}; rest"), Ok((" rest", Some("Alice"))));
/// assert_eq!(assignee(" { Bob } ;"), Ok(("", Some("Bob"))));
/// assert_eq!(assignee(" charlie;2024-01-01;"), Ok(("2024-01-01;", Some("charlie"))));
/// assert_eq!(assignee("  ; rest"), Ok((" rest", None)));
/// assert!(assignee(" no semicolon").is_err());
/// assert!(assignee("; empty").is_err());
/// ```
pub fn assignee(i: &str) -> IResult<&str, Option<&str>> {
    let (i, field) = bytes::is_not(";").parse(i)?;
    let (i, _) = character::char(';').parse(i)?;
    let name = field.trim();
    let name = name
        .strip_prefix('{')
        .and_then(|name| name.strip_suffix('}'))
        .map(str::trim)
        .unwrap_or(name);
    Ok((i, if name.is_empty() { None } else { Some(name) }))
}

fn digits(n: usize) -> impl Fn(&str) -> IResult<&str, u32> {
    move |i| {
        let (i, ds) = bytes::take_while_m_n(n, n, |c: char| c.is_ascii_digit()).parse(i)?;
        // UNWRAP: safe because we only took ascii digits, and few enough of them.
        Ok((i, ds.parse().unwrap()))
    }
}

/// Eat a `yyyy-mm-dd;` date section, with optional spaces around the date.
/// Impossible dates are rejected.
///
/// ```rust
/// use chrono::NaiveDate;
/// use todo_query_lib::parser::source::*;
///
/// assert_eq!(
///     date(" 2024-06-01 ; fix"),
///     Ok((" fix", NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()))
/// );
/// assert!(date("2024-02-30;").is_err());
/// assert!(date("2024-6-1;").is_err());
/// assert!(date("2024-06-01 fix").is_err());
/// ```
pub fn date(i: &str) -> IResult<&str, NaiveDate> {
    let input = i;
    let (i, _) = character::space0(i)?;
    let (i, (year, _, month, _, day)) = (
        digits(4),
        character::char('-'),
        digits(2),
        character::char('-'),
        digits(2),
    )
        .parse(i)?;
    let (i, _) = character::space0(i)?;
    let (i, _) = character::char(';').parse(i)?;
    // An impossible date like 2021-13-01 is no date at all, and stays in the text.
    match NaiveDate::from_ymd_opt(year as i32, month, day) {
        Some(date) => Ok((i, date)),
        None => Err(Err::Error(nom::error::Error {
            input,
            code: ErrorKind::Verify,
        })),
    }
}

/// Count the `!` in a comment.
pub fn importance(comment: &str) -> usize {
    comment.matches('!').count()
}

/// A structure to conveniently hold a parsed todo comment.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedTodo<'a> {
    pub assignee: Option<&'a str>,
    pub date: Option<NaiveDate>,
    pub importance: usize,
    pub text: &'a str,
}

impl<'a> ParsedTodo<'a> {
    pub fn from_text(text: &'a str) -> Self {
        ParsedTodo {
            text,
            ..Default::default()
        }
    }

    pub fn with_assignee(mut self, name: &'a str) -> Self {
        self.assignee = Some(name);
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_importance(mut self, importance: usize) -> Self {
        self.importance = importance;
        self
    }

    /// The assignee, lowercased for comparison.
    pub fn assignee_key(&self) -> Option<String> {
        self.assignee.map(str::to_lowercase)
    }
}

/// Parse a raw TODO comment into its parts.
///
/// ```rust
/// use chrono::NaiveDate;
/// use todo_query_lib::parser::source::*;
///
/// assert_eq!(
///     parse_todo("// TODO {Alice}; 2024-06-01; ship it!!"),
///     ParsedTodo::from_text("ship it!!")
///         .with_assignee("Alice")
///         .with_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
///         .with_importance(2)
/// );
///
/// assert_eq!(
///     parse_todo("// TODO just some text"),
///     ParsedTodo::from_text("just some text")
/// );
/// ```
pub fn parse_todo(comment: &str) -> ParsedTodo<'_> {
    let importance = importance(comment);
    let Ok((i, _)) = marker(comment) else {
        return ParsedTodo::from_text(comment.trim()).with_importance(importance);
    };

    let (i, assignee) = match assignee(i) {
        Ok((j, name)) => (j, name),
        Err(_) => (i, None),
    };
    let (i, date) = match combinator::opt(date).parse(i) {
        Ok((j, date)) => (j, date),
        Err(_) => (i, None),
    };

    ParsedTodo {
        assignee,
        date,
        importance,
        text: i.trim(),
    }
}
