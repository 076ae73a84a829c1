//! The interactive command loop.
//!
//! Each line of input is parsed into a [`Command`] and run against the
//! snapshot of source files taken at startup, producing a [`Reply`] for the
//! caller to print.
use std::{borrow::Cow, io::BufRead};

use snafu::ResultExt;

use crate::{
    finder::SourceFile,
    output::{self, Layout, NOT_FOUND},
    parser::{date::parse_date_query, extract_todos, TodoComment},
    query, Error, IoSnafu, JsonSnafu,
};

/// Printed once before the first command is read.
pub const GREETING: &str = "Please, write your command!";
pub const WRONG_COMMAND: &str = "wrong command";
pub const NO_IMPORTANT: &str = "No important TODO comments found.";
pub const INVALID_DATE: &str = "Invalid date format. Use yyyy, yyyy-mm, or yyyy-mm-dd.";

pub const USER_USAGE: &str = "Usage: user {username}";
pub const SORT_USAGE: &str = "Usage: sort {importance | user | date}";
pub const DATE_USAGE: &str = "Usage: date {yyyy[-mm[-dd]]}";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    Importance,
    User,
    Date,
}

impl SortKey {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "importance" => Some(SortKey::Importance),
            "user" => Some(SortKey::User),
            "date" => Some(SortKey::Date),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Exit,
    GetTodos,
    Show,
    Important,
    User(String),
    Sort(SortKey),
    /// The raw date argument, parsed when the command runs.
    Date(String),
}

/// Why a line isn't a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandError {
    Usage(&'static str),
    Unknown,
}

impl Command {
    /// Parse one line of input. Words are separated by any whitespace.
    ///
    /// ```rust
    /// use todo_query_lib::repl::*;
    ///
    /// assert_eq!(Command::parse("  show "), Ok(Command::Show));
    /// assert_eq!(Command::parse("user Alice"), Ok(Command::User("Alice".into())));
    /// assert_eq!(Command::parse("sort date"), Ok(Command::Sort(SortKey::Date)));
    /// assert_eq!(Command::parse("sort size"), Err(CommandError::Usage(SORT_USAGE)));
    /// assert_eq!(Command::parse("list"), Err(CommandError::Unknown));
    /// ```
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let mut words = line.split_whitespace();
        let cmd = words.next().unwrap_or_default();
        let args = words.collect::<Vec<_>>();

        match (cmd, args.as_slice()) {
            ("exit", _) => Ok(Command::Exit),
            ("get-todos", _) => Ok(Command::GetTodos),
            ("show", _) => Ok(Command::Show),
            ("important", _) => Ok(Command::Important),
            ("user", [name]) => Ok(Command::User(name.to_string())),
            ("user", _) => Err(CommandError::Usage(USER_USAGE)),
            ("sort", [key]) => SortKey::from_arg(key)
                .map(Command::Sort)
                .ok_or(CommandError::Usage(SORT_USAGE)),
            ("sort", _) => Err(CommandError::Usage(SORT_USAGE)),
            ("date", [date]) => Ok(Command::Date(date.to_string())),
            ("date", _) => Err(CommandError::Usage(DATE_USAGE)),
            _ => Err(CommandError::Unknown),
        }
    }
}

/// What the loop has to say after a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    Exit,
    /// The records themselves, as JSON.
    Raw(String),
    /// A titled list of rendered TODOs.
    Listing { title: String, lines: Vec<String> },
    /// A message in place of results.
    Notice(&'static str),
    Usage(&'static str),
    WrongCommand,
}

impl From<CommandError> for Reply {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Usage(usage) => Reply::Usage(usage),
            CommandError::Unknown => Reply::WrongCommand,
        }
    }
}

impl std::fmt::Display for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reply::Exit => Ok(()),
            Reply::Raw(raw) => write!(f, "{raw}"),
            Reply::Listing { title, lines } => {
                write!(f, "{title}")?;
                for line in lines.iter() {
                    write!(f, "\n{line}")?;
                }
                Ok(())
            }
            Reply::Notice(msg) | Reply::Usage(msg) => write!(f, "{msg}"),
            Reply::WrongCommand => write!(f, "{WRONG_COMMAND}"),
        }
    }
}

/// The immutable snapshot the commands run against.
pub struct Session {
    files: Vec<SourceFile>,
    layout: Layout,
}

impl Session {
    pub fn new(files: Vec<SourceFile>, layout: Layout) -> Self {
        Session { files, layout }
    }

    /// Extract the TODOs from the snapshot, fresh for each command.
    pub fn todos(&self) -> Vec<TodoComment> {
        extract_todos(&self.files)
    }

    fn listing(&self, title: impl Into<String>, todos: &[&TodoComment]) -> Reply {
        Reply::Listing {
            title: title.into(),
            lines: output::render(todos, self.layout),
        }
    }

    pub fn execute(&self, command: Command) -> Result<Reply, Error> {
        log::debug!("executing {command:?}");
        let todos = self.todos();
        let all = todos.iter().collect::<Vec<_>>();

        let reply = match command {
            Command::Exit => Reply::Exit,
            Command::GetTodos => {
                Reply::Raw(serde_json::to_string_pretty(&todos).context(JsonSnafu)?)
            }
            Command::Show => self.listing("List of TODO comments:", &all),
            Command::Important => self.listing(
                "List of important TODO comments:",
                &query::important(&todos),
            ),
            Command::User(name) => {
                let name = name.to_lowercase();
                self.listing(
                    format!("List of TODO comments by user \"{name}\":"),
                    &query::by_assignee(&todos, &name),
                )
            }
            Command::Sort(_) if todos.is_empty() => Reply::Notice(NOT_FOUND),
            Command::Sort(SortKey::Importance) => {
                let sorted = query::sort_by_importance(&todos);
                if sorted.is_empty() {
                    Reply::Notice(NO_IMPORTANT)
                } else {
                    self.listing("TODO comments sorted by importance:", &sorted)
                }
            }
            Command::Sort(SortKey::User) => self.listing(
                "TODO comments sorted by user:",
                &query::sort_by_assignee(&todos),
            ),
            Command::Sort(SortKey::Date) => self.listing(
                "TODO comments sorted by date:",
                &query::sort_by_date(&todos),
            ),
            Command::Date(arg) => match parse_date_query(&arg) {
                Ok(date) => self.listing(
                    format!("TODO comments created after {arg}:"),
                    &query::since(&todos, date),
                ),
                Err(err) => {
                    log::debug!("{err}");
                    Reply::Notice(INVALID_DATE)
                }
            },
        };
        Ok(reply)
    }

    /// Parse and execute one line of input.
    pub fn dispatch(&self, line: &str) -> Result<Reply, Error> {
        match Command::parse(line) {
            Ok(command) => self.execute(command),
            Err(err) => Ok(err.into()),
        }
    }

    /// Read commands line by line until `exit` or the end of the input,
    /// handing each reply to `on_reply`.
    /// Undecodable bytes in a line are replaced rather than ending the loop.
    pub fn run(
        &self,
        mut input: impl BufRead,
        mut on_reply: impl FnMut(Reply),
    ) -> Result<(), Error> {
        let mut buf = vec![];
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf).context(IoSnafu)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            if let Cow::Owned(_) = line {
                log::warn!("input line was not valid UTF-8");
            }
            let line = line.trim_end_matches(['\n', '\r']);
            match self.dispatch(line)? {
                Reply::Exit => return Ok(()),
                reply => on_reply(reply),
            }
        }
        log::debug!("end of input");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(
            vec![
                SourceFile::new(
                    "a.js",
                    "\
// TODO {Alice}; 2024-06-01; make it faster!
const x = 1; // TODO bob; 2023-12-31; rename x
",
                ),
                SourceFile::new("b.js", "// TODO alice; 2018-03-04; cleanup!!!\n// TODO drift\n"),
            ],
            Layout::Table,
        )
    }

    fn listing(reply: Reply) -> (String, Vec<String>) {
        match reply {
            Reply::Listing { title, lines } => (title, lines),
            other => panic!("expected a listing, got {other:?}"),
        }
    }

    #[test]
    fn parse_argument_counts() {
        assert_eq!(Command::parse("user"), Err(CommandError::Usage(USER_USAGE)));
        assert_eq!(
            Command::parse("user a b"),
            Err(CommandError::Usage(USER_USAGE))
        );
        assert_eq!(Command::parse("sort"), Err(CommandError::Usage(SORT_USAGE)));
        assert_eq!(Command::parse("date"), Err(CommandError::Usage(DATE_USAGE)));
        assert_eq!(
            Command::parse("date 2024 2025"),
            Err(CommandError::Usage(DATE_USAGE))
        );
        assert_eq!(Command::parse(""), Err(CommandError::Unknown));
        assert_eq!(Command::parse("EXIT"), Err(CommandError::Unknown));
        assert_eq!(Command::parse("exit now"), Ok(Command::Exit));
    }

    #[test]
    fn show_lists_everything() {
        let (title, lines) = listing(session().dispatch("show").unwrap());
        assert_eq!(title, "List of TODO comments:");
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("!   |  Alice"));
    }

    #[test]
    fn important_orders_by_bang_count() {
        let (_, lines) = listing(session().dispatch("important").unwrap());
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("cleanup!!!"));
        assert!(lines[1].contains("make it faster!"));
    }

    #[test]
    fn user_is_case_insensitive() {
        let (title, lines) = listing(session().dispatch("user ALICE").unwrap());
        assert_eq!(title, "List of TODO comments by user \"alice\":");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn user_without_matches_is_not_found() {
        let (_, lines) = listing(session().dispatch("user carol").unwrap());
        assert_eq!(lines, vec![NOT_FOUND]);
    }

    #[test]
    fn date_filter_and_errors() {
        let (title, lines) = listing(session().dispatch("date 2024").unwrap());
        assert_eq!(title, "TODO comments created after 2024:");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("2024-06-01"));

        assert_eq!(
            session().dispatch("date someday").unwrap(),
            Reply::Notice(INVALID_DATE)
        );
    }

    #[test]
    fn sort_by_date_puts_undated_last() {
        let (_, lines) = listing(session().dispatch("sort date").unwrap());
        assert!(lines[0].contains("2024-06-01"));
        assert!(lines[1].contains("2023-12-31"));
        assert!(lines[2].contains("2018-03-04"));
        assert!(lines[3].contains("drift"));
    }

    #[test]
    fn sort_on_an_empty_snapshot() {
        let empty = Session::new(vec![], Layout::Table);
        assert_eq!(empty.dispatch("sort user").unwrap(), Reply::Notice(NOT_FOUND));

        let calm = Session::new(vec![SourceFile::new("c.js", "// TODO calm")], Layout::Table);
        assert_eq!(
            calm.dispatch("sort importance").unwrap(),
            Reply::Notice(NO_IMPORTANT)
        );
    }

    #[test]
    fn get_todos_is_json() {
        let reply = session().dispatch("get-todos").unwrap();
        let Reply::Raw(raw) = reply else {
            panic!("expected raw output");
        };
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 4);
        assert_eq!(value[3]["path"], "b.js");
        assert_eq!(value[3]["comment"], "// TODO drift");
    }

    #[test]
    fn empty_listing_displays_title_then_not_found() {
        let empty = Session::new(vec![], Layout::Plain);
        assert_eq!(
            empty.dispatch("show").unwrap().to_string(),
            "List of TODO comments:\nNo TODO comments found."
        );
    }

    #[test]
    fn run_stops_at_exit_and_survives_bad_input() {
        let input = "bogus\nuser\nshow\nexit\nshow\n";
        let mut replies = vec![];
        session()
            .run(input.as_bytes(), |reply| replies.push(reply))
            .unwrap();
        assert_eq!(replies.len(), 3);
        assert_eq!(replies[0], Reply::WrongCommand);
        assert_eq!(replies[1], Reply::Usage(USER_USAGE));
        assert!(matches!(replies[2], Reply::Listing { .. }));
    }

    #[test]
    fn run_survives_a_line_that_is_not_utf8() {
        let mut replies = vec![];
        session()
            .run(&b"\xff\xfe\nshow\r\nexit\n"[..], |reply| replies.push(reply))
            .unwrap();
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0], Reply::WrongCommand);
        let (title, lines) = listing(replies.remove(1));
        assert_eq!(title, "List of TODO comments:");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn run_ends_with_the_input() {
        let mut replies = vec![];
        session()
            .run("show\n".as_bytes(), |reply| replies.push(reply))
            .unwrap();
        assert_eq!(replies.len(), 1);
    }
}
