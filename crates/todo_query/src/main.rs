use std::path::PathBuf;

use clap::Parser;
use console::Style;
use todo_query_lib::{
    finder::{FileSearcher, SearchConfig},
    output::Layout,
    repl::{Reply, Session, GREETING},
};

#[derive(Debug, Default, Clone, Copy, clap::ValueEnum)]
enum Format {
    /// Columns of importance, user, date and comment
    #[default]
    Table,
    /// One `path: comment` per line
    Plain,
}

impl From<Format> for Layout {
    fn from(format: Format) -> Self {
        match format {
            Format::Table => Layout::Table,
            Format::Plain => Layout::Plain,
        }
    }
}

#[derive(clap::Parser, Debug)]
#[command(
    version,
    about,
    author,
    help_template(
        "\
{before-help}{name} {version} by {author-with-newline}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}"
    )
)]
struct Cli {
    #[clap(short, long)]
    /// The directory to search for TODOs. Defaults to the current directory.
    root: Option<PathBuf>,

    #[clap(short = 'x', long, default_value = "js")]
    /// Extension of the files to search.
    extension: String,

    #[clap(short, long)]
    /// Glob of files or directories to ignore,
    /// may be supplied multiple times.
    exclude: Vec<String>,

    #[clap(short, long, value_enum, default_value_t)]
    /// How to lay out lists of TODOs.
    format: Format,
}

struct Printer {
    red: Style,
    yellow: Style,
    bold: Style,
    dim: Style,
}

impl Default for Printer {
    fn default() -> Self {
        Self {
            red: Style::new().red(),
            yellow: Style::new().yellow(),
            bold: Style::new().bold(),
            dim: Style::new().dim(),
        }
    }
}

impl Printer {
    fn print(&self, reply: Reply) {
        match reply {
            Reply::Exit => {}
            Reply::Raw(raw) => println!("{raw}"),
            Reply::Listing { title, lines } => {
                println!("{}", self.bold.apply_to(title));
                for line in lines {
                    println!("{line}");
                }
            }
            Reply::Notice(msg) => println!("{}", self.yellow.apply_to(msg)),
            Reply::Usage(usage) => println!("{}", self.dim.apply_to(usage)),
            wrong @ Reply::WrongCommand => println!("{}", self.red.apply_to(wrong)),
        }
    }

    fn error(&self, err: todo_query_lib::Error) {
        eprintln!("{}", self.red.apply_to(err.to_string()));
    }
}

fn run(cli: Cli, printer: &Printer) -> Result<(), todo_query_lib::Error> {
    let Cli {
        root,
        extension,
        exclude,
        format,
    } = cli;
    let root = match root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };

    let config = SearchConfig::new(root, &extension).with_excludes(exclude);
    log::debug!("searching with {config:?}");
    let files = FileSearcher::find(&config)?;
    let session = Session::new(files, format.into());

    println!("{GREETING}");
    let stdin = std::io::stdin();
    session.run(stdin.lock(), |reply| printer.print(reply))
}

fn main() {
    env_logger::builder().init();

    let cli = Cli::parse();
    let printer = Printer::default();
    if let Err(err) = run(cli, &printer) {
        printer.error(err);
        std::process::exit(1);
    }
}
