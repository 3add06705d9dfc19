//! Parsing of REPL input lines.

use pawfinder_core::search::SortOrder;

/// Commands offered for completion, in help order.
pub const COMMAND_NAMES: &[&str] = &[
    "login", "logout", "breeds", "breed", "age", "zip", "apply", "reset", "sort", "size", "next",
    "prev", "show", "fav", "unfav", "favs", "match", "loc", "help", "quit",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreedEdit {
    Add(String),
    Remove(String),
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Login { email: String, name: String },
    Logout,
    Breeds(Option<String>),
    Breed(BreedEdit),
    Age { min: Option<u32>, max: Option<u32> },
    Zip(Vec<String>),
    Apply,
    Reset,
    Sort(SortOrder),
    Size(u32),
    Next,
    Prev,
    Show,
    Fav(String),
    Unfav(String),
    Favs,
    Match,
    Loc(String),
    Help,
    Quit,
}

/// Parses one input line. Errors are shown to the user verbatim.
pub fn parse(line: &str) -> Result<ShellCommand, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err("empty input".to_string());
    };
    let rest: Vec<&str> = words.collect();

    let command = match head.to_lowercase().as_str() {
        "login" => {
            let [email, name @ ..] = rest.as_slice() else {
                return Err("usage: login EMAIL NAME".to_string());
            };
            if name.is_empty() {
                return Err("usage: login EMAIL NAME".to_string());
            }
            ShellCommand::Login {
                email: email.to_string(),
                name: name.join(" "),
            }
        }
        "logout" => ShellCommand::Logout,
        "breeds" => ShellCommand::Breeds((!rest.is_empty()).then(|| rest.join(" "))),
        "breed" => match rest.as_slice() {
            ["add", name @ ..] if !name.is_empty() => ShellCommand::Breed(BreedEdit::Add(name.join(" "))),
            ["rm", name @ ..] if !name.is_empty() => {
                ShellCommand::Breed(BreedEdit::Remove(name.join(" ")))
            }
            ["clear"] => ShellCommand::Breed(BreedEdit::Clear),
            _ => return Err("usage: breed add NAME | breed rm NAME | breed clear".to_string()),
        },
        "age" => match rest.as_slice() {
            [min, max] => ShellCommand::Age {
                min: parse_bound(min)?,
                max: parse_bound(max)?,
            },
            _ => return Err("usage: age MIN MAX  (use - for no bound)".to_string()),
        },
        "zip" => ShellCommand::Zip(rest.iter().map(|z| z.to_string()).collect()),
        "apply" | "search" => ShellCommand::Apply,
        "reset" => ShellCommand::Reset,
        "sort" => match rest.as_slice() {
            [order] => ShellCommand::Sort(order.parse().map_err(|e: pawfinder_core::PawError| e.to_string())?),
            _ => return Err("usage: sort FIELD:DIR  (e.g. breed:asc, age:desc)".to_string()),
        },
        "size" => match rest.as_slice() {
            [n] => ShellCommand::Size(n.parse().map_err(|_| format!("'{n}' is not a page size"))?),
            _ => return Err("usage: size N".to_string()),
        },
        "next" | "n" => ShellCommand::Next,
        "prev" | "p" => ShellCommand::Prev,
        "show" | "ls" => ShellCommand::Show,
        "fav" => ShellCommand::Fav(single_arg(&rest, "fav N|ID")?),
        "unfav" => ShellCommand::Unfav(single_arg(&rest, "unfav N|ID")?),
        "favs" => ShellCommand::Favs,
        "match" => ShellCommand::Match,
        "loc" => ShellCommand::Loc(single_arg(&rest, "loc ZIP")?),
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command '{other}', type 'help'")),
    };
    Ok(command)
}

fn parse_bound(raw: &str) -> Result<Option<u32>, String> {
    if raw == "-" {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| format!("'{raw}' is not an age in years"))
}

fn single_arg(rest: &[&str], usage: &str) -> Result<String, String> {
    match rest {
        [arg] => Ok(arg.to_string()),
        _ => Err(format!("usage: {usage}")),
    }
}

pub fn help_text() -> &'static str {
    "\
login EMAIL NAME     log in to the catalog service
logout               log out
breeds [TEXT]        list breeds, optionally matching TEXT
breed add|rm NAME    edit the breed filter (then 'apply')
breed clear          drop every breed from the filter
age MIN MAX          age bounds in years, '-' for none (then 'apply')
apply                search with the edited filters
zip [ZIP...]         restrict to zip codes (none lifts it)
reset                clear all filters
sort FIELD:DIR       breed|name|age : asc|desc
size N               dogs per page (12, 24, 48, 100)
next, prev           move between pages
show                 print the current page again
fav N|ID, unfav N|ID add/remove a favorite (N = position on page)
favs                 list favorites
match                find your match among favorites
loc ZIP              look up a zip code
quit                 leave"
}
