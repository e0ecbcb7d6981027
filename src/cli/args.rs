use chrono::{DateTime, Utc};
use triplytics_domain::parse_trip_date;

use crate::errors::CliError;

/// One parsed command line: the command word, its positionals and the shared flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invocation {
    pub command: String,
    pub positionals: Vec<String>,
    pub period: Option<String>,
    pub now: Option<DateTime<Utc>>,
    /// Start of an explicit range; the range ends at `now`.
    pub from: Option<DateTime<Utc>>,
    pub json: bool,
}

impl Invocation {
    /// Parses `args` (without the program name). `--flag value` and
    /// `--flag=value` are both accepted; `--help` anywhere turns the line into
    /// `help <command>`.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, CliError> {
        let mut invocation = Invocation::default();
        let mut wants_help = false;
        let mut iter = args.iter().map(|arg| arg.as_ref());

        while let Some(arg) = iter.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) if flag.starts_with("--") => (flag, Some(value)),
                _ => (arg, None),
            };

            match flag {
                "--json" => invocation.json = true,
                "--help" | "-h" => wants_help = true,
                "--period" | "-p" => {
                    let value = flag_value(flag, inline, &mut iter)?;
                    invocation.period = Some(value.to_string());
                }
                "--now" => {
                    invocation.now = Some(parse_instant(flag_value(flag, inline, &mut iter)?)?);
                }
                "--from" => {
                    invocation.from = Some(parse_instant(flag_value(flag, inline, &mut iter)?)?);
                }
                other if other.starts_with("--") => {
                    return Err(CliError::Input(format!("Unknown option `{other}`")));
                }
                _ if invocation.command.is_empty() => invocation.command = arg.to_string(),
                _ => invocation.positionals.push(arg.to_string()),
            }
        }

        if wants_help {
            if !invocation.command.is_empty() {
                let command = std::mem::take(&mut invocation.command);
                invocation.positionals.insert(0, command);
            }
            invocation.command = "help".into();
        } else if invocation.command.is_empty() {
            invocation.command = "help".into();
        }

        Ok(invocation)
    }

    pub fn target(&self) -> Option<&str> {
        self.positionals.first().map(String::as_str)
    }
}

fn parse_instant(value: &str) -> Result<DateTime<Utc>, CliError> {
    parse_trip_date(value)
        .ok_or_else(|| CliError::Input(format!("`{value}` is not a recognised date or timestamp")))
}

fn flag_value<'a>(
    flag: &str,
    inline: Option<&'a str>,
    rest: &mut impl Iterator<Item = &'a str>,
) -> Result<&'a str, CliError> {
    inline
        .or_else(|| rest.next())
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| CliError::Input(format!("`{flag}` expects a value")))
}
