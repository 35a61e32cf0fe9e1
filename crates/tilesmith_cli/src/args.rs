//! Command-line arguments

use std::path::PathBuf;
use thiserror::Error;

pub const USAGE: &str = "\
Usage:
  tilesmith [--verbose] validate [--deny-warnings] [--check-images] [--config FILE] <PATH>...
  tilesmith [--verbose] inspect <FILE.tsx>
  tilesmith [--verbose] export <FILE.tsx> [-o OUT]

PATH may be a .tsx tileset, a .tmx map or a directory holding them.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("no command given")]
    MissingCommand,

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("option '{0}' needs a value")]
    MissingValue(String),

    #[error("{0} needs a file or directory argument")]
    MissingPath(&'static str),

    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidateArgs {
    pub paths: Vec<PathBuf>,
    /// Set only by flags; the config file fills in the rest
    pub deny_warnings: bool,
    pub check_images: bool,
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Validate(ValidateArgs),
    Inspect { path: PathBuf },
    Export { path: PathBuf, output: Option<PathBuf> },
    Help,
    Version,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    pub verbose: bool,
    pub command: Command,
}

/// Parse arguments, not including the program name
pub fn parse_args<I>(args: I) -> Result<Cli, ArgsError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut verbose = false;

    let command = loop {
        let Some(arg) = args.next() else {
            return Err(ArgsError::MissingCommand);
        };
        match arg.as_str() {
            "-v" | "--verbose" => verbose = true,
            "-h" | "--help" | "help" => break Command::Help,
            "-V" | "--version" => break Command::Version,
            "validate" => break parse_validate(&mut args, &mut verbose)?,
            "inspect" => break parse_inspect(&mut args, &mut verbose)?,
            "export" => break parse_export(&mut args, &mut verbose)?,
            other if other.starts_with('-') => {
                return Err(ArgsError::UnknownOption(other.to_string()))
            }
            other => return Err(ArgsError::UnknownCommand(other.to_string())),
        }
    };

    Ok(Cli { verbose, command })
}

fn parse_validate(
    args: &mut impl Iterator<Item = String>,
    verbose: &mut bool,
) -> Result<Command, ArgsError> {
    let mut parsed = ValidateArgs::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--deny-warnings" => parsed.deny_warnings = true,
            "--check-images" => parsed.check_images = true,
            "--config" => parsed.config = Some(next_value(args, &arg)?),
            "-v" | "--verbose" => *verbose = true,
            other if other.starts_with('-') => {
                return Err(ArgsError::UnknownOption(other.to_string()))
            }
            _ => parsed.paths.push(PathBuf::from(arg)),
        }
    }
    if parsed.paths.is_empty() {
        return Err(ArgsError::MissingPath("validate"));
    }
    Ok(Command::Validate(parsed))
}

fn parse_inspect(
    args: &mut impl Iterator<Item = String>,
    verbose: &mut bool,
) -> Result<Command, ArgsError> {
    let mut path = None;
    for arg in args {
        match arg.as_str() {
            "-v" | "--verbose" => *verbose = true,
            other if other.starts_with('-') => {
                return Err(ArgsError::UnknownOption(other.to_string()))
            }
            _ if path.is_some() => return Err(ArgsError::UnexpectedArgument(arg)),
            _ => path = Some(PathBuf::from(arg)),
        }
    }
    let path = path.ok_or(ArgsError::MissingPath("inspect"))?;
    Ok(Command::Inspect { path })
}

fn parse_export(
    args: &mut impl Iterator<Item = String>,
    verbose: &mut bool,
) -> Result<Command, ArgsError> {
    let mut path = None;
    let mut output = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-o" | "--output" => output = Some(next_value(args, &arg)?),
            "-v" | "--verbose" => *verbose = true,
            other if other.starts_with('-') => {
                return Err(ArgsError::UnknownOption(other.to_string()))
            }
            _ if path.is_some() => return Err(ArgsError::UnexpectedArgument(arg)),
            _ => path = Some(PathBuf::from(arg)),
        }
    }
    let path = path.ok_or(ArgsError::MissingPath("export"))?;
    Ok(Command::Export { path, output })
}

fn next_value(args: &mut impl Iterator<Item = String>, option: &str) -> Result<PathBuf, ArgsError> {
    args.next()
        .filter(|value| !value.starts_with('-'))
        .map(PathBuf::from)
        .ok_or_else(|| ArgsError::MissingValue(option.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, ArgsError> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_validate() {
        let cli = parse(&[
            "validate",
            "--deny-warnings",
            "assets/tiles",
            "--config",
            "ci.toml",
            "map.tmx",
        ])
        .unwrap();
        assert!(!cli.verbose);
        assert_eq!(
            cli.command,
            Command::Validate(ValidateArgs {
                paths: vec![PathBuf::from("assets/tiles"), PathBuf::from("map.tmx")],
                deny_warnings: true,
                check_images: false,
                config: Some(PathBuf::from("ci.toml")),
            })
        );
    }

    #[test]
    fn test_verbose_anywhere() {
        let before = parse(&["--verbose", "inspect", "a.tsx"]).unwrap();
        assert!(before.verbose);
        let after = parse(&["inspect", "a.tsx", "-v"]).unwrap();
        assert!(after.verbose);
        assert_eq!(
            after.command,
            Command::Inspect {
                path: PathBuf::from("a.tsx")
            }
        );
    }

    #[test]
    fn test_export() {
        let cli = parse(&["export", "a.tsx", "-o", "a.json"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Export {
                path: PathBuf::from("a.tsx"),
                output: Some(PathBuf::from("a.json")),
            }
        );
        let stdout = parse(&["export", "a.tsx"]).unwrap();
        assert_eq!(
            stdout.command,
            Command::Export {
                path: PathBuf::from("a.tsx"),
                output: None,
            }
        );
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(&["--help"]).unwrap().command, Command::Help);
        assert_eq!(parse(&["help"]).unwrap().command, Command::Help);
        assert_eq!(parse(&["-V"]).unwrap().command, Command::Version);
    }

    #[test]
    fn test_usage_errors() {
        assert_eq!(parse(&[]), Err(ArgsError::MissingCommand));
        assert_eq!(
            parse(&["lint"]),
            Err(ArgsError::UnknownCommand("lint".to_string()))
        );
        assert_eq!(parse(&["validate"]), Err(ArgsError::MissingPath("validate")));
        assert_eq!(
            parse(&["validate", "--strict", "a.tsx"]),
            Err(ArgsError::UnknownOption("--strict".to_string()))
        );
        assert_eq!(
            parse(&["validate", "a.tsx", "--config"]),
            Err(ArgsError::MissingValue("--config".to_string()))
        );
        assert_eq!(
            parse(&["inspect", "a.tsx", "b.tsx"]),
            Err(ArgsError::UnexpectedArgument("b.tsx".to_string()))
        );
        assert_eq!(
            parse(&["export", "-o"]),
            Err(ArgsError::MissingValue("-o".to_string()))
        );
    }
}
