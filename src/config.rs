//! Command-line parsing and run settings.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Separator between candidates in `--pass`.
pub const PASSWORD_DELIMITER: char = '\\';

/// Long flags that are also accepted with a single dash (`-in PDF`).
const SINGLE_DASH_FLAGS: &[&str] = &[
    "in",
    "out",
    "pass",
    "help",
    "version",
    "log-dir",
    "no-cleanup",
];

#[derive(Parser, Debug)]
#[command(
    name = "pdf-unlock",
    about = "Remove owner-password protection from every PDF under a folder",
    long_about = None,
    disable_version_flag = true
)]
/// CLI arguments supported by pdf-unlock.
pub struct Cli {
    /// Input folder to scan for PDF files
    #[arg(long = "in", value_name = "DIR", default_value = "PDF")]
    pub input: PathBuf,

    /// Output folder; the input tree is mirrored below it
    #[arg(long = "out", value_name = "DIR", default_value = "out")]
    pub output: PathBuf,

    /// Candidate owner passwords, tried in order ('abc' | 'abc\def\ghi')
    #[arg(long = "pass", value_name = "PASSWORDS", default_value = "123456")]
    pub pass: String,

    /// Print version and build metadata
    #[arg(short = 'v', long = "version", action = ArgAction::SetTrue)]
    pub version: bool,

    /// Also write a daily-rotated log file to this folder
    #[arg(long = "log-dir", value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Keep empty output folders
    #[arg(long = "no-cleanup", action = ArgAction::SetTrue)]
    pub no_cleanup: bool,
}

impl Cli {
    /// Parses the process arguments, accepting single-dash long flags.
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }
}

/// Rewrites `-in`, `-pass=x` and friends to their `--` spelling.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            let Some(text) = arg.to_str() else {
                return arg;
            };
            let Some(rest) = text.strip_prefix('-') else {
                return arg;
            };
            if rest.starts_with('-') {
                return arg;
            }
            let name = rest.split_once('=').map_or(rest, |(name, _)| name);
            if SINGLE_DASH_FLAGS.contains(&name) {
                OsString::from(format!("--{rest}"))
            } else {
                arg
            }
        })
        .collect()
}

/// Splits the raw `--pass` value into ordered candidates. Empty segments are
/// kept: an empty owner password is a valid candidate.
pub fn split_passwords(raw: &str) -> Vec<String> {
    raw.split(PASSWORD_DELIMITER).map(str::to_string).collect()
}

/// Everything a run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct Settings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub passwords: Vec<String>,
    pub cleanup: bool,
    pub log_dir: Option<PathBuf>,
}

impl Settings {
    /// Builds the run settings from parsed arguments.
    pub fn from_cli(cli: Cli) -> Self {
        Self {
            passwords: split_passwords(&cli.pass),
            input: cli.input,
            output: cli.output,
            cleanup: !cli.no_cleanup,
            log_dir: cli.log_dir,
        }
    }
}

/// Build metadata shown by `--version`.
pub struct BuildInfo {
    pub version: &'static str,
    pub build_time: &'static str,
    pub author: &'static str,
    pub commit: &'static str,
}

impl BuildInfo {
    /// Metadata baked in at compile time.
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            build_time: option_env!("PDF_UNLOCK_BUILD_TIME").unwrap_or("unknown"),
            author: env!("CARGO_PKG_AUTHORS"),
            commit: option_env!("PDF_UNLOCK_COMMIT_ID").unwrap_or("unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(normalize_args(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_match_the_documented_flags() {
        let settings = Settings::from_cli(parse(&["pdf-unlock"]));
        assert_eq!(settings.input, PathBuf::from("PDF"));
        assert_eq!(settings.output, PathBuf::from("out"));
        assert_eq!(settings.passwords, ["123456"]);
        assert!(settings.cleanup);
        assert!(settings.log_dir.is_none());
    }

    #[test]
    fn single_dash_flags_are_accepted() {
        let cli = parse(&["pdf-unlock", "-in", "docs", "-out=done", "-pass", "abc\\def"]);
        assert_eq!(cli.input, PathBuf::from("docs"));
        assert_eq!(cli.output, PathBuf::from("done"));
        assert_eq!(split_passwords(&cli.pass), ["abc", "def"]);
    }

    #[test]
    fn double_dash_flags_still_work() {
        let cli = parse(&["pdf-unlock", "--in", "docs", "--no-cleanup"]);
        assert_eq!(cli.input, PathBuf::from("docs"));
        assert!(cli.no_cleanup);
    }

    #[test]
    fn only_known_long_flags_are_rewritten() {
        let normalized = normalize_args(["pdf-unlock", "-v", "-x", "-pass", "abc", "--out"]);
        assert_eq!(normalized, ["pdf-unlock", "-v", "-x", "--pass", "abc", "--out"]);
    }

    #[test]
    fn version_flag_in_every_spelling() {
        for flag in ["-v", "-version", "--version"] {
            assert!(parse(&["pdf-unlock", flag]).version, "{flag}");
        }
    }

    #[test]
    fn help_flag_in_every_spelling() {
        for flag in ["-h", "-help", "--help"] {
            let err = Cli::try_parse_from(normalize_args(["pdf-unlock", flag])).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp, "{flag}");
        }
    }

    #[test]
    fn split_keeps_order_and_empty_segments() {
        assert_eq!(split_passwords("abc\\def\\ghi"), ["abc", "def", "ghi"]);
        assert_eq!(split_passwords("abc\\"), ["abc", ""]);
        assert_eq!(split_passwords(""), [""]);
    }
}
