// Command Line Helpers
// Logging setup and argument handling shared by keygen, encrypt and decrypt

use crate::config::StreamConfig;
use clap::error::ErrorKind;
use clap::{crate_version, value_parser, Arg, ArgAction, ArgMatches, Command};
use log::LevelFilter;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process;

/// Warnings by default, info with -v; RUST_LOG still wins
pub fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };

    env_logger::builder()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}

/// Exit status for a failed parse: 0 for help/version, 1 otherwise
pub fn exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

/// Parse `args`, printing usage or the parse error to stderr and exiting on failure
pub fn parse_args_from<I, T>(cmd: Command, args: I) -> ArgMatches
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match cmd.try_get_matches_from(args) {
        Ok(m) => m,
        Err(e) => {
            eprint!("{}", e.render());
            process::exit(exit_code(&e));
        }
    }
}

/// Parse the process arguments
pub fn parse_args(cmd: Command) -> ArgMatches {
    parse_args_from(cmd, std::env::args_os())
}

/// Options shared by encrypt and decrypt: -i, -o, -n, -v
pub fn stream_command(
    name: &'static str,
    about: &'static str,
    key_help: &'static str,
    default_key: &'static str,
) -> Command {
    Command::new(name)
        .version(crate_version!())
        .about(about)
        .arg(
            Arg::new("input")
                .short('i')
                .value_name("INFILE")
                .action(ArgAction::Set)
                .value_parser(value_parser!(PathBuf))
                .help("Read input from INFILE. Default: standard input"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .value_name("OUTFILE")
                .action(ArgAction::Set)
                .value_parser(value_parser!(PathBuf))
                .help("Write output to OUTFILE. Default: standard output"),
        )
        .arg(
            Arg::new("key")
                .short('n')
                .value_name("KEYFILE")
                .action(ArgAction::Set)
                .default_value(default_key)
                .value_parser(value_parser!(PathBuf))
                .help(key_help),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .help("Enable verbose output"),
        )
}

/// Stream settings from matches built by `stream_command`
pub fn stream_config(m: &ArgMatches) -> StreamConfig {
    StreamConfig {
        input: m.get_one::<PathBuf>("input").cloned(),
        output: m.get_one::<PathBuf>("output").cloned(),
        key: m.get_one::<PathBuf>("key").cloned().unwrap_or_default(),
    }
}

/// Display name of an optional stream path
pub fn stream_name(path: Option<&Path>, default: &str) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| default.to_string())
}

/// Report an error chain on stderr and exit with status 1
pub fn exit_on_error(program: &str, result: anyhow::Result<()>) {
    if let Err(e) = result {
        eprintln!("{}: {:#}", program, e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> Command {
        Command::new("tool").arg(
            Arg::new("verbose")
                .short('v')
                .action(ArgAction::SetTrue),
        )
    }

    #[test]
    fn test_help_exits_zero() {
        let err = command().try_get_matches_from(["tool", "-h"]).unwrap_err();
        assert_eq!(exit_code(&err), 0);
    }

    #[test]
    fn test_unknown_option_exits_one() {
        let err = command().try_get_matches_from(["tool", "-x"]).unwrap_err();
        assert_eq!(exit_code(&err), 1);
    }

    #[test]
    fn test_parse_args_from() {
        let m = parse_args_from(command(), ["tool", "-v"]);
        assert!(m.get_flag("verbose"));
    }

    #[test]
    fn test_stream_name() {
        assert_eq!(stream_name(None, "standard input"), "standard input");
        assert_eq!(stream_name(Some(Path::new("a.txt")), "standard input"), "a.txt");
    }

    #[test]
    fn test_stream_config_defaults() {
        let cmd = stream_command("encrypt", "encrypts", "Public key file", "rsa.pub");
        let config = stream_config(&parse_args_from(cmd, ["encrypt"]));
        assert!(config.input.is_none());
        assert!(config.output.is_none());
        assert_eq!(config.key, PathBuf::from("rsa.pub"));
    }

    #[test]
    fn test_stream_config_paths() {
        let cmd = stream_command("decrypt", "decrypts", "Private key file", "rsa.priv");
        let m = parse_args_from(cmd, ["decrypt", "-i", "in.txt", "-o", "out.txt", "-n", "k.priv", "-v"]);
        let config = stream_config(&m);
        assert_eq!(config.input, Some(PathBuf::from("in.txt")));
        assert_eq!(config.output, Some(PathBuf::from("out.txt")));
        assert_eq!(config.key, PathBuf::from("k.priv"));
        assert!(m.get_flag("verbose"));
    }
}
