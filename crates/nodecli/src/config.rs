//! Configuration loading helpers for the node client CLI.
//!
//! Configuration flags may appear anywhere on the command line. The splitter
//! here canonicalises their short and legacy spellings, hands them to
//! `ortho_config`, and leaves every other token for the command router.

use std::ffi::OsString;

use nodecli_config::{CONFIG_CLI_FLAGS, CONFIG_SWITCHES, Config};
use ortho_config::OrthoConfig;

use crate::AppError;

pub(crate) trait ConfigLoader {
    /// Loads configuration from the filtered configuration arguments.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

/// Short and alternative spellings accepted for configuration flags.
const FLAG_ALIASES: &[(&str, &str)] = &[
    ("-n", "--network"),
    ("-u", "--url"),
    ("--uri", "--url"),
    ("-k", "--api-key"),
    ("--apikey", "--api-key"),
    ("-s", "--ssl"),
    ("-h", "--httphost"),
    ("-p", "--httpport"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum FlagAction {
    /// A configuration flag in canonical spelling.
    Include { flag: String, needs_value: bool },
    /// A command token.
    Skip,
}

fn canonical_flag(flag: &str) -> &str {
    FLAG_ALIASES
        .iter()
        .find(|(alias, _)| *alias == flag)
        .map_or(flag, |(_, canonical)| *canonical)
}

fn process_config_flag(argument: &str) -> FlagAction {
    if !argument.starts_with('-') {
        return FlagAction::Skip;
    }
    let (flag, inline_value) = match argument.split_once('=') {
        Some((flag, value)) => (flag, Some(value)),
        None => (argument, None),
    };
    let flag = canonical_flag(flag);
    if !CONFIG_CLI_FLAGS.contains(&flag) {
        return FlagAction::Skip;
    }
    let is_switch = CONFIG_SWITCHES.contains(&flag);
    let (flag, needs_value) = match inline_value {
        Some(value) => (format!("{flag}={value}"), false),
        None if is_switch => (format!("{flag}=true"), false),
        None => (flag.to_owned(), true),
    };
    FlagAction::Include { flag, needs_value }
}

#[derive(Debug, Default)]
pub(crate) struct ConfigArgumentSplit {
    /// Program name followed by configuration flags and their values.
    pub(crate) config_arguments: Vec<OsString>,
    /// Program name followed by the command and its arguments.
    pub(crate) command_arguments: Vec<OsString>,
}

/// Separates configuration flags from command tokens.
///
/// Everything after a bare `--` is treated as a command token.
pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let mut split = ConfigArgumentSplit::default();
    let mut remaining = args.iter();
    if let Some(program) = remaining.next() {
        split.config_arguments.push(program.clone());
        split.command_arguments.push(program.clone());
    }

    while let Some(argument) = remaining.next() {
        let text = argument.to_string_lossy();
        if text == "--" {
            split.command_arguments.extend(remaining.by_ref().cloned());
            break;
        }
        match process_config_flag(&text) {
            FlagAction::Include { flag, needs_value } => {
                split.config_arguments.push(OsString::from(flag));
                if needs_value && let Some(value) = remaining.next() {
                    split.config_arguments.push(value.clone());
                }
            }
            FlagAction::Skip => split.command_arguments.push(argument.clone()),
        }
    }
    split
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn os(words: &[&str]) -> Vec<OsString> {
        words.iter().map(OsString::from).collect()
    }

    #[rstest]
    #[case::inline("--log-filter=debug", "--log-filter=debug", false)]
    #[case::separate("--log-filter", "--log-filter", true)]
    #[case::switch("--ssl", "--ssl=true", false)]
    #[case::explicit_switch("--ssl=false", "--ssl=false", false)]
    #[case::short_alias("-n", "--network", true)]
    #[case::legacy_alias("--apikey=secret", "--api-key=secret", false)]
    #[case::uri_alias("--uri", "--url", true)]
    #[case::short_switch("-s", "--ssl=true", false)]
    fn config_flags_are_canonicalised(
        #[case] argument: &str,
        #[case] flag: &str,
        #[case] needs_value: bool,
    ) {
        assert_eq!(
            process_config_flag(argument),
            FlagAction::Include {
                flag: flag.to_owned(),
                needs_value,
            }
        );
    }

    #[rstest]
    #[case::command("info")]
    #[case::unknown_flag("--tx")]
    #[case::negative_number("-1")]
    #[case::unknown_short("-x")]
    fn other_tokens_are_skipped(#[case] argument: &str) {
        assert_eq!(process_config_flag(argument), FlagAction::Skip);
    }

    #[test]
    fn flags_are_extracted_from_anywhere() {
        let split = split_config_arguments(&os(&[
            "nodecli", "-n", "regtest", "block", "--ssl", "12", "-k", "secret",
        ]));
        assert_eq!(
            split.config_arguments,
            os(&["nodecli", "--network", "regtest", "--ssl=true", "--api-key", "secret"])
        );
        assert_eq!(split.command_arguments, os(&["nodecli", "block", "12"]));
    }

    #[test]
    fn command_options_stay_with_the_command() {
        let split = split_config_arguments(&os(&["nodecli", "broadcast", "--tx", "beef"]));
        assert_eq!(split.config_arguments, os(&["nodecli"]));
        assert_eq!(
            split.command_arguments,
            os(&["nodecli", "broadcast", "--tx", "beef"])
        );
    }

    #[test]
    fn double_dash_ends_flag_scanning() {
        let split = split_config_arguments(&os(&["nodecli", "rpc", "--", "echo", "-p"]));
        assert_eq!(split.config_arguments, os(&["nodecli"]));
        assert_eq!(split.command_arguments, os(&["nodecli", "rpc", "echo", "-p"]));
    }

    #[test]
    fn bare_switch_loads_as_enabled() {
        let split = split_config_arguments(&os(&["nodecli", "info", "-s"]));
        let config = OrthoConfigLoader
            .load(&split.config_arguments)
            .expect("configuration loads");
        assert!(config.ssl());
        assert_eq!(
            config.endpoint().expect("endpoint resolves").scheme(),
            "https"
        );
    }

    #[test]
    fn empty_arguments_produce_empty_split() {
        let split = split_config_arguments(&[]);
        assert!(split.config_arguments.is_empty());
        assert!(split.command_arguments.is_empty());
    }
}
