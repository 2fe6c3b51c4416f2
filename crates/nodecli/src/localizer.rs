//! Localised help text for the node client.
//!
//! Builds a Fluent-backed localizer from the embedded catalogue and falls back
//! to [`NoOpLocalizer`] (hardcoded English) when the Fluent pipeline fails.

use std::io::Write;

use ortho_config::{FluentLocalizer, Localizer, NoOpLocalizer};

/// Embedded en-US Fluent catalogue.
pub(crate) static NODECLI_EN_US: &str = include_str!("../locales/en-US/messages.ftl");

/// Help message definitions: `(fluent_id, english_fallback)`.
///
/// The fallback values must match `locales/en-US/messages.ftl`; the
/// `fluent_and_fallback_help_are_identical` test guards against drift.
mod help {
    pub(super) const UNRECOGNIZED: (&str, &str) =
        ("nodecli-help-unrecognized", "Unrecognized command.");
    pub(super) const COMMANDS: (&str, &str) = ("nodecli-help-commands", "Commands:");
    pub(super) const COMMAND_LINES: &[(&str, &str)] = &[
        ("nodecli-help-info", "$ info: Get server info."),
        (
            "nodecli-help-broadcast",
            "$ broadcast [tx-hex]: Broadcast transaction.",
        ),
        ("nodecli-help-mempool", "$ mempool: Get mempool snapshot."),
        ("nodecli-help-tx", "$ tx [hash/address]: View transactions."),
        ("nodecli-help-coin", "$ coin [hash+index/address]: View coins."),
        ("nodecli-help-block", "$ block [hash/height]: View block."),
        (
            "nodecli-help-header",
            "$ header [hash/height]: View block header.",
        ),
        ("nodecli-help-filter", "$ filter [hash/height]: View filter."),
        (
            "nodecli-help-reset",
            "$ reset [height/hash]: Reset chain to desired block.",
        ),
        (
            "nodecli-help-rpc",
            "$ rpc [command] [args]: Execute RPC command.",
        ),
        ("nodecli-help-fee", "$ fee [target]: Estimate smart fee."),
    ];
    pub(super) const OPTIONS: (&str, &str) = ("nodecli-help-options", "Other Options:");
    pub(super) const OPTION_LINES: &[(&str, &str)] = &[
        (
            "nodecli-help-option-network",
            "--network, -n [network]: Network to connect to (main, testnet, regtest, simnet).",
        ),
        (
            "nodecli-help-option-url",
            "--url, -u [url]: Node URL (overrides host and port).",
        ),
        (
            "nodecli-help-option-api-key",
            "--api-key, -k [key]: API key used for authentication.",
        ),
        ("nodecli-help-option-ssl", "--ssl, -s: Connect over TLS."),
        (
            "nodecli-help-option-httphost",
            "--httphost, -h [host]: Node HTTP host.",
        ),
        (
            "nodecli-help-option-httpport",
            "--httpport, -p [port]: Node HTTP port.",
        ),
        (
            "nodecli-help-option-config",
            "--config-path [path]: Configuration file to load.",
        ),
    ];
}

fn msg(localizer: &dyn Localizer, entry: &(&str, &str)) -> String {
    localizer.message(entry.0, None, entry.1)
}

/// Builds the application localizer.
///
/// Falls back to [`NoOpLocalizer`] so a broken catalogue never stops the CLI.
pub(crate) fn build_localizer() -> Box<dyn Localizer> {
    match FluentLocalizer::with_en_us_defaults([NODECLI_EN_US]) {
        Ok(loc) => Box::new(loc),
        Err(_) => Box::new(NoOpLocalizer),
    }
}

/// Writes the static command listing to `writer`.
///
/// # Errors
///
/// Returns [`std::io::Error`] if writing to the underlying stream fails.
pub(crate) fn write_help<W: Write>(writer: &mut W, localizer: &dyn Localizer) -> std::io::Result<()> {
    use help::{COMMAND_LINES, COMMANDS, OPTION_LINES, OPTIONS, UNRECOGNIZED};

    writeln!(writer, "{}", msg(localizer, &UNRECOGNIZED))?;
    writeln!(writer, "{}", msg(localizer, &COMMANDS))?;
    for entry in COMMAND_LINES {
        writeln!(writer, "  {}", msg(localizer, entry))?;
    }
    writeln!(writer, "{}", msg(localizer, &OPTIONS))?;
    for entry in OPTION_LINES {
        writeln!(writer, "  {}", msg(localizer, entry))?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CommandKind;
    use strum::IntoEnumIterator;

    fn render(localizer: &dyn Localizer) -> String {
        let mut buf = Vec::new();
        write_help(&mut buf, localizer).expect("write help");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn fluent_and_fallback_help_are_identical() {
        let fluent = build_localizer();
        assert_eq!(render(fluent.as_ref()), render(&NoOpLocalizer));
    }

    #[test]
    fn help_lists_every_command() {
        let text = render(&NoOpLocalizer);
        for command in CommandKind::iter() {
            let needle = format!("$ {command}");
            assert!(text.contains(&needle), "help is missing {needle:?}");
        }
    }

    #[test]
    fn help_lists_flag_aliases() {
        let text = render(&NoOpLocalizer);
        for alias in ["-n", "-u", "-k", "-s", "-h", "-p"] {
            assert!(text.contains(&format!(", {alias}")), "missing alias {alias}");
        }
    }
}
