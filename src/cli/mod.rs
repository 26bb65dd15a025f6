//! Command line front end for the `kutils` binary.
//!
//! Parsing is done with `clap` derive; [`run`] executes a parsed command
//! against a [`PreferencesManager`] and writes results to any writer so the
//! commands can be exercised without a terminal.

use std::{io::Write, path::PathBuf};

use {
    anyhow::{Result, anyhow, bail},
    clap::{Args, Parser, Subcommand},
    tracing::debug,
};

use crate::{
    codec::{Charset, decode_base64, decode_url, encode_base64, encode_url, md5_hex},
    error::operational::ResultExt,
    files::{exists, size},
    prefs::{AccessMode, Namespace, PrefValue, PreferencesManager},
    time::{describe_timestamp, format_timestamp},
    units::format_byte_count,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Preference store and small conversion utilities")]
pub struct Cli {
    /// Path to the settings file. Defaults to the XDG config location.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Overrides the directory preference files are stored in.
    #[arg(long, value_name = "DIR", global = true)]
    pub prefs_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read and write stored preferences.
    #[command(subcommand)]
    Prefs(PrefsCommand),
    /// Print the MD5 digest of a string as lowercase hex.
    Md5 {
        text: String,
    },
    /// Standard Base64 conversion.
    #[command(subcommand)]
    Base64(Base64Command),
    /// Form URL encoding.
    #[command(subcommand)]
    Url(UrlCommand),
    /// Print the size of a file or directory tree.
    Size {
        path: PathBuf,
    },
    /// Describe an epoch millisecond timestamp relative to now.
    DescribeTime {
        #[arg(value_name = "MILLIS", allow_negative_numbers = true)]
        timestamp_ms: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum PrefsCommand {
    /// Store a value.
    Put {
        #[command(flatten)]
        target: PrefTarget,
        key: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Stored value type.
        #[arg(
            long = "type",
            default_value = "string",
            value_parser = ["bool", "int", "long", "float", "string", "string_set"]
        )]
        kind: String,
    },
    /// Print a stored value.
    Get {
        #[command(flatten)]
        target: PrefTarget,
        key: String,
    },
    /// Print every entry of a namespace.
    List {
        #[command(flatten)]
        target: PrefTarget,
    },
    /// Delete a value.
    Remove {
        #[command(flatten)]
        target: PrefTarget,
        key: String,
    },
}

/// Namespace addressed by a preference command.
#[derive(Args, Debug, Clone)]
pub struct PrefTarget {
    /// `default`, `settings`, `login`, or any other store name.
    pub namespace: String,
    /// Raw access mode passed to the store.
    #[arg(long, default_value_t = AccessMode::PRIVATE, allow_negative_numbers = true)]
    pub mode: i32,
}

impl PrefTarget {
    /// Store name the namespace argument resolves to.
    fn store_name(&self) -> &str {
        match self.namespace.parse::<Namespace>() {
            Ok(namespace) => namespace.store_name(),
            Err(_) => self.namespace.as_str(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Base64Command {
    /// Encode the UTF-8 bytes of a string.
    Encode { text: String },
    /// Decode to text, replacing invalid UTF-8.
    Decode { text: String },
}

#[derive(Subcommand, Debug)]
pub enum UrlCommand {
    /// Percent-encode a string, with spaces as `+`.
    Encode {
        text: String,
        /// Charset the escaped bytes are taken from.
        #[arg(long, default_value = "UTF-8")]
        charset: String,
    },
    /// Decode percent escapes and `+`.
    Decode {
        text: String,
        /// Charset the escaped bytes are read in.
        #[arg(long, default_value = "UTF-8")]
        charset: String,
    },
}

/// Executes `command`, writing its output to `out`.
///
/// # Errors
///
/// Returns an error when a preference operation is rejected, input cannot be
/// decoded, or writing the output fails.
pub fn run(command: Command, prefs: &PreferencesManager, out: &mut dyn Write) -> Result<()> {
    debug!(command = ?command, "Running command");
    match command {
        Command::Prefs(command) => run_prefs(command, prefs, out),
        Command::Md5 { text } => writeln!(out, "{}", md5_hex(&text)).add_context("write output"),
        Command::Base64(Base64Command::Encode { text }) => {
            writeln!(out, "{}", encode_base64(text.as_bytes())).add_context("write output")
        }
        Command::Base64(Base64Command::Decode { text }) => {
            let decoded = decode_base64(text.as_bytes()).add_context("decode base64 input")?;
            writeln!(out, "{}", String::from_utf8_lossy(&decoded)).add_context("write output")
        }
        Command::Url(UrlCommand::Encode { text, charset }) => {
            let charset = charset_named(&charset)?;
            writeln!(out, "{}", encode_url(&text, charset)).add_context("write output")
        }
        Command::Url(UrlCommand::Decode { text, charset }) => {
            let charset = charset_named(&charset)?;
            let decoded = decode_url(&text, charset).add_context("decode url input")?;
            writeln!(out, "{decoded}").add_context("write output")
        }
        Command::Size { path } => {
            if !exists(&path) {
                bail!("no such file or directory: {}", path.display());
            }
            let bytes = size(&path);
            let human = i64::try_from(bytes)
                .ok()
                .and_then(format_byte_count)
                .unwrap_or_else(|| format!("{bytes}B"));
            writeln!(out, "{bytes}\t{human}").add_context("write output")
        }
        Command::DescribeTime { timestamp_ms } => {
            let formatted = format_timestamp(timestamp_ms)
                .add_contextf(format_args!("format timestamp {timestamp_ms}"))?;
            let relative = describe_timestamp(timestamp_ms);
            if relative.is_empty() {
                writeln!(out, "{formatted}").add_context("write output")
            } else {
                writeln!(out, "{formatted}\t{relative}").add_context("write output")
            }
        }
    }
}

fn run_prefs(command: PrefsCommand, prefs: &PreferencesManager, out: &mut dyn Write) -> Result<()> {
    match command {
        PrefsCommand::Put {
            target,
            key,
            value,
            kind,
        } => {
            let value = PrefValue::parse(&kind, &value)
                .map_err(|reason| anyhow!("invalid {kind} value: {reason}"))?;
            if !prefs.put(target.store_name(), target.mode, &key, value) {
                bail!("failed to store {}/{key}", target.store_name());
            }
            Ok(())
        }
        PrefsCommand::Get { target, key } => {
            let value = prefs
                .get_value(target.store_name(), target.mode, &key)
                .ok_or_else(|| anyhow!("no value for {}/{key}", target.store_name()))?;
            writeln!(out, "{value}").add_context("write output")
        }
        PrefsCommand::List { target } => {
            let entries = prefs
                .get_all(target.store_name(), target.mode)
                .ok_or_else(|| anyhow!("cannot list {}", target.store_name()))?;
            for (key, value) in entries {
                writeln!(out, "{key}\t{}\t{value}", value.kind()).add_context("write output")?;
            }
            Ok(())
        }
        PrefsCommand::Remove { target, key } => {
            if !prefs.remove(target.store_name(), target.mode, &key) {
                bail!("failed to remove {}/{key}", target.store_name());
            }
            Ok(())
        }
    }
}

fn charset_named(name: &str) -> Result<Charset> {
    Charset::for_name(name).ok_or_else(|| anyhow!("unsupported charset: {name}"))
}
