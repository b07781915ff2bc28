//! CLI argument definitions for the material converter.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "matconv",
    version,
    about = "Map material attributes between shader schemas and convert materials",
    long_about = "Map material attributes between shader schemas and convert materials.\n\n\
                  Schemas and materials are JSON files. Mappings are built per attribute\n\
                  kind, optionally auto-matched by name, and saved as reusable presets."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the mapping candidates between two schemas.
    Catalog(CatalogArgs),

    /// Save or list mapping presets.
    #[command(subcommand)]
    Preset(PresetCommand),

    /// Convert materials with a saved preset.
    Convert(ConvertArgs),
}

#[derive(Args)]
pub struct SchemaPairArgs {
    /// Directory containing schema JSON files.
    #[arg(long = "schemas", value_name = "DIR")]
    pub schemas: PathBuf,

    /// Name of the schema the materials currently use.
    #[arg(long = "source", value_name = "NAME")]
    pub source: String,

    /// Name of the schema to convert to.
    #[arg(long = "target", value_name = "NAME")]
    pub target: String,

    /// Select the best name match for every attribute.
    #[arg(long = "auto-match")]
    pub auto_match: bool,
}

#[derive(Args)]
pub struct CatalogArgs {
    #[command(flatten)]
    pub pair: SchemaPairArgs,
}

#[derive(Subcommand)]
pub enum PresetCommand {
    /// Build a mapping and save it as a preset.
    Save(PresetSaveArgs),

    /// List the presets in a directory.
    List(PresetListArgs),
}

#[derive(Args)]
pub struct PresetSaveArgs {
    #[command(flatten)]
    pub pair: SchemaPairArgs,

    /// Directory the preset is written to.
    #[arg(long = "presets", value_name = "DIR")]
    pub presets: PathBuf,

    /// Explicit mapping, applied after auto-match. Repeatable.
    #[arg(long = "map", value_name = "SRC=DST", value_parser = parse_pair)]
    pub map: Vec<(String, String)>,

    /// Free-text description stored with the preset.
    #[arg(long = "description", value_name = "TEXT")]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct PresetListArgs {
    /// Directory containing preset files.
    #[arg(long = "presets", value_name = "DIR")]
    pub presets: PathBuf,
}

#[derive(Args)]
#[command(group(ArgGroup::new("input").required(true).args(["materials", "all"])))]
pub struct ConvertArgs {
    /// Directory containing schema JSON files.
    #[arg(long = "schemas", value_name = "DIR")]
    pub schemas: PathBuf,

    /// Preset file to replay.
    #[arg(long = "preset", value_name = "FILE")]
    pub preset: PathBuf,

    /// Material file to convert. Repeatable.
    #[arg(long = "material", value_name = "FILE")]
    pub materials: Vec<PathBuf>,

    /// Convert every material in DIR that uses the preset's source schema.
    #[arg(long = "all", value_name = "DIR")]
    pub all: Option<PathBuf>,

    /// Report what would change without writing material files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// Parses a `SRC=DST` attribute pair.
pub fn parse_pair(value: &str) -> Result<(String, String), String> {
    let (source, target) = value
        .split_once('=')
        .ok_or_else(|| format!("expected SRC=DST, got `{value}`"))?;
    let (source, target) = (source.trim(), target.trim());
    if source.is_empty() || target.is_empty() {
        return Err(format!("expected SRC=DST, got `{value}`"));
    }
    Ok((source.to_string(), target.to_string()))
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn pair_parser_trims_and_rejects_blanks() {
        assert_eq!(
            parse_pair(" _Color = _BaseColor "),
            Ok(("_Color".to_string(), "_BaseColor".to_string()))
        );
        assert!(parse_pair("_Color").is_err());
        assert!(parse_pair("=_BaseColor").is_err());
    }

    #[test]
    fn convert_requires_an_input() {
        let parsed = Cli::try_parse_from([
            "matconv",
            "convert",
            "--schemas",
            "schemas",
            "--preset",
            "preset.json",
        ]);
        assert!(parsed.is_err());
    }
}
