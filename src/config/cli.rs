use crate::config::Overrides;
use crate::domain::model::{EngineOption, Preferences};
use crate::utils::logger::LogFormat;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "pye")]
#[command(about = "Load, probe and describe a pye engine")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Engine library to load; an empty string forces the null engine
    #[arg(long, global = true)]
    pub library: Option<String>,

    /// Directory handed to init_factory
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Fail instead of falling back to the null engine
    #[arg(long, global = true)]
    pub strict: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Log line format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Build the engine, initialise it and report the current option value
    Probe {
        /// Open a document with this id after initialisation
        #[arg(long)]
        document: Option<i32>,

        /// Extra OPTION=VALUE pairs sent after the configured preferences
        #[arg(long = "set", value_parser = parse_setting)]
        settings: Vec<(EngineOption, i32)>,
    },
    /// Print the C header for the exported engine ABI
    Header {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Show the option values produced by the configured preferences
    Options {
        /// Preference overrides such as pyllq.grade=2
        #[arg(long = "pref", value_parser = parse_pref)]
        prefs: Vec<(String, String)>,
    },
}

impl CliConfig {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            library: self.library.clone(),
            data_dir: self.data_dir.clone(),
            strict: self.strict,
        }
    }
}

/// Parses `OPTION=VALUE`, where OPTION is a number or `display` / `grade`.
pub fn parse_setting(s: &str) -> Result<(EngineOption, i32), String> {
    let (option, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected OPTION=VALUE, got '{}'", s))?;

    let option = match option.trim() {
        "display" => EngineOption::Display,
        "grade" => EngineOption::Grade,
        other => other
            .parse::<i32>()
            .map(EngineOption::from_id)
            .map_err(|_| format!("unknown option '{}'", other))?,
    };
    let value = value
        .trim()
        .parse::<i32>()
        .map_err(|_| format!("invalid value '{}'", value))?;

    Ok((option, value))
}

/// Parses `KEY=VALUE` for one of the `pyllq.*` preference keys.
pub fn parse_pref(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    let key = key.trim();
    if !Preferences::KEYS.contains(&key) {
        return Err(format!(
            "unknown preference '{}'; expected one of {}",
            key,
            Preferences::KEYS.join(", ")
        ));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_setting() {
        assert_eq!(parse_setting("1=5").unwrap(), (EngineOption::Display, 5));
        assert_eq!(parse_setting("grade=12").unwrap(), (EngineOption::Grade, 12));
        assert_eq!(parse_setting("7=-3").unwrap(), (EngineOption::Other(7), -3));
        assert!(parse_setting("1").is_err());
        assert!(parse_setting("zoom=1").is_err());
        assert!(parse_setting("1=x").is_err());
    }

    #[test]
    fn test_parse_pref() {
        assert_eq!(
            parse_pref("pyllq.grade=2").unwrap(),
            ("pyllq.grade".to_string(), "2".to_string())
        );
        assert!(parse_pref("pyllq.zoom=2").is_err());
    }

    #[test]
    fn test_cli_parses_probe() {
        let cli = CliConfig::try_parse_from([
            "pye",
            "probe",
            "--library",
            "",
            "--data-dir",
            "/tmp",
            "--document",
            "4",
            "--set",
            "1=5",
            "--strict",
        ])
        .unwrap();

        let overrides = cli.overrides();
        assert_eq!(cli.log_format, LogFormat::Compact);
        assert_eq!(overrides.library.as_deref(), Some(""));
        assert_eq!(overrides.data_dir.as_deref(), Some("/tmp"));
        assert!(overrides.strict);
        match cli.command {
            Command::Probe { document, settings } => {
                assert_eq!(document, Some(4));
                assert_eq!(settings, vec![(EngineOption::Display, 5)]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parses_log_format() {
        let cli = CliConfig::try_parse_from(["pye", "header", "--log-format", "json"]).unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
        assert!(CliConfig::try_parse_from(["pye", "header", "--log-format", "xml"]).is_err());
    }
}
