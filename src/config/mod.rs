#[cfg(feature = "cli")]
pub mod cli;
pub mod env;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::Preferences;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use env::EnvConfig;
use toml_config::TomlConfig;

/// Values given explicitly on the command line. They win over everything else.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub library: Option<String>,
    pub data_dir: Option<String>,
    /// Fail instead of falling back to the null engine.
    pub strict: bool,
}

/// Fully resolved engine configuration.
///
/// Precedence, highest first: command line, TOML file, environment,
/// compiled-in default.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub library: String,
    pub data_dir: String,
    pub fallback_to_stub: bool,
    /// Only set when the configuration file has a `[preferences]` table.
    pub preferences: Option<Preferences>,
}

impl EngineSettings {
    /// Reads the optional TOML file and merges it with the other layers.
    ///
    /// The file is checked on its own, the merged settings are not: only
    /// commands that build an engine need a usable data directory, and they
    /// call [`Validate::validate`] themselves.
    pub fn load(overrides: &Overrides, config_path: Option<&str>, env: &EnvConfig) -> Result<Self> {
        let file = match config_path {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                Some(file)
            }
            None => None,
        };
        Ok(Self::resolve(overrides, file.as_ref(), env))
    }

    pub fn resolve(overrides: &Overrides, file: Option<&TomlConfig>, env: &EnvConfig) -> Self {
        let section = file.map(|f| &f.engine);

        let library = overrides
            .library
            .clone()
            .or_else(|| section.and_then(|s| s.library.clone()))
            .unwrap_or_else(|| env.library.clone());

        let data_dir = overrides
            .data_dir
            .clone()
            .or_else(|| section.and_then(|s| s.data_dir.clone()))
            .unwrap_or_else(|| env.data_dir.clone());

        let fallback_to_stub = !overrides.strict
            && section
                .and_then(|s| s.fallback_to_stub)
                .unwrap_or(env.fallback_to_stub);

        let preferences = file.and_then(|f| f.preferences);

        Self {
            library,
            data_dir,
            fallback_to_stub,
            preferences,
        }
    }
}

impl ConfigProvider for EngineSettings {
    fn library_path(&self) -> &str {
        &self.library
    }

    fn fallback_to_stub(&self) -> bool {
        self.fallback_to_stub
    }
}

impl Validate for EngineSettings {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_optional_path("library", &self.library)?;
        validate_path("data_dir", &self.data_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Grade, LangEncoding};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env() -> EnvConfig {
        EnvConfig {
            library: "/env/libpye.so".to_string(),
            data_dir: "/env/data".to_string(),
            fallback_to_stub: true,
        }
    }

    #[test]
    fn test_env_only() {
        let settings = EngineSettings::resolve(&Overrides::default(), None, &env());
        assert_eq!(settings.library, "/env/libpye.so");
        assert_eq!(settings.data_dir, "/env/data");
        assert!(settings.fallback_to_stub);
        assert_eq!(settings.preferences, None);
    }

    #[test]
    fn test_file_beats_env_and_cli_beats_file() {
        let file = TomlConfig::from_toml_str(
            "[engine]\nlibrary = \"/file/libpye.so\"\ndata_dir = \"/file/data\"\nfallback_to_stub = false\n\n[preferences]\ngrade = 12\n",
        )
        .unwrap();

        let settings = EngineSettings::resolve(&Overrides::default(), Some(&file), &env());
        assert_eq!(settings.library, "/file/libpye.so");
        assert_eq!(settings.data_dir, "/file/data");
        assert!(!settings.fallback_to_stub);
        assert_eq!(settings.preferences.map(|p| p.grade), Some(Grade::C));

        let overrides = Overrides {
            library: Some(String::new()),
            data_dir: Some("/cli/data".to_string()),
            strict: false,
        };
        let settings = EngineSettings::resolve(&overrides, Some(&file), &env());
        assert_eq!(settings.library, "");
        assert_eq!(settings.data_dir, "/cli/data");
    }

    #[test]
    fn test_strict_disables_fallback() {
        let overrides = Overrides {
            strict: true,
            ..Default::default()
        };
        let settings = EngineSettings::resolve(&overrides, None, &env());
        assert!(!settings.fallback_to_stub);
    }

    #[test]
    fn test_load_accepts_empty_data_dir_until_validated() {
        let overrides = Overrides {
            data_dir: Some(String::new()),
            ..Default::default()
        };

        let settings = EngineSettings::load(&overrides, None, &env()).unwrap();
        assert_eq!(settings.data_dir, "");
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_reads_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[engine]\nlibrary = \"\"\n\n[preferences]\nlangEncoding = 1\n")
            .unwrap();

        let path = temp_file.path().to_str().unwrap();
        let settings = EngineSettings::load(&Overrides::default(), Some(path), &env()).unwrap();
        assert_eq!(settings.library, "");
        assert_eq!(settings.data_dir, "/env/data");
        assert_eq!(
            settings.preferences.map(|p| p.lang_encoding),
            Some(LangEncoding::Traditional)
        );
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = EngineSettings::load(&Overrides::default(), Some("/no/such/pye.toml"), &env())
            .unwrap_err();
        assert!(matches!(err, crate::utils::error::PyeError::IoError(_)));
    }
}
