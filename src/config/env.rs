use crate::core::ConfigProvider;

pub const LIBRARY_VAR: &str = "PYE_LIBRARY";
pub const DATA_DIR_VAR: &str = "PYE_DATA_DIR";
pub const FALLBACK_VAR: &str = "PYE_FALLBACK_TO_STUB";

/// Engine library baked in at build time through `PYE_LIBRARY_PATH`.
/// Empty when the crate was built without it.
pub fn compiled_default_library() -> &'static str {
    env!("PYE_DEFAULT_LIBRARY")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub library: String,
    pub data_dir: String,
    pub fallback_to_stub: bool,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            library: lookup(LIBRARY_VAR)
                .unwrap_or_else(|| compiled_default_library().to_string()),
            data_dir: lookup(DATA_DIR_VAR).unwrap_or_else(|| ".".to_string()),
            fallback_to_stub: lookup(FALLBACK_VAR)
                .map(|v| parse_bool(&v))
                .unwrap_or(true),
        }
    }
}

fn parse_bool(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

impl ConfigProvider for EnvConfig {
    fn library_path(&self) -> &str {
        &self.library
    }

    fn fallback_to_stub(&self) -> bool {
        self.fallback_to_stub
    }
}
