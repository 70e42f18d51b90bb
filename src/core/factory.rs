use crate::adapters::{NativeEngine, NullEngine};
use crate::core::{ConfigProvider, Engine};
use crate::utils::error::Result;

/// Picks the engine variant once, when the engine is constructed.
pub struct EngineFactory;

impl EngineFactory {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Box<dyn Engine>> {
        Self::build(config.library_path(), config.fallback_to_stub())
    }

    /// `library` empty means no real engine is configured.
    pub fn build(library: &str, fallback_to_stub: bool) -> Result<Box<dyn Engine>> {
        let library = library.trim();
        if library.is_empty() {
            tracing::info!("No engine library configured, using the null engine");
            return Ok(Box::new(NullEngine::new()));
        }

        match NativeEngine::load(library) {
            Ok(engine) => Ok(Box::new(engine)),
            Err(e) if fallback_to_stub => {
                tracing::warn!("⚠️ {}", e);
                tracing::warn!("Falling back to the null engine");
                Ok(Box::new(NullEngine::new()))
            }
            Err(e) => Err(e),
        }
    }
}
