pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod ffi;
pub mod header;
pub mod utils;
pub mod visibility;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{NativeEngine, NullEngine};
pub use config::{env::EnvConfig, toml_config::TomlConfig, EngineSettings, Overrides};
pub use core::{factory::EngineFactory, session::Session};
pub use domain::model::{DisplayOptions, DocumentId, EngineKind, EngineOption, Grade, Preferences};
pub use domain::ports::{ConfigProvider, Engine};
pub use utils::error::{PyeError, Result};
