pub mod factory;
pub mod session;

pub use crate::domain::model::{DocumentId, EngineKind, EngineOption, Preferences};
pub use crate::domain::ports::{ConfigProvider, Engine};
pub use crate::utils::error::Result;
