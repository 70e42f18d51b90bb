use crate::domain::model::{EngineKind, STATUS_OK};
use crate::domain::ports::Engine;

/// Stand-in engine used when no real engine library is available.
///
/// Accepts every call and does nothing: `init_factory` always succeeds and
/// `get_option` always reports 0, whatever was set before.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEngine;

impl NullEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Engine for NullEngine {
    fn init_factory(&self, dir: &str) -> i32 {
        tracing::trace!("null engine: init_factory({:?})", dir);
        STATUS_OK
    }

    fn new_document(&self, id: i32) {
        tracing::trace!("null engine: new_document({})", id);
    }

    fn set_option(&self, option: i32, value: i32) {
        tracing::trace!("null engine: set_option({}, {})", option, value);
    }

    fn get_option(&self) -> i32 {
        0
    }

    fn kind(&self) -> EngineKind {
        EngineKind::Null
    }
}
