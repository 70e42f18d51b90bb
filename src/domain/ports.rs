use crate::domain::model::EngineKind;

/// The engine capability surface.
///
/// Every method mirrors one entry point of the engine's C interface, so
/// statuses are plain integers rather than `Result`s. [`crate::core::session::Session`]
/// layers typed errors on top.
pub trait Engine: Send + Sync {
    /// Prepares the engine's backing resources found under `dir`.
    /// Returns [`crate::domain::model::STATUS_OK`] on success.
    fn init_factory(&self, dir: &str) -> i32;

    fn new_document(&self, id: i32);

    fn set_option(&self, option: i32, value: i32);

    fn get_option(&self) -> i32;

    fn kind(&self) -> EngineKind;
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn init_factory(&self, dir: &str) -> i32 {
        (**self).init_factory(dir)
    }

    fn new_document(&self, id: i32) {
        (**self).new_document(id)
    }

    fn set_option(&self, option: i32, value: i32) {
        (**self).set_option(option, value)
    }

    fn get_option(&self) -> i32 {
        (**self).get_option()
    }

    fn kind(&self) -> EngineKind {
        (**self).kind()
    }
}

/// Where the engine comes from.
pub trait ConfigProvider: Send + Sync {
    /// Path of the engine library; empty selects the null engine.
    fn library_path(&self) -> &str;

    /// Use the null engine when the configured library cannot be loaded.
    fn fallback_to_stub(&self) -> bool;
}
