use crate::core::Engine;
use crate::domain::model::{DocumentId, EngineOption, Preferences, STATUS_OK};
use crate::utils::error::{PyeError, Result};

/// Typed, logged access to an [`Engine`].
pub struct Session<E: Engine> {
    engine: E,
}

impl<E: Engine> Session<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Runs `init_factory` on `dir`; any status other than 0 is an error.
    pub fn start(&self, dir: &str) -> Result<()> {
        tracing::info!("🚀 Initialising {} engine from {}", self.engine.kind(), dir);

        let status = self.engine.init_factory(dir);
        if status != STATUS_OK {
            return Err(PyeError::InitFailedError {
                dir: dir.to_string(),
                status,
            });
        }

        tracing::debug!("Engine ready");
        Ok(())
    }

    pub fn open_document(&self, id: DocumentId) {
        tracing::debug!("Opening document {}", id.0);
        self.engine.new_document(id.0);
    }

    /// Forwards `value` to the engine as is.
    pub fn set(&self, option: EngineOption, value: i32) {
        tracing::debug!("Setting {} = {}", option, value);
        self.engine.set_option(option.id(), value);
    }

    pub fn option(&self) -> i32 {
        let value = self.engine.get_option();
        tracing::debug!("Engine reports option value {}", value);
        value
    }

    /// Pushes every preference to the engine. All values are checked before
    /// the first one is sent.
    pub fn apply(&self, prefs: &Preferences) -> Result<()> {
        let settings = prefs.settings();
        for (option, value) in settings {
            option.check(value)?;
        }
        for (option, value) in settings {
            self.set(option, value);
        }
        tracing::info!("✅ Applied preferences {:?}", prefs);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::NullEngine;
    use crate::domain::model::{EngineKind, Grade, LangEncoding, PinyinLocation};
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Init(String),
        NewDocument(i32),
        SetOption(i32, i32),
    }

    #[derive(Clone, Default)]
    struct RecordingEngine {
        calls: Arc<Mutex<Vec<Call>>>,
        init_status: i32,
    }

    impl RecordingEngine {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Engine for RecordingEngine {
        fn init_factory(&self, dir: &str) -> i32 {
            self.calls.lock().unwrap().push(Call::Init(dir.to_string()));
            self.init_status
        }

        fn new_document(&self, id: i32) {
            self.calls.lock().unwrap().push(Call::NewDocument(id));
        }

        fn set_option(&self, option: i32, value: i32) {
            self.calls.lock().unwrap().push(Call::SetOption(option, value));
        }

        fn get_option(&self) -> i32 {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find_map(|call| match call {
                    Call::SetOption(_, value) => Some(*value),
                    _ => None,
                })
                .unwrap_or(0)
        }

        fn kind(&self) -> EngineKind {
            EngineKind::Native
        }
    }

    #[test]
    fn test_start_maps_nonzero_status_to_error() {
        let engine = RecordingEngine {
            init_status: 7,
            ..Default::default()
        };
        let session = Session::new(engine.clone());

        let err = session.start("/data").unwrap_err();
        assert!(matches!(err, PyeError::InitFailedError { status: 7, .. }));
        assert_eq!(engine.calls(), vec![Call::Init("/data".to_string())]);
    }

    #[test]
    fn test_apply_pushes_display_then_grade() {
        let engine = RecordingEngine::default();
        let session = Session::new(engine.clone());
        let prefs = Preferences {
            lang_encoding: LangEncoding::Traditional,
            pinyin_location: PinyinLocation::Bottom,
            grade: Grade::C,
            ..Default::default()
        };

        session.start("/data").unwrap();
        session.open_document(DocumentId(3));
        session.apply(&prefs).unwrap();

        assert_eq!(
            engine.calls(),
            vec![
                Call::Init("/data".to_string()),
                Call::NewDocument(3),
                Call::SetOption(1, 17),
                Call::SetOption(2, 12),
            ]
        );
        assert_eq!(session.option(), 12);
    }

    #[test]
    fn test_set_forwards_any_value() {
        let engine = RecordingEngine::default();
        let session = Session::new(engine.clone());

        session.set(EngineOption::from_id(1), 3);
        session.set(EngineOption::from_id(2), 1);
        session.set(EngineOption::Other(-4), i32::MAX);

        assert_eq!(
            engine.calls(),
            vec![
                Call::SetOption(1, 3),
                Call::SetOption(2, 1),
                Call::SetOption(-4, i32::MAX),
            ]
        );
        assert_eq!(session.option(), i32::MAX);
    }

    #[test]
    fn test_null_engine_session() {
        let session = Session::new(NullEngine::new());
        session.start("/tmp").unwrap();
        session.set(EngineOption::Display, 3);
        assert_eq!(session.option(), 0);
    }
}
