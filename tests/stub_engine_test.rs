use pye::domain::model::STATUS_OK;
use pye::{DocumentId, Engine, EngineKind, EngineOption, NullEngine, Session};

#[test]
fn test_stub_scenario() {
    let engine = NullEngine::new();

    assert_eq!(engine.init_factory("/tmp"), 0);
    engine.set_option(1, 5);
    assert_eq!(engine.get_option(), 0);
}

#[test]
fn test_init_factory_succeeds_for_any_directory() {
    let engine = NullEngine::new();
    let long_dir = "x".repeat(4096);
    let dirs = [
        "/tmp",
        "",
        " ",
        "/no/such/dir",
        "C:\\pye\\data",
        "../relative",
        "註音",
        long_dir.as_str(),
    ];

    for dir in dirs {
        assert_eq!(engine.init_factory(dir), STATUS_OK, "dir {dir:?}");
    }
}

#[test]
fn test_get_option_is_always_zero() {
    let engine = NullEngine::new();
    let values = [i32::MIN, -1, 0, 1, 5, 16, i32::MAX];

    for &option in &values {
        for &value in &values {
            engine.new_document(option);
            engine.set_option(option, value);
            assert_eq!(engine.get_option(), 0);
        }
    }
}

#[test]
fn test_stub_through_session() {
    let session = Session::new(NullEngine::new());

    session.start("/tmp").unwrap();
    session.open_document(DocumentId(1));
    session.set(EngineOption::Display, 5);

    assert_eq!(session.option(), 0);
    assert_eq!(session.engine().kind(), EngineKind::Null);
}
