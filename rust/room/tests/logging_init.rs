use cardroom_room::init_logging;

// Only test in this binary: it owns the process-wide subscriber.
#[test]
fn second_install_panics() {
    init_logging();
    tracing::info!("subscriber installed");
    let again = std::panic::catch_unwind(init_logging);
    assert!(again.is_err());
}
