use numtower_logging::{clear_log_hook, init_logging, set_log_hook, LogRecord, LoggingOptions};
use std::sync::{Arc, Mutex};

#[test]
fn hook_receives_tracing_and_log_records() {
    let captured: Arc<Mutex<Vec<LogRecord>>> = Arc::new(Mutex::new(Vec::new()));
    let hook = {
        let c = captured.clone();
        move |rec: &LogRecord| {
            c.lock().unwrap().push(rec.clone());
        }
    };
    set_log_hook(hook);
    let _guard = init_logging(LoggingOptions {
        level: Some("info".to_string()),
    });

    tracing::info!(rows = 3u64, square = true, "matrix ready");
    log::warn!(target: "numtower_value", "rejected matrix construction");

    {
        let items = captured.lock().unwrap();
        let ready = items
            .iter()
            .find(|r| r.message == "matrix ready")
            .expect("tracing event captured");
        let fields = ready.fields.as_ref().expect("fields captured");
        assert_eq!(fields["rows"], 3);
        assert_eq!(fields["square"], true);
        assert_eq!(ready.level, "INFO");

        let bridged = items
            .iter()
            .find(|r| r.message.contains("rejected matrix construction"))
            .expect("log record captured");
        assert_eq!(bridged.target, "numtower_value");
        assert_eq!(bridged.level, "WARN");
        assert!(bridged.fields.is_none());
    }

    clear_log_hook();
    tracing::info!("after clear");
    let items = captured.lock().unwrap();
    assert!(!items.iter().any(|r| r.message == "after clear"));
}
