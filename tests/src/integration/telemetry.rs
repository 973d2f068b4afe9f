//! # Telemetry
//!
//! Logging installs once per process; a processor runs under it.

#[cfg(test)]
mod tests {
    use mirror_telemetry::{init_logging, TelemetryConfig, TelemetryError};
    use mn_01_entity_derivation::{ParserConfig, RecordItemApi, RecordingListener};
    use shared_types::AccountId;

    use crate::fixtures::{processor, transfer};

    #[test]
    fn test_logging_installs_once() {
        let config = TelemetryConfig::default()
            .with_log_level("debug")
            .with_json_logs(true);
        let _ = init_logging(&config);

        let err = init_logging(&config).unwrap_err();
        assert!(matches!(err, TelemetryError::AlreadyInitialized(_)));

        let (processor, _) = processor(ParserConfig::default());
        let mut listener = RecordingListener::new();
        processor
            .process(&transfer(1, &[AccountId::num(98)], 1), &mut listener)
            .unwrap();
        assert_eq!(listener.transactions().len(), 1);
    }
}
