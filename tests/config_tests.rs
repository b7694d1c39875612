use bill_query::{
    config::{ConfigManager, QueryConfig},
    core::{IntentCorpus, IntentExample, LexiconEntry},
    domain::{Intent, PosTag},
};
use tempfile::TempDir;

#[test]
fn missing_file_loads_defaults() {
    let temp = TempDir::new().unwrap();
    let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
    assert_eq!(manager.load().unwrap(), QueryConfig::default());
    assert!(manager.config_path().ends_with("config/config.json"));
}

#[test]
fn saved_config_round_trips() {
    let temp = TempDir::new().unwrap();
    let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
    let config = QueryConfig {
        similarity_threshold: 0.5,
        sample_limit: 5,
        user_lexicon: vec![LexiconEntry::new("太二酸菜鱼", PosTag::Organization)],
        corpus: Some(IntentCorpus {
            examples: vec![IntentExample::new(Intent::Trend, "走势")],
        }),
        ..QueryConfig::default()
    };

    manager.save(&config).unwrap();
    assert_eq!(manager.load().unwrap(), config);

    let raw = std::fs::read_to_string(manager.config_path()).unwrap();
    assert!(raw.contains("\"pos\": \"nt\""));
    assert!(raw.contains("\"intent\": \"query_trend\""));
}

#[test]
fn malformed_file_is_a_config_error() {
    let temp = TempDir::new().unwrap();
    let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
    std::fs::write(manager.config_path(), "{ not json").unwrap();
    assert!(manager.load().is_err());
}
