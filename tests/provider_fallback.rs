//! Fallback behavior of the data provider: any misconfigured or unreachable
//! environment must yield exactly the 5-record fallback dataset, with the
//! substitution reported through the load outcome.

use critterdash::config::Config;
use critterdash::model::fallback_dataset;
use critterdash::provider::{DataOrigin, DatasetProvider};

fn unreachable_config() -> Config {
    Config {
        db_login: Some("scout".into()),
        db_pwd: Some("nope".into()),
        db_url: Some("127.0.0.1".into()),
        // Nothing listens on port 1; the connect fails fast.
        db_port: Some("1".into()),
        db_name: Some("bestiary".into()),
        db_table_name: Some("creatures".into()),
        bind_addr: "127.0.0.1:0".into(),
    }
}

#[tokio::test]
async fn unconfigured_table_falls_back() {
    let provider = DatasetProvider::new(Config::default());
    let outcome = provider.load().await;
    match outcome.origin {
        DataOrigin::Fallback { reason } => assert!(reason.contains("table name not configured")),
        DataOrigin::Live => panic!("load without configuration cannot be live"),
    }
    assert_eq!(outcome.dataset, fallback_dataset());
}

#[tokio::test]
async fn unreachable_database_falls_back() {
    let provider = DatasetProvider::new(unreachable_config());
    let outcome = provider.load().await;
    assert!(matches!(outcome.origin, DataOrigin::Fallback { .. }));
    assert_eq!(outcome.dataset.rows.len(), 5);
    assert_eq!(outcome.dataset, fallback_dataset());
}

#[tokio::test]
async fn fallback_is_deterministic_across_calls() {
    let provider = DatasetProvider::new(unreachable_config());
    let first = provider.load().await;
    let second = provider.load().await;
    assert_eq!(first.dataset, second.dataset);
    let names: Vec<&str> = first.dataset.rows.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Bulbasaur", "Ivysaur", "Venusaur", "VenusaurMega Venusaur", "Charmander"]
    );
}
