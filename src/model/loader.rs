//! Reads the order feed from a JSON file.
//!
//! Loading is all-or-nothing: a single malformed order rejects the whole file so
//! the simulation never starts on a partial feed.

use crate::model::{LoadError, Order};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Loads and validates every order in `path`.
pub fn load_orders(path: impl AsRef<Path>) -> Result<Vec<Order>, LoadError> {
    let path = path.as_ref();
    let shown = path.display().to_string();

    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: shown.clone(),
        source,
    })?;
    let orders = parse_orders(&bytes).map_err(|e| match e {
        LoadError::Parse { source, .. } => LoadError::Parse {
            path: shown.clone(),
            source,
        },
        other => other,
    })?;

    info!(path = %shown, count = orders.len(), "Orders loaded");
    Ok(orders)
}

/// Parses and validates an in-memory JSON array of orders.
pub fn parse_orders(bytes: &[u8]) -> Result<Vec<Order>, LoadError> {
    let orders: Vec<Order> = serde_json::from_slice(bytes).map_err(|source| LoadError::Parse {
        path: "<memory>".to_string(),
        source,
    })?;

    let mut seen = HashSet::with_capacity(orders.len());
    for (index, order) in orders.iter().enumerate() {
        order
            .validate()
            .map_err(|source| LoadError::Invalid { index, source })?;
        if !seen.insert(order.id.as_str()) {
            return Err(LoadError::DuplicateId(order.id.clone()));
        }
    }

    debug!(count = orders.len(), "Orders validated");
    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"[
        {"id":"a8cfcb76","name":"Banana Split","temp":"frozen","shelfLife":20,"decayRate":0.63},
        {"id":"58e9b5fe","name":"McFlury","temp":"frozen","shelfLife":375,"decayRate":0.4},
        {"id":"2ec069e3","name":"Acai Bowl","temp":"cold","shelfLife":249,"decayRate":0.3}
    ]"#;

    #[test]
    fn test_load_orders_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let orders = load_orders(file.path()).unwrap();
        assert_eq!(orders.len(), 3);
        assert_eq!(orders[0].id, "a8cfcb76");
        assert_eq!(orders[2].shelf_life, 249);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_orders(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_malformed_json_keeps_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[{\"id\": 1}").unwrap();

        match load_orders(file.path()).unwrap_err() {
            LoadError::Parse { path, .. } => assert_eq!(path, file.path().display().to_string()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_negative_shelf_life_rejected() {
        let json = br#"[{"id":"x","name":"n","temp":"hot","shelfLife":-5,"decayRate":0.1}]"#;
        assert!(matches!(parse_orders(json), Err(LoadError::Parse { .. })));
    }

    #[test]
    fn test_invalid_order_reports_index() {
        let json = br#"[
            {"id":"ok","name":"n","temp":"hot","shelfLife":5,"decayRate":0.1},
            {"id":"bad","name":"n","temp":"hot","shelfLife":5,"decayRate":-1.0}
        ]"#;
        match parse_orders(json).unwrap_err() {
            LoadError::Invalid { index, .. } => assert_eq!(index, 1),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = br#"[
            {"id":"same","name":"a","temp":"hot","shelfLife":5,"decayRate":0.1},
            {"id":"same","name":"b","temp":"cold","shelfLife":5,"decayRate":0.1}
        ]"#;
        assert!(matches!(parse_orders(json), Err(LoadError::DuplicateId(id)) if id == "same"));
    }

    #[test]
    fn test_unknown_temperature_is_not_a_load_error() {
        let json = br#"[{"id":"u","name":"n","temp":"tepid","shelfLife":5,"decayRate":0.1}]"#;
        assert_eq!(parse_orders(json).unwrap().len(), 1);
    }
}
