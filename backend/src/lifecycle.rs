//! Server lifecycle: loading the index, opening it for reads, running HTTP.

use crate::config::ServerConfig;
use crate::middleware;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use csvdex_core::{effective_columns, IndexBuilder, IndexError, IndexReader, LoadedIndex};
use log::{debug, info};
use std::path::Path;
use std::time::Instant;

/// Load `csv_path` into the configured store.
pub fn load(config: &ServerConfig, csv_path: &Path) -> Result<LoadedIndex> {
    let started = Instant::now();
    let builder = IndexBuilder::new(config.index.clone(), config.storage.data_dir())
        .with_rocksdb_settings(config.storage.rocksdb.clone());

    info!(
        "Loading {} into store '{}' at {}",
        csv_path.display(),
        config.index.store,
        builder.location().display()
    );

    let loaded = builder
        .build_from_csv(csv_path)
        .with_context(|| format!("Failed to load {}", csv_path.display()))?;

    info!(
        "Loaded {} rows as {} keys in {} batches ({:.2}ms)",
        loaded.summary.rows,
        loaded.summary.keys,
        loaded.summary.batches,
        started.elapsed().as_secs_f64() * 1000.0
    );

    Ok(loaded)
}

/// Open an already-loaded store for lookups, without touching its contents.
///
/// With explicit `columns`, searchable columns resolve exactly as a load
/// resolves them. Without, there is no header to check against: a non-empty
/// list is used as given and an empty one is a configuration error.
pub fn open_reader(config: &ServerConfig) -> Result<IndexReader> {
    let configured = config.index.validate()?;
    let searchable = match &config.index.columns {
        Some(columns) => effective_columns(configured, columns),
        None if configured.is_empty() => {
            return Err(IndexError::Configuration(
                "searchable_columns is empty and columns is not set; \
                 serve with --csv or list the columns explicitly"
                    .to_string(),
            )
            .into())
        }
        None => configured.to_vec(),
    };
    if searchable.is_empty() {
        return Err(IndexError::Configuration(format!(
            "none of the searchable columns {:?} exist in {:?}",
            configured, config.index.columns
        ))
        .into());
    }

    let location = config.store_location();
    if !location.exists() {
        anyhow::bail!(
            "Store '{}' not found at {}; run `csvdex load` first",
            config.index.store,
            location.display()
        );
    }

    let backend = csvdex_store::open_backend(&location, false, config.storage.rocksdb.clone())
        .map_err(|source| IndexError::StoreOpen {
            location: location.display().to_string(),
            source,
        })?;

    info!(
        "Opened store '{}' at {} (searchable: {:?})",
        config.index.store,
        location.display(),
        searchable
    );

    Ok(IndexReader::new(backend, searchable))
}

/// Start the HTTP server and block until it stops.
pub async fn run(config: &ServerConfig, reader: IndexReader) -> Result<()> {
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting HTTP server on {}", bind_addr);
    debug!("Endpoints: GET /, GET /version, GET /healthz");

    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::request_logger())
            .app_data(web::Data::new(reader.clone()))
            .configure(csvdex_api::routes::configure_routes)
    });

    let server = if config.server.workers == 0 {
        server
    } else {
        server.workers(config.server.workers)
    };

    server
        .bind(&bind_addr)
        .with_context(|| format!("Failed to bind {}", bind_addr))?
        .run()
        .await?;

    info!("Server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use csvdex_core::IndexConfig;
    use std::fs;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir, index: IndexConfig) -> ServerConfig {
        let mut config = ServerConfig::with_index(index);
        config.storage.data_dir = dir.path().join("data").to_string_lossy().into_owned();
        config
    }

    #[test]
    fn test_open_reader_requires_existing_store() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, IndexConfig::new("people", vec!["id".to_string()]));
        let err = open_reader(&config).err().unwrap();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_open_reader_needs_columns_when_searchable_is_empty() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, IndexConfig::new("people", Vec::new()));
        let err = open_reader(&config).err().unwrap();
        assert!(err
            .downcast_ref::<IndexError>()
            .is_some_and(IndexError::is_configuration));
    }

    #[test]
    fn test_open_reader_resolves_searchable_like_a_load() {
        let dir = TempDir::new().unwrap();
        let csv = dir.path().join("people.csv");
        fs::write(&csv, "1,Ann,NY\n").unwrap();

        let index = IndexConfig::new(
            "people",
            vec!["country".to_string(), "city".to_string(), "id".to_string()],
        )
        .with_columns(vec!["id".to_string(), "name".to_string(), "city".to_string()]);
        let config = config_in(&dir, index);

        let loaded = load(&config, &csv).unwrap();
        let loaded_searchable = loaded.summary.searchable_columns.clone();
        drop(loaded);

        let reader = open_reader(&config).unwrap();
        assert_eq!(reader.searchable_columns(), loaded_searchable.as_slice());
        assert_eq!(reader.searchable_columns(), ["city", "id"]);

        let query: std::collections::HashMap<String, String> = [
            ("id".to_string(), "1".to_string()),
            ("city".to_string(), "NY".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(reader.query_key(&query).unwrap(), "city_NY_id_1");
        assert!(reader.lookup(&query).unwrap().is_some());
    }

    #[test]
    fn test_open_reader_rejects_searchable_outside_columns() {
        let dir = TempDir::new().unwrap();
        let index = IndexConfig::new("people", vec!["country".to_string()])
            .with_columns(vec!["id".to_string(), "city".to_string()]);
        let err = open_reader(&config_in(&dir, index)).err().unwrap();
        assert!(err
            .downcast_ref::<IndexError>()
            .is_some_and(IndexError::is_configuration));
    }

    #[test]
    fn test_load_then_reopen() {
        let dir = TempDir::new().unwrap();
        let csv = dir.path().join("people.csv");
        fs::write(&csv, "id,name,city\n1,Ann,NY\n2,Bob,LA\n").unwrap();

        let config = config_in(
            &dir,
            IndexConfig::new("people", vec!["id".to_string(), "city".to_string()]),
        );
        let loaded = load(&config, &csv).unwrap();
        assert_eq!(loaded.summary.rows, 2);
        assert_eq!(loaded.summary.keys, 6);
        drop(loaded);

        let reader = open_reader(&config).unwrap();
        let row = reader.get("id_1_city_NY").unwrap().unwrap();
        assert_eq!(row, br#"{"id":"1","name":"Ann","city":"NY"}"#.to_vec());
    }
}
