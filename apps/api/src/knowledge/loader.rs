//! Static-data loader. Lenient by contract: a missing file is an empty collection, a broken
//! file is logged and recorded in `load_errors`, a broken array element is skipped.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::knowledge::models::{KnowledgeBase, KnowledgeSnippet, ServiceRecord, TriggerRecord};

pub const DEMENTIA_FILE: &str = "dementia.json";
pub const CAREGIVER_FILE: &str = "caregiver.json";
pub const SERVICES_FILE: &str = "services.json";
pub const HOSPICE_FILE: &str = "hospice_rag_database.json";

/// Loads every knowledge file. Never fails; see the module docs.
pub fn load_knowledge_base(data_dir: &Path, fallback_dir: &Path) -> KnowledgeBase {
    let mut kb = KnowledgeBase::default();

    kb.dementia = load_or_record(
        &data_dir.join(DEMENTIA_FILE),
        &mut kb.load_errors,
        load_array::<TriggerRecord>,
    );
    kb.caregiver = load_or_record(
        &data_dir.join(CAREGIVER_FILE),
        &mut kb.load_errors,
        load_array::<TriggerRecord>,
    );
    kb.services = load_or_record(&data_dir.join(SERVICES_FILE), &mut kb.load_errors, load_map);

    let hospice_paths = [data_dir.join(HOSPICE_FILE), fallback_dir.join(HOSPICE_FILE)];
    kb.hospice = match first_existing(&hospice_paths) {
        Some(path) => load_or_record(&path, &mut kb.load_errors, load_array::<KnowledgeSnippet>),
        None => {
            warn!("No hospice knowledge base found; hospice retrieval will return nothing");
            Vec::new()
        }
    };

    info!(
        "Knowledge base loaded: {} dementia, {} caregiver, {} services, {} hospice snippets",
        kb.dementia.len(),
        kb.caregiver.len(),
        kb.services.len(),
        kb.hospice.len()
    );

    kb
}

fn first_existing(paths: &[PathBuf]) -> Option<PathBuf> {
    paths.iter().find(|p| p.is_file()).cloned()
}

/// Runs `load` if the file exists. Missing → default; failure → default plus a recorded error.
fn load_or_record<T, F>(path: &Path, errors: &mut Vec<String>, load: F) -> T
where
    T: Default,
    F: FnOnce(&Path) -> Result<T>,
{
    if !path.is_file() {
        warn!("{} not found; using an empty collection", path.display());
        return T::default();
    }

    match load(path) {
        Ok(value) => value,
        Err(e) => {
            let message = format!("{}: {e:#}", path.display());
            error!("Knowledge file failed to load: {message}");
            errors.push(message);
            T::default()
        }
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).context("invalid JSON")
}

/// Loads a JSON array, skipping elements that do not deserialize as `T`.
fn load_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let items = match read_json(path)? {
        Value::Array(items) => items,
        other => anyhow::bail!("expected a JSON array, found {}", json_kind(&other)),
    };

    let mut records = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<T>(item) {
            Ok(record) => records.push(record),
            Err(e) => warn!("Skipping entry {idx} in {}: {e}", path.display()),
        }
    }
    Ok(records)
}

/// Loads a JSON object of code → record, skipping entries that do not deserialize.
fn load_map(path: &Path) -> Result<BTreeMap<String, ServiceRecord>> {
    let entries = match read_json(path)? {
        Value::Object(entries) => entries,
        other => anyhow::bail!("expected a JSON object, found {}", json_kind(&other)),
    };

    let mut services = BTreeMap::new();
    for (code, item) in entries {
        match serde_json::from_value::<ServiceRecord>(item) {
            Ok(service) => {
                services.insert(code, service);
            }
            Err(e) => warn!("Skipping service {code} in {}: {e}", path.display()),
        }
    }
    Ok(services)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
