//! Sensing-configuration expansion.
//!
//! The last pass: every comparison entry lists configuration ids; the
//! catalog replaces each id with its full configuration body so the filled
//! document is self-contained.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::{ComparisonSetting, PhoneComparison, SpecDocument};

use super::AutofillError;

/// The catalog of named sensing configurations.
#[derive(Debug, Clone)]
pub struct SensingCatalog {
    configs: Map<String, Value>,
}

impl SensingCatalog {
    /// Load the catalog from a JSON file of `{ id: configuration }` pairs.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AutofillError> {
        let text = std::fs::read_to_string(path)?;
        let configs = serde_json::from_str(&text)?;
        Ok(Self { configs })
    }

    /// Build a catalog from an in-memory JSON object.
    pub fn from_value(value: Value) -> Result<Self, AutofillError> {
        let configs = serde_json::from_value(value)?;
        Ok(Self { configs })
    }

    /// The full configuration body for `id`.
    pub fn expand(&self, id: &str) -> Result<Value, AutofillError> {
        self.configs
            .get(id)
            .cloned()
            .ok_or_else(|| AutofillError::UnknownSensingConfig { id: id.to_string() })
    }
}

pub fn fill_sensing_settings(
    mut doc: SpecDocument,
    catalog: &SensingCatalog,
) -> Result<SpecDocument, AutofillError> {
    for setting in &mut doc.sensing_settings {
        for (os, comparison) in setting.iter_mut() {
            let ids = match comparison {
                PhoneComparison::Ids(ids) => ids.clone(),
                PhoneComparison::Expanded(expanded) => expanded.compare.clone(),
            };
            debug!("expanding {} comparison of {:?}", os, ids);
            let sensing_configs = ids
                .iter()
                .map(|id| catalog.expand(id))
                .collect::<Result<Vec<_>, _>>()?;
            *comparison = PhoneComparison::Expanded(ComparisonSetting {
                name: ids.join(" v/s "),
                compare: ids,
                sensing_configs,
            });
        }
    }
    Ok(doc)
}
