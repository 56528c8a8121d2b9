//! YAML parser for service definitions
//!
//! Parses and validates service YAML files.

use crate::error::{Error, Result, ResultExt};
use crate::loader::types::ServiceDefinition;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load a service definition from a YAML file
pub fn load_service(path: impl AsRef<Path>) -> Result<ServiceDefinition> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read service file '{}'", path.display()))?;
    load_service_from_str(&content)
}

/// Load a service definition from a YAML string
pub fn load_service_from_str(yaml: &str) -> Result<ServiceDefinition> {
    let def: ServiceDefinition =
        serde_yaml::from_str(yaml).context("Failed to parse service YAML")?;

    validate_service(&def)?;
    debug!(
        service = %def.name,
        operations = def.operations.len(),
        "Loaded service definition"
    );
    Ok(def)
}

/// Validate a service definition
fn validate_service(def: &ServiceDefinition) -> Result<()> {
    if def.name.trim().is_empty() {
        return Err(Error::config("Service name cannot be empty"));
    }

    if def.base_url.trim().is_empty() {
        return Err(Error::config("Service base_url cannot be empty"));
    }
    url::Url::parse(&def.base_url)?;

    if def.operations.is_empty() {
        return Err(Error::config("Service must have at least one operation"));
    }

    let mut seen = HashSet::new();
    for op in &def.operations {
        if !seen.insert(op.name.as_str()) {
            return Err(Error::config(format!(
                "Duplicate operation name: {}",
                op.name
            )));
        }
        op.validate()?;
    }

    Ok(())
}
