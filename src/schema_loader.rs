//! Compiled-schema helper for catalog manifest validation.
//!
//! The manifest schema ships inside the binary so every helper validates
//! against the same contract without touching disk. Callers can enforce an
//! allowed `schema_version` set and patch the schema's version const so one
//! schema document serves every accepted version.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;

pub(crate) const CATALOG_SCHEMA_JSON: &str =
    include_str!("../schema/catalog_manifest.schema.json");

/// Result of compiling the catalog schema.
///
/// `raw` must stay alive as long as `compiled`; the validator borrows the
/// schema document. Field order keeps the validator dropping first.
#[derive(Debug)]
pub(crate) struct SchemaUsage {
    pub schema_version: String,
    pub compiled: JSONSchema,
    pub raw: Arc<Value>,
}

/// Controls how the schema is normalized before compilation.
pub(crate) struct SchemaOptions<'a> {
    /// Where to find the schema_version const inside the schema payload.
    pub schema_version_pointer: &'a str,
    /// Override schema_version when provided (used to align consts).
    pub expected_version: Option<&'a str>,
    /// Allowed schema_version values; enforced when present.
    pub allowed_versions: Option<&'a BTreeSet<String>>,
    /// Patch the schema_version const in the schema payload to match
    /// `expected_version` (or the embedded const when no override is set).
    pub patch_schema_version_const: bool,
}

impl<'a> Default for SchemaOptions<'a> {
    fn default() -> Self {
        Self {
            schema_version_pointer: "/properties/schema_version/const",
            expected_version: None,
            allowed_versions: None,
            patch_schema_version_const: false,
        }
    }
}

pub(crate) fn compile_catalog_schema(options: SchemaOptions<'_>) -> Result<SchemaUsage> {
    let mut schema_value: Value =
        serde_json::from_str(CATALOG_SCHEMA_JSON).context("parsing embedded catalog schema")?;

    let schema_version = if let Some(version) = options.expected_version {
        version.to_string()
    } else {
        extract_schema_version(&schema_value, options.schema_version_pointer)
            .ok_or_else(|| anyhow!("catalog schema missing schema_version const"))?
    };

    if let Some(allowed) = options.allowed_versions {
        if !allowed.contains(&schema_version) {
            bail!(
                "schema_version '{}' not in allowed set {:?}",
                schema_version,
                allowed
            );
        }
    }

    if options.patch_schema_version_const {
        let target = schema_value
            .pointer_mut(options.schema_version_pointer)
            .ok_or_else(|| {
                anyhow!(
                    "catalog schema missing pointer {} for schema_version const",
                    options.schema_version_pointer
                )
            })?;
        *target = Value::String(schema_version.clone());
    }

    let raw = Arc::new(schema_value);
    let raw_static: &'static Value = unsafe { &*(Arc::as_ptr(&raw)) };
    let compiled =
        JSONSchema::compile(raw_static).context("compiling catalog manifest schema")?;

    Ok(SchemaUsage {
        schema_version,
        compiled,
        raw,
    })
}

fn extract_schema_version(schema: &Value, pointer: &str) -> Option<String> {
    let version = schema.pointer(pointer).and_then(Value::as_str)?;
    if version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        Some(version.to_string())
    } else {
        None
    }
}
