//! Terraform state normalization and search.
//!
//! Extraction is best-effort: any field may be missing or carry an unexpected
//! JSON type, and neither case is an error. Resource and instance order from
//! the source document is preserved.

use serde::Serialize;
use serde_json::{Map, Value};

/// Normalized view of one state file, optionally narrowed by a search query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateSummary {
    pub version: Option<Value>,
    pub terraform_version: Option<Value>,
    pub serial: Option<Value>,
    pub lineage: Option<Value>,
    pub resources: Vec<ResourceSummary>,
    /// Always `resources.len()`.
    pub total_resources: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceSummary {
    #[serde(rename = "type")]
    pub resource_type: Option<Value>,
    pub name: Option<Value>,
    pub provider: Option<Value>,
    pub mode: Option<Value>,
    pub instances: Vec<InstanceSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstanceSummary {
    pub attributes: Value,
    pub status: Option<Value>,
    pub schema_version: Option<Value>,
}

/// State files found under a prefix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateFileListing {
    pub bucket: String,
    pub prefix: String,
    /// Always `tfstate_files.len()`.
    pub total_files: usize,
    pub tfstate_files: Vec<String>,
}

impl StateFileListing {
    pub fn new(bucket: impl Into<String>, prefix: impl Into<String>, files: Vec<String>) -> Self {
        Self {
            bucket: bucket.into(),
            prefix: prefix.into(),
            total_files: files.len(),
            tfstate_files: files,
        }
    }
}

fn field(object: Option<&Map<String, Value>>, key: &str) -> Option<Value> {
    object.and_then(|o| o.get(key)).cloned()
}

fn entries<'a>(object: Option<&'a Map<String, Value>>, key: &str) -> &'a [Value] {
    object
        .and_then(|o| o.get(key))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

impl InstanceSummary {
    fn from_value(value: &Value) -> Self {
        let object = value.as_object();
        Self {
            attributes: field(object, "attributes").unwrap_or_else(|| Value::Object(Map::new())),
            status: field(object, "status"),
            schema_version: field(object, "schema_version"),
        }
    }
}

impl ResourceSummary {
    fn from_value(value: &Value) -> Self {
        let object = value.as_object();
        Self {
            resource_type: field(object, "type"),
            name: field(object, "name"),
            provider: field(object, "provider"),
            mode: field(object, "mode"),
            instances: entries(object, "instances")
                .iter()
                .map(InstanceSummary::from_value)
                .collect(),
        }
    }

    /// `needle` must already be lowercase. Missing or non-string `type`/`name`
    /// match as the empty string.
    fn matches(&self, needle: &str) -> bool {
        let text = |v: &Option<Value>| {
            v.as_ref()
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_lowercase()
        };
        text(&self.resource_type).contains(needle) || text(&self.name).contains(needle)
    }
}

/// Builds a [`StateSummary`] from a raw state document.
///
/// With a non-empty `query`, only resources whose `type` or `name` contains it
/// (case-insensitively) are kept. A non-object document yields an empty summary.
pub fn normalize_and_filter(document: &Value, query: Option<&str>) -> StateSummary {
    let root = document.as_object();
    let needle = query.filter(|q| !q.is_empty()).map(str::to_lowercase);

    let resources: Vec<ResourceSummary> = entries(root, "resources")
        .iter()
        .map(ResourceSummary::from_value)
        .filter(|resource| match &needle {
            Some(needle) => resource.matches(needle),
            None => true,
        })
        .collect();

    StateSummary {
        version: field(root, "version"),
        terraform_version: field(root, "terraform_version"),
        serial: field(root, "serial"),
        lineage: field(root, "lineage"),
        total_resources: resources.len(),
        resources,
    }
}
