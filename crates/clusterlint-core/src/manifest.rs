//! Manifest loading
//!
//! A manifest is a YAML stream (one or more `---`-separated documents) or a
//! JSON object/array. Each document declares its `kind`; `Cluster` and
//! `InstanceGroup` are the kinds the validators understand.

use crate::error::{Error, Result};
use crate::types::{Cluster, InstanceGroup};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// Source encoding of a manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Yaml,
    Json,
}

impl ManifestFormat {
    /// Pick a format from a file extension; anything but `.json` is YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("json") => ManifestFormat::Json,
            _ => ManifestFormat::Yaml,
        }
    }
}

/// One typed manifest document
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Cluster(Cluster),
    InstanceGroup(InstanceGroup),
}

impl Document {
    pub fn kind(&self) -> &'static str {
        match self {
            Document::Cluster(_) => "Cluster",
            Document::InstanceGroup(_) => "InstanceGroup",
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Document::Cluster(cluster) => &cluster.metadata.name,
            Document::InstanceGroup(ig) => ig.name(),
        }
    }
}

/// Parse every document in `content`
pub fn load_manifests(content: &str, format: ManifestFormat) -> Result<Vec<Document>> {
    let raw = match format {
        ManifestFormat::Yaml => split_yaml(content)?,
        ManifestFormat::Json => match serde_json::from_str::<Value>(content)? {
            Value::Array(items) => items,
            other => vec![other],
        },
    };

    if raw.is_empty() {
        return Err(Error::manifest("manifest contains no documents", None));
    }

    let documents = raw
        .into_iter()
        .enumerate()
        .map(|(i, value)| typed_document(i, value))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(documents = documents.len(), "Loaded manifest");
    Ok(documents)
}

/// Read and parse a manifest file, choosing the format from its extension
pub fn load_manifest_file(path: &Path) -> Result<Vec<Document>> {
    let content = std::fs::read_to_string(path)?;
    load_manifests(&content, ManifestFormat::from_path(path))
}

fn split_yaml(content: &str) -> Result<Vec<Value>> {
    let mut values = Vec::new();
    for document in serde_yaml::Deserializer::from_str(content) {
        let value = serde_yaml::Value::deserialize(document)?;
        if value.is_null() {
            continue;
        }
        values.push(serde_json::to_value(value)?);
    }
    Ok(values)
}

/// Drop null object entries so empty keys fall back to field defaults
fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}

fn typed_document(index: usize, mut value: Value) -> Result<Document> {
    strip_nulls(&mut value);

    let kind = match value.get("kind").and_then(Value::as_str) {
        Some(kind) => kind.to_string(),
        None => return Err(Error::manifest("document has no kind", Some(index))),
    };

    let document = match kind.as_str() {
        "Cluster" => Document::Cluster(serde_json::from_value(value).map_err(|e| {
            Error::manifest(format!("invalid Cluster: {}", e), Some(index))
        })?),
        "InstanceGroup" => Document::InstanceGroup(serde_json::from_value(value).map_err(|e| {
            Error::manifest(format!("invalid InstanceGroup: {}", e), Some(index))
        })?),
        other => {
            return Err(Error::manifest(format!("unsupported kind {:?}", other), Some(index)));
        }
    };

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MULTI_DOC: &str = r#"
apiVersion: kops/v1alpha2
kind: Cluster
metadata:
  name: k8s.example.com
spec:
  api:
    loadBalancer:
      type: Public
      additionalSecurityGroups: [sg-1]
---
apiVersion: kops/v1alpha2
kind: InstanceGroup
metadata:
  name: nodes
spec:
  machineType: m5.large
  image: stretch
---
"#;

    #[test]
    fn test_load_yaml_stream() {
        let documents = load_manifests(MULTI_DOC, ManifestFormat::Yaml).unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].kind(), "Cluster");
        assert_eq!(documents[0].name(), "k8s.example.com");
        assert_eq!(documents[1].kind(), "InstanceGroup");
        assert_eq!(documents[1].name(), "nodes");
    }

    #[test]
    fn test_load_json_array() {
        let json = r#"[{"kind":"InstanceGroup","metadata":{"name":"a"},"spec":{}},
                       {"kind":"InstanceGroup","metadata":{"name":"b"},"spec":{}}]"#;
        let documents = load_manifests(json, ManifestFormat::Json).unwrap();
        assert_eq!(documents.iter().map(Document::name).collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_unsupported_kind_reports_document_index() {
        let yaml = "kind: Cluster\n---\nkind: Pod\n";
        let err = load_manifests(yaml, ManifestFormat::Yaml).unwrap_err();
        assert!(matches!(err, Error::Manifest { document: Some(1), .. }));
    }

    #[test]
    fn test_missing_kind() {
        let err = load_manifests("metadata: {name: x}\n", ManifestFormat::Yaml).unwrap_err();
        assert!(err.to_string().contains("no kind"));
    }

    #[test]
    fn test_empty_keys_use_defaults() {
        let yaml = "kind: InstanceGroup\nmetadata:\n  name: nodes\nspec:\n  machineType: m5.large\n  image:\n  additionalSecurityGroups:\n";
        let documents = load_manifests(yaml, ManifestFormat::Yaml).unwrap();
        match &documents[0] {
            Document::InstanceGroup(ig) => {
                assert_eq!(ig.spec.machine_type, "m5.large");
                assert_eq!(ig.spec.image, "");
                assert!(ig.spec.additional_security_groups.is_empty());
            }
            other => panic!("unexpected document: {:?}", other),
        }
    }

    #[test]
    fn test_empty_cluster_api_keys() {
        let yaml = "kind: Cluster\nmetadata:\n  name: c\nspec:\n  api:\n    loadBalancer:\n      additionalSecurityGroups:\n";
        let documents = load_manifests(yaml, ManifestFormat::Yaml).unwrap();
        match &documents[0] {
            Document::Cluster(cluster) => {
                let lb = cluster.spec.api.as_ref().and_then(|api| api.load_balancer.as_ref());
                assert!(lb.map(|lb| lb.additional_security_groups.is_empty()).unwrap_or(false));
            }
            other => panic!("unexpected document: {:?}", other),
        }
    }

    #[test]
    fn test_empty_manifest() {
        assert!(load_manifests("---\n", ManifestFormat::Yaml).is_err());
    }

    #[test]
    fn test_wrong_field_type_is_manifest_error() {
        let yaml = "kind: InstanceGroup\nspec:\n  spotDurationInMinutes: soon\n";
        let err = load_manifests(yaml, ManifestFormat::Yaml).unwrap_err();
        assert!(matches!(err, Error::Manifest { document: Some(0), .. }));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ManifestFormat::from_path(Path::new("c.json")), ManifestFormat::Json);
        assert_eq!(ManifestFormat::from_path(Path::new("c.yml")), ManifestFormat::Yaml);
        assert_eq!(ManifestFormat::from_path(Path::new("cluster")), ManifestFormat::Yaml);
    }
}
