//! Machine type lookup
//!
//! Validation only needs to know whether a machine type name resolves. The
//! [`MachineTypeResolver`] trait is that seam. [`MachineTypeCatalog`] answers
//! from the built-in AWS table (optionally extended from a file), and
//! [`FixedResolver`] is a deterministic stand-in for tests and embedders.

mod builtin;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Hardware description of one machine type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineTypeInfo {
    /// API name, e.g. `m5.large`
    pub name: String,

    /// Memory in GiB
    pub memory_gb: f32,

    /// Virtual CPU count
    pub cores: u32,

    #[serde(default)]
    pub gpu: bool,

    /// Number of instance-store volumes
    #[serde(default)]
    pub ephemeral_disks: u32,

    /// CPU credits instead of a fixed baseline
    #[serde(default)]
    pub burstable: bool,
}

/// Resolves machine type names
///
/// Any `Err` is treated by the validators as "this machine type is invalid";
/// there is no distinction between an unknown type and an unavailable source.
pub trait MachineTypeResolver {
    fn resolve(&self, name: &str) -> Result<MachineTypeInfo>;
}

impl<R: MachineTypeResolver + ?Sized> MachineTypeResolver for &R {
    fn resolve(&self, name: &str) -> Result<MachineTypeInfo> {
        (**self).resolve(name)
    }
}

impl<R: MachineTypeResolver + ?Sized> MachineTypeResolver for Box<R> {
    fn resolve(&self, name: &str) -> Result<MachineTypeInfo> {
        (**self).resolve(name)
    }
}

/// Catalog of known machine types keyed by name
#[derive(Debug, Clone, Default)]
pub struct MachineTypeCatalog {
    types: BTreeMap<String, MachineTypeInfo>,
}

impl MachineTypeCatalog {
    /// An empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog preloaded with the built-in AWS machine types
    pub fn aws() -> Self {
        let mut catalog = Self::new();
        catalog.extend(builtin::aws_machine_types());
        catalog
    }

    /// Add or replace entries
    pub fn extend<I>(&mut self, types: I)
    where
        I: IntoIterator<Item = MachineTypeInfo>,
    {
        for info in types {
            self.types.insert(info.name.clone(), info);
        }
    }

    /// Parse a YAML or JSON list of machine types and add them
    ///
    /// Returns the number of entries read.
    pub fn extend_from_str(&mut self, content: &str, yaml: bool) -> Result<usize> {
        let extra: Vec<MachineTypeInfo> = if yaml {
            serde_yaml::from_str(content)?
        } else {
            serde_json::from_str(content)?
        };

        if let Some(unnamed) = extra.iter().position(|t| t.name.trim().is_empty()) {
            return Err(Error::catalog(format!("machine type entry {} has no name", unnamed)));
        }

        let count = extra.len();
        self.extend(extra);
        Ok(count)
    }

    /// Load extra machine types from a `.yaml`/`.yml` or `.json` file
    pub fn load_extra_file(&mut self, path: &Path) -> Result<usize> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Catalog {
            message: format!("failed to read catalog file {}", path.display()),
            source: Some(e.into()),
        })?;

        let yaml = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("yaml") | Some("yml")
        );
        let count = self.extend_from_str(&content, yaml)?;
        tracing::info!(file = %path.display(), count, "Loaded extra machine types");
        Ok(count)
    }

    pub fn get(&self, name: &str) -> Option<&MachineTypeInfo> {
        self.types.get(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Entries in name order
    pub fn iter(&self) -> impl Iterator<Item = &MachineTypeInfo> {
        self.types.values()
    }
}

impl MachineTypeResolver for MachineTypeCatalog {
    fn resolve(&self, name: &str) -> Result<MachineTypeInfo> {
        tracing::trace!(machine_type = name, "Resolving machine type");
        self.get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownMachineType {
                name: name.to_string(),
            })
    }
}

/// Resolver that knows exactly the names it was built with
#[derive(Debug, Clone, Default)]
pub struct FixedResolver {
    known: HashSet<String>,
}

impl FixedResolver {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Resolver that rejects every name
    pub fn empty() -> Self {
        Self::default()
    }
}

impl MachineTypeResolver for FixedResolver {
    fn resolve(&self, name: &str) -> Result<MachineTypeInfo> {
        if self.known.contains(name) {
            Ok(MachineTypeInfo {
                name: name.to_string(),
                memory_gb: 0.0,
                cores: 0,
                gpu: false,
                ephemeral_disks: 0,
                burstable: false,
            })
        } else {
            Err(Error::UnknownMachineType {
                name: name.to_string(),
            })
        }
    }
}
