use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{error::EndpointsError, resource::get_resource_content};

pub const DEFAULT_PARTITION: &str = "aws";

/// Parsed form of the bundled `endpoints.json`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Endpoints {
    pub partitions: Vec<Partition>,
    #[serde(default)]
    pub version:    Option<u32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Partition {
    /// Partition code, e.g. `aws-us-gov`.
    pub partition:      String,
    #[serde(default)]
    pub partition_name: String,
    #[serde(default)]
    pub dns_suffix:     String,
    #[serde(default)]
    pub region_regex:   String,
    #[serde(default)]
    pub regions:        BTreeMap<String, RegionInfo>,
    #[serde(default)]
    pub services:       BTreeMap<String, Service>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct RegionInfo {
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(default)]
    pub endpoints:          BTreeMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_regionalized:    Option<bool>,
}

impl Endpoints {
    pub fn from_slice(bytes: &[u8]) -> Result<Endpoints, EndpointsError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Parse the bundled endpoints document.
    pub fn load() -> Result<Endpoints, EndpointsError> {
        let content = get_resource_content()?;
        let endpoints = Self::from_slice(&content)?;
        tracing::debug!("Loaded {} partitions from bundled endpoints", endpoints.partitions.len());
        Ok(endpoints)
    }

    /// Look up a partition by code, falling back to the `aws` partition.
    pub fn partition_by_name(&self, code: &str) -> Option<&Partition> {
        let mut fallback = None;
        for partition in &self.partitions {
            if partition.partition == code {
                return Some(partition);
            }
            if partition.partition == DEFAULT_PARTITION {
                fallback = Some(partition);
            }
        }
        fallback
    }

    /// Find the partition that owns `region`.
    ///
    /// Regions listed explicitly in a partition win. Unlisted regions are
    /// placed by their name prefix.
    pub fn partition_for_region(&self, region: &str) -> Option<&Partition> {
        if let Some(partition) = self.partitions.iter().find(|p| p.regions.contains_key(region)) {
            return Some(partition);
        }
        self.partition_by_name(partition_code_for_region(region))
    }
}

/// Partition code guessed from a region name prefix.
pub fn partition_code_for_region(region: &str) -> &'static str {
    // us-isob must be tested before us-iso
    if region.starts_with("us-gov") {
        "aws-us-gov"
    } else if region.starts_with("cn") {
        "aws-cn"
    } else if region.starts_with("us-isob") {
        "aws-iso-b"
    } else if region.starts_with("us-iso") {
        "aws-iso"
    } else {
        DEFAULT_PARTITION
    }
}

impl Partition {
    pub fn service(&self, id: &str) -> Option<&Service> {
        self.services.get(id)
    }

    pub fn region_names(&self) -> Vec<&str> {
        self.regions.keys().map(String::as_str).collect()
    }

    /// The region global services (IAM, Route 53, ...) are called through.
    pub fn default_region(&self) -> &'static str {
        match self.partition.as_str() {
            "aws-us-gov" => "us-gov-west-1",
            "aws-cn" => "cn-northwest-1",
            "aws-iso" => "us-iso-east-1",
            "aws-iso-b" => "us-isob-east-1",
            _ => "us-east-1",
        }
    }
}

impl Service {
    /// Endpoint keys for this service, sorted. Pseudo-regions such as
    /// `aws-global` are kept.
    pub fn regions(&self) -> Vec<&str> {
        self.endpoints
            .keys()
            .filter(|k| !k.is_empty())
            .map(String::as_str)
            .collect()
    }
}
