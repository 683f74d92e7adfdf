use std::{collections::BTreeMap, path::Path};

use anyhow::{Context, bail};
use aws_endpoints_core::{Endpoints, config::ron_options, endpoints::Partition};
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};

pub const REGION_TABLE_FILE: &str = "service_regions.ron";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RegionTable {
    pub partitions: Vec<PartitionTable>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PartitionTable {
    pub partition:      String,
    pub name:           String,
    pub default_region: String,
    pub regions:        Vec<String>,
    pub services:       BTreeMap<String, Vec<String>>,
}

impl From<&Partition> for PartitionTable {
    fn from(partition: &Partition) -> Self {
        Self {
            partition:      partition.partition.clone(),
            name:           partition.partition_name.clone(),
            default_region: partition.default_region().to_string(),
            regions:        partition.region_names().into_iter().map(String::from).collect(),
            services:       partition
                .services
                .iter()
                .map(|(id, service)| (id.clone(), service.regions().into_iter().map(String::from).collect()))
                .collect(),
        }
    }
}

pub fn build_region_table(endpoints: &Endpoints, only: Option<&[String]>) -> anyhow::Result<RegionTable> {
    if let Some(only) = only {
        for code in only {
            if !endpoints.partitions.iter().any(|p| &p.partition == code) {
                bail!("Unknown partition {} in config", code);
            }
        }
    }

    let partitions = endpoints
        .partitions
        .iter()
        .filter(|p| only.is_none_or(|only| only.contains(&p.partition)))
        .map(PartitionTable::from)
        .collect();

    Ok(RegionTable { partitions })
}

/// Write `service_regions.ron` into `out_dir`.
pub fn generate(endpoints: &Endpoints, out_dir: &Path, only: Option<&[String]>) -> anyhow::Result<()> {
    let table = build_region_table(endpoints, only)?;

    std::fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;
    let path = out_dir.join(REGION_TABLE_FILE);

    let body = ron_options().to_string_pretty(&table, PrettyConfig::default())?;
    std::fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;

    tracing::info!("Wrote {} partitions to {:?}", table.partitions.len(), path);
    Ok(())
}
