//! Working out which regions a query covers.
//!
//! The client region is picked first, in this order:
//! 1. `client_region` from the config file.
//! 2. The region the AWS SDK resolves (`AWS_REGION`, profile, ...).
//! 3. The first entry in `regions` that is not a wildcard.
//! 4. `us-east-1`.
//!
//! The client region fixes the partition, which in turn gives the default
//! and available regions. The configured `regions` patterns are then expanded
//! against the available regions. A named region that is not available is a
//! config error; this catches misspelled names and regions from another
//! partition. Wildcards that expand to nothing are dropped, unless nothing
//! at all is left to query.

use aws_config::meta::region::RegionProviderChain;
use serde::{Deserialize, Serialize};
use wildmatch::WildMatch;

use crate::{config::EndpointsConfig, endpoints::Endpoints, error::RegionError};

pub const FALLBACK_REGION: &str = "us-east-1";

/// Pseudo-region for services such as WAF Classic that also have a global scope.
pub const GLOBAL_REGION: &str = "global";

#[derive(Debug, Clone)]
pub struct RegionPattern {
    raw:     String,
    matcher: WildMatch,
}

impl RegionPattern {
    pub fn new(raw: &str) -> Self {
        Self {
            raw:     raw.to_string(),
            matcher: WildMatch::new(raw),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.raw.contains(['*', '?'])
    }

    pub fn matches(&self, region: &str) -> bool {
        self.matcher.matches(region)
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RegionPlan {
    pub client_region:        String,
    pub partition:            String,
    pub default_region:       String,
    pub available_regions:    Vec<String>,
    pub query_regions:        Vec<String>,
    pub query_client_region:  String,
    pub query_default_region: Option<String>,
}

/// Region the AWS SDK would use, from the environment or the shared profile.
pub async fn sdk_region() -> Option<String> {
    RegionProviderChain::default_provider()
        .region()
        .await
        .map(|r| r.as_ref().to_string())
}

pub fn resolve_regions(
    config: &EndpointsConfig,
    sdk_region: Option<&str>,
    endpoints: &Endpoints,
) -> Result<RegionPlan, RegionError> {
    let patterns: Vec<RegionPattern> = config
        .regions
        .iter()
        .flatten()
        .map(|r| RegionPattern::new(r))
        .collect();

    let client_region = config
        .client_region
        .as_deref()
        .or(sdk_region)
        .or_else(|| patterns.iter().find(|p| !p.is_wildcard()).map(RegionPattern::as_str))
        .unwrap_or(FALLBACK_REGION)
        .to_string();

    let Some(partition) = endpoints.partition_for_region(&client_region) else {
        return Err(RegionError::UnknownPartition(client_region));
    };

    let available_regions: Vec<String> = partition.region_names().into_iter().map(String::from).collect();

    let query_regions = if patterns.is_empty() {
        vec![client_region.clone()]
    } else {
        // Wildcards that expand to nothing are dropped, named regions must exist.
        let unmatched: Vec<String> = patterns
            .iter()
            .filter(|p| !p.is_wildcard() && !available_regions.iter().any(|r| p.matches(r)))
            .map(|p| p.as_str().to_string())
            .collect();
        if !unmatched.is_empty() {
            return Err(RegionError::UnmatchedRegions {
                partition: partition.partition.clone(),
                patterns:  unmatched,
            });
        }

        let expanded: Vec<String> = available_regions
            .iter()
            .filter(|r| patterns.iter().any(|p| p.matches(r)))
            .cloned()
            .collect();
        if expanded.is_empty() {
            return Err(RegionError::UnmatchedRegions {
                partition: partition.partition.clone(),
                patterns:  patterns.iter().map(|p| p.as_str().to_string()).collect(),
            });
        }
        expanded
    };

    let query_client_region = if query_regions.contains(&client_region) {
        client_region.clone()
    } else {
        tracing::warn!(
            "Client region {} is not in the queried regions {:?}",
            client_region,
            query_regions
        );
        query_regions[0].clone()
    };

    let default_region = partition.default_region().to_string();
    let query_default_region = query_regions.contains(&default_region).then(|| default_region.clone());

    tracing::debug!("Resolved {} query regions in partition {}", query_regions.len(), partition.partition);

    Ok(RegionPlan {
        client_region,
        partition: partition.partition.clone(),
        default_region,
        available_regions,
        query_regions,
        query_client_region,
        query_default_region,
    })
}

/// `regions` with the global pseudo-region in front.
pub fn with_global_region(regions: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(regions.len() + 1);
    out.push(GLOBAL_REGION.to_string());
    out.extend(regions.iter().cloned());
    out
}
