use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use aws_endpoints_core::{
    Endpoints,
    config::EndpointsConfig,
    connector::{Connector, Request},
    region::{RegionPlan, resolve_regions, sdk_region},
    util::const_name,
};
use serde_json::{Value, json};

pub struct EndpointsConnector {
    endpoints: Endpoints,
    plan:      RegionPlan,
}

impl EndpointsConnector {
    pub async fn new() -> anyhow::Result<Self> {
        let config = EndpointsConfig::try_load(Path::new("."))?;
        let sdk_region = sdk_region().await;
        Self::with_config(&config, sdk_region.as_deref())
    }

    pub fn with_config(config: &EndpointsConfig, sdk_region: Option<&str>) -> anyhow::Result<Self> {
        let endpoints = Endpoints::load().context("loading bundled endpoints")?;
        let plan = resolve_regions(config, sdk_region, &endpoints)?;
        tracing::info!(
            "Querying {} regions in partition {}, client region {}",
            plan.query_regions.len(),
            plan.partition,
            plan.query_client_region
        );
        Ok(Self { endpoints, plan })
    }

    fn service_regions(&self, service: &str, partition: Option<&str>) -> anyhow::Result<Value> {
        let code = partition.unwrap_or(self.plan.partition.as_str());
        let Some(partition) = self.endpoints.partition_by_name(code) else {
            anyhow::bail!("No partition {}", code);
        };
        let Some(svc) = partition.service(service) else {
            anyhow::bail!("Service {} is not available in partition {}", service, partition.partition);
        };

        Ok(json!({
            "partition": partition.partition,
            "service": service,
            "regions": svc.regions(),
        }))
    }
}

#[async_trait]
impl Connector for EndpointsConnector {
    fn name(&self) -> &str {
        "aws-endpoints"
    }

    async fn handle(&self, request: Request) -> anyhow::Result<Value> {
        match request {
            Request::Partitions => Ok(Value::from(
                self.endpoints
                    .partitions
                    .iter()
                    .map(|p| {
                        json!({
                            "partition": p.partition,
                            "name": p.partition_name,
                            "dns_suffix": p.dns_suffix,
                            "default_region": p.default_region(),
                        })
                    })
                    .collect::<Vec<_>>(),
            )),
            Request::Regions { partition } => {
                let Some(p) = self.endpoints.partition_by_name(&partition) else {
                    anyhow::bail!("No partition {}", partition);
                };
                Ok(json!(p.region_names()))
            }
            Request::ServiceRegions { service, partition } => self.service_regions(&service, partition.as_deref()),
            Request::QueryRegions => Ok(serde_json::to_value(&self.plan)?),
            Request::ServiceIds => {
                let Some(p) = self.endpoints.partition_by_name(&self.plan.partition) else {
                    anyhow::bail!("No partition {}", self.plan.partition);
                };
                let ids: serde_json::Map<String, Value> = p
                    .services
                    .keys()
                    .map(|id| (format!("{}_SERVICE_ID", const_name(id)), Value::from(id.as_str())))
                    .collect();
                Ok(Value::Object(ids))
            }
        }
    }
}
