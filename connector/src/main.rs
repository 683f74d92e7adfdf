use aws_endpoints_core::connector::connector_main;
use connector::EndpointsConnector;

pub mod connector;

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    connector_main(EndpointsConnector::new).await?;
    Ok(())
}
