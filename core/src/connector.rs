//! Connector bootstrap: build a connector from a constructor callback and
//! serve newline-delimited JSON requests over stdin/stdout.

use std::future::Future;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::util::init_tracing;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    Partitions,
    Regions {
        partition: String,
    },
    ServiceRegions {
        service:   String,
        #[serde(default)]
        partition: Option<String>,
    },
    QueryRegions,
    ServiceIds,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Response {
    Ok(serde_json::Value),
    Error(String),
}

#[async_trait]
pub trait Connector: Send + Sync {
    fn name(&self) -> &str;

    async fn handle(&self, request: Request) -> anyhow::Result<serde_json::Value>;
}

/// Decode one request line and run it. Never fails: every problem becomes an
/// error response.
pub async fn dispatch(connector: &dyn Connector, line: &str) -> Response {
    let request: Request = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("{}: malformed request: {}", connector.name(), e);
            return Response::Error(format!("malformed request: {e}"));
        }
    };

    tracing::debug!("{}: handling {:?}", connector.name(), request);
    match connector.handle(request).await {
        Ok(value) => Response::Ok(value),
        Err(e) => {
            tracing::error!("{}: request failed: {:#}", connector.name(), e);
            Response::Error(format!("{e:#}"))
        }
    }
}

pub async fn serve<R, W>(connector: &dyn Connector, reader: R, mut writer: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = dispatch(connector, &line).await;
        let mut out = serde_json::to_vec(&response)?;
        out.push(b'\n');
        writer.write_all(&out).await?;
        writer.flush().await?;
    }

    tracing::info!("{}: input closed, shutting down", connector.name());
    Ok(())
}

/// Entry point for connector binaries.
pub async fn connector_main<C, F, Fut>(constructor: F) -> anyhow::Result<()>
where
    C: Connector + 'static,
    F: FnOnce() -> Fut,
    Fut: Future<Output = anyhow::Result<C>>,
{
    init_tracing();

    let connector = constructor().await?;
    tracing::info!("{}: serving on stdin/stdout", connector.name());

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    serve(&connector, stdin, tokio::io::stdout()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use pretty_assertions::assert_eq;

    struct Echo;

    #[async_trait]
    impl Connector for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        async fn handle(&self, request: Request) -> anyhow::Result<serde_json::Value> {
            match request {
                Request::Regions { partition } => Ok(serde_json::json!([partition])),
                Request::QueryRegions => bail!("no plan"),
                other => Ok(serde_json::to_value(other)?),
            }
        }
    }

    #[test]
    fn request_wire_format() {
        let request: Request = serde_json::from_str(r#"{"op":"service_regions","service":"ec2"}"#).unwrap();
        assert_eq!(
            request,
            Request::ServiceRegions {
                service:   "ec2".into(),
                partition: None,
            }
        );
        assert_eq!(
            serde_json::to_string(&Response::Error("x".into())).unwrap(),
            r#"{"error":"x"}"#
        );
    }

    #[tokio::test]
    async fn serve_answers_each_line() {
        let input = concat!(
            "{\"op\":\"regions\",\"partition\":\"aws-cn\"}\n",
            "\n",
            "not json\n",
            "{\"op\":\"query_regions\"}\n",
            "{\"op\":\"partitions\"}\n",
        );
        let mut output = Vec::new();
        serve(&Echo, input.as_bytes(), &mut output).await.unwrap();

        let responses: Vec<Response> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(responses.len(), 4);
        assert_eq!(responses[0], Response::Ok(serde_json::json!(["aws-cn"])));
        assert!(matches!(&responses[1], Response::Error(e) if e.starts_with("malformed request")));
        assert_eq!(responses[2], Response::Error("no plan".into()));
        assert_eq!(responses[3], Response::Ok(serde_json::json!({"op": "partitions"})));
    }
}
