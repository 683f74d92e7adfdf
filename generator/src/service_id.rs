use std::{collections::BTreeSet, path::Path};

use anyhow::Context;
use aws_endpoints_core::{Endpoints, util::const_name};

pub const SERVICE_ID_FILE: &str = "service_id.rs";

const HEADER: &str = "// Code generated by aws-endpoints-gen. DO NOT EDIT.\n";

/// `(constant name, service ID)` pairs, sorted by ID. When two IDs map to
/// the same name the first one is kept.
pub fn service_id_constants(endpoints: &Endpoints) -> Vec<(String, String)> {
    let ids: BTreeSet<&str> = endpoints
        .partitions
        .iter()
        .flat_map(|p| p.services.keys().map(String::as_str))
        .collect();

    let mut seen = BTreeSet::new();
    let mut out = Vec::with_capacity(ids.len());
    for id in ids {
        let name = format!("{}_SERVICE_ID", const_name(id));
        if !seen.insert(name.clone()) {
            tracing::warn!("Service ID {} collides with an earlier ID on {}, skipping", id, name);
            continue;
        }
        out.push((name, id.to_string()));
    }
    out
}

pub fn render(constants: &[(String, String)]) -> String {
    let mut source = String::from(HEADER);
    source.push('\n');
    for (name, id) in constants {
        source.push_str(&format!("pub const {name}: &str = {id:?};\n"));
    }
    source
}

/// Write `service_id.rs` into `out_dir`.
pub fn generate_service_id(endpoints: &Endpoints, out_dir: &Path) -> anyhow::Result<()> {
    let constants = service_id_constants(endpoints);

    std::fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;
    let path = out_dir.join(SERVICE_ID_FILE);
    std::fs::write(&path, render(&constants)).with_context(|| format!("writing {}", path.display()))?;

    tracing::info!("Wrote {} service IDs to {:?}", constants.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn endpoints(json: &str) -> Endpoints {
        Endpoints::from_slice(json.as_bytes()).unwrap()
    }

    #[test]
    fn ids_are_merged_across_partitions_and_sorted() {
        let e = endpoints(
            r#"{"partitions": [
                {"partition": "aws", "services": {"sts": {}, "api.ecr": {}}},
                {"partition": "aws-cn", "services": {"ec2": {}, "sts": {}}}
            ]}"#,
        );
        assert_eq!(
            service_id_constants(&e),
            vec![
                ("API_ECR_SERVICE_ID".to_string(), "api.ecr".to_string()),
                ("EC2_SERVICE_ID".to_string(), "ec2".to_string()),
                ("STS_SERVICE_ID".to_string(), "sts".to_string()),
            ]
        );
    }

    #[test]
    fn colliding_names_keep_first_id() {
        let e = endpoints(r#"{"partitions": [{"partition": "aws", "services": {"api-ecr": {}, "api.ecr": {}}}]}"#);
        assert_eq!(
            service_id_constants(&e),
            vec![("API_ECR_SERVICE_ID".to_string(), "api-ecr".to_string())]
        );
    }

    #[test]
    fn render_output() {
        let source = render(&[("EC2_SERVICE_ID".to_string(), "ec2".to_string())]);
        assert_eq!(
            source,
            "// Code generated by aws-endpoints-gen. DO NOT EDIT.\n\npub const EC2_SERVICE_ID: &str = \"ec2\";\n"
        );
    }

    #[test]
    fn writes_file_for_bundled_endpoints() {
        let dir = tempfile::tempdir().unwrap();
        generate_service_id(&Endpoints::load().unwrap(), dir.path()).unwrap();

        let written = std::fs::read_to_string(dir.path().join(SERVICE_ID_FILE)).unwrap();
        assert!(written.starts_with(HEADER));
        assert!(written.contains("pub const API_ECR_SERVICE_ID: &str = \"api.ecr\";"));
        assert!(written.contains("pub const WAFV2_SERVICE_ID: &str = \"wafv2\";"));
    }
}
