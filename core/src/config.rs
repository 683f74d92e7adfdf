use std::path::{Path, PathBuf};

use ron::extensions::Extensions;
use serde::{Deserialize, Serialize};

/// Contents of `aws/endpoints.ron`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct EndpointsConfig {
    /// Region used for calls that have no region of their own.
    pub client_region: Option<String>,
    /// Regions to query. Entries may use `*` and `?` wildcards.
    pub regions:       Option<Vec<String>>,
    /// Partitions the generator emits. `None` means all of them.
    pub partitions:    Option<Vec<String>>,
    pub out_dir:       Option<PathBuf>,
}

pub fn ron_options() -> ron::Options {
    ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
}

impl EndpointsConfig {
    pub fn try_load(prefix: &Path) -> anyhow::Result<EndpointsConfig> {
        let config_path = prefix.join("aws/endpoints.ron");
        if config_path.is_file() {
            tracing::info!("Loading endpoints config file at {:?}", config_path);
            let config: EndpointsConfig = ron_options().from_str(&std::fs::read_to_string(config_path)?)?;
            Ok(config)
        } else {
            tracing::info!("Endpoints config file at {:?} not present, skipping.", config_path);
            Ok(EndpointsConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = EndpointsConfig::try_load(dir.path()).unwrap();
        assert_eq!(config, EndpointsConfig::default());
    }

    #[test]
    fn loads_ron_with_implicit_some() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("aws")).unwrap();
        std::fs::write(
            dir.path().join("aws/endpoints.ron"),
            r#"(
                client_region: "eu-west-1",
                regions: ["eu-*", "us-east-1"],
            )"#,
        )
        .unwrap();

        let config = EndpointsConfig::try_load(dir.path()).unwrap();
        assert_eq!(config.client_region.as_deref(), Some("eu-west-1"));
        assert_eq!(config.regions, Some(vec!["eu-*".to_string(), "us-east-1".to_string()]));
        assert_eq!(config.partitions, None);
        assert_eq!(config.out_dir, None);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("aws")).unwrap();
        std::fs::write(dir.path().join("aws/endpoints.ron"), "(regions: [").unwrap();
        assert!(EndpointsConfig::try_load(dir.path()).is_err());
    }
}
