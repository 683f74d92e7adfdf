use std::{
    io::Write,
    path::{Path, PathBuf},
};

use aws_endpoints_core::{Endpoints, config::EndpointsConfig, util::init_tracing};
use clap::Parser;

pub mod generate;
pub mod service_id;

#[derive(Parser, Debug)]
#[command(version, about = "Generate region tables and service ID constants from the bundled AWS endpoints")]
struct Args {
    /// Directory holding `aws/endpoints.ron`.
    #[arg(long, default_value = ".")]
    prefix:  PathBuf,
    /// Output directory. Overrides `out_dir` from the config file.
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

const DEFAULT_OUT_DIR: &str = "generated";

/// Run both generators, writing each failure to `out`. A failing generator
/// does not stop the other one.
pub fn run(
    endpoints: &Endpoints,
    out_dir: &Path,
    partitions: Option<&[String]>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if let Err(e) = generate::generate(endpoints, out_dir, partitions) {
        writeln!(out, "{e:#}")?;
    }
    if let Err(e) = service_id::generate_service_id(endpoints, out_dir) {
        writeln!(out, "{e:#}")?;
    }
    Ok(())
}

pub fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = EndpointsConfig::try_load(&args.prefix)?;
    let out_dir = args
        .out_dir
        .or(config.out_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR));

    let endpoints = Endpoints::load()?;

    run(&endpoints, &out_dir, config.partitions.as_deref(), &mut std::io::stdout().lock())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failing_generator_is_reported_and_the_other_still_runs() {
        let endpoints = Endpoints::load().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let only = vec!["aws-moon".to_string()];
        let mut out = Vec::new();

        run(&endpoints, dir.path(), Some(only.as_slice()), &mut out).unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Unknown partition aws-moon"), "{printed}");
        assert_eq!(printed.lines().count(), 1);
        assert!(!dir.path().join(generate::REGION_TABLE_FILE).exists());
        assert!(dir.path().join(service_id::SERVICE_ID_FILE).is_file());
    }

    #[test]
    fn both_generators_write_their_files() {
        let endpoints = Endpoints::load().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();

        run(&endpoints, dir.path(), None, &mut out).unwrap();

        assert!(out.is_empty());
        assert!(dir.path().join(generate::REGION_TABLE_FILE).is_file());
        assert!(dir.path().join(service_id::SERVICE_ID_FILE).is_file());
    }
}
