use tracing_subscriber::EnvFilter;

/// Install the stderr tracing subscriber, filtered by `RUST_LOG`.
///
/// Stdout is reserved for connector responses and generator output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Constant name for a service ID: `api.ecr` becomes `API_ECR`.
pub fn const_name(service_id: &str) -> String {
    let mut name: String = service_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect();
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}
