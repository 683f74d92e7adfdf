pub mod config;
pub mod connector;
pub mod endpoints;
pub mod error;
pub mod region;
pub mod resource;
pub mod util;

pub use endpoints::Endpoints;
pub use error::{EndpointsError, RegionError, ResourceReadError};
pub use resource::get_resource_content;
