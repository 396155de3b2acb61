mod relay_service;

pub use relay_service::*;
