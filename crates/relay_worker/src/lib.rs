pub mod domain;
pub mod nats;
pub mod relay_worker;

pub use domain::*;
pub use nats::*;
pub use relay_worker::*;
