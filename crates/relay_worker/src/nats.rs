mod relay_processor;

pub use relay_processor::*;
