mod client;
mod consumer;
mod publisher;

pub use client::*;
pub use consumer::*;
pub use publisher::*;
