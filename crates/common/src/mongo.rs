mod client;
mod document_store;

pub use client::*;
pub use document_store::*;
