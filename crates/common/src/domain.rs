mod message;
mod result;
mod traits;

pub use message::*;
pub use result::*;
pub use traits::*;
