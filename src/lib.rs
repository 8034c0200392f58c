pub mod error;
pub mod invocation;
pub mod key;
pub mod output;
pub mod reportcard;
pub mod table;

pub use error::{Error, ErrorKind, Result};
