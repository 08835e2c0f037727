pub mod error;
pub mod types;
pub mod value;

pub use error::ScriptError;
pub use types::*;
pub use value::*;
