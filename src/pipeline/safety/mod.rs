pub mod types;
pub mod thinking;
pub mod output_sanitize;

pub use types::*;
pub use thinking::*;
pub use output_sanitize::*;
