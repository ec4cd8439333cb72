mod apply;
mod parser;
mod types;

pub use apply::{apply_hunks, apply_unified_diff};
pub use parser::parse_unified_diff;
pub use types::{ApplyOptions, Hunk};
