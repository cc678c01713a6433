mod import_block;
mod simplify_options;

pub use import_block::{build_import, insert_imports};
pub use simplify_options::{SimplifiedUnit, SimplifyOptions};
