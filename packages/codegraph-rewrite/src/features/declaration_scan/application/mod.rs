mod scan_declarations;

pub use scan_declarations::{scan, DeclarationScanner};
