mod compile;
mod scanner;

pub use compile::compile_pattern;
pub use scanner::{Extraction, NamedParamScanner, ScanPolicy};
