pub mod system_file;
pub mod diagnostics;
