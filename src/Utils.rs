/// reading query task files
pub mod load_from_file;
/// terminal and file logging setup
pub mod logging;
