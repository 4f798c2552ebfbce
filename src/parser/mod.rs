//! Parser module - decoding of flexfringe output files

pub mod list;
pub mod result;

// Re-export key types
pub use list::{parse_float_list, parse_list};
pub use result::{AbbadingoTrace, ResultRow, ResultTable, parse_result_file, parse_result_reader};
