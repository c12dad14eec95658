//! ldif-core: Core library for converting LDIF files to CSV
//!
//! This library provides functionality to:
//! - Load one or more LDIF files into a single line sequence
//! - Classify lines and group them into entries delimited by `dn`
//! - Collect the union of attribute names across all entries
//! - Render the entries as a CSV table (or JSON)

pub mod error;
pub mod loader;
pub mod parser;
pub mod table;
pub mod writer;

pub use error::{Error, Result};
pub use loader::{load_files, load_str};
pub use parser::{classify, parse_lines, parse_str, LineKind};
pub use table::{AttributeSet, ColumnOrder, Directory, Entry, DN};
pub use writer::{render, write_directory, OutputFormat, Quoting, WriteOptions};
