//! Input, output and configuration around the settlement engine: CSV and
//! TOML loaders, report rendering and logging for the `settlement` binary.

pub mod amount;
pub mod bracket_loader;
pub mod form_loader;
pub mod logging;
pub mod rates_file;
pub mod report;

pub use amount::{ParseAmountError, parse_amount};
pub use bracket_loader::{BracketLoadError, BracketLoader, BracketRecord};
pub use form_loader::FormLoadError;
pub use rates_file::RatesFileError;
pub use report::OutputFormat;
