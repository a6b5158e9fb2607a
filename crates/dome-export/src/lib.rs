pub mod csv;
pub mod errors;
pub mod load;
pub mod metadata;
pub mod save;

pub use csv::{bom_csv, bom_rows, parse_bom_csv, suggested_file_name, BomRow, CSV_HEADER};
pub use errors::{ExportError, LoadError};
pub use load::load_snapshot;
pub use metadata::ProjectMetadata;
pub use save::{save_snapshot, DomeSnapshot, FORMAT_VERSION};
