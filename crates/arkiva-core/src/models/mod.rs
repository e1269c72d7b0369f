pub mod file;

pub use file::{FileKind, FileRecord, FileResponse, InvalidDerivation};
