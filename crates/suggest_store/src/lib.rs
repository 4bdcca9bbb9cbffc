//! Suggest store: file persistence for counting tables and model settings.
mod error;
mod file_store;
mod filename;
mod persist;
mod registry;
mod settings;
mod snapshot;

pub use error::PersistError;
pub use file_store::FileBackedStore;
pub use filename::model_filename;
pub use persist::{ensure_dir, write_atomically};
pub use registry::DirectoryRegistry;
pub use settings::{load_settings, parse_settings, save_settings};
pub use snapshot::{decode_tables, encode_tables, load_tables, save_tables, SNAPSHOT_VERSION};
