pub mod file_loader;

pub use file_loader::{content_type_for, load_upload_file};
