// src/infrastructure/mod.rs
pub mod blob_store;
pub mod config;
pub mod json_mirror;
pub mod viewer;

pub use blob_store::FileBlobStore;
pub use config::Config;
pub use json_mirror::JsonMirror;
pub use viewer::ImageViewer;
