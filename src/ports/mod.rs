// src/ports/mod.rs
pub mod text;

pub use text::{NoteRow, TextPresenter};
