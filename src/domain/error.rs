// src/domain/error.rs
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Note not found: {0}")]
    NoteNotFound(Uuid),
    #[error("Position {position} out of range for {len} notes")]
    PositionOutOfRange { position: usize, len: usize },
    #[error("A note needs an image and a non-empty caption")]
    IncompleteDraft,
    #[error("Image could not be stored")]
    ImageNotStored,
    #[error("Persistence error: {0}")]
    Persistence(String),
}
