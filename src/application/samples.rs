// src/application/samples.rs
use crate::application::{BlobStore, NoteMirror, NoteStore};
use crate::domain::PhotoNote;
use chrono::{DateTime, Duration, Utc};
use tracing::info;

/// Placeholder notes without pictures, newest first.
pub fn sample_notes(now: DateTime<Utc>) -> Vec<PhotoNote> {
    vec![
        PhotoNote::created_at("Beautiful sunset", "", now),
        PhotoNote::created_at("My favorite coffee shop", "", now - Duration::days(1)),
    ]
}

/// Seed an empty store with [`sample_notes`]. Returns the number of notes added.
pub fn seed_if_empty<M: NoteMirror, B: BlobStore>(store: &mut NoteStore<M, B>) -> usize {
    if !store.is_empty() {
        info!(count = store.len(), "Store already has notes, not seeding samples");
        return 0;
    }
    let samples = sample_notes(Utc::now());
    let count = samples.len();
    for note in samples {
        store.append(note);
    }
    count
}
