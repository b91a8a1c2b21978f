// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use anyhow::{bail, Context, Result};
use application::{NoteDraft, NoteEditor, NoteStore};
use cli::args::{Args, Command};
use infrastructure::config::default_config_path;
use infrastructure::{Config, FileBlobStore, ImageViewer, JsonMirror};
use ports::{NoteRow, TextPresenter};
use image::DynamicImage;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub type FileNoteStore = NoteStore<JsonMirror, FileBlobStore>;

pub fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting photonotes with arguments");

    let config_path = match args.config {
        Some(ref path) => path.clone(),
        None => default_config_path()?,
    };
    let config = Config::load_or_default(&config_path)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?;

    let data_dir = match args.data_dir {
        Some(ref dir) => {
            debug!(?dir, "Using provided data directory");
            dir.clone()
        }
        None => config.data_dir()?,
    };

    let mut store = open_store(&config, data_dir);
    let presenter = TextPresenter::new();

    match args.command {
        Command::List { json } => {
            let rows = rows(&store);
            if json {
                println!("{}", presenter.render_json(&rows)?);
            } else {
                println!("{}", presenter.render_list(&rows));
            }
        }
        Command::Add {
            image: path,
            caption,
        } => {
            let picture = open_picture(&path)?;
            let note = NoteEditor::new(&mut store)
                .save(NoteDraft::new().with_caption(caption).with_image(picture))?;
            println!("Added note {}", note.id);
        }
        Command::Edit {
            note_id,
            caption,
            image,
        } => {
            let current = store
                .get(note_id)
                .cloned()
                .ok_or(domain::DomainError::NoteNotFound(note_id))?;
            let mut draft = NoteDraft::for_note(&current);
            if let Some(caption) = caption {
                draft = draft.with_caption(caption);
            }
            if let Some(path) = image {
                draft = draft.with_image(open_picture(&path)?);
            }
            let note = NoteEditor::new(&mut store).save(draft)?;
            println!("Updated note {}", note.id);
        }
        Command::Delete { positions } => {
            for &position in &positions {
                store.note_at(position)?;
            }
            let removed = store.delete_at(&positions);
            info!(count = removed.len(), "Deleted notes");
            for note in removed {
                println!("Deleted note {} ({})", note.id, note.caption);
            }
        }
        Command::Show {
            note_id,
            json,
            open,
        } => {
            let position = store
                .position(note_id)
                .ok_or(domain::DomainError::NoteNotFound(note_id))?;
            let note = store.note_at(position)?;
            let picture = store.image(note);
            let row = NoteRow::new(position, note, picture.is_some());
            if json {
                println!("{}", serde_json::to_string_pretty(&row)?);
            } else {
                println!("{}", presenter.render_row(&row));
            }
            if open {
                let Some(picture) = picture else {
                    bail!("Note {} has no picture to open", note_id);
                };
                let mut viewer = ImageViewer::new();
                let path = viewer.create_temp_file(&picture)?;
                viewer.open(&path)?;
            }
        }
        Command::Sample => {
            let added = application::samples::seed_if_empty(&mut store);
            println!("Added {} sample notes", added);
        }
    }

    if !store.is_synced() {
        warn!("Changes could not be written to disk");
    }
    Ok(())
}

/// Build the file-backed store rooted at `data_dir`.
pub fn open_store(config: &Config, data_dir: PathBuf) -> FileNoteStore {
    info!(?data_dir, "Opening photo notes");
    let mirror = JsonMirror::new(
        data_dir.join(&config.storage.notes_file),
        data_dir.join(&config.storage.backup_file),
    );
    NoteStore::open(mirror, FileBlobStore::new(data_dir))
}

/// Decode a picture picked from disk.
fn open_picture(path: &Path) -> Result<DynamicImage> {
    image::open(path).with_context(|| format!("Failed to open picture {}", path.display()))
}

fn rows(store: &FileNoteStore) -> Vec<NoteRow> {
    store
        .notes()
        .iter()
        .enumerate()
        .map(|(position, note)| NoteRow::new(position, note, store.image(note).is_some()))
        .collect()
}
