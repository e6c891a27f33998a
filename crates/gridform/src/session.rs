//! The editing session: owned grid state plus its persistence and export

use std::path::PathBuf;

use tokio::task::JoinHandle;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::notification::Notification;
use gridform_core::{CellIndex, CellStore, Matrix};
use gridform_store::{FileStore, PersistenceAdapter};
use gridform_xlsx::ExportWriter;

/// Handle to a background save
///
/// Dropping it leaves the save running. Awaiting [`SaveHandle::wait`] only
/// tells you the task finished; save failures are logged by the adapter.
#[derive(Debug)]
pub struct SaveHandle(JoinHandle<()>);

impl SaveHandle {
    /// Wait for the save to finish
    pub async fn wait(self) {
        if let Err(e) = self.0.await {
            log::warn!("Save task failed: {}", e);
        }
    }
}

/// One user's grid for the lifetime of the process
///
/// Owns the [`CellStore`]; every edit goes through [`Session::set`], which
/// schedules a save on the Tokio blocking pool. Saves are not ordered
/// against each other: the last one to finish wins.
///
/// Methods that spawn work must be called from within a Tokio runtime.
#[derive(Debug)]
pub struct Session {
    store: CellStore,
    persistence: PersistenceAdapter,
    exporter: ExportWriter,
}

impl Session {
    /// Load the saved grid, or start empty
    pub async fn open(persistence: PersistenceAdapter, exporter: ExportWriter) -> Self {
        let loader = persistence.clone();
        let store = match tokio::task::spawn_blocking(move || loader.load()).await {
            Ok(Some(store)) => store,
            Ok(None) => CellStore::new(),
            Err(e) => {
                log::warn!("Load task failed: {}", e);
                CellStore::new()
            }
        };
        Self::with_store(store, persistence, exporter)
    }

    /// Open a session backed by the directories in `config`
    pub async fn from_config(config: &Config) -> Self {
        let persistence = PersistenceAdapter::new(FileStore::new(&config.data_dir))
            .with_key(config.storage_key.clone());
        let exporter = ExportWriter::new(&config.download_dir);
        Self::open(persistence, exporter).await
    }

    /// Build a session around an existing store without loading
    pub fn with_store(
        store: CellStore,
        persistence: PersistenceAdapter,
        exporter: ExportWriter,
    ) -> Self {
        Self {
            store,
            persistence,
            exporter,
        }
    }

    /// Current grid state
    pub fn store(&self) -> &CellStore {
        &self.store
    }

    /// Current value of a cell
    pub fn get(&self, index: usize) -> Result<&str> {
        Ok(self.store.get(index)?)
    }

    /// Replace a cell and save the grid in the background
    ///
    /// The returned handle can be ignored; the edit is visible immediately
    /// whether or not the save succeeds.
    pub fn set<S: Into<String>>(&mut self, index: usize, value: S) -> Result<SaveHandle> {
        self.store.set(index, value)?;
        Ok(self.schedule_save())
    }

    /// [`Session::set`] with an A1-style address
    pub fn set_address<S: Into<String>>(&mut self, address: &str, value: S) -> Result<SaveHandle> {
        let index = CellIndex::parse(address)?;
        self.set(index.get(), value)
    }

    fn schedule_save(&self) -> SaveHandle {
        let snapshot = self.store.clone();
        let persistence = self.persistence.clone();
        SaveHandle(tokio::task::spawn_blocking(move || persistence.save(&snapshot)))
    }

    /// Matrix view of the current grid
    pub fn matrix(&self) -> Matrix {
        self.store.to_matrix()
    }

    /// Directory exports go to
    pub fn download_dir(&self) -> PathBuf {
        self.exporter.dir().to_path_buf()
    }

    /// Export the grid and return the path of the new file
    pub async fn try_export(&self) -> Result<PathBuf> {
        let matrix = self.store.to_matrix();
        let exporter = self.exporter.clone();
        let path = tokio::task::spawn_blocking(move || exporter.write(&matrix))
            .await
            .map_err(|e| Error::Task(e.to_string()))??;
        Ok(path)
    }

    /// Export the grid, reporting the outcome as a user notification
    ///
    /// Never fails; errors are logged and turned into
    /// [`Notification::Failure`].
    pub async fn export(&self) -> Notification {
        match self.try_export().await {
            Ok(path) => Notification::Success { path },
            Err(e) => {
                log::error!("Error saving file: {}", e);
                Notification::Failure {
                    reason: e.to_string(),
                }
            }
        }
    }
}
