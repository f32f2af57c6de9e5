use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::DEFAULT_PROJECT_FOLDER;
use crate::scene::{Registry, Shape2D, Sprite2D};

use super::PersistError;

pub const SHAPES_FILE: &str = "shapes.json";
pub const SPRITES_FILE: &str = "sprites.json";

/// Outcome of [`Project::load`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub folder: PathBuf,
    /// False when the folder did not exist; nothing was read in that case.
    pub found: bool,
    /// Shapes restored, or `None` when no `*shapes.json` file was present.
    pub shapes: Option<usize>,
    /// Sprites restored, or `None` when no `*sprites.json` file was present.
    pub sprites: Option<usize>,
}

/// Save/load front end for one game session.
///
/// Holds the sticky project path: once a folder has been loaded, every later save writes
/// back into that folder and ignores the path it is given.
#[derive(Debug, Clone)]
pub struct Project {
    folder_name: String,
    project_path: Option<PathBuf>,
}

impl Default for Project {
    fn default() -> Self {
        Self::new(DEFAULT_PROJECT_FOLDER)
    }
}

impl Project {
    /// `folder_name` is the subfolder created under a save root when no project path is set.
    pub fn new(folder_name: impl Into<String>) -> Self {
        Self {
            folder_name: folder_name.into(),
            project_path: None,
        }
    }

    pub fn project_path(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }

    pub fn clear_project_path(&mut self) {
        self.project_path = None;
    }

    /// Folder a save with `root` would write to.
    pub fn save_folder(&self, root: impl AsRef<Path>) -> PathBuf {
        match &self.project_path {
            Some(project) => project.clone(),
            None => root.as_ref().join(&self.folder_name),
        }
    }

    /// Writes `shapes.json` and `sprites.json` and returns the folder written to.
    ///
    /// Without a project path the folder is `<root>/<folder_name>`, created if missing.
    /// With one, `root` is ignored. Existing files are overwritten in place.
    pub fn save(&self, registry: &Registry, root: impl AsRef<Path>) -> Result<PathBuf, PersistError> {
        let folder = self.save_folder(root);
        fs::create_dir_all(&folder).map_err(PersistError::io(&folder))?;

        let state = registry.snapshot();
        write_pretty(&folder.join(SHAPES_FILE), &state.shapes)?;
        write_pretty(&folder.join(SPRITES_FILE), &state.sprites)?;

        log::info!(
            "saved {} shapes and {} sprites to {}",
            state.shapes.len(),
            state.sprites.len(),
            folder.display()
        );
        Ok(folder)
    }

    /// Restores the registry from the `*.json` files directly inside `folder`.
    ///
    /// Files ending in `shapes.json` or `sprites.json` are parsed; other JSON files are
    /// ignored. Everything is parsed before the registry is touched, so a malformed file
    /// leaves it unchanged. A kind with no file on disk keeps its current entries.
    ///
    /// `folder` becomes the project path whatever the outcome, including a missing folder
    /// or a parse error.
    pub fn load(&mut self, registry: &Registry, folder: impl AsRef<Path>) -> Result<LoadReport, PersistError> {
        let folder = folder.as_ref().to_path_buf();
        self.project_path = Some(folder.clone());

        let mut report = LoadReport {
            folder: folder.clone(),
            ..LoadReport::default()
        };

        if !folder.is_dir() {
            log::info!("project folder {} does not exist; nothing loaded", folder.display());
            return Ok(report);
        }
        report.found = true;

        let mut shapes: Option<Vec<Shape2D>> = None;
        let mut sprites: Option<Vec<Sprite2D>> = None;

        for file in json_files(&folder)? {
            let Some(name) = file.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            if name.ends_with(SHAPES_FILE) {
                let parsed: Vec<Shape2D> = read_json(&file)?;
                shapes.get_or_insert_with(Vec::new).extend(parsed);
            } else if name.ends_with(SPRITES_FILE) {
                let parsed: Vec<Sprite2D> = read_json(&file)?;
                sprites.get_or_insert_with(Vec::new).extend(parsed);
            } else {
                log::debug!("ignoring {}", file.display());
            }
        }

        report.shapes = shapes.as_ref().map(Vec::len);
        report.sprites = sprites.as_ref().map(Vec::len);

        if shapes.is_some() || sprites.is_some() {
            registry.restore(shapes, sprites);
        }

        log::info!(
            "loaded project {} (shapes: {:?}, sprites: {:?})",
            folder.display(),
            report.shapes,
            report.sprites
        );
        Ok(report)
    }
}

/// `*.json` files directly inside `folder`, sorted by name.
fn json_files(folder: &Path) -> Result<Vec<PathBuf>, PersistError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(folder).map_err(PersistError::io(folder))? {
        let entry = entry.map_err(PersistError::io(folder))?;
        let path = entry.path();
        let is_json = path.extension().is_some_and(|ext| ext == "json");
        if is_json && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, PersistError> {
    let text = fs::read_to_string(path).map_err(PersistError::io(path))?;
    serde_json::from_str(&text).map_err(|source| PersistError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), PersistError> {
    let text = serde_json::to_string_pretty(value).map_err(|source| PersistError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, text).map_err(PersistError::io(path))
}
