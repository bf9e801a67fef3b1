//! The single active palette theme and its persisted record.
//!
//! `ThemeManager` owns the `Inactive` / `Applied` state machine. Every
//! transition recomputes roles from scratch with `derive_roles`, swaps the
//! published variables in its `ThemeSink`, and mirrors the result into a
//! `ThemePersistence`. Persistence is best effort: failures are logged and
//! never stop the theme from being published.
//!
//! Loading is two-phase. A new manager is always `Inactive`; callers invoke
//! `rehydrate` (or `restore` with a record they loaded themselves) once the
//! store is available.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::derive::{derive_roles, DerivedTheme, EngineConfig, ThemeRoleSet};
use crate::preset::Preset;
use crate::publish::{publish, retract, ThemeSink};
use crate::types::{InvalidColor, Mode, Palette};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid theme record: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persisted form of the active theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveTheme {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub colors: Vec<String>,
    #[serde(default)]
    pub mode: Mode,
}

impl ActiveTheme {
    pub fn from_palette(palette: &Palette, mode: Mode) -> Self {
        Self {
            id: palette.id.clone(),
            name: palette.name.clone(),
            colors: palette.to_hex_strings(),
            mode,
        }
    }

    /// Validate the stored colors back into a palette.
    pub fn palette(&self) -> Result<Palette, InvalidColor> {
        let mut palette = Palette::parse(&self.colors)?;
        palette.id = self.id.clone();
        palette.name = self.name.clone();
        Ok(palette)
    }
}

/// Key-value storage for the active theme record.
pub trait ThemePersistence {
    fn load(&self) -> Result<Option<ActiveTheme>, StoreError>;
    fn save(&mut self, theme: &ActiveTheme) -> Result<(), StoreError>;
    fn remove(&mut self) -> Result<(), StoreError>;
}

/// Stores the record as pretty-printed JSON at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ThemePersistence for JsonFileStore {
    fn load(&self) -> Result<Option<ActiveTheme>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&mut self, theme: &ActiveTheme) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(theme)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn remove(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Keeps the record in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    record: Option<ActiveTheme>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: ActiveTheme) -> Self {
        Self {
            record: Some(record),
        }
    }

    pub fn record(&self) -> Option<&ActiveTheme> {
        self.record.as_ref()
    }
}

impl ThemePersistence for MemoryStore {
    fn load(&self) -> Result<Option<ActiveTheme>, StoreError> {
        Ok(self.record.clone())
    }

    fn save(&mut self, theme: &ActiveTheme) -> Result<(), StoreError> {
        self.record = Some(theme.clone());
        Ok(())
    }

    fn remove(&mut self) -> Result<(), StoreError> {
        self.record = None;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ThemeState {
    #[default]
    Inactive,
    Applied { mode: Mode, palette: Palette },
}

impl ThemeState {
    pub fn is_applied(&self) -> bool {
        matches!(self, ThemeState::Applied { .. })
    }

    pub fn mode(&self) -> Option<Mode> {
        match self {
            ThemeState::Inactive => None,
            ThemeState::Applied { mode, .. } => Some(*mode),
        }
    }
}

pub struct ThemeManager<S, P> {
    sink: S,
    persistence: P,
    config: EngineConfig,
    preset: Preset,
    state: ThemeState,
    roles: Option<ThemeRoleSet>,
    published: Vec<String>,
}

impl<S: ThemeSink, P: ThemePersistence> ThemeManager<S, P> {
    pub fn new(sink: S, persistence: P, config: EngineConfig) -> Self {
        Self {
            sink,
            persistence,
            config,
            preset: Preset::default(),
            state: ThemeState::Inactive,
            roles: None,
            published: Vec::new(),
        }
    }

    pub fn state(&self) -> &ThemeState {
        &self.state
    }

    pub fn roles(&self) -> Option<&ThemeRoleSet> {
        self.roles.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn preset(&self) -> Preset {
        self.preset
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Names currently published into the sink.
    pub fn published(&self) -> &[String] {
        &self.published
    }

    /// Record the preset identity and publish its attribute.
    pub fn set_preset(&mut self, preset: Preset) {
        self.preset = preset;
        self.sink.set_preset(preset.attribute());
    }

    /// Apply a palette, replacing whatever was applied before.
    ///
    /// An empty palette (or a zero slot limit) behaves like `clear`.
    pub fn apply(&mut self, palette: Palette, mode: Mode) -> Option<&ThemeRoleSet> {
        let roles = match derive_roles(&palette.colors, mode, &self.config) {
            DerivedTheme::Inactive => {
                debug!("apply with empty palette, clearing");
                self.clear();
                return None;
            }
            DerivedTheme::Active(roles) => roles,
        };

        let record = ActiveTheme::from_palette(&palette, mode);
        if let Err(e) = self.persistence.save(&record) {
            warn!(error = %e, "failed to persist active theme");
        }

        retract(&self.published, &mut self.sink);
        self.published = publish(&roles, &mut self.sink);

        info!(
            id = palette.id.as_deref().unwrap_or("-"),
            %mode,
            variables = self.published.len(),
            "applied palette theme"
        );

        self.state = ThemeState::Applied { mode, palette };
        self.roles = Some(roles);
        self.roles.as_ref()
    }

    /// Re-apply the stored palette under a new mode. No-op while inactive.
    pub fn set_mode(&mut self, mode: Mode) -> Option<&ThemeRoleSet> {
        let palette = match &self.state {
            ThemeState::Inactive => {
                debug!(%mode, "set_mode ignored, no theme applied");
                return None;
            }
            ThemeState::Applied { palette, .. } => palette.clone(),
        };
        self.apply(palette, mode)
    }

    /// Remove every published variable and fall back to the preset.
    ///
    /// Safe to call repeatedly and before anything was applied.
    pub fn clear(&mut self) {
        retract(&self.published, &mut self.sink);
        self.published.clear();
        self.sink.set_preset(self.preset.attribute());

        if let Err(e) = self.persistence.remove() {
            warn!(error = %e, "failed to remove persisted theme");
        }

        if self.state.is_applied() {
            info!("cleared palette theme");
        }
        self.state = ThemeState::Inactive;
        self.roles = None;
    }

    /// Re-run `apply` for a record loaded from storage.
    ///
    /// A record with malformed colors is discarded and the manager stays
    /// inactive.
    pub fn restore(&mut self, record: ActiveTheme) -> Option<&ThemeRoleSet> {
        match record.palette() {
            Ok(palette) => self.apply(palette, record.mode),
            Err(e) => {
                warn!(error = %e, "discarding persisted theme");
                self.clear();
                None
            }
        }
    }

    /// Load the persisted record, if any, and restore it.
    pub fn rehydrate(&mut self) -> Option<&ThemeRoleSet> {
        match self.persistence.load() {
            Ok(Some(record)) => self.restore(record),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "failed to load persisted theme");
                None
            }
        }
    }
}
