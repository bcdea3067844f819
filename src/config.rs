use std::path::{Path, PathBuf};

use crate::{
    composition::recipe::{ColorTheme, RecipeId},
    foundation::error::{GlitchError, GlitchResult},
    room::perspective::RoomConfig,
};

/// Engine configuration, usually read from a JSON file.
///
/// Every field has a default, so `{}` is a valid configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub theme: ColorTheme,
    /// Recipes the selector may choose from.
    pub recipes: Vec<RecipeId>,
    /// Seed for reproducible generation; entropy when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Directory that local (`/name.png`) sources resolve against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_root: Option<PathBuf>,
    pub room: RoomConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            theme: ColorTheme::default(),
            recipes: RecipeId::ALL.to_vec(),
            seed: None,
            asset_root: None,
            room: RoomConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> GlitchResult<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    #[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_json_file(path: impl AsRef<Path>) -> GlitchResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| GlitchError::config(format!("read {}: {e}", path.display())))?;
        let cfg = Self::from_json_str(&text)?;
        tracing::debug!(theme = %cfg.theme, recipes = cfg.recipes.len(), "config loaded");
        Ok(cfg)
    }

    pub fn validate(&self) -> GlitchResult<()> {
        if self.recipes.is_empty() {
            return Err(GlitchError::validation("recipes must not be empty"));
        }
        for (i, r) in self.recipes.iter().enumerate() {
            if self.recipes[..i].contains(r) {
                return Err(GlitchError::validation(format!("recipe '{r}' listed twice")));
            }
        }
        if let Some(root) = &self.asset_root
            && root.as_os_str().is_empty()
        {
            return Err(GlitchError::validation("asset_root must not be empty"));
        }
        self.room.validate()
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
