//! Static asset paths
//!
//! Flag images follow a fixed naming convention under the asset URL prefix:
//! `<prefix>/<flags_dir>/<code>.png`. Codes that are not two ASCII letters
//! resolve to the placeholder image.

use crate::config::AssetConfig;

/// Resolves flag image URLs
#[derive(Debug, Clone)]
pub struct AssetResolver {
    config: AssetConfig,
}

impl AssetResolver {
    pub fn new(config: AssetConfig) -> Self {
        Self { config }
    }

    /// Flag shown on the World card
    pub fn world_flag(&self) -> String {
        self.url(&self.config.world_flag)
    }

    /// Flag for a two-letter code; the placeholder when absent or invalid
    pub fn flag_for(&self, code: Option<&str>) -> String {
        match code.map(str::to_lowercase) {
            Some(code) if is_flag_code(&code) => self.url(&format!("{}.png", code)),
            other => {
                tracing::debug!(code = ?other, "No flag image for code, using placeholder");
                self.placeholder_flag()
            }
        }
    }

    pub fn placeholder_flag(&self) -> String {
        self.url(&self.config.placeholder_flag)
    }

    fn url(&self, file: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.url_prefix.trim_end_matches('/'),
            self.config.flags_dir.trim_matches('/'),
            file
        )
    }
}

impl Default for AssetResolver {
    fn default() -> Self {
        Self::new(AssetConfig::default())
    }
}

fn is_flag_code(code: &str) -> bool {
    code.len() == 2 && code.chars().all(|c| c.is_ascii_lowercase())
}
