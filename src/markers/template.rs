//! Template text substitution.

use std::fs;
use std::path::Path;

use crate::error::AppError;

/// Placeholder label in the stock marker template.
pub const DEFAULT_TOKEN: &str = ">99<";

/// Font attribute exported by the drawing tool for the stock template.
const EXPORTED_FONT: &str = "font-family=\"'Arial-BoldMT'\"";

/// Portable replacement: generic Arial, bold weight, label centred on its anchor.
const PORTABLE_FONT: &str = "font-family=\"Arial\" font-weight=\"600\" text-anchor=\"middle\"";

/// A literal `from -> to` text replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub from: String,
    pub to: String,
}

impl Substitution {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Swap the exported `Arial-BoldMT` font for one every rasterizer resolves.
    pub fn font_fix() -> Self {
        Self::new(EXPORTED_FONT, PORTABLE_FONT)
    }
}

/// A marker template with its placeholder token.
///
/// Substitutions are applied to `text` as they are added, so the token check
/// always sees what `render` will see.
#[derive(Debug, Clone)]
pub struct MarkerTemplate {
    text: String,
    token: String,
}

impl MarkerTemplate {
    /// Build from template text. Fails if `token` is empty or absent from `text`.
    pub fn new(text: impl Into<String>, token: impl Into<String>) -> Result<Self, AppError> {
        let text = text.into();
        let token = token.into();
        if token.is_empty() {
            return Err(AppError::new(2, "Marker token must not be empty."));
        }
        if !text.contains(&token) {
            return Err(AppError::new(
                2,
                format!("Marker template does not contain the token '{token}'."),
            ));
        }
        Ok(Self { text, token })
    }

    /// Read a template file from disk.
    pub fn load(path: &Path, token: &str) -> Result<Self, AppError> {
        let text = fs::read_to_string(path).map_err(|e| {
            AppError::new(2, format!("Failed to read marker template '{}': {e}", path.display()))
        })?;
        Self::new(text, token)
    }

    /// Apply a substitution ahead of label insertion.
    ///
    /// Fails if the replacement removes every occurrence of the token.
    pub fn with_substitution(mut self, substitution: Substitution) -> Result<Self, AppError> {
        let text = self.text.replace(&substitution.from, &substitution.to);
        if !text.contains(&self.token) {
            return Err(AppError::new(
                2,
                format!(
                    "Substitution of '{}' removes the marker token '{}'.",
                    substitution.from, self.token
                ),
            ));
        }
        self.text = text;
        Ok(self)
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Render the template for one label.
    ///
    /// A bracketed token such as `>99<` becomes `>{label}<`; any other token
    /// is replaced by the bare label.
    pub fn render(&self, label: u32) -> String {
        let bracketed =
            self.token.len() > 2 && self.token.starts_with('>') && self.token.ends_with('<');
        let replacement = if bracketed {
            format!(">{label}<")
        } else {
            label.to_string()
        };
        self.text.replace(&self.token, &replacement)
    }
}
