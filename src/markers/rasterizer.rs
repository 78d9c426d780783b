//! SVG -> PNG conversion through an external program.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use crate::error::AppError;

/// Default rasterizer program (ImageMagick).
pub const DEFAULT_RASTERIZER: &str = "convert";

/// Default output density in dots per inch.
pub const DEFAULT_DENSITY: u32 = 10;

/// Converts one SVG file into one PNG file.
pub trait Rasterizer: Sync {
    fn rasterize(&self, svg: &Path, png: &Path) -> Result<(), AppError>;
}

/// Runs `<program> +antialias -background none -density <d> <svg> <png>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRasterizer {
    program: String,
    density: u32,
}

impl CommandRasterizer {
    pub fn new(program: impl Into<String>, density: u32) -> Self {
        Self {
            program: program.into(),
            density,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the program for one conversion.
    pub fn args(&self, svg: &Path, png: &Path) -> Vec<OsString> {
        vec![
            "+antialias".into(),
            "-background".into(),
            "none".into(),
            "-density".into(),
            self.density.to_string().into(),
            svg.as_os_str().to_owned(),
            png.as_os_str().to_owned(),
        ]
    }
}

impl Default for CommandRasterizer {
    fn default() -> Self {
        Self::new(DEFAULT_RASTERIZER, DEFAULT_DENSITY)
    }
}

impl Rasterizer for CommandRasterizer {
    fn rasterize(&self, svg: &Path, png: &Path) -> Result<(), AppError> {
        log::debug!("{} {} -> {}", self.program, svg.display(), png.display());
        let output = Command::new(&self.program)
            .args(self.args(svg, png))
            .output()
            .map_err(|e| AppError::new(4, format!("Failed to run rasterizer '{}': {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::new(
                4,
                format!(
                    "Rasterizer '{}' failed on '{}' ({}): {}",
                    self.program,
                    svg.display(),
                    output.status,
                    stderr.trim()
                ),
            ));
        }
        Ok(())
    }
}
