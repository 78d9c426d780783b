//! Batch marker generation.
//!
//! Each label writes its own staging SVG (`<prefix><n>.svg`) next to its PNG,
//! so labels can be rasterized in parallel without sharing a scratch file.

use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::domain::MarkerConfig;
use crate::error::AppError;
use crate::markers::rasterizer::Rasterizer;
use crate::markers::template::{MarkerTemplate, Substitution};

/// Default output file prefix.
pub const DEFAULT_PREFIX: &str = "marker_";

/// Default label range.
pub const DEFAULT_LABELS: RangeInclusive<u32> = 0..=99;

/// One batch of markers to generate.
#[derive(Debug, Clone)]
pub struct MarkerJob {
    template: MarkerTemplate,
    out_dir: PathBuf,
    labels: RangeInclusive<u32>,
    file_prefix: String,
    keep_svg: bool,
    jobs: usize,
}

impl MarkerJob {
    pub fn new(
        template: MarkerTemplate,
        out_dir: impl Into<PathBuf>,
        labels: RangeInclusive<u32>,
    ) -> Result<Self, AppError> {
        if labels.is_empty() {
            return Err(AppError::new(
                2,
                format!(
                    "Invalid label range: start ({}) must be <= end ({}).",
                    labels.start(),
                    labels.end()
                ),
            ));
        }
        Ok(Self {
            template,
            out_dir: out_dir.into(),
            labels,
            file_prefix: DEFAULT_PREFIX.to_string(),
            keep_svg: false,
            jobs: 1,
        })
    }

    /// Load the template and build a job from resolved configuration.
    pub fn from_config(config: &MarkerConfig) -> Result<Self, AppError> {
        let mut template = MarkerTemplate::load(&config.template_path, &config.token)?;
        if config.font_fix {
            template = template.with_substitution(Substitution::font_fix())?;
        }
        if config.file_prefix.contains(['/', '\\']) {
            return Err(AppError::new(2, "Marker file prefix must not contain path separators."));
        }
        Ok(Self::new(template, &config.out_dir, config.labels.clone())?
            .with_prefix(&config.file_prefix)
            .keep_svg(config.keep_svg)
            .with_jobs(config.jobs))
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    pub fn keep_svg(mut self, keep: bool) -> Self {
        self.keep_svg = keep;
        self
    }

    /// Worker threads used for rasterization (at least 1).
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn labels(&self) -> &RangeInclusive<u32> {
        &self.labels
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn svg_path(&self, label: u32) -> PathBuf {
        self.out_dir.join(format!("{}{label}.svg", self.file_prefix))
    }

    pub fn png_path(&self, label: u32) -> PathBuf {
        self.out_dir.join(format!("{}{label}.png", self.file_prefix))
    }

    fn render_one(&self, rasterizer: &dyn Rasterizer, label: u32) -> Result<PathBuf, AppError> {
        let svg_path = self.svg_path(label);
        let png_path = self.png_path(label);

        fs::write(&svg_path, self.template.render(label)).map_err(|e| {
            AppError::new(2, format!("Failed to write staging SVG '{}': {e}", svg_path.display()))
        })?;

        let result = rasterizer.rasterize(&svg_path, &png_path);

        if !self.keep_svg {
            if let Err(e) = fs::remove_file(&svg_path) {
                log::warn!("could not remove staging SVG '{}': {e}", svg_path.display());
            }
        }

        result?;
        log::info!("wrote {}", png_path.display());
        Ok(png_path)
    }
}

/// Generate every marker in the job and return the PNG paths in label order.
///
/// The first failing label aborts the batch and its error is returned.
pub fn generate_markers(job: &MarkerJob, rasterizer: &dyn Rasterizer) -> Result<Vec<PathBuf>, AppError> {
    fs::create_dir_all(&job.out_dir).map_err(|e| {
        AppError::new(2, format!("Failed to create output dir '{}': {e}", job.out_dir.display()))
    })?;

    log::info!(
        "generating markers {}..={} into {} ({} worker(s))",
        job.labels.start(),
        job.labels.end(),
        job.out_dir.display(),
        job.jobs
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(job.jobs)
        .build()
        .map_err(|e| AppError::new(4, format!("Failed to start worker pool: {e}")))?;

    pool.install(|| {
        job.labels
            .clone()
            .into_par_iter()
            .map(|label| job.render_one(rasterizer, label))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    const TEMPLATE: &str = "<svg><text font-family=\"'Arial-BoldMT'\">99</text></svg>";

    /// Copies the SVG text into the "PNG" so tests can inspect what was rendered.
    struct CopyRasterizer {
        calls: Mutex<Vec<u32>>,
        fail_on: Option<u32>,
    }

    impl CopyRasterizer {
        fn new(fail_on: Option<u32>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on,
            }
        }
    }

    impl Rasterizer for CopyRasterizer {
        fn rasterize(&self, svg: &Path, png: &Path) -> Result<(), AppError> {
            let text = fs::read_to_string(svg).map_err(|e| AppError::new(4, e.to_string()))?;
            let label: u32 = text
                .split('>')
                .filter_map(|part| part.split('<').next())
                .find_map(|s| s.parse().ok())
                .ok_or_else(|| AppError::new(4, "no label"))?;
            self.calls.lock().unwrap().push(label);
            if self.fail_on == Some(label) {
                return Err(AppError::new(4, format!("boom on {label}")));
            }
            fs::write(png, text).map_err(|e| AppError::new(4, e.to_string()))
        }
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tstool-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn template() -> MarkerTemplate {
        MarkerTemplate::new(TEMPLATE, ">99<")
            .unwrap()
            .with_substitution(Substitution::font_fix())
            .unwrap()
    }

    #[test]
    fn generates_one_png_per_label_in_order() {
        let dir = scratch_dir("markers-ok");
        let job = MarkerJob::new(template(), &dir, 0..=11).unwrap().with_jobs(4);
        let rasterizer = CopyRasterizer::new(None);

        let pngs = generate_markers(&job, &rasterizer).unwrap();

        assert_eq!(pngs.len(), 12);
        for (label, png) in (0..=11).zip(&pngs) {
            assert_eq!(png, &dir.join(format!("marker_{label}.png")));
            let body = fs::read_to_string(png).unwrap();
            assert!(body.contains(&format!(">{label}<")));
            assert!(body.contains("font-weight=\"600\""));
            assert!(!dir.join(format!("marker_{label}.svg")).exists());
        }
        let mut calls = rasterizer.calls.lock().unwrap().clone();
        calls.sort_unstable();
        assert_eq!(calls, (0..=11).collect::<Vec<_>>());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn keep_svg_and_custom_prefix() {
        let dir = scratch_dir("markers-keep");
        let job = MarkerJob::new(template(), &dir, 5..=6)
            .unwrap()
            .with_prefix("pin_")
            .keep_svg(true);

        generate_markers(&job, &CopyRasterizer::new(None)).unwrap();

        assert!(dir.join("pin_5.svg").exists());
        assert!(dir.join("pin_6.png").exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn failing_label_aborts_batch() {
        let dir = scratch_dir("markers-fail");
        let job = MarkerJob::new(template(), &dir, 40..=44).unwrap();

        let err = generate_markers(&job, &CopyRasterizer::new(Some(42))).unwrap_err();

        assert_eq!(err.exit_code(), 4);
        assert!(err.message().contains("boom on 42"));
        assert!(!dir.join("marker_42.svg").exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn empty_label_range_is_rejected() {
        #[allow(clippy::reversed_empty_ranges)]
        let err = MarkerJob::new(template(), "out", 10..=3).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
