//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initialises logging
//! - parses CLI arguments
//! - runs the selector or the marker batch
//! - prints tables and writes optional exports

use std::path::Path;

use clap::Parser;

use crate::cli::{Cli, Command, MarkerArgs, ScaleArgs, SelectorArgs, SurveyArgs};
use crate::domain::{MarkerConfig, OutputFormat, SelectorConfig, TickBounds};
use crate::error::AppError;
use crate::io::export::{CandidateReport, candidates_to_csv, candidates_to_json, write_candidates};
use crate::markers::{CommandRasterizer, MarkerJob, generate_markers};
use crate::markers::rasterizer::DEFAULT_RASTERIZER;
use crate::scale::TickScaleSelector;

pub mod survey;

/// Environment variable naming the rasterizer program.
pub const ENV_RASTERIZER: &str = "TSTOOL_RASTERIZER";

/// Environment variable holding the marker worker count.
pub const ENV_JOBS: &str = "TSTOOL_JOBS";

/// Entry point for the `tstool` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Scale(args) => handle_scale(args),
        Command::Survey(args) => handle_survey(args),
        Command::Markers(args) => handle_markers(args),
    }
}

/// `-v` flags win over `RUST_LOG`; without them `RUST_LOG` (default `warn`) applies.
fn init_logging(verbose: u8) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose > 0 {
        builder.filter_level(match verbose {
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        });
    }
    builder.format_timestamp(None);
    // A logger may already be installed when the library is embedded.
    let _ = builder.try_init();
}

fn handle_scale(args: ScaleArgs) -> Result<(), AppError> {
    let selector = TickScaleSelector::new(selector_config_from_args(&args.selector)?);
    let candidates = selector.select(args.min, args.max)?;

    let text = match args.selector.format {
        OutputFormat::Table => crate::report::format_candidates(&candidates),
        format => render_reports(&[CandidateReport::from_candidates(&candidates)], format)?,
    };
    print!("{text}");

    if let Some(path) = &args.selector.export {
        export(path, &[CandidateReport::from_candidates(&candidates)])?;
    }
    Ok(())
}

fn handle_survey(args: SurveyArgs) -> Result<(), AppError> {
    let selector = TickScaleSelector::new(selector_config_from_args(&args.selector)?);
    let entries = survey::run_survey(&selector, &survey::SAMPLE_RANGES);

    let reports: Vec<CandidateReport> = entries
        .iter()
        .filter_map(|e| e.outcome.as_ref().ok())
        .map(CandidateReport::from_candidates)
        .collect();

    match args.selector.format {
        OutputFormat::Table => {
            let blocks: Vec<String> = entries
                .iter()
                .map(|e| match &e.outcome {
                    Ok(candidates) => crate::report::format_candidates(candidates),
                    Err(err) => crate::report::format_range_error(e.min, e.max, err),
                })
                .collect();
            print!("{}", blocks.join("\n"));
        }
        format => print!("{}", render_reports(&reports, format)?),
    }

    if let Some(path) = &args.selector.export {
        export(path, &reports)?;
    }
    Ok(())
}

fn handle_markers(args: MarkerArgs) -> Result<(), AppError> {
    let config = marker_config_from_args(&args)?;
    let job = MarkerJob::from_config(&config)?;
    let rasterizer = CommandRasterizer::new(&config.rasterizer, config.density);

    let pngs = generate_markers(&job, &rasterizer)?;
    println!("Generated {} marker(s) in {}", pngs.len(), config.out_dir.display());
    Ok(())
}

fn render_reports(reports: &[CandidateReport], format: OutputFormat) -> Result<String, AppError> {
    match format {
        OutputFormat::Json => Ok(candidates_to_json(reports)? + "\n"),
        OutputFormat::Csv => Ok(candidates_to_csv(reports)),
        OutputFormat::Table => Err(AppError::new(4, "Table output is rendered per range.")),
    }
}

fn export(path: &Path, reports: &[CandidateReport]) -> Result<(), AppError> {
    write_candidates(path, reports)?;
    log::info!("exported {} range(s) to {}", reports.len(), path.display());
    Ok(())
}

pub fn selector_config_from_args(args: &SelectorArgs) -> Result<SelectorConfig, AppError> {
    Ok(SelectorConfig {
        bounds: TickBounds::new(args.min_ticks, args.max_ticks)?,
        count_policy: args.count_policy,
        boundary: args.boundary,
        order: args.order,
    })
}

/// Resolve marker settings: flags first, then `TSTOOL_*` environment, then defaults.
pub fn marker_config_from_args(args: &MarkerArgs) -> Result<MarkerConfig, AppError> {
    let rasterizer = match &args.rasterizer {
        Some(program) => program.clone(),
        None => std::env::var(ENV_RASTERIZER).unwrap_or_else(|_| DEFAULT_RASTERIZER.to_string()),
    };

    let jobs = match args.jobs {
        Some(jobs) => jobs,
        None => match std::env::var(ENV_JOBS) {
            Ok(raw) => raw.trim().parse::<usize>().map_err(|e| {
                AppError::new(2, format!("Invalid {ENV_JOBS} value '{raw}': {e}"))
            })?,
            Err(_) => std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
        },
    };
    if jobs == 0 {
        return Err(AppError::new(2, "Marker jobs must be >= 1."));
    }
    if args.start > args.end {
        return Err(AppError::new(
            2,
            format!("Invalid label range: start ({}) must be <= end ({}).", args.start, args.end),
        ));
    }

    Ok(MarkerConfig {
        template_path: args.template.clone(),
        out_dir: args.out_dir.clone(),
        labels: args.start..=args.end,
        token: args.token.clone(),
        font_fix: !args.no_font_fix,
        file_prefix: args.prefix.clone(),
        keep_svg: args.keep_svg,
        jobs,
        rasterizer,
        density: args.density,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Command {
        Cli::parse_from(argv).command
    }

    #[test]
    fn selector_flags_become_config() {
        let Command::Scale(args) = parse(&["tstool", "scale", "1", "3", "--min-ticks", "3", "--boundary", "raw"]) else {
            panic!("expected scale");
        };
        let config = selector_config_from_args(&args.selector).unwrap();
        assert_eq!(config.bounds.min_ticks(), 3);
        assert_eq!(config.boundary, crate::domain::BoundaryMode::Raw);
    }

    #[test]
    fn inverted_tick_bounds_are_input_errors() {
        let Command::Survey(args) = parse(&["tstool", "survey", "--min-ticks", "9"]) else {
            panic!("expected survey");
        };
        let err = selector_config_from_args(&args.selector).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn marker_flags_override_environment() {
        let Command::Markers(args) = parse(&[
            "tstool", "markers", "--template", "t.svg", "--out-dir", "out", "--rasterizer", "magick", "--jobs", "3",
            "--end", "9", "--no-font-fix",
        ]) else {
            panic!("expected markers");
        };
        let config = marker_config_from_args(&args).unwrap();
        assert_eq!(config.rasterizer, "magick");
        assert_eq!(config.jobs, 3);
        assert_eq!(config.labels, 0..=9);
        assert!(!config.font_fix);
    }

    #[test]
    fn marker_label_range_and_jobs_are_validated() {
        let Command::Markers(args) = parse(&[
            "tstool", "markers", "--template", "t.svg", "--out-dir", "out", "--start", "10", "--end", "2", "--jobs", "1",
        ]) else {
            panic!("expected markers");
        };
        assert_eq!(marker_config_from_args(&args).unwrap_err().exit_code(), 2);

        let Command::Markers(args) = parse(&["tstool", "markers", "--template", "t.svg", "--out-dir", "out", "--jobs", "0"])
        else {
            panic!("expected markers");
        };
        assert_eq!(marker_config_from_args(&args).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn structured_formats_render() {
        let report = CandidateReport::from_candidates(&crate::scale::select_tick_scale(2.0, 30.0).unwrap());
        let csv = render_reports(std::slice::from_ref(&report), OutputFormat::Csv).unwrap();
        assert_eq!(csv.lines().count(), 7);
        let json = render_reports(&[report], OutputFormat::Json).unwrap();
        assert!(json.ends_with("]\n"));
    }
}
