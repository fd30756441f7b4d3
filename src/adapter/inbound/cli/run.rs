//! Handlers for the `run` and `analyze` commands.

use std::path::Path;

use crate::adapter::inbound::cli::command::{AnalyzeArgs, RunArgs};
use crate::adapter::inbound::cli::{init_logging, output, render};
use crate::adapter::outbound::{ExportDirectory, LogNotifier};
use crate::application::{AnalysisService, HourWindow, LoadedHour};
use crate::domain::{HourStamp, HourlySnapshot};
use crate::error::Result;
use crate::infrastructure::config::Config;
use crate::port::NotifierRegistry;

fn build_service(config: &Config) -> AnalysisService {
    let mut notifiers = NotifierRegistry::new();
    notifiers.register(Box::new(LogNotifier));
    AnalysisService::new(config.scope(), config.analysis.clone()).with_notifiers(notifiers)
}

fn load_file(path: &Path) -> Result<HourlySnapshot> {
    Ok(HourlySnapshot::from_path(path)?)
}

/// Execute `run`.
pub fn execute(args: &RunArgs) -> Result<()> {
    let config = Config::load(&args.config)?;
    init_logging(&config);
    let service = build_service(&config);
    output::header(env!("CARGO_PKG_VERSION"));

    if let Some(sample) = &args.sample {
        let snapshot = load_file(sample)?;
        let report = service.analyze_hour(&LoadedHour {
            hour: None,
            snapshot,
        });
        render::hour_report(&report);
        output::note("Trend analysis is not run for sample files");
        return Ok(());
    }

    let current = match args.at {
        Some(timestamp) => HourStamp::floor(timestamp),
        None => HourStamp::now().hours_before(config.data.hours_back),
    };
    let trend_enabled = config.trend.enabled && !args.no_trend;
    let trend_hours = if trend_enabled {
        args.hours.unwrap_or(config.trend.hours)
    } else {
        0
    };

    let source = ExportDirectory::new(&config.data.dir, config.realm);
    let pb = output::spinner(&format!(
        "Loading {} hour(s) up to {current} from {}",
        trend_hours + 1,
        source.dir().display()
    ));
    let window = match service.load_window(&source, current, trend_hours) {
        Ok(window) => {
            output::spinner_success(&pb, &format!("Loaded {} hour(s)", window.len()));
            window
        }
        Err(e) => {
            output::spinner_fail(&pb, "Failed to load the current hour");
            return Err(e);
        }
    };

    report_window(&service, &window, trend_enabled);
    Ok(())
}

/// Execute `analyze`.
pub fn execute_analyze(args: &AnalyzeArgs) -> Result<()> {
    let config = Config::load(&args.config)?;
    init_logging(&config);
    let service = build_service(&config);
    output::header(env!("CARGO_PKG_VERSION"));

    let snapshots = args
        .files
        .iter()
        .map(|path| load_file(path))
        .collect::<Result<Vec<_>>>()?;
    let window = HourWindow::from_snapshots(snapshots);

    report_window(&service, &window, config.trend.enabled);
    Ok(())
}

fn report_window(service: &AnalysisService, window: &HourWindow, trend_enabled: bool) {
    if let Some(current) = window.current() {
        render::hour_report(&service.analyze_hour(current));
    }
    if !trend_enabled || window.len() < 2 {
        return;
    }

    match service.analyze_trend(window) {
        Some(report) => render::trend_report(&report),
        None => output::note("Trend analysis needs at least 2 hours"),
    }
}
