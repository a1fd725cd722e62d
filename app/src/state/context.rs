use log::{error, info, warn};
use viewlayer_library::LibraryError;
use viewlayer_library::editor::{Report, ReportLevel};
use viewlayer_library::io::config_file::ImportSummary;
use viewlayer_library::model::scene::AovType;

const MAX_REPORTS: usize = 200;

/// UI-only state shared by the panels: text inputs and the report log.
pub struct PanelContext {
    pub reports: Vec<Report>,
    pub custom_aov_name: String,
    pub custom_aov_type: AovType,
    pub preset_name: String,
    pub selected_preset: Option<String>,
}

impl PanelContext {
    pub fn new() -> Self {
        Self {
            reports: Vec::new(),
            custom_aov_name: String::new(),
            custom_aov_type: AovType::Color,
            preset_name: String::new(),
            selected_preset: None,
        }
    }

    pub fn push(&mut self, report: Report) {
        match report.level {
            ReportLevel::Info => info!("{}", report.message),
            ReportLevel::Warning => warn!("{}", report.message),
            ReportLevel::Error => error!("{}", report.message),
        }
        self.reports.push(report);
        if self.reports.len() > MAX_REPORTS {
            let overflow = self.reports.len() - MAX_REPORTS;
            self.reports.drain(..overflow);
        }
    }

    /// Log the outcome of a command, whether it produced a report or failed.
    pub fn record(&mut self, result: Result<Report, LibraryError>) {
        match result {
            Ok(report) => self.push(report),
            Err(LibraryError::NothingSelected(what)) => {
                self.push(Report::error(format!("Nothing to do: {}", what)))
            }
            Err(e) => self.push(Report::error(e.to_string())),
        }
    }

    pub fn record_import(&mut self, result: Result<ImportSummary, LibraryError>) {
        let summary = match result {
            Ok(summary) => summary,
            Err(e) => {
                self.push(Report::error(e.to_string()));
                return;
            }
        };
        for warning in &summary.warnings {
            self.push(Report::warning(warning.clone()));
        }
        if !summary.skipped.is_empty() {
            self.push(Report::warning(format!(
                "View layers not in scene: {}",
                summary.skipped.join(", ")
            )));
        }
        self.push(Report::info(format!(
            "{} view layers imported",
            summary.applied.len()
        )));
    }

    pub fn last_report(&self) -> Option<&Report> {
        self.reports.last()
    }
}
