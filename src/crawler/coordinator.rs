//! Crawler coordinator - main harvest orchestration logic
//!
//! This module sequences the pipeline for every requested department:
//! - Resolving department codes against the directory page
//! - Listing faculty and fetching their thesis tabs
//! - Rendering and saving one document per department
//! - Collecting per-department outcomes into a [`RunReport`]

use crate::config::Config;
use crate::crawler::departments::list_departments;
use crate::crawler::faculty::list_faculty;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::theses::fetch_theses;
use crate::model::{Department, FacultyMember, Theses};
use crate::output::{render_document, save_document};
use crate::HarvestError;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Which departments a run should process
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Departments named by code, processed in the given order
    Codes(Vec<String>),
    /// Every department of the directory, sorted by code
    All,
}

/// Outcome of a run
#[derive(Debug, Default)]
pub struct RunReport {
    /// Department code and path of every document written
    pub written: Vec<(String, PathBuf)>,

    /// Department code and error message of every department that failed
    pub failed: Vec<(String, String)>,

    /// Requested codes that matched no department
    pub unresolved: Vec<String>,

    /// `code — name` lines of every known department, sorted by code
    pub available: Vec<String>,
}

impl RunReport {
    /// Returns true if every requested department was written
    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && self.unresolved.is_empty()
    }

    /// Numeric process exit status: 0 when every requested department was
    /// written, 1 otherwise
    pub fn exit_status(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    /// Process exit status for this report
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

/// Main harvest coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    fetcher: Fetcher,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The harvester configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(HarvestError)` - Invalid configuration or HTTP client failure
    pub fn new(config: Config) -> Result<Self, HarvestError> {
        crate::config::validate(&config)?;
        let fetcher = Fetcher::new(&config.client)?;

        Ok(Self {
            config: Arc::new(config),
            fetcher,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Lists every department of the directory page, in page order
    pub async fn departments(&self) -> Result<Vec<Department>, HarvestError> {
        list_departments(&self.fetcher, &self.config.source.directory_url).await
    }

    /// Runs the harvest for the selected departments
    ///
    /// Unknown codes are recorded in the report and skipped. A department that
    /// fails on the network is recorded as failed and the run moves on; a fatal
    /// error (changed page structure) aborts the whole run.
    pub async fn run(&self, selection: &Selection) -> Result<RunReport, HarvestError> {
        tracing::info!("Collecting departments");
        let departments = self.departments().await?;

        let mut report = RunReport {
            available: format_department_list(&departments),
            ..RunReport::default()
        };

        let selected: Vec<&Department> = match selection {
            Selection::All => {
                let mut all: Vec<&Department> = departments.iter().collect();
                all.sort_by(|a, b| a.code.cmp(&b.code));
                all
            }
            Selection::Codes(codes) => {
                let (resolved, unresolved) = resolve_codes(&departments, codes);
                if !unresolved.is_empty() {
                    tracing::error!(
                        "Unknown department code(s): {}. Available departments:\n{}",
                        unresolved.join(", "),
                        report.available.join("\n")
                    );
                }
                report.unresolved = unresolved;
                resolved
            }
        };

        for department in selected {
            match self.process_department(department).await {
                Ok(path) => {
                    tracing::info!("Saved {} to {}", department.code, path.display());
                    report.written.push((department.code.clone(), path));
                }
                Err(e) if e.is_fatal() => {
                    tracing::error!("Aborting run while processing {}: {}", department.code, e);
                    return Err(e);
                }
                Err(e) => {
                    tracing::error!("Failed to process {}: {}", department.code, e);
                    report.failed.push((department.code.clone(), e.to_string()));
                }
            }
        }

        Ok(report)
    }

    /// Harvests, renders and saves one department, returning the written path
    pub async fn process_department(&self, department: &Department) -> Result<PathBuf, HarvestError> {
        tracing::info!("Collecting theses for {}", department.name);
        let members = self.harvest_department(department).await?;

        tracing::info!("Rendering {} document", self.config.output.format);
        let document = render_document(
            self.config.output.format,
            department,
            &members,
            chrono::Local::now().date_naive(),
        );

        save_document(
            &self.config.output.directory,
            &department.code,
            self.config.output.format,
            &document,
        )
    }

    /// Lists the faculty of a department and fetches every member's theses
    pub async fn harvest_department(
        &self,
        department: &Department,
    ) -> Result<Vec<FacultyMember>, HarvestError> {
        let mut members = list_faculty(
            &self.fetcher,
            &self.config.source.faculty_listing_url,
            &department.code,
        )
        .await?;

        if self.config.client.concurrency > 1 {
            self.attach_theses_concurrently(&mut members).await?;
        } else {
            for member in members.iter_mut() {
                let result = fetch_theses(
                    &self.fetcher,
                    &member.profile_url,
                    &self.config.source.thesis_tab_suffix,
                )
                .await;
                member.theses = settle_theses(member, result)?;
            }
        }

        let total: usize = members.iter().map(|m| m.theses.item_count()).sum();
        tracing::debug!(
            "Collected {} thesis entries from {} faculty members of {}",
            total,
            members.len(),
            department.code
        );

        Ok(members)
    }

    /// Fetches thesis tabs with bounded parallelism
    ///
    /// Every task returns its own result tagged with the member index; results
    /// are merged in index order once all tasks finish.
    async fn attach_theses_concurrently(
        &self,
        members: &mut [FacultyMember],
    ) -> Result<(), HarvestError> {
        let semaphore = Arc::new(Semaphore::new(self.config.client.concurrency));
        let mut tasks = JoinSet::new();

        for (index, member) in members.iter().enumerate() {
            let fetcher = self.fetcher.clone();
            let semaphore = Arc::clone(&semaphore);
            let profile_url = member.profile_url.clone();
            let suffix = self.config.source.thesis_tab_suffix.clone();

            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                (index, fetch_theses(&fetcher, &profile_url, &suffix).await)
            });
        }

        let mut results = Vec::with_capacity(members.len());
        while let Some(joined) = tasks.join_next().await {
            results.push(joined?);
        }
        results.sort_by_key(|(index, _)| *index);

        for (index, result) in results {
            let member = &mut members[index];
            member.theses = settle_theses(member, result)?;
        }

        Ok(())
    }
}

/// Keeps fatal errors, downgrades network failures to empty theses
fn settle_theses(
    member: &FacultyMember,
    result: Result<Theses, HarvestError>,
) -> Result<Theses, HarvestError> {
    match result {
        Ok(theses) => Ok(theses),
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            tracing::warn!("No theses for {}: {}", member.name, e);
            Ok(Theses::default())
        }
    }
}

/// Resolves requested codes against the known departments
///
/// Matching is exact and case-sensitive. Returns the matched departments in
/// request order and the codes that matched nothing.
pub fn resolve_codes<'a>(
    departments: &'a [Department],
    codes: &[String],
) -> (Vec<&'a Department>, Vec<String>) {
    let mut resolved = Vec::new();
    let mut unresolved = Vec::new();

    for code in codes {
        match departments.iter().find(|d| &d.code == code) {
            Some(department) => resolved.push(department),
            None => unresolved.push(code.clone()),
        }
    }

    (resolved, unresolved)
}

/// Formats departments as `code — name` lines, sorted by code
pub fn format_department_list(departments: &[Department]) -> Vec<String> {
    let mut sorted: Vec<&Department> = departments.iter().collect();
    sorted.sort_by(|a, b| a.code.cmp(&b.code));
    sorted
        .into_iter()
        .map(|d| format!("{} — {}", d.code, d.name))
        .collect()
}
