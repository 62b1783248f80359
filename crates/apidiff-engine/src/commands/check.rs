//! Breaking-change check orchestration with boundary logging.
//!
//! ## Pipeline (per package):
//! 1. List head files; a missing directory means the package was removed
//! 2. Parse every head file into a fresh `Summary`
//! 3. List base files; a missing directory means the package is new
//! 4. Parse every base file and replay its declarations through a `Comparer`
//!
//! Any other error is fatal for the whole run. Packages may be checked on a
//! rayon pool; outcomes always come back in input order.
//!
//! ## Logging Ownership
//!
//! The engine layer owns lifecycle logging for `run_check` and
//! `check_package`:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Lower layers (source, core) use only `tracing::trace!()` for internal
//! details.

#![allow(clippy::result_large_err)]

use std::path::PathBuf;
use std::time::Instant;

use apidiff_core::diff::{Comparer, PackageOutcome};
use apidiff_core::errors::{ExError, ExErrorKind};
use apidiff_core::policy::SurfacePolicy;
use apidiff_core::summary::Summary;
use apidiff_core::{log_op_end, log_op_error, log_op_start};
use apidiff_core_types::{PackageContext, RunId};
use apidiff_source::snapshot::relative_to;
use apidiff_source::{list_changed_files, GitRevision, GoParser, Result, Snapshot, WorkingTree};
use rayon::prelude::*;
use serde::Serialize;

use super::packages::{affected_packages, DEFAULT_EXCLUDED_SEGMENTS};

/// Options for a check run.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Revision the working tree is compared against
    pub base_ref: String,
    /// Worker threads; 1 checks packages sequentially
    pub jobs: usize,
    /// Directory names that hide everything below them from the public API
    pub excluded_segments: Vec<String>,
    pub policy: SurfacePolicy,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            base_ref: "HEAD".to_string(),
            jobs: 1,
            excluded_segments: DEFAULT_EXCLUDED_SEGMENTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            policy: SurfacePolicy::default(),
        }
    }
}

/// Everything one run produced.
#[derive(Debug, Clone, Serialize)]
pub struct CheckRun {
    pub run_id: RunId,
    pub base_ref: String,
    /// One outcome per affected package, sorted by directory
    pub packages: Vec<PackageOutcome>,
}

impl CheckRun {
    pub fn finding_count(&self) -> usize {
        self.packages.iter().map(PackageOutcome::finding_count).sum()
    }

    /// Whether any package lost API relative to the base revision
    pub fn is_breaking(&self) -> bool {
        self.packages.iter().any(PackageOutcome::is_breaking)
    }
}

/// Compare the working tree under `repo_root` against `options.base_ref`.
///
/// ## Errors
///
/// - `Retrieval`: git failed or printed something unexpected
/// - `Parse` / `UnsupportedSyntax`: a Go file on either side could not be read
/// - `Io`: the working tree could not be read
/// - `InvalidInput`: `jobs` is zero
pub fn run_check(repo_root: impl Into<PathBuf>, options: &CheckOptions) -> Result<CheckRun> {
    let repo_root = repo_root.into();
    let run_id = RunId::new();
    let span = tracing::info_span!("check_run", run_id = %run_id);
    let _guard = span.enter();

    log_op_start!("run_check", base_ref = options.base_ref.as_str());
    let start = Instant::now();

    let result = run_check_impl(&repo_root, options, &run_id).map_err(|e| {
        log_op_error!(
            "run_check",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "run_check",
        duration_ms = start.elapsed().as_millis() as u64,
        package_count = result.len(),
        finding_count = result.iter().map(PackageOutcome::finding_count).sum::<usize>()
    );

    Ok(CheckRun {
        run_id,
        base_ref: options.base_ref.clone(),
        packages: result,
    })
}

fn run_check_impl(
    repo_root: &std::path::Path,
    options: &CheckOptions,
    run_id: &RunId,
) -> Result<Vec<PackageOutcome>> {
    if options.jobs == 0 {
        return Err(ExError::new(ExErrorKind::InvalidInput)
            .with_op("run_check")
            .with_message("jobs must be at least 1"));
    }

    let changes = list_changed_files(repo_root, &options.base_ref)?;
    let dirs = affected_packages(&changes, &options.excluded_segments);
    tracing::debug!(
        change_count = changes.len(),
        package_count = dirs.len(),
        "affected packages"
    );

    let head = WorkingTree::new(repo_root);
    let base = GitRevision::new(repo_root, options.base_ref.as_str());
    check_packages(run_id, &dirs, &head, &base, &options.policy, options.jobs)
}

/// Check each directory, returning outcomes in the order of `dirs`.
///
/// With `jobs > 1` packages are checked on a dedicated rayon pool of that
/// size. The first fatal error aborts the run.
///
/// ## Errors
///
/// Any fatal error from `check_package`, or `Internal` if the pool cannot be
/// built.
pub fn check_packages(
    run_id: &RunId,
    dirs: &[String],
    head: &dyn Snapshot,
    base: &dyn Snapshot,
    policy: &SurfacePolicy,
    jobs: usize,
) -> Result<Vec<PackageOutcome>> {
    let check_one = |(ordinal, dir): (usize, &String)| {
        let ctx = PackageContext::new(run_id.clone(), dir.as_str(), ordinal);
        let span = tracing::debug_span!(
            "package",
            run_id = %ctx.run_id,
            package = %ctx.package,
            ordinal = ctx.ordinal
        );
        let _guard = span.enter();
        check_package(&ctx.package, head, base, policy)
    };

    if jobs <= 1 {
        return dirs.iter().enumerate().map(check_one).collect();
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .map_err(|e| {
            ExError::new(ExErrorKind::Internal)
                .with_op("check_packages")
                .with_message(e.to_string())
        })?;
    // Indexed collect keeps input order regardless of completion order
    pool.install(|| dirs.par_iter().enumerate().map(check_one).collect())
}

/// Check one package directory.
///
/// Positions in the returned report are relative to `dir`; the report's
/// base reference is `base.label()`.
///
/// ## Errors
///
/// Every error except a missing directory is returned, tagged with `dir`.
pub fn check_package(
    dir: &str,
    head: &dyn Snapshot,
    base: &dyn Snapshot,
    policy: &SurfacePolicy,
) -> Result<PackageOutcome> {
    log_op_start!("check_package", package = dir);
    let start = Instant::now();

    let outcome = check_package_impl(dir, head, base, policy).map_err(|e| {
        let e = e.with_package(dir);
        log_op_error!(
            "check_package",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            package = dir
        );
        e
    })?;

    log_op_end!(
        "check_package",
        duration_ms = start.elapsed().as_millis() as u64,
        package = dir,
        finding_count = outcome.finding_count()
    );

    Ok(outcome)
}

fn check_package_impl(
    dir: &str,
    head: &dyn Snapshot,
    base: &dyn Snapshot,
    policy: &SurfacePolicy,
) -> Result<PackageOutcome> {
    let head_files = match head.list_source_files(dir) {
        Ok(files) => files,
        Err(e) if e.kind() == ExErrorKind::NotFound => {
            return Ok(PackageOutcome::Removed {
                package: dir.to_string(),
            })
        }
        Err(e) => return Err(e),
    };

    let mut parser = GoParser::new()?;
    let mut summary = Summary::new(policy.clone());
    for path in &head_files {
        let source = head.read_file(path)?;
        for decl in parser.parse_file(relative_to(dir, path), &source)? {
            summary.record(decl);
        }
    }

    let base_files = match base.list_source_files(dir) {
        Ok(files) => files,
        Err(e) if e.kind() == ExErrorKind::NotFound => {
            return Ok(PackageOutcome::Added {
                package: dir.to_string(),
            })
        }
        Err(e) => return Err(e),
    };

    let mut comparer = Comparer::new(&summary, dir, base.label());
    for path in &base_files {
        let source = base.read_file(path)?;
        for decl in parser.parse_file(relative_to(dir, path), &source)? {
            comparer.visit(&decl);
        }
    }
    tracing::trace!(
        package = dir,
        head_files = head_files.len(),
        base_files = base_files.len(),
        "compared"
    );

    Ok(PackageOutcome::Checked(comparer.into_report()))
}
