//! # treewalk
//!
//! Depth-first filesystem walker driven by caller-supplied visitors.
//!
//! treewalk owns the traversal: root classification, recursive descent, the
//! error taxonomy, and the propagation policy. It does **not** own what
//! happens at each file. That belongs to the [`Visitor`] you install, which
//! is handed every regular file the walk discovers.
//!
//! # Quick Start
//!
//! ```rust
//! use std::fs;
//!
//! let dir = tempfile::tempdir().unwrap();
//! fs::write(dir.path().join("a.txt"), "alpha").unwrap();
//! fs::create_dir(dir.path().join("sub")).unwrap();
//! fs::write(dir.path().join("sub").join("b.txt"), "beta").unwrap();
//!
//! let mut seen = Vec::new();
//! let report = treewalk::walk(dir.path())
//!     .for_each(|path| seen.push(path.to_path_buf()))
//!     .run()
//!     .unwrap();
//!
//! assert_eq!(report.visited, 2);
//! assert_eq!(report.stats.dirs, 2); // the root and `sub`
//! assert!(seen.iter().any(|p| p.ends_with("b.txt")));
//! ```
//!
//! # Custom Visitors
//!
//! Implement [`Visitor`] to do anything per file; fallible closures work
//! too (see [`Visitor`] for the closure form):
//!
//! ```rust
//! use std::path::Path;
//! use treewalk::{VisitError, Visitor};
//!
//! struct ExtensionCount {
//!     ext:   &'static str,
//!     count: usize,
//! }
//!
//! impl Visitor for ExtensionCount {
//!     fn visit(&mut self, path: &Path) -> Result<(), VisitError> {
//!         if path.extension().map(|e| e == self.ext).unwrap_or(false) {
//!             self.count += 1;
//!         }
//!         Ok(())
//!     }
//! }
//! ```
//!
//! # Failure Handling
//!
//! A directory scope is fatal territory for its own bookkeeping: failing to
//! open, read or stat within a scope abandons that scope. But the failure
//! does not climb further. The parent scope logs it (through the [`log`]
//! facade, at `warn`), counts it, and continues with the next sibling. The
//! same goes for a visitor that rejects one file. Only failures of the root
//! scope itself reach the caller as `Err`; everything absorbed along the way
//! is visible in the returned [`Report`], with the full error values kept
//! when `.collect_errors(true)` is set:
//!
//! ```rust
//! use std::path::Path;
//! use treewalk::VisitError;
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("good.txt"), "ok").unwrap();
//! std::fs::write(dir.path().join("bad.txt"), "no").unwrap();
//!
//! let report = treewalk::walk(dir.path())
//!     .with_visitor(|path: &Path| -> Result<(), VisitError> {
//!         if path.ends_with("bad.txt") {
//!             return Err("refused".into());
//!         }
//!         Ok(())
//!     })
//!     .collect_errors(true)
//!     .run()
//!     .unwrap();
//!
//! assert_eq!(report.visited, 1);
//! assert_eq!(report.visit_failures, 1);
//! assert!(report.errors[0].is_recoverable());
//! assert!(!report.is_clean());
//! ```

#![forbid(unsafe_code)]

use std::path::PathBuf;

mod builder;
mod engine;
mod entry;
mod error;
mod results;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::WalkBuilder;
pub use error::{VisitError, WalkError};
pub use results::{Report, WalkStats};
pub use traits::Visitor;

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`WalkBuilder`] to configure and run a walk rooted at `root`.
///
/// # Example
///
/// ```rust
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::write(dir.path().join("only.txt"), "x").unwrap();
///
/// let report = treewalk::walk(dir.path())
///     .collect_paths(true)
///     .run()
///     .unwrap();
///
/// assert_eq!(report.visited, 1);
/// assert_eq!(report.paths.len(), 1);
/// ```
pub fn walk(root: impl Into<PathBuf>) -> WalkBuilder<'static> {
    WalkBuilder::new(root)
}
