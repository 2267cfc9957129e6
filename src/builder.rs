use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::engine::{run, EngineOptions};
use crate::error::{VisitError, WalkError};
use crate::results::Report;
use crate::traits::Visitor;

// ---------------------------------------------------------------------------
// WalkBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and executing a walk.
///
/// Created via [`treewalk::walk()`](crate::walk). Configure with chained
/// builder methods, then call [`run()`](WalkBuilder::run) to execute.
///
/// The lifetime parameter belongs to the visitor: a visitor may borrow from
/// the caller (a closure pushing into a local collection, say), in which
/// case the builder simply cannot outlive the borrow.
///
/// # Example
///
/// ```rust,ignore
/// let report = treewalk::walk("/var/log")
///     .for_each(|path| println!("{}", path.display()))
///     .collect_errors(true)
///     .run()?;
/// ```
pub struct WalkBuilder<'v> {
    root:           PathBuf,
    recursive:      bool,
    collect_paths:  bool,
    collect_errors: bool,
    visitor:        Option<Box<dyn Visitor + 'v>>,
}

impl WalkBuilder<'static> {
    /// Start building a walk rooted at `root`.
    ///
    /// No validation happens here; a root that cannot be opened or statted
    /// surfaces as an error from [`run()`](WalkBuilder::run).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root:           root.into(),
            recursive:      true,
            collect_paths:  false,
            collect_errors: false,
            visitor:        None,
        }
    }
}

impl<'v> WalkBuilder<'v> {
    // ── Visitor ───────────────────────────────────────────────────────────

    /// Set the visitor invoked once per discovered regular file.
    ///
    /// Any type implementing [`Visitor`] is accepted, including fallible
    /// closures. For the common case of an infallible action, prefer
    /// `.for_each()`.
    pub fn with_visitor<'w>(self, v: impl Visitor + 'w) -> WalkBuilder<'w> {
        WalkBuilder {
            root:           self.root,
            recursive:      self.recursive,
            collect_paths:  self.collect_paths,
            collect_errors: self.collect_errors,
            visitor:        Some(Box::new(v)),
        }
    }

    /// Shorthand for an infallible per-file action.
    ///
    /// Equivalent to `.with_visitor()` with a closure that always succeeds.
    pub fn for_each<'w, F>(self, action: F) -> WalkBuilder<'w>
    where
        F: FnMut(&Path) + 'w,
    {
        self.with_visitor(ForEach(action))
    }

    /// Install the reference visitor: print each visited path to stdout,
    /// one per line. A failed write is a visit failure.
    pub fn print_paths(self) -> WalkBuilder<'v> {
        self.with_visitor(PrintVisitor { out: io::stdout() })
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Expand directory contents (the default). With `false` the walk
    /// degenerates to a single visit of the root path, whatever its kind.
    pub fn recursive(mut self, yes: bool) -> Self {
        self.recursive = yes;
        self
    }

    /// Collect successfully visited paths into [`Report::paths`].
    ///
    /// Disabled by default to avoid allocation overhead when paths aren't
    /// needed.
    pub fn collect_paths(mut self, yes: bool) -> Self {
        self.collect_paths = yes;
        self
    }

    /// Collect absorbed (logged-and-continued) errors into [`Report::errors`].
    ///
    /// Disabled by default. When enabled, visitor failures and abandoned
    /// subtrees are kept with their offending paths rather than only logged.
    pub fn collect_errors(mut self, yes: bool) -> Self {
        self.collect_errors = yes;
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Execute the walk and return its report.
    ///
    /// Blocks until the walk completes; there is no cancellation. Without a
    /// configured visitor the walk still enumerates and counts (the default
    /// visitor accepts every path without acting on it).
    ///
    /// # Errors
    ///
    /// Returns the first fatal error of the root scope: an open, read or
    /// stat failure there, or the visitor's failure when the root itself was
    /// the visited path. Failures below the root are absorbed per the
    /// propagation policy and reported through [`Report`] instead.
    pub fn run(self) -> Result<Report, WalkError> {
        let visitor = self.visitor.unwrap_or_else(|| Box::new(NoopVisitor));

        run(
            &self.root,
            EngineOptions {
                recursive:      self.recursive,
                collect_paths:  self.collect_paths,
                collect_errors: self.collect_errors,
                visitor,
            },
        )
    }
}

// ---------------------------------------------------------------------------
// Built-in visitors (treewalk ships these as conveniences)
// ---------------------------------------------------------------------------

/// Adapts an infallible closure. Installed by `.for_each()`.
struct ForEach<F>(F);

impl<F: FnMut(&Path)> Visitor for ForEach<F> {
    fn visit(&mut self, path: &Path) -> Result<(), VisitError> {
        (self.0)(path);
        Ok(())
    }
}

/// The reference visitor: one path per line. Installed by `.print_paths()`.
struct PrintVisitor {
    out: io::Stdout,
}

impl Visitor for PrintVisitor {
    fn visit(&mut self, path: &Path) -> Result<(), VisitError> {
        writeln!(self.out, "{}", path.display())?;
        Ok(())
    }
}

/// Accepts every path without acting on it. Used when no visitor is
/// configured.
struct NoopVisitor;

impl Visitor for NoopVisitor {
    fn visit(&mut self, _path: &Path) -> Result<(), VisitError> {
        Ok(())
    }
}
