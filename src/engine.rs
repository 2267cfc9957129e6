use std::error::Error;
use std::fs;
use std::path::Path;
use std::time::Instant;

use log::{debug, warn};

use crate::entry::{Entry, EntryKind};
use crate::error::WalkError;
use crate::results::Report;
use crate::traits::Visitor;

// ---------------------------------------------------------------------------
// Engine options
// ---------------------------------------------------------------------------

/// Internal options passed from the builder to `run()`.
pub(crate) struct EngineOptions<'v> {
    pub recursive:      bool,
    pub collect_paths:  bool,
    pub collect_errors: bool,
    pub visitor:        Box<dyn Visitor + 'v>,
}

// ---------------------------------------------------------------------------
// run()
// ---------------------------------------------------------------------------

/// Execute a walk over `root` using the given options.
///
/// This is the traversal core. Called by `WalkBuilder::run()` after the
/// visitor has been defaulted.
pub(crate) fn run(root: &Path, opts: EngineOptions<'_>) -> Result<Report, WalkError> {
    let start = Instant::now();

    let mut walk = Walk {
        visitor:        opts.visitor,
        collect_paths:  opts.collect_paths,
        collect_errors: opts.collect_errors,
        report:         Report::default(),
    };

    if opts.recursive {
        walk.dispatch_root(root)?;
    } else {
        // Degenerate mode: the root goes straight to the visitor, kind unseen.
        walk.visit_file(root)?;
    }

    let mut report = walk.report;
    report.stats.duration = start.elapsed();
    Ok(report)
}

// ---------------------------------------------------------------------------
// Walk state
// ---------------------------------------------------------------------------

/// One walk in progress: the visitor plus the accumulating report.
///
/// No state lives outside this struct and the call stack. Each level of
/// `expand_directory` is one stack frame owning its directory handle, and
/// every joined path is dropped before the next sibling is scanned.
struct Walk<'v> {
    visitor:        Box<dyn Visitor + 'v>,
    collect_paths:  bool,
    collect_errors: bool,
    report:         Report,
}

impl Walk<'_> {
    /// Classify the root once and dispatch on its kind.
    ///
    /// `fs::metadata` follows a symlinked root, exactly as opening it as a
    /// directory would; entries below the root are classified without
    /// following. Failure to classify the root is the walk's open failure.
    fn dispatch_root(&mut self, root: &Path) -> Result<(), WalkError> {
        let metadata = fs::metadata(root).map_err(|source| WalkError::open(root, source))?;

        match EntryKind::from_file_type(metadata.file_type()) {
            EntryKind::File => self.visit_file(root),
            EntryKind::Dir => self.expand_directory(root),
            // A fifo, socket or device root: nothing to visit, nothing to
            // expand. (`Symlink` cannot reach here; metadata was followed.)
            EntryKind::Symlink | EntryKind::Other => {
                self.report.stats.skipped += 1;
                Ok(())
            }
        }
    }

    /// Invoke the visitor on one path.
    ///
    /// The caller decides what a failure means: the top level returns it,
    /// a directory scope absorbs it and moves on.
    fn visit_file(&mut self, path: &Path) -> Result<(), WalkError> {
        self.report.stats.files += 1;

        match self.visitor.visit(path) {
            Ok(()) => {
                self.report.visited += 1;
                if self.collect_paths {
                    self.report.paths.push(path.to_path_buf());
                }
                Ok(())
            }
            Err(source) => Err(WalkError::visit(path.to_path_buf(), source)),
        }
    }

    /// Scan one directory scope.
    ///
    /// Open, read and stat failures abort the scope immediately; nothing
    /// after the failing entry is processed at this level. Failures of a
    /// child visit or of a child scope are absorbed here and scanning
    /// continues with the next sibling.
    fn expand_directory(&mut self, dir: &Path) -> Result<(), WalkError> {
        let entries = fs::read_dir(dir).map_err(|source| WalkError::open(dir, source))?;
        self.report.stats.dirs += 1;
        debug!("expanding {}", dir.display());

        // `read_dir` never yields the `.`/`..` pseudo-entries, on any
        // platform, so the unconditional skip needs no code here.
        for entry in entries {
            let entry = entry.map_err(|source| WalkError::read_entry(dir, source))?;

            // The joined path is owned by this iteration and dropped with it.
            let entry = Entry::classify(dir.join(entry.file_name()))?;

            match entry.kind {
                EntryKind::File => {
                    if let Err(err) = self.visit_file(&entry.path) {
                        self.report.visit_failures += 1;
                        self.absorb(err);
                    }
                }
                EntryKind::Dir => {
                    if let Err(err) = self.expand_directory(&entry.path) {
                        self.report.subtree_failures += 1;
                        self.absorb(err);
                    }
                }
                EntryKind::Symlink | EntryKind::Other => {
                    self.report.stats.skipped += 1;
                }
            }
        }

        Ok(())
    }

    /// The log half of log-and-continue: report an absorbed failure with its
    /// offending path and cause, and keep it if the caller asked for the
    /// error list. Fatal errors of the root scope never come through here;
    /// they are returned to the caller instead, so nothing is reported twice.
    fn absorb(&mut self, err: WalkError) {
        match err.source() {
            Some(cause) => warn!("{err}: {cause}"),
            None => warn!("{err}"),
        }
        if self.collect_errors {
            self.report.errors.push(err);
        }
    }
}
