use std::path::PathBuf;
use std::time::Duration;

use crate::error::WalkError;

/// The outcome of a completed walk.
///
/// A `Report` is returned whenever the root scope ran to completion, even if
/// individual visits failed along the way: those are logged, counted here,
/// and walked past. `paths` and `errors` are both opt-in to avoid allocation
/// overhead in the common case. Enable them on the builder:
/// `.collect_paths(true)` and `.collect_errors(true)`.
#[derive(Debug, Default)]
pub struct Report {
    /// Files the visitor accepted (returned success for).
    pub visited: usize,

    /// Visits that reported failure and were walked past.
    pub visit_failures: usize,

    /// Directories abandoned after an open, read or stat failure inside
    /// them. The root scope is never counted here; its failures end the
    /// walk instead.
    pub subtree_failures: usize,

    /// Paths of successfully visited files, in visit order.
    /// Only populated if `.collect_paths(true)` was set on the builder.
    pub paths: Vec<PathBuf>,

    /// The errors that were logged and absorbed during the walk: visitor
    /// failures and the fatal error of each abandoned subtree.
    /// Only populated if `.collect_errors(true)` was set on the builder.
    pub errors: Vec<WalkError>,

    /// Scan counters.
    pub stats: WalkStats,
}

impl Report {
    /// True when every discovered file was visited successfully and no
    /// subtree had to be abandoned.
    pub fn is_clean(&self) -> bool {
        self.visit_failures == 0 && self.subtree_failures == 0
    }
}

/// Counters for a completed scan.
///
/// A non-recursive walk hands the root to the visitor without classifying
/// it; the root is then counted under `files` whatever its kind.
#[derive(Debug, Default)]
pub struct WalkStats {
    /// Regular files dispatched to the visitor, successes and failures both.
    pub files: usize,

    /// Directory scopes that were opened, the root included.
    pub dirs: usize,

    /// Entries of any other kind (symlinks, sockets, devices) passed over
    /// without a visit and without recursion.
    pub skipped: usize,

    /// Wall-clock time from the first dispatch to completion.
    pub duration: Duration,
}
