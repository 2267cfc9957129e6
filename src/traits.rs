use std::path::Path;

use crate::error::VisitError;

/// The action a walk applies to every discovered regular file.
///
/// Implement this to make the walker do anything per file: print paths, hash
/// contents, accumulate sizes, or feed another pipeline stage. The walker
/// owns discovery and error propagation; what happens to each path belongs
/// to the visitor.
///
/// # Object Safety
///
/// `Visitor` is object-safe. The builder stores visitors as
/// `Box<dyn Visitor + '_>`, so a visitor may borrow from its caller (a
/// closure pushing into a local `Vec`, say) as well as own its state.
///
/// # Error Handling
///
/// Return `Err` to report failure for one path. Under the walk's propagation
/// policy the failure is logged with the offending path and the enclosing
/// directory scope continues with the next sibling; it never aborts the
/// walk. The one exception is the walk whose root itself is the visited
/// path (a regular-file root, or a non-recursive walk): there the visitor's
/// result is the walk's result.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use treewalk::{VisitError, Visitor};
///
/// struct SizeTally {
///     bytes: u64,
/// }
///
/// impl Visitor for SizeTally {
///     fn visit(&mut self, path: &Path) -> Result<(), VisitError> {
///         self.bytes += std::fs::metadata(path)?.len();
///         Ok(())
///     }
/// }
/// ```
pub trait Visitor {
    /// Apply the action to one path.
    fn visit(&mut self, path: &Path) -> Result<(), VisitError>;
}

/// Fallible closures are visitors.
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use std::path::Path;
/// use treewalk::VisitError;
///
/// let dir = tempfile::tempdir()?;
/// std::fs::write(dir.path().join("data.bin"), [0u8; 16])?;
///
/// let mut total = 0u64;
/// treewalk::walk(dir.path())
///     .with_visitor(|path: &Path| -> Result<(), VisitError> {
///         total += std::fs::metadata(path)?.len();
///         Ok(())
///     })
///     .run()?;
///
/// assert_eq!(total, 16);
/// # Ok(())
/// # }
/// ```
impl<F> Visitor for F
where
    F: FnMut(&Path) -> Result<(), VisitError>,
{
    fn visit(&mut self, path: &Path) -> Result<(), VisitError> {
        self(path)
    }
}
