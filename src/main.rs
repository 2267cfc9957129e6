//! CLI entry point for treewalk: walk a path, print every regular file.

use std::path::PathBuf;
use std::process;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "treewalk")]
#[command(about = "Recursively walk a directory tree, printing every regular file")]
#[command(version)]
struct Args {
    /// Root path to walk
    path: Vec<PathBuf>,

    /// Trace every directory scope as it is expanded
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    // Exactly one path; zero and surplus both get the same complaint.
    let [path] = args.path.as_slice() else {
        eprintln!("You must supply a path");
        process::exit(1);
    };

    match treewalk::walk(path).print_paths().run() {
        Ok(report) => {
            if !report.is_clean() {
                eprintln!(
                    "finished with {} failed visit(s), {} abandoned subtree(s)",
                    report.visit_failures, report.subtree_failures
                );
                process::exit(1);
            }
        }
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

/// WARN by default so absorbed failures stay visible; `--verbose` raises the
/// walker to DEBUG. A `RUST_LOG` directive takes precedence over both.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}
