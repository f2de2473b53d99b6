//! Command-line interface for pymin.
//!
//! Minimizes a single Python file or, with --recursive, a whole directory tree.
//! By default blank lines, comments, docstrings, and extraneous whitespace are
//! removed; the keep switches flip each removal off independently. In recursive
//! mode a failure on one file is reported and the walk continues.

use clap::{Arg, ArgAction, Command};
use pymin::{minimize_with_sink, Event, EventSink, Options};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    let matches = Command::new("pymin")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Minimizes Python code using lexical token streams")
        .arg(
            Arg::new("in_path")
                .help("The file to minimize (or directory with --recursive)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("out-path")
                .long("out-path")
                .short('o')
                .help("Write output to this path instead of stdout"),
        )
        .arg(
            Arg::new("keep-blank-lines")
                .long("keep-blank-lines")
                .short('b')
                .action(ArgAction::SetTrue)
                .help("Do not remove blank lines (runs still collapse to one)"),
        )
        .arg(
            Arg::new("keep-comments")
                .long("keep-comments")
                .short('c')
                .action(ArgAction::SetTrue)
                .help("Do not remove comment lines and inline comments"),
        )
        .arg(
            Arg::new("keep-docstrings")
                .long("keep-docstrings")
                .short('d')
                .action(ArgAction::SetTrue)
                .help("Do not remove docstrings"),
        )
        .arg(
            Arg::new("keep-whitespace")
                .long("keep-whitespace")
                .short('s')
                .action(ArgAction::SetTrue)
                .help("Do not remove extraneous whitespace"),
        )
        .arg(
            Arg::new("whitespace-char")
                .long("whitespace-char")
                .short('w')
                .default_value(" ")
                .help("Separator character to use where a space is required"),
        )
        .arg(
            Arg::new("indent-char")
                .long("indent-char")
                .short('i')
                .default_value("\t")
                .help("Indentation text to emit per nesting level"),
        )
        .arg(
            Arg::new("recursive")
                .long("recursive")
                .short('r')
                .action(ArgAction::SetTrue)
                .help("Treat the in path and --out-path as directories to minimize recursively"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count)
                .help("Report what is being removed on stderr"),
        )
        .arg(
            Arg::new("dump-tokens")
                .long("dump-tokens")
                .action(ArgAction::SetTrue)
                .help("Print the annotated token stream as JSON instead of minimizing"),
        )
        .get_matches();

    let options = Options {
        keep_blank_lines: matches.get_flag("keep-blank-lines"),
        keep_comments: matches.get_flag("keep-comments"),
        keep_docstrings: matches.get_flag("keep-docstrings"),
        keep_whitespace: matches.get_flag("keep-whitespace"),
        whitespace_char: matches
            .get_one::<String>("whitespace-char")
            .expect("has default")
            .clone(),
        indent_char: matches
            .get_one::<String>("indent-char")
            .expect("has default")
            .clone(),
    };
    let in_path = PathBuf::from(matches.get_one::<String>("in_path").expect("required"));
    let out_path = matches.get_one::<String>("out-path").map(PathBuf::from);
    let verbose = matches.get_count("verbose");

    if matches.get_flag("dump-tokens") {
        process::exit(dump_tokens(&in_path));
    }
    let code = if matches.get_flag("recursive") {
        run_recursive(&in_path, out_path.as_deref(), &options, verbose)
    } else {
        run_single(&in_path, out_path.as_deref(), &options, verbose)
    };
    process::exit(code);
}

/// Sink that reports removal statistics on stderr, used at verbosity >= 1.
struct StderrSink;

impl EventSink for StderrSink {
    fn emit(&self, event: Event) {
        match event {
            Event::BlankLinesRemoved(n) => eprintln!("INFO: removed {} blank lines", n),
            Event::CommentsRemoved { lines, inline } => eprintln!(
                "INFO: removed {} comment lines and {} inline comments",
                lines, inline
            ),
            Event::DocstringsRemoved(n) => eprintln!("INFO: removed {} docstrings", n),
        }
    }
}

fn minimize_file(path: &Path, options: &Options, verbose: u8) -> Result<String, String> {
    let source =
        fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    let sink = StderrSink;
    let sink_ref: Option<&dyn EventSink> = if verbose > 0 { Some(&sink) } else { None };
    minimize_with_sink(&source, options, sink_ref)
        .map_err(|e| format!("{}: {}", path.display(), e))
}

fn run_single(in_path: &Path, out_path: Option<&Path>, options: &Options, verbose: u8) -> i32 {
    if !in_path.exists() {
        eprintln!("ERROR: Given in path does not exist");
        return 1;
    }
    if !in_path.is_file() {
        eprintln!("ERROR: Given in path is not a file");
        return 1;
    }
    let minimized = match minimize_file(in_path, options, verbose) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return 1;
        }
    };
    match out_path {
        Some(out) => {
            if out.exists() && !out.is_file() {
                eprintln!("ERROR: Given out path is not a file");
                return 1;
            }
            if let Err(e) = fs::write(out, minimized) {
                eprintln!("ERROR: cannot write {}: {}", out.display(), e);
                return 1;
            }
            0
        }
        None => {
            print!("{}", minimized);
            0
        }
    }
}

/// Walk the input tree and minimize every Python file. A per-file failure is
/// reported and the walk continues with the remaining files.
fn run_recursive(in_root: &Path, out_root: Option<&Path>, options: &Options, verbose: u8) -> i32 {
    if !in_root.exists() {
        eprintln!("ERROR: Given in path does not exist");
        return 1;
    }
    if !in_root.is_dir() {
        eprintln!("ERROR: Given in path is not a directory");
        return 1;
    }
    if let Some(out) = out_root {
        if out.exists() && !out.is_dir() {
            eprintln!("ERROR: Given out path is not a directory");
            return 1;
        }
    }
    let mut files = Vec::new();
    if let Err(e) = collect_files(in_root, &mut files) {
        eprintln!("ERROR: cannot walk {}: {}", in_root.display(), e);
        return 1;
    }
    for path in files {
        let relative = path.strip_prefix(in_root).expect("walked under in_root");
        match out_root {
            Some(out) => {
                let destination = out.join(relative);
                if let Some(parent) = destination.parent() {
                    if let Err(e) = fs::create_dir_all(parent) {
                        eprintln!("ERROR: cannot create {}: {}", parent.display(), e);
                        continue;
                    }
                }
                if is_python_file(&path) {
                    match minimize_file(&path, options, verbose) {
                        Ok(text) => {
                            if let Err(e) = fs::write(&destination, text) {
                                eprintln!(
                                    "ERROR: cannot write {}: {}",
                                    destination.display(),
                                    e
                                );
                            }
                        }
                        Err(e) => eprintln!("ERROR: {}", e),
                    }
                } else if let Err(e) = fs::copy(&path, &destination) {
                    eprintln!("ERROR: cannot copy {}: {}", path.display(), e);
                }
            }
            None => {
                if is_python_file(&path) {
                    match minimize_file(&path, options, verbose) {
                        Ok(text) => println!("{}:\n{}", path.display(), text),
                        Err(e) => eprintln!("ERROR: {}", e),
                    }
                }
            }
        }
    }
    0
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}

fn is_python_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case("py"))
}

/// Debug surface: print the annotated token stream as JSON.
fn dump_tokens(in_path: &Path) -> i32 {
    let source = match fs::read_to_string(in_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("ERROR: cannot read {}: {}", in_path.display(), e);
            return 1;
        }
    };
    let source = pymin::lexing::ensure_source_ends_with_newline(&source);
    match pymin::lexing::lex(&source) {
        Ok(tokens) => match serde_json::to_string_pretty(&tokens) {
            Ok(json) => {
                println!("{}", json);
                0
            }
            Err(e) => {
                eprintln!("ERROR: cannot serialize tokens: {}", e);
                1
            }
        },
        Err(e) => {
            eprintln!("ERROR: {}: {}", in_path.display(), e);
            1
        }
    }
}
