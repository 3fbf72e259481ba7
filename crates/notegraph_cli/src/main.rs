//! CLI probe over a JSON note cache snapshot.
//!
//! # Responsibility
//! - Load a snapshot and run one read operation against it.
//! - Print results as plain lines for quick local checks.
//! - `notegraph --version` prints the linked core version.
//!
//! Usage:
//! `notegraph <snapshot.json> <path|title|available|archived|ancestor|similar> <note_id> [ancestor_id] [--hoist <note_id>] [--unlocked]`

use notegraph_core::{
    core_version, default_log_level, init_logging, load_snapshot, ArchiveClassifier,
    HoistContext, PathResolver, SimilarityEngine, StaticSession,
};
use std::process::ExitCode;

const USAGE: &str = "usage: notegraph <snapshot.json> <path|title|available|archived|ancestor|similar> <note_id> [ancestor_id] [--hoist <note_id>] [--unlocked]";

struct CliArgs {
    snapshot: String,
    command: String,
    note_id: String,
    ancestor_id: Option<String>,
    hoist: HoistContext,
    session: StaticSession,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliArgs, String> {
    let mut positional = Vec::new();
    let mut hoist = HoistContext::root();
    let mut session = StaticSession::LOCKED;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--hoist" => {
                let value = args.next().ok_or("--hoist requires a note id")?;
                hoist.set_hoisted_note_id(value);
            }
            "--unlocked" => session = StaticSession::UNLOCKED,
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let (Some(snapshot), Some(command), Some(note_id)) =
        (positional.next(), positional.next(), positional.next())
    else {
        return Err(USAGE.to_string());
    };

    Ok(CliArgs {
        snapshot,
        command,
        note_id,
        ancestor_id: positional.next(),
        hoist,
        session,
    })
}

fn version_line() -> String {
    format!("notegraph_core version={}", core_version())
}

async fn run(args: CliArgs) -> Result<(), String> {
    let cache = load_snapshot(&args.snapshot).map_err(|err| err.to_string())?;

    match args.command.as_str() {
        "path" => {
            let resolver = PathResolver::new(&cache, &args.hoist, &args.session);
            match resolver.note_path(&args.note_id) {
                Some(record) => {
                    println!("path={}", record.path);
                    println!("title={}", record.title);
                    println!("branch_id={}", record.branch_id.unwrap_or_default());
                }
                None => println!("path=<none>"),
            }
        }
        "title" => {
            let resolver = PathResolver::new(&cache, &args.hoist, &args.session);
            let title = match resolver.some_path(&args.note_id) {
                Some(path) => resolver.note_title_for_path(&path),
                None => resolver.note_title(&args.note_id, None),
            };
            println!("title={title}");
        }
        "available" => {
            let resolver = PathResolver::new(&cache, &args.hoist, &args.session);
            println!("available={}", resolver.is_available(&args.note_id));
        }
        "archived" => {
            let classifier = ArchiveClassifier::new(&cache, &args.hoist);
            println!("archived={}", classifier.is_archived(&args.note_id));
        }
        "ancestor" => {
            let ancestor_id = args.ancestor_id.as_deref().ok_or(USAGE)?;
            let classifier = ArchiveClassifier::new(&cache, &args.hoist);
            println!(
                "in_ancestor={}",
                classifier.is_in_ancestor(&args.note_id, ancestor_id)
            );
        }
        "similar" => {
            let engine = SimilarityEngine::new(cache.into_shared());
            for result in engine.find_similar_notes(&args.note_id, &args.hoist).await {
                println!("{:.4}\t{}", result.coeff, result.note_path.join("/"));
            }
        }
        other => return Err(format!("unknown command `{other}`\n{USAGE}")),
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let level = std::env::var("NOTEGRAPH_LOG_LEVEL")
        .unwrap_or_else(|_| default_log_level().to_string());
    let log_dir = std::env::var("NOTEGRAPH_LOG_DIR").ok();
    if let Err(err) = init_logging(&level, log_dir.as_deref()) {
        eprintln!("logging disabled: {err}");
    }

    if std::env::args().nth(1).as_deref() == Some("--version") {
        println!("{}", version_line());
        return ExitCode::SUCCESS;
    }

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_run module=cli status=error");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
