use clap::{ArgAction, Parser, Subcommand};
use graft_agent::{
    ApplyOptions, OmissionDetector, OmissionVocabulary, apply_hunks, format_omission_warning,
    parse_unified_diff,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "graft-cli")]
#[command(about = "Apply AI-proposed unified diffs and check content for omitted code")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply a unified diff to a file and print (or write back) the result.
    Apply(ApplyArgs),
    /// Scan candidate content for signs of truncated or summarized code.
    /// Exits non-zero when findings are present.
    Check(CheckArgs),
}

#[derive(clap::Args, Debug)]
struct ApplyArgs {
    /// File the diff applies to.
    #[arg(long)]
    file: PathBuf,
    /// Path to a file containing the unified diff.
    #[arg(long, conflicts_with = "diff_text")]
    diff: Option<PathBuf>,
    /// Unified diff passed inline.
    #[arg(long)]
    diff_text: Option<String>,
    /// Rewrite the file in place instead of printing the result.
    #[arg(long, action = ArgAction::SetTrue)]
    write: bool,
    /// Disable the duplicate-line collapse heuristic during resync.
    #[arg(long = "keep-duplicates", action = ArgAction::SetTrue)]
    keep_duplicates: bool,
}

#[derive(clap::Args, Debug)]
struct CheckArgs {
    /// Original file content.
    #[arg(long)]
    original: PathBuf,
    /// Candidate content the AI proposed to write.
    #[arg(long)]
    candidate: PathBuf,
    /// Emit findings as JSON instead of text.
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Commands::Apply(args) => run_apply(args).await,
        Commands::Check(args) => run_check(args).await,
    }
}

async fn run_apply(args: ApplyArgs) -> ExitCode {
    let diff_text = match (args.diff.as_deref(), args.diff_text.as_deref()) {
        (Some(path), None) => match read_file(path).await {
            Ok(text) => text,
            Err(code) => return code,
        },
        (None, Some(text)) => text.to_string(),
        _ => {
            eprintln!("exactly one of --diff or --diff-text is required");
            return ExitCode::FAILURE;
        }
    };

    let original = match read_file(&args.file).await {
        Ok(text) => text,
        Err(code) => return code,
    };

    let hunks = match parse_unified_diff(&diff_text) {
        Ok(hunks) => hunks,
        Err(error) => {
            eprintln!("{}", error);
            return ExitCode::FAILURE;
        }
    };
    let options = ApplyOptions {
        collapse_resync_duplicates: !args.keep_duplicates,
    };
    let updated = match apply_hunks(&original, &hunks, &options) {
        Ok(updated) => updated,
        Err(error) => {
            eprintln!("{}", error);
            return ExitCode::FAILURE;
        }
    };

    if args.write {
        if let Err(error) = tokio::fs::write(&args.file, &updated).await {
            eprintln!("failed to write '{}': {}", args.file.display(), error);
            return ExitCode::FAILURE;
        }
        println!("patched {}", args.file.display());
    } else {
        print!("{}", updated);
    }
    ExitCode::SUCCESS
}

async fn run_check(args: CheckArgs) -> ExitCode {
    let original = match read_file(&args.original).await {
        Ok(text) => text,
        Err(code) => return code,
    };
    let candidate = match read_file(&args.candidate).await {
        Ok(text) => text,
        Err(code) => return code,
    };

    let detector = match OmissionDetector::new(OmissionVocabulary::default()) {
        Ok(detector) => detector,
        Err(error) => {
            eprintln!("{}", error);
            return ExitCode::FAILURE;
        }
    };
    let report = detector.detect(&original, &candidate);

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(rendered) => println!("{}", rendered),
            Err(error) => {
                eprintln!("failed to render report: {}", error);
                return ExitCode::FAILURE;
            }
        }
    } else if let Some(warning) = format_omission_warning(&report) {
        println!("{}", warning);
    } else {
        println!("no omission markers found");
    }

    if report.has_omission {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn read_file(path: &Path) -> Result<String, ExitCode> {
    tokio::fs::read_to_string(path).await.map_err(|error| {
        eprintln!("failed to read '{}': {}", path.display(), error);
        ExitCode::FAILURE
    })
}
