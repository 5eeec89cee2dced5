use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use foldorder::storage::StorageKind;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod estimate;
mod provenance;

use estimate::EstimateArgs;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Layer-order estimation runner for synthetic folded strips")]
struct Cmd {
    /// Optional run tag; propagated to outputs and logs
    #[arg(long, global = true)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Direction {
    Up,
    Down,
}

#[derive(Subcommand)]
enum Action {
    /// Draw a spiral strip, estimate its layer order and write a JSON result
    Estimate {
        #[arg(long)]
        faces: usize,
        #[arg(long)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        #[arg(long, value_enum, default_value_t = Direction::Up)]
        direction: Direction,
        #[arg(long, default_value_t = StorageKind::BitBlock)]
        storage: StorageKind,
        #[arg(long, default_value_t = 16)]
        max_solutions: usize,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Estimate {
            faces,
            seed,
            index,
            direction,
            storage,
            max_solutions,
            out,
        } => {
            let args = EstimateArgs {
                faces,
                seed,
                index,
                direction: match direction {
                    Direction::Up => foldorder::strip::StackDirection::Up,
                    Direction::Down => foldorder::strip::StackDirection::Down,
                },
                storage,
                max_solutions,
                tag: cmd.tag,
            };
            estimate::run(&args, &out).map(|_| ())
        }
        Action::Report => report(cmd.tag),
    }
}

fn report(tag: Option<String>) -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "foldorder": foldorder::VERSION,
        "tag": tag,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
