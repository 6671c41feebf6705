use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pile_layout::api::{collect_pile, draw_pile, layout_pile, PileGenCfg, PileReplay};
use pile_layout::LayoutCfg;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod io;
mod provenance;

use io::{LayoutFile, PileFile, FILE_PILE};
use provenance::{current_git_rev, write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "pile-cli")]
#[command(about = "Resting poses for messy piles of cards")]
struct Cmd {
    /// Optional run tag; propagated to provenance and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Lay out a pile file (JSON or CSV) and write the poses as JSON
    Layout {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = 0.0)]
        table_height: f64,
        #[arg(long, default_value_t = 0.1)]
        inset: f64,
        #[arg(long, default_value_t = 0.3)]
        partial_weight: f64,
        #[arg(long, default_value_t = 10_000)]
        max_hull_iterations: usize,
    },
    /// Write a random messy pile in the JSON input format
    Generate {
        #[arg(long, default_value_t = 16)]
        count: usize,
        #[arg(long)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        #[arg(long, default_value_t = 1.0)]
        spread: f64,
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
        Action::Layout {
            input,
            out,
            table_height,
            inset,
            partial_weight,
            max_hull_iterations,
        } => {
            let cfg = LayoutCfg {
                table_height,
                min_inset_fraction: inset,
                partial_support_weight: partial_weight,
                max_hull_iterations,
            };
            layout(input, out, cfg, cmd.tag)
        }
        Action::Generate {
            count,
            seed,
            index,
            spread,
            out,
        } => {
            let cfg = PileGenCfg {
                count,
                spread,
                ..PileGenCfg::default()
            };
            generate(cfg, PileReplay { seed, index }, out, cmd.tag)
        }
        Action::Report => report(cmd.tag),
    }
}

fn layout(input: PathBuf, out: PathBuf, cfg: LayoutCfg, tag: Option<String>) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), tag = ?tag, "layout");
    let file = io::read_pile_file(&input)?;
    let pile = collect_pile(&file.to_snapshot(), FILE_PILE)
        .with_context(|| format!("validating {}", input.display()))?;
    let poses = layout_pile(&pile, &cfg);
    tracing::info!(objects = poses.len(), "layout_done");

    io::write_json(&out, &LayoutFile::from_poses(&poses))?;
    let params = serde_json::json!({
        "input": input.to_string_lossy(),
        "objects": poses.len(),
        "table_height": cfg.table_height,
        "min_inset_fraction": cfg.min_inset_fraction,
        "partial_support_weight": cfg.partial_support_weight,
        "max_hull_iterations": cfg.max_hull_iterations,
    });
    write_sidecar(&out, Payload::new(params, tag))?;
    Ok(())
}

fn generate(cfg: PileGenCfg, tok: PileReplay, out: PathBuf, tag: Option<String>) -> Result<()> {
    tracing::info!(count = cfg.count, seed = tok.seed, index = tok.index, "generate");
    let pile = draw_pile(cfg, tok);
    io::write_json(&out, &PileFile::from_pile(&pile))?;
    let params = serde_json::json!({
        "count": cfg.count,
        "spread": cfg.spread,
        "seed": tok.seed,
        "index": tok.index,
    });
    write_sidecar(&out, Payload::new(params, tag))?;
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let defaults = LayoutCfg::default();
    let obj = serde_json::json!({
        "code_rev": current_git_rev(),
        "version": pile_layout::VERSION,
        "tag": tag,
        "defaults": {
            "table_height": defaults.table_height,
            "min_inset_fraction": defaults.min_inset_fraction,
            "partial_support_weight": defaults.partial_support_weight,
            "max_hull_iterations": defaults.max_hull_iterations,
        },
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
