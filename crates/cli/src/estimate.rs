use anyhow::{Context, Result};
use foldorder::api::{
    draw_strip, EstimateCfg, Estimation, Estimator, FaceCount, StackDirection, StripCfg,
    StripReplay,
};
use foldorder::storage::StorageKind;
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::provenance::{write_sidecar, Payload};

/// Parameters of one `estimate` run.
#[derive(Clone, Debug, Serialize)]
pub struct EstimateArgs {
    pub faces: usize,
    pub seed: u64,
    pub index: u64,
    #[serde(serialize_with = "ser_direction")]
    pub direction: StackDirection,
    #[serde(serialize_with = "ser_display")]
    pub storage: StorageKind,
    pub max_solutions: usize,
    #[serde(skip)]
    pub tag: Option<String>,
}

fn ser_direction<S: serde::Serializer>(d: &StackDirection, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(match d {
        StackDirection::Up => "up",
        StackDirection::Down => "down",
    })
}

fn ser_display<S: serde::Serializer>(k: &StorageKind, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(k)
}

/// Draw the strip, run the estimator and write `out` plus its provenance sidecar.
/// Returns the sidecar path.
pub fn run(args: &EstimateArgs, out: &Path) -> Result<PathBuf> {
    tracing::info!(
        faces = args.faces,
        seed = args.seed,
        index = args.index,
        storage = %args.storage,
        tag = ?args.tag,
        "estimate"
    );
    let cfg = StripCfg {
        faces: FaceCount::Fixed(args.faces),
        direction: args.direction,
        ..StripCfg::default()
    };
    let tok = StripReplay {
        seed: args.seed,
        index: args.index,
    };
    let mut strip = draw_strip(cfg, tok).context("drawing strip")?;
    strip.seeded.switch_storage(args.storage);
    let truth = strip.truth()?;

    let estimator = Estimator::new(EstimateCfg {
        max_solutions: args.max_solutions,
        ..EstimateCfg::default()
    });
    let t0 = Instant::now();
    let est = estimator.run(&strip.mesh, &strip.oracles, &strip.seeded)?;
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;

    let matches_truth = est.solutions().iter().any(|m| *m == truth);
    let first_orders: Vec<_> = est
        .solutions()
        .first()
        .map(|m| {
            m.face_orders()
                .into_iter()
                .map(|o| json!([o.f, o.g, o.s]))
                .collect()
        })
        .unwrap_or_default();
    tracing::info!(
        outcome = est.label(),
        solutions = est.solutions().len(),
        matches_truth,
        elapsed_ms,
        "estimate done"
    );

    let doc = json!({
        "tag": args.tag,
        "faces": strip.face_count(),
        "creases": strip.mesh.crease_count(),
        "outcome": est.label(),
        "solutions": est.solutions().len(),
        "unique": matches!(est, Estimation::Unique(_)),
        "matches_true_order": matches_truth,
        "true_order": strip.true_order,
        "face_orders": first_orders,
        "elapsed_ms": elapsed_ms,
    });
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", out.display()))?;

    let mut payload = Payload::new(serde_json::to_value(args)?);
    payload.tag = args.tag.clone();
    write_sidecar(out, payload)
}
