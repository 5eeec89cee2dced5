//! Layer-order estimate for one synthetic spiral strip.
//!
//! Purpose
//! - Print the timing and outcome of seeding, propagation and the estimator
//!   on a single reproducible strip, plus the resolved face order.
//!
//! Usage: `cargo run -p foldorder --example strip_estimate -- [faces] [seed]`

use std::time::Instant;

use foldorder::api::{
    draw_strip, propagate, seed_from_creases, Estimator, FaceCount, StackDirection, StripCfg,
    StripReplay,
};

fn main() {
    let mut args = std::env::args().skip(1);
    let faces: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(12);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(7);

    let cfg = StripCfg {
        faces: FaceCount::Fixed(faces),
        direction: StackDirection::Up,
        ..StripCfg::default()
    };
    let strip = draw_strip(cfg, StripReplay { seed, index: 0 }).expect("valid strip params");

    let mut matrix = strip.seeded.clone();
    let t0 = Instant::now();
    let seeded = seed_from_creases(&strip.mesh, &mut matrix).expect("seeding succeeds");
    let summary = propagate(&strip.mesh, &strip.oracles, &mut matrix).expect("propagation succeeds");
    let prop_ms = t0.elapsed().as_secs_f64() * 1e3;

    let t1 = Instant::now();
    let est = Estimator::default()
        .run(&strip.mesh, &strip.oracles, &strip.seeded)
        .expect("estimator succeeds");
    let est_ms = t1.elapsed().as_secs_f64() * 1e3;

    println!(
        "faces={} creases={} seeding={seeded:?}",
        strip.face_count(),
        strip.mesh.crease_count()
    );
    println!(
        "propagate outcome={:?} passes={} applied={} changed={} unresolved_left={}",
        summary.outcome,
        summary.passes,
        summary.applied,
        summary.changed,
        matrix.unresolved_pairs().len()
    );
    println!("estimate={} solutions={}", est.label(), est.solutions().len());
    println!("propagate_time_ms={prop_ms:.3}");
    println!("estimate_time_ms={est_ms:.3}");
    println!("true_order(bottom->top)={:?}", strip.true_order);
}
