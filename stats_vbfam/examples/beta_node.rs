//! Builds a Beta node, runs a couple of coordinate ascent style updates on it, and samples.
//! Run with `RUST_LOG=debug` to see the expectation notices.

use ndarray::{array, Ix1};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use stats_vbfam::{BetaDistribution, StatsResult};

fn main() -> StatsResult<()> {
    pretty_env_logger::init();

    let mut beta = BetaDistribution::with_expectation(
        Ix1(3),
        1.0,
        array![1.0, 1.0, 1e-9],
        array![0.9, 0.9, 0.9],
    )?;
    println!("{:#?}", beta.expectations());

    for step in 0..3 {
        beta.update_parameters(|p| {
            p.a += 1.0;
            p.b.mapv_inplace(|b| b * 1.5);
        })?;
        println!("step {}: E[x] = {}", step, beta.expectations().e);
    }

    let mut rng = SmallRng::seed_from_u64(7);
    println!("draw: {}", beta.sample(&mut rng)?);
    Ok(())
}
