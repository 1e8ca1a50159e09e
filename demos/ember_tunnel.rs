//! A denser, faster tunnel in the Ember palette.
//!
//! Run with: `cargo run --example ember_tunnel`

use starfield::prelude::*;

fn main() {
    init_logging(LoggingConfig::default().with_filter("starfield=debug,wgpu_core=warn"));

    let config = StarfieldConfig::new()
        .with_particle_count(40_000)
        .with_palette(Palette::Ember)
        .with_speed(9.0)
        .with_background(Vec3::new(0.03, 0.0, 0.0))
        .with_seed(1987);

    if let Err(e) = run(config) {
        log::error!("{}", e);
    }
}
