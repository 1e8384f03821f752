//! Builds a sample layout, merges two boxes and reports the generated solids.
//!
//! ```text
//! cargo run --example generate
//! RUST_LOG=cellbox=debug cargo run --example generate
//! ```

use cellbox::{BoxLayout, BoxParams, GenerateBoxes};

fn main() -> cellbox::Result<()> {
    // Default: WARN for everything, INFO for cellbox.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("generate=info".parse().unwrap_or_default())
        .add_directive("cellbox=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let params = BoxParams {
        total_width: 250.0,
        total_depth: 180.0,
        ..BoxParams::default()
    };
    let mut layout = BoxLayout::from_params(&params)?;
    layout.merge(&[0, 1])?;
    layout.set_hidden(5, true)?;

    let generation = GenerateBoxes::new(params, &layout).execute()?;
    for b in &generation.boxes {
        let m = &b.metadata;
        tracing::info!(
            index = m.index,
            combined = m.is_combined,
            width = m.width,
            depth = m.depth,
            height = m.height,
            wall_triangles = b.wall.triangle_count(),
            wall_volume = b.wall.volume(),
            floor = b.floor.is_some(),
            "box"
        );
    }
    for s in &generation.skipped {
        tracing::warn!(index = s.index, error = %s.error, "skipped");
    }
    Ok(())
}
