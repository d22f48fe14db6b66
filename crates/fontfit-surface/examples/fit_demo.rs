//! Fit a headline into a shrinking box and print the chosen sizes.
//!
//! Run with: cargo run -p fontfit-surface --example fit_demo
//! (add RUST_LOG=trace to watch the probes)

use fontfit_core::{ConfigError, Extent, FontSize, RefreshBus};
use fontfit_surface::measure::{HeuristicProbe, StyleSink};
use fontfit_surface::surface::{AutoFontSurface, SurfaceOptions};
use web_time::Instant;

struct PrintSink;

impl StyleSink for PrintSink {
    fn apply_font_size(&mut self, size: Option<FontSize>) {
        match size {
            Some(size) => println!("  style applied: font-size: {size}"),
            None => println!("  style cleared"),
        }
    }
}

fn main() -> Result<(), ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let bus = RefreshBus::new();
    let mut surface = AutoFontSurface::new(
        SurfaceOptions::with_range(8, 64),
        &bus,
        HeuristicProbe::new(),
    )?;
    surface.set_content("THE QUICK BROWN FOX");

    let mut sink = PrintSink;
    for width in [640.0, 480.0, 320.0, 240.0, 160.0, 96.0] {
        let box_extent = Extent::new(width, 120.0);
        let fitted = surface.commit(&mut sink, box_extent, Instant::now());
        println!("box {box_extent} -> {fitted}");
    }

    // A font-load event re-fits every surface at once.
    bus.refresh_all();
    surface.commit(&mut sink, Extent::new(96.0, 120.0), Instant::now());

    surface.recall(&mut sink);
    Ok(())
}
