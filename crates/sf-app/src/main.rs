use anyhow::{Context, Result};
use clap::Parser;
use sf_core::gamma::GammaLut;
use sf_halftone::Halftoner;

pub mod cli;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config puis appliquer les overrides CLI
    let mut config = cli.resolve_config()?;
    cli.apply_overrides(&mut config);
    log::info!(
        "Paramètres : courbe {}, clusters de {}, placement {}",
        config.curve,
        config.cluster_size,
        config.distribution
    );

    // 4. Valider avant toute lecture d'image
    let mut halftoner = Halftoner::from_config(&config).context("Paramètres de tramage invalides")?;

    // 5. Pré-traitement : gamma (LUT) puis rehaussement de contours
    let lut = GammaLut::new(config.gamma);
    let grid = sf_source::image::load_intensity(&cli.image, &lut, config.invert)?;
    let grid = sf_halftone::prefilter::sharpen(&grid, config.sharpen_amount, config.sharpen_radius)?;

    // 6. Tramage
    let (bitmap, stats) = halftoner.process_with_stats(&grid)?;
    log::info!(
        "{} clusters, {} pixels encrés (budget {:.1}, moyenne image {:.3})",
        stats.clusters,
        stats.ink_pixels,
        stats.ink_budget,
        grid.mean()
    );

    // 7. Sorties
    let output = cli.output_path(&config);
    sf_source::image::save_bitmap(&output, &bitmap)?;

    if let Some(ref path) = cli.dump_curve {
        let order = halftoner.curve_order(grid.height(), grid.width())?;
        sf_source::image::save_order_ramp(path, order)?;
    }

    Ok(())
}
