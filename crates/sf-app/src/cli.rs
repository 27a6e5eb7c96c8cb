use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::Parser;
use sf_core::config::{CurveKind, DistributionKind, HalftoneConfig};

/// Configuration lue quand `--config` est absent.
pub const DEFAULT_CONFIG: &str = "config/default.toml";

/// curvetone — Digital halftoning along space-filling curves.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image source (PNG, JPEG, BMP, GIF), convertie en niveaux de gris.
    #[arg(long)]
    pub image: PathBuf,

    /// Fichier de sortie. Défaut : {curve}_{cluster_size}_{nom} à côté de l'image.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Courbe : serpentine, hilbert, peano, gilbert.
    #[arg(long)]
    pub curve: Option<CurveKind>,

    /// Taille des clusters (pixels).
    #[arg(long, allow_negative_numbers = true)]
    pub cluster_size: Option<i64>,

    /// Placement : sequential-first, sequential-last, centered, balanced.
    #[arg(long)]
    pub distribution: Option<DistributionKind>,

    /// Reporter le résidu d'arrondi d'un cluster au suivant.
    #[arg(long, default_value_t = false)]
    pub carry_error: bool,

    /// Les pixels clairs deviennent encre.
    #[arg(long, default_value_t = false)]
    pub invert: bool,

    /// Correction gamma appliquée à la luminance [0.1, 5.0].
    #[arg(long)]
    pub gamma: Option<f32>,

    /// Intensité du rehaussement de contours [0.0, 4.0].
    #[arg(long)]
    pub sharpen: Option<f32>,

    /// Rayon du flou de l'unsharp mask [1, 16].
    #[arg(long)]
    pub sharpen_radius: Option<usize>,

    /// Écrire aussi l'ordre de parcours de la courbe en dégradé.
    #[arg(long)]
    pub dump_curve: Option<PathBuf>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Resolve the configuration file.
    ///
    /// An explicit `--config` must exist. Without one, a missing
    /// [`DEFAULT_CONFIG`] falls back to the built-in defaults.
    ///
    /// # Errors
    /// Missing explicit file, unreadable file or malformed TOML.
    pub fn resolve_config(&self) -> Result<HalftoneConfig> {
        match &self.config {
            Some(path) => {
                if !path.exists() {
                    bail!("Config introuvable : {}", path.display());
                }
                sf_core::config::load_config(path)
            }
            None => {
                let path = Path::new(DEFAULT_CONFIG);
                if path.exists() {
                    sf_core::config::load_config(path)
                } else {
                    log::warn!("Config introuvable : {DEFAULT_CONFIG}. Utilisation des défauts.");
                    Ok(HalftoneConfig::default())
                }
            }
        }
    }

    /// Apply command-line overrides on top of a loaded configuration.
    pub fn apply_overrides(&self, config: &mut HalftoneConfig) {
        if let Some(curve) = self.curve {
            config.curve = curve;
        }
        if let Some(size) = self.cluster_size {
            config.cluster_size = size;
        }
        if let Some(distribution) = self.distribution {
            config.distribution = distribution;
        }
        if self.carry_error {
            config.carry_error = true;
        }
        if self.invert {
            config.invert = true;
        }
        if let Some(gamma) = self.gamma {
            config.gamma = gamma;
        }
        if let Some(amount) = self.sharpen {
            config.sharpen_amount = amount;
        }
        if let Some(radius) = self.sharpen_radius {
            config.sharpen_radius = radius;
        }
        config.clamp_prefilter();
    }

    /// Output path: explicit, or `{curve}_{cluster_size}_{file name}` beside the input.
    #[must_use]
    pub fn output_path(&self, config: &HalftoneConfig) -> PathBuf {
        if let Some(ref path) = self.output {
            return path.clone();
        }
        default_output(&self.image, config)
    }
}

fn default_output(image: &Path, config: &HalftoneConfig) -> PathBuf {
    let name = image
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("halftone.png");
    image.with_file_name(format!("{}_{}_{name}", config.curve, config.cluster_size))
}
