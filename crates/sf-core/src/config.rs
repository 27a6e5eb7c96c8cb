use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::HalftoneError;

/// Courbe de parcours de la grille.
///
/// # Example
/// ```
/// use sf_core::config::CurveKind;
/// let kind: CurveKind = "peano".parse().unwrap();
/// assert_eq!(kind, CurveKind::Peano);
/// assert!("zigzag".parse::<CurveKind>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CurveKind {
    /// Row-major boustrophedon scan.
    Serpentine,
    /// Hilbert curve on the enclosing 2^n square, clipped to the grid.
    #[default]
    Hilbert,
    /// Peano curve on the enclosing 3^n square, clipped to the grid.
    Peano,
    /// Generalized Hilbert curve (Gilbert) for arbitrary rectangles.
    Gilbert,
}

impl CurveKind {
    pub const ALL: [Self; 4] = [Self::Serpentine, Self::Hilbert, Self::Peano, Self::Gilbert];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Serpentine => "serpentine",
            Self::Hilbert => "hilbert",
            Self::Peano => "peano",
            Self::Gilbert => "gilbert",
        }
    }
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CurveKind {
    type Err = HalftoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "serpentine" | "boustrophedon" => Ok(Self::Serpentine),
            "hilbert" | "hilbert-like" => Ok(Self::Hilbert),
            "peano" | "peano-like" => Ok(Self::Peano),
            "gilbert" => Ok(Self::Gilbert),
            _ => Err(HalftoneError::invalid(
                "curve",
                s,
                "serpentine | hilbert | peano | gilbert",
            )),
        }
    }
}

/// Placement des points d'encre à l'intérieur d'un cluster.
///
/// # Example
/// ```
/// use sf_core::config::DistributionKind;
/// let kind: DistributionKind = "balanced".parse().unwrap();
/// assert_eq!(kind, DistributionKind::Balanced);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DistributionKind {
    /// Ink the first k members in curve order.
    #[default]
    SequentialFirst,
    /// Ink the last k members.
    SequentialLast,
    /// Ink the k members around the middle index.
    Centered,
    /// Spread the k members evenly over the cluster (Bresenham spacing).
    Balanced,
}

impl DistributionKind {
    pub const ALL: [Self; 4] = [
        Self::SequentialFirst,
        Self::SequentialLast,
        Self::Centered,
        Self::Balanced,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::SequentialFirst => "sequential-first",
            Self::SequentialLast => "sequential-last",
            Self::Centered => "centered",
            Self::Balanced => "balanced",
        }
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistributionKind {
    type Err = HalftoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential-first" | "first" => Ok(Self::SequentialFirst),
            "sequential-last" | "last" => Ok(Self::SequentialLast),
            "centered" | "symmetric" => Ok(Self::Centered),
            "balanced" | "alternating" => Ok(Self::Balanced),
            _ => Err(HalftoneError::invalid(
                "distribution",
                s,
                "sequential-first | sequential-last | centered | balanced",
            )),
        }
    }
}

/// Configuration complète d'un passage de tramage.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use sf_core::config::HalftoneConfig;
/// let config = HalftoneConfig::default();
/// assert_eq!(config.cluster_size, 4);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct HalftoneConfig {
    // === Tramage ===
    /// Curve used to order the pixels.
    pub curve: CurveKind,
    /// Pixels per cluster. Signed so that bad input reaches validation.
    pub cluster_size: i64,
    /// Placement policy inside a cluster.
    pub distribution: DistributionKind,
    /// Report the rounding residual of each cluster to the next one.
    pub carry_error: bool,
    /// Check curve bijection and output coverage on every run.
    pub verify: bool,

    // === Pré-traitement ===
    /// Treat bright pixels as ink instead of dark ones.
    pub invert: bool,
    /// Gamma exponent [0.1, 5.0]. 1.0 = neutre.
    pub gamma: f32,
    /// Unsharp-mask amount [0.0, 4.0]. 0.0 = désactivé.
    pub sharpen_amount: f32,
    /// Box-blur radius of the unsharp mask [1, 16].
    pub sharpen_radius: usize,
}

impl Default for HalftoneConfig {
    fn default() -> Self {
        Self {
            curve: CurveKind::Hilbert,
            cluster_size: 4,
            distribution: DistributionKind::SequentialFirst,
            carry_error: false,
            verify: true,
            invert: false,
            gamma: 1.0,
            sharpen_amount: 0.0,
            sharpen_radius: 1,
        }
    }
}

/// Validated core parameters, ready for the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HalftoneParams {
    pub curve: CurveKind,
    /// Always >= 1.
    pub cluster_size: usize,
    pub distribution: DistributionKind,
    pub carry_error: bool,
    pub verify: bool,
}

impl HalftoneConfig {
    /// Validate the core parameters.
    ///
    /// # Errors
    /// `InvalidParameter` when `cluster_size <= 0`.
    ///
    /// # Example
    /// ```
    /// use sf_core::config::HalftoneConfig;
    /// let mut config = HalftoneConfig::default();
    /// config.cluster_size = 0;
    /// assert!(config.params().is_err());
    /// ```
    pub fn params(&self) -> Result<HalftoneParams, HalftoneError> {
        let cluster_size = usize::try_from(self.cluster_size)
            .ok()
            .filter(|&s| s > 0)
            .ok_or_else(|| HalftoneError::invalid("cluster_size", &self.cluster_size, ">= 1"))?;
        Ok(HalftoneParams {
            curve: self.curve,
            cluster_size,
            distribution: self.distribution,
            carry_error: self.carry_error,
            verify: self.verify,
        })
    }

    /// Clamp the pre-filter fields to their valid ranges.
    /// Called after TOML deserialization and CLI overrides.
    pub fn clamp_prefilter(&mut self) {
        if !self.gamma.is_finite() {
            self.gamma = 1.0;
        }
        self.gamma = self.gamma.clamp(0.1, 5.0);
        if !self.sharpen_amount.is_finite() {
            self.sharpen_amount = 0.0;
        }
        self.sharpen_amount = self.sharpen_amount.clamp(0.0, 4.0);
        self.sharpen_radius = self.sharpen_radius.clamp(1, 16);
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    halftone: Option<HalftoneSection>,
    prefilter: Option<PrefilterSection>,
}

#[derive(Deserialize)]
struct HalftoneSection {
    curve: Option<CurveKind>,
    cluster_size: Option<i64>,
    distribution: Option<DistributionKind>,
    carry_error: Option<bool>,
    verify: Option<bool>,
}

#[derive(Deserialize)]
struct PrefilterSection {
    invert: Option<bool>,
    gamma: Option<f32>,
    sharpen_amount: Option<f32>,
    sharpen_radius: Option<usize>,
}

/// Parse TOML text and merge it over the defaults.
///
/// # Errors
/// Returns an error on malformed TOML or unknown enum names.
pub fn parse_config(content: &str) -> Result<HalftoneConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;
    let mut config = HalftoneConfig::default();

    if let Some(h) = file.halftone {
        if let Some(v) = h.curve {
            config.curve = v;
        }
        if let Some(v) = h.cluster_size {
            config.cluster_size = v;
        }
        if let Some(v) = h.distribution {
            config.distribution = v;
        }
        if let Some(v) = h.carry_error {
            config.carry_error = v;
        }
        if let Some(v) = h.verify {
            config.verify = v;
        }
    }

    if let Some(p) = file.prefilter {
        if let Some(v) = p.invert {
            config.invert = v;
        }
        if let Some(v) = p.gamma {
            config.gamma = v;
        }
        if let Some(v) = p.sharpen_amount {
            config.sharpen_amount = v;
        }
        if let Some(v) = p.sharpen_radius {
            config.sharpen_radius = v;
        }
    }

    config.clamp_prefilter();
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// Core parameters are not validated here; [`HalftoneConfig::params`] does that.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use sf_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<HalftoneConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    let config =
        parse_config(&content).with_context(|| format!("Configuration invalide : {}", path.display()))?;
    log::debug!("Configuration chargée depuis {}", path.display());
    Ok(config)
}
