use anyhow::{Result, ensure};
use clap::Parser;

/// Grid ray caster with a minimap overlay.
#[derive(Clone, Debug, Parser)]
#[command(version, about)]
pub struct Config {
    /// Window width in logical pixels
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Height of the internal render buffer; its width follows the window aspect
    #[arg(long, default_value_t = 720)]
    pub internal_height: usize,

    /// Horizontal field of view in degrees
    #[arg(long, default_value_t = 65.0)]
    pub fov: f32,

    /// Rays that find no wall within this many world units render as open space
    #[arg(long, default_value_t = 2048.0)]
    pub max_ray_distance: f32,

    /// Minimap size relative to world units
    #[arg(long, default_value_t = 0.25)]
    pub minimap_scale: f32,

    /// Degrees turned per unit of horizontal pointer motion
    #[arg(long, default_value_t = 1.0)]
    pub turn_rate: f32,

    /// Skip drawing the minimap overlay
    #[arg(long)]
    pub no_minimap: bool,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.width > 0 && self.height > 0,
            "window size must be non-zero, got {}x{}",
            self.width,
            self.height
        );
        ensure!(self.internal_height > 0, "internal height must be non-zero");
        ensure!(
            self.fov > 0.0 && self.fov < 180.0,
            "field of view must be between 0 and 180 degrees, got {}",
            self.fov
        );
        ensure!(
            self.max_ray_distance > 0.0 && self.max_ray_distance.is_finite(),
            "max ray distance must be positive, got {}",
            self.max_ray_distance
        );
        ensure!(
            self.minimap_scale > 0.0,
            "minimap scale must be positive, got {}",
            self.minimap_scale
        );
        ensure!(self.turn_rate.is_finite(), "turn rate must be finite");
        Ok(())
    }

    #[inline]
    pub fn fov_radians(&self) -> f32 {
        self.fov.to_radians()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            internal_height: 720,
            fov: 65.0,
            max_ray_distance: 2048.0,
            minimap_scale: 0.25,
            turn_rate: 1.0,
            no_minimap: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_parser() {
        let parsed = Config::parse_from(["grid_raycaster"]);
        let default = Config::default();
        assert_eq!(parsed.width, default.width);
        assert_eq!(parsed.height, default.height);
        assert_eq!(parsed.internal_height, default.internal_height);
        assert_eq!(parsed.fov, default.fov);
        assert_eq!(parsed.max_ray_distance, default.max_ray_distance);
        assert_eq!(parsed.minimap_scale, default.minimap_scale);
        assert_eq!(parsed.turn_rate, default.turn_rate);
        assert!(!parsed.no_minimap);
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_parse_overrides() {
        let cfg = Config::parse_from([
            "grid_raycaster",
            "--fov",
            "90",
            "--internal-height",
            "240",
            "--no-minimap",
        ]);
        assert_eq!(cfg.fov, 90.0);
        assert_eq!(cfg.internal_height, 240);
        assert!(cfg.no_minimap);
        assert!((cfg.fov_radians() - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_bad_fov() {
        for fov in [0.0, -5.0, 180.0, 270.0] {
            let cfg = Config {
                fov,
                ..Config::default()
            };
            assert!(cfg.validate().is_err(), "fov {fov} accepted");
        }
    }

    #[test]
    fn test_rejects_zero_sizes() {
        let cfg = Config {
            internal_height: 0,
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
        let cfg = Config {
            width: 0,
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }
}
