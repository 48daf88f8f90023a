// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Carver configuration: which energy to use, which kind of seam to cut,
//! and the two tuning knobs for entropy blending and seam insertion.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// How the importance of each pixel is measured and accumulated.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum EnergyMode {
    /// Average gradient against the eight neighbors.
    #[default]
    Basic,
    /// Basic gradient blended with the local entropy of a 9×9 window.
    Entropy,
    /// Basic gradient, accumulated with the forward-energy recurrence.
    Forward,
}

impl EnergyMode {
    pub fn with_entropy(self) -> bool {
        self == EnergyMode::Entropy
    }

    pub fn is_forward(self) -> bool {
        self == EnergyMode::Forward
    }
}

impl TryFrom<u8> for EnergyMode {
    type Error = Error;

    fn try_from(selector: u8) -> Result<Self, Error> {
        match selector {
            0 => Ok(EnergyMode::Basic),
            1 => Ok(EnergyMode::Entropy),
            2 => Ok(EnergyMode::Forward),
            other => Err(Error::BadEnergyMode(other.to_string())),
        }
    }
}

impl FromStr for EnergyMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        s.trim()
            .parse::<u8>()
            .map_err(|_| Error::BadEnergyMode(s.to_string()))
            .and_then(EnergyMode::try_from)
    }
}

impl fmt::Display for EnergyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EnergyMode::Basic => "regular energy",
            EnergyMode::Entropy => "regular energy with local entropy",
            EnergyMode::Forward => "forward energy",
        })
    }
}

/// Connected seams are found by dynamic programming and removed or
/// inserted one path at a time.  Straight seams are whole columns (or
/// rows) chosen by their summed energy; they can only shrink an image.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum SeamMode {
    #[default]
    Connected,
    Straight,
}

/// Everything the carver needs to know besides the image and the
/// target size.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CarveConfig {
    pub energy: EnergyMode,
    pub seam_mode: SeamMode,
    /// Share of the local entropy in the blended energy.
    pub entropy_weight: f64,
    /// Blend inserted seam pixels with their neighbors instead of
    /// duplicating the seam pixel.
    pub interpolate: bool,
}

impl Default for CarveConfig {
    fn default() -> Self {
        CarveConfig {
            energy: EnergyMode::Basic,
            seam_mode: SeamMode::Connected,
            entropy_weight: 0.5,
            interpolate: true,
        }
    }
}

impl CarveConfig {
    pub fn new(energy: EnergyMode) -> Self {
        CarveConfig {
            energy,
            ..CarveConfig::default()
        }
    }

    pub fn with_seam_mode(mut self, seam_mode: SeamMode) -> Self {
        self.seam_mode = seam_mode;
        self
    }

    pub fn with_entropy_weight(mut self, entropy_weight: f64) -> Self {
        self.entropy_weight = entropy_weight;
        self
    }

    pub fn with_interpolation(mut self, interpolate: bool) -> Self {
        self.interpolate = interpolate;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_selectors() {
        assert_eq!("0".parse::<EnergyMode>().unwrap(), EnergyMode::Basic);
        assert_eq!("1".parse::<EnergyMode>().unwrap(), EnergyMode::Entropy);
        assert_eq!(" 2".parse::<EnergyMode>().unwrap(), EnergyMode::Forward);
        assert!(matches!(
            "3".parse::<EnergyMode>(),
            Err(Error::BadEnergyMode(s)) if s == "3"
        ));
        assert!("forward".parse::<EnergyMode>().is_err());
    }

    #[test]
    fn defaults_match_the_classic_carver() {
        let config = CarveConfig::default();
        assert_eq!(config.entropy_weight, 0.5);
        assert!(config.interpolate);
        assert_eq!(config.seam_mode, SeamMode::Connected);
        let config = CarveConfig::new(EnergyMode::Forward).with_interpolation(false);
        assert!(config.energy.is_forward());
        assert!(!config.interpolate);
    }
}
