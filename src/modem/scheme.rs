//! Modulation scheme selection
//!
//! One closed enum over the supported alphabets. It implements
//! [`Constellation`] itself, so call sites stay generic and adding a scheme
//! only touches this file and `constellations/`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constellations::{Qam16, Qpsk};
use crate::error::OfdmError;
use crate::traits::Constellation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Modulation {
    #[default]
    #[serde(rename = "qpsk", alias = "QPSK")]
    Qpsk,
    #[serde(rename = "qam16", alias = "16QAM", alias = "16qam", alias = "QAM16")]
    Qam16,
}

impl Modulation {
    pub const ALL: [Modulation; 2] = [Modulation::Qpsk, Modulation::Qam16];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Qpsk => "QPSK",
            Self::Qam16 => "16QAM",
        }
    }
}

impl Constellation for Modulation {
    fn order(&self) -> usize {
        match self {
            Self::Qpsk => Qpsk.order(),
            Self::Qam16 => Qam16.order(),
        }
    }

    fn normalization(&self) -> f64 {
        match self {
            Self::Qpsk => Qpsk.normalization(),
            Self::Qam16 => Qam16.normalization(),
        }
    }

    #[inline]
    fn symbol_to_iq(&self, sym: u8) -> (f64, f64) {
        match self {
            Self::Qpsk => Qpsk.symbol_to_iq(sym),
            Self::Qam16 => Qam16.symbol_to_iq(sym),
        }
    }

    #[inline]
    fn iq_to_symbol(&self, i: f64, q: f64) -> u8 {
        match self {
            Self::Qpsk => Qpsk.iq_to_symbol(i, q),
            Self::Qam16 => Qam16.iq_to_symbol(i, q),
        }
    }
}

impl FromStr for Modulation {
    type Err = OfdmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "QPSK" => Ok(Self::Qpsk),
            "16QAM" | "QAM16" | "16-QAM" => Ok(Self::Qam16),
            _ => Err(OfdmError::UnsupportedScheme(s.to_string())),
        }
    }
}

impl fmt::Display for Modulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        assert_eq!("QPSK".parse::<Modulation>().unwrap(), Modulation::Qpsk);
        assert_eq!("qpsk".parse::<Modulation>().unwrap(), Modulation::Qpsk);
        assert_eq!("16QAM".parse::<Modulation>().unwrap(), Modulation::Qam16);
        assert_eq!("16-qam".parse::<Modulation>().unwrap(), Modulation::Qam16);
    }

    #[test]
    fn test_unsupported_tag() {
        let err = "64QAM".parse::<Modulation>().unwrap_err();
        assert_eq!(err, OfdmError::UnsupportedScheme("64QAM".into()));
    }

    #[test]
    fn test_dispatch_matches_alphabets() {
        assert_eq!(Modulation::Qpsk.bits_per_symbol(), 2);
        assert_eq!(Modulation::Qam16.bits_per_symbol(), 4);
        for sym in 0..16u8 {
            assert_eq!(Modulation::Qam16.symbol_to_iq(sym), Qam16.symbol_to_iq(sym));
        }
        for sym in 0..4u8 {
            assert_eq!(Modulation::Qpsk.symbol_to_iq(sym), Qpsk.symbol_to_iq(sym));
        }
    }

    #[test]
    fn test_serde_tags() {
        let m: Modulation = serde_json::from_str("\"16QAM\"").unwrap();
        assert_eq!(m, Modulation::Qam16);
        assert_eq!(serde_json::to_string(&Modulation::Qpsk).unwrap(), "\"qpsk\"");
    }
}
