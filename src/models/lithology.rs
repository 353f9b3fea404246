use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lithology codes as stored by the remote well store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lithology {
    /// Topsoil / plant root layer
    #[serde(rename = "PRS")]
    Prs,
    #[serde(rename = "PEAT")]
    Peat,
    #[serde(rename = "LOAM")]
    Loam,
    #[serde(rename = "SANDY_LOAM")]
    SandyLoam,
    #[serde(rename = "SAND")]
    Sand,
}

impl Lithology {
    /// Wire code used by the remote store.
    pub fn code(&self) -> &'static str {
        match self {
            Lithology::Prs => "PRS",
            Lithology::Peat => "PEAT",
            Lithology::Loam => "LOAM",
            Lithology::SandyLoam => "SANDY_LOAM",
            Lithology::Sand => "SAND",
        }
    }

    /// Human-readable name for display.
    pub fn name(&self) -> &'static str {
        match self {
            Lithology::Prs => "topsoil",
            Lithology::Peat => "peat",
            Lithology::Loam => "loam",
            Lithology::SandyLoam => "sandy loam",
            Lithology::Sand => "sand",
        }
    }
}

impl fmt::Display for Lithology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Lithology {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "PRS" | "TOPSOIL" => Ok(Lithology::Prs),
            "PEAT" => Ok(Lithology::Peat),
            "LOAM" => Ok(Lithology::Loam),
            "SANDY_LOAM" => Ok(Lithology::SandyLoam),
            "SAND" => Ok(Lithology::Sand),
            _ => Err(format!(
                "Invalid lithology '{}'. Valid options: prs, peat, loam, sandy_loam, sand",
                s
            )),
        }
    }
}
