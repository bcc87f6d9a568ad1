use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::utils::validation::{is_valid_accession, is_valid_psi_mod};

/// Sentinel code for a modification whose type is unknown
pub const UNKNOWN_MOD_TYPE: &str = "00000";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NotationError {
    #[error("Invalid accession: '{0}'")]
    InvalidAccession(String),

    #[error("Invalid modification type code: '{0}'")]
    InvalidModType(String),

    #[error("Invalid modification coordinate: '{0}'")]
    InvalidCoordinate(String),

    #[error("Malformed modification, expected TYPE:COORD: '{0}'")]
    MalformedModification(String),
}

/// A post-translational modification: a PSI-MOD type code and an optional
/// site coordinate. An absent coordinate means the site is unknown.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Modification {
    /// Site coordinate, 1-based; `None` when the site is unknown.
    /// Listed first so the derived ordering is coordinate-then-type.
    pub coordinate: Option<u64>,

    /// Five-character PSI-MOD code; [`UNKNOWN_MOD_TYPE`] when unknown
    pub psi_mod: String,
}

impl Modification {
    pub fn new(psi_mod: impl Into<String>, coordinate: Option<u64>) -> Self {
        Self {
            coordinate,
            psi_mod: psi_mod.into(),
        }
    }
}

impl fmt::Display for Modification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.coordinate {
            Some(c) => write!(f, "{}:{}", self.psi_mod, c),
            None => write!(f, "{}:null", self.psi_mod),
        }
    }
}

/// A specific molecular form of a protein: an accession (optionally carrying
/// an isoform suffix), an optional subsequence range, and an ordered set of
/// post-translational modifications.
///
/// Proteoforms are immutable once constructed and totally ordered by
/// accession, start/end coordinate, then modification list, so they can serve
/// as sorted-map and sorted-set keys.
///
/// The canonical textual form is the SIMPLE notation
/// `ACC[-N];MOD:COORD[,MOD:COORD]...`, e.g. `P02545-2;00046:395`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Proteoform {
    /// Protein accession, possibly with an isoform suffix (`P08235-2`)
    accession: String,

    /// Start of the subsequence region; `None` means the whole protein
    start_coordinate: Option<u64>,

    /// End of the subsequence region; `None` means the whole protein
    end_coordinate: Option<u64>,

    /// Modifications, kept sorted by coordinate then type, without duplicates
    modifications: Vec<Modification>,
}

impl Proteoform {
    pub fn new(accession: impl Into<String>) -> Self {
        Self {
            accession: accession.into(),
            start_coordinate: None,
            end_coordinate: None,
            modifications: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_range(mut self, start: Option<u64>, end: Option<u64>) -> Self {
        self.start_coordinate = start;
        self.end_coordinate = end;
        self
    }

    #[must_use]
    pub fn with_modification(mut self, psi_mod: impl Into<String>, coordinate: Option<u64>) -> Self {
        let m = Modification::new(psi_mod, coordinate);
        if !self.modifications.contains(&m) {
            self.modifications.push(m);
            self.modifications.sort();
        }
        self
    }

    /// Full accession as written, isoform suffix included
    pub fn accession(&self) -> &str {
        &self.accession
    }

    /// Accession with any isoform suffix stripped (`P08235-2` -> `P08235`)
    pub fn base_accession(&self) -> &str {
        match self.accession.find('-') {
            Some(pos) => &self.accession[..pos],
            None => &self.accession,
        }
    }

    /// Isoform index when the accession carries one
    pub fn isoform(&self) -> Option<u32> {
        let pos = self.accession.find('-')?;
        self.accession[pos + 1..].parse().ok()
    }

    pub fn start_coordinate(&self) -> Option<u64> {
        self.start_coordinate
    }

    pub fn end_coordinate(&self) -> Option<u64> {
        self.end_coordinate
    }

    pub fn modifications(&self) -> &[Modification] {
        &self.modifications
    }

    /// Canonical SIMPLE notation, as used in search output columns
    #[must_use]
    pub fn notation(&self) -> String {
        let mods: Vec<String> = self.modifications.iter().map(ToString::to_string).collect();
        format!("{};{}", self.accession, mods.join(","))
    }
}

impl fmt::Display for Proteoform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation())
    }
}

impl FromStr for Proteoform {
    type Err = NotationError;

    /// Parse SIMPLE notation: `ACC[-N][;MOD:COORD[,MOD:COORD]...]`.
    ///
    /// A coordinate of `null` or `?` denotes an unknown site; a type code of
    /// `null` is normalized to [`UNKNOWN_MOD_TYPE`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (accession, mods_part) = match s.split_once(';') {
            Some((acc, rest)) => (acc, rest),
            None => (s, ""),
        };

        if !is_valid_accession(accession) {
            return Err(NotationError::InvalidAccession(accession.to_string()));
        }

        let mut proteoform = Proteoform::new(accession);
        for token in mods_part.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let (mod_type, coord) = token
                .split_once(':')
                .ok_or_else(|| NotationError::MalformedModification(token.to_string()))?;

            let mod_type = if mod_type == "null" {
                UNKNOWN_MOD_TYPE
            } else {
                mod_type
            };
            if !is_valid_psi_mod(mod_type) {
                return Err(NotationError::InvalidModType(mod_type.to_string()));
            }

            let coordinate = match coord {
                "null" | "?" => None,
                _ => Some(
                    coord
                        .parse::<u64>()
                        .map_err(|_| NotationError::InvalidCoordinate(coord.to_string()))?,
                ),
            };

            proteoform = proteoform.with_modification(mod_type, coordinate);
        }

        Ok(proteoform)
    }
}

// Serialized as the notation string so proteoforms stay readable in catalog
// files and JSON output.
impl Serialize for Proteoform {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.notation())
    }
}

impl<'de> Deserialize<'de> for Proteoform {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}
