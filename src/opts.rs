#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum NoiseLevel {
    Polite,
    LoudAndProud,
    FranklyQuitePedantic,
}

impl Default for NoiseLevel {
    fn default() -> Self {
        Self::Polite
    }
}

impl NoiseLevel {
    pub fn from_occurrences(occurrences: u64) -> Self {
        match occurrences {
            0 => Self::Polite,
            1 => Self::LoudAndProud,
            _ => Self::FranklyQuitePedantic,
        }
    }
}

/// How the patched manifest gets back onto disk.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WriteMode {
    /// Write a sibling temp file and rename it over the manifest.
    Atomic,
    /// Rewrite the open file from the start and truncate to the new length.
    InPlace,
}

impl Default for WriteMode {
    fn default() -> Self {
        Self::Atomic
    }
}

impl WriteMode {
    pub fn from_flag(in_place: bool) -> Self {
        if in_place {
            Self::InPlace
        } else {
            Self::Atomic
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Atomic => "atomic",
            Self::InPlace => "in-place",
        }
    }
}
