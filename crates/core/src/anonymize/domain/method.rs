/// How detected face regions are obscured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnonymizationMethod {
    /// Gaussian blur over the region.
    #[default]
    Blur,
    /// Block mosaic over the region.
    Pixelate,
    /// Solid black fill over the region.
    Mask,
}

impl AnonymizationMethod {
    /// Parses a user-supplied method name. Unknown names map to `None`,
    /// which callers treat as "leave regions untouched" rather than an
    /// error, so a typo produces an unmodified output instead of a
    /// failed job.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "blur" => Some(Self::Blur),
            "pixelate" => Some(Self::Pixelate),
            "mask" => Some(Self::Mask),
            _ => None,
        }
    }
}

impl std::fmt::Display for AnonymizationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Blur => "blur",
            Self::Pixelate => "pixelate",
            Self::Mask => "mask",
        };
        f.write_str(name)
    }
}
