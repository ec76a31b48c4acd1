/// Filter catalog
///
/// Enumerates the built-in filters and the parameters each one reads.
/// The kind-to-parameters mapping is a fixed table resolved at compile
/// time, so the UI and the pipeline always agree on which sliders matter.

use serde::{Deserialize, Serialize};

pub mod engine;

/// The scalar parameters a filter may accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamKey {
    Intensity,
    Radius,
    Scale,
}

/// One of the built-in image filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterKind {
    Crystallize,
    Edges,
    GaussianBlur,
    Pixellate,
    SepiaTone,
    UnsharpMask,
    Vignette,
}

impl FilterKind {
    /// Every selectable filter, in chooser order.
    pub const ALL: [FilterKind; 7] = [
        FilterKind::Crystallize,
        FilterKind::Edges,
        FilterKind::GaussianBlur,
        FilterKind::Pixellate,
        FilterKind::SepiaTone,
        FilterKind::UnsharpMask,
        FilterKind::Vignette,
    ];

    /// Human-readable name shown in the filter chooser.
    pub fn label(&self) -> &'static str {
        match self {
            FilterKind::Crystallize => "Crystallize",
            FilterKind::Edges => "Edges",
            FilterKind::GaussianBlur => "Gaussian Blur",
            FilterKind::Pixellate => "Pixellate",
            FilterKind::SepiaTone => "Sepia Tone",
            FilterKind::UnsharpMask => "Unsharp Mask",
            FilterKind::Vignette => "Vignette",
        }
    }

    /// The parameters this filter reads.
    ///
    /// Values for keys not listed here never reach the filter; the stored
    /// slider values simply persist until a filter that reads them is
    /// selected again.
    pub fn parameter_keys(&self) -> &'static [ParamKey] {
        use ParamKey::*;
        match self {
            FilterKind::Crystallize => &[Radius],
            FilterKind::Edges => &[Intensity],
            FilterKind::GaussianBlur => &[Radius],
            FilterKind::Pixellate => &[Scale],
            FilterKind::SepiaTone => &[Intensity],
            FilterKind::UnsharpMask => &[Radius, Intensity],
            FilterKind::Vignette => &[Intensity, Radius],
        }
    }

    /// Whether this filter reads the given parameter.
    pub fn accepts(&self, key: ParamKey) -> bool {
        self.parameter_keys().contains(&key)
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
