use serde::{Deserialize, Serialize};

/// Number of decimals written for every floating point column
pub const DECIMALS: usize = 5;

/// Conventional property columns of an ANG file, in the order they are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSlot {
    /// Image quality
    ImageQuality,
    /// Confidence index
    ConfidenceIndex,
    /// SEM detector signal
    SemSignal,
    /// Pattern fit
    PatternFit,
}

impl OutputSlot {
    /// All slots
    pub const ALL: [OutputSlot; 4] = [
        OutputSlot::ImageQuality,
        OutputSlot::ConfidenceIndex,
        OutputSlot::SemSignal,
        OutputSlot::PatternFit,
    ];

    /// Recognized property names, highest priority first
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            OutputSlot::ImageQuality => &["iq", "image_quality", "imagequality"],
            OutputSlot::ConfidenceIndex => &["ci", "confidence_index", "confidenceindex"],
            OutputSlot::SemSignal => &["ss", "sem_signal", "semsignal"],
            OutputSlot::PatternFit => &["fit", "pattern_fit", "patternfit"],
        }
    }

    /// Human-readable slot name
    pub fn label(&self) -> &'static str {
        match self {
            OutputSlot::ImageQuality => "image quality",
            OutputSlot::ConfidenceIndex => "confidence index",
            OutputSlot::SemSignal => "SEM signal",
            OutputSlot::PatternFit => "pattern fit",
        }
    }
}

/// Which map properties to write to the conventional ANG columns
///
/// For every slot left as `None`, the map's property names are searched for
/// one of [`OutputSlot::aliases`] (case and underscores ignored). Slots with
/// no match are written as zeros. Only the first value is used for
/// properties with more than one value per point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    /// Property used as image quality
    pub image_quality: Option<String>,
    /// Property used as confidence index
    pub confidence_index: Option<String>,
    /// Property used as SEM signal
    pub sem_signal: Option<String>,
    /// Property used as pattern fit
    pub pattern_fit: Option<String>,
}

impl WriteOptions {
    /// Options resolving every slot by alias
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the image quality property
    pub fn image_quality(mut self, name: impl Into<String>) -> Self {
        self.image_quality = Some(name.into());
        self
    }

    /// Set the confidence index property
    pub fn confidence_index(mut self, name: impl Into<String>) -> Self {
        self.confidence_index = Some(name.into());
        self
    }

    /// Set the SEM signal property
    pub fn sem_signal(mut self, name: impl Into<String>) -> Self {
        self.sem_signal = Some(name.into());
        self
    }

    /// Set the pattern fit property
    pub fn pattern_fit(mut self, name: impl Into<String>) -> Self {
        self.pattern_fit = Some(name.into());
        self
    }

    /// Explicit property for `slot`, if any
    pub fn get(&self, slot: OutputSlot) -> Option<&str> {
        match slot {
            OutputSlot::ImageQuality => self.image_quality.as_deref(),
            OutputSlot::ConfidenceIndex => self.confidence_index.as_deref(),
            OutputSlot::SemSignal => self.sem_signal.as_deref(),
            OutputSlot::PatternFit => self.pattern_fit.as_deref(),
        }
    }

    /// Fill unset slots from `other`
    pub fn or(self, other: WriteOptions) -> Self {
        Self {
            image_quality: self.image_quality.or(other.image_quality),
            confidence_index: self.confidence_index.or(other.confidence_index),
            sem_signal: self.sem_signal.or(other.sem_signal),
            pattern_fit: self.pattern_fit.or(other.pattern_fit),
        }
    }
}
