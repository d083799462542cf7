//! Trait Dimensions
//!
//! The closed set of six personality axes and the fixed-arity record used to
//! carry one value per axis. `TraitMap<T>` has exactly six named fields, so a
//! dimension can never be missing from a vector and no seventh key can appear.

use serde::{Deserialize, Serialize};

/// One of the six fixed personality axes scored by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TraitDimension {
    Affinity,
    Openness,
    Conscientiousness,
    EmotionalStability,
    Extraversion,
    Positivity,
}

impl TraitDimension {
    /// All dimensions in declaration order.
    pub const ALL: [TraitDimension; 6] = [
        TraitDimension::Affinity,
        TraitDimension::Openness,
        TraitDimension::Conscientiousness,
        TraitDimension::EmotionalStability,
        TraitDimension::Extraversion,
        TraitDimension::Positivity,
    ];

    /// Stable key used in serialized payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            TraitDimension::Affinity => "affinity",
            TraitDimension::Openness => "openness",
            TraitDimension::Conscientiousness => "conscientiousness",
            TraitDimension::EmotionalStability => "emotionalStability",
            TraitDimension::Extraversion => "extraversion",
            TraitDimension::Positivity => "positivity",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            TraitDimension::Affinity => "Affinity",
            TraitDimension::Openness => "Openness",
            TraitDimension::Conscientiousness => "Conscientiousness",
            TraitDimension::EmotionalStability => "Emotional Stability",
            TraitDimension::Extraversion => "Extraversion",
            TraitDimension::Positivity => "Positivity",
        }
    }
}

impl std::fmt::Display for TraitDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One value per trait dimension.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TraitMap<T> {
    pub affinity: T,
    pub openness: T,
    pub conscientiousness: T,
    pub emotional_stability: T,
    pub extraversion: T,
    pub positivity: T,
}

/// Per-option contribution. `None` means the option does not touch the
/// dimension, which is different from touching it with zero.
pub type TraitVector = TraitMap<Option<i32>>;

/// Per-test normalized score, 50 (neutral) to 100.
pub type NormalizedTraitVector = TraitMap<u8>;

/// Accumulated exposure weight per dimension.
pub type ExposureCounts = TraitMap<f64>;

impl<T> TraitMap<T> {
    /// Build a map by evaluating `f` once per dimension.
    pub fn from_fn(mut f: impl FnMut(TraitDimension) -> T) -> Self {
        Self {
            affinity: f(TraitDimension::Affinity),
            openness: f(TraitDimension::Openness),
            conscientiousness: f(TraitDimension::Conscientiousness),
            emotional_stability: f(TraitDimension::EmotionalStability),
            extraversion: f(TraitDimension::Extraversion),
            positivity: f(TraitDimension::Positivity),
        }
    }

    pub fn get(&self, dimension: TraitDimension) -> &T {
        match dimension {
            TraitDimension::Affinity => &self.affinity,
            TraitDimension::Openness => &self.openness,
            TraitDimension::Conscientiousness => &self.conscientiousness,
            TraitDimension::EmotionalStability => &self.emotional_stability,
            TraitDimension::Extraversion => &self.extraversion,
            TraitDimension::Positivity => &self.positivity,
        }
    }

    pub fn get_mut(&mut self, dimension: TraitDimension) -> &mut T {
        match dimension {
            TraitDimension::Affinity => &mut self.affinity,
            TraitDimension::Openness => &mut self.openness,
            TraitDimension::Conscientiousness => &mut self.conscientiousness,
            TraitDimension::EmotionalStability => &mut self.emotional_stability,
            TraitDimension::Extraversion => &mut self.extraversion,
            TraitDimension::Positivity => &mut self.positivity,
        }
    }

    pub fn set(&mut self, dimension: TraitDimension, value: T) {
        *self.get_mut(dimension) = value;
    }

    /// Iterate `(dimension, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (TraitDimension, &T)> + '_ {
        TraitDimension::ALL.into_iter().map(move |d| (d, self.get(d)))
    }

    pub fn map<U>(&self, mut f: impl FnMut(TraitDimension, &T) -> U) -> TraitMap<U> {
        TraitMap::from_fn(|d| f(d, self.get(d)))
    }
}

impl<T: Copy> TraitMap<T> {
    /// Same value for every dimension.
    pub fn splat(value: T) -> Self {
        Self::from_fn(|_| value)
    }
}

impl TraitMap<Option<i32>> {
    /// Contribution that touches no dimension.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builder-style setter for catalog literals and tests.
    pub fn with(mut self, dimension: TraitDimension, value: i32) -> Self {
        self.set(dimension, Some(value));
        self
    }

    pub fn value(&self, dimension: TraitDimension) -> Option<i32> {
        *self.get(dimension)
    }

    /// Dimensions this contribution actually touches.
    pub fn touched(&self) -> impl Iterator<Item = (TraitDimension, i32)> + '_ {
        self.iter().filter_map(|(d, v)| v.map(|v| (d, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.touched().next().is_none()
    }

    /// Add `delta` to every dimension `delta` touches. Untouched dimensions
    /// become touched when the delta carries a value for them. Saturates at
    /// the `i32` bounds.
    pub fn add(&mut self, delta: &TraitVector) {
        for (dimension, value) in delta.touched() {
            let slot = self.get_mut(dimension);
            *slot = Some(slot.unwrap_or(0).saturating_add(value));
        }
    }
}
