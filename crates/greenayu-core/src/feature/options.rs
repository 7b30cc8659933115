//! Enumerated form options and their wire spellings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A form value that is not one of the known options.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}', expected one of: {expected}")]
pub struct ParseOptionError {
    /// Option family, e.g. "soil type".
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
    /// Comma-separated wire spellings.
    pub expected: String,
}

macro_rules! form_option {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal, default $default:ident) {
            $($variant:ident => $wire:literal, $label:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[doc = $label]
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every option, in form order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Spelling sent to the backend.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            /// Human-readable label.
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseOptionError;

            /// Matches the wire spelling or the label, ignoring ASCII case.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|opt| opt.as_str().eq_ignore_ascii_case(s) || opt.label().eq_ignore_ascii_case(s))
                    .ok_or_else(|| ParseOptionError {
                        kind: $kind,
                        value: s.to_string(),
                        expected: $name::ALL
                            .iter()
                            .map(|opt| opt.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
            }
        }
    };
}

form_option! {
    /// Soil classes known to the fertilizer and yield models.
    SoilType ("soil type", default Black) {
        Black => "Black", "Black";
        Red => "Red", "Red";
        Clayey => "Clayey", "Clayey";
        Sandy => "Sandy", "Sandy";
        Loamy => "Loamy", "Loamy";
    }
}

form_option! {
    /// Medicinal crops the fertilizer model was trained on.
    CropType ("crop type", default Iramusu) {
        Iramusu => "Iramusu", "Iramusu";
        Pawatta => "Pawatta", "Pawatta";
        RukAguna => "Ruk_aguna", "Ruk Aguna";
        SuduHandun => "SuduHandun", "Sudu Handun";
    }
}

form_option! {
    /// Growing regions for the yield model.
    Region ("region", default West) {
        West => "West", "West";
        East => "East", "East";
        North => "North", "North";
        South => "South", "South";
        Central => "Central", "Central";
    }
}

form_option! {
    /// Crops the yield model was trained on.
    YieldCrop ("crop", default Cotton) {
        Cotton => "Cotton", "Cotton";
        Rice => "Rice", "Rice";
        Wheat => "Wheat", "Wheat";
        Tea => "Tea", "Tea";
        Coconut => "Coconut", "Coconut";
        Maize => "Maize", "Maize";
        Sugarcane => "Sugarcane", "Sugarcane";
    }
}

form_option! {
    /// Prevailing weather during the season.
    Weather ("weather condition", default Cloudy) {
        Sunny => "Sunny", "Sunny";
        Cloudy => "Cloudy", "Cloudy";
        Rainy => "Rainy", "Rainy";
    }
}

form_option! {
    /// Plant parts the detector distinguishes.
    PlantPart ("plant part", default Leaf) {
        Leaf => "leaf", "Leaf";
        Root => "root", "Root";
        Flower => "flower", "Flower";
        Stem => "stem", "Stem";
        Seed => "seed", "Seed";
    }
}

form_option! {
    /// Storage conditions for harvested material.
    StorageType ("storage type", default Refrigerated) {
        Refrigerated => "refrigerated", "Refrigerated";
        Ambient => "ambient", "Ambient";
        Exposed => "exposed", "Exposed";
    }
}

impl StorageType {
    /// Typical `(temperature °C, humidity %)` for this storage.
    pub fn preset(&self) -> (f64, f64) {
        match self {
            StorageType::Refrigerated => (4.0, 90.0),
            StorageType::Ambient => (24.0, 70.0),
            StorageType::Exposed => (32.0, 55.0),
        }
    }

    /// Short description shown next to the preset.
    pub fn description(&self) -> &'static str {
        match self {
            StorageType::Refrigerated => "Cool storage (recommended)",
            StorageType::Ambient => "Room temperature",
            StorageType::Exposed => "Warm / outdoor conditions",
        }
    }
}
