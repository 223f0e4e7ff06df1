//! Global working precision and display settings.
//!
//! Every arithmetic context reads its working precision from a single
//! process-wide [`PrecisionSettings`] value.  Matrix operations read the
//! settings once when they start, so an operation always runs at one
//! precision from beginning to end.

use crate::algebra::SettingsError;
use derive_builder::Builder;
use lazy_static::lazy_static;
use std::sync::RwLock;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const MIN_PREC: u32 = 2;
const MAX_PREC: u32 = 1 << 20;
const MAX_GUARD_BITS: u32 = 1024;

/// Working precision settings shared by all arithmetic contexts.
///
/// ```
/// use mpmatrix::settings::PrecisionSettingsBuilder;
///
/// let settings = PrecisionSettingsBuilder::default()
///     .exact_prec(113)
///     .build()
///     .unwrap();
/// assert_eq!(settings.interval_prec, 53);
/// ```
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PrecisionSettings {
    ///working precision (bits) of the exact context
    #[builder(default = "53")]
    pub exact_prec: u32,

    ///working precision (bits) of the interval context
    #[builder(default = "53")]
    pub interval_prec: u32,

    ///extra bits carried through elimination and norm accumulation
    #[builder(default = "20")]
    pub guard_bits: u32,

    ///significant digits used when printing matrices
    #[builder(default = "15")]
    pub display_digits: usize,
}

impl Default for PrecisionSettings {
    fn default() -> PrecisionSettings {
        PrecisionSettingsBuilder::default().build().unwrap()
    }
}

impl PrecisionSettings {
    /// Checks that the settings are valid
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_prec("exact_prec", self.exact_prec)?;
        validate_prec("interval_prec", self.interval_prec)?;
        validate_guard_bits(self.guard_bits)?;
        validate_display_digits(self.display_digits)
    }
}

// pre-build checker (for auto-validation when using the builder)

impl From<SettingsError> for PrecisionSettingsBuilderError {
    fn from(e: SettingsError) -> Self {
        PrecisionSettingsBuilderError::ValidationError(e.to_string())
    }
}

/// Automatic pre-build settings validation
impl PrecisionSettingsBuilder {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(p) = self.exact_prec {
            validate_prec("exact_prec", p)?;
        }
        if let Some(p) = self.interval_prec {
            validate_prec("interval_prec", p)?;
        }
        if let Some(g) = self.guard_bits {
            validate_guard_bits(g)?;
        }
        if let Some(d) = self.display_digits {
            validate_display_digits(d)?;
        }
        Ok(())
    }
}

fn validate_prec(field: &'static str, prec: u32) -> Result<(), SettingsError> {
    if (MIN_PREC..=MAX_PREC).contains(&prec) {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue(field))
    }
}

fn validate_guard_bits(bits: u32) -> Result<(), SettingsError> {
    if bits <= MAX_GUARD_BITS {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue("guard_bits"))
    }
}

fn validate_display_digits(digits: usize) -> Result<(), SettingsError> {
    if digits >= 1 {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue("display_digits"))
    }
}

lazy_static! {
    static ref SETTINGS: RwLock<PrecisionSettings> = RwLock::new(PrecisionSettings::default());
}

/// Snapshot of the current global settings.
pub fn settings() -> PrecisionSettings {
    // settings are plain data, so a poisoned lock still holds a valid value
    SETTINGS
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .clone()
}

/// Replace the global settings after validating them.
pub fn set_settings(new: PrecisionSettings) -> Result<(), SettingsError> {
    new.validate()?;
    debug!(
        exact_prec = new.exact_prec,
        interval_prec = new.interval_prec,
        guard_bits = new.guard_bits,
        "updating precision settings"
    );
    *SETTINGS.write().unwrap_or_else(|e| e.into_inner()) = new;
    Ok(())
}

/// Revert the global settings to their default values.
pub fn default_settings() {
    *SETTINGS.write().unwrap_or_else(|e| e.into_inner()) = PrecisionSettings::default();
}

#[test]
fn test_settings_validate() {
    // all standard settings
    PrecisionSettingsBuilder::default().build().unwrap();

    assert!(PrecisionSettingsBuilder::default()
        .exact_prec(1)
        .build()
        .is_err());
    assert!(PrecisionSettingsBuilder::default()
        .interval_prec(MAX_PREC + 1)
        .build()
        .is_err());
    assert!(PrecisionSettingsBuilder::default()
        .guard_bits(MAX_GUARD_BITS + 1)
        .build()
        .is_err());
    assert!(PrecisionSettingsBuilder::default()
        .display_digits(0)
        .build()
        .is_err());

    let mut s = PrecisionSettings::default();
    s.exact_prec = 0;
    assert_eq!(s.validate(), Err(SettingsError::BadFieldValue("exact_prec")));
    assert_eq!(set_settings(s), Err(SettingsError::BadFieldValue("exact_prec")));

    // rejected updates never land, so resetting gives back the defaults
    default_settings();
    assert_eq!(settings(), PrecisionSettings::default());
}
