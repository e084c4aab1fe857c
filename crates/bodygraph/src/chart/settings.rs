use crate::chart::ChartError;
use crate::gates::ZodiacSystem;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Days between the Design instant and birth.
pub const DEFAULT_DESIGN_OFFSET_DAYS: f64 = 88.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Frame longitudes are decoded in
    pub zodiac: ZodiacSystem,
    pub design_offset_days: f64,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            zodiac: ZodiacSystem::Tropical,
            design_offset_days: DEFAULT_DESIGN_OFFSET_DAYS,
        }
    }
}

impl ChartSettings {
    pub fn with_zodiac(mut self, zodiac: ZodiacSystem) -> Self {
        self.zodiac = zodiac;
        self
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        if !self.design_offset_days.is_finite()
            || !(0.0..=366.0).contains(&self.design_offset_days)
        {
            return Err(ChartError::InvalidSettings(format!(
                "design_offset_days must be within [0, 366], got {}",
                self.design_offset_days
            )));
        }
        Ok(())
    }

    /// Birth instant shifted back by the design offset.
    pub fn design_instant(&self, birth: DateTime<Utc>) -> Result<DateTime<Utc>, ChartError> {
        self.validate()?;
        let offset = Duration::milliseconds((self.design_offset_days * 86_400_000.0).round() as i64);
        birth.checked_sub_signed(offset).ok_or_else(|| {
            ChartError::InvalidSettings(format!(
                "design instant for {} is out of range",
                birth.to_rfc3339()
            ))
        })
    }
}
