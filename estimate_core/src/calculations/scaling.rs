//! # Field Scaling
//!
//! Plan variants scale material quantities, and plan pricing scales unit
//! rates. Both are "multiply a fixed set of fields by one factor", so both
//! go through [`scale_fields`]. Each type decides which of its fields are
//! eligible by implementing [`Scalable`].

use crate::units::round_dp;

/// A mutable quantity slot and the precision it is stored at.
///
/// `decimals: None` keeps full precision (used for unit rates).
pub struct ScaledField<'a> {
    pub value: &'a mut f64,
    pub decimals: Option<u32>,
}

impl<'a> ScaledField<'a> {
    pub fn rounded(value: &'a mut f64, decimals: u32) -> Self {
        ScaledField {
            value,
            decimals: Some(decimals),
        }
    }

    pub fn exact(value: &'a mut f64) -> Self {
        ScaledField { value, decimals: None }
    }
}

/// Types with a fixed set of fields eligible for uniform scaling.
pub trait Scalable {
    /// Fields that participate in scaling, with their storage precision
    fn scalable_fields(&mut self) -> Vec<ScaledField<'_>>;

    /// Multiply every eligible field by `factor`, re-rounding each one
    fn scale_by(&mut self, factor: f64) {
        scale_fields(self.scalable_fields(), factor);
    }
}

/// Multiply each field by `factor` and re-round it to its own precision.
pub fn scale_fields<'a>(fields: impl IntoIterator<Item = ScaledField<'a>>, factor: f64) {
    for field in fields {
        let scaled = *field.value * factor;
        *field.value = match field.decimals {
            Some(decimals) => round_dp(scaled, decimals),
            None => scaled,
        };
    }
}
