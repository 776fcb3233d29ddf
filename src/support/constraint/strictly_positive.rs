use std::{cmp::Ordering, marker::PhantomData};

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is strictly positive (greater than zero).
///
/// Simulated durations and domain thicknesses use this marker: a zero-length
/// slab or an empty time span cannot be discretized.
///
/// # Examples
///
/// ```
/// use twine_conduction::support::constraint::{Constrained, StrictlyPositive};
///
/// let tmax = Constrained::<_, StrictlyPositive>::new(4000.0).unwrap();
/// assert_eq!(tmax.into_inner(), 4000.0);
///
/// assert!(StrictlyPositive::new(0.0).is_err());
/// assert!(StrictlyPositive::new(-0.05).is_err());
/// assert!(StrictlyPositive::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Constructs a [`Constrained<T, StrictlyPositive>`] if the value is strictly positive.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero, negative, or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, StrictlyPositive>, ConstraintError> {
        Constrained::<T, StrictlyPositive>::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

impl<T: PartialOrd + Zero> Constrained<T, StrictlyPositive> {
    /// Wraps a value already known to be strictly positive.
    ///
    /// The invariant is checked in debug builds only.
    pub(crate) fn new_unchecked(value: T) -> Self {
        debug_assert!(value > T::zero(), "value must be strictly positive");
        Self {
            value,
            _marker: PhantomData,
        }
    }
}
