//! Core traits for the validation system
//!
//! This module defines the fundamental trait that all validators implement,
//! plus the adapters that turn closures and attribute sets into validators.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::foundation::{FieldErrors, NativeAttributes};

// ============================================================================
// CORE VALIDATOR TRAIT
// ============================================================================

/// The core trait that all validators must implement.
///
/// A validator inspects one input and reports a partial error record. The
/// same trait serves field validators (`Input = Value`) and group-level
/// validators (`Input` is the group or list node).
///
/// Attributed validators additionally return native-constraint
/// [`NativeAttributes`] from [`attributes`](Validate::attributes); they
/// never influence validity, only presentation.
///
/// # Examples
///
/// ```rust
/// use formtree_validator::foundation::{FieldErrors, Validate, ValidationError};
/// use formtree_validator::value::Value;
///
/// struct NotZero;
///
/// impl Validate for NotZero {
///     type Input = Value;
///
///     fn validate(&self, input: &Value) -> Result<(), FieldErrors> {
///         if input.as_f64() == Some(0.0) {
///             Err(ValidationError::new("notZero", "must not be zero").into())
///         } else {
///             Ok(())
///         }
///     }
/// }
///
/// assert!(NotZero.validate(&Value::from(1)).is_ok());
/// assert!(NotZero.validate(&Value::from(0)).is_err());
/// ```
pub trait Validate: Send + Sync {
    /// The type of input being validated.
    type Input: ?Sized;

    /// Validates the input value.
    ///
    /// * `Ok(())` if validation succeeds (or does not apply)
    /// * `Err(FieldErrors)` with the failing kinds otherwise
    fn validate(&self, input: &Self::Input) -> Result<(), FieldErrors>;

    /// Native-constraint hints declared by this validator.
    fn attributes(&self) -> Option<&NativeAttributes> {
        None
    }
}

/// A type-erased, shareable validator.
pub type SharedValidator<I> = Arc<dyn Validate<Input = I>>;

// ============================================================================
// VALIDATOR EXTENSION TRAIT
// ============================================================================

/// Extension trait providing adapters for validators.
///
/// Automatically implemented for all `'static` types that implement
/// [`Validate`].
pub trait ValidateExt: Validate + Sized + 'static {
    /// Erase the concrete type so the validator can live in a node.
    fn shared(self) -> SharedValidator<Self::Input>
    where
        Self::Input: 'static,
    {
        Arc::new(self)
    }

    /// Attach native-constraint attributes, replacing any the validator
    /// declared itself.
    fn with_attributes(self, attributes: NativeAttributes) -> Attributed<Self> {
        Attributed::new(attributes, self)
    }
}

impl<T: Validate + 'static> ValidateExt for T {}

// ============================================================================
// ADAPTERS
// ============================================================================

/// A plain validator built from a closure. See [`from_fn`].
pub struct FnValidator<I: ?Sized, F> {
    f: F,
    _input: PhantomData<fn(&I)>,
}

impl<I: ?Sized, F> Validate for FnValidator<I, F>
where
    F: Fn(&I) -> Result<(), FieldErrors> + Send + Sync,
{
    type Input = I;

    fn validate(&self, input: &I) -> Result<(), FieldErrors> {
        (self.f)(input)
    }
}

impl<I: ?Sized, F> fmt::Debug for FnValidator<I, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnValidator").finish_non_exhaustive()
    }
}

/// Wrap a closure as a plain validator.
///
/// # Examples
///
/// ```rust
/// use formtree_validator::foundation::{from_fn, Validate, ValidationError};
/// use formtree_validator::value::Value;
///
/// let even = from_fn(|v: &Value| match v.as_f64() {
///     Some(n) if n % 2.0 != 0.0 => Err(ValidationError::new("even", "must be even").into()),
///     _ => Ok(()),
/// });
/// assert!(even.validate(&Value::from(4)).is_ok());
/// assert!(even.validate(&Value::from(3)).is_err());
/// ```
pub fn from_fn<I: ?Sized, F>(f: F) -> FnValidator<I, F>
where
    F: Fn(&I) -> Result<(), FieldErrors> + Send + Sync,
{
    FnValidator {
        f,
        _input: PhantomData,
    }
}

/// A validator carrying a fixed set of native-constraint attributes.
#[derive(Debug, Clone)]
pub struct Attributed<V> {
    attributes: NativeAttributes,
    inner: V,
}

impl<V> Attributed<V> {
    /// Pair `attributes` with the check performed by `inner`.
    pub fn new(attributes: NativeAttributes, inner: V) -> Self {
        Self { attributes, inner }
    }

    /// The wrapped validator.
    pub fn inner(&self) -> &V {
        &self.inner
    }
}

impl<V: Validate> Validate for Attributed<V> {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), FieldErrors> {
        self.inner.validate(input)
    }

    fn attributes(&self) -> Option<&NativeAttributes> {
        Some(&self.attributes)
    }
}

// ============================================================================
// RUNNING VALIDATOR LISTS
// ============================================================================

/// Run every validator in order and merge their records.
///
/// Later validators overwrite earlier ones on shared kinds. Returns `None`
/// when nothing failed.
pub fn run_all<I: ?Sized>(validators: &[SharedValidator<I>], input: &I) -> Option<FieldErrors> {
    let mut errors = FieldErrors::new();

    for validator in validators {
        if let Err(failed) = validator.validate(input) {
            errors.merge(failed);
        }
    }

    errors.into_option()
}

/// Merge the attributes of every attributed validator, last-write-wins per
/// key.
pub fn attributes_of<I: ?Sized>(validators: &[SharedValidator<I>]) -> NativeAttributes {
    let mut attrs = NativeAttributes::default();

    for declared in validators.iter().filter_map(|v| v.attributes()) {
        attrs.merge(declared);
    }

    attrs
}

// ============================================================================
// TESTS
// ============================================================================
