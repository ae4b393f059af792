//! Macros for creating validators with minimal boilerplate.
//!
//! [`validator!`] creates a complete validator: struct, `Validate` impl,
//! constructor and factory fn.
//!
//! # Examples
//!
//! ```rust
//! use formtree_validator::validator;
//! use formtree_validator::foundation::{Validate, ValidationError};
//! use formtree_validator::value::Value;
//!
//! // Unit validator (no fields)
//! validator! {
//!     pub NotNull for Value;
//!     rule(input) { !matches!(input, Value::Null) }
//!     error(input) { ValidationError::new("notNull", "must not be null") }
//!     fn not_null();
//! }
//!
//! // Struct with fields
//! validator! {
//!     #[derive(Copy, PartialEq)]
//!     pub AtLeast { min: f64 } for Value;
//!     rule(self, input) { input.as_f64().is_none_or(|n| n >= self.min) }
//!     error(self, input) { ValidationError::min(self.min, input.as_f64().unwrap_or_default()) }
//!     fn at_least(min: f64);
//! }
//!
//! assert!(not_null().validate(&Value::Null).is_err());
//! assert!(at_least(3.0).validate(&Value::from(2)).is_err());
//! ```

// ============================================================================
// VALIDATOR MACRO
// ============================================================================

/// Creates a complete validator: struct definition, `Validate` implementation,
/// constructor, and factory function.
///
/// `#[derive(Debug, Clone)]` is always applied. Add extra derives via `#[derive(...)]`.
///
/// The `error` block may evaluate to a [`ValidationError`] or a whole
/// [`FieldErrors`] record; either is converted into the outcome.
///
/// Struct validators accept an optional `attributes(self) { ... }` clause
/// after `error`, returning `Option<&NativeAttributes>`. It becomes the
/// validator's [`attributes`](crate::foundation::Validate::attributes).
///
/// # Variants
///
/// **Unit validator** (zero-sized, no fields):
/// ```rust,ignore
/// validator! {
///     pub NotNull for Value;
///     rule(input) { !matches!(input, Value::Null) }
///     error(input) { ValidationError::new("notNull", "null") }
///     fn not_null();
/// }
/// ```
///
/// **Struct with fields** (auto `new` from all fields):
/// ```rust,ignore
/// validator! {
///     pub AtLeast { min: f64 } for Value;
///     rule(self, input) { input.as_f64().is_none_or(|n| n >= self.min) }
///     error(self, input) { ValidationError::new("min", "too small") }
///     fn at_least(min: f64);
/// }
/// ```
///
/// **Custom constructor** (overrides auto `new`), here with attributes:
/// ```rust,ignore
/// validator! {
///     pub Flagged { attributes: NativeAttributes } for Value;
///     rule(self, input) { true }
///     error(self, input) { ValidationError::new("flagged", "unreachable") }
///     attributes(self) { Some(&self.attributes) }
///     new() { Self { attributes: NativeAttributes::new().with_required(true) } }
///     fn flagged();
/// }
/// ```
///
/// **Fallible constructor** (the type after `->` is the error type):
/// ```rust,ignore
/// validator! {
///     pub Matches { re: regex::Regex } for Value;
///     rule(self, input) { input.as_str().is_none_or(|s| self.re.is_match(s)) }
///     error(self, input) { ValidationError::pattern(self.re.as_str().to_owned()) }
///     new(source: &str) -> regex::Error { Ok(Self { re: regex::Regex::new(source)? }) }
///     fn matches(source: &str) -> regex::Error;
/// }
/// ```
///
/// [`ValidationError`]: crate::foundation::ValidationError
/// [`FieldErrors`]: crate::foundation::FieldErrors
#[macro_export]
macro_rules! validator {
    // ── Internal: the Validate impl shared by every variant ─────────────
    (
        @impl $name:ident for $input:ty;
        rule($self_:ident, $inp:ident) $rule:block
        error($einp:ident) $err:block
        $(attributes($aself:ident) $attrs:block)?
    ) => {
        impl $crate::foundation::Validate for $name {
            type Input = $input;

            #[allow(unused_variables)]
            fn validate(
                &$self_,
                $inp: &Self::Input,
            ) -> ::std::result::Result<(), $crate::foundation::FieldErrors> {
                if $rule {
                    Ok(())
                } else {
                    let $einp = $inp;
                    Err(::std::convert::Into::into($err))
                }
            }

            $(
                fn attributes(&$aself) -> ::std::option::Option<&$crate::foundation::NativeAttributes>
                    $attrs
            )?
        }
    };

    // ── Variant 1a: Unit validator (no fields) + factory fn ──────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident for $input:ty;
        rule($inp:ident) $rule:block
        error($einp:ident) $err:block
        fn $factory:ident();
    ) => {
        $crate::validator! {
            $(#[$meta])*
            $vis $name for $input;
            rule($inp) $rule
            error($einp) $err
        }

        #[must_use]
        $vis const fn $factory() -> $name { $name }
    };

    // ── Variant 1b: Unit validator (no fields), no factory ───────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident for $input:ty;
        rule($inp:ident) $rule:block
        error($einp:ident) $err:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis struct $name;

        $crate::validator! {
            @impl $name for $input;
            rule(self, $inp) $rule
            error($einp) $err
        }
    };

    // ── Variant 2a: Struct with fields + custom new + factory fn ─────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        rule($self_:ident, $inp:ident) $rule:block
        error($self2:ident, $einp:ident) $err:block
        $(attributes($aself:ident) $attrs:block)?
        new($($narg:ident: $naty:ty),* $(,)?) $new_body:block
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);
    ) => {
        $crate::validator! {
            $(#[$meta])*
            $vis $name { $($field: $fty),+ } for $input;
            rule($self_, $inp) $rule
            error($self2, $einp) $err
            $(attributes($aself) $attrs)?
            new($($narg: $naty),*) $new_body
        }

        #[must_use]
        $vis fn $factory($($farg: $faty),*) -> $name {
            $name::new($($farg),*)
        }
    };

    // ── Variant 2b: Struct with fields + custom new, no factory ──────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        rule($self_:ident, $inp:ident) $rule:block
        error($self2:ident, $einp:ident) $err:block
        $(attributes($aself:ident) $attrs:block)?
        new($($narg:ident: $naty:ty),* $(,)?) $new_body:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(pub $field: $fty,)+
        }

        #[allow(clippy::new_without_default)]
        impl $name {
            #[must_use]
            pub fn new($($narg: $naty),*) -> Self $new_body
        }

        $crate::validator! {
            @impl $name for $input;
            rule($self_, $inp) $rule
            error($einp) $err
            $(attributes($aself) $attrs)?
        }
    };

    // ── Variant 2c: Struct with fields + fallible new + fallible factory ─
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        rule($self_:ident, $inp:ident) $rule:block
        error($self2:ident, $einp:ident) $err:block
        $(attributes($aself:ident) $attrs:block)?
        new($($narg:ident: $naty:ty),* $(,)?) -> $ety:ty $new_body:block
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?) -> $efty:ty;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(pub $field: $fty,)+
        }

        impl $name {
            pub fn new($($narg: $naty),*) -> ::std::result::Result<Self, $ety> $new_body
        }

        $crate::validator! {
            @impl $name for $input;
            rule($self_, $inp) $rule
            error($einp) $err
            $(attributes($aself) $attrs)?
        }

        $vis fn $factory($($farg: $faty),*) -> ::std::result::Result<$name, $efty> {
            $name::new($($farg),*)
        }
    };

    // ── Variant 3a: Struct with fields + auto new + factory fn ───────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        rule($self_:ident, $inp:ident) $rule:block
        error($self2:ident, $einp:ident) $err:block
        $(attributes($aself:ident) $attrs:block)?
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);
    ) => {
        $crate::validator! {
            $(#[$meta])*
            $vis $name { $($field: $fty),+ } for $input;
            rule($self_, $inp) $rule
            error($self2, $einp) $err
            $(attributes($aself) $attrs)?
        }

        #[must_use]
        $vis fn $factory($($farg: $faty),*) -> $name {
            $name::new($($farg),*)
        }
    };

    // ── Variant 3b: Struct with fields + auto new, no factory ────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        rule($self_:ident, $inp:ident) $rule:block
        error($self2:ident, $einp:ident) $err:block
        $(attributes($aself:ident) $attrs:block)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(pub $field: $fty,)+
        }

        impl $name {
            #[must_use]
            pub fn new($($field: $fty),+) -> Self {
                Self { $($field),+ }
            }
        }

        $crate::validator! {
            @impl $name for $input;
            rule($self_, $inp) $rule
            error($einp) $err
            $(attributes($aself) $attrs)?
        }
    };
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use crate::foundation::{FieldErrors, NativeAttributes, Validate, ValidationError};
    use crate::value::Value;

    // Test 1: Unit validator (no fields)
    validator! {
        /// A test unit validator.
        TestNotNull for Value;
        rule(input) { !input.is_nil() }
        error(input) { ValidationError::new("notNull", "must not be nil") }
        fn test_not_null();
    }

    #[test]
    fn test_unit_validator() {
        let v = TestNotNull;
        assert!(v.validate(&Value::from("hello")).is_ok());
        assert!(v.validate(&Value::Null).is_err());
        assert!(v.attributes().is_none());
    }

    #[test]
    fn test_unit_factory() {
        let v = test_not_null();
        assert!(v.validate(&Value::from(0)).is_ok());
    }

    // Test 2: Struct with fields + auto new
    validator! {
        #[derive(Copy, PartialEq)]
        TestAtLeast { min: f64 } for Value;
        rule(self, input) { input.as_f64().is_none_or(|n| n >= self.min) }
        error(self, input) {
            ValidationError::new("atLeast", format!("need at least {}", self.min))
        }
        fn test_at_least(min: f64);
    }

    #[test]
    fn test_struct_validator() {
        let v = TestAtLeast { min: 3.0 };
        assert!(v.validate(&Value::from(3)).is_ok());
        assert!(v.validate(&Value::from(2)).is_err());
    }

    #[test]
    fn test_struct_factory() {
        let v = test_at_least(5.0);
        assert!(v.validate(&Value::from(5)).is_ok());
        assert!(v.validate(&Value::from(4)).is_err());
    }

    // Test 3: Custom constructor + attributes + whole-record error
    validator! {
        TestBoth { attributes: NativeAttributes } for Value;
        rule(self, input) { !input.is_nil() }
        error(self, input) {
            FieldErrors::from(ValidationError::required()).with(ValidationError::new("nil", "nil"))
        }
        attributes(self) { Some(&self.attributes) }
        new() { Self { attributes: NativeAttributes::new().with_required(true) } }
        fn test_both();
    }

    #[test]
    fn test_attributes_clause() {
        let v = test_both();
        assert_eq!(v.attributes().map(NativeAttributes::is_required), Some(true));
    }

    #[test]
    fn test_error_block_may_return_record() {
        let errors = test_both().validate(&Value::Undefined).unwrap_err();
        assert_eq!(errors.kinds().collect::<Vec<_>>(), vec!["required", "nil"]);
    }

    // Test 4: Fallible constructor
    validator! {
        TestMatches { re: regex::Regex } for Value;
        rule(self, input) { input.as_str().is_none_or(|s| self.re.is_match(s)) }
        error(self, input) { ValidationError::pattern(self.re.as_str().to_owned()) }
        new(source: &str) -> regex::Error { Ok(Self { re: regex::Regex::new(source)? }) }
        fn test_matches(source: &str) -> regex::Error;
    }

    #[test]
    fn test_fallible_constructor() {
        assert!(test_matches("(").is_err());
        let v = test_matches("^a+$").unwrap();
        assert!(v.validate(&Value::from("aaa")).is_ok());
        assert!(v.validate(&Value::from("ab")).is_err());
    }

    // Test 5: No factory fn
    validator! {
        TestDefined for Value;
        rule(input) { !matches!(input, Value::Undefined) }
        error(input) { ValidationError::new("defined", "must be defined") }
    }

    validator! {
        TestAtMost { max: f64 } for Value;
        rule(self, input) { input.as_f64().is_none_or(|n| n <= self.max) }
        error(self, input) { ValidationError::max(self.max, input.as_f64().unwrap_or_default()) }
    }

    validator! {
        TestFlag { attributes: NativeAttributes } for Value;
        rule(self, input) { input.as_bool().unwrap_or(true) }
        error(self, input) { ValidationError::new("flag", "must be set") }
        attributes(self) { Some(&self.attributes) }
        new(required: bool) { Self { attributes: NativeAttributes::new().with_required(required) } }
    }

    #[test]
    fn test_without_factory() {
        assert!(TestDefined.validate(&Value::Undefined).is_err());
        assert!(TestDefined.validate(&Value::Null).is_ok());

        let at_most = TestAtMost::new(2.0);
        assert!(at_most.validate(&Value::from(2)).is_ok());
        assert!(at_most.validate(&Value::from(3)).unwrap_err().contains("max"));

        let flag = TestFlag::new(true);
        assert!(flag.validate(&Value::from(false)).is_err());
        assert_eq!(flag.attributes().map(NativeAttributes::is_required), Some(true));
    }
}
