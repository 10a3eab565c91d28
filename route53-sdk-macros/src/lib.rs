//! Parameter extraction for the Route53 SDK operation builders.
//!
//! Every operation reads its inputs from a builder of `Option` fields. The
//! [`extract_params!`] macro pulls them out into a typed struct, failing with
//! [`MissingParameter`] before any request is built when a required field is
//! absent or empty.

use std::fmt;

/// A required builder field had no usable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingParameter(pub &'static str);

impl fmt::Display for MissingParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is required", self.0)
    }
}

impl std::error::Error for MissingParameter {}

/// Values that can be demanded from an optional builder slot.
///
/// Empty strings and empty lists count as missing.
pub trait Required {
    type Output;

    fn require(&self, field: &'static str) -> Result<Self::Output, MissingParameter>;
}

impl Required for Option<String> {
    type Output = String;

    fn require(&self, field: &'static str) -> Result<String, MissingParameter> {
        match self.as_deref() {
            Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
            _ => Err(MissingParameter(field)),
        }
    }
}

impl<T: Clone> Required for Option<Vec<T>> {
    type Output = Vec<T>;

    fn require(&self, field: &'static str) -> Result<Vec<T>, MissingParameter> {
        match self {
            Some(v) if !v.is_empty() => Ok(v.clone()),
            _ => Err(MissingParameter(field)),
        }
    }
}

macro_rules! impl_required_copy {
    ($($ty:ty),*) => {
        $(
            impl Required for Option<$ty> {
                type Output = $ty;

                fn require(&self, field: &'static str) -> Result<$ty, MissingParameter> {
                    self.ok_or(MissingParameter(field))
                }
            }
        )*
    };
}

impl_required_copy!(u32, u64, bool);

#[macro_export]
/// The `extract_params!` macro reads fields from a builder and generates a struct instance holding them.
///
/// This macro supports:
/// - `required` fields: must be present (and non-empty), otherwise the enclosing
///   function returns early with a [`MissingParameter`] converted through `?`
/// - `optional` fields: copied as `Option<T>`
/// - `default` fields: copied as `T`, falling back to the given value
///
/// # Usage
///
/// ```rust
/// use route53_sdk_macros::{extract_params, MissingParameter};
///
/// #[derive(Default)]
/// struct Builder {
///     name: Option<String>,
///     comment: Option<String>,
///     max_items: Option<u32>,
/// }
///
/// fn run(builder: &Builder) -> Result<(), MissingParameter> {
///     let params = extract_params!(builder, Params, {
///         required name: String;
///         optional comment: String;
///         default max_items: u32 = 100u32;
///     });
///     assert_eq!(params.max_items, 100);
///     assert!(params.comment.is_none());
///     assert_eq!(params.name, "example.com");
///     Ok(())
/// }
///
/// let builder = Builder { name: Some("example.com".into()), ..Default::default() };
/// run(&builder).unwrap();
/// assert!(run(&Builder::default()).is_err());
/// ```
///
/// Every entry ends with `;`. Groups must appear in the order `required`,
/// `optional`, `default`, and each group may be empty.
macro_rules! extract_params {
    (
        $builder:expr,
        $struct_name:ident,
        {
            $( required $req_field:ident : $req_ty:ty ; )*
            $( optional $opt_field:ident : $opt_ty:ty ; )*
            $( default $def_field:ident : $def_ty:ty = $def_val:expr ; )*
        }
    ) => {{
        #[derive(Debug, Clone)]
        #[allow(dead_code)]
        struct $struct_name {
            $( $req_field: $req_ty, )*
            $( $opt_field: Option<$opt_ty>, )*
            $( $def_field: $def_ty, )*
        }

        $struct_name {
            $(
                $req_field: $crate::Required::require(&$builder.$req_field, stringify!($req_field))?,
            )*
            $(
                $opt_field: $builder.$opt_field.clone(),
            )*
            $(
                $def_field: $builder.$def_field.clone().unwrap_or_else(|| $def_val.into()),
            )*
        }
    }};
}
