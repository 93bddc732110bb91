/// Defines a sequential record identifier over `i64`.
///
/// Generates the derives needed for map keys and JSON (`#[serde(transparent)]`),
/// `Display`, conversions to and from `i64`, and a `next()` successor used by
/// in-memory stores that hand out ids themselves.
///
/// Usage:
///   define_record_id!(VisitId, "Visit record identifier.");
#[macro_export]
macro_rules! define_record_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(
            Debug,
            Copy,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::write!(f, "{}", self.0)
            }
        }

        impl ::std::convert::From<i64> for $name {
            fn from(v: i64) -> Self {
                $name(v)
            }
        }

        impl ::std::convert::From<$name> for i64 {
            fn from(v: $name) -> Self {
                v.0
            }
        }

        impl $name {
            pub const FIRST: $name = $name(1);

            pub fn new(value: i64) -> Self {
                $name(value)
            }

            pub fn value(&self) -> i64 {
                self.0
            }

            /// The id allocated after this one.
            pub fn next(&self) -> Self {
                $name(self.0.saturating_add(1))
            }
        }
    };
}
