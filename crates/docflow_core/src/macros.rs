//! Declarative helpers shared across model and query types.

/// Generates a closed string-backed enum with `as_str`, `ALL`, `Display` and
/// case-insensitive `FromStr`.
///
/// The serde representation uses the same literal as `as_str`, so wire values,
/// CLI arguments and log fields never disagree.
macro_rules! str_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $s:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $s)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Stable string id used on the wire and in logs.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::model::ParseEnumError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let normalized = value.trim().to_lowercase();
                match normalized.as_str() {
                    $($s => Ok(Self::$variant),)+
                    _ => Err($crate::model::ParseEnumError {
                        field: stringify!($name),
                        value: value.to_string(),
                    }),
                }
            }
        }
    };
}
