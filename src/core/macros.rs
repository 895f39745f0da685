//! Macro for declaring lifecycle enums.

/// Declare a unit-variant enum and implement [`State`](crate::core::State)
/// for it.
///
/// Besides the `State` methods, the generated type gets an `ALL` constant
/// listing every variant in declaration order.
///
/// # Example
///
/// ```
/// use vitrine::core::State;
/// use vitrine::state_enum;
///
/// state_enum! {
///     pub enum Toast {
///         Hidden,
///         Shown,
///         Dismissed,
///     }
///     final: [Dismissed]
/// }
///
/// assert_eq!(Toast::Shown.name(), "Shown");
/// assert!(Toast::Dismissed.is_final());
/// assert_eq!(Toast::ALL.len(), 3);
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    _ => false,
                }
            }
        }
    };
}
