//! Macros for ergonomic state machine construction.

/// Declare a fieldless enum and implement [`StateKey`](crate::core::StateKey) for it.
///
/// The generated enum derives everything a key needs (`Copy`, `Eq`, `Hash`,
/// serde). Each variant's name is its identifier.
///
/// # Example
///
/// ```
/// use rehab_escape::core::StateKey;
/// use rehab_escape::state_key;
///
/// state_key! {
///     pub enum Puzzle {
///         Hidden,
///         Active,
///         Done,
///     }
///     final: [Done]
/// }
///
/// assert_eq!(Puzzle::Active.name(), "Active");
/// assert!(Puzzle::Done.is_final());
/// ```
#[macro_export]
macro_rules! state_key {
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
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::StateKey for $name {
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
