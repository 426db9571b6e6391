//! Macros that turn plain enums into machine alphabets.

/// Generate a `State` implementation for a fieldless enum.
///
/// The enum gets `Clone, Copy, PartialEq, Eq, Hash, Debug` derived and a
/// `name()` equal to the variant identifier.
///
/// # Example
///
/// ```
/// use switchyard::core::State;
/// use switchyard::state_enum;
///
/// state_enum! {
///     pub enum TransferState {
///         Start,
///         Confirm,
///         Complete,
///     }
///     final: [Complete]
/// }
///
/// assert_eq!(TransferState::Confirm.name(), "Confirm");
/// assert!(TransferState::Complete.is_final());
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
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            #[allow(unreachable_patterns)]
            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    _ => false,
                }
            }
        }
    };
}

/// Generate an `Event` implementation for a fieldless enum.
///
/// # Example
///
/// ```
/// use switchyard::core::Event;
/// use switchyard::event_enum;
///
/// event_enum! {
///     pub enum TransferEvent {
///         AmountSet,
///         Confirmed,
///     }
/// }
///
/// assert_eq!(TransferEvent::AmountSet.name(), "AmountSet");
/// assert!(TransferEvent::Confirmed.payload().is_none());
/// ```
#[macro_export]
macro_rules! event_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Event for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
