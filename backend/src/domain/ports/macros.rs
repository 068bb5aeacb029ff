//! `define_port_error!` declares a port failure enum and one constructor per
//! variant.
//!
//! Each variant carries its display text after `=>`. Constructors take the
//! variant name in snake case and accept `impl Into<_>` for every field, so
//! adapters can pass `&str` where the variant stores `String`:
//!
//! ```ignore
//! define_port_error! {
//!     pub enum LookupError {
//!         Timeout { message: String } => "lookup timed out: {message}",
//!         Missing => "nothing stored under that key",
//!     }
//! }
//! assert_eq!(LookupError::timeout("5s"), LookupError::Timeout { message: "5s".into() });
//! assert_eq!(LookupError::missing(), LookupError::Missing);
//! ```

macro_rules! define_port_error {
    (
        $(#[$enum_attr:meta])*
        pub enum $name:ident {
            $(
                $(#[$attr:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $display:expr
            ),* $(,)?
        }
    ) => {
        $(#[$enum_attr])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$attr])*
                #[error($display)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        // Brace syntax builds unit variants too, so one template covers both.
        ::paste::paste! {
            impl $name {
                $(
                    pub fn [<$variant:snake>]( $( $( $field: impl Into<$ty> ),* )? ) -> Self {
                        Self::$variant { $( $( $field: $field.into() ),* )? }
                    }
                )*
            }
        }
    };
}

pub(crate) use define_port_error;
