//! `define_port_error!`: failure enums for ports and their adapters.
//!
//! Every variant carries named fields and a `thiserror` message. The macro
//! adds one snake_case constructor per variant whose arguments accept
//! anything convertible into the field types, so adapters can write
//! `UserDirectoryError::query(err.to_string())` or `::query("boom")`.

macro_rules! define_port_error {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),+ $(,)? } => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field: $ty),+ },
            )+
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = concat!("Build a [`", stringify!($name), "::", stringify!($variant), "`].")]
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                        Self::$variant { $($field: $field.into()),+ }
                    }
                }
            )+
        }
    };
}

pub(crate) use define_port_error;
