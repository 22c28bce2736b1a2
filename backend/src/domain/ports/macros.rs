//! `define_port_error!`: declares a `thiserror` enum for a driven port along
//! with one snake_case constructor per variant.
//!
//! ```ignore
//! define_port_error! {
//!     pub enum StoreError {
//!         Read { message: String } => "read failed: {message}",
//!     }
//! }
//! let err = StoreError::read("disk gone");
//! ```

macro_rules! define_port_error {
    (@ctor $variant:ident ($($params:tt)*) ($($inits:tt)*)) => {
        ::paste::paste! {
            #[doc = concat!("Build a [`Self::", stringify!($variant), "`] error.")]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field : $ty),* },
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant () () $($field : $ty,)*);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum SampleStoreError {
            Read { message: String } => "read failed: {message}",
            Sized { path: String, bytes: u64 } => "{path} has {bytes} bytes",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = SampleStoreError::read("disk gone");
        assert_eq!(err.to_string(), "read failed: disk gone");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = SampleStoreError::sized("books.json", 42_u64);
        assert_eq!(err.to_string(), "books.json has 42 bytes");
    }
}
