//! `define_port_error!`: declares a port error enum together with one
//! snake_case constructor per variant.
//!
//! Struct-variant constructors take each field as `impl Into<FieldType>`, so
//! call sites can pass `&str` for `String` fields. Unit variants get a
//! zero-argument constructor.

macro_rules! define_port_error {
    (@constructor $variant:ident) => {
        ::paste::paste! {
            /// Construct the variant this constructor is named after.
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@constructor $variant:ident { $($field:ident : $ty:ty),* }) => {
        ::paste::paste! {
            /// Construct the variant this constructor is named after.
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };

    (
        $(#[$enum_meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
                $( {
                    $(
                        $(#[$field_meta:meta])*
                        $field:ident : $ty:ty
                    ),* $(,)?
                } )?
                => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $( $(#[$field_meta])* $field : $ty ),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@constructor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Constructor generation for each variant shape.
    use rstest::rstest;

    define_port_error! {
        pub enum UpstreamError {
            Unreachable { message: String } => "unreachable: {message}",
            Refused {
                /// Status returned by the upstream.
                status: u16,
                /// Body preview.
                message: String,
            } => "refused with {status}: {message}",
            Exhausted => "retries exhausted",
        }
    }

    #[rstest]
    fn string_fields_accept_borrowed_text() {
        let error = UpstreamError::unreachable("dns lookup failed");
        assert_eq!(
            error,
            UpstreamError::Unreachable {
                message: "dns lookup failed".to_owned()
            }
        );
        assert_eq!(error.to_string(), "unreachable: dns lookup failed");
    }

    #[rstest]
    fn mixed_fields_keep_their_order() {
        let error = UpstreamError::refused(503_u16, String::from("busy"));
        assert_eq!(error.to_string(), "refused with 503: busy");
    }

    #[rstest]
    fn unit_variants_take_no_arguments() {
        assert_eq!(UpstreamError::exhausted(), UpstreamError::Exhausted);
        assert_eq!(UpstreamError::exhausted().to_string(), "retries exhausted");
    }
}
