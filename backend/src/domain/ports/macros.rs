//! Defines a helper macro for generating driven-port error enums.
//!
//! Every variant carries a single `message` diagnostic. The macro emits the
//! `thiserror` derive, a snake-case constructor per variant accepting
//! `impl Into<String>`, and a `message()` accessor.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $display:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($display)]
                $variant {
                    /// Adapter diagnostic.
                    message: String,
                },
            )+
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = concat!("Construct the `", stringify!($variant), "` variant.")]
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant {
                            message: message.into(),
                        }
                    }
                }
            )+

            /// Adapter diagnostic carried by any variant.
            #[must_use]
            pub fn message(&self) -> &str {
                match self {
                    $(Self::$variant { message })|+ => message.as_str(),
                }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum ExamplePortError {
            Connection => "connection failed: {message}",
            ForeignKey => "dangling reference: {message}",
        }
    }

    #[test]
    fn constructors_accept_str() {
        let err = ExamplePortError::connection("refused");
        assert_eq!(err.to_string(), "connection failed: refused");
    }

    #[test]
    fn snake_case_constructor_for_multi_word_variant() {
        let err = ExamplePortError::foreign_key("registrant 9");
        assert!(matches!(err, ExamplePortError::ForeignKey { .. }));
        assert_eq!(err.message(), "registrant 9");
    }
}
