//! Helper macro for port error enums whose variants carry a message.
//!
//! Each `Variant => "prefix"` line becomes `Variant { message: String }`
//! displayed as `prefix: message`, with a snake_case constructor taking
//! `impl Into<String>`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $prefix:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error("{}: {}", $prefix, .message)]
                $variant { message: String },
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant { message: message.into() }
                    }
                }
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    define_port_error! {
        pub enum SamplePortError {
            Offline => "adapter offline",
            TimedOut => "adapter timed out",
        }
    }

    #[rstest]
    fn constructors_are_snake_case_and_accept_str() {
        let err = SamplePortError::timed_out("after 5s");
        assert_eq!(err, SamplePortError::TimedOut { message: "after 5s".to_owned() });
        assert_eq!(err.to_string(), "adapter timed out: after 5s");
    }

    #[rstest]
    #[case(SamplePortError::offline("no route"), "adapter offline: no route")]
    #[case(SamplePortError::offline(String::from("slow")), "adapter offline: slow")]
    fn owned_and_borrowed_messages_display_alike(
        #[case] err: SamplePortError,
        #[case] expected: &str,
    ) {
        assert_eq!(err.to_string(), expected);
    }
}
