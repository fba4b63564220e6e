//! Interned string names.
//!
//! Materials and professions are both identified by a shared `Arc<str>`
//! name. `interned_name!` declares such a newtype together with its
//! constructors, `Borrow<str>` for `&str` map lookups, `Display`, and serde
//! impls that read and write a plain string (so the name can be a JSON map
//! key).

macro_rules! interned_name {
    ($(#[$meta:meta])* $vis:vis struct $name:ident;) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
        $vis struct $name(std::sync::Arc<str>);

        impl $name {
            #[doc = concat!("Create a new `", stringify!($name), "` from a string slice.")]
            #[allow(clippy::should_implement_trait)]
            pub fn from_str(s: &str) -> Self {
                Self(std::sync::Arc::from(s))
            }

            /// Get the name as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::from_str(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(std::sync::Arc::from(s))
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.pad(&self.0)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                <String as serde::Deserialize>::deserialize(deserializer).map(Self::from)
            }
        }
    };
}

pub(crate) use interned_name;
