//! Names used to address Jenkins resources.

use serde::{Deserialize, Serialize};
use std::{borrow::Borrow, fmt};

macro_rules! name_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }

        impl From<&String> for $name {
            fn from(value: &String) -> Self {
                Self::new(value.as_str())
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

name_type! {
    /// A Jenkins job name, used verbatim in the request path.
    ///
    /// Jobs inside folders are addressed by spelling out the separators yourself:
    /// `JobName::new("team/job/app")` requests `/job/team/job/app/...`.
    JobName
}

name_type! {
    /// A Jenkins view name.
    ViewName
}

name_type! {
    /// A Jenkins user id (owner of a personal "my views" view).
    UserId
}
