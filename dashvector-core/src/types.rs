//! String-valued enums shared by requests and responses.
//!
//! Every enum decodes unknown strings into `Other(String)` so that a
//! server adding a new status or metric never breaks response decoding.
//! An empty `Other` doubles as "unset" and is omitted from request bodies.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A value not known to this client, kept verbatim.
            Other(String),
        }

        impl $name {
            /// Returns the wire representation.
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $wire, )+
                    Self::Other(value) => value.as_str(),
                }
            }

            /// True for the empty default, which request encoders omit.
            pub fn is_unset(&self) -> bool {
                matches!(self, Self::Other(value) if value.is_empty())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::Other(String::new())
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                match value {
                    $( $wire => Self::$variant, )+
                    other => Self::Other(other.to_string()),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
                Ok(Self::from(value.as_str()))
            }
        }
    };
}

wire_enum! {
    /// Primitive element type of a dense vector.
    DataType {
        Float => "FLOAT",
        Int => "INT",
    }
}

wire_enum! {
    /// Similarity metric used by a collection or named vector.
    Metric {
        Euclidean => "euclidean",
        DotProduct => "dotproduct",
        Cosine => "cosine",
    }
}

wire_enum! {
    /// Type of a scalar field declared in a collection schema.
    FieldType {
        Bool => "BOOL",
        String => "STRING",
        Int => "INT",
        Float => "FLOAT",
    }
}

wire_enum! {
    /// Vector quantization applied by the server.
    QuantizeType {
        Int8 => "DT_VECTOR_INT8",
    }
}

wire_enum! {
    /// Lifecycle state of a collection or partition.
    Status {
        Initialized => "INITIALIZED",
        Serving => "SERVING",
        Dropping => "DROPPING",
        Error => "ERROR",
    }
}

wire_enum! {
    /// Operation the server actually applied to a document.
    DocOp {
        Insert => "insert",
        Update => "update",
        Upsert => "upsert",
        Delete => "delete",
    }
}
