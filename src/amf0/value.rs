//! The AMF0 value grammar.

/// AMF0 marker bytes for the subset of the grammar this codec supports.
///
/// Defined by:
/// - AMF0 spec, section 2.1
pub(super) mod marker {
    pub const NUMBER: u8 = 0x00;
    pub const BOOLEAN: u8 = 0x01;
    pub const STRING: u8 = 0x02;
    pub const OBJECT: u8 = 0x03;
    pub const NULL: u8 = 0x05;
    pub const ECMA_ARRAY: u8 = 0x08;
    pub const OBJECT_END: u8 = 0x09;
    pub const STRICT_ARRAY: u8 = 0x0A;
}

/// An ordered object property list. AMF0 object and ECMA array values preserve the wire order
/// of their keys, which matters to clients that read positionally rather than by key.
pub type Amf0Object = Vec<(String, Amf0Value)>;

/// A decoded or to-be-encoded AMF0 value.
///
/// Defined by:
/// - AMF0 spec, section 2.1-2.10 (the subset listed in the module docs)
#[derive(Debug, Clone, PartialEq)]
pub enum Amf0Value {
    /// An IEEE-754 double. AMF0 has no separate integer type; transaction ids and stream ids
    /// are always encoded this way.
    Number(f64),
    /// A boolean.
    Boolean(bool),
    /// A UTF-8 string.
    String(String),
    /// An anonymous object: an ordered list of key/value pairs terminated on the wire by the
    /// `0x00 0x00 0x09` sentinel.
    Object(Amf0Object),
    /// The `null` value.
    Null,
    /// An ECMA array: like [`Amf0Value::Object`] but prefixed on the wire by an (informational,
    /// not authoritative) element count.
    EcmaArray(Amf0Object),
    /// A strict (dense, non-associative) array.
    StrictArray(Vec<Amf0Value>),
}

impl Amf0Value {
    /// A human-readable name for the value's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "Number",
            Self::Boolean(_) => "Boolean",
            Self::String(_) => "String",
            Self::Object(_) => "Object",
            Self::Null => "Null",
            Self::EcmaArray(_) => "EcmaArray",
            Self::StrictArray(_) => "StrictArray",
        }
    }

    /// Returns the string value, if this is a [`Amf0Value::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the number value, if this is a [`Amf0Value::Number`].
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns a reference to the object's properties, for [`Amf0Value::Object`] and
    /// [`Amf0Value::EcmaArray`] alike (ECMA arrays are, property-wise, objects with a count
    /// hint).
    pub fn as_object(&self) -> Option<&[(String, Amf0Value)]> {
        match self {
            Self::Object(props) | Self::EcmaArray(props) => Some(props),
            _ => None,
        }
    }

    /// Looks up a key in an object's property list, if this value is an object/ECMA array.
    pub fn get(&self, key: &str) -> Option<&Amf0Value> {
        self.as_object()?.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

impl From<f64> for Amf0Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for Amf0Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<String> for Amf0Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Amf0Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}
