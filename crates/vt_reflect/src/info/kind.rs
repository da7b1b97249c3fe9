use core::{error, fmt};

/// An enumeration of the "kinds" of a reflected type.
///
/// Each kind corresponds to a specific reflection trait,
/// except `Opaque`, which is accessed as a whole.
///
/// - `Struct`: [`Struct`](crate::ops::Struct)
/// - `List`: [`List`](crate::ops::List)
/// - `Indirection`: [`Indirection`](crate::ops::Indirection)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    Opaque,
    Struct,
    List,
    Indirection,
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Opaque => f.pad("Opaque"),
            Self::Struct => f.pad("Struct"),
            Self::List => f.pad("List"),
            Self::Indirection => f.pad("Indirection"),
        }
    }
}

/// Error returned when a reflected value is not the expected [`ReflectKind`].
#[derive(Debug)]
pub struct ReflectKindError {
    pub expected: ReflectKind,
    pub received: ReflectKind,
}

impl fmt::Display for ReflectKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "reflect kind mismatch: expected {}, received {}",
            self.expected, self.received
        )
    }
}

impl error::Error for ReflectKindError {}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::{ReflectKind, ReflectKindError};

    #[test]
    fn display() {
        assert_eq!(format!("{}", ReflectKind::Indirection), "Indirection");
        assert_eq!(format!("{:>8}", ReflectKind::List), "    List");

        let err = ReflectKindError {
            expected: ReflectKind::Struct,
            received: ReflectKind::Opaque,
        };
        assert_eq!(
            format!("{err}"),
            "reflect kind mismatch: expected Struct, received Opaque"
        );
    }
}
