//! Strongly typed, zero-cost identifier wrappers.
//!
//! Buses, stops and drivers are addressed by slot index.  The inner integer
//! is `pub` so a wrapper can be built straight from a loop counter, but
//! callers should prefer `.index()` when indexing a `Vec`.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) => $label:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $label, self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Bus slot.  Displayed with the fleet-number prefix used on the route.
    pub struct BusId(u16) => "bus-";
}

typed_id! {
    /// Position of a stop on the circular route.
    pub struct StopId(u16) => "stop-";
}

typed_id! {
    /// Driver identifier, unique within one shift assignment.
    pub struct DriverId(u16) => "driver-";
}
