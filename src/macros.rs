//! Internal macros.

/// Calculate the number of limbs required to represent the given number of
/// bits on this platform.
macro_rules! nlimbs {
    ($bits:expr) => {
        $bits / crate::limb::Limb::BITS as usize
    };
}
