//! Leveled assertions for the internal invariants of the search algorithms.
//!
//! The cheap checks (e.g. that a result lies within its candidate set) are always on. The
//! expensive ones, such as asking the oracle again whether a returned conflict is inconsistent,
//! only run at the moderate or advanced level, which is enabled for tests and with the
//! `debug-checks` feature.

#[cfg(all(not(test), not(feature = "debug-checks")))]
pub const FASTDIAG_ASSERT_LEVEL_DEFINITION: u8 = FASTDIAG_ASSERT_SIMPLE;

#[cfg(any(test, feature = "debug-checks"))]
pub const FASTDIAG_ASSERT_LEVEL_DEFINITION: u8 = FASTDIAG_ASSERT_ADVANCED;

pub const FASTDIAG_ASSERT_SIMPLE: u8 = 1;
pub const FASTDIAG_ASSERT_MODERATE: u8 = 2;
pub const FASTDIAG_ASSERT_ADVANCED: u8 = 3;

#[macro_export]
#[doc(hidden)]
macro_rules! fastdiag_assert_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::FASTDIAG_ASSERT_LEVEL_DEFINITION >= $crate::asserts::FASTDIAG_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! fastdiag_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::FASTDIAG_ASSERT_LEVEL_DEFINITION >= $crate::asserts::FASTDIAG_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! fastdiag_assert_advanced {
    ($($arg:tt)*) => {
        if $crate::asserts::FASTDIAG_ASSERT_LEVEL_DEFINITION >= $crate::asserts::FASTDIAG_ASSERT_ADVANCED {
            assert!($($arg)*);
        }
    };
}
