//! Leveled assertion macros. The check level is fixed at compile time;
//! levels above the configured one compile to nothing.

#[cfg(all(not(test), not(feature = "debug-checks")))]
pub const XOR_ASSERT_LEVEL_DEFINITION: u8 = XOR_ASSERT_SIMPLE;

#[cfg(any(test, feature = "debug-checks"))]
pub const XOR_ASSERT_LEVEL_DEFINITION: u8 = XOR_ASSERT_MODERATE;

pub const XOR_ASSERT_SIMPLE: u8 = 1;
pub const XOR_ASSERT_MODERATE: u8 = 2;
pub const XOR_ASSERT_ADVANCED: u8 = 3;

#[macro_export]
#[doc(hidden)]
macro_rules! xor_assert_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::XOR_ASSERT_LEVEL_DEFINITION >= $crate::asserts::XOR_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! xor_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::XOR_ASSERT_LEVEL_DEFINITION >= $crate::asserts::XOR_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! xor_assert_advanced {
    ($($arg:tt)*) => {
        if $crate::asserts::XOR_ASSERT_LEVEL_DEFINITION >= $crate::asserts::XOR_ASSERT_ADVANCED {
            assert!($($arg)*);
        }
    };
}
