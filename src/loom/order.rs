use derive_more::Display;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::layout::StrideLayout;

/// Traversal policy deciding which axis varies fastest.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Order {
    /// Row-major: the last axis varies fastest.
    C,
    /// Column-major: the first axis varies fastest.
    F,
    /// Whichever of C or F is fastest for the actual strides of a layout.
    A,
    /// The configured policy of the engine the tensor came from.
    #[default]
    Default,
}

impl Order {
    /// Returns `true` for [`Order::C`] and [`Order::F`].
    #[inline]
    pub fn is_fixed(self) -> bool {
        matches!(self, Order::C | Order::F)
    }

    /// Resolves into [`Order::C`] or [`Order::F`].
    ///
    /// `A` looks at the layout: a C-dense layout gives C, an F-dense one gives F; otherwise
    /// the order whose innermost axis has unit stride wins, C by convention.
    /// `Default` gives `default`, which itself falls back to C unless it is F.
    pub fn resolve(self, layout: &StrideLayout, default: Order) -> Order {
        match self {
            Order::C | Order::F => self,
            Order::Default => default.fixed_or_c(),
            Order::A => {
                if layout.rank() < 2 || layout.is_c_dense() {
                    Order::C
                } else if layout.is_f_dense() {
                    Order::F
                } else if layout.stride(layout.rank() - 1) == 1 {
                    Order::C
                } else if layout.stride(0) == 1 {
                    Order::F
                } else {
                    Order::C
                }
            }
        }
    }

    /// Resolves without a layout to inspect, as for a freshly allocated buffer.
    #[inline]
    pub fn resolve_fresh(self, default: Order) -> Order {
        match self {
            Order::C | Order::F => self,
            Order::Default => default.fixed_or_c(),
            Order::A => Order::C,
        }
    }

    #[inline]
    fn fixed_or_c(self) -> Order {
        match self {
            Order::F => Order::F,
            _ => Order::C,
        }
    }
}
