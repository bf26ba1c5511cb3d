/// A mixed-radix counter over a box of `dims`, tracking the flat pointer of its index.
///
/// The first axis varies fastest. The counter holds no dims or strides of its own, so the same
/// state can be stepped against any synthetic geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Odometer {
    Ready { index: Vec<usize>, pointer: usize },
    Exhausted,
}

impl Odometer {
    /// The counter at index zero, or [`Odometer::Exhausted`] if the box holds no element.
    pub fn start(dims: &[usize], offset: usize) -> Self {
        match dims.contains(&0) {
            true => Self::Exhausted,
            false => Self::Ready {
                index: vec![0; dims.len()],
                pointer: offset,
            },
        }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    #[inline]
    pub fn pointer(&self) -> Option<usize> {
        match self {
            Self::Ready { pointer, .. } => Some(*pointer),
            Self::Exhausted => None,
        }
    }

    /// Advances by one element.
    ///
    /// An axis that overflows resets to 0, takes its whole span back off the pointer and
    /// carries into the next axis. Overflowing the last axis exhausts the counter.
    pub fn step(self, dims: &[usize], strides: &[usize]) -> Self {
        debug_assert_eq!(dims.len(), strides.len());
        let Self::Ready {
            mut index,
            mut pointer,
        } = self
        else {
            return Self::Exhausted;
        };
        for axis in 0..dims.len() {
            index[axis] += 1;
            if index[axis] < dims[axis] {
                pointer += strides[axis];
                return Self::Ready { index, pointer };
            }
            index[axis] = 0;
            pointer -= (dims[axis] - 1) * strides[axis];
        }
        Self::Exhausted
    }
}
