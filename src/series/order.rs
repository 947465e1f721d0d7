/// Iteration direction of a [`SelectiveSeries`](super::SelectiveSeries).
///
/// Fixed for the lifetime of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Order {
    /// Oldest sample first (ascending timestamps).
    #[default]
    Forward,
    /// Newest sample first (descending timestamps).
    Reverse,
}

impl Order {
    #[inline]
    pub fn is_reverse(self) -> bool {
        matches!(self, Order::Reverse)
    }

    /// Returns `true` if a sample stamped `earlier` may precede one stamped
    /// `later` in this direction.
    #[inline]
    pub(crate) fn precedes<T: Ord>(self, earlier: &T, later: &T) -> bool {
        match self {
            Order::Forward => earlier <= later,
            Order::Reverse => earlier >= later,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_forward() {
        assert_eq!(Order::default(), Order::Forward);
        assert!(!Order::Forward.is_reverse());
        assert!(Order::Reverse.is_reverse());
    }

    #[test]
    fn precedes_allows_ties() {
        assert!(Order::Forward.precedes(&1, &2));
        assert!(Order::Forward.precedes(&2, &2));
        assert!(!Order::Forward.precedes(&3, &2));
        assert!(Order::Reverse.precedes(&3, &2));
        assert!(Order::Reverse.precedes(&2, &2));
        assert!(!Order::Reverse.precedes(&1, &2));
    }
}
