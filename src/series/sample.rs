/// One retained observation: a value, when it was observed, and how good it
/// is (0 = best, larger = worse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sample<V, T, S> {
    pub value: V,
    pub timestamp: T,
    pub score: S,
}

impl<V, T, S> Sample<V, T, S> {
    #[inline]
    pub fn new(value: V, timestamp: T, score: S) -> Self {
        Self {
            value,
            timestamp,
            score,
        }
    }

    #[inline]
    pub fn into_parts(self) -> (V, T, S) {
        (self.value, self.timestamp, self.score)
    }
}

impl<V, T, S> From<(V, T, S)> for Sample<V, T, S> {
    fn from((value, timestamp, score): (V, T, S)) -> Self {
        Self::new(value, timestamp, score)
    }
}
