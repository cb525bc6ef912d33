use bytes::Bytes;

/// A sorted-set member together with its score.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuple {
    pub value: Bytes,
    pub score: f64,
}

impl Tuple {
    pub fn new(value: impl Into<Bytes>, score: f64) -> Self {
        Self {
            value: value.into(),
            score,
        }
    }
}
