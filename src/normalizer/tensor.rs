/// Number of colour channels per pixel: red, green, blue.
pub const CHANNELS: usize = 3;

/// Flat `1 x side x side x 3` float tensor.
///
/// Layout is row-major and channel-interleaved: the value for
/// `(row, col, channel)` lives at `(row * side + col) * 3 + channel`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    side: usize,
    data: Vec<f32>,
}

impl Tensor {
    pub(crate) fn new(side: usize, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), side * side * CHANNELS);
        Self { side, data }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn shape(&self) -> [usize; 4] {
        [1, self.side, self.side, CHANNELS]
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn get(&self, row: usize, col: usize, channel: usize) -> Option<f32> {
        if row >= self.side || col >= self.side || channel >= CHANNELS {
            return None;
        }
        self.data
            .get((row * self.side + col) * CHANNELS + channel)
            .copied()
    }
}
