//! The single random source behind every draw a session makes.

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;

/// Seedable generator shared by the discovery model and the entry generator.
#[derive(Debug, Clone)]
pub struct SessionRng {
    inner: Mcg128Xsl64,
}

impl SessionRng {
    /// Seeded generator (`Some`) or one seeded from OS entropy (`None`).
    pub fn new(seed: Option<u64>) -> Self {
        let inner = match seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        Self { inner }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    /// Uniform draw in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Uniform draw in `[low, high)`.
    pub fn range(&mut self, low: f64, high: f64) -> f64 {
        self.inner.gen_range(low..high)
    }

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    /// Random v4 identifier drawn from this source.
    pub fn uuid(&mut self) -> uuid::Uuid {
        uuid::Builder::from_random_bytes(self.inner.gen::<[u8; 16]>()).into_uuid()
    }
}
