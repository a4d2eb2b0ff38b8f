use rand::{Rng, SeedableRng};
use rand::rngs::SmallRng;
use serde::{Serialize, Deserialize};

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Color {
        Color{r,g,b}
    }

    pub fn channels(&self) -> [u8;3] {
        [self.r, self.g, self.b]
    }
}

/**
 * Hands out one random color per correspondence. Colors carry no meaning across frames
 * and are not guaranteed to be distinct.
 */
#[derive(Debug,Clone)]
pub struct ColorAllocator<R: Rng> {
    rng: R
}

impl ColorAllocator<SmallRng> {
    pub fn seeded(seed: u64) -> ColorAllocator<SmallRng> {
        ColorAllocator::new(SmallRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> ColorAllocator<SmallRng> {
        ColorAllocator::new(SmallRng::from_entropy())
    }
}

impl<R: Rng> ColorAllocator<R> {
    pub fn new(rng: R) -> ColorAllocator<R> {
        ColorAllocator{rng}
    }

    pub fn next_color(&mut self) -> Color {
        Color::new(self.rng.gen::<u8>(), self.rng.gen::<u8>(), self.rng.gen::<u8>())
    }
}
