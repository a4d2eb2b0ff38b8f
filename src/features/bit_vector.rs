use serde::{Serialize, Deserialize};

use crate::{EpipolarError, Result};

/**
 * Binary descriptor as packed u64 words, e.g. 256 bits for ORB.
 */
#[derive(Debug,Clone,PartialEq,Eq,Serialize,Deserialize)]
pub struct BitVector {
    data: Vec<u64>,
    bits: usize
}

impl BitVector {

    pub fn new(n: usize) -> BitVector {
        BitVector{data: vec![0; BitVector::words_for(n)], bits: n}
    }

    pub fn bits_per_element() -> usize {
        64
    }

    /// Little endian packing of the bytes, 8 bits per byte.
    pub fn from_bytes(bytes: &[u8]) -> BitVector {
        let mut vector = BitVector::new(8*bytes.len());
        for (i, byte) in bytes.iter().enumerate() {
            let word = i/8;
            let shift = 8*(i%8);
            vector.data[word] |= (*byte as u64) << shift;
        }
        vector
    }

    fn words_for(bits: usize) -> usize {
        (bits + BitVector::bits_per_element() - 1)/BitVector::bits_per_element()
    }

    /// Deserialized vectors carry their own word count, which has to agree with the bit count.
    pub fn validate(&self) -> Result<()> {
        let expected = BitVector::words_for(self.bits);
        if self.data.len() != expected {
            return Err(EpipolarError::InvalidInput(format!("descriptor of {} bits needs {} words, got {}", self.bits, expected, self.data.len())));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bits
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn set(&mut self, index: usize, value: bool) -> () {
        assert!(index < self.bits);
        let mask = 1u64 << (index % BitVector::bits_per_element());
        let word = &mut self.data[index / BitVector::bits_per_element()];
        match value {
            true => *word |= mask,
            false => *word &= !mask
        }
    }

    pub fn get(&self, index: usize) -> bool {
        assert!(index < self.bits);
        (self.data[index / BitVector::bits_per_element()] >> (index % BitVector::bits_per_element())) & 1 == 1
    }

    pub fn hamming_distance(&self, other: &BitVector) -> Result<u32> {
        if self.bits != other.bits {
            return Err(EpipolarError::InvalidInput(format!("descriptor lengths differ: {} vs {}", self.bits, other.bits)));
        }
        Ok(self.data.iter().zip(other.data.iter()).map(|(a,b)| (a^b).count_ones()).sum())
    }

}
