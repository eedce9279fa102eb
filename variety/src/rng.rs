//! Seeded PRNG backend shared by a fuzzer and everything derived from it.
//!
//! [`SubtractiveRng`] is Knuth's subtractive generator with the exact seeding
//! procedure of the classic seeded `System.Random`, so a documented seed
//! always replays the documented sequence. [`SharedRng`] is the handle a
//! [`Fuzzer`](crate::Fuzzer) and its no-duplication sub-fuzzers share.

use std::cell::RefCell;
use std::rc::Rc;

use rand::{Rng, RngCore, SeedableRng};

const MBIG: i32 = i32::MAX;
const MSEED: i32 = 161_803_398;
const STATE_LEN: usize = 56;

/// Knuth subtractive pseudo-random generator.
#[derive(Debug, Clone)]
pub struct SubtractiveRng {
    state: [i32; STATE_LEN],
    inext: usize,
    inextp: usize,
}

impl SubtractiveRng {
    /// Create a generator from a 32-bit seed. Negative seeds behave like their absolute value.
    pub fn new(seed: i32) -> Self {
        let subtraction = if seed == i32::MIN {
            i32::MAX
        } else {
            seed.abs()
        };

        let mut state = [0i32; STATE_LEN];
        let mut mj = MSEED - subtraction;
        state[55] = mj;
        let mut mk = 1i32;
        let mut ii = 0usize;

        for _ in 1..55 {
            ii += 21;
            if ii >= 55 {
                ii -= 55;
            }
            state[ii] = mk;
            mk = mj.wrapping_sub(mk);
            if mk < 0 {
                mk = mk.wrapping_add(MBIG);
            }
            mj = state[ii];
        }

        for _ in 1..5 {
            for i in 1..STATE_LEN {
                let mut n = i + 30;
                if n >= 55 {
                    n -= 55;
                }
                state[i] = state[i].wrapping_sub(state[1 + n]);
                if state[i] < 0 {
                    state[i] = state[i].wrapping_add(MBIG);
                }
            }
        }

        Self {
            state,
            inext: 0,
            inextp: 21,
        }
    }

    /// Next raw sample in `[0, i32::MAX)`.
    pub fn sample(&mut self) -> i32 {
        let mut inext = self.inext + 1;
        if inext >= STATE_LEN {
            inext = 1;
        }
        let mut inextp = self.inextp + 1;
        if inextp >= STATE_LEN {
            inextp = 1;
        }

        let mut value = self.state[inext].wrapping_sub(self.state[inextp]);
        if value == MBIG {
            value -= 1;
        }
        if value < 0 {
            value = value.wrapping_add(MBIG);
        }

        self.state[inext] = value;
        self.inext = inext;
        self.inextp = inextp;
        value
    }

    /// Next double in `[0, 1)`.
    pub fn next_double(&mut self) -> f64 {
        f64::from(self.sample()) * (1.0 / f64::from(MBIG))
    }

    /// Next integer in the half-open range `[min, max)`. Returns `min` when `min >= max`.
    pub fn next_in_range(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }

        let range = i64::from(max) - i64::from(min);
        if range <= i64::from(i32::MAX) {
            (self.next_double() * range as f64) as i32 + min
        } else {
            ((self.sample_for_large_range() * range as f64) as i64 + i64::from(min)) as i32
        }
    }

    fn sample_for_large_range(&mut self) -> f64 {
        let mut result = self.sample();
        let negative = self.sample() % 2 == 0;
        if negative {
            result = -result;
        }

        let mut d = f64::from(result);
        d += f64::from(i32::MAX - 1);
        d /= 2.0 * f64::from(i32::MAX as u32) - 1.0;
        d
    }
}

impl RngCore for SubtractiveRng {
    fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        self.fill_bytes(&mut bytes);
        u32::from_le_bytes(bytes)
    }

    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.next_u32());
        let high = u64::from(self.next_u32());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for byte in dest.iter_mut() {
            *byte = (self.sample() & 0xFF) as u8;
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for SubtractiveRng {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(i32::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as i32)
    }
}

/// Draw a fresh non-negative seed from the thread-local entropy source.
pub fn entropy_seed() -> i32 {
    rand::thread_rng().gen_range(0..i32::MAX)
}

/// Reference-counted handle to one PRNG stream.
///
/// Cloning the handle shares the stream; it never forks it. Not thread safe.
#[derive(Debug, Clone)]
pub struct SharedRng {
    inner: Rc<RefCell<SubtractiveRng>>,
}

impl SharedRng {
    /// Create a new stream seeded with `seed`.
    pub fn new(seed: i32) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SubtractiveRng::new(seed))),
        }
    }

    /// Integer in `[min, max)`.
    pub fn next_in_range(&self, min: i32, max: i32) -> i32 {
        self.inner.borrow_mut().next_in_range(min, max)
    }

    /// Index in `[0, len)`. `len` must be non-zero and at most `i32::MAX`.
    pub fn next_index(&self, len: usize) -> usize {
        debug_assert!(len > 0);
        let upper = i32::try_from(len).unwrap_or(i32::MAX);
        self.next_in_range(0, upper) as usize
    }

    /// Heads or tails.
    pub fn flip_coin(&self) -> bool {
        self.next_in_range(0, 2) == 1
    }

    /// Double in `[0, 1)`.
    pub fn next_double(&self) -> f64 {
        self.inner.borrow_mut().next_double()
    }

    /// Fill `dest` with one drawn byte per slot.
    pub fn fill_bytes(&self, dest: &mut [u8]) {
        self.inner.borrow_mut().fill_bytes(dest)
    }

    /// Whether two handles point at the same stream.
    pub fn shares_stream_with(&self, other: &SharedRng) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}
