//! PRNG state transitions simulated by the engine
//!
//! Three generators cover the supported game families: the classic 32-bit
//! LCRNG (Gen 3/4), the 64-bit LCRNG (Gen 5), and MT19937 for the Gen 5 IV
//! stream. Which ones a frame generator drives is a strategy decision made
//! at construction time.

// Gen 3/4 LCRNG constants
const LC32_MULTIPLIER: u32 = 0x41C6_4E6D;
const LC32_INCREMENT: u32 = 0x6073;

// Gen 5 LCRNG constants
const LC64_MULTIPLIER: u64 = 0x5D58_8B65_6C07_8965;
const LC64_INCREMENT: u64 = 0x26_9EC3;

/// Gen 3/4 32-bit linear congruential generator
#[derive(Clone, Copy, Debug)]
pub struct LcRng32 {
    state: u32,
}

impl LcRng32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance one step and return the new state
    pub fn next(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(LC32_MULTIPLIER)
            .wrapping_add(LC32_INCREMENT);
        self.state
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Gen 5 64-bit linear congruential generator
#[derive(Clone, Copy, Debug)]
pub struct LcRng64 {
    state: u64,
}

impl LcRng64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Advance one step and return the new state
    pub fn next(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(LC64_MULTIPLIER)
            .wrapping_add(LC64_INCREMENT);
        self.state
    }

    /// The upper 32 bits of the next state, the value the games consume
    pub fn next_u32(&mut self) -> u32 {
        (self.next() >> 32) as u32
    }

    pub fn state(&self) -> u64 {
        self.state
    }

    pub fn skip(&mut self, steps: u32) {
        for _ in 0..steps {
            self.next();
        }
    }
}

// MT19937 constants
const N: usize = 624;
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_B0DF;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7FFF_FFFF;
const INIT_MULTIPLIER: u32 = 1_812_433_253;

/// MT19937 random number generator; the Gen 5 IV stream source
pub struct Mt {
    state: [u32; N],
    idx: usize,
}

impl Mt {
    pub fn new(seed: u32) -> Self {
        let mut state = [0u32; N];
        state[0] = seed;
        for i in 1..N {
            let prev = state[i - 1];
            state[i] = INIT_MULTIPLIER
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        Self { state, idx: N }
    }

    /// Generate the next tempered 32-bit output
    pub fn next(&mut self) -> u32 {
        if self.idx >= N {
            self.twist();
        }

        let mut y = self.state[self.idx];
        self.idx += 1;

        y ^= y >> 11;
        y ^= (y << 7) & 0x9D2C_5680;
        y ^= (y << 15) & 0xEFC6_0000;
        y ^= y >> 18;
        y
    }

    pub fn skip(&mut self, steps: u32) {
        for _ in 0..steps {
            self.next();
        }
    }

    fn twist(&mut self) {
        for i in 0..N {
            let x = (self.state[i] & UPPER_MASK) | (self.state[(i + 1) % N] & LOWER_MASK);
            let mut next = x >> 1;
            if x & 1 != 0 {
                next ^= MATRIX_A;
            }
            self.state[i] = self.state[(i + M) % N] ^ next;
        }
        self.idx = 0;
    }
}
