//! Engine-wide constants and immutable lookup tables
//!
//! Note: PRNG multipliers/increments live in domain/rng.rs next to the
//! generators they belong to.

use std::sync::LazyLock;

// =============================================================================
// Probability divisors (estimator)
// =============================================================================

/// Number of distinct natures (PID word mod 25)
pub const NUM_NATURES: u64 = 25;

/// Size of the full six-field IV combination space (32^6)
pub const IV_SPACE: u64 = 1 << 30;

/// Odds denominator for a probabilistic shiny (1 in 8192)
pub const SHINY_DIVISOR: u64 = 8192;

/// Shiny check threshold: (tid ^ sid ^ pid-high ^ pid-low) < 8
pub const SHINY_THRESHOLD: u32 = 8;

// =============================================================================
// Held-button encoding (DS key input register)
// =============================================================================

/// The eight binary buttons, one register bit each
pub const BINARY_BUTTONS: [u32; 8] = [
    0x0001, // A
    0x0002, // B
    0x0004, // Select
    0x0008, // Start
    0x0100, // R
    0x0200, // L
    0x0400, // X
    0x0800, // Y
];

/// The eight D-pad directions; a diagonal counts as one held button
pub const DPAD_DIRECTIONS: [u32; 8] = [
    0x0010, // Right
    0x0020, // Left
    0x0040, // Up
    0x0080, // Down
    0x0050, // Up-Right
    0x0060, // Up-Left
    0x0090, // Down-Right
    0x00A0, // Down-Left
];

/// Key-input word when no button is held; held buttons clear their bits
pub const KEY_INPUT_DEFAULT: u32 = 0x2FFF;

/// All single held buttons (binary buttons plus D-pad directions)
pub static SINGLE_BUTTONS: LazyLock<Vec<u32>> = LazyLock::new(|| {
    BINARY_BUTTONS
        .iter()
        .chain(DPAD_DIRECTIONS.iter())
        .copied()
        .collect()
});

/// All two-button holds: pairs of binary buttons, and binary + D-pad.
/// Two D-pad directions cannot be held simultaneously.
pub static TWO_BUTTON_COMBOS: LazyLock<Vec<u32>> = LazyLock::new(|| {
    let mut combos = Vec::new();
    for (i, &a) in BINARY_BUTTONS.iter().enumerate() {
        for &b in &BINARY_BUTTONS[i + 1..] {
            combos.push(a | b);
        }
        for &d in &DPAD_DIRECTIONS {
            combos.push(a | d);
        }
    }
    combos
});

/// All three-button holds, built the same way as the two-button list
pub static THREE_BUTTON_COMBOS: LazyLock<Vec<u32>> = LazyLock::new(|| {
    let mut combos = Vec::new();
    for (i, &a) in BINARY_BUTTONS.iter().enumerate() {
        for (j, &b) in BINARY_BUTTONS.iter().enumerate().skip(i + 1) {
            for &c in &BINARY_BUTTONS[j + 1..] {
                combos.push(a | b | c);
            }
            for &d in &DPAD_DIRECTIONS {
                combos.push(a | b | d);
            }
        }
    }
    combos
});
