//! Characteristic flavor text selection
//!
//! The PID word modulo 6 picks the highlighted stat; that stat's IV modulo 5
//! picks one of its five phrases.

use crate::domain::ivs::{Ivs, Stat};
use crate::domain::pid::Pid;
use std::fmt;

/// The 30 characteristics, five per stat in field order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Characteristic {
    stat: Stat,
    phrase: u32,
}

const PHRASES: [[&str; 5]; 6] = [
    // HP
    [
        "Loves to eat",
        "Often dozes off",
        "Often scatters things",
        "Scatters things often",
        "Likes to relax",
    ],
    // Attack
    [
        "Proud of its power",
        "Likes to thrash about",
        "A little quick tempered",
        "Likes to fight",
        "Quick tempered",
    ],
    // Defense
    [
        "Sturdy body",
        "Capable of taking hits",
        "Highly persistent",
        "Good endurance",
        "Good perseverance",
    ],
    // Sp. Attack
    [
        "Highly curious",
        "Mischievous",
        "Thoroughly cunning",
        "Often lost in thought",
        "Very finicky",
    ],
    // Sp. Defense
    [
        "Strong willed",
        "Somewhat vain",
        "Strongly defiant",
        "Hates to lose",
        "Somewhat stubborn",
    ],
    // Speed
    [
        "Likes to run",
        "Alert to sounds",
        "Impetuous and silly",
        "Somewhat of a clown",
        "Quick to flee",
    ],
];

impl Characteristic {
    /// Derive the characteristic shown for a PID/IV pair
    pub fn from(pid: Pid, ivs: Ivs) -> Characteristic {
        let stat = Stat::ALL[(pid.word() % 6) as usize];
        Characteristic {
            stat,
            phrase: ivs.get(stat) % 5,
        }
    }

    pub fn stat(self) -> Stat {
        self.stat
    }

    /// Index into the 30-entry characteristic table
    pub fn index(self) -> u32 {
        self.stat as u32 * 5 + self.phrase
    }

    pub fn text(self) -> &'static str {
        PHRASES[self.stat as usize][self.phrase as usize]
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
