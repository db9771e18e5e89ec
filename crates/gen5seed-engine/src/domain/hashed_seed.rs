//! Hashed initial seed computation
//!
//! A Gen 5 initial seed is the first 64 bits of a SHA-1 digest over a
//! 13-word message built from version constants (nazo), hardware timing
//! values (VCount/Timer0), the console MAC address, the BCD-encoded boot
//! date and time, and the held-key register. The remaining three words of
//! the SHA-1 block are standard padding, so hashing exactly those 52 bytes
//! through a stock SHA-1 reproduces the in-game digest.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use sha1::{Digest, Sha1};
use std::fmt;

/// Graphics-engine status register value at boot
const GXSTAT: u32 = 0x0600_0000;

/// Frame counter value at the moment the seed is taken (BW)
const FRAME: u32 = 6;

/// Supported game cartridge versions.
///
/// Only the versions needed to parametrize the engine; each carries the
/// base nazo address its seed message embeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Version {
    BlackEnglish,
    WhiteEnglish,
    BlackJapanese,
    WhiteJapanese,
}

impl Version {
    fn nazo_base(self) -> u32 {
        match self {
            Version::BlackEnglish => 0x0221_60B0,
            Version::WhiteEnglish => 0x0221_60D0,
            Version::BlackJapanese => 0x0221_5F10,
            Version::WhiteJapanese => 0x0221_5F30,
        }
    }

    /// The five nazo message words derived from the base address
    pub fn nazo(self) -> [u32; 5] {
        let base = self.nazo_base();
        [
            base,
            base + 0xFC,
            base + 0xFC,
            base + 0x148,
            base + 0x148,
        ]
    }
}

/// Calendar date within the DS clock range (2000-2099)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct GameDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl GameDate {
    pub fn new(year: u16, month: u8, day: u8) -> GameDate {
        GameDate { year, month, day }
    }

    fn is_leap_year(year: u16) -> bool {
        // every fourth year is a leap year within 2000-2099
        year % 4 == 0
    }

    fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            _ => 28,
        }
    }

    /// Days since 2000-01-01
    pub fn epoch_days(self) -> u32 {
        let mut days = 0u32;
        for year in 2000..self.year {
            days += if Self::is_leap_year(year) { 366 } else { 365 };
        }
        for month in 1..self.month {
            days += u32::from(Self::days_in_month(self.year, month));
        }
        days + u32::from(self.day) - 1
    }

    /// Inverse of `epoch_days`
    pub fn from_epoch_days(mut days: u32) -> GameDate {
        let mut year = 2000u16;
        loop {
            let in_year = if Self::is_leap_year(year) { 366 } else { 365 };
            if days < in_year {
                break;
            }
            days -= in_year;
            year += 1;
        }
        let mut month = 1u8;
        loop {
            let in_month = u32::from(Self::days_in_month(year, month));
            if days < in_month {
                break;
            }
            days -= in_month;
            month += 1;
        }
        GameDate {
            year,
            month,
            day: (days + 1) as u8,
        }
    }

    /// Day of week, 0 = Sunday. 2000-01-01 was a Saturday.
    pub fn day_of_week(self) -> u32 {
        (self.epoch_days() + 6) % 7
    }
}

impl fmt::Display for GameDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Parameter ranges spanning the searched seed space
#[derive(Clone, Debug)]
pub struct SeedParameters {
    pub version: Version,
    /// Console MAC address (low 48 bits meaningful)
    pub mac_address: u64,
    pub timer0_min: u32,
    pub timer0_max: u32,
    pub vcount_min: u32,
    pub vcount_max: u32,
    pub date_min: GameDate,
    pub date_max: GameDate,
    /// Time window within each day, in seconds since midnight
    pub second_min: u32,
    pub second_max: u32,
    /// Held-key register values to try (0 = nothing held)
    pub key_combos: Vec<u32>,
}

/// One hashed seed plus the parameter tuple that produced it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashedSeed {
    pub raw: u64,
    pub date: GameDate,
    pub second_of_day: u32,
    pub key_combo: u32,
    pub timer0: u32,
    pub vcount: u32,
}

fn bcd(value: u32) -> u32 {
    ((value / 10) << 4) | (value % 10)
}

impl HashedSeed {
    /// Hash one parameter combination into its 64-bit initial seed
    pub fn compute(
        parameters: &SeedParameters,
        date: GameDate,
        second_of_day: u32,
        key_combo: u32,
        timer0: u32,
        vcount: u32,
    ) -> HashedSeed {
        let nazo = parameters.version.nazo();
        let mac = parameters.mac_address;

        let hour = second_of_day / 3600;
        let minute = (second_of_day / 60) % 60;
        let second = second_of_day % 60;
        // hour byte carries a PM flag in the upper nibble region
        let hour_byte = bcd(hour) | if hour >= 12 { 0x40 } else { 0 };

        let mut words = [0u32; 13];
        for (w, n) in words[..5].iter_mut().zip(nazo) {
            *w = n.swap_bytes();
        }
        words[5] = ((vcount << 16) | timer0).swap_bytes();
        words[6] = (mac & 0xFFFF) as u32;
        words[7] = ((mac >> 16) as u32) ^ FRAME.swap_bytes() ^ GXSTAT.swap_bytes();
        words[8] = (bcd(u32::from(date.year % 100)) << 24)
            | (bcd(u32::from(date.month)) << 16)
            | (bcd(u32::from(date.day)) << 8)
            | date.day_of_week();
        words[9] = (hour_byte << 24) | (bcd(minute) << 16) | (bcd(second) << 8);
        // words[10], words[11]: zero
        words[12] = key_combo;

        let mut message = [0u8; 52];
        for (chunk, word) in message.chunks_exact_mut(4).zip(words) {
            BigEndian::write_u32(chunk, word);
        }

        let digest = Sha1::digest(message);
        let low = u64::from(LittleEndian::read_u32(&digest[0..4]));
        let high = u64::from(LittleEndian::read_u32(&digest[4..8]));

        HashedSeed {
            raw: (high << 32) | low,
            date,
            second_of_day,
            key_combo,
            timer0,
            vcount,
        }
    }
}

impl fmt::Display for HashedSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:016X} ({} {:02}:{:02}:{:02} keys={:04X} timer0={:X} vcount={:X})",
            self.raw,
            self.date,
            self.second_of_day / 3600,
            (self.second_of_day / 60) % 60,
            self.second_of_day % 60,
            self.key_combo,
            self.timer0,
            self.vcount,
        )
    }
}
