//! IR remote-control keys.
//!
//! The receiver driver decodes NEC frames and hands over the command byte.
//! Key codes are those of the common 17-key handheld remote.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteButton {
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    Star,
    Hash,
    Up,
    Down,
    Left,
    Right,
    Ok,
    /// Any command byte not listed above.
    Unknown,
}

impl RemoteButton {
    /// Total number of variants, `Unknown` included.
    pub const COUNT: usize = 18;

    /// Map an NEC command byte to a key.
    pub fn from_nec_command(code: u8) -> Self {
        match code {
            0x19 => Self::Num0,
            0x45 => Self::Num1,
            0x46 => Self::Num2,
            0x47 => Self::Num3,
            0x44 => Self::Num4,
            0x40 => Self::Num5,
            0x43 => Self::Num6,
            0x07 => Self::Num7,
            0x15 => Self::Num8,
            0x09 => Self::Num9,
            0x16 => Self::Star,
            0x0D => Self::Hash,
            0x18 => Self::Up,
            0x52 => Self::Down,
            0x08 => Self::Left,
            0x5A => Self::Right,
            0x1C => Self::Ok,
            _ => Self::Unknown,
        }
    }
}
