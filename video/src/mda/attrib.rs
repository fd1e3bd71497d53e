use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Attrib: u8 {
        const UNDERLINE      = 0x1;
        const HIGH_INTENSITY = 0x2;
        const BLINK          = 0x4;
        const INVERSE        = 0x8;
    }
}

// Mode control register bit that turns attribute bit 7 into blink.
pub const BLINK_ENABLE: u8 = 0x20;

const UNDERLINE_MASK: u8 = 0x7;
const UNDERLINE_VAL: u8 = 0x1;
const INTENSITY_BIT: u8 = 0x8;
const BLINK_BIT: u8 = 0x80;

/// Decode a cell into the character to show and how to show it.
///
/// The generic bit rules apply first. A handful of attribute values are then
/// special cased: the "non-display" values blank the cell outright, and the
/// reverse video values add inverse on top of whatever the bits gave.
pub fn decode(ch: u8, attr: u8, mode_ctrl: u8) -> (u8, Attrib) {
    let blink_enabled = mode_ctrl & BLINK_ENABLE != 0;

    let mut flags = Attrib::empty();
    flags.set(Attrib::UNDERLINE, attr & UNDERLINE_MASK == UNDERLINE_VAL);
    flags.set(Attrib::HIGH_INTENSITY, attr & INTENSITY_BIT != 0);
    flags.set(Attrib::BLINK, attr & BLINK_BIT != 0 && blink_enabled);

    match attr {
        0x00 | 0x08 | 0x80 | 0x88 => (b' ', Attrib::empty()),
        0x70 | 0x78 => (ch, flags | Attrib::INVERSE),
        0xf0 | 0xf8 => {
            flags |= Attrib::INVERSE;
            if blink_enabled {
                flags |= Attrib::BLINK;
            }
            (ch, flags)
        }
        _ => (ch, flags),
    }
}
