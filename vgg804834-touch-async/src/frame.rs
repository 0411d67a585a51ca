//! Decoding of contact slot registers into touch samples.

use heapless::Vec;

use crate::regs::{
    COORD_HIGH_MASK, MAX_CONTACTS, REG_TOUCH1_YH, SLOT_LEN, SLOT_STRIDE, TOUCH_DOWN_MASK,
};

/// The four registers of one contact slot, in `Y_HIGH, Y_LOW, X_HIGH, X_LOW` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawTouchBlock(pub [u8; SLOT_LEN]);

impl RawTouchBlock {
    /// Wraps the bytes read from a slot's first register onwards.
    pub const fn new(bytes: [u8; SLOT_LEN]) -> Self {
        Self(bytes)
    }
}

/// One decoded contact.
///
/// Coordinates are the raw 12-bit register values. They are zero whenever
/// `down` is `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TouchSample {
    /// X position, `0..4096`.
    pub x: u16,
    /// Y position, `0..4096`.
    pub y: u16,
    /// Whether a finger is on the panel.
    pub down: bool,
}

/// Decodes one contact slot.
///
/// Every bit pattern decodes. The status nibble above each coordinate's high
/// bits is dropped, and a lifted contact reports `(0, 0)` because the
/// controller keeps stale coordinates in the registers after release.
pub const fn decode(raw: RawTouchBlock) -> TouchSample {
    let [y_high, y_low, x_high, x_low] = raw.0;

    let down = y_high & TOUCH_DOWN_MASK != 0;
    if !down {
        return TouchSample {
            x: 0,
            y: 0,
            down: false,
        };
    }

    TouchSample {
        x: coordinate(x_high, x_low),
        y: coordinate(y_high, y_low),
        down,
    }
}

const fn coordinate(high: u8, low: u8) -> u16 {
    (((high & COORD_HIGH_MASK) as u16) << 8) | low as u16
}

/// One of the controller's contact slots, numbered from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactSlot(u8);

impl ContactSlot {
    /// The slot the interrupt handler reads.
    pub const FIRST: ContactSlot = ContactSlot(0);

    /// Returns the slot with the given index, if the register map has one.
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < MAX_CONTACTS {
            Some(Self(index))
        } else {
            None
        }
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// Address of the slot's Y high register.
    pub const fn base_register(self) -> u8 {
        REG_TOUCH1_YH + self.0 * SLOT_STRIDE
    }
}

/// Number of bytes to read from `REG_TOUCH1_YH` to cover the first `points` slots.
pub const fn contact_block_len(points: usize) -> usize {
    if points == 0 {
        0
    } else {
        (points - 1) * SLOT_STRIDE as usize + SLOT_LEN
    }
}

/// Decodes consecutive contact slots from a register dump starting at `REG_TOUCH1_YH`.
///
/// At most `max_points` slots are decoded, capped by the register map and by
/// how many complete slots `block` holds.
pub fn decode_slots(block: &[u8], max_points: u8) -> Vec<TouchSample, MAX_CONTACTS> {
    block
        .chunks(SLOT_STRIDE as usize)
        .filter_map(|chunk| chunk.get(..SLOT_LEN))
        .filter_map(|bytes| <[u8; SLOT_LEN]>::try_from(bytes).ok())
        .take(usize::from(max_points).min(MAX_CONTACTS))
        .map(|bytes| decode(RawTouchBlock::new(bytes)))
        .collect()
}
