//! Register map of the touch controller.

/// Device mode select.
pub const REG_DEVICE_MODE: u8 = 0x00;
/// Touch/status summary.
pub const REG_TD_STATUS: u8 = 0x02;

// Contact slot 1. Slots 2..5 repeat the layout every `SLOT_STRIDE` bytes.
pub const REG_TOUCH1_YH: u8 = 0x03;
pub const REG_TOUCH1_YL: u8 = 0x04;
pub const REG_TOUCH1_XH: u8 = 0x05;
pub const REG_TOUCH1_XL: u8 = 0x06;

/// Distance between the first registers of two consecutive contact slots.
pub const SLOT_STRIDE: u8 = 6;
/// Number of registers the decoder consumes per slot.
pub const SLOT_LEN: usize = 4;
/// Highest number of contact slots the register map provides.
pub const MAX_CONTACTS: usize = 5;

/// Set in the Y high register while the contact is down.
pub const TOUCH_DOWN_MASK: u8 = 0b1000_0000;
/// Coordinate bits 11:8 in the high registers. The upper nibble is status/ID.
pub const COORD_HIGH_MASK: u8 = 0b0000_1111;
