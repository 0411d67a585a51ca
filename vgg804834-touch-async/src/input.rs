//! The input subsystem as seen by the driver.

use crate::conf::Config;
use crate::frame::TouchSample;

/// Event type carrying key and button state.
pub const EV_KEY: u16 = 0x01;
/// Event type carrying absolute axes.
pub const EV_ABS: u16 = 0x03;
/// Absolute X axis code.
pub const ABS_X: u16 = 0x00;
/// Absolute Y axis code.
pub const ABS_Y: u16 = 0x01;
/// Touch button code.
pub const BTN_TOUCH: u16 = 0x14a;

/// Bus type advertised for I2C attached devices.
pub const BUS_I2C: u16 = 0x18;
/// Vendor id used for miscellaneous serio devices.
pub const SERIO_MSC: u16 = 0x01;

/// Range and filtering of one absolute axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbsInfo {
    pub minimum: i32,
    pub maximum: i32,
    pub fuzz: i32,
    pub flat: i32,
}

impl AbsInfo {
    pub const fn new(minimum: i32, maximum: i32) -> Self {
        Self {
            minimum,
            maximum,
            fuzz: 0,
            flat: 0,
        }
    }
}

/// What the driver tells the input subsystem about itself when registering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDeviceInfo {
    pub name: &'static str,
    pub bustype: u16,
    pub vendor: u16,
    pub product: u16,
    pub version: u16,
    /// Bitmask of supported event types, indexed by `EV_*` code.
    pub evbit: u32,
    /// Supported key codes.
    pub keys: &'static [u16],
    pub abs_x: AbsInfo,
    pub abs_y: AbsInfo,
}

impl InputDeviceInfo {
    pub const NAME: &'static str = "RZG2L Touchscreen";

    pub fn new(config: &Config) -> Self {
        let axis = AbsInfo::new(0, i32::from(config.abs_max));
        Self {
            name: Self::NAME,
            bustype: BUS_I2C,
            vendor: SERIO_MSC,
            product: 0,
            version: 0x0100,
            evbit: (1 << EV_KEY) | (1 << EV_ABS),
            keys: &[BTN_TOUCH],
            abs_x: axis,
            abs_y: axis,
        }
    }
}

/// One complete event batch: `ABS_X`, `ABS_Y`, `BTN_TOUCH`, then a sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchReport {
    pub abs_x: u16,
    pub abs_y: u16,
    pub btn_touch: bool,
}

impl From<TouchSample> for TouchReport {
    fn from(sample: TouchSample) -> Self {
        Self {
            abs_x: sample.x,
            abs_y: sample.y,
            btn_touch: sample.down,
        }
    }
}

/// A registered input device the driver publishes touch events to.
///
/// `report` receives all fields of one event at once, so implementations can
/// make the batch visible to consumers atomically.
pub trait InputSink {
    type Error: core::fmt::Debug;

    /// Makes the device known to the input subsystem.
    fn register(&mut self, info: &InputDeviceInfo) -> Result<(), Self::Error>;

    /// Publishes one event batch.
    fn report(&mut self, report: TouchReport);

    /// Removes the device. No reports follow.
    fn unregister(&mut self);
}
