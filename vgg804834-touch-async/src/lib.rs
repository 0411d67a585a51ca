//! An asynchronous, `no_std` driver core for the VGG804834 panel's I2C touchscreen.
//!
//! The controller raises a falling edge on its interrupt line whenever the
//! first contact slot changes. The driver answers each edge with one
//! write-then-read transaction starting at the touch-1 Y high register,
//! decodes the four returned bytes into a [`TouchSample`](frame::TouchSample)
//! and publishes it to an [`InputSink`](input::InputSink) as one
//! `ABS_X`/`ABS_Y`/`BTN_TOUCH` batch.
//!
//! # Usage
//!
//! You need an I2C peripheral implementing `embedded-hal-async::i2c::I2c`, an
//! [`InterruptSource`](device::InterruptSource) handing out a pin that
//! implements `embedded-hal-async::digital::Wait`, and an input sink.
//!
//! ```ignore
//! use vgg804834_touch_async::conf::Config;
//! use vgg804834_touch_async::device::{DiscoveryDescriptor, Touchscreen};
//! use vgg804834_touch_async::irq::IrqControl;
//!
//! static TOUCH_IRQ: IrqControl = IrqControl::new();
//!
//! #[embassy_executor::task]
//! async fn touch_task(mut touchscreen: Touchscreen<Bus, TsIrq, Events>) {
//!     // Returns once `TOUCH_IRQ.disable()` has been awaited elsewhere.
//!     touchscreen.run(&TOUCH_IRQ).await;
//!     let _parts = touchscreen.detach();
//! }
//!
//! let descriptor = DiscoveryDescriptor::from_match(0x38, Some("rzg2l,touchscreen"), None);
//! let touchscreen = Touchscreen::attach(descriptor, i2c, ts_irq, events, Config::default())?;
//! spawner.spawn(touch_task(touchscreen)).unwrap();
//! ```

#![no_std]

#[cfg(test)]
extern crate std;

pub mod bus;
pub mod chip;
pub mod conf;
pub mod device;
pub mod error;
pub mod frame;
pub mod input;
pub mod irq;
pub mod ratelimit;
pub mod regs;

#[cfg(test)]
mod mock;
