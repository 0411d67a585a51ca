#![no_std]
#![doc = "Asynchronous shared I2C bus implementation for embedded-hal."]

// For the official Embassy implementation, see:
// - https://github.com/embassy-rs/embassy/tree/main/embassy-embedded-hal/src/shared_bus

#[cfg(test)]
extern crate std;

pub mod i2c;
