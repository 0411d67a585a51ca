use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;
use embedded_hal::i2c::{Error as _, Operation, SevenBitAddress};
use embedded_hal_async::i2c::{self, I2c};

/// `Mutex`-based shared bus [`I2c`] implementation.
///
/// Several devices can each hold a [`MutexI2cDevice`] for the same bus. The
/// lock is held for a whole transaction, so the phases of one device's
/// write-then-read exchange are never interleaved with another device's.
pub struct MutexI2cDevice<'a, M: RawMutex, BUS> {
    bus: &'a Mutex<M, BUS>,
}

impl<'a, M: RawMutex, BUS> MutexI2cDevice<'a, M, BUS> {
    /// Create a new [`MutexI2cDevice`].
    pub fn new(bus: &'a Mutex<M, BUS>) -> Self {
        Self { bus }
    }
}

impl<M: RawMutex, BUS> i2c::ErrorType for MutexI2cDevice<'_, M, BUS>
where
    BUS: i2c::ErrorType,
{
    type Error = BUS::Error;
}

impl<M: RawMutex, BUS> I2c for MutexI2cDevice<'_, M, BUS>
where
    BUS: I2c<SevenBitAddress>,
{
    async fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut bus = self.bus.lock().await;
        let result = bus.transaction(address, operations).await;

        if let Err(err) = &result {
            log::warn!("I2C transaction to {address:#04x} failed: {:?}", err.kind());
        }

        result
    }
}
