//! Write-then-read transactions over the shared two-wire bus.

use embedded_hal::i2c::Error as _;
use embedded_hal_async::i2c::{I2c, Operation, SevenBitAddress};

use crate::error::BusError;

/// Issues an optional write phase followed by an optional read phase to `address`.
///
/// Both phases go out as a single `I2c::transaction`, so the register select
/// and the read are never split by traffic to another device. An empty `write`
/// or `read` skips that phase. The transport either completes every phase or
/// reports an error; any error is returned as a [`BusError`] without retrying.
pub async fn transact<I2cType>(
    i2c: &mut I2cType,
    address: SevenBitAddress,
    write: &[u8],
    read: &mut [u8],
) -> Result<(), BusError>
where
    I2cType: I2c<SevenBitAddress>,
{
    let phases = phase_count(write, read);
    let result = match (write.is_empty(), read.is_empty()) {
        (true, true) => return Ok(()),
        (false, false) => {
            i2c.transaction(address, &mut [Operation::Write(write), Operation::Read(read)])
                .await
        }
        (false, true) => i2c.transaction(address, &mut [Operation::Write(write)]).await,
        (true, false) => i2c.transaction(address, &mut [Operation::Read(read)]).await,
    };

    result.map_err(|err| BusError {
        address,
        phases,
        kind: err.kind(),
    })
}

fn phase_count(write: &[u8], read: &[u8]) -> u8 {
    u8::from(!write.is_empty()) + u8::from(!read.is_empty())
}
