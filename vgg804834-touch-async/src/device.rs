//! Attaching and detaching a touchscreen instance.

use embedded_hal_async::digital::Wait;
use embedded_hal_async::i2c::{I2c, SevenBitAddress};
use heapless::Vec;

use crate::bus;
use crate::chip::ChipProfile;
use crate::conf::Config;
use crate::error::{AttachError, BusError, ClaimError};
use crate::frame::{self, ContactSlot, RawTouchBlock, TouchSample};
use crate::input::{InputDeviceInfo, InputSink};
use crate::ratelimit::RateLimit;
use crate::regs::{MAX_CONTACTS, REG_TOUCH1_YH, SLOT_LEN};

/// Default 7-bit address of the controller.
pub const DEFAULT_ADDRESS: SevenBitAddress = 0x38;

/// What discovery found out about one controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryDescriptor {
    /// 7-bit bus address.
    pub address: SevenBitAddress,
    /// Chip profile, if one could be matched.
    pub chip: Option<ChipProfile>,
}

impl DiscoveryDescriptor {
    /// Builds a descriptor by matching the device-tree compatible and the legacy id name.
    pub fn from_match(
        address: SevenBitAddress,
        of_compatible: Option<&str>,
        id_name: Option<&str>,
    ) -> Self {
        Self {
            address,
            chip: ChipProfile::resolve(of_compatible, id_name),
        }
    }
}

/// The platform's side of the interrupt line.
///
/// The line handed out by `claim` delivers one `wait_for_falling_edge`
/// completion per edge. Edges that arrive while the driver is not waiting are
/// the platform's to queue or drop.
pub trait InterruptSource {
    type Line: Wait;

    /// Claims the line for exclusive use by the driver.
    fn claim(&mut self) -> Result<Self::Line, ClaimError>;

    /// Gives a claimed line back. No edges are delivered to the driver afterwards.
    fn release(&mut self, line: Self::Line);
}

/// Resources handed back by [`Touchscreen::detach`].
pub struct Parts<I2cType, Source, Sink> {
    pub i2c: I2cType,
    pub source: Source,
    pub sink: Sink,
}

/// An attached touchscreen.
///
/// Owns the bus handle, the claimed interrupt line and the registered input
/// sink until [`detach`](Self::detach) is called.
pub struct Touchscreen<I2cType, Source: InterruptSource, Sink> {
    pub(crate) i2c: I2cType,
    pub(crate) address: SevenBitAddress,
    pub(crate) max_ts_points: u8,
    pub(crate) source: Source,
    pub(crate) line: Source::Line,
    pub(crate) sink: Sink,
    pub(crate) ratelimit: RateLimit,
}

impl<I2cType, Source, Sink> Touchscreen<I2cType, Source, Sink>
where
    I2cType: I2c<SevenBitAddress>,
    Source: InterruptSource,
    Sink: InputSink,
{
    /// Brings up a touchscreen found by discovery.
    ///
    /// Validates the chip data, claims the interrupt line and registers the
    /// input sink, in that order. On failure everything acquired so far is
    /// released again and nothing has been published.
    pub fn attach(
        descriptor: DiscoveryDescriptor,
        i2c: I2cType,
        mut source: Source,
        mut sink: Sink,
        config: Config,
    ) -> Result<Self, AttachError> {
        let chip = match descriptor.chip {
            Some(chip) if chip.max_ts_points > 0 => chip,
            _ => {
                log::error!("invalid or missing chip data");
                return Err(AttachError::MissingChipData);
            }
        };

        let line = source.claim().map_err(|err| {
            match err {
                ClaimError::Deferred => log::debug!("touch irq deferred: {err}"),
                ClaimError::Busy(_) => log::error!("failed to claim touch irq: {err}"),
            }
            AttachError::from(err)
        })?;

        if let Err(err) = sink.register(&InputDeviceInfo::new(&config)) {
            log::error!("Unable to register input device: {err:?}");
            source.release(line);
            return Err(AttachError::InputRegistration);
        }

        log::info!(
            "touchscreen initialized: addr {:#04x}, {} contact(s)",
            descriptor.address,
            chip.max_ts_points
        );

        Ok(Self {
            i2c,
            address: descriptor.address,
            max_ts_points: chip.max_ts_points,
            source,
            line,
            sink,
            ratelimit: RateLimit::new(config.rate_limit),
        })
    }

    /// Tears the instance down and hands the resources back.
    ///
    /// Taking `self` by value means no [`run`](Self::run) loop or interrupt
    /// handler can still be borrowing the instance, so nothing is published
    /// after this returns.
    pub fn detach(self) -> Parts<I2cType, Source, Sink> {
        let Self {
            i2c,
            address,
            mut source,
            line,
            mut sink,
            ..
        } = self;

        sink.unregister();
        source.release(line);
        log::info!("touchscreen {address:#04x} detached");

        Parts { i2c, source, sink }
    }

    pub fn address(&self) -> SevenBitAddress {
        self.address
    }

    pub fn max_ts_points(&self) -> u8 {
        self.max_ts_points
    }

    /// Reads and decodes one contact slot.
    pub async fn read_slot(&mut self, slot: ContactSlot) -> Result<TouchSample, BusError> {
        let mut raw = [0u8; SLOT_LEN];
        bus::transact(&mut self.i2c, self.address, &[slot.base_register()], &mut raw).await?;
        Ok(frame::decode(RawTouchBlock::new(raw)))
    }

    /// Reads every contact slot the chip supports in a single transaction.
    pub async fn read_contacts(&mut self) -> Result<Vec<TouchSample, MAX_CONTACTS>, BusError> {
        let points = usize::from(self.max_ts_points).min(MAX_CONTACTS);
        let mut block = [0u8; frame::contact_block_len(MAX_CONTACTS)];
        let block = &mut block[..frame::contact_block_len(points)];

        bus::transact(&mut self.i2c, self.address, &[REG_TOUCH1_YH], block).await?;
        Ok(frame::decode_slots(block, self.max_ts_points))
    }
}
