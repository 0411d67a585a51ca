//! The falling-edge interrupt handler and its oneshot delivery loop.

use core::cell::Cell;

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::Instant;
use embedded_hal_async::digital::Wait;
use embedded_hal_async::i2c::{I2c, SevenBitAddress};

use crate::bus;
use crate::device::{InterruptSource, Touchscreen};
use crate::frame::{self, RawTouchBlock};
use crate::input::{InputSink, TouchReport};
use crate::regs::{REG_TOUCH1_YH, SLOT_LEN};

/// Outcome of one handler invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrqReturn {
    /// The edge was consumed and the line may be re-armed.
    Handled,
}

/// Stop handshake between a running [`Touchscreen::run`] loop and whoever detaches it.
pub struct IrqControl {
    running: Mutex<CriticalSectionRawMutex, Cell<bool>>,
    stop: Signal<CriticalSectionRawMutex, ()>,
    drained: Signal<CriticalSectionRawMutex, ()>,
}

impl IrqControl {
    pub const fn new() -> Self {
        Self {
            running: Mutex::new(Cell::new(false)),
            stop: Signal::new(),
            drained: Signal::new(),
        }
    }

    /// Returns `true` while a `run` loop is servicing this control.
    pub fn is_running(&self) -> bool {
        self.running.lock(Cell::get)
    }

    /// Stops interrupt delivery and waits until the running loop has returned.
    ///
    /// A handler that is already executing finishes first, including its
    /// publish. Returns at once if no loop is running. Once this returns the
    /// touchscreen can be detached.
    pub async fn disable(&self) {
        if !self.is_running() {
            return;
        }
        self.stop.signal(());
        self.drained.wait().await;
    }

    fn enter(&self) {
        self.stop.reset();
        self.drained.reset();
        self.running.lock(|running| running.set(true));
    }

    fn exit(&self) {
        self.running.lock(|running| running.set(false));
        self.drained.signal(());
    }
}

impl Default for IrqControl {
    fn default() -> Self {
        Self::new()
    }
}

impl<I2cType, Source, Sink> Touchscreen<I2cType, Source, Sink>
where
    I2cType: I2c<SevenBitAddress>,
    Source: InterruptSource,
    Sink: InputSink,
{
    /// Services one falling edge.
    ///
    /// Reads the first contact slot, decodes it and publishes it as one
    /// report. A failed read drops the sample and is logged through the rate
    /// limiter; the next physical touch raises a fresh edge. The edge is
    /// always acknowledged.
    pub async fn handle_edge(&mut self) -> IrqReturn {
        let mut raw = [0u8; SLOT_LEN];
        match bus::transact(&mut self.i2c, self.address, &[REG_TOUCH1_YH], &mut raw).await {
            Ok(()) => {
                let sample = frame::decode(RawTouchBlock::new(raw));
                log::trace!("touch {sample:?}");
                self.sink.report(TouchReport::from(sample));
            }
            Err(err) => {
                if let Some(suppressed) = self.ratelimit.check(Instant::now()) {
                    if suppressed > 0 {
                        log::warn!("{suppressed} touch read errors suppressed");
                    }
                    log::error!("Unable to fetch data: {err}");
                }
            }
        }
        IrqReturn::Handled
    }

    /// Delivers falling edges to [`handle_edge`](Self::handle_edge) until `control` is disabled.
    ///
    /// The line is only waited on again after the previous handler returned,
    /// so at most one transaction per touchscreen is ever in flight.
    pub async fn run(&mut self, control: &IrqControl) {
        control.enter();
        loop {
            let event = select(self.line.wait_for_falling_edge(), control.stop.wait()).await;
            match event {
                Either::First(Ok(())) => {
                    self.handle_edge().await;
                }
                Either::First(Err(err)) => {
                    log::error!("touch irq line failed: {err:?}");
                    break;
                }
                Either::Second(()) => break,
            }
        }
        log::debug!("touch irq {:#04x} disabled", self.address);
        control.exit();
    }
}
