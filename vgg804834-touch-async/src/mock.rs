//! Test doubles for the bus, the interrupt line, the platform and the input subsystem.

use core::cell::{Cell, RefCell};
use core::convert::Infallible;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
use embedded_hal::digital;
use embedded_hal_async::digital::Wait;
use embedded_hal_async::i2c::{self, I2c, Operation, SevenBitAddress};
use std::vec::Vec;

use crate::device::InterruptSource;
use crate::error::ClaimError;
use crate::input::{InputDeviceInfo, InputSink, TouchReport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Write(Vec<u8>),
    Read(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub address: SevenBitAddress,
    pub phases: Vec<Phase>,
}

/// A register-file device answering at one address.
pub struct MockBus {
    address: SevenBitAddress,
    registers: [u8; 0x40],
    pointer: usize,
    failure: Option<(usize, ErrorKind)>,
    pub transactions: Vec<Transaction>,
}

impl MockBus {
    pub fn new(address: SevenBitAddress) -> Self {
        Self {
            address,
            registers: [0; 0x40],
            pointer: 0,
            failure: None,
            transactions: Vec::new(),
        }
    }

    pub fn set_registers(&mut self, start: u8, values: &[u8]) {
        let start = usize::from(start);
        self.registers[start..start + values.len()].copy_from_slice(values);
    }

    /// Makes every following transaction fail at phase `index` with `kind`.
    pub fn fail_at_phase(&mut self, index: usize, kind: ErrorKind) {
        self.failure = Some((index, kind));
    }

    pub fn recover(&mut self) {
        self.failure = None;
    }
}

impl i2c::ErrorType for MockBus {
    type Error = ErrorKind;
}

impl I2c for MockBus {
    async fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut record = Transaction {
            address,
            phases: Vec::new(),
        };
        let result = self.run(address, operations, &mut record);
        self.transactions.push(record);
        result
    }
}

impl MockBus {
    fn run(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
        record: &mut Transaction,
    ) -> Result<(), ErrorKind> {
        if address != self.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        for (index, operation) in operations.iter_mut().enumerate() {
            if let Some((at, kind)) = self.failure {
                if at == index {
                    return Err(kind);
                }
            }
            match operation {
                Operation::Write(bytes) => {
                    record.phases.push(Phase::Write(bytes.to_vec()));
                    if let Some(first) = bytes.first() {
                        self.pointer = usize::from(*first);
                    }
                }
                Operation::Read(buf) => {
                    record.phases.push(Phase::Read(buf.len()));
                    for (offset, byte) in buf.iter_mut().enumerate() {
                        *byte = self.registers[(self.pointer + offset) % self.registers.len()];
                    }
                }
            }
        }
        Ok(())
    }
}

pub type EdgeChannel = Channel<CriticalSectionRawMutex, (), 8>;

/// An interrupt pin whose falling edges are fed through a channel.
pub struct MockLine<'a> {
    edges: &'a EdgeChannel,
}

impl digital::ErrorType for MockLine<'_> {
    type Error = Infallible;
}

impl Wait for MockLine<'_> {
    async fn wait_for_high(&mut self) -> Result<(), Self::Error> {
        core::future::pending().await
    }

    async fn wait_for_low(&mut self) -> Result<(), Self::Error> {
        core::future::pending().await
    }

    async fn wait_for_rising_edge(&mut self) -> Result<(), Self::Error> {
        core::future::pending().await
    }

    async fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error> {
        self.edges.receive().await;
        Ok(())
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), Self::Error> {
        self.wait_for_falling_edge().await
    }
}

/// Hands out [`MockLine`]s, or fails with a preset error.
pub struct MockSource<'a> {
    edges: &'a EdgeChannel,
    error: Option<ClaimError>,
    pub claimed: &'a Cell<u32>,
    pub released: &'a Cell<u32>,
}

impl<'a> MockSource<'a> {
    pub fn new(edges: &'a EdgeChannel, claimed: &'a Cell<u32>, released: &'a Cell<u32>) -> Self {
        Self {
            edges,
            error: None,
            claimed,
            released,
        }
    }

    pub fn failing(mut self, error: ClaimError) -> Self {
        self.error = Some(error);
        self
    }
}

impl<'a> InterruptSource for MockSource<'a> {
    type Line = MockLine<'a>;

    fn claim(&mut self) -> Result<Self::Line, ClaimError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.claimed.set(self.claimed.get() + 1);
        Ok(MockLine { edges: self.edges })
    }

    fn release(&mut self, _line: Self::Line) {
        self.released.set(self.released.get() + 1);
    }
}

/// Records what the driver registers and reports.
#[derive(Default)]
pub struct SinkState {
    pub info: RefCell<Option<InputDeviceInfo>>,
    pub reports: RefCell<Vec<TouchReport>>,
    pub registered: Cell<bool>,
    pub reject_registration: Cell<bool>,
    pub published: Signal<CriticalSectionRawMutex, TouchReport>,
}

pub struct MockSink<'a> {
    state: &'a SinkState,
}

impl<'a> MockSink<'a> {
    pub fn new(state: &'a SinkState) -> Self {
        Self { state }
    }
}

impl InputSink for MockSink<'_> {
    type Error = ();

    fn register(&mut self, info: &InputDeviceInfo) -> Result<(), Self::Error> {
        if self.state.reject_registration.get() {
            return Err(());
        }
        *self.state.info.borrow_mut() = Some(info.clone());
        self.state.registered.set(true);
        Ok(())
    }

    fn report(&mut self, report: TouchReport) {
        assert!(self.state.registered.get(), "report on unregistered sink");
        self.state.reports.borrow_mut().push(report);
        self.state.published.signal(report);
    }

    fn unregister(&mut self) {
        self.state.registered.set(false);
    }
}
