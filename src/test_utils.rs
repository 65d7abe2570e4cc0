//! Recording fakes for the bus, the control lines and the delay
//!
//! All handles created by one [`Bus`] share a single event log, so tests can
//! check the exact interleaving of reset pulses, commands, data and busy polls.

use core::cell::RefCell;
use core::convert::Infallible;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::{
    delay::DelayNs,
    digital::{self, InputPin, OutputPin},
    spi::{self, Operation, SpiBus, SpiDevice},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
    /// Byte written while DC was low
    Command(u8),
    /// Byte written while DC was high
    Data(u8),
    /// Level the reset line was driven to
    Reset(bool),
    /// One read of the busy line
    BusyRead,
    /// Delay in milliseconds
    Sleep(u32),
    /// Level the chip select line was driven to
    ChipSelect(bool),
}

struct State {
    dc_high: bool,
    events: Vec<Event>,
    transfers: usize,
    attempted_bytes: usize,
    fail_at_byte: Option<usize>,
    busy_levels: VecDeque<bool>,
    slept_ns: u64,
}

impl State {
    fn transfer(&mut self, bytes: &[u8]) -> Result<(), spi::ErrorKind> {
        self.transfers += 1;
        for byte in bytes.iter().copied() {
            self.attempted_bytes += 1;
            if self.fail_at_byte == Some(self.attempted_bytes) {
                return Err(spi::ErrorKind::Other);
            }
            let event = if self.dc_high {
                Event::Data(byte)
            } else {
                Event::Command(byte)
            };
            self.events.push(event);
        }
        Ok(())
    }
}

/// Owner of the shared log, hands out the fake peripherals
#[derive(Clone)]
pub(crate) struct Bus(Rc<RefCell<State>>);

impl Bus {
    /// Busy line reads high (idle) unless told otherwise
    pub fn new() -> Self {
        Bus(Rc::new(RefCell::new(State {
            dc_high: false,
            events: Vec::new(),
            transfers: 0,
            attempted_bytes: 0,
            fail_at_byte: None,
            busy_levels: VecDeque::from([true]),
            slept_ns: 0,
        })))
    }

    pub fn spi(&self) -> FakeSpi {
        FakeSpi(self.clone())
    }

    pub fn busy(&self) -> FakeBusy {
        FakeBusy(self.clone())
    }

    pub fn dc(&self) -> FakeDc {
        FakeDc(self.clone())
    }

    pub fn rst(&self) -> FakeRst {
        FakeRst(self.clone())
    }

    pub fn delay(&self) -> FakeDelay {
        FakeDelay(self.clone())
    }

    /// Levels returned by successive busy reads, the last one repeats forever
    pub fn set_busy_levels(&self, levels: &[bool]) {
        self.0.borrow_mut().busy_levels = levels.iter().copied().collect();
    }

    /// The `n`th byte (counting from 1) fails and is not recorded
    pub fn fail_at_byte(&self, n: usize) {
        self.0.borrow_mut().fail_at_byte = Some(n);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().events.clone()
    }

    /// Only the bytes that went over the bus
    pub fn writes(&self) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|e| matches!(e, Event::Command(_) | Event::Data(_)))
            .collect()
    }

    /// Command bytes, in order
    pub fn commands(&self) -> Vec<u8> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Command(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    /// Data bytes following the `nth` occurrence of `command`
    pub fn data_after(&self, command: u8, nth: usize) -> Vec<u8> {
        self.writes()
            .into_iter()
            .skip_while({
                let mut seen = 0;
                move |e| {
                    if *e == Event::Command(command) {
                        seen += 1;
                    }
                    seen <= nth
                }
            })
            .skip(1)
            .map_while(|e| match e {
                Event::Data(d) => Some(d),
                _ => None,
            })
            .collect()
    }

    pub fn transfers(&self) -> usize {
        self.0.borrow().transfers
    }

    pub fn attempted_bytes(&self) -> usize {
        self.0.borrow().attempted_bytes
    }

    pub fn busy_reads(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| **e == Event::BusyRead)
            .count()
    }

    pub fn slept_ms(&self) -> u64 {
        self.0.borrow().slept_ns / 1_000_000
    }

    pub fn clear(&self) {
        self.0.borrow_mut().events.clear();
    }
}

pub(crate) struct FakeSpi(Bus);

impl spi::ErrorType for FakeSpi {
    type Error = spi::ErrorKind;
}

impl SpiDevice for FakeSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        let mut state = (self.0).0.borrow_mut();
        for operation in operations.iter() {
            if let Operation::Write(bytes) = operation {
                state.transfer(bytes)?;
            }
        }
        Ok(())
    }
}

/// Raw bus, for wrapping in a shared bus [`SpiDevice`]
pub(crate) struct FakeSpiBus(Bus);

impl FakeSpiBus {
    pub fn new(bus: &Bus) -> Self {
        FakeSpiBus(bus.clone())
    }
}

impl spi::ErrorType for FakeSpiBus {
    type Error = spi::ErrorKind;
}

impl SpiBus for FakeSpiBus {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        words.fill(0);
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        (self.0).0.borrow_mut().transfer(words)
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        read.fill(0);
        (self.0).0.borrow_mut().transfer(write)
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        (self.0).0.borrow_mut().transfer(words)?;
        words.fill(0);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub(crate) struct FakeCs(Bus);

impl FakeCs {
    pub fn new(bus: &Bus) -> Self {
        FakeCs(bus.clone())
    }
}

impl digital::ErrorType for FakeCs {
    type Error = Infallible;
}

impl OutputPin for FakeCs {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        (self.0).0.borrow_mut().events.push(Event::ChipSelect(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        (self.0).0.borrow_mut().events.push(Event::ChipSelect(true));
        Ok(())
    }
}

pub(crate) struct FakeDc(Bus);

impl digital::ErrorType for FakeDc {
    type Error = Infallible;
}

impl OutputPin for FakeDc {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        (self.0).0.borrow_mut().dc_high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        (self.0).0.borrow_mut().dc_high = true;
        Ok(())
    }
}

pub(crate) struct FakeRst(Bus);

impl digital::ErrorType for FakeRst {
    type Error = Infallible;
}

impl OutputPin for FakeRst {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        (self.0).0.borrow_mut().events.push(Event::Reset(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        (self.0).0.borrow_mut().events.push(Event::Reset(true));
        Ok(())
    }
}

pub(crate) struct FakeBusy(Bus);

impl FakeBusy {
    fn read(&mut self) -> bool {
        let mut state = (self.0).0.borrow_mut();
        state.events.push(Event::BusyRead);
        if state.busy_levels.len() > 1 {
            state.busy_levels.pop_front().unwrap_or(true)
        } else {
            state.busy_levels.front().copied().unwrap_or(true)
        }
    }
}

impl digital::ErrorType for FakeBusy {
    type Error = Infallible;
}

impl InputPin for FakeBusy {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.read())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.read())
    }
}

pub(crate) struct FakeDelay(Bus);

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        (self.0).0.borrow_mut().slept_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        let mut state = (self.0).0.borrow_mut();
        state.slept_ns += u64::from(ms) * 1_000_000;
        state.events.push(Event::Sleep(ms));
    }
}
