/// All commands need to have this trait which gives the address of the command
/// which needs to be send via SPI with activated CommandsPin (Data/Command Pin in CommandMode)
pub(crate) trait Command: Copy {
    fn address(self) -> u8;
}

/// Lets a caller abort a busy wait that would otherwise block until the
/// controller is idle or the configured timeout hits.
///
/// Checked once per poll, right before the driver goes to sleep again.
/// Implemented for every `FnMut() -> bool`, e.g. a closure reading an
/// `AtomicBool` set from an interrupt handler.
pub trait Cancel {
    /// Returns `true` once the wait should be abandoned
    fn is_cancelled(&mut self) -> bool;
}

impl<F> Cancel for F
where
    F: FnMut() -> bool,
{
    fn is_cancelled(&mut self) -> bool {
        self()
    }
}
