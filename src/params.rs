//! Live parameter updates
//!
//! Tempo and hue changes arrive from an external source (a poller, a
//! network task, an interrupt) through a bounded queue built on
//! `critical-section` and `heapless::Deque`. The host drains it between
//! ticks, so a clock never sees a tempo change in the middle of an update.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::clock::ClockId;

/// A parameter change for one clock and the layers bound to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamUpdate {
    /// Source timestamp; updates not newer than the last applied one are stale
    pub stamp: u64,
    pub clock: ClockId,
    pub bpm: Option<u32>,
    pub multiple: Option<u32>,
    pub hue: Option<u8>,
}

impl ParamUpdate {
    pub const fn new(stamp: u64, clock: ClockId) -> Self {
        Self {
            stamp,
            clock,
            bpm: None,
            multiple: None,
            hue: None,
        }
    }

    #[must_use]
    pub const fn with_tempo(mut self, bpm: u32, multiple: u32) -> Self {
        self.bpm = Some(bpm);
        self.multiple = Some(multiple);
        self
    }

    #[must_use]
    pub const fn with_bpm(mut self, bpm: u32) -> Self {
        self.bpm = Some(bpm);
        self
    }

    #[must_use]
    pub const fn with_hue(mut self, hue: u8) -> Self {
        self.hue = Some(hue);
        self
    }

    pub const fn changes_tempo(&self) -> bool {
        self.bpm.is_some() || self.multiple.is_some()
    }
}

/// Error returned when the queue is full; carries the rejected update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrySendError(pub ParamUpdate);

/// Error returned when the queue is empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

/// Bounded queue of parameter updates, safe to share with interrupts
pub struct ParamChannel<const SIZE: usize> {
    queue: Mutex<RefCell<Deque<ParamUpdate, SIZE>>>,
}

impl<const SIZE: usize> ParamChannel<SIZE> {
    pub const fn new() -> Self {
        Self {
            queue: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    pub const fn sender(&self) -> ParamSender<'_, SIZE> {
        ParamSender { channel: self }
    }

    pub const fn receiver(&self) -> ParamReceiver<'_, SIZE> {
        ParamReceiver { channel: self }
    }

    fn try_send(&self, update: ParamUpdate) -> Result<(), TrySendError> {
        critical_section::with(|cs| {
            let mut queue = self.queue.borrow(cs).borrow_mut();
            queue.push_back(update).map_err(TrySendError)
        })
    }

    fn try_receive(&self) -> Result<ParamUpdate, TryReceiveError> {
        critical_section::with(|cs| {
            let mut queue = self.queue.borrow(cs).borrow_mut();
            queue.pop_front().ok_or(TryReceiveError)
        })
    }
}

impl<const SIZE: usize> Default for ParamChannel<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer handle of a [`ParamChannel`]
#[derive(Clone, Copy)]
pub struct ParamSender<'a, const SIZE: usize> {
    channel: &'a ParamChannel<SIZE>,
}

impl<const SIZE: usize> ParamSender<'_, SIZE> {
    /// Queue an update, returning it back if the queue is full
    pub fn try_send(&self, update: ParamUpdate) -> Result<(), TrySendError> {
        self.channel.try_send(update)
    }
}

/// Consumer handle of a [`ParamChannel`]
#[derive(Clone, Copy)]
pub struct ParamReceiver<'a, const SIZE: usize> {
    channel: &'a ParamChannel<SIZE>,
}

impl<const SIZE: usize> ParamReceiver<'_, SIZE> {
    pub fn try_receive(&self) -> Result<ParamUpdate, TryReceiveError> {
        self.channel.try_receive()
    }
}

/// Drains the queue, dropping stale updates
pub struct ParamProcessor<'a, const SIZE: usize> {
    updates: ParamReceiver<'a, SIZE>,
    last_stamp: Option<u64>,
}

impl<'a, const SIZE: usize> ParamProcessor<'a, SIZE> {
    pub const fn new(updates: ParamReceiver<'a, SIZE>) -> Self {
        Self {
            updates,
            last_stamp: None,
        }
    }

    /// Next update newer than everything seen so far, if any is queued
    pub fn next_fresh(&mut self) -> Option<ParamUpdate> {
        while let Ok(update) = self.updates.try_receive() {
            if self.last_stamp.is_some_and(|last| update.stamp <= last) {
                continue;
            }
            self.last_stamp = Some(update.stamp);
            return Some(update);
        }
        None
    }

    pub const fn last_stamp(&self) -> Option<u64> {
        self.last_stamp
    }
}
