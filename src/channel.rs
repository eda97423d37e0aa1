//! Interrupt-safe shared byte queue
//!
//! [`Channel`] wraps a [`Fifo`] in a blocking mutex so that a producer
//! context and a consumer context can share one instance even when either of
//! them is an interrupt handler. The mutex type selects the exclusion
//! mechanism:
//!
//! * `CriticalSectionRawMutex` masks all maskable interrupts for the duration
//!   of the mutating section and restores the previous interrupt-enable state
//!   afterwards, so nested critical sections compose. This is the correct
//!   choice whenever any participating context is an interrupt handler, and
//!   it stays correct for every producer/consumer pairing (ISR/thread,
//!   thread/ISR, ISR/ISR).
//! * `ThreadModeRawMutex` or `NoopRawMutex` suffice when both contexts run
//!   in thread mode.
//!
//! Critical sections are scoped to the index update and the one-byte copy
//! only, keeping the time interrupts stay masked bounded and small.
//!
//! `try_send` and `try_recv` never block and are safe from any context.
//! The `send`/`recv` futures are a convenience for thread-mode async code;
//! interrupt handlers use the try-variants and drop or retry per their own
//! policy.
//!
//! The channel supports one logical producer and one logical consumer. Only
//! one task may await on each side at a time; a second waiter on the same
//! side would displace the first one's waker.
//!
//! # Examples
//!
//! ```
//! use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
//! use irqfifo::channel::Channel;
//!
//! static RX_QUEUE: Channel<CriticalSectionRawMutex, 64> = Channel::new();
//!
//! // Interrupt handler: drop the byte if the foreground has fallen behind.
//! fn on_uart_rx(byte: u8) {
//!     let _ = RX_QUEUE.try_send(byte);
//! }
//!
//! // Foreground task.
//! async fn drain() {
//!     loop {
//!         let byte = RX_QUEUE.recv().await;
//!         // ... process byte ...
//!         # let _ = byte; break;
//!     }
//! }
//! ```

use core::cell::RefCell;
use core::future::poll_fn;
use core::task::{Context, Poll};
use embassy_sync::blocking_mutex::{Mutex, raw::RawMutex};
use embassy_sync::waitqueue::WakerRegistration;

use crate::fifo::{Fifo, Full};

/// Byte queue shared between two execution contexts.
///
/// `new` is const, so a channel owned by a driver can live in a `static` and
/// be handed to an interrupt handler by reference. There is no implicit
/// global instance; ownership stays with whoever declares it.
pub struct Channel<M: RawMutex, const N: usize> {
    inner: Mutex<M, RefCell<Inner<N>>>,
}

struct Inner<const N: usize> {
    fifo: Fifo<[u8; N]>,
    rx_trigger: WakerRegistration,
    tx_trigger: WakerRegistration,
}

impl<M: RawMutex, const N: usize> Channel<M, N> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Inner {
                fifo: Fifo::new_inline(),
                rx_trigger: WakerRegistration::new(),
                tx_trigger: WakerRegistration::new(),
            })),
        }
    }

    fn with_inner<R>(&self, f: impl FnOnce(&mut Inner<N>) -> R) -> R {
        self.inner.lock(|inner| f(&mut inner.borrow_mut()))
    }

    /// Appends a byte. Non-blocking, safe from interrupt context.
    ///
    /// Returns [`Full`] without mutating the queue if all slots are occupied.
    pub fn try_send(&self, byte: u8) -> Result<(), Full> {
        self.with_inner(|inner| {
            inner.fifo.try_push(byte)?;
            inner.rx_trigger.wake();
            Ok(())
        })
    }

    /// Removes the oldest byte. Non-blocking, safe from interrupt context.
    pub fn try_recv(&self) -> Option<u8> {
        self.with_inner(|inner| {
            let byte = inner.fifo.try_pop()?;
            inner.tx_trigger.wake();
            Some(byte)
        })
    }

    /// Occupancy snapshot.
    ///
    /// Consistent at the instant it is taken but possibly stale by the time
    /// the caller acts on it. Advisory, not a reservation.
    pub fn len(&self) -> usize {
        self.with_inner(|inner| inner.fifo.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn poll_send(&self, cx: &mut Context<'_>, byte: u8) -> Poll<()> {
        self.with_inner(|inner| match inner.fifo.try_push(byte) {
            Ok(()) => {
                inner.rx_trigger.wake();
                Poll::Ready(())
            }
            Err(Full) => {
                inner.tx_trigger.register(cx.waker());
                Poll::Pending
            }
        })
    }

    pub fn poll_recv(&self, cx: &mut Context<'_>) -> Poll<u8> {
        self.with_inner(|inner| match inner.fifo.try_pop() {
            Some(byte) => {
                inner.tx_trigger.wake();
                Poll::Ready(byte)
            }
            None => {
                inner.rx_trigger.register(cx.waker());
                Poll::Pending
            }
        })
    }

    /// Appends a byte, waiting for a free slot. Safe to drop.
    pub async fn send(&self, byte: u8) {
        poll_fn(|cx| self.poll_send(cx, byte)).await
    }

    /// Removes the oldest byte, waiting for one to arrive. Safe to drop.
    pub async fn recv(&self) -> u8 {
        poll_fn(|cx| self.poll_recv(cx)).await
    }

    /// Splits the channel into its producer and consumer handles.
    ///
    /// The handles are a role marker, not an exclusivity guarantee: hand the
    /// [`Sender`] to the producing context and the [`Receiver`] to the
    /// consuming one.
    pub fn split(&self) -> (Sender<'_, M, N>, Receiver<'_, M, N>) {
        (Sender(self), Receiver(self))
    }
}

impl<M: RawMutex, const N: usize> Default for Channel<M, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer handle of a [`Channel`].
pub struct Sender<'a, M: RawMutex, const N: usize>(&'a Channel<M, N>);

impl<'a, M: RawMutex, const N: usize> Sender<'a, M, N> {
    /// Appends a byte. Non-blocking, safe from interrupt context.
    pub fn try_send(&mut self, byte: u8) -> Result<(), Full> {
        self.0.try_send(byte)
    }

    /// Appends a byte, waiting for a free slot. Safe to drop.
    pub async fn send(&mut self, byte: u8) {
        self.0.send(byte).await
    }
}

/// Consumer handle of a [`Channel`].
pub struct Receiver<'a, M: RawMutex, const N: usize>(&'a Channel<M, N>);

impl<'a, M: RawMutex, const N: usize> Receiver<'a, M, N> {
    /// Removes the oldest byte. Non-blocking, safe from interrupt context.
    pub fn try_recv(&mut self) -> Option<u8> {
        self.0.try_recv()
    }

    /// Removes the oldest byte, waiting for one to arrive. Safe to drop.
    pub async fn recv(&mut self) -> u8 {
        self.0.recv().await
    }

    /// Occupancy snapshot. Advisory, not a reservation.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
