//! # irqfifo
//!
//! Fixed-capacity, interrupt-safe byte queues for `no_std` targets.
//!
//! The crate provides the one data structure every piece of bare-metal
//! firmware seems to grow sooner or later: a bounded FIFO shared between an
//! interrupt service routine and a foreground task — a UART RX handler
//! pushing received bytes for the main loop to drain, or the main loop
//! queuing bytes for a TX-empty interrupt to pick up. No heap, no hidden
//! globals, no data loss or corruption under preemption.
//!
//! ## Architecture
//!
//! ```text
//!  ISR context                        thread context
//! ┌───────────┐    ┌─────────────┐    ┌────────────┐
//! │ producer  ├───►│   Channel   ├───►│  consumer  │
//! └───────────┘    │ ┌─────────┐ │    └────────────┘
//!    try_send      │ │  Fifo   │ │     recv().await
//!                  │ └─────────┘ │     or try_recv
//!                  └─────────────┘
//! ```
//!
//! Two layers:
//! * [`fifo::Fifo`] is the bare circular buffer: caller-owned storage,
//!   power-of-two capacity, explicit occupancy counter, non-blocking
//!   `try_push`/`try_pop`. It carries no synchronization and is the right
//!   type when a single context owns the queue.
//! * [`channel::Channel`] wraps a `Fifo` in an `embassy_sync` blocking mutex
//!   chosen by the user. With `CriticalSectionRawMutex` every mutating
//!   operation runs with interrupts masked and the previous mask restored on
//!   exit, which makes the queue safe for any ISR/thread pairing. An
//!   optional waker-based async layer lets thread-mode code `await` instead
//!   of polling.
//!
//! ## Concurrency model
//!
//! Each queue instance supports one logical producer role and one logical
//! consumer role. Successful pops observe the exact sequence of successful
//! pushes: no loss, duplication, or reordering. Critical sections cover only
//! the index/counter update and the one-byte copy, so the interrupt-masked
//! window stays small and bounded.
//!
//! The `try_*` operations are O(1), never block, and report a full or empty
//! queue through their return value. Both conditions are ordinary transient
//! outcomes; retrying or dropping is the caller's policy.
//!
//! ## Capacity
//!
//! Capacity must be a power of two so that index wrap-around is a bitwise
//! AND. `Fifo::new_inline` and `Channel::new` enforce this at compile time;
//! the slice-backed `Fifo::new` asserts it at construction.
//!
//! ## Examples
//!
//! ```
//! use irqfifo::Fifo;
//!
//! let mut fifo = Fifo::<[u8; 8]>::new_inline();
//! fifo.try_push(0x2a).unwrap();
//! assert_eq!(fifo.try_pop(), Some(0x2a));
//! ```
//!
//! See [`channel::Channel`] for the shared ISR/thread form.
#![no_std]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod channel;
pub mod fifo;

pub use channel::Channel;
pub use fifo::{Fifo, Full};
