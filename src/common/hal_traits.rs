// src/common/hal_traits.rs

use core::cell::RefCell;

/// Exclusive access to a shared I2C bus.
///
/// Every SCD30 exchange (command write, settle delay, optional reply read)
/// runs inside a single call to [`BusLock::lock`], so two sessions sharing a
/// lock can never interleave their frames. Sessions that talk to the same
/// physical bus must share the same lock object.
pub trait BusLock {
    /// The bus type guarded by the lock, normally an `embedded_hal::i2c::I2c`.
    type Bus;

    /// Runs `f` with exclusive access to the bus, blocking until it is available.
    fn lock<R>(&self, f: impl FnOnce(&mut Self::Bus) -> R) -> R;
}

impl<L: BusLock + ?Sized> BusLock for &L {
    type Bus = L::Bus;

    fn lock<R>(&self, f: impl FnOnce(&mut Self::Bus) -> R) -> R {
        (**self).lock(f)
    }
}

/// Single-context lock for `no_std` targets: all sessions live in the same
/// execution context (one thread, no interrupt handler touching the bus).
/// Nothing is masked, so interrupt or DMA driven I2C peripherals keep working.
///
/// Panics if the bus is re-entered while an exchange is in progress.
impl<T> BusLock for RefCell<T> {
    type Bus = T;

    fn lock<R>(&self, f: impl FnOnce(&mut Self::Bus) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

/// Lock for `no_std` targets whose sessions run in different contexts.
///
/// Interrupts stay masked (on single-core targets) for the whole exchange,
/// including every 4 ms settle delay. I2C implementations that rely on
/// interrupts or DMA to complete a transfer will stall under this lock; use
/// the [`RefCell`] lock when every session runs in the same context.
impl<T> BusLock for critical_section::Mutex<RefCell<T>> {
    type Bus = T;

    fn lock<R>(&self, f: impl FnOnce(&mut Self::Bus) -> R) -> R {
        critical_section::with(|cs| f(&mut self.borrow_ref_mut(cs)))
    }
}

#[cfg(any(test, feature = "std"))]
impl<T> BusLock for std::sync::Mutex<T> {
    type Bus = T;

    fn lock<R>(&self, f: impl FnOnce(&mut Self::Bus) -> R) -> R {
        // The bus carries no invariant a panicking holder could break.
        let mut guard = self.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut guard)
    }
}

#[cfg(any(test, feature = "std"))]
impl<L: BusLock + ?Sized> BusLock for std::sync::Arc<L> {
    type Bus = L::Bus;

    fn lock<R>(&self, f: impl FnOnce(&mut Self::Bus) -> R) -> R {
        (**self).lock(f)
    }
}
