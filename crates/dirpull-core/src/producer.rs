//! Pull-style producers and the lookahead iterator built on top of them.
//!
//! A [`Producer`] is the right shape for sources where the only way to learn
//! whether another item exists is to try to make one, such as a directory
//! walker that may have to descend and ascend several levels before it finds
//! the next file. [`ProducerIter`] adds a one-slot lookahead buffer so such a
//! source can be consumed with peek-then-take semantics or with ordinary
//! iterator syntax.

use std::iter::FusedIterator;

use crate::error::SequenceError;

/// A source that yields one item per call until it signals the end.
pub trait Producer {
    /// Item produced on each successful call.
    type Item;
    /// Error raised when production fails.
    type Error;

    /// Produce the next item.
    ///
    /// Returns `Ok(None)` once the source is exhausted. Implementations
    /// should keep returning `Ok(None)` on later calls.
    fn produce(&mut self) -> Result<Option<Self::Item>, Self::Error>;
}

impl<P: Producer + ?Sized> Producer for &mut P {
    type Item = P::Item;
    type Error = P::Error;

    fn produce(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        (**self).produce()
    }
}

impl<P: Producer + ?Sized> Producer for Box<P> {
    type Item = P::Item;
    type Error = P::Error;

    fn produce(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        (**self).produce()
    }
}

/// Producer backed by a closure. See [`ProducerIter::from_fn`].
pub struct FnProducer<F>(F);

impl<F, T, E> Producer for FnProducer<F>
where
    F: FnMut() -> Result<Option<T>, E>,
{
    type Item = T;
    type Error = E;

    fn produce(&mut self) -> Result<Option<T>, E> {
        (self.0)()
    }
}

/// Forward-only iterator over the items of a [`Producer`].
///
/// Holds at most one produced-but-unconsumed item. Once the producer has
/// signalled the end (or failed), the sequence stays exhausted.
#[derive(Debug)]
pub struct ProducerIter<P: Producer> {
    producer: P,
    next: Option<P::Item>,
    exhausted: bool,
}

impl<P: Producer> ProducerIter<P> {
    /// Wrap a producer.
    pub fn new(producer: P) -> Self {
        Self {
            producer,
            next: None,
            exhausted: false,
        }
    }

    /// Check whether another item is available.
    ///
    /// Produces at most once to fill the lookahead slot and never discards an
    /// item that is already buffered, so repeated calls are idempotent.
    pub fn has_next(&mut self) -> Result<bool, P::Error> {
        if self.next.is_none() && !self.exhausted {
            self.next = self.pull()?;
        }
        Ok(self.next.is_some())
    }

    /// Look at the next item without consuming it.
    pub fn peek(&mut self) -> Result<Option<&P::Item>, P::Error> {
        self.has_next()?;
        Ok(self.next.as_ref())
    }

    /// Take the next item.
    ///
    /// Returns the buffered item if [`has_next`](Self::has_next) already
    /// produced one, otherwise produces a fresh one. Asking for an item after
    /// the end is a usage error.
    pub fn next_item(&mut self) -> Result<P::Item, SequenceError<P::Error>> {
        if let Some(item) = self.next.take() {
            return Ok(item);
        }
        if self.exhausted {
            return Err(SequenceError::NoSuchElement);
        }
        self.pull()
            .map_err(SequenceError::Producer)?
            .ok_or(SequenceError::NoSuchElement)
    }

    /// In-place removal is not supported by a forward-only sequence.
    pub fn remove(&mut self) -> Result<(), SequenceError<P::Error>> {
        Err(SequenceError::Unsupported {
            operation: "remove",
        })
    }

    /// Whether the producer has signalled the end and nothing is buffered.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted && self.next.is_none()
    }

    /// Borrow the wrapped producer.
    pub fn producer(&self) -> &P {
        &self.producer
    }

    /// Unwrap the producer, dropping any buffered item.
    pub fn into_inner(self) -> P {
        self.producer
    }

    fn pull(&mut self) -> Result<Option<P::Item>, P::Error> {
        match self.producer.produce() {
            Ok(Some(item)) => Ok(Some(item)),
            Ok(None) => {
                self.exhausted = true;
                Ok(None)
            }
            Err(err) => {
                self.exhausted = true;
                Err(err)
            }
        }
    }
}

impl<F, T, E> ProducerIter<FnProducer<F>>
where
    F: FnMut() -> Result<Option<T>, E>,
{
    /// Build a sequence from a closure that follows the [`Producer`] contract.
    pub fn from_fn(f: F) -> Self {
        Self::new(FnProducer(f))
    }
}

impl<P: Producer> Iterator for ProducerIter<P> {
    type Item = Result<P::Item, P::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(item) = self.next.take() {
            return Some(Ok(item));
        }
        if self.exhausted {
            return None;
        }
        self.pull().transpose()
    }
}

impl<P: Producer> FusedIterator for ProducerIter<P> {}
