use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use std::io::Error;

/// Pull-based source of `Instance`s sharing one immutable header.
///
/// Implementations may be finite (files) or generated. Batch consumers drain
/// them into a [`Dataset`](crate::core::instances::Dataset) before training.
pub trait Stream {
    /// The schema every yielded instance conforms to, stable for the
    /// stream's whole lifetime.
    fn header(&self) -> &InstanceHeader;

    /// Whether the stream *may* produce more instances. Finite sources
    /// return `false` once exhausted; if this returns `false`,
    /// [`next_instance`](Stream::next_instance) must return `None`.
    fn has_more_instances(&self) -> bool;

    /// Next instance, or `None` at end of stream. Must not panic on normal
    /// end-of-stream.
    fn next_instance(&mut self) -> Option<Box<dyn Instance>>;

    /// Rewinds to the initial state: file sources seek back to the data
    /// section, generators re-seed. The header must not change.
    fn restart(&mut self) -> Result<(), Error>;
}
