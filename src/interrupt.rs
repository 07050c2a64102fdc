//! Interrupt plumbing between the VDP and its host CPU.
//!
//! The VDP never holds a CPU back-pointer. It owns a single capability:
//! "pull the maskable interrupt line". The CPU side injects its
//! implementation at construction and acknowledges by reading the status
//! port.

/// The one thing the VDP needs from the processor.
pub trait InterruptSink {
    fn request_int(&mut self);
}

/// Sink for a VDP nobody is listening to (tools, tests, frame dumps).
#[derive(Clone, Copy, Default)]
pub struct NullSink;

impl InterruptSink for NullSink {
    fn request_int(&mut self) {}
}

/// Sink holder that is invisible to bincode serialization. The sink is
/// runtime wiring, not chip state: it encodes as zero bytes and decodes as
/// [`NullSink`], so the loader can splice the live sink back in afterwards.
pub(crate) struct SinkHandle(pub(crate) Box<dyn InterruptSink>);

impl SinkHandle {
    #[inline]
    pub(crate) fn request_int(&mut self) {
        self.0.request_int();
    }
}

impl Default for SinkHandle {
    fn default() -> Self {
        Self(Box::new(NullSink))
    }
}

impl bincode::Encode for SinkHandle {
    fn encode<E: bincode::enc::Encoder>(
        &self,
        _encoder: &mut E,
    ) -> Result<(), bincode::error::EncodeError> {
        Ok(()) // write nothing
    }
}

impl<Context> bincode::Decode<Context> for SinkHandle {
    fn decode<D: bincode::de::Decoder>(
        _decoder: &mut D,
    ) -> Result<Self, bincode::error::DecodeError> {
        Ok(Self::default())
    }
}

impl<'de, Context> bincode::BorrowDecode<'de, Context> for SinkHandle {
    fn borrow_decode<D: bincode::de::BorrowDecoder<'de>>(
        _decoder: &mut D,
    ) -> Result<Self, bincode::error::DecodeError> {
        Ok(Self::default())
    }
}
