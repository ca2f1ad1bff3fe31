//! Defines the framing strategies that turn payloads into bit-level frames.

use crate::bits::{stuff_into, unpack_lsb_first, FLAG};
use crate::checksum::{Checksum, Crc16Ccitt};
use crate::error::{Error, Result};

//--- Frame ---

/// A fully built frame: an immutable sequence of bits (one `0`/`1` per item).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bits: Vec<u8>,
}

impl Frame {
    /// Wraps an already built bit sequence.
    pub fn from_bits(bits: Vec<u8>) -> Self {
        Self { bits }
    }

    /// Length in bits, i.e. the number of output items the frame occupies.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    pub fn into_bits(self) -> Vec<u8> {
        self.bits
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.bits
    }
}

//--- Framer Trait and Implementations ---

/// A trait that defines how a raw payload becomes a frame.
///
/// Purpose: Separate wire-format concerns (flags, checksums, stuffing) from
/// output scheduling. Implementations are small strategy objects composed
/// into `FrameProducer`.
pub trait Framer {
    fn frame(&self, payload: &[u8]) -> Result<Frame>;
}

impl<F: Framer + ?Sized> Framer for Box<F> {
    fn frame(&self, payload: &[u8]) -> Result<Frame> {
        (**self).frame(payload)
    }
}

impl<F: Framer + ?Sized> Framer for &F {
    fn frame(&self, payload: &[u8]) -> Result<Frame> {
        (**self).frame(payload)
    }
}

/// HDLC-style framing: `[tx_delay zeros | flag | stuffed(payload ++ fcs) | flag]`
///
/// The frame check sequence is computed over the payload only and appended
/// low byte first before bit expansion. The frame length is only known after
/// stuffing.
#[derive(Debug, Clone)]
pub struct HdlcFramer<C: Checksum = Crc16Ccitt> {
    checksum_alg: C,
    tx_delay: usize,
    preamble: Vec<u8>,
    postamble: [u8; 8],
}

impl HdlcFramer<Crc16Ccitt> {
    /// Creates a framer using CRC-16/CCITT with `tx_delay` idle bits before the opening flag.
    pub fn new(tx_delay: usize) -> Self {
        Self::with_checksum(tx_delay, Crc16Ccitt)
    }
}

impl<C: Checksum> HdlcFramer<C> {
    pub fn with_checksum(tx_delay: usize, checksum_alg: C) -> Self {
        let mut preamble = vec![0u8; tx_delay];
        preamble.extend_from_slice(&FLAG);
        debug!(
            preamble_bits = preamble.len(),
            tx_delay, "hdlc framer preamble constructed"
        );
        Self {
            checksum_alg,
            tx_delay,
            preamble,
            postamble: FLAG,
        }
    }

    pub fn tx_delay(&self) -> usize {
        self.tx_delay
    }

    /// Idle bits followed by the opening flag.
    pub fn preamble(&self) -> &[u8] {
        &self.preamble
    }

    /// The closing flag.
    pub fn postamble(&self) -> &[u8] {
        &self.postamble
    }

    /// Bits every frame carries besides the payload, before stuffing.
    pub fn overhead_bits(&self) -> usize {
        self.preamble.len() + self.checksum_alg.size() * 8 + self.postamble.len()
    }
}

impl<C: Checksum> Framer for HdlcFramer<C> {
    fn frame(&self, payload: &[u8]) -> Result<Frame> {
        let fcs = self.checksum_alg.calculate(payload);
        let fcs_size = self.checksum_alg.size().min(8);

        let mut packet = Vec::with_capacity(payload.len() + fcs_size);
        packet.extend_from_slice(payload);
        packet.extend_from_slice(&fcs.to_le_bytes()[..fcs_size]);

        let body = unpack_lsb_first(&packet);

        let mut bits = Vec::with_capacity(
            self.preamble.len() + body.len() + body.len() / 5 + self.postamble.len(),
        );
        bits.extend_from_slice(&self.preamble);
        let inserted = stuff_into(&body, &mut bits);
        bits.extend_from_slice(&self.postamble);

        trace!(
            payload_len = payload.len(),
            fcs,
            stuffed = inserted,
            frame_bits = bits.len(),
            "built frame"
        );
        Ok(Frame::from_bits(bits))
    }
}

/// A composable adapter that enforces a maximum payload length for any framer.
///
/// Failure semantics: Returns `Error::InvalidFrame` with context (payload len/limit) when exceeded.
pub struct BoundedFramer<F: Framer> {
    inner: F,
    max_len: usize,
}

impl<F: Framer> BoundedFramer<F> {
    pub fn new(inner: F, max_len: usize) -> Self {
        Self { inner, max_len }
    }
}

impl<F: Framer> Framer for BoundedFramer<F> {
    fn frame(&self, payload: &[u8]) -> Result<Frame> {
        if payload.len() > self.max_len {
            return Err(Error::invalid_frame(format!(
                "payload length {} exceeds configured limit {}",
                payload.len(),
                self.max_len
            )));
        }
        self.inner.frame(payload)
    }
}

//--- Observer Adapter ---

/// An adapter that allows observing payloads on the framing path without copying or mutating.
///
/// Callback timing: Invoked exactly once per payload, before delegating inner framing.
pub struct ObserverFramer<F: Framer, C: Fn(&[u8])> {
    inner: F,
    callback: C,
}

impl<F: Framer, C: Fn(&[u8])> ObserverFramer<F, C> {
    pub fn new(inner: F, callback: C) -> Self {
        Self { inner, callback }
    }
}

impl<F: Framer, C: Fn(&[u8])> Framer for ObserverFramer<F, C> {
    fn frame(&self, payload: &[u8]) -> Result<Frame> {
        (self.callback)(payload);
        self.inner.frame(payload)
    }
}

//--- Fluent Extension Trait ---

/// Extension methods for framers to enable fluent composition without importing adapter types.
pub trait FramerExt: Framer + Sized {
    /// Enforce a maximum payload length.
    fn bounded(self, max: usize) -> BoundedFramer<Self> {
        BoundedFramer::new(self, max)
    }

    /// Observe payloads without copying. Useful for metrics/logging.
    fn observed<C: Fn(&[u8])>(self, callback: C) -> ObserverFramer<Self, C> {
        ObserverFramer::new(self, callback)
    }
}

impl<T: Framer> FramerExt for T {}
