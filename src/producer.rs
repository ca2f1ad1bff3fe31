//! Whole-frame emission under caller-supplied output capacity.
//!
//! A [`FrameProducer`] is driven by an external scheduler that repeatedly
//! offers an output buffer. Frames are written whole or not at all; a frame
//! that does not fit is held in a backlog and written first on a later call.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::config::FramerConfig;
use crate::error::Result;
use crate::framing::{Frame, Framer, FramerExt, HdlcFramer};
use crate::source::PayloadSource;

/// Prefix of generated origin identities.
pub const BLOCK_NAME: &str = "hdlc_framer";

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// Framer type produced by [`FrameProducer::from_config`].
pub type DynFramer = Box<dyn Framer + Send>;

/// Frame-start annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameTag {
    /// Offset of the first bit within the current call's output.
    pub index: usize,
    /// Offset of the first bit within everything this producer has written.
    pub absolute_index: u64,
    /// Configured tag name.
    pub key: Arc<str>,
    /// Frame length in bits.
    pub len: usize,
    /// Identity of the producer that built the frame.
    pub origin: Arc<str>,
}

/// Result of [`FrameProducer::produce_into`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Production {
    /// Number of bits written at the front of the output buffer.
    pub produced: usize,
    pub tags: Vec<FrameTag>,
}

/// Result of [`FrameProducer::produce`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Emission {
    pub bits: Vec<u8>,
    pub tags: Vec<FrameTag>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProducerState {
    /// Backlog empty; the next call may fetch a payload.
    Idle,
    /// A built frame is waiting for enough capacity.
    Draining,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProducerStats {
    pub payloads_received: u64,
    pub frames_emitted: u64,
    /// Frames that did not fit when built and went through the backlog.
    pub frames_deferred: u64,
    pub bits_emitted: u64,
}

/// Pulls payloads from a source, frames them and emits whole frames.
///
/// Generic over the `Framer` strategy and the `PayloadSource`. At most one
/// payload is fetched per call, and only once the backlog has fully drained,
/// so frames leave in the order their payloads arrived.
pub struct FrameProducer<F: Framer, S: PayloadSource> {
    framer: F,
    source: S,
    backlog: VecDeque<Frame>,
    frame_tag: Arc<str>,
    origin: Arc<str>,
    items_written: u64,
    stats: ProducerStats,
}

impl<S: PayloadSource> FrameProducer<DynFramer, S> {
    /// Builds an HDLC producer from validated configuration.
    pub fn from_config(config: &FramerConfig, source: S) -> Result<Self> {
        config.validate()?;
        let hdlc = HdlcFramer::new(config.tx_delay);
        let framer: DynFramer = match config.max_payload_len {
            Some(max) => Box::new(hdlc.bounded(max)),
            None => Box::new(hdlc),
        };
        Ok(Self::new(framer, source, config.frame_tag_name.as_str()))
    }
}

impl<F: Framer, S: PayloadSource> FrameProducer<F, S> {
    pub fn new(framer: F, source: S, frame_tag: impl Into<Arc<str>>) -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            framer,
            source,
            backlog: VecDeque::new(),
            frame_tag: frame_tag.into(),
            origin: format!("{BLOCK_NAME}{id}").into(),
            items_written: 0,
            stats: ProducerStats::default(),
        }
    }

    /// Replaces the generated origin identity.
    pub fn with_origin(mut self, origin: impl Into<Arc<str>>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Produces into a freshly allocated buffer of `capacity` bits.
    pub fn produce(&mut self, capacity: usize) -> Result<Emission> {
        let mut bits = vec![0u8; capacity];
        let Production { produced, tags } = self.produce_into(&mut bits)?;
        bits.truncate(produced);
        Ok(Emission { bits, tags })
    }

    /// Writes as many whole frames as fit into `out`.
    ///
    /// Backlogged frames go first. Once the backlog is empty one payload is
    /// fetched and framed; if it does not fit it is queued and the call
    /// returns without writing any of it.
    ///
    /// A malformed payload or a framer error aborts the call. Frames already
    /// copied into `out` during the call remain counted as written.
    pub fn produce_into(&mut self, out: &mut [u8]) -> Result<Production> {
        let mut production = Production::default();
        let result = self.fill(out, &mut production);
        self.items_written += production.produced as u64;
        result.map(|()| production)
    }

    fn fill(&mut self, out: &mut [u8], production: &mut Production) -> Result<()> {
        while let Some(frame) = self.backlog.pop_front() {
            if out.len() - production.produced < frame.len() {
                trace!(
                    frame_bits = frame.len(),
                    remaining = out.len() - production.produced,
                    "backlog frame still does not fit"
                );
                self.backlog.push_front(frame);
                return Ok(());
            }
            self.emit(&frame, out, production);
        }

        let Some(pdu) = self.source.try_next() else {
            return Ok(());
        };
        let payload = pdu.into_payload()?;
        self.stats.payloads_received += 1;
        let frame = self.framer.frame(&payload)?;

        // Frame size is only known after stuffing.
        let remaining = out.len() - production.produced;
        if remaining < frame.len() {
            debug!(
                frame_bits = frame.len(),
                remaining, "deferring frame to backlog"
            );
            self.stats.frames_deferred += 1;
            self.backlog.push_back(frame);
            return Ok(());
        }
        self.emit(&frame, out, production);
        Ok(())
    }

    fn emit(&mut self, frame: &Frame, out: &mut [u8], production: &mut Production) {
        let index = production.produced;
        out[index..index + frame.len()].copy_from_slice(frame.bits());
        production.tags.push(FrameTag {
            index,
            absolute_index: self.items_written + index as u64,
            key: Arc::clone(&self.frame_tag),
            len: frame.len(),
            origin: Arc::clone(&self.origin),
        });
        production.produced += frame.len();
        self.stats.frames_emitted += 1;
        self.stats.bits_emitted += frame.len() as u64;
        trace!(index, frame_bits = frame.len(), "emitted frame");
    }

    pub fn state(&self) -> ProducerState {
        if self.backlog.is_empty() {
            ProducerState::Idle
        } else {
            ProducerState::Draining
        }
    }

    pub fn backlog_len(&self) -> usize {
        self.backlog.len()
    }

    /// Total bits waiting in the backlog.
    pub fn backlog_bits(&self) -> usize {
        self.backlog.iter().map(Frame::len).sum()
    }

    /// Bits written over the producer's lifetime.
    pub fn items_written(&self) -> u64 {
        self.items_written
    }

    pub fn stats(&self) -> ProducerStats {
        self.stats
    }

    pub fn frame_tag(&self) -> &str {
        &self.frame_tag
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn framer(&self) -> &F {
        &self.framer
    }

    /// Consumes the producer, returning the framer, the source and any unsent frames.
    pub fn into_parts(self) -> (F, S, Vec<Frame>) {
        (self.framer, self.source, self.backlog.into())
    }
}
