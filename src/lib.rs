//! # bitframer (v0.1.0)
//!
//! An HDLC-style bit framer for constrained, half-duplex links such as acoustic modems.
//!
//! ## Overview
//!
//! `bitframer` turns byte payloads into frames of unpacked bits (one `0`/`1`
//! per output item): a run of idle zeros, an opening flag `01111110`, the
//! payload and its CRC-16/CCITT expanded least-significant bit first and bit
//! stuffed, and a closing flag. Frames are handed to an external scheduler
//! through a pull interface that never splits a frame across calls.
//!
//! ## Key Features
//!
//! * **Composable Architecture**: Separate traits for checksums, framing and payload sources
//! * **Whole-Frame Emission**: Frames that do not fit are queued, never truncated
//! * **Boundary Tags**: Every frame start is annotated with its offset, length and origin
//! * **Non-Blocking**: Production never waits for payloads or capacity
//!
//! ## Quick Start
//!
//! ```rust
//! use bitframer::*;
//! use std::collections::VecDeque;
//!
//! fn main() -> Result<()> {
//!     let mut payloads = VecDeque::new();
//!     payloads.push_back(Pdu::blob(b"hello".to_vec()));
//!
//!     let config = FramerConfig::new("packet_len").tx_delay(16);
//!     let mut producer = FrameProducer::from_config(&config, payloads)?;
//!
//!     // Too little room: the frame is built and held back.
//!     let emission = producer.produce(32)?;
//!     assert!(emission.bits.is_empty());
//!
//!     // Enough room: the held frame goes out whole.
//!     let emission = producer.produce(4096)?;
//!     assert_eq!(emission.tags.len(), 1);
//!     assert_eq!(emission.tags[0].index, 0);
//!     assert_eq!(emission.tags[0].len, emission.bits.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! * **`Checksum`**: Frame check sequence strategy (`Crc16Ccitt` by default)
//! * **`Framer`**: Builds a complete bit frame from a payload (`HdlcFramer`)
//! * **`PayloadSource`**: Non-blocking supply of PDUs
//! * **`FrameProducer`**: Owns the backlog and answers capacity-bounded production calls

#[macro_use]
extern crate tracing;

pub mod bits;
pub mod checksum;
pub mod config;
pub mod error;
pub mod framing;
pub mod producer;
pub mod source;

// Re-export the main public API for user convenience.
pub use checksum::{crc16_ccitt, Checksum, Crc16Ccitt};
pub use config::FramerConfig;
pub use error::{Error, Result};
pub use framing::{BoundedFramer, Frame, Framer, FramerExt, HdlcFramer, ObserverFramer};
pub use producer::{
    Emission, FrameProducer, FrameTag, ProducerState, ProducerStats, Production,
};
pub use source::{EmptySource, FnSource, PayloadSource, Pdu, Pmt};

#[cfg(feature = "crc16")]
pub use checksum::Crc16;
