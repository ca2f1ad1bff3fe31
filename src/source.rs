//! Payload ingress: the messages a producer pulls and the sources that hold them.

use std::collections::VecDeque;
use std::fmt;

use crate::error::{Error, Result};

/// Polymorphic message value delivered by a payload source.
///
/// Only [`Pmt::Blob`] is a valid frame body; the other variants exist so
/// that sources can hand over whatever their upstream produced and the
/// producer can reject it loudly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pmt {
    /// No value.
    Null,
    /// Raw bytes.
    Blob(Vec<u8>),
    /// Text.
    String(String),
    /// Unsigned integer.
    Usize(usize),
    /// Two values.
    Pair(Box<Pmt>, Box<Pmt>),
}

impl Pmt {
    /// Name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Pmt::Null => "Null",
            Pmt::Blob(_) => "Blob",
            Pmt::String(_) => "String",
            Pmt::Usize(_) => "Usize",
            Pmt::Pair(..) => "Pair",
        }
    }
}

impl fmt::Display for Pmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pmt::Null => write!(f, "Null"),
            Pmt::Blob(v) => write!(f, "{:?}", v),
            Pmt::String(s) => write!(f, "{}", s),
            Pmt::Usize(u) => write!(f, "{}", u),
            Pmt::Pair(a, b) => write!(f, "({}, {})", a, b),
        }
    }
}

/// A protocol data unit: optional length hint plus message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pdu {
    pub len_hint: Option<usize>,
    pub body: Pmt,
}

impl Pdu {
    pub fn new(len_hint: Option<usize>, body: Pmt) -> Self {
        Self { len_hint, body }
    }

    /// A blob PDU without a length hint.
    pub fn blob(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(None, Pmt::Blob(bytes.into()))
    }

    /// Extracts the payload bytes.
    ///
    /// Fails with `Error::MalformedPayload` if the body is not a blob. The
    /// length hint is informational only; a disagreeing hint is logged.
    pub fn into_payload(self) -> Result<Vec<u8>> {
        match self.body {
            Pmt::Blob(bytes) => {
                if let Some(hint) = self.len_hint {
                    if hint != bytes.len() {
                        warn!(
                            len_hint = hint,
                            blob_len = bytes.len(),
                            "pdu length hint disagrees with blob length"
                        );
                    }
                }
                Ok(bytes)
            }
            other => Err(Error::MalformedPayload { kind: other.kind() }),
        }
    }
}

impl From<Vec<u8>> for Pdu {
    fn from(bytes: Vec<u8>) -> Self {
        Pdu::blob(bytes)
    }
}

impl From<&[u8]> for Pdu {
    fn from(bytes: &[u8]) -> Self {
        Pdu::blob(bytes.to_vec())
    }
}

/// Non-blocking supplier of PDUs.
///
/// `None` means nothing is ready right now, not that the source is exhausted.
pub trait PayloadSource {
    fn try_next(&mut self) -> Option<Pdu>;
}

impl<S: PayloadSource + ?Sized> PayloadSource for &mut S {
    fn try_next(&mut self) -> Option<Pdu> {
        (**self).try_next()
    }
}

impl<S: PayloadSource + ?Sized> PayloadSource for Box<S> {
    fn try_next(&mut self) -> Option<Pdu> {
        (**self).try_next()
    }
}

impl PayloadSource for VecDeque<Pdu> {
    fn try_next(&mut self) -> Option<Pdu> {
        self.pop_front()
    }
}

impl PayloadSource for crossbeam::channel::Receiver<Pdu> {
    fn try_next(&mut self) -> Option<Pdu> {
        // Empty and Disconnected both mean there is nothing to frame this call.
        self.try_recv().ok()
    }
}

/// Adapts a closure into a [`PayloadSource`].
pub struct FnSource<F: FnMut() -> Option<Pdu>>(pub F);

impl<F: FnMut() -> Option<Pdu>> PayloadSource for FnSource<F> {
    fn try_next(&mut self) -> Option<Pdu> {
        (self.0)()
    }
}

/// A source that never has anything ready.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptySource;

impl PayloadSource for EmptySource {
    fn try_next(&mut self) -> Option<Pdu> {
        None
    }
}
