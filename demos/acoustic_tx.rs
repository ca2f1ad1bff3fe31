//! Simulates a modem transmit path pulling frames under a varying buffer size.
//!
//! A producer thread feeds payloads over a channel; the "modem" loop offers a
//! different amount of output space on every call and prints the frame tags.
//!
//! Run with `RUST_LOG=bitframer=trace cargo run --example acoustic_tx` to see
//! the framer's own logging.

use bitframer::{FrameProducer, FramerConfig, Pdu, Pmt};
use std::thread;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

fn main() -> bitframer::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();

    let (tx, rx) = crossbeam::channel::unbounded::<Pdu>();
    let feeder = thread::spawn(move || {
        for i in 0..8u8 {
            let msg = format!("beacon {i}: depth 12.{i} m").into_bytes();
            if tx.send(Pdu::new(Some(msg.len()), Pmt::Blob(msg))).is_err() {
                break;
            }
        }
    });
    let _ = feeder.join();

    let config = FramerConfig::new("packet_len").tx_delay(32);
    let mut producer = FrameProducer::from_config(&config, rx)?;
    info!(origin = producer.origin(), "framer ready");

    // The sound card asks for a different amount each period.
    let periods = [64usize, 512, 128, 1024, 300, 2048, 256, 2048, 2048, 2048];
    for (call, capacity) in periods.iter().enumerate() {
        let emission = producer.produce(*capacity)?;
        info!(
            call,
            capacity,
            produced = emission.bits.len(),
            backlog = producer.backlog_len(),
            "period"
        );
        for tag in &emission.tags {
            info!(
                index = tag.index,
                absolute = tag.absolute_index,
                len = tag.len,
                key = &*tag.key,
                "frame start"
            );
        }
    }

    let stats = producer.stats();
    info!(
        payloads = stats.payloads_received,
        frames = stats.frames_emitted,
        deferred = stats.frames_deferred,
        bits = stats.bits_emitted,
        "done"
    );
    Ok(())
}
