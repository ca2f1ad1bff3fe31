#![no_main]
use bitframer::bits::max_ones_run;
use bitframer::{FrameProducer, Framer, HdlcFramer, Pdu};
use libfuzzer_sys::fuzz_target;
use std::collections::VecDeque;

// First byte picks tx_delay, the rest alternates capacity bytes and payload chunks.
fuzz_target!(|data: &[u8]| {
    let Some((&delay, rest)) = data.split_first() else {
        return;
    };
    let tx_delay = (delay % 64) as usize;
    let framer = HdlcFramer::new(tx_delay);

    let payloads: Vec<Vec<u8>> = rest.chunks(17).map(|c| c.to_vec()).collect();
    let capacities: Vec<usize> = rest.iter().map(|&b| b as usize * 4).collect();

    let mut expected = Vec::new();
    for p in &payloads {
        let frame = framer.frame(p).unwrap();
        assert!(max_ones_run(&frame.bits()[tx_delay + 8..frame.len() - 8]) <= 5);
        expected.extend_from_slice(frame.bits());
    }

    let src: VecDeque<Pdu> = payloads.iter().cloned().map(Pdu::from).collect();
    let mut producer = FrameProducer::new(framer, src, "packet_len");
    let mut stream = Vec::new();
    let tail = std::iter::repeat(1usize << 12).take(payloads.len() + 1);
    for capacity in capacities.into_iter().chain(tail) {
        let emission = producer.produce(capacity).unwrap();
        assert!(emission.bits.len() <= capacity);
        for tag in &emission.tags {
            assert_eq!(tag.absolute_index as usize, stream.len() + tag.index);
        }
        stream.extend_from_slice(&emission.bits);
    }
    assert_eq!(stream, expected);
});
