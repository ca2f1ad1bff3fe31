use bitframer::bits::{max_ones_run, unpack_lsb_first, FLAG};
use bitframer::*;
use test_harness::{bits, decode_frame, drive, pdu_queue, TestHarness};

#[test]
fn single_zero_byte_frame() {
    // Purpose: Trace one frame by hand. CRC-16/CCITT of [0x00] is 0xF078, sent
    // low byte first as 0x78 0xF0; no run of five ones occurs so nothing is stuffed.
    assert_eq!(crc16_ccitt(&[0x00]), 0xF078);

    let config = FramerConfig::new("packet_len").tx_delay(4);
    let mut producer = FrameProducer::from_config(&config, pdu_queue(&[vec![0x00]])).unwrap();
    let emission = producer.produce(1024).unwrap();

    let mut want = bits("0000 01111110");
    want.extend(unpack_lsb_first(&[0x00, 0x78, 0xF0]));
    want.extend_from_slice(&FLAG);
    assert_eq!(emission.bits, want);

    assert_eq!(emission.tags.len(), 1);
    let tag = &emission.tags[0];
    assert_eq!(tag.index, 0);
    assert_eq!(tag.len, 44);
    assert_eq!(&*tag.key, "packet_len");
}

#[test]
fn stuffed_payload_decodes() {
    // Purpose: Payloads full of ones force stuffing; the reference decoder must
    // recover them and the body must never carry six ones in a row.
    let framer = HdlcFramer::new(8);
    for payload in [vec![0xFF; 16], vec![0x7E; 9], vec![0x3F, 0xF8, 0x1F]] {
        let frame = framer.frame(&payload).unwrap();
        let body = &frame.bits()[16..frame.len() - 8];
        assert!(max_ones_run(body) <= 5);
        assert_eq!(decode_frame(frame.bits(), 8), payload);
    }
}

#[test]
fn frames_recovered_from_boundary_tags() {
    // Purpose: A downstream consumer that only sees the bit stream and the tags
    // can cut every frame back out, in submission order.
    let mut h = TestHarness::new();
    let payloads = h.gen_payloads(&[0, 1, 5, 32, 200, 3, 64]);
    let tx_delay = 12;
    let mut producer = FrameProducer::new(
        HdlcFramer::new(tx_delay),
        pdu_queue(&payloads),
        "packet_len",
    );

    let capacities: Vec<usize> = (0..64).map(|_| h.gen_capacity(2500)).collect();
    let capture = drive(&mut producer, capacities.into_iter().chain([1 << 16; 8]));

    let frames = capture.frames();
    assert_eq!(frames.len(), payloads.len());
    for (frame, payload) in frames.iter().zip(&payloads) {
        assert_eq!(&decode_frame(frame, tx_delay), payload);
    }
    // tags tile the stream exactly
    let total: usize = capture.tags.iter().map(|t| t.len).sum();
    assert_eq!(total, capture.stream.len());
}

#[test]
fn tags_carry_producer_identity() {
    let mut producer = FrameProducer::new(
        HdlcFramer::new(0),
        pdu_queue(&[b"a".to_vec(), b"b".to_vec()]),
        "burst",
    )
    .with_origin("acoustic_modem0");
    let capture = drive(&mut producer, [1000, 1000]);
    assert_eq!(capture.tags.len(), 2);
    for tag in &capture.tags {
        assert_eq!(&*tag.key, "burst");
        assert_eq!(&*tag.origin, "acoustic_modem0");
    }
    assert_eq!(capture.tags[1].index, 0);
    assert_eq!(capture.tags[1].absolute_index, capture.tags[0].len as u64);
}

#[test]
fn channel_fed_producer() {
    // Purpose: Payloads arriving over a channel are framed as they show up;
    // an empty channel is an idle call, not an error.
    let (tx, rx) = crossbeam::channel::unbounded::<Pdu>();
    let mut producer = FrameProducer::new(HdlcFramer::new(0), rx, "packet_len");

    assert!(producer.produce(1000).unwrap().bits.is_empty());
    tx.send(Pdu::blob(b"ping".to_vec())).unwrap();
    let emission = producer.produce(1000).unwrap();
    assert_eq!(emission.tags.len(), 1);
    assert_eq!(decode_frame(&emission.bits, 0), b"ping");
    drop(tx);
    assert!(producer.produce(1000).unwrap().bits.is_empty());
}
