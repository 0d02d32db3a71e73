//! Writer/Reader matrix for the big-endian primitives used by TASD packets.

use proptest::prelude::*;
use tasd_buffers::{min_uint_width, read_uint, BufferError, Reader, Writer};

#[test]
fn roundtrip_u8() {
    let mut w = Writer::new();
    w.u8(0x00);
    w.u8(0x7F);
    w.u8(0xFF);
    let data = w.flush();
    let mut r = Reader::new(&data);
    assert_eq!(r.u8().unwrap(), 0x00);
    assert_eq!(r.u8().unwrap(), 0x7F);
    assert_eq!(r.u8().unwrap(), 0xFF);
}

#[test]
fn roundtrip_u16() {
    let mut w = Writer::new();
    w.u16(0);
    w.u16(0x0102);
    w.u16(u16::MAX);
    let data = w.flush();
    let mut r = Reader::new(&data);
    assert_eq!(r.u16().unwrap(), 0);
    assert_eq!(r.u16().unwrap(), 0x0102);
    assert_eq!(r.u16().unwrap(), u16::MAX);
}

#[test]
fn roundtrip_u32() {
    let mut w = Writer::new();
    w.u32(0);
    w.u32(0x01020304);
    w.u32(u32::MAX);
    let data = w.flush();
    let mut r = Reader::new(&data);
    assert_eq!(r.u32().unwrap(), 0);
    assert_eq!(r.u32().unwrap(), 0x01020304);
    assert_eq!(r.u32().unwrap(), u32::MAX);
}

#[test]
fn roundtrip_u64() {
    let mut w = Writer::new();
    w.u64(0);
    w.u64(0x0102030405060708);
    w.u64(u64::MAX);
    let data = w.flush();
    assert_eq!(data.len(), 24);
    let mut r = Reader::new(&data);
    assert_eq!(r.u64().unwrap(), 0);
    assert_eq!(r.u64().unwrap(), 0x0102030405060708);
    assert_eq!(r.u64().unwrap(), u64::MAX);
}

#[test]
fn roundtrip_uint_every_width() {
    let cases: [(u32, usize); 8] = [
        (0, 1),
        (0xFF, 1),
        (0x100, 2),
        (0xFFFF, 2),
        (0x1_0000, 3),
        (0xFF_FFFF, 3),
        (0x100_0000, 4),
        (u32::MAX, 4),
    ];
    for (value, width) in cases {
        assert_eq!(min_uint_width(value as u64).unwrap(), width);
        let mut w = Writer::new();
        w.uint(value, width).unwrap();
        let data = w.flush();
        assert_eq!(data.len(), width);
        assert_eq!(read_uint(&data, 0, width).unwrap(), value);
        assert_eq!(Reader::new(&data).uint(width).unwrap(), value);
    }
}

#[test]
fn roundtrip_buf_and_utf8() {
    let mut w = Writer::new();
    w.buf(&[]);
    w.buf(&[0xDE, 0xAD, 0xBE, 0xEF]);
    w.utf8("caf\u{e9}");
    let data = w.flush();
    let mut r = Reader::new(&data);
    assert_eq!(r.buf(0).unwrap(), &[] as &[u8]);
    assert_eq!(r.buf(4).unwrap(), &[0xDE, 0xAD, 0xBE, 0xEF]);
    assert_eq!(r.utf8_rest().unwrap(), "caf\u{e9}");
}

#[test]
fn reader_reports_position_of_short_read() {
    let data = [0x00, 0x01, 0x02];
    let mut r = Reader::new(&data);
    r.u8().unwrap();
    assert_eq!(
        r.u32(),
        Err(BufferError::EndOfBuffer {
            offset: 1,
            needed: 4,
            available: 2
        })
    );
}

#[test]
fn uint_width_outside_range_is_rejected() {
    let data = [0u8; 16];
    for width in [0usize, 5, 8] {
        assert_eq!(
            Reader::new(&data).uint(width),
            Err(BufferError::UnsupportedWidth(width as u64))
        );
    }
}

proptest! {
    #[test]
    fn prop_min_width_is_minimal(n in 0u64..=u32::MAX as u64) {
        let width = min_uint_width(n).unwrap();
        prop_assert!((1..=4).contains(&width));
        prop_assert!(n < 1u64 << (8 * width));
        if width > 1 {
            prop_assert!(n >= 1u64 << (8 * (width - 1)));
        }
    }

    #[test]
    fn prop_uint_round_trip(n in any::<u32>()) {
        let width = min_uint_width(n as u64).unwrap();
        let mut w = Writer::new();
        w.uint(n, width).unwrap();
        let data = w.flush();
        prop_assert_eq!(Reader::new(&data).uint(width).unwrap(), n);
    }

    #[test]
    fn prop_u64_round_trip(n in any::<u64>()) {
        let mut w = Writer::new();
        w.u64(n);
        let data = w.flush();
        prop_assert_eq!(Reader::new(&data).u64().unwrap(), n);
    }

    #[test]
    fn prop_too_large_is_rejected(n in (1u64 << 32)..) {
        prop_assert_eq!(min_uint_width(n), Err(BufferError::UnsupportedWidth(n)));
    }
}
