use crate::error::ErrorKind;
use crate::input::Cursor;
use crate::Tag;

#[test]
fn reads_are_little_endian() {
    let data = [
        0x01, 0x02, // u16
        0x78, 0x56, 0x34, 0x12, // i32
        0xef, 0xcd, 0xab, 0x89, 0x67, 0x45, 0x23, 0x01, // i64
    ];
    let mut input = Cursor::new(&data);

    assert_eq!(input.consume_u16().unwrap(), 0x0201);
    assert_eq!(input.consume_i32().unwrap(), 0x12345678);
    assert_eq!(input.consume_i64().unwrap(), 0x0123456789abcdef);
    assert!(input.is_empty());
}

#[test]
fn floats() {
    let mut data = vec![];
    data.extend_from_slice(&1.5f32.to_le_bytes());
    data.extend_from_slice(&(-2.25f64).to_le_bytes());
    let mut input = Cursor::new(&data);

    assert_eq!(input.consume_f32().unwrap(), 1.5);
    assert_eq!(input.consume_f64().unwrap(), -2.25);
}

#[test]
fn short_read_does_not_move() {
    let data = [1, 2, 3];
    let mut input = Cursor::new(&data);

    let err = input.consume_i32().unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnexpectedEof);
    assert_eq!(err.offset(), 0);
    assert_eq!(input.position(), 0);
    assert_eq!(input.remaining(), 3);

    assert_eq!(input.consume_i16().unwrap(), 0x0201);
    assert!(input.consume_i16().is_err());
    assert_eq!(input.position(), 2);
}

#[test]
fn consume_borrows_input() {
    let data = [10, 20, 30, 40];
    let mut input = Cursor::new(&data);

    let bs = input.consume(3).unwrap();
    assert_eq!(bs, &[10, 20, 30]);
    assert_eq!(bs.as_ptr(), data.as_ptr());
    assert!(input.consume(2).is_err());
    assert_eq!(input.consume(1).unwrap(), &[40]);
    assert_eq!(input.consume(0).unwrap(), &[] as &[u8]);
}

#[test]
fn tag_out_of_range() {
    let data = [13];
    let mut input = Cursor::new(&data);

    let err = input.consume_tag().unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidTag(13));
    assert_eq!(input.position(), 0);
}

#[test]
fn tag_in_range() {
    let data = [9];
    let mut input = Cursor::new(&data);
    assert_eq!(input.consume_tag().unwrap(), Tag::List);
}

#[test]
fn str_needs_all_bytes() {
    let data = [3, 0, b'a', b'b'];
    let mut input = Cursor::new(&data);

    assert!(input.consume_str().is_err());
    assert_eq!(input.position(), 0);

    let data = [3, 0, b'a', b'b', b'c'];
    let mut input = Cursor::new(&data);
    assert_eq!(input.consume_str().unwrap(), b"abc");
    assert!(input.is_empty());
}

#[test]
fn array_negative_count() {
    let data = (-1i32).to_le_bytes();
    let mut input = Cursor::new(&data);

    let err = input.consume_array(4).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidCount(-1));
    assert_eq!(input.position(), 0);
}

#[test]
fn array_truncated() {
    let mut data = 2i32.to_le_bytes().to_vec();
    data.extend_from_slice(&[0; 15]);
    let mut input = Cursor::new(&data);

    let err = input.consume_array(8).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnexpectedEof);
    assert_eq!(err.offset(), 4);
    assert_eq!(input.position(), 0);
}

#[test]
fn array_exact() {
    let mut data = 2i32.to_le_bytes().to_vec();
    data.extend_from_slice(&[7; 8]);
    let mut input = Cursor::new(&data);

    assert_eq!(input.consume_array(4).unwrap(), &[7; 8]);
    assert!(input.is_empty());
}
