use rand::{rngs::StdRng, Rng, SeedableRng};

use super::*;

fn bits(s: &str) -> BitString {
    s.parse().unwrap()
}

#[test]
fn test_bit_string_text_conversion() {
    let b = bits("0110001");

    assert_eq!(b.len(), 7);
    assert_eq!(b.to_string(), "0110001");
    assert_eq!(format!("{:?}", b), "BitString(0110001)");
    assert_eq!("01a".parse::<BitString>(), Err(ParseBitStringError('a')));
}

#[test]
fn test_bit_string_push_byte_msb_first() {
    let mut b = BitString::new();
    b.push_byte(b'h');

    assert_eq!(b.to_string(), "01101000");
}

#[test]
fn test_bit_string_prefix() {
    assert!(bits("01").is_prefix_of(&bits("011")));
    assert!(bits("011").is_prefix_of(&bits("011")));
    assert!(!bits("011").is_prefix_of(&bits("01")));
    assert!(!bits("10").is_prefix_of(&bits("011")));
    assert!(BitString::new().is_prefix_of(&bits("1")));
}

#[test]
fn test_pack_pads_to_byte_boundary() {
    let out = BinaryWriterBuilder::pack(&bits("101"));

    assert_eq!(out.written_bits, 3);
    assert_eq!(&*out.os, &[0b1010_0000]);
}

#[test]
fn test_pack_aligned_gets_no_padding() {
    let out = BinaryWriterBuilder::pack(&bits("1111000000001111"));

    assert_eq!(out.written_bits, 16);
    assert_eq!(&*out.os, &[0xF0, 0x0F]);
}

#[test]
fn test_pack_empty() {
    let out = BinaryWriterBuilder::pack(&BitString::new());

    assert_eq!(out.written_bits, 0);
    assert!(out.os.is_empty());
}

#[test]
fn test_push_bits_across_byte_boundaries() {
    let mut writer = BinaryWriterBuilder::new();

    writer.push_bits(0b101, 3);
    writer.push_bits(0xABCD, 16);
    writer.push_bit(true);

    let out = writer.build();

    assert_eq!(out.written_bits, 20);

    let mut reader = BinaryReader::new(&out.os, out.written_bits).unwrap();
    assert_eq!(reader.read_int(3), Some(0b101));
    assert_eq!(reader.read_int(16), Some(0xABCD));
    assert_eq!(reader.read_bit(), Some(true));
    assert_eq!(reader.read_bit(), None);
}

#[test]
fn test_reader_stops_at_limit() {
    let bytes = [0xFF, 0xFF];
    let mut reader = BinaryReader::new(&bytes, 9).unwrap();

    for _ in 0..9 {
        assert_eq!(reader.read_bit(), Some(true));
    }
    assert_eq!(reader.read_bit(), None);
    assert_eq!(reader.remaining(), 0);
}

#[test]
fn test_read_int_does_not_consume_when_short() {
    let bytes = [0b1100_0000];
    let mut reader = BinaryReader::new(&bytes, 2).unwrap();

    assert_eq!(reader.read_int(3), None);
    assert_eq!(reader.read_int(2), Some(0b11));
}

#[test]
fn test_reader_rejects_missing_bytes() {
    let bytes = [0u8; 2];

    match BinaryReader::new(&bytes, 17) {
        Err(HzipError::TruncatedInput { needed, available }) => {
            assert_eq!(needed, 3);
            assert_eq!(available, 2);
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_unpack_discards_padding() {
    // The padding bits are set on purpose; only the declared 5 bits count.
    let bytes = [0b1011_0111];

    assert_eq!(BinaryReader::unpack(&bytes, 5).unwrap(), bits("10110"));
}

#[test]
fn test_random_pack_unpack() {
    let mut rng = StdRng::seed_from_u64(0x5EED);

    for len in [1usize, 7, 8, 9, 63, 64, 65, 1000] {
        let original: BitString = (0..len).map(|_| rng.gen::<bool>()).collect();
        let packed = BinaryWriterBuilder::pack(&original);

        assert_eq!(packed.os.len(), BinaryReader::bytes_for(len));
        assert_eq!(BinaryReader::unpack(&packed.os, packed.written_bits).unwrap(), original);
    }
}
