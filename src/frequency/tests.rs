use std::io::Cursor;

use super::*;

#[test]
fn test_counts_every_occurrence() {
    let freq = FrequencyMap::from_bytes(b"happy_hip_hop");

    assert_eq!(freq.len(), 7);
    assert_eq!(freq.get(b'h'), Some(3));
    assert_eq!(freq.get(b'p'), Some(4));
    assert_eq!(freq.get(b'_'), Some(2));
    assert_eq!(freq.get(b'a'), Some(1));
    assert_eq!(freq.get(b'z'), None);
    assert_eq!(freq.total(), 13);
}

#[test]
fn test_counts_zero_and_high_bytes() {
    let freq = FrequencyMap::from_bytes(&[0, 0, 255, 0x80, 0]);

    assert_eq!(freq.get(0), Some(3));
    assert_eq!(freq.get(255), Some(1));
    assert_eq!(freq.get(0x80), Some(1));
}

#[test]
fn test_empty_input() {
    let freq = FrequencyMap::sample(Cursor::new(Vec::<u8>::new())).unwrap();

    assert!(freq.is_empty());
    assert_eq!(freq.total(), 0);
}

#[test]
fn test_sample_matches_in_memory_counting() {
    let data: Vec<u8> = (0..50_000u32).map(|i| (i * 7 % 251) as u8).collect();

    let sampled = FrequencyMap::sample(Cursor::new(&data)).unwrap();

    assert_eq!(sampled, FrequencyMap::from_bytes(&data));
    assert_eq!(sampled.total(), data.len() as u64);
}

#[test]
fn test_iteration_is_ordered_by_byte() {
    let freq = FrequencyMap::from_bytes(b"cabca");
    let pairs: Vec<_> = freq.iter().collect();

    assert_eq!(pairs, vec![(b'a', 2), (b'b', 1), (b'c', 2)]);
}
