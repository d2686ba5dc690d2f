use std::fs;

use hzip_rust::{compress, decompress, utils::paths, CodecProperties, HzipError};

fn props_into(dir: &std::path::Path) -> CodecProperties {
    CodecProperties::default().set_output_dir(Some(dir.to_path_buf()))
}

#[test]
fn test_compress_then_decompress_file() {
    let src_dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();

    let source = src_dir.path().join("happy.txt");
    fs::write(&source, b"happy_hip_hop").unwrap();

    let compressed = compress(&source, &CodecProperties::default()).unwrap();
    assert_eq!(compressed, src_dir.path().join("happy.hzip"));

    let restored = decompress(&compressed, &props_into(out_dir.path())).unwrap();
    assert_eq!(restored, out_dir.path().join("happy.txt"));
    assert_eq!(fs::read(&restored).unwrap(), b"happy_hip_hop");
}

#[test]
fn test_compressing_text_shrinks_it() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("lorem.txt");
    let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. ".repeat(200);
    fs::write(&source, &text).unwrap();

    let compressed = compress(&source, &CodecProperties::default()).unwrap();

    assert!(paths::file_size(&compressed).unwrap() < paths::file_size(&source).unwrap());
}

#[test]
fn test_file_without_extension_and_empty_file() {
    let src_dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();

    let source = src_dir.path().join("EMPTY");
    fs::write(&source, b"").unwrap();

    let compressed = compress(&source, &CodecProperties::default()).unwrap();
    let restored = decompress(&compressed, &props_into(out_dir.path())).unwrap();

    assert_eq!(restored.file_name().unwrap(), "EMPTY");
    assert!(fs::read(&restored).unwrap().is_empty());
}

#[test]
fn test_custom_extension() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("data.bin");
    fs::write(&source, [0u8, 1, 2, 3, 0, 0, 255]).unwrap();

    let props = CodecProperties::default().set_extension("huf").unwrap();
    let compressed = compress(&source, &props).unwrap();

    assert_eq!(compressed.extension().unwrap(), "huf");
}

#[test]
fn test_missing_source() {
    let dir = tempfile::tempdir().unwrap();

    let result = compress(&dir.path().join("nope.txt"), &CodecProperties::default());

    assert!(matches!(result, Err(HzipError::SourceRead { .. })));
}

#[test]
fn test_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("keep.txt");
    fs::write(&source, b"original").unwrap();

    let compressed = compress(&source, &CodecProperties::default()).unwrap();

    let props = CodecProperties::default().set_overwrite(false);
    let result = decompress(&compressed, &props);

    assert!(matches!(result, Err(HzipError::DestinationWrite { .. })));
    assert_eq!(fs::read(&source).unwrap(), b"original");
}

#[test]
fn test_corrupt_file_leaves_no_output() {
    let src_dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();

    let source = src_dir.path().join("story.txt");
    fs::write(&source, b"once upon a time there was a tree").unwrap();
    let compressed = compress(&source, &CodecProperties::default()).unwrap();

    let mut bytes = fs::read(&compressed).unwrap();
    bytes.pop();
    fs::write(&compressed, &bytes).unwrap();

    let err = decompress(&compressed, &props_into(out_dir.path())).unwrap_err();

    assert!(err.is_corrupt_input());
    assert_eq!(fs::read_dir(out_dir.path()).unwrap().count(), 0);
}

#[cfg(unix)]
#[test]
fn test_non_utf8_file_name_is_restored_byte_for_byte() {
    use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

    let src_dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();

    let name = OsStr::from_bytes(b"caf\xe9.txt");
    let source = src_dir.path().join(name);
    fs::write(&source, b"latin-1 name").unwrap();

    let compressed = compress(&source, &CodecProperties::default()).unwrap();
    assert_eq!(compressed.file_name().unwrap().as_bytes(), b"caf\xe9.hzip");

    let restored = decompress(&compressed, &props_into(out_dir.path())).unwrap();
    assert_eq!(restored.file_name().unwrap().as_bytes(), b"caf\xe9.txt");
    assert_eq!(fs::read(out_dir.path().join(name)).unwrap(), b"latin-1 name");
}

#[cfg(unix)]
#[test]
fn test_backslash_in_file_name_round_trips() {
    let src_dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();

    let source = src_dir.path().join("a\\b.txt");
    fs::write(&source, b"not a separator here").unwrap();

    let compressed = compress(&source, &CodecProperties::default()).unwrap();
    let restored = decompress(&compressed, &props_into(out_dir.path())).unwrap();

    assert_eq!(restored, out_dir.path().join("a\\b.txt"));
    assert_eq!(fs::read(&restored).unwrap(), b"not a separator here");
}

#[test]
fn test_compress_never_replaces_its_own_input() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("x.hzip");
    fs::write(&source, b"plain text that happens to end in .hzip").unwrap();

    let result = compress(&source, &CodecProperties::default());

    assert!(matches!(result, Err(HzipError::DestinationWrite { .. })));
    assert_eq!(fs::read(&source).unwrap(), b"plain text that happens to end in .hzip");
}

#[test]
fn test_decompress_never_replaces_its_own_input() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("a.txt");
    fs::write(&source, b"aaaabbc").unwrap();

    // the stored name is a.txt, the same as the compressed file's new name
    let compressed = compress(&source, &CodecProperties::default()).unwrap();
    fs::rename(&compressed, &source).unwrap();
    let packed = fs::read(&source).unwrap();

    let result = decompress(&source, &CodecProperties::default());

    assert!(matches!(result, Err(HzipError::DestinationWrite { .. })));
    assert_eq!(fs::read(&source).unwrap(), packed);
}
