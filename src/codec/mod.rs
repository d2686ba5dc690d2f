pub mod header;
pub mod metadata;

use std::{
    fs::{self, File},
    io::{self, BufReader, Read, Seek},
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};

use crate::{
    bitstreams::{BinaryReader, BinaryWriterBuilder},
    error::{HzipError, Result},
    frequency::FrequencyMap,
    huffman_tree::{CodeTable, HuffmanNode, HuffmanTree},
    properties::CodecProperties,
    utils::{paths, timer::Timer},
};

pub use header::{FileHeader, HEADER_LEN};
pub use metadata::FileMetadata;

/// Result of a successful decompression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decompressed {
    pub data: Vec<u8>,
    pub metadata: FileMetadata,
}

/// Everything but the data section, decoded.
#[derive(Debug, Clone)]
pub struct Inspection {
    pub header: FileHeader,
    pub metadata: FileMetadata,
    pub tree: Option<HuffmanTree>,
    pub code_table: CodeTable,
}

/// Compresses an in-memory buffer.
pub fn compress_bytes(data: &[u8], metadata: &FileMetadata) -> Result<Vec<u8>> {
    let frequencies = FrequencyMap::from_bytes(data);
    encode(&frequencies, data, Path::new("<memory>"), metadata)
}

/// Builds the header and the three packed sections. `input` is read a
/// second time, after `frequencies` was sampled from it.
fn encode<R: Read>(frequencies: &FrequencyMap, mut input: R, source_path: &Path, metadata: &FileMetadata) -> Result<Vec<u8>> {
    let read_error = |source: io::Error| HzipError::SourceRead { path: source_path.to_path_buf(), source };

    let tree = if frequencies.is_empty() {
        None
    } else {
        Some(HuffmanTree::from_frequencies(frequencies)?)
    };
    let code_table = tree.as_ref().map(HuffmanTree::code_table).unwrap_or_default();

    let mut data_writer = BinaryWriterBuilder::new();
    let mut buf = [0u8; 8192];
    let mut consumed = 0u64;
    loop {
        let n = match input.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(read_error(e)),
        };
        code_table.encode_into(&buf[..n], &mut data_writer)?;
        consumed += n as u64;
    }

    if consumed != frequencies.total() {
        return Err(read_error(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("source changed while compressing: sampled {} bytes, encoded {}", frequencies.total(), consumed),
        )));
    }

    let tree_bits = tree.as_ref().map(HuffmanTree::serialize).unwrap_or_default();

    let info = BinaryWriterBuilder::pack(&metadata.to_bits());
    let tree_section = BinaryWriterBuilder::pack(&tree_bits);
    let data_section = data_writer.build();

    let header = FileHeader::new(info.written_bits, tree_section.written_bits, data_section.written_bits)?;

    debug!(
        distinct_bytes = frequencies.len(),
        info_bits = header.info_bit_length,
        tree_bits = header.tree_bit_length,
        data_bits = header.data_bit_length,
        "encoded sections"
    );

    let mut out = Vec::with_capacity(header.file_len());
    header.write_to(&mut out)?;
    out.extend_from_slice(&info.os);
    out.extend_from_slice(&tree_section.os);
    out.extend_from_slice(&data_section.os);

    Ok(out)
}

/// Cuts the next section of `bits` bits off `packed`, advancing `offset`.
fn next_section<'a>(packed: &'a [u8], offset: &mut usize, bits: u32) -> Result<&'a [u8]> {
    let len = BinaryReader::bytes_for(bits as usize);
    let end = *offset + len;

    if end > packed.len() {
        return Err(HzipError::TruncatedInput { needed: end, available: packed.len() });
    }

    let section = &packed[*offset..end];
    *offset = end;
    Ok(section)
}

struct Sections<'a> {
    header: FileHeader,
    metadata: FileMetadata,
    tree: Option<HuffmanTree>,
    data: &'a [u8],
}

fn read_sections(packed: &[u8]) -> Result<Sections<'_>> {
    let header = FileHeader::from_bytes(packed)?;

    if header.file_len() > packed.len() {
        return Err(HzipError::TruncatedInput { needed: header.file_len(), available: packed.len() });
    }
    if header.file_len() < packed.len() {
        warn!(trailing = packed.len() - header.file_len(), "ignoring bytes after the data section");
    }

    let mut offset = HEADER_LEN;
    let info = next_section(packed, &mut offset, header.info_bit_length)?;
    let tree = next_section(packed, &mut offset, header.tree_bit_length)?;
    let data = next_section(packed, &mut offset, header.data_bit_length)?;

    let metadata = FileMetadata::decode(info, header.info_bit_length as usize)?;
    let tree = read_tree(tree, header.tree_bit_length as usize)?;

    Ok(Sections { header, metadata, tree, data })
}

fn read_tree(section: &[u8], bits: usize) -> Result<Option<HuffmanTree>> {
    if bits == 0 {
        return Ok(None);
    }

    let representation = BinaryReader::unpack(section, bits)?;
    let mut cursor = 0;
    let tree = HuffmanTree::deserialize(&representation, &mut cursor)?;

    if cursor != representation.len() {
        return Err(HzipError::MalformedTree(format!(
            "{} of {} bits left over after the tree",
            representation.len() - cursor,
            representation.len()
        )));
    }

    debug!(leaves = tree.leaf_count(), depth = tree.depth(), "rebuilt tree");

    Ok(Some(tree))
}

/// Walks the tree once per data bit, `0` left and `1` right, emitting a
/// byte at every leaf.
fn decode_data(tree: Option<&HuffmanTree>, section: &[u8], bits: usize) -> Result<Vec<u8>> {
    let Some(tree) = tree else {
        if bits != 0 {
            return Err(HzipError::MalformedTree(format!("{} data bits but no tree", bits)));
        }
        return Ok(Vec::new());
    };

    let mut reader = BinaryReader::new(section, bits)?;
    let mut out = Vec::with_capacity(bits / tree.depth().max(1));

    let root = &tree.root;
    let mut node = root;
    let mut depth = 0;

    while let Some(bit) = reader.read_bit() {
        match node {
            // only reachable when the whole tree is one leaf
            HuffmanNode::Leaf { byte, .. } => {
                if bit {
                    return Err(HzipError::MalformedTree(format!(
                        "bit 1 at position {} has no child under a single-leaf tree",
                        reader.read_bits - 1
                    )));
                }
                out.push(*byte);
                continue;
            }
            HuffmanNode::Internal { left, right, .. } => {
                node = if bit { &**right } else { &**left };
                depth += 1;
            }
        }

        if let HuffmanNode::Leaf { byte, .. } = node {
            out.push(*byte);
            node = root;
            depth = 0;
        }
    }

    if depth != 0 {
        return Err(HzipError::DecodeUnderflow { consumed: reader.read_bits, depth });
    }

    Ok(out)
}

/// Decompresses an in-memory `.hzip` image.
pub fn decompress_bytes(packed: &[u8]) -> Result<Decompressed> {
    let sections = read_sections(packed)?;
    let data = decode_data(sections.tree.as_ref(), sections.data, sections.header.data_bit_length as usize)?;

    Ok(Decompressed { data, metadata: sections.metadata })
}

/// Decodes header, metadata and tree, leaving the data section untouched.
pub fn inspect(packed: &[u8]) -> Result<Inspection> {
    let sections = read_sections(packed)?;
    let code_table = sections.tree.as_ref().map(HuffmanTree::code_table).unwrap_or_default();

    Ok(Inspection {
        header: sections.header,
        metadata: sections.metadata,
        tree: sections.tree,
        code_table,
    })
}

/// Compresses the file at `path` into `<dir>/<name>.<extension>` and returns
/// the path written.
pub fn compress(path: &Path, props: &CodecProperties) -> Result<PathBuf> {
    let read_error = |source: io::Error| HzipError::SourceRead { path: path.to_path_buf(), source };
    let mut timer = Timer::start();

    let mut file = File::open(path).map_err(read_error)?;
    let frequencies = FrequencyMap::sample(&file).map_err(read_error)?;
    file.rewind().map_err(read_error)?;
    timer.lap("sample");

    let metadata = FileMetadata::from_path(path);
    let packed = encode(&frequencies, BufReader::new(file), path, &metadata)?;
    timer.lap("encode");

    let mut file_name = paths::os_string(metadata.name.clone());
    file_name.push(".");
    file_name.push(&props.extension);
    let dest = props.output_dir_for(path).join(file_name);
    refuse_source_as_dest(path, &dest)?;

    paths::write_atomic(&dest, &packed, props.overwrite)?;
    timer.lap("write");

    info!(source = %path.display(), dest = %dest.display(), bytes = packed.len(), "compressed");
    debug!(phases = %timer, "compress timings");

    Ok(dest)
}

/// Restores the file stored in the `.hzip` at `path` under its original name
/// and returns the path written.
pub fn decompress(path: &Path, props: &CodecProperties) -> Result<PathBuf> {
    let expected = format!(".{}", props.extension);
    if paths::extension(path) != expected.as_bytes() {
        warn!(path = %path.display(), "input does not have the {} extension", expected);
    }
    let mut timer = Timer::start();

    let packed = fs::read(path).map_err(|source| HzipError::SourceRead { path: path.to_path_buf(), source })?;
    timer.lap("read");

    let decompressed = decompress_bytes(&packed)?;
    decompressed.metadata.validate()?;
    timer.lap("decode");

    let dest = props.output_dir_for(path).join(decompressed.metadata.file_name());
    refuse_source_as_dest(path, &dest)?;

    paths::write_atomic(&dest, &decompressed.data, props.overwrite)?;
    timer.lap("write");

    info!(source = %path.display(), dest = %dest.display(), bytes = decompressed.data.len(), "decompressed");
    debug!(phases = %timer, "decompress timings");

    Ok(dest)
}

/// Replacing the input with the output would lose the input, whatever the
/// overwrite setting says.
fn refuse_source_as_dest(source: &Path, dest: &Path) -> Result<()> {
    if paths::same_file(source, dest) {
        return Err(HzipError::DestinationWrite {
            path: dest.to_path_buf(),
            source: io::Error::new(io::ErrorKind::AlreadyExists, "destination is the input file"),
        });
    }
    Ok(())
}
