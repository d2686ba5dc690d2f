use std::{fs, path::PathBuf};

use clap::Parser;
use hzip_rust::codec::{inspect, HEADER_LEN};

#[derive(Parser, Debug)]
#[command(about = "Print the header, stored file name and code table of a .hzip file")]
struct Args {
    /// The .hzip file to inspect
    path: PathBuf,
    /// Also print the serialized tree bits
    #[arg(short, long, default_value_t = false)]
    tree: bool,
}

fn printable(byte: u8) -> String {
    if byte.is_ascii_graphic() {
        format!("'{}'", byte as char)
    } else {
        format!("{:#04x}", byte)
    }
}

fn main() {
    let args = Args::parse();

    let packed = fs::read(&args.path).unwrap_or_else(|e| panic!("Could not read {}: {}", args.path.display(), e));
    let inspection = inspect(&packed).unwrap_or_else(|e| panic!("{} is not a valid .hzip file: {}", args.path.display(), e));

    let header = inspection.header;
    println!("header               {} bytes", HEADER_LEN);
    println!("metadata bits        {}", header.info_bit_length);
    println!("tree bits            {}", header.tree_bit_length);
    println!("data bits            {}", header.data_bit_length);
    println!("stored file name     {}", inspection.metadata.display_name());

    if let Some(tree) = &inspection.tree {
        println!("distinct bytes       {}", tree.leaf_count());
        println!("tree depth           {}", tree.depth());
        if args.tree {
            println!("tree                 {}", tree.serialize());
        }
    }

    for (byte, code) in inspection.code_table.iter() {
        println!("{:>8}  {}", printable(byte), code);
    }
}
