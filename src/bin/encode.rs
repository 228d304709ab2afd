use std::env;
use std::fs;
use std::time::Instant;

use log::{debug, error, info};

use huffman_coding_rust::{count_frequencies, encode_file, entropy_from_freq};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        error!("Usage: {} <input_file> [output_file]", args[0]);
        eprintln!("  📂 <input_file>:  path to the file to encode.");
        eprintln!("  💾 [output_file]: path to write the encoded output, defaults to 'output.huff'.");
        std::process::exit(1);
    }

    let input_filepath = &args[1];
    let output_filepath = args.get(2).map_or("output.huff", |s| s.as_str());

    info!("--- Start Encoding ---");

    let raw_data = match fs::read(input_filepath) {
        Ok(data) => data,
        Err(e) => {
            error!("Failed to read input file {}: {}", input_filepath, e);
            std::process::exit(1);
        }
    };
    let original_len = raw_data.len() as u64;
    debug!("Read {} bytes from {}", original_len, input_filepath);

    let start_time = Instant::now();
    if let Err(e) = encode_file(&raw_data, output_filepath) {
        error!("Failed to encode into {}: {}", output_filepath, e);
        std::process::exit(1);
    }
    debug!("Encoding finished in {:.2?}.", start_time.elapsed());

    let total_output_size = fs::metadata(output_filepath).map(|m| m.len()).unwrap_or(0);
    let file_entropy = entropy_from_freq(&count_frequencies(&raw_data));
    let compression_ratio = if original_len > 0 {
        100.0 * (1.0 - (total_output_size as f64) / (original_len as f64))
    } else {
        0.0
    };

    println!(
        "\r\n✅ Encoding successful.\n\
         📂  Input:       {} ({} bytes)\n\
         💾  Output:      {} ({} bytes)\n\
         ℹ️  Entropy:     {:.4} bits/symbol\n\
         🗜️  Ratio:       {:.4}%",
        input_filepath,
        original_len,
        output_filepath,
        total_output_size,
        file_entropy,
        compression_ratio
    );

    info!("--- End ---");
}
