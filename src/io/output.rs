use std::fs::File;
use std::io::{self, Write};

use is_terminal::IsTerminal;

use crate::error::Result;
use crate::types::OutputDest;
use codeckit::Value;

pub struct OutputConfig {
    pub dest: OutputDest,
    pub force: bool,
}

pub fn write_output(data: &[u8], config: &OutputConfig) -> Result<()> {
    match &config.dest {
        OutputDest::File(path) => {
            let mut file = File::create(path)?;
            file.write_all(data)?;
            Ok(())
        }
        OutputDest::Stdout => {
            let stdout = io::stdout();
            if stdout.is_terminal() && !config.force && std::str::from_utf8(data).is_err() {
                print_hex_preview(data);
            } else {
                let mut handle = stdout.lock();
                handle.write_all(data)?;
            }
            Ok(())
        }
    }
}

/// Writes a codec result: text and bytes verbatim, anything else as
/// pretty JSON. A newline follows text written to stdout.
pub fn write_value(value: &Value, config: &OutputConfig) -> Result<()> {
    let data = match value {
        Value::Text(s) => s.clone().into_bytes(),
        Value::Bytes(b) => b.clone(),
        other => serde_json::to_vec_pretty(&other.to_json())?,
    };
    write_output(&data, config)?;
    if matches!(config.dest, OutputDest::Stdout) && !matches!(value, Value::Bytes(_)) {
        println!();
    }
    Ok(())
}

fn print_hex_preview(data: &[u8]) {
    const BYTES_PER_LINE: usize = 16;
    const MAX_LINES: usize = 32;

    let total_lines = data.len().div_ceil(BYTES_PER_LINE);
    let lines_to_show = total_lines.min(MAX_LINES);

    eprintln!(
        "Binary output ({} bytes). Showing hex preview (use --force to output raw or --out @file):\n",
        data.len()
    );

    for (line_idx, chunk) in data.chunks(BYTES_PER_LINE).take(lines_to_show).enumerate() {
        let hex: Vec<String> = chunk.iter().map(|b| format!("{:02x}", b)).collect();
        let ascii: String = chunk
            .iter()
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
            .collect();
        println!("{:08x}  {:<48} |{}|", line_idx * BYTES_PER_LINE, hex.join(" "), ascii);
    }

    if total_lines > MAX_LINES {
        eprintln!("\n... ({} more bytes)", data.len() - (MAX_LINES * BYTES_PER_LINE));
    }
}
