mod input;
mod output;

pub use input::{read_encoded, read_input, read_value};
pub use output::{write_output, write_value, OutputConfig};
