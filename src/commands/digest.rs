use codeckit::digest::Algorithm;
use codeckit::error::Result;
use codeckit::types::InputSource;

use crate::io::read_input;

pub fn run_digest(algorithm: Algorithm, input: &InputSource) -> Result<String> {
    match input {
        InputSource::File(path) => algorithm.digest_file(path),
        other => Ok(algorithm.digest_bytes(&read_input(other)?)),
    }
}
