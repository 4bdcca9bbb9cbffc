use std::fmt::Write;

use sha2::{Digest, Sha256};

const MAX_STEM_LEN: usize = 64;

/// Filesystem-safe, deterministic snapshot name for a model id:
/// `{sanitized_id}--{short_hash(id)}.json`.
///
/// The hash keeps ids apart that sanitize to the same stem.
pub fn model_filename(id: &str) -> String {
    format!("{}--{}.json", sanitize_id(id), short_hash(id))
}

fn sanitize_id(id: &str) -> String {
    let mut stem = String::with_capacity(id.len().min(MAX_STEM_LEN));
    let mut prev_underscore = false;
    for c in id.chars() {
        let c = if c.is_ascii_alphanumeric() || c == '-' {
            c
        } else {
            '_'
        };
        if c == '_' && prev_underscore {
            continue;
        }
        prev_underscore = c == '_';
        stem.push(c);
    }

    let mut stem = stem.trim_matches(&['_', '-'][..]).to_string();
    stem.truncate(MAX_STEM_LEN);
    if stem.is_empty() {
        stem.push_str("model");
    }
    stem
}

fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
