//! Short random task ids: `td-` followed by base-36 characters.

use rand::Rng;

pub const ID_PREFIX: &str = "td-";
pub const ID_SUFFIX_LEN: usize = 6;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Draw ids from `rng` until one is not `taken`.
pub fn generate_id<R: Rng + ?Sized>(rng: &mut R, taken: impl Fn(&str) -> bool) -> String {
    loop {
        let mut id = String::with_capacity(ID_PREFIX.len() + ID_SUFFIX_LEN);
        id.push_str(ID_PREFIX);
        for _ in 0..ID_SUFFIX_LEN {
            id.push(char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]));
        }
        if !taken(&id) {
            return id;
        }
        tracing::debug!(%id, "generated id collides with a live task, drawing again");
    }
}
