use rand::{distr::Alphanumeric, rng, Rng};

/// Generates a random alphanumeric short code.
///
/// The length is drawn uniformly from `min_len..max_len` (upper bound
/// exclusive) and every character independently from `[a-zA-Z0-9]`.
/// A single thread-local, OS-seeded generator serves the whole call.
/// When `max_len <= min_len` the code is exactly `min_len` characters long.
pub fn generate_short_code(min_len: usize, max_len: usize) -> String {
    let mut rng = rng();

    let length = if max_len > min_len {
        rng.random_range(min_len..max_len)
    } else {
        min_len
    };

    (&mut rng)
        .sample_iter(Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Anonymous user ids are 9 or 10 alphanumeric characters
const USER_ID_MIN_LENGTH: usize = 9;
const USER_ID_MAX_LENGTH: usize = 11;

/// Longest user id accepted back from a client
pub const USER_ID_MAX_ACCEPTED: usize = 64;

pub fn generate_user_id() -> String {
    generate_short_code(USER_ID_MIN_LENGTH, USER_ID_MAX_LENGTH)
}

/// Accepts ids that could have been issued by this service or fit its column
pub fn is_valid_user_id(user_id: &str) -> bool {
    !user_id.is_empty()
        && user_id.len() <= USER_ID_MAX_ACCEPTED
        && user_id.chars().all(|c| c.is_ascii_alphanumeric())
}
