use std::sync::atomic::{AtomicU32, Ordering};

/// Prefix of every generated project id.
pub const PROJECT_PREFIX: &str = "__docker_initiator__project-";

const PROJECT_DIGITS: usize = 8;

static NAME_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Generates a project id: [`PROJECT_PREFIX`] followed by the leading eight
/// digits of a random non-negative integer.
///
/// The source is not cryptographic and ids are not checked for collisions.
/// Two ids drawn in one test run collide with probability well under one in
/// ten million.
pub fn generate_project_id() -> String {
    let digits = loop {
        let candidate = (rand::random::<u64>() >> 1).to_string();
        if candidate.len() >= PROJECT_DIGITS {
            break candidate;
        }
    };

    format!("{}{}", PROJECT_PREFIX, &digits[..PROJECT_DIGITS])
}

/// Whether `id` has the shape produced by [`generate_project_id`].
pub fn is_project_id(id: &str) -> bool {
    id.strip_prefix(PROJECT_PREFIX).is_some_and(|digits| {
        digits.len() == PROJECT_DIGITS && digits.bytes().all(|b| b.is_ascii_digit())
    })
}

/// Process-unique name for topics and subscriptions, e.g. `orders-3`.
pub fn unique_id(prefix: &str) -> String {
    let id = NAME_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{}-{}", prefix, id)
}
