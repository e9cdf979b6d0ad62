//! Entry generator: synthetic descriptors, log entries and finds.

use chrono::{DateTime, Utc};

use crate::catalog::CategorySelection;
use crate::rng::SessionRng;
use crate::state::{Find, LogEntry};

/// Tokens per descriptor.
pub const DESCRIPTOR_LEN: usize = 12;

/// Bounds of a find's unit amount, `[low, high)`.
pub const UNIT_AMOUNT_RANGE: (f64, f64) = (0.001, 0.05);

pub const VOCABULARY: [&str; 73] = [
    "scarecrow", "fruit", "flow", "prune", "cultivat", "root", "bud", "farm", "plant",
    "irrigation", "field", "scare", "sun", "roots", "leaf", "tractor", "garden",
    "blossom", "green", "pesticide", "stem", "earth", "harvest", "pollinate", "shade",
    "permaculture", "moon", "star", "sky", "ocean", "mountain", "forest", "river",
    "lion", "tiger", "eagle", "wolf", "bear", "shark", "dolphin", "spider",
    "fire", "water", "wind", "thunder", "lightning", "storm", "snow", "rain",
    "gold", "silver", "copper", "iron", "steel", "diamond", "crystal", "pearl",
    "ancient", "mystic", "cosmic", "stellar", "lunar", "solar", "quantum", "digital",
    "crypto", "blockchain", "network", "protocol", "algorithm", "cipher", "token", "wallet",
];

/// Space-joined [`DESCRIPTOR_LEN`] tokens drawn uniformly with replacement.
pub fn generate_descriptor(rng: &mut SessionRng) -> String {
    (0..DESCRIPTOR_LEN)
        .map(|_| VOCABULARY[rng.index(VOCABULARY.len())])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Routine failure line.
pub fn generate_miss(rng: &mut SessionRng, now: DateTime<Utc>) -> LogEntry {
    LogEntry {
        id: rng.uuid(),
        descriptor: generate_descriptor(rng),
        success: false,
        amount_label: None,
        created_at: now,
    }
}

/// A find drawn from `selection`.
pub fn generate_find(
    rng: &mut SessionRng,
    selection: &CategorySelection,
    now: DateTime<Utc>,
) -> Find {
    let categories = selection.categories();
    let category = categories[rng.index(categories.len())];
    let unit_amount = rng.range(UNIT_AMOUNT_RANGE.0, UNIT_AMOUNT_RANGE.1);

    Find {
        id: rng.uuid(),
        category,
        descriptor: generate_descriptor(rng),
        unit_amount,
        value_amount: unit_amount * category.rate(),
        created_at: now,
    }
}

/// Success line referencing `find`.
pub fn success_entry(find: &Find) -> LogEntry {
    LogEntry {
        id: find.id,
        descriptor: find.descriptor.clone(),
        success: true,
        amount_label: Some(find.amount_label()),
        created_at: find.created_at,
    }
}
