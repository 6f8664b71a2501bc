use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use uuid::Builder;

/// Source of fresh identifiers for synthetic actions and branches.
///
/// Identifiers only need to be unique within one translation call.
pub trait IdAllocator: Send {
    fn next_id(&mut self) -> String;
}

/// Random UUIDs drawn from a `StdRng`. Seeding makes the sequence reproducible.
pub struct RandomIds {
    rng: StdRng,
}

impl RandomIds {
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomIds {
    fn default() -> Self {
        Self::from_os_rng()
    }
}

impl IdAllocator for RandomIds {
    fn next_id(&mut self) -> String {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        Builder::from_random_bytes(bytes).into_uuid().to_string()
    }
}

/// Counter-based, UUID-shaped identifiers: `00000000-0000-4000-8000-000000000001`, ...
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdAllocator for SequentialIds {
    fn next_id(&mut self) -> String {
        self.next += 1;
        format!("00000000-0000-4000-8000-{:012x}", self.next)
    }
}
