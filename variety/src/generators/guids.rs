//! GUID generator.

use uuid::{Builder, Uuid};

use crate::error::FuzzError;
use crate::fuzzer::Fuzzer;
use crate::generator::Generator;
use crate::hashing::HashArgument;
use crate::rng::SharedRng;

/// Generator for version-4 GUIDs built from sixteen drawn bytes
#[derive(Debug, Clone, Copy, Default)]
pub struct GuidGenerator;

impl Generator<Uuid> for GuidGenerator {
    fn generate(&self, rng: &SharedRng) -> Uuid {
        let mut bytes = [0u8; 16];
        rng.fill_bytes(&mut bytes);
        Builder::from_random_bytes(bytes).into_uuid()
    }

    fn arguments_hash(&self) -> u64 {
        "guid".argument_hash()
    }
}

impl Fuzzer {
    /// A random GUID, reproducible from the seed
    pub fn generate_guid(&mut self) -> Result<Uuid, FuzzError> {
        self.generate_from("generate_guid", &GuidGenerator)
    }
}
