//! Device identifier generation
//!
//! Windsurf reads three telemetry identifiers from storage.json:
//! - `telemetry.machineId`: 32 random bytes, lowercase hex
//! - `telemetry.macMachineId`: 32 random bytes, lowercase hex
//! - `telemetry.devDeviceId`: random UUID v4

use rand::RngCore;
use serde_json::{Map, Value};
use uuid::Uuid;

pub const MACHINE_ID_KEY: &str = "telemetry.machineId";
pub const MAC_MACHINE_ID_KEY: &str = "telemetry.macMachineId";
pub const DEV_DEVICE_ID_KEY: &str = "telemetry.devDeviceId";

/// Prefix shared by every identifier key Windsurf stores
pub const TELEMETRY_PREFIX: &str = "telemetry.";

/// Telemetry key that is never shown to the user
pub const SQM_ID_KEY: &str = "telemetry.sqmId";

/// A freshly generated set of device identifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierSet {
    pub machine_id: String,
    pub mac_machine_id: String,
    pub dev_device_id: String,
}

impl IdentifierSet {
    /// Generate new identifiers from the OS-seeded CSPRNG
    pub fn generate() -> Self {
        Self {
            machine_id: random_hex_id(),
            mac_machine_id: random_hex_id(),
            dev_device_id: Uuid::new_v4().to_string(),
        }
    }

    /// Key/value pairs in storage.json order
    pub fn entries(&self) -> [(&'static str, &str); 3] {
        [
            (MACHINE_ID_KEY, &self.machine_id),
            (MAC_MACHINE_ID_KEY, &self.mac_machine_id),
            (DEV_DEVICE_ID_KEY, &self.dev_device_id),
        ]
    }

    /// Write the identifiers into a document, overwriting same-named keys
    pub fn merge_into(&self, document: &mut Map<String, Value>) {
        for (key, value) in self.entries() {
            document.insert(key.to_string(), Value::String(value.to_string()));
        }
    }
}

/// Shorthand for [`IdentifierSet::generate`]
pub fn generate_identifiers() -> IdentifierSet {
    IdentifierSet::generate()
}

/// 32 random bytes as 64 lowercase hex characters
fn random_hex_id() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
