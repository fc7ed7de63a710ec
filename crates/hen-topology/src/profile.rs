use serde::{Deserialize, Serialize};

/// Hardware properties of a host, copied onto a node when it is placed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HardwareProfile {
    pub motherboard: String,
    pub cputype: String,
    pub cpuspeed: String,
    /// Multiprocessor flag / CPU count, kept as the text the inventory reports.
    pub mpu: String,
    pub memory: String,
}

impl HardwareProfile {
    /// Attribute names used by the saved-topology document, in document order.
    pub const ATTRIBUTE_NAMES: [&'static str; 5] =
        ["motherboard", "cputype", "cpuspeed", "mpu", "memory"];

    pub fn get(&self, name: &str) -> Option<&str> {
        match name {
            "motherboard" => Some(&self.motherboard),
            "cputype" => Some(&self.cputype),
            "cpuspeed" => Some(&self.cpuspeed),
            "mpu" => Some(&self.mpu),
            "memory" => Some(&self.memory),
            _ => None,
        }
    }

    /// Sets a property by document attribute name. Returns `false` for unknown names.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        let slot = match name {
            "motherboard" => &mut self.motherboard,
            "cputype" => &mut self.cputype,
            "cpuspeed" => &mut self.cpuspeed,
            "mpu" => &mut self.mpu,
            "memory" => &mut self.memory,
            _ => return false,
        };
        *slot = value.into();
        true
    }
}

/// Network boot settings, editable after the node exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetbootInfo {
    pub loader: String,
    pub filesystem: String,
    pub kernel: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetbootField {
    Loader,
    Filesystem,
    Kernel,
}

impl NetbootField {
    pub fn as_str(self) -> &'static str {
        match self {
            NetbootField::Loader => "loader",
            NetbootField::Filesystem => "filesystem",
            NetbootField::Kernel => "kernel",
        }
    }
}

impl NetbootInfo {
    pub fn get(&self, field: NetbootField) -> &str {
        match field {
            NetbootField::Loader => &self.loader,
            NetbootField::Filesystem => &self.filesystem,
            NetbootField::Kernel => &self.kernel,
        }
    }

    pub fn set(&mut self, field: NetbootField, value: impl Into<String>) {
        let slot = match field {
            NetbootField::Loader => &mut self.loader,
            NetbootField::Filesystem => &mut self.filesystem,
            NetbootField::Kernel => &mut self.kernel,
        };
        *slot = value.into();
    }
}

/// Per-interface input for node creation: the declared hardware slot plus the
/// address the user typed in CIDR notation (may be empty).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceSlot {
    pub mac: String,
    pub model: String,
    pub port: String,
    pub switch: String,
    pub cidr: String,
}
