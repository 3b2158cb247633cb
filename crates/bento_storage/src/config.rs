//! Configuration for a storage instance.

/// Construction-time tuning for a [`Storage`](crate::Storage).
///
/// Controls preallocation only; behavior is identical under every setting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageConfig {
    /// Initial row capacity of every column in a newly opened container.
    pub container_capacity: usize,

    /// Initial capacity of command buffers handed out by the storage.
    pub command_capacity: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            container_capacity: 16,
            command_capacity: 64,
        }
    }
}

impl StorageConfig {
    /// Creates a configuration that never preallocates.
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            container_capacity: 0,
            command_capacity: 0,
        }
    }

    /// Creates a configuration for large populations spread over few
    /// signatures.
    #[must_use]
    pub fn bulk() -> Self {
        Self {
            container_capacity: 1024,
            command_capacity: 4096,
        }
    }

    /// Builder method to set the initial container capacity.
    #[must_use]
    pub fn with_container_capacity(mut self, capacity: usize) -> Self {
        self.container_capacity = capacity;
        self
    }

    /// Builder method to set the initial command buffer capacity.
    #[must_use]
    pub fn with_command_capacity(mut self, capacity: usize) -> Self {
        self.command_capacity = capacity;
        self
    }
}
