use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] trendscan_core::ValidationError),

    #[error(transparent)]
    Store(#[from] trendscan_core::StoreError),

    #[error(transparent)]
    Warehouse(#[from] trendscan_warehouse::WarehouseError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Serialization(_) => 4,
            Self::Store(_) | Self::Warehouse(_) | Self::Io(_) => 10,
        }
    }
}
