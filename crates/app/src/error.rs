//! Error types for the host binary

use hongzhi_config::ConfigError;
use hongzhi_ipc::IpcError;
use hongzhi_painting::DescriptorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid descriptor: {0}")]
    Descriptor(#[from] DescriptorError),

    #[error("Protocol error: {0}")]
    Ipc(#[from] IpcError),

    #[error("Unknown catalog entry: {0}")]
    UnknownEntry(String),

    #[error("Failed to export image: {0}")]
    Export(#[from] image::ImageError),

    #[error("Task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Buffer of {width}x{height} does not match its pixel data")]
    BufferMismatch { width: u32, height: u32 },
}
