use thiserror::Error;

/// Errors raised while driving a Push.
#[derive(Error, Debug)]
pub enum PushError {
    #[error(transparent)]
    Surface(#[from] keystone_core::Error),

    #[error("Truncated MIDI message with status {status:#04x} ({len} bytes)")]
    Truncated { status: u8, len: usize },
}

pub type Result<T> = std::result::Result<T, PushError>;
