use std::time::Duration;

/// Bench link error type
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    #[error("no handshake from bench controller within {0:?}")]
    HandshakeTimeout(Duration),
    #[error("serial port error: {0}")]
    Port(#[from] serialport::Error),
    #[error("serial IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed frame {line:?}: {reason}")]
    MalformedFrame { line: String, reason: String },
    #[error("test bench controller is not connected")]
    NotConnected,
}
