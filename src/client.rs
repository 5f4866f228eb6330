use std::sync::mpsc;
use thiserror::Error;

#[derive(Error, Debug)]
#[error("Error sending message")]
pub struct SendError;

/// How a session delivers messages to a connected client. Implementations
/// decide the transport; the session only sees this trait.
pub trait SendMsg {
    fn send(&self, msg: &str) -> Result<(), SendError>;
}

#[derive(Debug, Clone)]
pub struct Sender(pub mpsc::Sender<String>);

impl SendMsg for Sender {
    fn send(&self, msg: &str) -> Result<(), SendError> {
        self.0.send(msg.to_string()).map_err(|_| SendError)
    }
}
