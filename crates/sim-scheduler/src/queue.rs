//! Host command queue
//!
//! Many writers, one reader, FIFO. Writers do not keep the reader alive: once it is
//! dropped every `push` reports [`QueueExpired`] and the writer should stop sending.

use crate::error::QueueExpired;
use std::sync::mpsc::{self, Receiver, Sender};

/// Creates a connected reader/writer pair.
pub fn message_queue<M>() -> (MessageReader<M>, MessageWriter<M>) {
    let (sender, receiver) = mpsc::channel();
    (MessageReader { receiver }, MessageWriter { sender })
}

pub struct MessageReader<M> {
    receiver: Receiver<M>,
}

impl<M> MessageReader<M> {
    /// Takes every message queued so far, oldest first, without blocking.
    pub fn drain(&self) -> impl Iterator<Item = M> + '_ {
        self.receiver.try_iter()
    }
}

pub struct MessageWriter<M> {
    sender: Sender<M>,
}

impl<M> MessageWriter<M> {
    pub fn push(&self, message: M) -> Result<(), QueueExpired> {
        self.sender.send(message).map_err(|_| QueueExpired)
    }
}

impl<M> Clone for MessageWriter<M> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}
