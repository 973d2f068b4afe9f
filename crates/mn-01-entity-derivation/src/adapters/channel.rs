//! Listener forwarding mutations to an async consumer over a tokio channel.
//!
//! The sink task owns batching and persistence; a dropped receiver surfaces
//! as [`ListenerError::Closed`] on the next emission.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::error;

use crate::domain::ListenerError;
use crate::ports::{EntityListener, Mutation};

#[derive(Debug, Clone)]
pub struct ChannelListener {
    sender: UnboundedSender<Mutation>,
}

impl ChannelListener {
    pub fn new(sender: UnboundedSender<Mutation>) -> Self {
        Self { sender }
    }

    /// Listener plus the receiving end for the sink task.
    pub fn channel() -> (Self, UnboundedReceiver<Mutation>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }
}

impl EntityListener for ChannelListener {
    fn emit(&mut self, mutation: Mutation) -> Result<(), ListenerError> {
        self.sender.send(mutation).map_err(|_| {
            error!("Mutation sink closed");
            ListenerError::Closed
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{Entity, EntityId};

    #[tokio::test]
    async fn test_forwards_in_order() {
        let (mut listener, mut receiver) = ChannelListener::channel();
        listener.on_entity(Entity::new(EntityId::num(1), 1)).unwrap();
        listener.on_entity(Entity::new(EntityId::num(2), 2)).unwrap();
        drop(listener);

        let mut ids = Vec::new();
        while let Some(mutation) = receiver.recv().await {
            if let Mutation::Entity(entity) = mutation {
                ids.push(entity.id);
            }
        }
        assert_eq!(ids, vec![EntityId::num(1), EntityId::num(2)]);
    }

    #[test]
    fn test_closed_receiver() {
        let (mut listener, receiver) = ChannelListener::channel();
        drop(receiver);
        let err = listener.on_entity(Entity::new(EntityId::num(1), 1)).unwrap_err();
        assert_eq!(err, ListenerError::Closed);
    }
}
