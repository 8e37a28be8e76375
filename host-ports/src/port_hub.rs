use crate::error::{HandlerResult, PortError};
use crate::port::{Direction, InboundPort, OutboundPort, Port};
use crate::port_subscription::{make_subscriber, PortSubscriptions, Subscriber};
use std::any::TypeId;
use std::sync::RwLock;

/// Routes messages between a host and the handlers attached to its ports.
///
/// Handlers run synchronously on the caller's thread, in registration order.
/// The registry lock is released before any handler runs, so a handler may
/// send on another port of the same hub.
#[derive(Default)]
pub struct PortHub {
    port_subscriptions: RwLock<PortSubscriptions>,
}

impl PortHub {
    pub fn new() -> Self {
        Self {
            port_subscriptions: RwLock::new(PortSubscriptions::new()),
        }
    }

    pub fn initialize(port_subscriptions: PortSubscriptions) -> Self {
        Self {
            port_subscriptions: RwLock::new(port_subscriptions),
        }
    }

    /// Attaches a handler to a host → plumbing port.
    pub fn subscribe<P, F>(&self, handler: F) -> Result<(), PortError>
    where
        P: OutboundPort,
        F: Fn(&P::Message) -> HandlerResult + Send + Sync + 'static,
    {
        self.register::<P, F>(Direction::Outbound, handler)
    }

    /// Attaches a host-side listener to a plumbing → host port.
    pub fn listen<P, F>(&self, handler: F) -> Result<(), PortError>
    where
        P: InboundPort,
        F: Fn(&P::Message) -> HandlerResult + Send + Sync + 'static,
    {
        self.register::<P, F>(Direction::Inbound, handler)
    }

    /// Delivers a host message to every subscriber of `P`.
    pub fn emit<P: OutboundPort>(&self, message: P::Message) -> Result<usize, PortError> {
        self.deliver::<P>(Direction::Outbound, &message)
    }

    /// Delivers a reply to every host listener of `P`.
    pub fn send<P: InboundPort>(&self, message: P::Message) -> Result<usize, PortError> {
        self.deliver::<P>(Direction::Inbound, &message)
    }

    pub fn subscriber_count<P: Port>(&self) -> usize {
        self.port_subscriptions
            .read()
            .map(|subscriptions| {
                subscriptions
                    .lookup_subscribers(&TypeId::of::<P>())
                    .map_or(0, Vec::len)
            })
            .unwrap_or(0)
    }

    fn register<P, F>(&self, direction: Direction, handler: F) -> Result<(), PortError>
    where
        P: Port,
        F: Fn(&P::Message) -> HandlerResult + Send + Sync + 'static,
    {
        let mut subscriptions = self
            .port_subscriptions
            .write()
            .map_err(|_| PortError::Poisoned)?;
        subscriptions.add_subscriber(TypeId::of::<P>(), make_subscriber::<P, F>(handler));
        tracing::debug!(port = P::NAME, %direction, "Handler registered");
        Ok(())
    }

    fn deliver<P: Port>(
        &self,
        direction: Direction,
        message: &P::Message,
    ) -> Result<usize, PortError> {
        // Snapshot the handlers so none of them runs under the registry lock.
        let subscribers: Vec<Subscriber> = {
            let subscriptions = self
                .port_subscriptions
                .read()
                .map_err(|_| PortError::Poisoned)?;
            subscriptions
                .lookup_subscribers(&TypeId::of::<P>())
                .cloned()
                .unwrap_or_default()
        };

        if subscribers.is_empty() {
            tracing::warn!(port = P::NAME, %direction, "No subscribers found for port");
            return Err(PortError::NoSubscribers { port: P::NAME });
        }

        for subscriber in &subscribers {
            subscriber.subscriber()(message)?;
        }
        tracing::trace!(
            port = P::NAME,
            %direction,
            delivered = subscribers.len(),
            "Message delivered"
        );
        Ok(subscribers.len())
    }
}

#[cfg(test)]
mod port_hub_tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct Ping;

    impl Port for Ping {
        type Message = String;
        const NAME: &'static str = "ping";
    }

    impl OutboundPort for Ping {}

    struct Pong;

    impl Port for Pong {
        type Message = String;
        const NAME: &'static str = "pong";
    }

    impl InboundPort for Pong {}

    #[test]
    fn emit_reaches_subscribers_test() {
        let hub = PortHub::new();
        let received = Arc::new(Mutex::new(Vec::new()));
        let received_clone = Arc::clone(&received);

        hub.subscribe::<Ping, _>(move |message| {
            received_clone.lock().unwrap().push(message.clone());
            Ok(())
        })
        .unwrap();

        let delivered = hub.emit::<Ping>("hello".to_string()).unwrap();

        assert_eq!(delivered, 1);
        assert_eq!(*received.lock().unwrap(), vec!["hello".to_string()]);
        assert_eq!(hub.subscriber_count::<Ping>(), 1);
        assert_eq!(hub.subscriber_count::<Pong>(), 0);
    }

    #[test]
    fn initialize_with_prebuilt_subscriptions_test() {
        let calls = Arc::new(Mutex::new(0u32));
        let calls_clone = Arc::clone(&calls);

        let mut subscriptions = PortSubscriptions::new();
        subscriptions.add_subscriber(
            TypeId::of::<Ping>(),
            make_subscriber::<Ping, _>(move |_| {
                *calls_clone.lock().unwrap() += 1;
                Ok(())
            }),
        );
        let hub = PortHub::initialize(subscriptions);

        hub.emit::<Ping>("a".to_string()).unwrap();
        hub.emit::<Ping>("b".to_string()).unwrap();

        assert_eq!(*calls.lock().unwrap(), 2);
    }

    #[test]
    fn emit_without_subscribers_fails_test() {
        let hub = PortHub::new();

        let result = hub.emit::<Ping>("lost".to_string());

        assert!(matches!(
            result,
            Err(PortError::NoSubscribers { port: "ping" })
        ));
    }

    #[test]
    fn handler_can_reply_through_hub_test() {
        let hub = Arc::new(PortHub::new());
        let replies = Arc::new(Mutex::new(Vec::new()));
        let replies_clone = Arc::clone(&replies);

        hub.listen::<Pong, _>(move |message| {
            replies_clone.lock().unwrap().push(message.clone());
            Ok(())
        })
        .unwrap();

        let weak_hub = Arc::downgrade(&hub);
        hub.subscribe::<Ping, _>(move |message| {
            let hub = weak_hub.upgrade().ok_or("hub dropped")?;
            hub.send::<Pong>(format!("re: {message}"))?;
            Ok(())
        })
        .unwrap();

        hub.emit::<Ping>("one".to_string()).unwrap();
        hub.emit::<Ping>("two".to_string()).unwrap();

        assert_eq!(
            *replies.lock().unwrap(),
            vec!["re: one".to_string(), "re: two".to_string()]
        );
    }
}
