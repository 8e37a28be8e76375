use crate::error::{HandlerResult, PortError};
use crate::port::Port;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

pub type SubscribeFn = Arc<dyn Fn(&dyn Any) -> Result<(), PortError> + Send + Sync>;
pub type Subscribers = Vec<Subscriber>;

/// Mapping between ports and their handlers
#[derive(Default)]
pub struct PortSubscriptions {
    subscriptions: HashMap<TypeId, Subscribers>,
}

impl PortSubscriptions {
    pub fn new() -> Self {
        Self {
            subscriptions: HashMap::new(),
        }
    }

    /// Returns the Subscribers registered for the given port TypeId
    pub fn lookup_subscribers(&self, lookup: &TypeId) -> Option<&Subscribers> {
        self.subscriptions.get(lookup)
    }

    /// Appends one Subscriber to the given port TypeId
    pub fn add_subscriber(&mut self, type_id: TypeId, subscriber: Subscriber) {
        self.subscriptions.entry(type_id).or_default().push(subscriber);
    }

    /// Appends several Subscribers to the given port TypeId, keeping their order
    pub fn add_subscribers(&mut self, type_id: TypeId, subscribers: Subscribers) {
        self.subscriptions
            .entry(type_id)
            .or_default()
            .extend(subscribers);
    }

    /// Runs every handler registered for `P`, in registration order.
    ///
    /// Stops at the first failing handler and returns its error.
    pub fn dispatch<P: Port>(&self, message: &P::Message) -> Result<usize, PortError> {
        let Some(subscribers) = self.lookup_subscribers(&TypeId::of::<P>()) else {
            return Err(PortError::NoSubscribers { port: P::NAME });
        };
        for subscriber in subscribers {
            subscriber.subscriber()(message)?;
        }
        Ok(subscribers.len())
    }
}

/// A type-erased handler bound to one port
#[derive(Clone)]
pub struct Subscriber {
    port: &'static str,
    subscriber: SubscribeFn,
}

impl Subscriber {
    pub fn new<F>(port: &'static str, handler: F) -> Self
    where
        F: Fn(&dyn Any) -> Result<(), PortError> + Send + Sync + 'static,
    {
        Self {
            port,
            subscriber: Arc::new(handler),
        }
    }

    pub fn port(&self) -> &'static str {
        self.port
    }

    pub fn subscriber(&self) -> SubscribeFn {
        Arc::clone(&self.subscriber)
    }
}

impl std::fmt::Debug for Subscriber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscriber").field("port", &self.port).finish()
    }
}

/// Wraps a handler for `P`'s message type so it can live in the registry
pub fn make_subscriber<P, F>(handler: F) -> Subscriber
where
    P: Port,
    F: Fn(&P::Message) -> HandlerResult + Send + Sync + 'static,
{
    let wrapped = move |message: &dyn Any| {
        let Some(specific) = message.downcast_ref::<P::Message>() else {
            return Err(PortError::UnexpectedMessage { port: P::NAME });
        };
        handler(specific).map_err(|source| PortError::Handler {
            port: P::NAME,
            source,
        })
    };

    Subscriber::new(P::NAME, wrapped)
}

#[cfg(test)]
mod port_subscription_tests {
    use super::*;
    use std::sync::Mutex;

    struct Greeting;

    impl Port for Greeting {
        type Message = String;
        const NAME: &'static str = "greeting";
    }

    struct Counter;

    impl Port for Counter {
        type Message = u32;
        const NAME: &'static str = "counter";
    }

    #[test]
    fn dispatch_subscriptions_test() {
        let shared_str1 = Arc::new(Mutex::new(String::new()));
        let shared_str_clone1 = Arc::clone(&shared_str1);

        let shared_str2 = Arc::new(Mutex::new(String::new()));
        let shared_str_clone2 = Arc::clone(&shared_str2);

        let mut subscriptions = PortSubscriptions::new();

        subscriptions.add_subscribers(
            TypeId::of::<Greeting>(),
            vec![
                make_subscriber::<Greeting, _>(move |message| {
                    *shared_str1.lock().unwrap() = format!("fire1: {message}");
                    Ok(())
                }),
                make_subscriber::<Greeting, _>(move |message| {
                    *shared_str2.lock().unwrap() = format!("fire2: {message}");
                    Ok(())
                }),
            ],
        );

        let delivered = subscriptions
            .dispatch::<Greeting>(&"test".to_string())
            .unwrap();

        assert_eq!(delivered, 2);
        assert_eq!(*shared_str_clone1.lock().unwrap(), "fire1: test");
        assert_eq!(*shared_str_clone2.lock().unwrap(), "fire2: test");
    }

    #[test]
    fn add_subscriber_appends_test() {
        let mut subscriptions = PortSubscriptions::new();
        subscriptions.add_subscriber(
            TypeId::of::<Counter>(),
            make_subscriber::<Counter, _>(|_| Ok(())),
        );
        subscriptions.add_subscriber(
            TypeId::of::<Counter>(),
            make_subscriber::<Counter, _>(|_| Ok(())),
        );

        let subscribers = subscriptions
            .lookup_subscribers(&TypeId::of::<Counter>())
            .unwrap();
        assert_eq!(subscribers.len(), 2);
        assert_eq!(subscribers[0].port(), "counter");
    }

    #[test]
    fn dispatch_without_subscribers_test() {
        let subscriptions = PortSubscriptions::new();

        let result = subscriptions.dispatch::<Counter>(&1);

        assert!(matches!(
            result,
            Err(PortError::NoSubscribers { port: "counter" })
        ));
    }

    #[test]
    fn handler_error_stops_dispatch_test() {
        let calls = Arc::new(Mutex::new(0u32));
        let calls_clone = Arc::clone(&calls);

        let mut subscriptions = PortSubscriptions::new();
        subscriptions.add_subscribers(
            TypeId::of::<Counter>(),
            vec![
                make_subscriber::<Counter, _>(|_| Err("boom".into())),
                make_subscriber::<Counter, _>(move |_| {
                    *calls_clone.lock().unwrap() += 1;
                    Ok(())
                }),
            ],
        );

        let result = subscriptions.dispatch::<Counter>(&7);

        match result {
            Err(PortError::Handler { port, source }) => {
                assert_eq!(port, "counter");
                assert_eq!(source.to_string(), "boom");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn wrong_message_type_test() {
        let subscriber = make_subscriber::<Counter, _>(|_| Ok(()));

        let result = subscriber.subscriber()(&"not a number");

        assert!(matches!(
            result,
            Err(PortError::UnexpectedMessage { port: "counter" })
        ));
    }
}
