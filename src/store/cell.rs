use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// An owned reactive value. Every write is visible to all subscribers;
/// concurrent writers resolve last-write-wins.
#[derive(Debug)]
pub struct Store<T> {
    sender: watch::Sender<T>,
}

impl<T: Clone + Send + Sync + 'static> Store<T> {
    pub fn new(initial: T) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }

    /// Replaces the value. Succeeds with or without subscribers.
    pub fn set(&self, value: T) {
        self.sender.send_replace(value);
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.sender.send_modify(f);
    }

    /// The receiver starts at the current value; `changed()` resolves on the
    /// next write.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }

    /// Stream yielding the current value, then every subsequent one.
    pub fn watch(&self) -> WatchStream<T> {
        WatchStream::new(self.sender.subscribe())
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl<T: Clone + Default + Send + Sync + 'static> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
