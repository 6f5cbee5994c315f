//! Debounce de valores
//!
//! `Debouncer` retrasa la publicación de un valor que cambia rápido (el texto
//! de búsqueda) hasta que se mantiene estable durante `delay`. Cada valor nuevo
//! cancela la publicación pendiente del anterior.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Intervalo por defecto
pub const DEFAULT_DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

/// Temporizador cancelable con un único dueño.
///
/// `push` debe llamarse dentro de un runtime de tokio.
pub struct Debouncer<T> {
    delay: Duration,
    tx: Arc<watch::Sender<T>>,
    rx: watch::Receiver<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T> Debouncer<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(initial: T, delay: Duration) -> Self {
        let (tx, rx) = watch::channel(initial);
        Self {
            delay,
            tx: Arc::new(tx),
            rx,
            pending: None,
        }
    }

    pub fn with_default_delay(initial: T) -> Self {
        Self::new(initial, DEFAULT_DEBOUNCE_DELAY)
    }

    /// Programar `value`, cancelando cualquier publicación pendiente
    pub fn push(&mut self, value: T) {
        self.cancel();

        let tx = Arc::clone(&self.tx);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tx.send_replace(value);
        }));
    }

    /// Publicar `value` de inmediato (reset de filtros)
    pub fn set_now(&mut self, value: T) {
        self.cancel();
        self.tx.send_replace(value);
    }

    /// Cancelar la publicación pendiente, si la hay
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Último valor publicado
    pub fn current(&self) -> T {
        self.rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
