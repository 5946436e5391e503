use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use comic_logging::{comic_debug, comic_warn};

use crate::genres::{fetch_genres, FetchSettings, GenreClient, ReqwestGenreClient};
use crate::{EngineEvent, RequestId};

enum EngineCommand {
    LoadGenres { request_id: RequestId },
}

/// Runs genre fetches on a background tokio runtime so the caller's thread
/// never blocks on the network.
///
/// Dropping the handle shuts the runtime down. Fetches still in flight at that
/// point are cancelled and never produce an event; the worker logs how many
/// were dropped.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    pending: Arc<AtomicUsize>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> io::Result<Self> {
        Self::with_client(Arc::new(ReqwestGenreClient::new(settings)))
    }

    pub fn with_client(client: Arc<dyn GenreClient>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;
        let pending = Arc::new(AtomicUsize::new(0));
        let worker_pending = pending.clone();

        thread::Builder::new()
            .name("comic-engine".into())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let client = client.clone();
                    let event_tx = event_tx.clone();
                    let pending = worker_pending.clone();
                    runtime.spawn(async move {
                        handle_command(client.as_ref(), command, &pending, event_tx).await;
                    });
                }
                let dropped = worker_pending.load(Ordering::SeqCst);
                if dropped > 0 {
                    comic_warn!(
                        "Engine shutting down with {} genre request(s) in flight; dropping them",
                        dropped
                    );
                } else {
                    comic_debug!("Engine command channel closed");
                }
            })?;

        Ok(Self {
            cmd_tx,
            event_rx,
            pending,
        })
    }

    pub fn request_genres(&self, request_id: RequestId) {
        self.pending.fetch_add(1, Ordering::SeqCst);
        if self
            .cmd_tx
            .send(EngineCommand::LoadGenres { request_id })
            .is_err()
        {
            self.pending.fetch_sub(1, Ordering::SeqCst);
        }
    }

    /// Requests accepted but whose event has not been sent yet.
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until the next event; `None` once the worker is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    client: &dyn GenreClient,
    command: EngineCommand,
    pending: &AtomicUsize,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::LoadGenres { request_id } => {
            let result = fetch_genres(client).await;
            pending.fetch_sub(1, Ordering::SeqCst);
            let _ = event_tx.send(EngineEvent::GenresLoaded { request_id, result });
        }
    }
}
