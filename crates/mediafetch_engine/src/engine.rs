use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use fetch_logging::{fetch_info, fetch_warn};
use mediafetch_core::{OpId, OperationFailure, OperationRequest};

use crate::{EngineEvent, OperationRunner};

enum EngineCommand {
    Dispatch { op_id: OpId, request: OperationRequest },
    OpenLink { url: String },
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Runs operations on a background tokio runtime; each reports through the sink.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(runner: OperationRunner, sink: Arc<dyn EventSink>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("mediafetch-engine")
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runner = Arc::new(runner);

        thread::Builder::new()
            .name("mediafetch-dispatch".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let runner = runner.clone();
                    let sink = sink.clone();
                    runtime.spawn(async move {
                        handle_command(runner.as_ref(), command, sink).await;
                    });
                }
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn dispatch(&self, op_id: OpId, request: OperationRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Dispatch { op_id, request });
    }

    pub fn open_link(&self, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::OpenLink { url: url.into() });
    }
}

async fn handle_command(runner: &OperationRunner, command: EngineCommand, sink: Arc<dyn EventSink>) {
    match command {
        EngineCommand::Dispatch { op_id, request } => {
            let guard = SettleGuard::new(op_id, sink);
            fetch_info!(
                "Dispatch op_id={} kind={} target={}",
                op_id,
                request.kind,
                request.target
            );
            let result = runner.run(&request).await;
            match &result {
                Ok(_) => fetch_info!("Settled op_id={} ok", op_id),
                Err(failure) => fetch_warn!("Settled op_id={} failed: {}", op_id, failure),
            }
            guard.settle(result);
        }
        EngineCommand::OpenLink { url } => {
            if let Err(failure) = runner.open_link(&url).await {
                fetch_warn!("Direct link {} not opened: {}", url, failure);
            }
        }
    }
}

/// Reports an operation's terminal state exactly once. Dropped unsettled
/// (the task unwound or was torn down), it reports an internal failure.
struct SettleGuard {
    op_id: OpId,
    sink: Arc<dyn EventSink>,
    settled: bool,
}

impl SettleGuard {
    fn new(op_id: OpId, sink: Arc<dyn EventSink>) -> Self {
        Self {
            op_id,
            sink,
            settled: false,
        }
    }

    fn settle(mut self, result: Result<mediafetch_core::Completion, OperationFailure>) {
        self.settled = true;
        self.sink.emit(EngineEvent::Settled {
            op_id: self.op_id,
            result,
        });
    }
}

impl Drop for SettleGuard {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        fetch_warn!("op_id={} ended without a result", self.op_id);
        self.sink.emit(EngineEvent::Settled {
            op_id: self.op_id,
            result: Err(OperationFailure::Internal(
                "operation ended without reporting a result".to_string(),
            )),
        });
    }
}
