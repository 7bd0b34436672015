use std::sync::{mpsc, Arc};

use anyhow::Context;
use fetch_logging::{fetch_debug, fetch_info, fetch_warn};
use mediafetch_core::{Effect, Msg};
use mediafetch_engine::{
    ensure_output_dir, BrowserLinkOpener, EngineEvent, EngineHandle, EventSink, OperationRunner,
    ReqwestBackend, TransferTrigger,
};

use super::app::AppEvent;
use super::config::AppConfig;

/// Feeds engine settlements back into the update loop.
struct MsgSink {
    event_tx: mpsc::Sender<AppEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let msg = match event {
            EngineEvent::Settled { op_id, result } => {
                if let Err(failure) = &result {
                    fetch_warn!("Operation {} failed: {}", op_id, failure);
                }
                Msg::OperationSettled { op_id, result }
            }
        };
        if self.event_tx.send(AppEvent::Msg(msg)).is_err() {
            fetch_debug!("Update loop gone; dropping engine event");
        }
    }
}

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: &AppConfig, event_tx: mpsc::Sender<AppEvent>) -> anyhow::Result<Self> {
        ensure_output_dir(&config.output_dir)
            .with_context(|| format!("cannot use output directory {:?}", config.output_dir))?;
        let backend = ReqwestBackend::new(config.backend_settings())
            .with_context(|| format!("invalid backend URL {:?}", config.backend_url))?;
        let transfer = TransferTrigger::new(&config.output_dir, Arc::new(BrowserLinkOpener));
        let runner = OperationRunner::new(Arc::new(backend), transfer);

        let engine = EngineHandle::new(runner, Arc::new(MsgSink { event_tx }))
            .context("failed to start the engine runtime")?;
        fetch_info!(
            "Engine ready: backend={} output_dir={:?}",
            config.backend_url,
            config.output_dir
        );
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Dispatch { op_id, request } => {
                    fetch_debug!("Dispatch op_id={} kind={}", op_id, request.kind);
                    self.engine.dispatch(op_id, request);
                }
                Effect::OpenLink { url } => self.engine.open_link(url),
            }
        }
    }
}
