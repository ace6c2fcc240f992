//! Single-threaded session driver
//!
//! Feeds host messages into a [`DrawingSession`] in arrival order and sleeps
//! until the session's pending prune is due when there is nothing to read.
//! Pointer samples are stamped with the driver's own clock.

use std::time::Duration;

use ab_glyph::FontArc;
use hongzhi_config::DisplayConfig;
use hongzhi_ipc::{EngineToHost, HostToEngine};
use hongzhi_painting::{ControlState, DrawSettings, DrawingSession, StrokePoint, SymmetryMode};
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

use crate::catalog::{self, CatalogEntry};
use crate::config::AppConfig;
use crate::convert::{paper_from_spec, settings_from_update, template_from_spec};
use crate::error::AppError;

/// Open the session named by the config and lay it out in the default
/// container
pub fn open_session(config: &AppConfig, font: Option<FontArc>) -> Result<DrawingSession, AppError> {
    let mut session = match catalog::lookup(&config.base)? {
        CatalogEntry::Template(template) => {
            let mut session = DrawingSession::cut(template_from_spec(&template.spec)?, config.engine.clone());
            session.set_settings(DrawSettings {
                symmetry: SymmetryMode::try_from(template.symmetry)?,
                ..DrawSettings::default()
            });
            session
        }
        CatalogEntry::Paper(paper) => DrawingSession::write(paper_from_spec(&paper), config.engine.clone()),
    };
    session.set_font(font);
    session.resize(config.display);
    Ok(session)
}

pub struct Driver {
    session: DrawingSession,
    started: Instant,
    /// Last state reported to the host
    processing: bool,
    buffer: Option<(u32, u32)>,
}

impl Driver {
    pub fn new(mut session: DrawingSession) -> Self {
        // the host paints the opening buffer in full
        session.take_dirty_region();
        let processing = session.is_processing();
        let buffer = session.surface().map(|surface| (surface.width, surface.height));
        Self {
            session,
            started: Instant::now(),
            processing,
            buffer,
        }
    }

    fn now_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    fn deadline(&self) -> Option<Instant> {
        self.session
            .next_deadline()
            .map(|ms| self.started + Duration::from_secs_f64(ms.max(0.0) / 1000.0))
    }

    /// Run until the input channel closes. A prune still pending at that
    /// point is flushed before the session is handed back.
    pub async fn run(
        mut self,
        mut input: mpsc::Receiver<HostToEngine>,
        output: mpsc::UnboundedSender<EngineToHost>,
    ) -> DrawingSession {
        loop {
            let deadline = self.deadline();
            tokio::select! {
                message = input.recv() => match message {
                    Some(message) => self.handle(message, &output),
                    None => break,
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some(report) = self.session.flush_pending_prune() {
                        debug!("Driver: prune cleared {} px", report.cleared);
                    }
                }
            }
            self.publish(&output);
        }

        self.session.flush_pending_prune();
        self.publish(&output);
        info!("Driver: input closed, {} undo levels", self.session.history_len());
        self.session
    }

    fn handle(&mut self, message: HostToEngine, output: &mpsc::UnboundedSender<EngineToHost>) {
        let now = self.now_ms();
        match message {
            HostToEngine::Layout(layout) => {
                self.session
                    .resize(DisplayConfig::new(layout.width, layout.height).with_scale(layout.scale));
            }
            HostToEngine::PointerDown(event) => {
                if let Some(p) = self.session.map_pointer(event.x, event.y) {
                    self.session.pointer_down(StrokePoint::new(p.x, p.y, now));
                }
            }
            HostToEngine::PointerMove(event) => {
                if let Some(p) = self.session.map_pointer(event.x, event.y) {
                    self.session.pointer_move(StrokePoint::new(p.x, p.y, now));
                }
            }
            HostToEngine::PointerUp(event) => {
                if let Some(p) = self.session.map_pointer(event.x, event.y) {
                    self.session.pointer_up(StrokePoint::new(p.x, p.y, now));
                }
            }
            HostToEngine::Settings(update) => match settings_from_update(&update, self.session.mode()) {
                Ok(settings) => self.session.set_settings(settings),
                Err(err) => report(output, err.into()),
            },
            HostToEngine::Template(spec) => match template_from_spec(&spec) {
                Ok(template) => self.session.set_template(template),
                Err(err) => report(output, err.into()),
            },
            HostToEngine::Paper(spec) => self.session.set_paper(paper_from_spec(&spec)),
            HostToEngine::Controls(counters) => self.session.apply_controls(ControlState {
                clear_counter: counters.clear_counter,
                undo_counter: counters.undo_counter,
            }),
        }
    }

    /// Report processing, buffer size and damage changes
    fn publish(&mut self, output: &mpsc::UnboundedSender<EngineToHost>) {
        let processing = self.session.is_processing();
        if processing != self.processing {
            self.processing = processing;
            send(output, EngineToHost::ProcessingChanged { processing });
        }
        let buffer = self.session.surface().map(|surface| (surface.width, surface.height));
        if buffer != self.buffer {
            self.buffer = buffer;
            if let Some((width, height)) = buffer {
                send(output, EngineToHost::BufferResized { width, height });
            }
        }
        if let Some(region) = self.session.take_dirty_region() {
            send(
                output,
                EngineToHost::Damaged {
                    x: region.x,
                    y: region.y,
                    width: region.width,
                    height: region.height,
                },
            );
        }
    }
}

fn report(output: &mpsc::UnboundedSender<EngineToHost>, err: AppError) {
    warn!("Driver: rejected message: {}", err);
    send(output, EngineToHost::Error { message: err.to_string() });
}

fn send(output: &mpsc::UnboundedSender<EngineToHost>, message: EngineToHost) {
    if output.send(message).is_err() {
        debug!("Driver: host output closed");
    }
}
