//! Display manager for the status widgets
//!
//! Owns the panel, the frame buffer, the registered widgets and the listener
//! table. Host events arrive as [`DisplayRequest`]s over a channel and are
//! processed one at a time, so listener callbacks never run concurrently
//! with each other or with a render pass.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use log::{debug, error, info};

use crate::config::StatusConfig;
use crate::error::StatusError;
use crate::events::{ListenerTable, StateSource, StatusEvent};
use crate::framebuffer::FrameBuffer;
use crate::registry::{WidgetId, WidgetRegistry};
use crate::widgets::{StatusWidget, Widget};

/// Channel capacity for display requests
pub const REQUEST_CAPACITY: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayRequest {
    /// A host state change
    Event(StatusEvent),
    /// Repaint every widget from its current state
    Redraw,
}

/// Global channel for display requests
pub static DISPLAY_CHANNEL: Channel<CriticalSectionRawMutex, DisplayRequest, REQUEST_CAPACITY> =
    Channel::new();

pub type DisplayReceiver<'a> =
    Receiver<'a, CriticalSectionRawMutex, DisplayRequest, REQUEST_CAPACITY>;
pub type DisplaySender<'a> = Sender<'a, CriticalSectionRawMutex, DisplayRequest, REQUEST_CAPACITY>;

/// Owns the display and every status widget drawn on it.
pub struct StatusDisplay<D, const N: usize>
where
    D: DrawTarget<Color = BinaryColor>,
{
    display: D,
    frame: FrameBuffer,
    registry: WidgetRegistry<N>,
    listeners: ListenerTable,
    config: StatusConfig,
}

impl<D, const N: usize> StatusDisplay<D, N>
where
    D: DrawTarget<Color = BinaryColor>,
{
    pub fn new(display: D, config: StatusConfig) -> Self {
        Self {
            display,
            frame: FrameBuffer::new(config.palette().background),
            registry: WidgetRegistry::new(),
            listeners: ListenerTable::for_config(&config),
            config,
        }
    }

    pub fn config(&self) -> &StatusConfig {
        &self.config
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn registry(&self) -> &WidgetRegistry<N> {
        &self.registry
    }

    pub fn listeners(&self) -> &ListenerTable {
        &self.listeners
    }

    pub fn widget(&self, id: WidgetId) -> Option<&StatusWidget> {
        self.registry.get(id)
    }

    /// Create a widget at `origin` and seed it from `source`.
    ///
    /// The widget is primed before it is registered, so its first frame
    /// already shows the host's current state.
    pub fn add_widget<S>(&mut self, origin: Point, source: &S) -> Result<WidgetId, StatusError>
    where
        S: StateSource + ?Sized,
    {
        if self.registry.len() == self.registry.capacity() {
            return Err(StatusError::RegistryFull { capacity: N });
        }

        let mut widget = StatusWidget::new(origin, &self.config);
        self.listeners.prime(source, &mut widget, &self.config);
        let id = self.registry.register(widget)?;

        info!("Registered status widget {} at {:?}", id.index(), origin);
        Ok(id)
    }

    /// Deliver `event` to every widget, then render.
    ///
    /// Returns whether anything was subscribed to the event.
    pub fn handle_event<S>(&mut self, event: StatusEvent, source: &S) -> Result<bool, D::Error>
    where
        S: StateSource + ?Sized,
    {
        let handled = self
            .listeners
            .dispatch(event, source, &mut self.registry, &self.config);
        self.render()?;
        Ok(handled)
    }

    /// Repaint every widget from its stored state.
    pub fn redraw_all(&mut self) -> Result<(), D::Error> {
        for widget in self.registry.iter_mut() {
            widget.redraw(&self.config);
        }
        self.frame.invalidate();
        self.render()
    }

    /// Present dirty widgets into the frame buffer and flush what changed.
    pub fn render(&mut self) -> Result<(), D::Error> {
        for widget in self.registry.iter_mut().filter(|w| w.is_dirty()) {
            let Ok(()) = widget.present(&mut self.frame, &self.config);
            widget.mark_clean();
        }
        self.frame.flush(&mut self.display)
    }

    pub fn process_request<S>(
        &mut self,
        request: DisplayRequest,
        source: &S,
    ) -> Result<(), D::Error>
    where
        S: StateSource + ?Sized,
    {
        debug!("Processing request: {:?}", request);
        match request {
            DisplayRequest::Event(event) => self.handle_event(event, source).map(|_| ()),
            DisplayRequest::Redraw => self.redraw_all(),
        }
    }

    /// Handle every request already queued on `receiver` without waiting.
    ///
    /// Returns how many requests were processed.
    pub fn process_pending<S>(
        &mut self,
        receiver: &DisplayReceiver<'_>,
        source: &S,
    ) -> Result<usize, D::Error>
    where
        S: StateSource + ?Sized,
    {
        let mut processed = 0;
        while let Ok(request) = receiver.try_receive() {
            self.process_request(request, source)?;
            processed += 1;
        }
        Ok(processed)
    }

    /// Run the display manager task
    ///
    /// Renders once, then waits on `receiver` forever. Errors are logged and
    /// the loop continues.
    pub async fn run<S>(&mut self, receiver: DisplayReceiver<'_>, source: &S)
    where
        S: StateSource + ?Sized,
        D::Error: core::fmt::Debug,
    {
        info!("Display manager task started");

        if let Err(e) = self.render() {
            error!("Display render error: {:?}", e);
        }

        loop {
            let request = receiver.receive().await;
            if let Err(e) = self.process_request(request, source) {
                error!("Error processing request: {:?}", e);
            }
        }
    }
}

/// Helper to get a display request sender
pub fn get_display_sender() -> DisplaySender<'static> {
    DISPLAY_CHANNEL.sender()
}

/// Helper to get a display request receiver
pub fn get_display_receiver() -> DisplayReceiver<'static> {
    DISPLAY_CHANNEL.receiver()
}
