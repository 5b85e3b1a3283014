//! Desktop simulator for the benflix nice!view status widget.
//!
//! Renders the peripheral status screen in an SDL2 window via
//! `embedded-graphics-simulator`. A mock host stands in for the keyboard
//! firmware so battery, USB and split connection changes can be exercised
//! without hardware.
//!
//! # Key bindings
//!
//! | Key    | Action                        |
//! |--------|-------------------------------|
//! | Up     | Battery +5%                   |
//! | Down   | Battery -5%                   |
//! | U      | Toggle USB power              |
//! | P      | Toggle peripheral connection  |
//! | R      | Force a full redraw           |
//! | Q, Esc | Quit                          |
//!
//! The battery also drifts on its own: it charges while USB is powered and
//! drains otherwise.

use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    BinaryColorTheme, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
    sdl2::Keycode,
};
use log::{error, info, warn};

use benflix_core::display_manager::{DisplayRequest, get_display_receiver, get_display_sender};
use benflix_core::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};
use benflix_core::{HostSnapshot, StateSource, StatusConfig, StatusDisplay, StatusEvent};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 4;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Interval between automatic battery drift steps.
const DRIFT_INTERVAL: Duration = Duration::from_secs(5);

/// Battery change per Up/Down key press.
const BATTERY_STEP: u8 = 5;

/// One panel, one widget.
const MAX_WIDGETS: usize = 1;

// ---------------------------------------------------------------------------
// Mock host
// ---------------------------------------------------------------------------

/// Stand-in for the keyboard firmware's battery, USB and split state.
struct MockHost {
    state: HostSnapshot,
}

impl MockHost {
    fn new() -> Self {
        Self {
            state: HostSnapshot {
                state_of_charge: 80,
                usb_powered: false,
                peripheral_connected: true,
            },
        }
    }

    fn raise_battery(&mut self, step: u8) -> StatusEvent {
        self.state.state_of_charge = self.state.state_of_charge.saturating_add(step).min(100);
        StatusEvent::BatteryStateChanged
    }

    fn lower_battery(&mut self, step: u8) -> StatusEvent {
        self.state.state_of_charge = self.state.state_of_charge.saturating_sub(step);
        StatusEvent::BatteryStateChanged
    }

    fn toggle_usb(&mut self) -> StatusEvent {
        self.state.usb_powered = !self.state.usb_powered;
        StatusEvent::UsbConnStateChanged
    }

    fn toggle_peripheral(&mut self) -> StatusEvent {
        self.state.peripheral_connected = !self.state.peripheral_connected;
        StatusEvent::PeripheralStatusChanged
    }

    /// One drift step, or `None` when the level is pinned at a limit.
    fn drift(&mut self) -> Option<StatusEvent> {
        let level = self.state.state_of_charge;
        if self.state.usb_powered && level < 100 {
            Some(self.raise_battery(1))
        } else if !self.state.usb_powered && level > 0 {
            Some(self.lower_battery(1))
        } else {
            None
        }
    }
}

impl StateSource for MockHost {
    fn battery_state_of_charge(&self) -> u8 {
        self.state.state_of_charge
    }

    fn usb_is_powered(&self) -> bool {
        self.state.usb_powered
    }

    fn peripheral_is_connected(&self) -> bool {
        self.state.peripheral_connected
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Apply a key press to the mock host and return the request it produces.
fn keycode_to_request(keycode: Keycode, host: &mut MockHost) -> Option<DisplayRequest> {
    let event = match keycode {
        Keycode::Up => host.raise_battery(BATTERY_STEP),
        Keycode::Down => host.lower_battery(BATTERY_STEP),
        Keycode::U => host.toggle_usb(),
        Keycode::P => host.toggle_peripheral(),
        Keycode::R => return Some(DisplayRequest::Redraw),
        _ => return None,
    };
    Some(DisplayRequest::Event(event))
}

fn send(request: DisplayRequest) {
    if get_display_sender().try_send(request).is_err() {
        warn!("Display queue full, dropping {:?}", request);
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting benflix simulator");
    info!(
        "Display: {}x{} (scale {}x)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );
    info!("Keys: Up/Down=Battery  U=USB  P=Peripheral  R=Redraw  Q=Quit");

    let config = StatusConfig::default();
    info!("Config: {:?}", config);

    let display = SimulatorDisplay::<BinaryColor>::new(Size::new(
        DISPLAY_WIDTH_PX as u32,
        DISPLAY_HEIGHT_PX as u32,
    ));

    let output_settings = OutputSettingsBuilder::new()
        .scale(WINDOW_SCALE)
        .theme(BinaryColorTheme::OledWhite)
        .build();
    let mut window = Window::new("benflix nice!view", &output_settings);

    let mut host = MockHost::new();
    let mut status: StatusDisplay<_, MAX_WIDGETS> = StatusDisplay::new(display, config);

    if let Err(e) = status.add_widget(Point::zero(), &host) {
        error!("Could not register status widget: {}", e);
        return;
    }

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    let Ok(()) = status.render();
    window.update(status.display());

    let receiver = get_display_receiver();
    let mut last_drift = Instant::now();

    // -----------------------------------------------------------------------
    // Main loop
    // -----------------------------------------------------------------------
    'running: loop {
        let frame_start = Instant::now();

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => {
                    if keycode == Keycode::Q || keycode == Keycode::Escape {
                        break 'running;
                    }

                    if let Some(request) = keycode_to_request(keycode, &mut host) {
                        info!("{:?} -> {:?}", keycode, request);
                        send(request);
                    }
                }

                _ => {}
            }
        }

        // --- Battery drift ------------------------------------------------
        if last_drift.elapsed() >= DRIFT_INTERVAL {
            if let Some(event) = host.drift() {
                send(DisplayRequest::Event(event));
            }
            last_drift = Instant::now();
        }

        // --- Render -------------------------------------------------------
        let Ok(_) = status.process_pending(&receiver, &host);
        window.update(status.display());

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Simulator exiting");
}
