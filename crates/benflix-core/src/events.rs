//! Host events and the listeners that turn them into widget state
//!
//! The host firmware publishes an event when battery, USB or peripheral
//! connection state changes. Each subscribed event category maps to a
//! [`StatusListener`], which reads a snapshot from the host
//! ([`StateSource`]) and applies it to every registered widget.
//!
//! # Event flow
//!
//! ```text
//! StatusEvent -> ListenerTable -> StatusListener::extract -> State
//!                                         |
//!             every widget <- StatusListener::apply
//! ```

use core::fmt::Debug;

use log::debug;

use crate::config::StatusConfig;
use crate::registry::WidgetRegistry;
use crate::widgets::StatusWidget;

/// Event categories the widget can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusEvent {
    BatteryStateChanged,
    /// Only subscribed when the host has a USB device stack
    UsbConnStateChanged,
    PeripheralStatusChanged,
}

/// Read-only view of the host's battery, USB and split connection state.
pub trait StateSource {
    fn battery_state_of_charge(&self) -> u8;
    fn usb_is_powered(&self) -> bool;
    fn peripheral_is_connected(&self) -> bool;
}

/// Plain-data [`StateSource`], used by the simulator and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostSnapshot {
    pub state_of_charge: u8,
    pub usb_powered: bool,
    pub peripheral_connected: bool,
}

impl StateSource for HostSnapshot {
    fn battery_state_of_charge(&self) -> u8 {
        self.state_of_charge
    }

    fn usb_is_powered(&self) -> bool {
        self.usb_powered
    }

    fn peripheral_is_connected(&self) -> bool {
        self.peripheral_connected
    }
}

/// Typed callback for one event category.
///
/// `extract` must be total and must not block. `apply` may only change the
/// state fields this listener owns.
pub trait StatusListener {
    type State: Copy + Debug;

    fn extract<S: StateSource + ?Sized>(&self, event: StatusEvent, source: &S) -> Self::State;

    fn apply(&self, state: Self::State, widget: &mut StatusWidget, config: &StatusConfig);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatteryStatusState {
    pub level: u8,
    pub usb_present: bool,
}

/// Owns `battery` and, with a USB device stack, `charging`.
#[derive(Debug, Clone, Copy)]
pub struct BatteryStatusListener {
    usb_device_stack: bool,
}

impl BatteryStatusListener {
    pub fn new(usb_device_stack: bool) -> Self {
        Self { usb_device_stack }
    }
}

impl StatusListener for BatteryStatusListener {
    type State = BatteryStatusState;

    fn extract<S: StateSource + ?Sized>(&self, _event: StatusEvent, source: &S) -> Self::State {
        BatteryStatusState {
            level: source.battery_state_of_charge(),
            usb_present: self.usb_device_stack && source.usb_is_powered(),
        }
    }

    fn apply(&self, state: Self::State, widget: &mut StatusWidget, config: &StatusConfig) {
        let usb_device_stack = self.usb_device_stack;
        widget.update(config, |s| {
            if usb_device_stack {
                s.charging = state.usb_present;
            }
            s.battery = state.level;
        });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeripheralStatusState {
    pub connected: bool,
}

/// Owns `connected`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeripheralStatusListener;

impl StatusListener for PeripheralStatusListener {
    type State = PeripheralStatusState;

    fn extract<S: StateSource + ?Sized>(&self, _event: StatusEvent, source: &S) -> Self::State {
        PeripheralStatusState {
            connected: source.peripheral_is_connected(),
        }
    }

    fn apply(&self, state: Self::State, widget: &mut StatusWidget, config: &StatusConfig) {
        widget.update(config, |s| s.connected = state.connected);
    }
}

/// One entry in the [`ListenerTable`].
#[derive(Debug, Clone, Copy)]
pub enum Subscription {
    BatteryStatus(BatteryStatusListener),
    PeripheralStatus(PeripheralStatusListener),
}

impl Subscription {
    /// Event used to seed a freshly registered widget.
    pub fn primary_event(&self) -> StatusEvent {
        match self {
            Self::BatteryStatus(_) => StatusEvent::BatteryStateChanged,
            Self::PeripheralStatus(_) => StatusEvent::PeripheralStatusChanged,
        }
    }

    /// Extract once, then apply to every widget in `widgets`.
    pub fn notify<'w, S, I>(
        &self,
        event: StatusEvent,
        source: &S,
        widgets: I,
        config: &StatusConfig,
    ) where
        S: StateSource + ?Sized,
        I: IntoIterator<Item = &'w mut StatusWidget>,
    {
        match self {
            Self::BatteryStatus(listener) => broadcast(listener, event, source, widgets, config),
            Self::PeripheralStatus(listener) => {
                broadcast(listener, event, source, widgets, config)
            }
        }
    }
}

fn broadcast<'w, L, S, I>(
    listener: &L,
    event: StatusEvent,
    source: &S,
    widgets: I,
    config: &StatusConfig,
) where
    L: StatusListener,
    S: StateSource + ?Sized,
    I: IntoIterator<Item = &'w mut StatusWidget>,
{
    let state = listener.extract(event, source);
    debug!("{:?} -> {:?}", event, state);
    for widget in widgets {
        listener.apply(state, widget, config);
    }
}

const MAX_SUBSCRIPTIONS: usize = 3;

/// Subscriptions keyed by event category.
pub struct ListenerTable {
    entries: heapless::LinearMap<StatusEvent, Subscription, MAX_SUBSCRIPTIONS>,
}

impl Default for ListenerTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ListenerTable {
    /// An empty table.
    pub fn new() -> Self {
        Self {
            entries: heapless::LinearMap::new(),
        }
    }

    /// The standard subscriptions for `config`.
    pub fn for_config(config: &StatusConfig) -> Self {
        let battery_listener = BatteryStatusListener::new(config.usb_device_stack);
        let battery = Subscription::BatteryStatus(battery_listener);
        let peripheral = Subscription::PeripheralStatus(PeripheralStatusListener);

        let mut table = Self::new();
        table.subscribe(StatusEvent::BatteryStateChanged, battery);
        if config.usb_device_stack {
            table.subscribe(StatusEvent::UsbConnStateChanged, battery);
        }
        table.subscribe(StatusEvent::PeripheralStatusChanged, peripheral);
        table
    }

    /// Route `event` to `subscription`, replacing any previous entry.
    ///
    /// Returns `false` if the table is full and the event was not already
    /// subscribed.
    pub fn subscribe(&mut self, event: StatusEvent, subscription: Subscription) -> bool {
        self.entries.insert(event, subscription).is_ok()
    }

    pub fn subscription(&self, event: StatusEvent) -> Option<&Subscription> {
        self.entries.get(&event)
    }

    pub fn is_subscribed(&self, event: StatusEvent) -> bool {
        self.entries.contains_key(&event)
    }

    /// Deliver `event` to every widget in `registry`.
    ///
    /// Returns `false` and does nothing for events with no subscription.
    pub fn dispatch<S, const N: usize>(
        &self,
        event: StatusEvent,
        source: &S,
        registry: &mut WidgetRegistry<N>,
        config: &StatusConfig,
    ) -> bool
    where
        S: StateSource + ?Sized,
    {
        let Some(subscription) = self.entries.get(&event) else {
            debug!("No listener for {:?}", event);
            return false;
        };
        subscription.notify(event, source, registry.iter_mut(), config);
        true
    }

    /// Run every listener once against a single widget so its first frame
    /// reflects the current host state.
    pub fn prime<S>(&self, source: &S, widget: &mut StatusWidget, config: &StatusConfig)
    where
        S: StateSource + ?Sized,
    {
        for (event, subscription) in self.entries.iter() {
            if *event == subscription.primary_event() {
                subscription.notify(*event, source, core::iter::once(&mut *widget), config);
            }
        }
    }
}
