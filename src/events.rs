use crate::classifier::ContentType;
use crate::decoder::CodeFormat;
use crate::error::EventBusError;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Events that can occur in the scanning client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// A new scan session started in the idle state
    ScanModeEntered { timestamp: SystemTime },
    /// The decoder delivered a payload to an idle session
    CodeDecoded {
        format: CodeFormat,
        payload_len: usize,
        timestamp: SystemTime,
    },
    /// A decode arrived while a result was awaiting acknowledgment
    DecodeIgnored {
        format: CodeFormat,
        timestamp: SystemTime,
    },
    /// A decode of a symbology outside the accepted set
    FormatRejected {
        format: CodeFormat,
        timestamp: SystemTime,
    },
    /// A classified scan was stored at the head of the history
    ScanRecorded {
        record_id: u64,
        content_type: ContentType,
        timestamp: SystemTime,
    },
    /// The user asked to scan another code
    ScanReset { timestamp: SystemTime },
    /// The scan session was closed
    ScanModeExited { timestamp: SystemTime },
    /// History entries were dropped
    HistoryCleared { removed: usize, timestamp: SystemTime },
    /// A new account was registered and signed in
    AccountCreated { email: String, timestamp: SystemTime },
    /// A user signed in
    SignedIn { email: String, timestamp: SystemTime },
    /// The current user signed out
    SignedOut { timestamp: SystemTime },
    /// An authentication attempt failed
    AuthFailed { operation: String, message: String },
    /// A platform action was launched for a scan
    ActionDispatched {
        content_type: ContentType,
        target: String,
    },
    /// A platform action could not be launched
    ActionFailed { target: String, error: String },
    /// A raw payload was copied to the clipboard
    ClipboardCopied { length: usize, timestamp: SystemTime },
    /// Application shutdown requested
    ShutdownRequested {
        timestamp: SystemTime,
        reason: String,
    },
}

impl ScanEvent {
    /// Get the timestamp of the event
    pub fn timestamp(&self) -> SystemTime {
        match self {
            ScanEvent::ScanModeEntered { timestamp }
            | ScanEvent::CodeDecoded { timestamp, .. }
            | ScanEvent::DecodeIgnored { timestamp, .. }
            | ScanEvent::FormatRejected { timestamp, .. }
            | ScanEvent::ScanRecorded { timestamp, .. }
            | ScanEvent::ScanReset { timestamp }
            | ScanEvent::ScanModeExited { timestamp }
            | ScanEvent::HistoryCleared { timestamp, .. }
            | ScanEvent::AccountCreated { timestamp, .. }
            | ScanEvent::SignedIn { timestamp, .. }
            | ScanEvent::SignedOut { timestamp }
            | ScanEvent::ClipboardCopied { timestamp, .. }
            | ScanEvent::ShutdownRequested { timestamp, .. } => *timestamp,
            ScanEvent::AuthFailed { .. }
            | ScanEvent::ActionDispatched { .. }
            | ScanEvent::ActionFailed { .. } => SystemTime::now(),
        }
    }

    /// Get a human-readable description of the event
    pub fn description(&self) -> String {
        match self {
            ScanEvent::ScanModeEntered { .. } => "Scan mode entered".to_string(),
            ScanEvent::CodeDecoded {
                format,
                payload_len,
                ..
            } => format!("Decoded {} code ({} bytes)", format, payload_len),
            ScanEvent::DecodeIgnored { format, .. } => {
                format!("Ignored {} decode while awaiting acknowledgment", format)
            }
            ScanEvent::FormatRejected { format, .. } => {
                format!("Rejected {} decode (format not accepted)", format)
            }
            ScanEvent::ScanRecorded {
                record_id,
                content_type,
                ..
            } => format!("Recorded scan {} as {}", record_id, content_type.label()),
            ScanEvent::ScanReset { .. } => "Ready to scan another code".to_string(),
            ScanEvent::ScanModeExited { .. } => "Scan mode exited".to_string(),
            ScanEvent::HistoryCleared { removed, .. } => {
                format!("History cleared ({} records)", removed)
            }
            ScanEvent::AccountCreated { email, .. } => format!("Account created: {}", email),
            ScanEvent::SignedIn { email, .. } => format!("Signed in: {}", email),
            ScanEvent::SignedOut { .. } => "Signed out".to_string(),
            ScanEvent::AuthFailed { operation, message } => {
                format!("{} failed: {}", operation, message)
            }
            ScanEvent::ActionDispatched {
                content_type,
                target,
            } => format!("Opened {} target {}", content_type.label(), target),
            ScanEvent::ActionFailed { target, error } => {
                format!("Could not open {}: {}", target, error)
            }
            ScanEvent::ClipboardCopied { length, .. } => {
                format!("Copied {} bytes to clipboard", length)
            }
            ScanEvent::ShutdownRequested { reason, .. } => {
                format!("Shutdown requested: {}", reason)
            }
        }
    }

    /// Get the event type as a string for filtering
    pub fn event_type(&self) -> &'static str {
        match self {
            ScanEvent::ScanModeEntered { .. } => "scan_mode_entered",
            ScanEvent::CodeDecoded { .. } => "code_decoded",
            ScanEvent::DecodeIgnored { .. } => "decode_ignored",
            ScanEvent::FormatRejected { .. } => "format_rejected",
            ScanEvent::ScanRecorded { .. } => "scan_recorded",
            ScanEvent::ScanReset { .. } => "scan_reset",
            ScanEvent::ScanModeExited { .. } => "scan_mode_exited",
            ScanEvent::HistoryCleared { .. } => "history_cleared",
            ScanEvent::AccountCreated { .. } => "account_created",
            ScanEvent::SignedIn { .. } => "signed_in",
            ScanEvent::SignedOut { .. } => "signed_out",
            ScanEvent::AuthFailed { .. } => "auth_failed",
            ScanEvent::ActionDispatched { .. } => "action_dispatched",
            ScanEvent::ActionFailed { .. } => "action_failed",
            ScanEvent::ClipboardCopied { .. } => "clipboard_copied",
            ScanEvent::ShutdownRequested { .. } => "shutdown_requested",
        }
    }
}

/// Event bus for component coordination using broadcast channels
pub struct EventBus {
    sender: broadcast::Sender<ScanEvent>,
    debug_logging: bool,
}

impl EventBus {
    /// Create a new event bus with the specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            debug_logging: false,
        }
    }

    /// Create a new event bus with debug logging enabled
    pub fn with_debug_logging(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            debug_logging: true,
        }
    }

    /// Subscribe to events and get a receiver
    pub fn subscribe(&self) -> broadcast::Receiver<ScanEvent> {
        self.sender.subscribe()
    }

    /// Subscribe with a filter
    pub fn subscribe_filtered<S: Into<String>>(&self, filter: EventFilter, name: S) -> EventReceiver {
        EventReceiver::new(self.sender.subscribe(), filter, name.into())
    }

    /// Publish an event to all subscribers
    pub fn publish(&self, event: ScanEvent) -> Result<usize, EventBusError> {
        if self.debug_logging {
            debug!("Publishing event: {}", event.description());
        }

        match &event {
            ScanEvent::ScanRecorded { .. }
            | ScanEvent::AccountCreated { .. }
            | ScanEvent::SignedIn { .. }
            | ScanEvent::SignedOut { .. }
            | ScanEvent::ShutdownRequested { .. } => {
                info!("{}", event.description());
            }
            ScanEvent::AuthFailed { .. } | ScanEvent::ActionFailed { .. } => {
                warn!("{}", event.description());
            }
            _ => {
                if self.debug_logging {
                    debug!("Event: {}", event.description());
                }
            }
        }

        self.sender
            .send(event)
            .map_err(|e| EventBusError::PublishFailed {
                details: e.to_string(),
            })
    }

    /// Publish without caring whether anyone is listening
    pub fn emit(&self, event: ScanEvent) {
        if let Err(e) = self.publish(event) {
            debug!("Event not delivered: {}", e);
        }
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            debug_logging: self.debug_logging,
        }
    }
}

/// Event filter for selective event handling
#[derive(Debug, Clone)]
pub enum EventFilter {
    /// Accept all events
    All,
    /// Accept only specific event types
    EventTypes(Vec<&'static str>),
    /// Accept scan events of specific content types
    ContentTypes(Vec<ContentType>),
}

impl EventFilter {
    /// Check if an event passes this filter
    pub fn matches(&self, event: &ScanEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::EventTypes(types) => types.contains(&event.event_type()),
            EventFilter::ContentTypes(content_types) => match event {
                ScanEvent::ScanRecorded { content_type, .. }
                | ScanEvent::ActionDispatched { content_type, .. } => {
                    content_types.contains(content_type)
                }
                _ => false,
            },
        }
    }
}

/// Event receiver with filtering capabilities
pub struct EventReceiver {
    receiver: broadcast::Receiver<ScanEvent>,
    filter: EventFilter,
    name: String,
}

impl EventReceiver {
    /// Create a new event receiver with a filter
    pub fn new(receiver: broadcast::Receiver<ScanEvent>, filter: EventFilter, name: String) -> Self {
        Self {
            receiver,
            filter,
            name,
        }
    }

    /// Receive the next filtered event
    pub async fn recv(&mut self) -> Result<ScanEvent, EventBusError> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => {
                    if self.filter.matches(&event) {
                        debug!(
                            "Receiver '{}' received event: {}",
                            self.name,
                            event.description()
                        );
                        return Ok(event);
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!("Receiver '{}' lagged behind by {} events", self.name, n);
                    return Err(EventBusError::Lagged { skipped: n });
                }
                Err(broadcast::error::RecvError::Closed) => {
                    debug!("Event bus closed for receiver '{}'", self.name);
                    return Err(EventBusError::ChannelClosed);
                }
            }
        }
    }

    /// Try to receive an event without blocking
    pub fn try_recv(&mut self) -> Result<Option<ScanEvent>, EventBusError> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.filter.matches(&event) {
                        return Ok(Some(event));
                    }
                }
                Err(broadcast::error::TryRecvError::Empty) => {
                    return Ok(None);
                }
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    warn!("Receiver '{}' lagged behind by {} events", self.name, n);
                    return Err(EventBusError::Lagged { skipped: n });
                }
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(EventBusError::ChannelClosed);
                }
            }
        }
    }
}

/// Event metrics collector for monitoring and debugging
#[derive(Debug, Default, Clone)]
pub struct EventMetrics {
    pub total_events: u64,
    pub events_by_type: HashMap<&'static str, u64>,
    pub last_event_time: Option<SystemTime>,
}

impl EventMetrics {
    /// Record an event
    pub fn record_event(&mut self, event: &ScanEvent) {
        self.total_events += 1;
        *self.events_by_type.entry(event.event_type()).or_insert(0) += 1;
        self.last_event_time = Some(event.timestamp());
    }

    pub fn count(&self, event_type: &str) -> u64 {
        self.events_by_type.get(event_type).copied().unwrap_or(0)
    }
}

/// Spawn a task that counts every event it sees until the bus closes
pub fn spawn_metrics_collector(
    mut receiver: EventReceiver,
    metrics: Arc<Mutex<EventMetrics>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match receiver.recv().await {
                Ok(event) => metrics.lock().record_event(&event),
                Err(EventBusError::Lagged { .. }) => continue,
                Err(_) => break,
            }
        }
        debug!("Event metrics collector stopped");
    })
}
