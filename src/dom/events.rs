use serde::Serialize;

use crate::dom::document::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Change,
    Keyup,
    Blur,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Change => "change",
            EventKind::Keyup => "keyup",
            EventKind::Blur => "blur",
        }
    }
}

/// Events fired after every scripted write, in this order, so host-page
/// validation and postback handlers run as if a person had typed.
pub const INPUT_LIFECYCLE: [EventKind; 3] = [EventKind::Change, EventKind::Keyup, EventKind::Blur];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    pub kind: EventKind,
    pub target: NodeId,
    pub bubbles: bool,
}

/// Host-page handler attached to a node. `current` is the node the listener
/// was registered on (differs from `event.target` while bubbling).
pub trait EventListener {
    fn handle(&mut self, event: &DomEvent, current: NodeId);
}

impl<F> EventListener for F
where
    F: FnMut(&DomEvent, NodeId),
{
    fn handle(&mut self, event: &DomEvent, current: NodeId) {
        self(event, current)
    }
}
