//! Bot messaging model: structured components, dialog turns and webhook payloads.

mod component;
mod dialog;
mod inbound;

pub use component::{
    parse_raw_messages, Attachment, AttachmentKind, Button, Card, Carousel, Component, List,
    ListElement, QuickReplies, QuickReply, RawMessage,
};
pub use dialog::{decode_dialog, Dialog, DialogConversation};
pub use inbound::{parse_inbound_message, InboundMessage, Message};
