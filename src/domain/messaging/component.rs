//! Structured messages understood by the bot connector.
//!
//! On the wire every message is a `{type, content}` pair ([`RawMessage`]).
//! In Rust it is the closed [`Component`] enum; decoding dispatches on the
//! tag with a single exhaustive match and rejects unknown tags.
//!
//! Builders consume and return `self` so calls chain:
//!
//! ```ignore
//! let card = Card::new("Your order", "Ready for pickup")
//!     .add_image("https://cdn.example.com/order.png")
//!     .add_button("Track", "web_url", "https://example.com/track");
//! ```
//!
//! Channel limits (e.g. four elements per list) are not checked here.

use serde::de::DeserializeOwned;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::domain::errors::DecodeError;
use crate::domain::wire::nullable;

/// A message as it travels on the wire: a type tag and an opaque content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMessage {
    #[serde(rename = "type")]
    pub message_type: String,
    #[serde(default)]
    pub content: Value,
}

/// Anything that can be sent as a chat message.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawMessage")]
pub enum Component {
    Attachment(Attachment),
    QuickReplies(QuickReplies),
    Card(Card),
    Carousel(Carousel),
    List(List),
}

impl Component {
    /// The wire tag of this message.
    pub fn message_type(&self) -> &'static str {
        match self {
            Component::Attachment(attachment) => attachment.kind.as_str(),
            Component::QuickReplies(_) => "quickReplies",
            Component::Card(_) => "card",
            Component::Carousel(_) => "carousel",
            Component::List(_) => "list",
        }
    }
}

impl TryFrom<RawMessage> for Component {
    type Error = DecodeError;

    fn try_from(raw: RawMessage) -> Result<Self, Self::Error> {
        let component = match raw.message_type.as_str() {
            "text" | "picture" | "video" => {
                let kind = AttachmentKind::from_tag(&raw.message_type)
                    .ok_or_else(|| DecodeError::UnknownMessageType(raw.message_type.clone()))?;
                let content = raw
                    .content
                    .as_str()
                    .ok_or_else(|| DecodeError::invalid_shape("content", "a string"))?;
                Component::Attachment(Attachment::new(kind, content))
            }
            "quickReplies" => Component::QuickReplies(decode_content(raw.content)?),
            "card" => Component::Card(decode_content(raw.content)?),
            "carousel" => Component::Carousel(decode_content(raw.content)?),
            "list" => Component::List(decode_content(raw.content)?),
            _ => return Err(DecodeError::UnknownMessageType(raw.message_type)),
        };
        Ok(component)
    }
}

/// Decodes a structured content; a null content is the empty value.
fn decode_content<T: DeserializeOwned + Default>(content: Value) -> Result<T, DecodeError> {
    if content.is_null() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(content)?)
}

impl Serialize for Component {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Component", 2)?;
        state.serialize_field("type", self.message_type())?;
        match self {
            Component::Attachment(attachment) => {
                state.serialize_field("content", &attachment.content)?
            }
            Component::QuickReplies(quick_replies) => {
                state.serialize_field("content", quick_replies)?
            }
            Component::Card(card) => state.serialize_field("content", card)?,
            Component::Carousel(carousel) => state.serialize_field("content", carousel)?,
            Component::List(list) => state.serialize_field("content", list)?,
        }
        state.end()
    }
}

/// Decodes a heterogeneous list of wire messages, failing on the first bad one.
pub fn parse_raw_messages(messages: &[RawMessage]) -> Result<Vec<Component>, DecodeError> {
    messages.iter().cloned().map(Component::try_from).collect()
}

// ════════════════════════════════════════════════════════════════════════════════
// Attachment
// ════════════════════════════════════════════════════════════════════════════════

/// Kind of a flat attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentKind {
    Text,
    Picture,
    Video,
}

impl AttachmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttachmentKind::Text => "text",
            AttachmentKind::Picture => "picture",
            AttachmentKind::Video => "video",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "text" => Some(AttachmentKind::Text),
            "picture" => Some(AttachmentKind::Picture),
            "video" => Some(AttachmentKind::Video),
            _ => None,
        }
    }
}

/// A text message, or the URL of a picture or video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub kind: AttachmentKind,
    pub content: String,
}

impl Attachment {
    pub fn new(kind: AttachmentKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::new(AttachmentKind::Text, content)
    }

    pub fn picture(url: impl Into<String>) -> Self {
        Self::new(AttachmentKind::Picture, url)
    }

    pub fn video(url: impl Into<String>) -> Self {
        Self::new(AttachmentKind::Video, url)
    }
}

impl From<Attachment> for Component {
    fn from(attachment: Attachment) -> Self {
        Component::Attachment(attachment)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Buttons
// ════════════════════════════════════════════════════════════════════════════════

/// A button of a card or list.
///
/// `kind` is the button action: `postback`, `web_url`, `phone_number` or
/// `element_share`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Button {
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub kind: String,
    #[serde(deserialize_with = "nullable")]
    pub value: String,
}

impl Button {
    pub fn new(title: impl Into<String>, kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind: kind.into(),
            value: value.into(),
        }
    }
}

/// A suggested reply. `value` is sent back as text when chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuickReply {
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub value: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Quick replies
// ════════════════════════════════════════════════════════════════════════════════

/// A question with suggested replies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuickReplies {
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub buttons: Vec<QuickReply>,
}

impl QuickReplies {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            buttons: Vec::new(),
        }
    }

    /// Adds a reply shown as `title` that sends back `value`.
    pub fn add_button(mut self, title: impl Into<String>, value: impl Into<String>) -> Self {
        self.buttons.push(QuickReply {
            title: title.into(),
            value: value.into(),
        });
        self
    }
}

impl From<QuickReplies> for Component {
    fn from(quick_replies: QuickReplies) -> Self {
        Component::QuickReplies(quick_replies)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Card and carousel
// ════════════════════════════════════════════════════════════════════════════════

/// A generic card: title, subtitle, optional image and buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Card {
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub subtitle: String,
    #[serde(deserialize_with = "nullable")]
    pub image_url: String,
    #[serde(deserialize_with = "nullable")]
    pub buttons: Vec<Button>,
}

impl Card {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            ..Default::default()
        }
    }

    /// Sets the image displayed with the card.
    pub fn add_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    pub fn add_button(
        mut self,
        title: impl Into<String>,
        kind: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.buttons.push(Button::new(title, kind, value));
        self
    }
}

impl From<Card> for Component {
    fn from(card: Card) -> Self {
        Component::Card(card)
    }
}

/// A horizontally scrollable row of cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Carousel {
    #[serde(deserialize_with = "nullable")]
    pub cards: Vec<Card>,
}

impl Carousel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_card(mut self, card: Card) -> Self {
        self.cards.push(card);
        self
    }
}

impl From<Carousel> for Component {
    fn from(carousel: Carousel) -> Self {
        Component::Carousel(carousel)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// List
// ════════════════════════════════════════════════════════════════════════════════

/// One row of a [`List`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListElement {
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub image_url: String,
    #[serde(deserialize_with = "nullable")]
    pub subtitle: String,
    #[serde(deserialize_with = "nullable")]
    pub buttons: Vec<Button>,
}

impl ListElement {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    pub fn add_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    pub fn add_button(
        mut self,
        title: impl Into<String>,
        kind: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.buttons.push(Button::new(title, kind, value));
        self
    }
}

/// A vertical list of elements with list-level buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct List {
    #[serde(deserialize_with = "nullable")]
    pub elements: Vec<ListElement>,
    #[serde(deserialize_with = "nullable")]
    pub buttons: Vec<Button>,
}

impl List {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_element(mut self, element: ListElement) -> Self {
        self.elements.push(element);
        self
    }

    pub fn add_button(
        mut self,
        title: impl Into<String>,
        kind: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.buttons.push(Button::new(title, kind, value));
        self
    }
}

impl From<List> for Component {
    fn from(list: List) -> Self {
        Component::List(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawMessage {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn card_built_then_decoded_from_wire_is_equivalent() {
        let built = Card::new("t", "s").add_image("u").add_button("b", "postback", "v");

        let wire = raw(json!({
            "type": "card",
            "content": {
                "title": "t",
                "subtitle": "s",
                "imageUrl": "u",
                "buttons": [{"title": "b", "type": "postback", "value": "v"}]
            }
        }));
        let decoded = parse_raw_messages(&[wire]).unwrap();

        assert_eq!(decoded, vec![Component::Card(built)]);
    }

    #[test]
    fn serializes_as_type_and_content() {
        let card = Component::from(Card::new("t", "s").add_button("b", "postback", "v"));
        let value = serde_json::to_value(&card).unwrap();

        assert_eq!(value["type"], "card");
        assert_eq!(value["content"]["title"], "t");
        assert_eq!(value["content"]["imageUrl"], "");
        assert_eq!(value["content"]["buttons"][0]["type"], "postback");

        let text = serde_json::to_value(Component::from(Attachment::text("Hello"))).unwrap();
        assert_eq!(text, json!({"type": "text", "content": "Hello"}));
    }

    #[test]
    fn message_type_matches_wire_tag() {
        let components: Vec<Component> = vec![
            Attachment::text("hi").into(),
            Attachment::picture("https://img").into(),
            Attachment::video("https://vid").into(),
            QuickReplies::new("q").into(),
            Card::new("t", "s").into(),
            Carousel::new().into(),
            List::new().into(),
        ];
        let tags: Vec<&str> = components.iter().map(Component::message_type).collect();
        assert_eq!(
            tags,
            ["text", "picture", "video", "quickReplies", "card", "carousel", "list"]
        );

        for component in components {
            let value = serde_json::to_value(&component).unwrap();
            assert_eq!(value["type"], component.message_type());
            let decoded: Component = serde_json::from_value(value).unwrap();
            assert_eq!(decoded, component);
        }
    }

    #[test]
    fn unknown_tag_is_a_hard_failure() {
        let messages = vec![
            raw(json!({"type": "text", "content": "Hello"})),
            raw(json!({"type": "bogus", "content": "?"})),
        ];
        match parse_raw_messages(&messages) {
            Err(DecodeError::UnknownMessageType(tag)) => assert_eq!(tag, "bogus"),
            other => panic!("expected unknown type, got {:?}", other),
        }
    }

    #[test]
    fn wrong_content_shape_is_a_decode_error() {
        let not_string = raw(json!({"type": "picture", "content": {"url": "x"}}));
        assert!(matches!(
            parse_raw_messages(&[not_string]),
            Err(DecodeError::InvalidShape { .. })
        ));

        let not_array = raw(json!({"type": "carousel", "content": {"title": "x"}}));
        assert!(matches!(
            parse_raw_messages(&[not_array]),
            Err(DecodeError::Json(_))
        ));
    }

    #[test]
    fn decodes_quick_replies_carousel_and_list() {
        let messages = vec![
            raw(json!({"type": "quickReplies", "content": {
                "title": "Which size?",
                "buttons": [{"title": "Small", "value": "small"}, {"title": "Large", "value": "large"}]
            }})),
            raw(json!({"type": "carousel", "content": [
                {"title": "A", "subtitle": "a", "imageUrl": "ia", "buttons": []},
                {"title": "B", "subtitle": "b", "imageUrl": "ib", "buttons": []}
            ]})),
            raw(json!({"type": "list", "content": {
                "elements": [{"title": "E1", "imageUrl": "i1", "subtitle": "s1", "buttons": [
                    {"title": "Buy", "type": "postback", "value": "buy-1"}
                ]}],
                "buttons": [{"title": "More", "type": "postback", "value": "more"}]
            }})),
        ];
        let decoded = parse_raw_messages(&messages).unwrap();

        assert_eq!(
            decoded[0],
            Component::QuickReplies(
                QuickReplies::new("Which size?")
                    .add_button("Small", "small")
                    .add_button("Large", "large")
            )
        );
        assert_eq!(
            decoded[1],
            Component::Carousel(
                Carousel::new()
                    .add_card(Card::new("A", "a").add_image("ia"))
                    .add_card(Card::new("B", "b").add_image("ib"))
            )
        );
        assert_eq!(
            decoded[2],
            Component::List(
                List::new()
                    .add_element(
                        ListElement::new("E1")
                            .with_subtitle("s1")
                            .add_image("i1")
                            .add_button("Buy", "postback", "buy-1")
                    )
                    .add_button("More", "postback", "more")
            )
        );
    }

    #[test]
    fn null_fields_in_structured_content_read_as_empty() {
        let messages = vec![
            raw(json!({"type": "card", "content": {
                "title": "Menu",
                "subtitle": null,
                "imageUrl": null,
                "buttons": [{"title": "Go", "type": null, "value": "go"}]
            }})),
            raw(json!({"type": "quickReplies", "content": {
                "title": "Size?",
                "buttons": [{"title": "Small", "value": null}]
            }})),
            raw(json!({"type": "list", "content": {
                "elements": [{"title": "E1", "imageUrl": null, "subtitle": null, "buttons": null}],
                "buttons": null
            }})),
            raw(json!({"type": "carousel", "content": [
                {"title": "A", "subtitle": "a", "imageUrl": null, "buttons": null}
            ]})),
        ];
        let decoded = parse_raw_messages(&messages).unwrap();

        assert_eq!(
            decoded[0],
            Component::Card(Card::new("Menu", "").add_button("Go", "", "go"))
        );
        assert_eq!(
            decoded[1],
            Component::QuickReplies(QuickReplies::new("Size?").add_button("Small", ""))
        );
        assert_eq!(
            decoded[2],
            Component::List(List::new().add_element(ListElement::new("E1")))
        );
        assert_eq!(
            decoded[3],
            Component::Carousel(Carousel::new().add_card(Card::new("A", "a")))
        );
    }

    #[test]
    fn null_content_reads_as_empty_component() {
        let messages = vec![
            raw(json!({"type": "card", "content": null})),
            raw(json!({"type": "carousel", "content": null})),
            raw(json!({"type": "list"})),
        ];
        let decoded = parse_raw_messages(&messages).unwrap();

        assert_eq!(decoded[0], Component::Card(Card::default()));
        assert_eq!(decoded[1], Component::Carousel(Carousel::new()));
        assert_eq!(decoded[2], Component::List(List::new()));
    }

    #[test]
    fn builders_do_not_enforce_channel_limits() {
        let list = (0..6).fold(List::new(), |list, i| {
            list.add_element(ListElement::new(format!("item {}", i)))
        });
        assert_eq!(list.elements.len(), 6);
    }
}
