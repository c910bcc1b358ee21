use livepane_preview::{PreviewMessage, channel};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;

// ── Wire format ──────────────────────────────────────────────────

#[test]
fn initialize_serializes_to_the_wire_shape() {
    assert_eq!(
        PreviewMessage::Initialize.to_json(),
        json!({"type": "initialize"})
    );
}

#[test]
fn update_serializes_to_the_wire_shape() {
    assert_eq!(
        PreviewMessage::update("<p>hi</p>").to_json(),
        json!({"type": "update", "html": "<p>hi</p>"})
    );
}

#[test]
fn navigate_serializes_to_the_wire_shape() {
    assert_eq!(
        PreviewMessage::navigate("/about").to_json(),
        json!({"type": "navigate", "path": "/about"})
    );
}

#[test]
fn wire_values_decode_back() {
    let value = json!({"type": "update", "html": "<h1>x</h1>"});
    assert_eq!(
        PreviewMessage::from_json(&value),
        Some(PreviewMessage::update("<h1>x</h1>"))
    );
}

// ── Tolerance ────────────────────────────────────────────────────

#[test]
fn unrecognized_types_are_ignored() {
    assert_eq!(
        PreviewMessage::from_json(&json!({"type": "telemetry", "x": 1})),
        None
    );
    assert_eq!(PreviewMessage::from_json(&json!({"html": "no type"})), None);
    assert_eq!(PreviewMessage::from_json(&json!("not an object")), None);
}

#[test]
fn malformed_fields_are_ignored() {
    assert_eq!(
        PreviewMessage::from_json(&json!({"type": "update", "html": 5})),
        None
    );
}

proptest! {
    #[test]
    fn arbitrary_type_tags_never_decode(tag in "[a-z]{1,12}") {
        prop_assume!(!matches!(tag.as_str(), "initialize" | "update" | "navigate"));
        prop_assert_eq!(PreviewMessage::from_json(&json!({"type": tag})), None);
    }
}

// ── Channel semantics ────────────────────────────────────────────

#[tokio::test]
async fn endpoints_deliver_in_order_per_direction() {
    let (host, sandbox) = channel::pair();

    host.send(PreviewMessage::Initialize);
    host.send(PreviewMessage::update("<p>1</p>"));
    sandbox.send(PreviewMessage::navigate("/a"));

    assert_eq!(sandbox.recv().await, Some(PreviewMessage::Initialize));
    assert_eq!(
        sandbox.recv().await,
        Some(PreviewMessage::update("<p>1</p>"))
    );
    assert_eq!(host.recv().await, Some(PreviewMessage::navigate("/a")));
}

#[tokio::test]
async fn send_to_a_departed_peer_is_silently_dropped() {
    let (host, sandbox) = channel::pair();
    drop(sandbox);

    // Fire-and-forget: no panic, no error surface.
    host.send(PreviewMessage::update("<p>late</p>"));
}

#[tokio::test]
async fn recv_ends_when_the_peer_goes_away() {
    let (host, sandbox) = channel::pair();
    host.send(PreviewMessage::Initialize);
    drop(host);

    assert_eq!(sandbox.recv().await, Some(PreviewMessage::Initialize));
    assert_eq!(sandbox.recv().await, None);
}
