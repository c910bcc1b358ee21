use livepane_dom::{DiffEngine, LiveNode, Node, parse_body};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn live_from(html: &str) -> (DiffEngine, LiveNode) {
    let mut engine = DiffEngine::new();
    let target = parse_body(html).unwrap();
    let live = engine.materialize(&target);
    (engine, live)
}

fn serials(node: &LiveNode) -> Vec<u64> {
    let mut out = vec![node.serial()];
    for child in node.children() {
        out.extend(serials(child));
    }
    out
}

// ── Parsing ──────────────────────────────────────────────────────

#[test]
fn fragment_parses_into_a_body() {
    let body = parse_body("<h1>Hi</h1><p>text</p>").unwrap();
    assert_eq!(body.tag(), Some("body"));
    let Node::Element { children, .. } = &body else {
        panic!("body is an element");
    };
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].tag(), Some("h1"));
}

#[test]
fn full_document_parses_to_the_same_body() {
    let from_fragment = parse_body("<p>x</p>").unwrap();
    let from_document =
        parse_body("<!DOCTYPE html><html><head></head><body><p>x</p></body></html>").unwrap();
    assert_eq!(from_fragment, from_document);
}

#[test]
fn attributes_and_comments_are_handled() {
    let body = parse_body(r#"<a href="/about">About</a><!-- dropped -->"#).unwrap();
    let Node::Element { children, .. } = &body else {
        panic!("body is an element");
    };
    assert_eq!(children.len(), 1, "comment node dropped");
    assert_eq!(children[0].attr("href"), Some("/about"));
}

// ── Reconcile: in-place patching ─────────────────────────────────

#[test]
fn identical_markup_preserves_every_serial() {
    let (mut engine, mut live) = live_from("<h1>Title</h1><p>body</p>");
    let before = serials(&live);

    let target = parse_body("<h1>Title</h1><p>body</p>").unwrap();
    engine.reconcile(&mut live, &target);

    assert_eq!(serials(&live), before);
}

#[test]
fn text_change_updates_in_place() {
    let (mut engine, mut live) = live_from("<p>old</p>");
    let before = serials(&live);

    engine.reconcile(&mut live, &parse_body("<p>new</p>").unwrap());

    assert_eq!(serials(&live), before, "text node keeps its identity");
    assert_eq!(live.find("p").unwrap().children()[0].text(), Some("new"));
}

#[test]
fn attribute_change_keeps_the_element() {
    let (mut engine, mut live) = live_from(r#"<a href="/a">x</a>"#);
    let anchor_serial = live.find("a").unwrap().serial();

    engine.reconcile(&mut live, &parse_body(r#"<a href="/b">x</a>"#).unwrap());

    let anchor = live.find("a").unwrap();
    assert_eq!(anchor.serial(), anchor_serial);
    assert_eq!(anchor.attr("href"), Some("/b"));
}

#[test]
fn tag_mismatch_replaces_the_subtree() {
    let (mut engine, mut live) = live_from("<p>x</p>");
    let old_serial = live.children()[0].serial();

    engine.reconcile(&mut live, &parse_body("<div>x</div>").unwrap());

    let child = &live.children()[0];
    assert_eq!(child.tag(), Some("div"));
    assert_ne!(child.serial(), old_serial);
}

#[test]
fn id_mismatch_replaces_even_with_matching_tags() {
    let (mut engine, mut live) = live_from(r#"<div id="one">x</div>"#);
    let old_serial = live.children()[0].serial();

    engine.reconcile(&mut live, &parse_body(r#"<div id="two">x</div>"#).unwrap());

    assert_ne!(live.children()[0].serial(), old_serial);
}

#[test]
fn surplus_children_are_removed_and_new_ones_appended() {
    let (mut engine, mut live) = live_from("<p>a</p><p>b</p><p>c</p>");
    engine.reconcile(&mut live, &parse_body("<p>a</p>").unwrap());
    assert_eq!(live.children().len(), 1);

    engine.reconcile(
        &mut live,
        &parse_body("<p>a</p><ul><li>new</li></ul>").unwrap(),
    );
    assert_eq!(live.children().len(), 2);
    assert_eq!(live.children()[1].tag(), Some("ul"));
}

#[test]
fn unrelated_siblings_keep_identity_when_one_changes() {
    let (mut engine, mut live) = live_from("<h1>t</h1><p>body</p><footer>f</footer>");
    let h1_serial = live.children()[0].serial();
    let footer_serial = live.children()[2].serial();

    engine.reconcile(
        &mut live,
        &parse_body("<h1>t</h1><p>edited</p><footer>f</footer>").unwrap(),
    );

    assert_eq!(live.children()[0].serial(), h1_serial);
    assert_eq!(live.children()[2].serial(), footer_serial);
}

// ── Idempotence ──────────────────────────────────────────────────

#[test]
fn applying_the_same_markup_twice_is_a_fixpoint() {
    let (mut engine, mut live) = live_from("<p>start</p>");
    let target = parse_body("<h1>Hello</h1><p>world</p>").unwrap();

    engine.reconcile(&mut live, &target);
    let after_first = live.clone();

    engine.reconcile(&mut live, &target);
    assert_eq!(live, after_first, "second application changes nothing");
}

proptest! {
    #[test]
    fn reconcile_converges_on_arbitrary_text(a in "[a-z ]{0,20}", b in "[a-z ]{0,20}") {
        let (mut engine, mut live) = live_from(&format!("<p>{a}</p>"));
        let target = parse_body(&format!("<p>{b}</p>")).unwrap();

        engine.reconcile(&mut live, &target);
        let once = live.clone();
        engine.reconcile(&mut live, &target);
        prop_assert_eq!(live, once);
    }
}

// ── Serialization ────────────────────────────────────────────────

#[test]
fn live_tree_serializes_back_to_html() {
    let (_, live) = live_from(r#"<h1 class="t">Hi</h1><img src="/x.png">"#);
    assert_eq!(
        live.to_html(),
        r#"<body><h1 class="t">Hi</h1><img src="/x.png"></body>"#
    );
}

#[test]
fn serializer_escapes_text_and_attributes() {
    let (_, live) = live_from(r#"<p title="a&quot;b">1 &lt; 2</p>"#);
    let html = live.to_html();
    assert!(html.contains("1 &lt; 2"));
    assert!(html.contains("a&quot;b"));
}
