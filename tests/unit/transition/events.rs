use super::*;

#[test]
fn events_use_a_type_tag() {
    let json = serde_json::to_string(&HostEvent::Resize {
        width: 320.0,
        height: 200.0,
    })
    .unwrap();
    assert_eq!(json, r#"{"type":"resize","width":320.0,"height":200.0}"#);

    let parsed: Vec<HostEvent> =
        serde_json::from_str(r#"[{"type":"pointer_enter"},{"type":"dispose"}]"#).unwrap();
    assert_eq!(parsed, vec![HostEvent::PointerEnter, HostEvent::Dispose]);
}
