use chrome_ext::{BrowserActionInfo, Error, ExtensionManifest, PluginInfo};
use serde_json::json;

fn manifest() -> ExtensionManifest {
    ExtensionManifest {
        name: "Counter".into(),
        version: "1.2.3.4".into(),
        description: Some("Counts clicks".into()),
        browser_action: Some(BrowserActionInfo {
            default_icon: "icon.png".into(),
            name: "Count".into(),
            popup: Some("popup.html".into()),
        }),
        plugins: vec![
            PluginInfo {
                path: "plugins/native.so".into(),
                public: true,
            },
            PluginInfo {
                path: "plugins/private.dll".into(),
                public: false,
            },
        ],
    }
}

fn render(m: &ExtensionManifest) -> String {
    let mut out = Vec::new();
    m.write(&mut out).expect("write");
    String::from_utf8(out).unwrap()
}

#[test]
fn manifest_renders_in_fixed_member_order() {
    assert_eq!(
        render(&manifest()),
        concat!(
            r#"{"name":"Counter","version":"1.2.3.4","description":"Counts clicks","#,
            r#""browser_action":{"default_icon":"icon.png","name":"Count","popup":"popup.html"},"#,
            r#""plugins":[{"path":"plugins/native.so","public":true},"#,
            r#"{"path":"plugins/private.dll","public":false}]}"#
        )
    );
}

#[test]
fn manifest_shapes_match_expectations() {
    let v: serde_json::Value = serde_json::from_str(&render(&manifest())).unwrap();
    assert_eq!(
        v,
        json!({
            "name": "Counter",
            "version": "1.2.3.4",
            "description": "Counts clicks",
            "browser_action": {
                "default_icon": "icon.png",
                "name": "Count",
                "popup": "popup.html"
            },
            "plugins": [
                {"path": "plugins/native.so", "public": true},
                {"path": "plugins/private.dll", "public": false}
            ]
        })
    );
}

#[test]
fn optional_sections_are_omitted() {
    let mut m = manifest();
    m.description = None;
    m.plugins.clear();
    if let Some(action) = m.browser_action.as_mut() {
        action.popup = Some(String::new());
    }
    assert_eq!(
        render(&m),
        r#"{"name":"Counter","version":"1.2.3.4","browser_action":{"default_icon":"icon.png","name":"Count"}}"#
    );

    m.browser_action = None;
    assert_eq!(render(&m), r#"{"name":"Counter","version":"1.2.3.4"}"#);
}

fn assert_invalid(m: &ExtensionManifest) {
    match m.validate() {
        Err(Error::InvalidManifest(_)) => {}
        other => panic!("expected InvalidManifest, got {other:?}"),
    }
    let mut sink = Vec::new();
    assert!(m.write(&mut sink).is_err());
    assert!(sink.is_empty(), "nothing is written for an invalid manifest");
}

#[test]
fn versions_must_be_dotted_integers() {
    for ok in ["1", "1.0", "0.0.0.0", "65535.1.2.3"] {
        let mut m = manifest();
        m.version = ok.into();
        assert!(m.validate().is_ok(), "{ok} should be accepted");
    }
    for bad in [
        "", "1.", ".1", "1.2.3.4.5", "1.a", "65536", "-1", "+1", "1 .0", "01.0", "1.032", "00",
    ] {
        let mut m = manifest();
        m.version = bad.into();
        assert_invalid(&m);
    }
}

#[test]
fn required_fields_must_be_present() {
    let mut m = manifest();
    m.name = "  ".into();
    assert_invalid(&m);

    let mut m = manifest();
    if let Some(action) = m.browser_action.as_mut() {
        action.default_icon = String::new();
    }
    assert_invalid(&m);

    let mut m = manifest();
    if let Some(action) = m.browser_action.as_mut() {
        action.name = String::new();
    }
    assert_invalid(&m);
}

#[test]
fn plugin_paths_stay_inside_the_extension() {
    for bad in ["", "/usr/lib/plugin.so", "../outside.so", "plugins/../../x.so"] {
        let mut m = manifest();
        m.plugins = vec![PluginInfo {
            path: bad.into(),
            public: false,
        }];
        assert_invalid(&m);
    }
}
