use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(24, 0).is_err());
    assert!(Fps::whole(24).is_ok());
}

#[test]
fn frame_budget_is_fps_times_seconds() {
    assert_eq!(Fps::whole(24).unwrap().frames_in(5), 120);
    assert_eq!(Fps::new(30000, 1001).unwrap().frames_in(10), 299);
    assert_eq!(Fps::whole(30).unwrap().frames_in(0), 0);
}

#[test]
fn deserialized_fps_is_revalidated() {
    let fps: Fps = serde_json::from_str(r#"{"num":25,"den":0}"#).unwrap();
    assert!(fps.validate().is_err());
}

#[test]
fn rounded_rate_for_encoders() {
    assert_eq!(Fps::new(30000, 1001).unwrap().rounded(), 30);
    assert_eq!(Fps::whole(24).unwrap().rounded(), 24);
}
