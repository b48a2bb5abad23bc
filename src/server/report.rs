//! Status body rendering.
//!
//! The body has a fixed field order and spacing that existing clients match
//! on, so it is formatted by hand rather than through `#[derive(Serialize)]`:
//!
//! ```text
//! { "state": "Playing", "filename": "a.mp4", "position": 12.500000, "rate": 1.000000, "volume": 0.750000 }
//! ```
//!
//! Strings are escaped with `serde_json` (quotes, backslashes, control
//! characters). Numbers always use six fractional digits and a `.` decimal
//! point; non-finite values are written as zero to keep the body valid JSON.

use crate::core::engine::PlayerSnapshot;

/// Render a snapshot as the JSON status body.
pub fn render(snapshot: &PlayerSnapshot) -> Vec<u8> {
    render_string(snapshot).into_bytes()
}

pub fn render_string(snapshot: &PlayerSnapshot) -> String {
    format!(
        "{{ \"state\": {}, \"filename\": {}, \"position\": {}, \"rate\": {}, \"volume\": {} }}",
        json_str(&snapshot.state),
        json_str(&snapshot.filename),
        json_num(snapshot.position),
        json_num(snapshot.rate),
        json_num(snapshot.volume_fraction()),
    )
}

fn json_str(s: &str) -> String {
    // Serializing a &str cannot fail
    serde_json::to_string(s).unwrap_or_else(|_| String::from("\"\""))
}

fn json_num(v: f64) -> String {
    let v = if v.is_finite() { v } else { 0.0 };
    format!("{:.6}", v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(state: &str, filename: &str, position: f64, rate: f64, volume: i32) -> PlayerSnapshot {
        PlayerSnapshot {
            state: state.into(),
            filename: filename.into(),
            position,
            rate,
            volume,
        }
    }

    #[test]
    fn test_byte_exact() {
        let body = render(&snap("Playing", "a.mp4", 12.5, 1.0, 75));
        assert_eq!(
            body,
            br#"{ "state": "Playing", "filename": "a.mp4", "position": 12.500000, "rate": 1.000000, "volume": 0.750000 }"#
        );
    }

    #[test]
    fn test_escaping() {
        let out = render_string(&snap("Stopped", "C:\\a \"b\"\n\t.mp4", 0.0, 1.0, 0));
        assert!(out.contains(r#""filename": "C:\\a \"b\"\n\t.mp4""#));

        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["filename"], "C:\\a \"b\"\n\t.mp4");
    }

    #[test]
    fn test_control_chars_escaped() {
        let out = render_string(&snap("Stopped", "a\u{1}b", 0.0, 1.0, 0));
        assert!(out.contains(r#""a\u0001b""#));
    }

    #[test]
    fn test_field_order_and_valid_json() {
        let out = render_string(&snap("Paused", "", 3600.123456789, 0.5, 100));
        let keys: Vec<usize> = ["\"state\"", "\"filename\"", "\"position\"", "\"rate\"", "\"volume\""]
            .iter()
            .map(|k| out.find(k).unwrap())
            .collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));

        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.as_object().unwrap().len(), 5);
        assert_eq!(parsed["volume"], 1.0);
        assert_eq!(parsed["position"], 3600.123457);
    }

    #[test]
    fn test_non_finite_rendered_as_zero() {
        let out = render_string(&snap("Playing", "x", f64::NAN, f64::INFINITY, 50));
        assert!(out.contains("\"position\": 0.000000"));
        assert!(out.contains("\"rate\": 0.000000"));
        assert!(serde_json::from_str::<serde_json::Value>(&out).is_ok());
    }
}
