//! Field-group count resolution.
//!
//! One request cycle renders or accepts between 1 and 4096 column-definition
//! field groups. Three request shapes are possible and mutually exclusive:
//! a partial continuation ("give me more empty groups"), a fresh request
//! with an explicit count, and no usable signal at all.

use super::form::AddFieldRequest;

/// Hard ceiling on field groups per request. Never exceeded, even when the
/// continuation sum overflows.
pub const MAX_FIELD_GROUPS: u32 = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldResolution {
    pub count: u32,
    /// Re-display the form with the new count without re-asking the user.
    pub regenerate: bool,
}

pub fn resolve(request: &AddFieldRequest) -> FieldResolution {
    if request.submit_num_fields {
        let count = request
            .orig_num_fields
            .saturating_add(request.added_fields)
            .clamp(1, MAX_FIELD_GROUPS);
        FieldResolution {
            count,
            regenerate: true,
        }
    } else if request.num_fields > 0 {
        FieldResolution {
            count: request.num_fields.min(MAX_FIELD_GROUPS),
            regenerate: false,
        }
    } else {
        FieldResolution {
            count: 1,
            regenerate: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: serde_json::Value) -> AddFieldRequest {
        serde_json::from_value(value).expect("request should deserialize")
    }

    #[test]
    fn explicit_count_is_clamped_to_ceiling() {
        let r = resolve(&request(json!({ "num_fields": 9999 })));
        assert_eq!(r.count, MAX_FIELD_GROUPS);
        assert!(!r.regenerate);

        let r = resolve(&request(json!({ "num_fields": 4096 })));
        assert_eq!(r.count, 4096);
    }

    #[test]
    fn absent_zero_or_garbage_count_defaults_to_one() {
        for body in [
            json!({}),
            json!({ "num_fields": 0 }),
            json!({ "num_fields": -7 }),
            json!({ "num_fields": "lots" }),
        ] {
            let r = resolve(&request(body));
            assert_eq!(r.count, 1);
            assert!(!r.regenerate);
        }
    }

    #[test]
    fn continuation_adds_and_regenerates() {
        let r = resolve(&request(json!({
            "submit_num_fields": true,
            "orig_num_fields": 3,
            "added_fields": 2
        })));
        assert_eq!(r.count, 5);
        assert!(r.regenerate);
    }

    #[test]
    fn continuation_sum_is_clamped() {
        let r = resolve(&request(json!({
            "submit_num_fields": true,
            "orig_num_fields": 4090,
            "added_fields": 100
        })));
        assert_eq!(r.count, MAX_FIELD_GROUPS);
        assert!(r.regenerate);
    }

    #[test]
    fn continuation_survives_overflowing_sums() {
        let r = resolve(&request(json!({
            "submit_num_fields": true,
            "orig_num_fields": u32::MAX,
            "added_fields": u32::MAX
        })));
        assert_eq!(r.count, MAX_FIELD_GROUPS);
    }

    #[test]
    fn continuation_with_no_numbers_still_renders_one_group() {
        let r = resolve(&request(json!({ "submit_num_fields": "Go" })));
        assert_eq!(r.count, 1);
        assert!(r.regenerate);
    }

    #[test]
    fn continuation_takes_priority_over_explicit_count() {
        let r = resolve(&request(json!({
            "submit_num_fields": true,
            "orig_num_fields": 2,
            "added_fields": 1,
            "num_fields": 40
        })));
        assert_eq!(r.count, 3);
        assert!(r.regenerate);
    }
}
