use crate::models::PersonalMinimums;

/// Ceiling floor applied to night operations, feet.
pub const NIGHT_CEILING_FLOOR_FT: u32 = 1500;
/// Visibility floor applied to night operations, statute miles.
pub const NIGHT_VISIBILITY_FLOOR_SM: f64 = 5.0;

/// Stricter minimums for night flight. Never relaxes a pilot's own limit.
pub fn night_minimums(base: &PersonalMinimums) -> PersonalMinimums {
    PersonalMinimums {
        ceiling_ft: base.ceiling_ft.max(NIGHT_CEILING_FLOOR_FT),
        visibility_sm: base.visibility_sm.max(NIGHT_VISIBILITY_FLOOR_SM),
        ..*base
    }
}
