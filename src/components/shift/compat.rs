use super::models::{ShiftType, WorkType};

const TWO_SHIFT: &[ShiftType] = &[ShiftType::Day, ShiftType::Night, ShiftType::Off];
const THREE_SHIFT: &[ShiftType] = &[
    ShiftType::Day,
    ShiftType::Evening,
    ShiftType::Night,
    ShiftType::Off,
];
const FIXED_NIGHT: &[ShiftType] = &[ShiftType::Night, ShiftType::Off];
const IRREGULAR: &[ShiftType] = &ShiftType::ALL;

impl WorkType {
    /// Shift types a user with this work type may be scheduled for
    pub const fn allowed_shift_types(self) -> &'static [ShiftType] {
        match self {
            WorkType::TwoShift => TWO_SHIFT,
            WorkType::ThreeShift => THREE_SHIFT,
            WorkType::FixedNight => FIXED_NIGHT,
            WorkType::Irregular => IRREGULAR,
        }
    }

    pub fn allows(self, shift: ShiftType) -> bool {
        self.allowed_shift_types().contains(&shift)
    }
}

/// Allowed shift types for a raw work type string.
///
/// Unknown work types get the `irregular` set.
///
/// ```
/// use rhythm_schedule::components::shift::{get_allowed_shift_types, ShiftType};
///
/// assert_eq!(
///     get_allowed_shift_types("2shift"),
///     &[ShiftType::Day, ShiftType::Night, ShiftType::Off]
/// );
/// assert_eq!(get_allowed_shift_types("nonsense"), &ShiftType::ALL);
/// ```
pub fn get_allowed_shift_types(work_type: &str) -> &'static [ShiftType] {
    WorkType::from_str_lenient(work_type).allowed_shift_types()
}

/// Whether `shift` may be assigned under `work_type`
pub fn is_valid_shift_type(work_type: &str, shift: ShiftType) -> bool {
    get_allowed_shift_types(work_type).contains(&shift)
}
